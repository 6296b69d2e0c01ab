//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `setup.rs` — detect/install/doctor.
//! - `whitelist.rs` — profile whitelist add/remove/list/apply.
//! - `runtime.rs` — services/launch/menu.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod runtime;
pub mod setup;
pub mod whitelist;

pub use runtime::handle_runtime_commands;
pub use setup::handle_setup_commands;
pub use whitelist::handle_whitelist_commands;
