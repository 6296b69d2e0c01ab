//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `detect.rs` — package manager probe (PATH lookups only).
//! - `installer.rs` — firejail install via package manager or source build.
//! - `profiles.rs` — idempotent `whitelist` line patching of firejail profiles.
//! - `launcher.rs` — `[sudo] firejail <binary> <flags>` construction and launch.
//! - `menu.rs` — interactive numbered service menu.
//! - `doctor.rs` — host readiness checks.
//! - `runner.rs` — process execution seam (real and dry-run).
//! - `config.rs` — config file loading and CLI/config/default merging.
//! - `storage.rs` — audit log.
//! - `logging.rs` — tracing subscriber setup.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Every external program goes through `CommandRunner`.
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod detect;
pub mod doctor;
pub mod installer;
pub mod launcher;
pub mod logging;
pub mod menu;
pub mod output;
pub mod profiles;
pub mod runner;
pub mod storage;
