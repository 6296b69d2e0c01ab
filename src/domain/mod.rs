//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — config, package manager family, report/output structs.
//! - `catalog.rs` — built-in daemon catalog (menu order is stable).
//! - `errors.rs` — coded failures surfaced in the `--json` error envelope.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/process side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs.
//! Keep schema-impacting changes synchronized with `docs/contracts/*`.

pub mod catalog;
pub mod errors;
pub mod models;
