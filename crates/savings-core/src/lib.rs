//! Savings Core: shared types, stores and the savings formula.
//!
//! This crate has no internal dependencies and performs no I/O. The HTTP
//! server and the client crates both build on it, so the savings they compute
//! always agree.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`settings`]: Global hourly rates and their store
//! - [`project`]: Project records and the shapes used to create and patch them
//! - [`derived`]: Derived savings and totals
//! - [`store`]: The in-memory project store
//! - [`util`]: Number normalization, id derivation, and amount formatting

#![doc = include_str!("../README.md")]

pub mod derived;
pub mod error;
pub mod project;
pub mod settings;
pub mod store;
pub mod util;

#[cfg(test)]
mod proptests;

// Re-export key types at crate root for convenience
pub use derived::{Derived, MINUTES_PER_HOUR, ProjectView, Totals, compute_derived};
pub use error::{Error, Result};
pub use project::{Project, ProjectDraft, ProjectInput, ProjectPatch, demo_projects};
pub use settings::{Settings, SettingsPatch, SettingsStore};
pub use store::ProjectStore;

// Convenience re-exports from util
pub use util::format::format_amount;
pub use util::ids::{slugify, unique_id};
pub use util::numbers::to_non_negative_number;
