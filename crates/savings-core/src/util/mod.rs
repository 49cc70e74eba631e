//! Utility modules for input normalization, id derivation, and display.
//!
//! # Modules
//!
//! - [`format`]: Two-decimal amount formatting for display
//! - [`ids`]: Project id derivation from names
//! - [`numbers`]: Lenient non-negative number coercion

pub mod format;
pub mod ids;
pub mod numbers;
