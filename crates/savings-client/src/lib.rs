//! # savings-client
//!
//! Client side of the Savings Calculator.
//!
//! - [`SavingsClient`]: typed async client for every API endpoint
//! - [`ProjectBoard`]: local, optimistically edited copy of the project list
//!   with an explicit per-record state machine ([`RecordState`])
//!
//! Savings shown by the board are computed with the same
//! [`compute_derived`](savings_core::compute_derived) the server uses, so a
//! live preview always matches what the server returns after a save.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod board;
pub mod client;
pub mod error;

pub use board::{ProjectBoard, Record, RecordState};
pub use client::SavingsClient;
pub use error::{Error, Result};
