//! Core types and errors for the candlefuse analysis engine.
//!
//! This crate provides the foundational building blocks shared by the
//! store, indicator, and fusion crates:
//! - Market data types (`Bar`, `Timeframe`)
//! - Signal and indicator result types
//! - Fusion output types
//! - The error taxonomy

pub mod error;
pub mod types;

pub use error::{DataError, DataResult};
pub use types::*;
