//! Command implementations.

pub mod aggregate;
pub mod analyze;
pub mod import;
pub mod kline;
