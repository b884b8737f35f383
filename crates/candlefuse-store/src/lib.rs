//! Multi-timeframe OHLC bar store.
//!
//! Holds one ordered bar table per [`Timeframe`](candlefuse_core::Timeframe)
//! with idempotent inserts, ordered range queries, and deterministic
//! calendar-aligned aggregation between timeframes. Bulk import from
//! tab-separated history files lives in [`import`].

mod import;
mod store;

pub use import::import_tsv;
pub use store::BarStore;
