//! Technical indicator catalogue.
//!
//! Every indicator is a pure function from an ascending bar window to an
//! [`IndicatorResult`](candlefuse_core::IndicatorResult) carrying the
//! indicator value(s), a directional signal, and a confidence in
//! `[0, 100]`. The uniform edge-case policy: a window shorter than the
//! indicator's minimum yields the inconclusive result (no value, HOLD,
//! confidence 0) rather than an error, so fusion can skip it safely.
//!
//! The catalogue itself is the closed [`IndicatorKind`] enumeration;
//! [`compute_all`] evaluates the whole set over one window.

mod catalogue;
mod levels;
mod momentum;
mod moving_average;
mod series;
mod trend;
mod volatility;
mod volume;

pub use catalogue::{compute_all, IndicatorKind};
pub use levels::{fibonacci, pivot_points, support_resistance};
pub use momentum::{cci, macd, momentum, rsi, roc, stochastic, williams_r};
pub use moving_average::{ema, golden_cross, sma};
pub use trend::{adx, donchian, ichimoku, parabolic_sar};
pub use volatility::{atr, bollinger};
pub use volume::{mfi, obv, vwap};
