use std::collections::BTreeMap;
use std::fmt;

use candlefuse_core::{Bar, IndicatorResult};

use crate::{levels, momentum, moving_average, trend, volatility, volume};

/// The closed set of indicators the engine knows how to compute.
///
/// Parameterized families (SMA, EMA) appear once per configured period so
/// that every member has a stable key for weighting and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndicatorKind {
    Sma20,
    Sma50,
    Sma200,
    Ema20,
    Ema50,
    Rsi,
    Macd,
    Bollinger,
    Atr,
    Stochastic,
    WilliamsR,
    Cci,
    Mfi,
    Obv,
    Adx,
    Roc,
    Momentum,
    Fibonacci,
    PivotPoints,
    Donchian,
    ParabolicSar,
    Vwap,
    Ichimoku,
    SupportResistance,
    GoldenCross,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 25] = [
        IndicatorKind::Sma20,
        IndicatorKind::Sma50,
        IndicatorKind::Sma200,
        IndicatorKind::Ema20,
        IndicatorKind::Ema50,
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::Bollinger,
        IndicatorKind::Atr,
        IndicatorKind::Stochastic,
        IndicatorKind::WilliamsR,
        IndicatorKind::Cci,
        IndicatorKind::Mfi,
        IndicatorKind::Obv,
        IndicatorKind::Adx,
        IndicatorKind::Roc,
        IndicatorKind::Momentum,
        IndicatorKind::Fibonacci,
        IndicatorKind::PivotPoints,
        IndicatorKind::Donchian,
        IndicatorKind::ParabolicSar,
        IndicatorKind::Vwap,
        IndicatorKind::Ichimoku,
        IndicatorKind::SupportResistance,
        IndicatorKind::GoldenCross,
    ];

    /// Stable key used for weight lookup and JSON output.
    pub fn key(&self) -> &'static str {
        match self {
            IndicatorKind::Sma20 => "sma_20",
            IndicatorKind::Sma50 => "sma_50",
            IndicatorKind::Sma200 => "sma_200",
            IndicatorKind::Ema20 => "ema_20",
            IndicatorKind::Ema50 => "ema_50",
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::Macd => "macd",
            IndicatorKind::Bollinger => "bollinger",
            IndicatorKind::Atr => "atr",
            IndicatorKind::Stochastic => "stochastic",
            IndicatorKind::WilliamsR => "williams_r",
            IndicatorKind::Cci => "cci",
            IndicatorKind::Mfi => "mfi",
            IndicatorKind::Obv => "obv",
            IndicatorKind::Adx => "adx",
            IndicatorKind::Roc => "roc",
            IndicatorKind::Momentum => "momentum",
            IndicatorKind::Fibonacci => "fibonacci",
            IndicatorKind::PivotPoints => "pivot_points",
            IndicatorKind::Donchian => "donchian",
            IndicatorKind::ParabolicSar => "parabolic_sar",
            IndicatorKind::Vwap => "vwap",
            IndicatorKind::Ichimoku => "ichimoku",
            IndicatorKind::SupportResistance => "support_resistance",
            IndicatorKind::GoldenCross => "golden_cross",
        }
    }

    /// Smallest window that produces a conclusive result.
    pub fn min_bars(&self) -> usize {
        match self {
            IndicatorKind::Sma20 | IndicatorKind::Ema20 => 20,
            IndicatorKind::Sma50 | IndicatorKind::Ema50 => 50,
            IndicatorKind::Sma200 => 200,
            IndicatorKind::Rsi => 15,
            IndicatorKind::Macd => 26,
            IndicatorKind::Bollinger => 20,
            IndicatorKind::Atr => 15,
            IndicatorKind::Stochastic => 16,
            IndicatorKind::WilliamsR => 14,
            IndicatorKind::Cci => 20,
            IndicatorKind::Mfi => 15,
            IndicatorKind::Obv => 10,
            IndicatorKind::Adx => 15,
            IndicatorKind::Roc | IndicatorKind::Momentum => 11,
            IndicatorKind::Fibonacci => 20,
            IndicatorKind::PivotPoints => 2,
            IndicatorKind::Donchian => 21,
            IndicatorKind::ParabolicSar => 5,
            IndicatorKind::Vwap => 5,
            IndicatorKind::Ichimoku => 52,
            IndicatorKind::SupportResistance => 20,
            IndicatorKind::GoldenCross => 200,
        }
    }

    pub fn compute(&self, bars: &[Bar]) -> IndicatorResult {
        match self {
            IndicatorKind::Sma20 => moving_average::sma(bars, 20),
            IndicatorKind::Sma50 => moving_average::sma(bars, 50),
            IndicatorKind::Sma200 => moving_average::sma(bars, 200),
            IndicatorKind::Ema20 => moving_average::ema(bars, 20),
            IndicatorKind::Ema50 => moving_average::ema(bars, 50),
            IndicatorKind::Rsi => momentum::rsi(bars),
            IndicatorKind::Macd => momentum::macd(bars),
            IndicatorKind::Bollinger => volatility::bollinger(bars),
            IndicatorKind::Atr => volatility::atr(bars),
            IndicatorKind::Stochastic => momentum::stochastic(bars),
            IndicatorKind::WilliamsR => momentum::williams_r(bars),
            IndicatorKind::Cci => momentum::cci(bars),
            IndicatorKind::Mfi => volume::mfi(bars),
            IndicatorKind::Obv => volume::obv(bars),
            IndicatorKind::Adx => trend::adx(bars),
            IndicatorKind::Roc => momentum::roc(bars),
            IndicatorKind::Momentum => momentum::momentum(bars),
            IndicatorKind::Fibonacci => levels::fibonacci(bars),
            IndicatorKind::PivotPoints => levels::pivot_points(bars),
            IndicatorKind::Donchian => trend::donchian(bars),
            IndicatorKind::ParabolicSar => trend::parabolic_sar(bars),
            IndicatorKind::Vwap => volume::vwap(bars),
            IndicatorKind::Ichimoku => trend::ichimoku(bars),
            IndicatorKind::SupportResistance => levels::support_resistance(bars),
            IndicatorKind::GoldenCross => moving_average::golden_cross(bars),
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Evaluate the full catalogue over one bar window.
///
/// Indicators whose minimum window exceeds the input still appear in the
/// map, carrying their inconclusive result.
pub fn compute_all(bars: &[Bar]) -> BTreeMap<String, IndicatorResult> {
    IndicatorKind::ALL
        .iter()
        .map(|kind| (kind.key().to_string(), kind.compute(bars)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use candlefuse_core::Signal;

    fn rising_bars(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let c = 100.0 + i as f64 * 0.5;
                Bar::new(i as i64 * 60_000, c - 0.2, c + 1.0, c - 1.0, c, 1_000)
            })
            .collect()
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = IndicatorKind::ALL.iter().map(|k| k.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), IndicatorKind::ALL.len());
    }

    #[test]
    fn test_every_kind_inconclusive_below_minimum() {
        for kind in IndicatorKind::ALL {
            let bars = rising_bars(kind.min_bars() - 1);
            let result = kind.compute(&bars);
            assert!(
                result.is_inconclusive(),
                "{} reported a value on {} bars",
                kind,
                bars.len()
            );
            assert_eq!(result.signal, Signal::Hold);
            assert_eq!(result.confidence, 0.0);
        }
    }

    #[test]
    fn test_every_kind_conclusive_at_minimum() {
        for kind in IndicatorKind::ALL {
            let bars = rising_bars(kind.min_bars());
            let result = kind.compute(&bars);
            assert!(
                !result.is_inconclusive(),
                "{} inconclusive on {} bars",
                kind,
                bars.len()
            );
        }
    }

    #[test]
    fn test_compute_all_covers_catalogue() {
        let map = compute_all(&rising_bars(250));
        assert_eq!(map.len(), IndicatorKind::ALL.len());
        for kind in IndicatorKind::ALL {
            let result = &map[kind.key()];
            assert!(!result.is_inconclusive(), "{} missing a value", kind);
        }
        // A long steady uptrend should not read as a sell across the board.
        assert!(map["adx"].signal.is_buy());
        assert!(map["golden_cross"].signal != Signal::StrongSell);
    }
}
