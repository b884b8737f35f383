//! The bar store and its aggregation rules.

use candlefuse_core::{Bar, DataError, ImportSummary, Timeframe};
use chrono::{DateTime, Datelike, Utc};
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, warn};

/// In-memory multi-timeframe bar store.
///
/// One ordered table per timeframe, each behind its own `RwLock`, so
/// writes are serialized per timeframe while readers proceed against the
/// last committed state. The store is explicitly constructed and passed
/// by reference; there is no process-wide singleton.
pub struct BarStore {
    tables: HashMap<Timeframe, RwLock<BTreeMap<i64, Bar>>>,
}

impl BarStore {
    /// Create an empty store with a table for every timeframe.
    pub fn new() -> Self {
        let tables = Timeframe::all()
            .iter()
            .map(|tf| (*tf, RwLock::new(BTreeMap::new())))
            .collect();
        Self { tables }
    }

    fn table(&self, timeframe: Timeframe) -> &RwLock<BTreeMap<i64, Bar>> {
        // Every variant is inserted in new(), so the lookup cannot miss.
        &self.tables[&timeframe]
    }

    /// Insert a bar. Returns `Ok(false)` when a bar with the same
    /// timestamp already exists (the stored bar is never overwritten),
    /// `Err(InvalidBar)` when the OHLC invariant is violated.
    pub fn insert(&self, timeframe: Timeframe, bar: Bar) -> Result<bool, DataError> {
        bar.validate()?;
        let mut table = self
            .table(timeframe)
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if table.contains_key(&bar.timestamp) {
            return Ok(false);
        }
        table.insert(bar.timestamp, bar);
        Ok(true)
    }

    /// Insert a batch of bars, counting stored and skipped rows.
    /// A malformed or duplicate bar never aborts the batch.
    pub fn insert_many(
        &self,
        timeframe: Timeframe,
        bars: impl IntoIterator<Item = Bar>,
    ) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for bar in bars {
            match self.insert(timeframe, bar) {
                Ok(true) => summary.imported += 1,
                Ok(false) => summary.skipped += 1,
                Err(e) => {
                    warn!(timeframe = %timeframe, error = %e, "skipping invalid bar");
                    summary.skipped += 1;
                }
            }
        }
        debug!(
            timeframe = %timeframe,
            imported = summary.imported,
            skipped = summary.skipped,
            "bulk insert finished"
        );
        summary
    }

    /// Query bars in ascending timestamp order. `start`/`end` are
    /// inclusive epoch-milli bounds; `limit` keeps the most recent bars.
    pub fn query(
        &self,
        timeframe: Timeframe,
        start: Option<i64>,
        end: Option<i64>,
        limit: Option<usize>,
    ) -> Vec<Bar> {
        let table = self
            .table(timeframe)
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let lo = start.map_or(Bound::Unbounded, Bound::Included);
        let hi = end.map_or(Bound::Unbounded, Bound::Included);
        let mut bars: Vec<Bar> = table.range((lo, hi)).map(|(_, b)| *b).collect();
        if let Some(limit) = limit {
            if bars.len() > limit {
                bars.drain(..bars.len() - limit);
            }
        }
        bars
    }

    /// The most recent `limit` bars, newest first when `reverse` is set.
    /// This is the shape chart consumers expect.
    pub fn kline(&self, timeframe: Timeframe, limit: usize, reverse: bool) -> Vec<Bar> {
        let mut bars = self.query(timeframe, None, None, Some(limit));
        if reverse {
            bars.reverse();
        }
        bars
    }

    /// The most recent bar, or `None` when the table is empty.
    pub fn latest(&self, timeframe: Timeframe) -> Option<Bar> {
        self.table(timeframe)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .next_back()
            .copied()
    }

    /// Number of bars stored for a timeframe.
    pub fn len(&self, timeframe: Timeframe) -> usize {
        self.table(timeframe)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True when no bars are stored for a timeframe.
    pub fn is_empty(&self, timeframe: Timeframe) -> bool {
        self.len(timeframe) == 0
    }

    /// Remove every bar for a timeframe.
    pub fn clear(&self, timeframe: Timeframe) {
        self.table(timeframe)
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Rebuild `target` entirely from `source` using calendar-aligned
    /// buckets. A full replace rather than an incremental merge, so the
    /// result is reproducible regardless of prior target state. Returns
    /// the number of aggregated bars; an empty source yields `Ok(0)`.
    pub fn aggregate(&self, source: Timeframe, target: Timeframe) -> Result<usize, DataError> {
        if source >= target {
            return Err(DataError::InvalidAggregation {
                from: source,
                to: target,
            });
        }

        let buckets: BTreeMap<i64, Bar> = {
            let src = self
                .table(source)
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            let mut buckets: BTreeMap<i64, Bar> = BTreeMap::new();
            for bar in src.values() {
                let key = bucket_key(target, bar.datetime());
                buckets
                    .entry(key)
                    .and_modify(|agg| {
                        agg.high = agg.high.max(bar.high);
                        agg.low = agg.low.min(bar.low);
                        agg.close = bar.close;
                        agg.volume += bar.volume;
                    })
                    .or_insert(*bar);
            }
            buckets
        };

        let count = buckets.len();
        let mut dst = self
            .table(target)
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        dst.clear();
        dst.extend(buckets.into_values().map(|b| (b.timestamp, b)));
        info!(source = %source, target = %target, count, "aggregation rebuilt");
        Ok(count)
    }
}

impl Default for BarStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Calendar-aligned bucket key for the target granularity.
///
/// Keys only need to be ordered consistently with time and equal for bars
/// sharing a bucket; the emitted bar carries the earliest source timestamp.
fn bucket_key(target: Timeframe, dt: DateTime<Utc>) -> i64 {
    match target {
        // Truncate the UTC timestamp to a multiple of the bar length.
        Timeframe::M1 | Timeframe::M5 | Timeframe::M15 | Timeframe::M30 | Timeframe::D1 => {
            let step = target.as_secs() as i64;
            dt.timestamp() - dt.timestamp().rem_euclid(step)
        }
        Timeframe::W1 => {
            let iso = dt.iso_week();
            i64::from(iso.year()) * 100 + i64::from(iso.week())
        }
        Timeframe::Mn => i64::from(dt.year()) * 100 + i64::from(dt.month()),
    }
}
