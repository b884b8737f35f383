//! Bulk import of tab-separated history files.
//!
//! Accepts MetaTrader-style exports with headers such as
//! `<DATE>\t<TIME>\t<OPEN>\t<HIGH>\t<LOW>\t<CLOSE>\t<TICKVOL>\t<VOL>`
//! (angle brackets optional, `TIME` absent for daily files). Bad rows are
//! skipped and counted; a single malformed line never aborts the import.

use crate::BarStore;
use candlefuse_core::{Bar, DataError, ImportSummary, Timeframe};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct TsvRecord {
    #[serde(rename = "DATE")]
    date: String,
    #[serde(rename = "TIME", default)]
    time: Option<String>,
    #[serde(rename = "OPEN")]
    open: f64,
    #[serde(rename = "HIGH")]
    high: f64,
    #[serde(rename = "LOW")]
    low: f64,
    #[serde(rename = "CLOSE")]
    close: f64,
    #[serde(rename = "TICKVOL", default)]
    tickvol: u64,
    #[serde(rename = "VOL", default)]
    vol: u64,
}

impl TsvRecord {
    fn timestamp_millis(&self) -> Result<i64, DataError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y.%m.%d")
            .or_else(|_| NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d"))
            .map_err(|e| DataError::Parse(format!("bad date {:?}: {}", self.date, e)))?;
        let time = match self.time.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => NaiveTime::parse_from_str(t, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
                .map_err(|e| DataError::Parse(format!("bad time {:?}: {}", t, e)))?,
            _ => NaiveTime::MIN,
        };
        Ok(NaiveDateTime::new(date, time).and_utc().timestamp_millis())
    }

    fn into_bar(self) -> Result<Bar, DataError> {
        let timestamp = self.timestamp_millis()?;
        // Real volume when present, tick volume as the fallback.
        let volume = if self.vol > 0 { self.vol } else { self.tickvol };
        Ok(Bar::new(
            timestamp, self.open, self.high, self.low, self.close, volume,
        ))
    }
}

/// Import a tab-separated history file into one timeframe table.
///
/// `limit` keeps only the trailing rows of the file, mirroring how large
/// minute-level exports are usually truncated before import. Returns the
/// stored/skipped row counts.
pub fn import_tsv(
    store: &BarStore,
    timeframe: Timeframe,
    path: &Path,
    limit: Option<usize>,
) -> Result<ImportSummary, DataError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DataError::Parse(e.to_string()))?;

    // Strip the MetaTrader angle brackets so serde field names match.
    let headers: StringRecord = reader
        .headers()
        .map_err(|e| DataError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.trim().trim_matches(|c| c == '<' || c == '>').to_uppercase())
        .collect();
    reader.set_headers(headers);

    let mut bars = Vec::new();
    let mut skipped = 0usize;
    for row in reader.deserialize::<TsvRecord>() {
        let record = match row {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "skipping malformed row");
                skipped += 1;
                continue;
            }
        };
        match record.into_bar() {
            Ok(bar) => bars.push(bar),
            Err(e) => {
                warn!(error = %e, "skipping unparseable row");
                skipped += 1;
            }
        }
    }

    if let Some(limit) = limit {
        if bars.len() > limit {
            bars.drain(..bars.len() - limit);
        }
    }

    let mut summary = store.insert_many(timeframe, bars);
    summary.skipped += skipped;
    info!(
        timeframe = %timeframe,
        path = %path.display(),
        imported = summary.imported,
        skipped = summary.skipped,
        "import finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_import_daily_file() {
        let file = write_file(
            "<DATE>\t<OPEN>\t<HIGH>\t<LOW>\t<CLOSE>\t<TICKVOL>\t<VOL>\n\
             2024.01.02\t2050.0\t2061.5\t2045.0\t2060.0\t1200\t0\n\
             2024.01.03\t2060.0\t2070.0\t2055.0\t2068.0\t1500\t9000\n",
        );
        let store = BarStore::new();
        let summary = import_tsv(&store, Timeframe::D1, file.path(), None).unwrap();
        assert_eq!(summary, ImportSummary { imported: 2, skipped: 0 });

        let latest = store.latest(Timeframe::D1).unwrap();
        assert_eq!(latest.close, 2068.0);
        // VOL wins when non-zero, TICKVOL otherwise.
        assert_eq!(latest.volume, 9000);
        assert_eq!(store.query(Timeframe::D1, None, None, None)[0].volume, 1200);
    }

    #[test]
    fn test_import_intraday_with_time_column() {
        let file = write_file(
            "<DATE>\t<TIME>\t<OPEN>\t<HIGH>\t<LOW>\t<CLOSE>\t<TICKVOL>\n\
             2024.01.02\t10:15:00\t2050.0\t2052.0\t2049.0\t2051.0\t40\n\
             2024.01.02\t10:30\t2051.0\t2053.0\t2050.0\t2052.5\t35\n",
        );
        let store = BarStore::new();
        let summary = import_tsv(&store, Timeframe::M15, file.path(), None).unwrap();
        assert_eq!(summary.imported, 2);

        let bars = store.query(Timeframe::M15, None, None, None);
        assert_eq!(bars[1].timestamp - bars[0].timestamp, 15 * 60 * 1000);
    }

    #[test]
    fn test_import_skips_bad_rows() {
        let file = write_file(
            "<DATE>\t<OPEN>\t<HIGH>\t<LOW>\t<CLOSE>\t<VOL>\n\
             not-a-date\t1\t2\t0.5\t1.5\t10\n\
             2024.01.02\tabc\t2\t0.5\t1.5\t10\n\
             2024.01.03\t2060.0\t2070.0\t2055.0\t2068.0\t500\n\
             2024.01.03\t2060.0\t2070.0\t2055.0\t2068.0\t500\n",
        );
        let store = BarStore::new();
        let summary = import_tsv(&store, Timeframe::D1, file.path(), None).unwrap();
        // one good row, one duplicate, two malformed
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 3);
        assert_eq!(store.len(Timeframe::D1), 1);
    }

    #[test]
    fn test_import_limit_keeps_tail() {
        let file = write_file(
            "<DATE>\t<OPEN>\t<HIGH>\t<LOW>\t<CLOSE>\t<VOL>\n\
             2024.01.02\t1.0\t2.0\t0.5\t1.5\t10\n\
             2024.01.03\t1.5\t2.5\t1.0\t2.0\t10\n\
             2024.01.04\t2.0\t3.0\t1.5\t2.5\t10\n",
        );
        let store = BarStore::new();
        let summary = import_tsv(&store, Timeframe::D1, file.path(), Some(2)).unwrap();
        assert_eq!(summary.imported, 2);
        let bars = store.query(Timeframe::D1, None, None, None);
        assert_eq!(bars[0].open, 1.5);
    }
}
