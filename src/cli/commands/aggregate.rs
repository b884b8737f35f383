//! Aggregate command implementation.

use anyhow::{Context, Result};
use candlefuse_store::{import_tsv, BarStore};
use tracing::info;

use crate::cli::AggregateArgs;

pub fn run(args: AggregateArgs) -> Result<()> {
    let store = BarStore::new();
    let summary = import_tsv(&store, args.timeframe, &args.data, None)
        .with_context(|| format!("failed to import '{}'", args.data.display()))?;
    info!(imported = summary.imported, "source bars loaded");

    let produced = store
        .aggregate(args.timeframe, args.target)
        .context("aggregation failed")?;

    println!(
        "Aggregated {} {} bars into {} {} bars",
        summary.imported, args.timeframe, produced, args.target
    );
    Ok(())
}
