//! Import command implementation.

use anyhow::{Context, Result};
use candlefuse_store::{import_tsv, BarStore};
use tracing::info;

use crate::cli::ImportArgs;

pub fn run(args: ImportArgs) -> Result<()> {
    let store = BarStore::new();
    let summary = import_tsv(&store, args.timeframe, &args.data, args.limit)
        .with_context(|| format!("failed to import '{}'", args.data.display()))?;

    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        timeframe = %args.timeframe,
        "import complete"
    );
    println!(
        "Imported {} bars into {} ({} rows skipped)",
        summary.imported, args.timeframe, summary.skipped
    );
    Ok(())
}
