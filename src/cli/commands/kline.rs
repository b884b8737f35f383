//! Kline command implementation.

use anyhow::{Context, Result};
use candlefuse_store::{import_tsv, BarStore};

use crate::cli::KlineArgs;

pub fn run(args: KlineArgs) -> Result<()> {
    let store = BarStore::new();
    import_tsv(&store, args.timeframe, &args.data, None)
        .with_context(|| format!("failed to import '{}'", args.data.display()))?;

    let bars = store.kline(args.timeframe, args.limit, args.reverse);
    if args.output == "json" {
        println!("{}", serde_json::to_string_pretty(&bars)?);
        return Ok(());
    }

    println!(
        "{:<20} {:>10} {:>10} {:>10} {:>10} {:>12}",
        "time", "open", "high", "low", "close", "volume"
    );
    for bar in &bars {
        println!(
            "{:<20} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>12}",
            bar.datetime().format("%Y-%m-%d %H:%M"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        );
    }
    Ok(())
}
