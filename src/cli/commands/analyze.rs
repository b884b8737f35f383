//! Analyze command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use candlefuse_engine::{evaluate, load_weights, AiContext, FusionWeights};
use candlefuse_indicators::compute_all;
use candlefuse_store::{import_tsv, BarStore};
use serde_json::json;
use tracing::{debug, info};

use crate::cli::AnalyzeArgs;

pub fn run(args: AnalyzeArgs, config_path: &Path) -> Result<()> {
    let store = BarStore::new();
    let summary = import_tsv(&store, args.timeframe, &args.data, None)
        .with_context(|| format!("failed to import '{}'", args.data.display()))?;
    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "bars loaded"
    );

    let analysis_tf = match args.target {
        Some(target) => {
            let produced = store
                .aggregate(args.timeframe, target)
                .context("aggregation failed")?;
            info!(produced, timeframe = %target, "aggregated before analysis");
            target
        }
        None => args.timeframe,
    };

    let bars = store.kline(analysis_tf, args.window, false);
    if bars.is_empty() {
        anyhow::bail!("no {} bars available to analyze", analysis_tf);
    }

    let weights = if config_path.exists() {
        load_weights(config_path).context("failed to load weights")?
    } else {
        debug!(path = %config_path.display(), "no config file, using default weights");
        FusionWeights::default()
    };

    let ai = match &args.ai {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?;
            serde_json::from_str::<AiContext>(&raw).context("invalid advisory JSON")?
        }
        None => AiContext::default(),
    };

    let indicators = compute_all(&bars);
    let fused = evaluate(&indicators, &ai, &weights);

    match args.output.as_str() {
        "json" => {
            let out = json!({
                "timeframe": analysis_tf,
                "bars": bars.len(),
                "indicators": indicators,
                "fusion": fused,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        _ => {
            println!(
                "{} bars on {} (last close {:.2})",
                bars.len(),
                analysis_tf,
                bars[bars.len() - 1].close
            );
            println!();
            for detail in &fused.details {
                println!(
                    "  {:<20} {:>11?}  conf {:>5.1}  weight {:.2}",
                    detail.indicator, detail.signal, detail.confidence, detail.weight
                );
            }
            println!();
            println!(
                "Signal: {:?}  confidence {:.1}  (buy {:.1} / sell {:.1})",
                fused.signal, fused.confidence, fused.buy_score, fused.sell_score
            );
            println!("{}", fused.recommendation);
        }
    }
    Ok(())
}
