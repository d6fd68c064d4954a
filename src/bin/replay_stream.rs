use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use sd_zones::analysis::ZoneDecision;
use sd_zones::utils::epoch_ms_to_utc;
use sd_zones::{ZoneConfig, ZoneEngine, load_series, load_zone_config};

/// Feed a bar file through the streaming engine one bar at a time.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    input: PathBuf,

    /// JSON file with zone settings; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip bars the engine rejects instead of stopping
    #[arg(long, default_value_t = false)]
    skip_bad_bars: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_zone_config(path)?,
        None => ZoneConfig::default(),
    };

    let series = load_series(&args.input)
        .with_context(|| format!("Failed to load bars {:?}", args.input))?;
    let mut engine = ZoneEngine::new(config)?;
    let mut rejected = 0usize;

    for bar in &series.bars {
        let report = match engine.update(*bar) {
            Ok(report) => report,
            Err(e) if args.skip_bad_bars => {
                rejected += 1;
                log::warn!("Skipping bar {}: {}", bar.index, e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(ZoneDecision::Admitted { zone, evicted }) = &report.decision {
            log::info!(
                "{} bar {}: {} zone [{:.5}, {:.5}] from bar {}",
                epoch_ms_to_utc(bar.time_ms),
                bar.index,
                zone.kind,
                zone.bottom,
                zone.top,
                zone.origin_bar_index
            );
            if let Some(old) = evicted {
                log::info!("    evicted {} zone from bar {}", old.kind, old.origin_bar_index);
            }
        }
        for bos in &report.breaks {
            log::info!(
                "{} bar {}: BOS {} poi {:.5} (zone from bar {})",
                epoch_ms_to_utc(bos.break_time_ms),
                bos.break_bar_index,
                bos.kind,
                bos.poi,
                bos.origin_bar_index
            );
        }
    }

    log::info!(
        "Replayed {} bars of {} ({} rejected), ATR now {:?}",
        engine.bars_seen(),
        series.name,
        rejected,
        engine.current_atr()
    );
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}
