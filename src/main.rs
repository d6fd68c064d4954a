use anyhow::{Context, Result};
use clap::Parser;
use strum::IntoEnumIterator;

use sd_zones::config::DEBUG_FLAGS;
use sd_zones::utils::{bar_interval_ms, epoch_ms_to_utc, interval_label};
use sd_zones::{AnalysisOutput, BarSeries, Cli, ZoneKind, analyze_collection, load_series};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    let config = args.zone_config()?;

    // C. Data Loading
    let series = args
        .inputs
        .iter()
        .map(|path| load_series(path))
        .collect::<Result<Vec<BarSeries>>>()?;

    // D. Analysis, one series per rayon task
    let results = analyze_collection(&series, &config);

    let mut outputs = serde_json::Map::new();
    for ((name, result), input) in results.into_iter().zip(&series) {
        let output = result.context(format!("Analysis failed for {}", name))?;
        if args.summary || DEBUG_FLAGS.print_batch_summary {
            log_summary(input, &output);
        }
        outputs.insert(name, serde_json::to_value(&output)?);
    }

    // E. Output
    if !args.summary {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    }
    Ok(())
}

fn log_summary(series: &BarSeries, output: &AnalysisOutput) {
    let times: Vec<i64> = series.bars.iter().take(2).map(|b| b.time_ms).collect();
    let interval = bar_interval_ms(&times)
        .and_then(interval_label)
        .unwrap_or("unknown");

    log::info!(
        "{} ({} bars, {}, {} -> {}): {} swing highs, {} swing lows, {} zig-zag points",
        series.name,
        series.len(),
        interval,
        series.first_time_ms().map(epoch_ms_to_utc).unwrap_or_default(),
        series.last_time_ms().map(epoch_ms_to_utc).unwrap_or_default(),
        output.swing_highs.len(),
        output.swing_lows.len(),
        output.zig_zag.len(),
    );

    for kind in ZoneKind::iter() {
        let (zones, bos) = match kind {
            ZoneKind::Supply => (&output.supply_zones, &output.supply_bos),
            ZoneKind::Demand => (&output.demand_zones, &output.demand_bos),
        };
        log::info!("  {}: {} live zones, {} breaks", kind, zones.len(), bos.len());
        for zone in zones {
            log::info!(
                "    [{:.5}, {:.5}] poi {:.5} from {}",
                zone.bottom,
                zone.top,
                zone.poi,
                epoch_ms_to_utc(zone.origin_time_ms)
            );
        }
    }
}
