use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use sd_zones::config::bar_cache_filename;
use sd_zones::data::BarCacheFile;
use sd_zones::domain::validate_history;
use sd_zones::load_series;

/// Convert a JSON bar file into the binary cache format.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    input: PathBuf,

    /// Directory for the cache file
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let series = load_series(&args.input)
        .with_context(|| format!("Failed to load source bars {:?}", args.input))?;
    validate_history(&series.bars)
        .with_context(|| format!("Source bars in {:?} are not usable", args.input))?;

    log::info!("Loaded {} bars of {} from {:?}", series.len(), series.name, args.input);

    let output_path = args.out_dir.join(bar_cache_filename(&series.name));
    let cache = BarCacheFile::new(series);
    cache.save_to_path(&output_path)?;

    log::info!(
        "Cache written to {:?} with {} bars.",
        output_path,
        cache.series.len()
    );
    Ok(())
}
