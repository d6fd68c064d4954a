//! Loading bar histories from disk.
//!
//! Supported inputs:
//! - `.json` holding an array of [`Bar`] objects
//! - `.json` holding Binance REST klines: `[openTime, "open", "high", "low", "close", ...]`
//! - `.bin` holding a bincode [`BarCacheFile`]

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::BAR_CACHE_VERSION;
use crate::data::series::BarSeries;
use crate::domain::Bar;

/// Serialized cache wrapper for a bar series.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BarCacheFile {
    pub version: f64,
    pub created_ms: i64,
    pub series: BarSeries,
}

impl BarCacheFile {
    pub fn new(series: BarSeries) -> Self {
        Self {
            version: BAR_CACHE_VERSION,
            created_ms: Utc::now().timestamp_millis(),
            series,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open cache file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let cache: BarCacheFile = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize cache: {:?}", path))?;
        if cache.version != BAR_CACHE_VERSION {
            bail!(
                "Cache {:?} has version {}, expected {}",
                path,
                cache.version,
                BAR_CACHE_VERSION
            );
        }
        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize cache to: {}", path.display()))
    }
}

/// Bars only, for callers that do not care about the series name.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    Ok(load_series(path)?.bars)
}

/// Load a series, naming it after the file stem.
pub fn load_series(path: &Path) -> Result<BarSeries> {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "series".to_string());

    match path.extension().and_then(|e| e.to_str()) {
        Some("bin") => Ok(BarCacheFile::load_from_path(path)?.series),
        Some("json") => {
            let text = std::fs::read_to_string(path)
                .context(format!("Failed to read bar file: {}", path.display()))?;
            let bars = parse_bars_json(&text)
                .context(format!("Failed to parse bar file: {}", path.display()))?;
            Ok(BarSeries::new(name, bars))
        }
        other => bail!(
            "Unsupported bar file extension {:?} for {} (expected .json or .bin)",
            other,
            path.display()
        ),
    }
}

/// Parse either the native bar format or Binance klines.
pub fn parse_bars_json(text: &str) -> Result<Vec<Bar>> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(rows) = value else {
        bail!("Expected a JSON array of bars");
    };

    match rows.first() {
        None => Ok(Vec::new()),
        Some(Value::Array(_)) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| binance_row_to_bar(i as u64, row))
            .collect(),
        Some(_) => Ok(serde_json::from_value(Value::Array(rows))?),
    }
}

fn binance_row_to_bar(index: u64, row: &Value) -> Result<Bar> {
    let Value::Array(fields) = row else {
        bail!("Kline {} is not an array", index);
    };
    if fields.len() < 5 {
        bail!("Kline {} has {} fields, need at least 5", index, fields.len());
    }

    let open_time = fields[0]
        .as_i64()
        .context(format!("Kline {}: open time is not an integer", index))?;
    let price = |pos: usize, label: &str| -> Result<f64> {
        value_to_f64(&fields[pos]).context(format!("Kline {}: bad {} price", index, label))
    };

    Ok(Bar::new(
        index,
        open_time,
        price(1, "open")?,
        price(2, "high")?,
        price(3, "low")?,
        price(4, "close")?,
    ))
}

// Binance sends prices as strings; accept plain numbers too
fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
