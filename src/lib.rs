#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod utils;

// Streaming engine
pub mod engine;

// Re-export commonly used types
pub use analysis::{AnalysisOutput, ZoneDecision, analyze, analyze_collection};
pub use config::{AtrSmoothing, ZoneConfig};
pub use data::{BarSeries, load_bars, load_series};
pub use domain::{Atr, Bar, LabeledSwing, SwingKind, SwingLabel, SwingPoint};
pub use engine::{UpdateReport, ZoneEngine};
pub use error::{ZoneError, ZoneResult};
pub use models::{BosRecord, ZigZagPoint, Zone, ZoneKind, ZoneState};

// CLI argument parsing
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Read zone settings from a JSON file. Missing fields keep their defaults.
pub fn read_zone_config(path: &Path) -> anyhow::Result<ZoneConfig> {
    let text = std::fs::read_to_string(path)
        .context(format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str::<ZoneConfig>(&text)
        .context(format!("Failed to parse config file: {}", path.display()))
}

/// As [`read_zone_config`], rejecting settings the engine cannot run with.
pub fn load_zone_config(path: &Path) -> anyhow::Result<ZoneConfig> {
    let config = read_zone_config(path)?;
    config
        .validate()
        .context(format!("Invalid settings in config file: {}", path.display()))?;
    Ok(config)
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Bar files to analyse (.json native or Binance klines, .bin cache)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// JSON file with zone settings; missing fields keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub swing_length: Option<usize>,

    #[arg(long)]
    pub atr_period: Option<usize>,

    #[arg(long)]
    pub history_to_keep: Option<usize>,

    #[arg(long)]
    pub box_width: Option<f64>,

    #[arg(long)]
    pub bos_history: Option<usize>,

    #[arg(long, value_enum)]
    pub atr_smoothing: Option<AtrSmoothing>,

    /// Log a per-series summary instead of printing JSON
    #[arg(long, default_value_t = false)]
    pub summary: bool,
}

impl Cli {
    /// Defaults, then the config file, then command-line overrides.
    pub fn zone_config(&self) -> anyhow::Result<ZoneConfig> {
        // The file alone may be invalid until overrides are applied
        let mut config = match &self.config {
            Some(path) => read_zone_config(path)?,
            None => ZoneConfig::default(),
        };

        if let Some(v) = self.swing_length {
            config.swing_length = v;
        }
        if let Some(v) = self.atr_period {
            config.atr_period = v;
        }
        if let Some(v) = self.history_to_keep {
            config.history_to_keep = v;
        }
        if let Some(v) = self.box_width {
            config.box_width = v;
        }
        if let Some(v) = self.bos_history {
            config.bos_history = v;
        }
        if let Some(v) = self.atr_smoothing {
            config.atr_smoothing = v;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_beat_config_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("zones.json");
        std::fs::write(&path, r#"{ "swing_length": 5, "box_width": 4.0 }"#).expect("write config");

        let cli = Cli::parse_from([
            "sd-zones",
            "--config",
            path.to_str().expect("utf8 path"),
            "--box-width",
            "1.5",
            "--atr-smoothing",
            "simple",
            "bars.json",
        ]);
        let config = cli.zone_config().expect("valid config");
        assert_eq!(config.swing_length, 5);
        assert_eq!(config.box_width, 1.5);
        assert_eq!(config.atr_period, ZoneConfig::default().atr_period);
        assert_eq!(config.atr_smoothing, AtrSmoothing::Simple);
    }

    #[test]
    fn invalid_override_is_reported() {
        let cli = Cli::parse_from(["sd-zones", "--history-to-keep", "0", "bars.json"]);
        assert!(cli.zone_config().is_err());
    }

    #[test]
    fn config_file_errors_name_the_file() {
        let dir = tempfile::tempdir().expect("temp dir");

        let missing = dir.path().join("absent.json");
        let err = load_zone_config(&missing).expect_err("no such file");
        assert!(format!("{:#}", err).contains("absent.json"));

        let garbled = dir.path().join("garbled.json");
        std::fs::write(&garbled, "{ swing_length: ").expect("write config");
        let err = load_zone_config(&garbled).expect_err("not JSON");
        assert!(format!("{:#}", err).starts_with("Failed to parse config file"));

        let zero = dir.path().join("zero.json");
        std::fs::write(&zero, r#"{ "bos_history": 0 }"#).expect("write config");
        let err = load_zone_config(&zero).expect_err("zero history");
        let message = format!("{:#}", err);
        assert!(message.contains("zero.json"));
        assert!(message.contains("bos_history"));
    }

    #[test]
    fn valid_config_file_loads() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("zones.json");
        std::fs::write(&path, r#"{ "atr_smoothing": "simple" }"#).expect("write config");
        let config = load_zone_config(&path).expect("valid config");
        assert_eq!(config.atr_smoothing, AtrSmoothing::Simple);
        assert_eq!(config.swing_length, ZoneConfig::default().swing_length);
    }
}
