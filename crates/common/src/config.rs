use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::models::{Instrument, Timeframe};

pub const DEFAULT_INSTRUMENTS: &[&str; 6] = &[
    "EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF", "AUD/USD", "USD/CAD",
];
pub const DEFAULT_TIMEFRAMES: &[&str; 3] = &["5min", "15min", "1h"];

const DEFAULT_BASE_URL: &str = "https://api.twelvedata.com";
const DEFAULT_MODEL_PATH: &str = "models/forex_classifier.onnx";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("{0} must name at least one entry")]
    EmptyList(&'static str),
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub instruments: Vec<Instrument>,
    pub timeframes: Vec<Timeframe>,
    pub fetch_delay: Duration,
    pub model_path: String,
    /// Used only when the model artifact leaves its input width symbolic.
    pub model_input_width: usize,
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("TWELVEDATA_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("TWELVEDATA_API_KEY"))?;

        let provider = ProviderSettings {
            api_key,
            base_url: lookup("TWELVEDATA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout: Duration::from_secs(parse_or(&lookup, "FETCH_TIMEOUT_SECS", 10)?),
        };

        let instruments = parse_list(&lookup, "SIGNAL_INSTRUMENTS", DEFAULT_INSTRUMENTS)?
            .into_iter()
            .map(Instrument::new)
            .collect();
        let timeframes = parse_list(&lookup, "SIGNAL_TIMEFRAMES", DEFAULT_TIMEFRAMES)?
            .into_iter()
            .map(Timeframe::new)
            .collect();

        Ok(Self {
            provider,
            instruments,
            timeframes,
            fetch_delay: Duration::from_millis(parse_or(&lookup, "FETCH_DELAY_MS", 1000)?),
            model_path: lookup("MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string()),
            model_input_width: parse_or(&lookup, "MODEL_INPUT_WIDTH", 3)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 5000)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

/// Comma separated, order preserving. Duplicates keep their first position.
fn parse_list<F>(
    lookup: &F,
    key: &'static str,
    default: &[&str],
) -> Result<Vec<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match lookup(key) {
        Some(raw) => raw,
        None => return Ok(default.iter().map(|s| s.to_string()).collect()),
    };

    let mut entries: Vec<String> = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        if !entries.iter().any(|e| e == entry) {
            entries.push(entry.to_string());
        }
    }

    if entries.is_empty() {
        return Err(ConfigError::EmptyList(key));
    }
    Ok(entries)
}
