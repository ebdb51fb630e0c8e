//! Startup configuration from environment variables
//!
//! - `PORT`: listen port (default 3000)
//! - `PALETTE_PATH`: optional JSON palette replacing the built-in one
//! - `MATCH_METRIC`: `euclidean` (default) or `oklab`

use std::path::PathBuf;
use thiserror::Error;

use crate::metric::Metric;
use crate::palette::{Palette, PaletteError};

const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),

    #[error("invalid MATCH_METRIC: {0}")]
    InvalidMetric(String),

    #[error("failed to read palette file {path}: {source}")]
    PaletteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub palette_path: Option<PathBuf>,
    pub metric: Metric,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            palette_path: None,
            metric: Metric::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(p.clone()))?,
            None => DEFAULT_PORT,
        };

        let metric = match get("MATCH_METRIC") {
            Some(m) => m.parse().map_err(ConfigError::InvalidMetric)?,
            None => Metric::default(),
        };

        Ok(Self {
            port,
            palette_path: get("PALETTE_PATH").map(PathBuf::from),
            metric,
        })
    }

    /// Load the configured palette, falling back to the built-in one
    pub fn load_palette(&self) -> Result<Palette, ConfigError> {
        match &self.palette_path {
            Some(path) => {
                let json =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::PaletteFile {
                        path: path.clone(),
                        source,
                    })?;
                Ok(Palette::from_json(&json)?)
            }
            None => Ok(Palette::builtin()?),
        }
    }

    /// Human-readable palette origin for logs
    pub fn palette_source(&self) -> String {
        match &self.palette_path {
            Some(path) => path.display().to_string(),
            None => "built-in".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.metric, Metric::Euclidean);
        assert_eq!(config.palette_source(), "built-in");
    }

    #[test]
    fn reads_all_variables() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("MATCH_METRIC", "oklab"),
            ("PALETTE_PATH", "/etc/brand/palette.json"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.metric, Metric::Oklab);
        assert_eq!(
            config.palette_path,
            Some(PathBuf::from("/etc/brand/palette.json"))
        );
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", ""), ("PALETTE_PATH", "  ")]).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidPort(p)) if p == "eighty"
        ));
        assert!(matches!(
            config_from(&[("PORT", "70000")]),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            config_from(&[("MATCH_METRIC", "ciede2000")]),
            Err(ConfigError::InvalidMetric(_))
        ));
    }

    #[test]
    fn builtin_palette_without_path() {
        let palette = Config::default().load_palette().unwrap();
        assert!(!palette.is_empty());
    }

    #[test]
    fn palette_file_is_loaded() {
        let path = std::env::temp_dir().join(format!(
            "brand-color-match-palette-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r##"{ "only": { "lime": "#84cc16" } }"##).unwrap();

        let config = Config {
            palette_path: Some(path.clone()),
            ..Config::default()
        };
        let palette = config.load_palette();
        std::fs::remove_file(&path).unwrap();

        let palette = palette.unwrap();
        assert_eq!(palette.len(), 1);
        assert!(palette.get("lime").is_some());
    }

    #[test]
    fn missing_palette_file_is_reported() {
        let config = Config {
            palette_path: Some(PathBuf::from("/nonexistent/brand/palette.json")),
            ..Config::default()
        };
        assert!(matches!(
            config.load_palette(),
            Err(ConfigError::PaletteFile { .. })
        ));
    }
}
