use serde::{Deserialize, Serialize};

/// Prefix of environment variables overriding the config file, e.g.
/// `LENDING__LOG_LEVEL=debug`.
pub const ENV_PREFIX: &str = "LENDING";

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            display: DisplayConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Digits printed after the decimal point of a percentage.
    pub decimal_places: u32,
    /// Print reports as JSON instead of text.
    pub json: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimal_places: 4,
            json: false,
        }
    }
}

// ----------------------------------- tests -----------------------------------
