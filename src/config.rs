//! Service configuration, read from the environment once at startup.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `WEBHOOK_SECRET` | required, non-empty |
//! | `CARBON_THRESHOLD_YELLOW` | 0.5 (kWh) |
//! | `CARBON_THRESHOLD_RED` | 1.0 (kWh) |
//! | `GITHUB_TOKEN` | unset: GitHub calls are skipped |
//! | `GITHUB_API_URL` | `https://api.github.com` |
//! | `PORT` | 3000 |
//!
//! There is no fallback webhook secret. A missing secret is a startup error.

use std::fmt;
use thiserror::Error;

use crate::carbon::EnergyThresholds;

pub const ENV_WEBHOOK_SECRET: &str = "WEBHOOK_SECRET";
pub const ENV_THRESHOLD_YELLOW: &str = "CARBON_THRESHOLD_YELLOW";
pub const ENV_THRESHOLD_RED: &str = "CARBON_THRESHOLD_RED";
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_GITHUB_API_URL: &str = "GITHUB_API_URL";
pub const ENV_PORT: &str = "PORT";

/// Default listen port.
const DEFAULT_PORT: u16 = 3000;

/// Errors detected while loading configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} must be set to a non-empty value")]
    Missing(&'static str),

    /// A variable could not be parsed.
    #[error("{name} has invalid value {value:?}: expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The yellow threshold is above the red threshold.
    #[error("{ENV_THRESHOLD_YELLOW} ({yellow}) must not exceed {ENV_THRESHOLD_RED} ({red})")]
    ThresholdOrder { yellow: f64, red: f64 },
}

/// Validated service configuration.
#[derive(Clone)]
pub struct Config {
    /// HMAC key for `X-Hub-Signature-256` verification.
    pub webhook_secret: Vec<u8>,

    /// Energy thresholds for scoring pushes.
    pub thresholds: EnergyThresholds,

    /// Token for posting issues, comments and labels.
    pub github_token: Option<String>,

    /// REST API base URL, for GitHub Enterprise Server.
    pub github_api_url: Option<String>,

    pub port: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("webhook_secret", &"<redacted>")
            .field("thresholds", &self.thresholds)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("github_api_url", &self.github_api_url)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let webhook_secret = get(ENV_WEBHOOK_SECRET)
            .ok_or(ConfigError::Missing(ENV_WEBHOOK_SECRET))?
            .into_bytes();

        let yellow = parse_threshold(
            ENV_THRESHOLD_YELLOW,
            get(ENV_THRESHOLD_YELLOW),
            EnergyThresholds::DEFAULT_YELLOW_KWH,
        )?;
        let red = parse_threshold(
            ENV_THRESHOLD_RED,
            get(ENV_THRESHOLD_RED),
            EnergyThresholds::DEFAULT_RED_KWH,
        )?;
        if yellow > red {
            return Err(ConfigError::ThresholdOrder { yellow, red });
        }

        let port = match get(ENV_PORT) {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: ENV_PORT,
                value,
                expected: "a TCP port number",
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            webhook_secret,
            thresholds: EnergyThresholds::new(yellow, red),
            github_token: get(ENV_GITHUB_TOKEN),
            github_api_url: get(ENV_GITHUB_API_URL),
            port,
        })
    }
}

fn parse_threshold(
    name: &'static str,
    value: Option<String>,
    default: f64,
) -> Result<f64, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().parse::<f64>() {
        Ok(kwh) if kwh.is_finite() && kwh >= 0.0 => Ok(kwh),
        _ => Err(ConfigError::Invalid {
            name,
            value,
            expected: "a non-negative number of kWh",
        }),
    }
}
