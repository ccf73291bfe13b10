//! Process-wide numeric settings.
//!
//! Sources, later ones winning: built-in defaults, a TOML file, then
//! `NUMERIS_*` environment variables.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ctx::{PrecisionContext, RoundingMode};

/// What `sqrt` does with a negative non-Complex value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NegativeSqrtPolicy {
    /// Return the Complex root.
    #[default]
    Promote,
    /// Fail with a domain error.
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct NumericConfig {
    /// Digits of the context used when an inexact result is needed under the
    /// unlimited context.
    pub default_digits: u32,
    pub default_rounding: RoundingMode,
    pub max_constant_digits: u32,
    pub negative_sqrt: NegativeSqrtPolicy,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            default_digits: 34,
            default_rounding: RoundingMode::HalfEven,
            max_constant_digits: 20_000,
            negative_sqrt: NegativeSqrtPolicy::Promote,
        }
    }
}

pub const ENV_DEFAULT_DIGITS: &str = "NUMERIS_DEFAULT_DIGITS";
pub const ENV_DEFAULT_ROUNDING: &str = "NUMERIS_DEFAULT_ROUNDING";
pub const ENV_MAX_CONSTANT_DIGITS: &str = "NUMERIS_MAX_CONSTANT_DIGITS";
pub const ENV_NEGATIVE_SQRT: &str = "NUMERIS_NEGATIVE_SQRT";

fn parse_digits(key: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .with_context(|| format!("{key} must be a non-negative integer, got {value:?}"))
}

impl NumericConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: NumericConfig = toml::from_str(text).context("parse numeric configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("load config file {}", path.display()))
    }

    /// Applies overrides found through `lookup`, which maps a variable name to
    /// its value.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DEFAULT_DIGITS) {
            self.default_digits = parse_digits(ENV_DEFAULT_DIGITS, &value)?;
        }
        if let Some(value) = lookup(ENV_DEFAULT_ROUNDING) {
            self.default_rounding = value
                .parse()
                .map_err(|err| anyhow!("{ENV_DEFAULT_ROUNDING}: {err}"))?;
        }
        if let Some(value) = lookup(ENV_MAX_CONSTANT_DIGITS) {
            self.max_constant_digits = parse_digits(ENV_MAX_CONSTANT_DIGITS, &value)?;
        }
        if let Some(value) = lookup(ENV_NEGATIVE_SQRT) {
            self.negative_sqrt = match value.trim().to_ascii_lowercase().as_str() {
                "promote" => NegativeSqrtPolicy::Promote,
                "reject" => NegativeSqrtPolicy::Reject,
                other => bail!("{ENV_NEGATIVE_SQRT} must be promote or reject, got {other:?}"),
            };
        }
        self.validate()?;
        Ok(self)
    }

    pub fn with_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_digits == 0 {
            bail!("default-digits must be at least 1");
        }
        if self.default_rounding == RoundingMode::Unnecessary {
            bail!("default-rounding cannot be unnecessary");
        }
        Ok(())
    }

    /// Context for inexact results computed under the unlimited context.
    pub fn default_context(&self) -> PrecisionContext {
        PrecisionContext::new(self.default_digits.max(1), self.default_rounding)
    }
}

static CONFIG: OnceCell<NumericConfig> = OnceCell::new();

/// Installs the process-wide configuration. Fails once a configuration is in
/// place, including the fallback picked up by an earlier [`current`].
pub fn install(config: NumericConfig) -> Result<()> {
    config.validate()?;
    let summary = format!("{} digits, {}", config.default_digits, config.default_rounding);
    CONFIG
        .set(config)
        .map_err(|_| anyhow!("numeric configuration is already installed"))?;
    info!(target: "numeris::config", settings = %summary, "configuration installed");
    Ok(())
}

/// The installed configuration, or defaults plus environment overrides.
pub fn current() -> &'static NumericConfig {
    CONFIG.get_or_init(|| {
        NumericConfig::default().with_env_overrides().unwrap_or_else(|err| {
            warn!(target: "numeris::config", error = %err, "ignoring invalid environment overrides");
            NumericConfig::default()
        })
    })
}
