//! Configuration loading and the process-wide defaults.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chronology::Chronology;
use crate::error::TemporalError;
use crate::format::NumeralStyle;
use crate::zone::ZoneOrOffset;

/// Configuration as read from files and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Chronology used when a value is built without one.
    pub default_chronology: Chronology,
    /// Zone name or `±HH:MM` offset for the implicit frame.
    pub default_zone: Option<String>,
    /// Digits used when rendering numbers.
    pub numerals: NumeralStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_chronology: Chronology::Solar,
            default_zone: None,
            numerals: NumeralStyle::Latin,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(config_path).extract()?;
        debug!(
            chronology = %config.default_chronology,
            zone = ?config.default_zone,
            numerals = %config.numerals,
            "loaded configuration"
        );
        Ok(config)
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TAQWIM_*)
        figment.merge(Env::prefixed("TAQWIM_"))
    }

    /// Resolves the configured values into settings.
    pub fn settings(&self) -> Result<Settings, TemporalError> {
        let zone = self
            .default_zone
            .as_deref()
            .map(str::trim)
            .filter(|z| !z.is_empty())
            .map(ZoneOrOffset::parse)
            .transpose()?;
        Ok(Settings {
            chronology: self.default_chronology,
            zone,
            numerals: self.numerals,
        })
    }
}

/// Returns the platform-specific config directory for taqwim.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("taqwim"))
}

/// Resolved process-wide defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub chronology: Chronology,
    pub zone: Option<ZoneOrOffset>,
    pub numerals: NumeralStyle,
}

impl Default for Settings {
    fn default() -> Self {
        DEFAULT_SETTINGS.clone()
    }
}

static DEFAULT_SETTINGS: Settings = Settings {
    chronology: Chronology::Solar,
    zone: None,
    numerals: NumeralStyle::Latin,
};

static INSTALLED: OnceLock<Settings> = OnceLock::new();

/// Installs the process-wide defaults. Only the first call succeeds; later
/// calls hand the rejected settings back.
pub fn install(settings: Settings) -> Result<(), Settings> {
    debug!(
        chronology = %settings.chronology,
        zone = ?settings.zone.as_ref().map(ZoneOrOffset::raw),
        "installing process settings"
    );
    INSTALLED.set(settings)
}

/// The installed defaults, or the built-in ones when nothing was installed.
pub fn settings() -> &'static Settings {
    INSTALLED.get().unwrap_or(&DEFAULT_SETTINGS)
}
