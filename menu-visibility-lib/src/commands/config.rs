use crate::Result;
use crate::menus::{VISIBILITY_SLUGS, is_known_visibility};
use crate::resolvers::DEFAULT_GEOLOCATION_URL;
use crate::visibility::FeatureFlags;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when none is given explicitly
pub const CONFIG_FILE_NAME: &str = "visibility.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Record why each hidden item was hidden
    #[serde(default)]
    pub debug_mode: bool,

    /// Master switch for the optional rule categories in `features`
    #[serde(default)]
    pub advanced_features: bool,

    /// Visibility slug applied to items without one
    #[serde(default)]
    pub default_visibility: String,

    #[serde(default)]
    pub features: Features,

    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

/// Optional rule categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Features {
    #[serde(default)]
    pub location: bool,

    #[serde(default)]
    pub language: bool,

    #[serde(default)]
    pub commerce: bool,
}

/// Settings for the IP geolocation service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeolocationConfig {
    /// API key; an empty key means geolocation is not configured
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Time allowed for a single lookup
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

fn default_base_url() -> String {
    DEFAULT_GEOLOCATION_URL.to_string()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(5)
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl GeolocationConfig {
    /// The API key, if one is set.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        if key.is_empty() { None } else { Some(key) }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `visibility.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the default visibility is not a known rule, or the
    /// geolocation settings are unusable
    pub fn validate(&self) -> Result<()> {
        if !is_known_visibility(&self.default_visibility) {
            return Err(app_err!(
                "default_visibility '{}' is not a known visibility rule, expected one of: {}",
                self.default_visibility,
                VISIBILITY_SLUGS.join(", ")
            ));
        }

        let base_url = self.geolocation.base_url.trim();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(app_err!("geolocation.base_url must be an http or https URL, got '{base_url}'"));
        }

        if self.geolocation.timeout.is_zero() {
            return Err(app_err!("geolocation.timeout must be greater than zero"));
        }

        Ok(())
    }

    /// The feature flags in effect for one evaluation pass.
    #[must_use]
    pub fn feature_flags(&self) -> FeatureFlags {
        FeatureFlags {
            debug_logging: self.debug_mode,
            location_enabled: self.advanced_features && self.features.location,
            language_enabled: self.advanced_features && self.features.language,
            commerce_enabled: self.advanced_features && self.features.commerce,
            geolocation_configured: self.geolocation.api_key().is_some(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
