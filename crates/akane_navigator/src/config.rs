//! Configuration for navigators and the preview cache.
//!
//! Configuration is TOML loaded through the `config` crate:
//! - Bundled defaults (include_str! from akane.toml)
//! - User overrides (~/.config/akane/akane.toml, then ./akane.toml)
//! - An explicit file passed on the command line, if any
//!
//! Later sources override earlier ones field by field.

use akane_cache::PreviewCacheConfig;
use akane_error::{AkaneError, AkaneResult, ConfigError, ConfigErrorKind};
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// How a navigator's deadline reacts to activity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimeoutPolicy {
    /// Deadline fixed at first render
    #[default]
    Absolute,
    /// Every accepted activation pushes the deadline out again
    Sliding,
}

/// Per-navigator behaviour.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct NavigatorConfig {
    /// Seconds until controls are stripped; 0 disables the timeout
    #[serde(default = "default_timeout_secs")]
    #[builder(default = "default_timeout_secs()")]
    timeout_secs: u64,

    /// Absolute or sliding deadline
    #[serde(default)]
    #[builder(default)]
    timeout_policy: TimeoutPolicy,

    /// Append `Page i/n` to embed footers of multi-page stores
    #[serde(default = "default_show_page_counter")]
    #[builder(default = "default_show_page_counter()")]
    show_page_counter: bool,

    /// Private notice shown to non-owners who press a control
    #[serde(default = "default_unauthorized_notice")]
    #[builder(default = "default_unauthorized_notice()")]
    unauthorized_notice: String,

    /// Notice shown when a preview cannot be fetched
    #[serde(default = "default_preview_failed_notice")]
    #[builder(default = "default_preview_failed_notice()")]
    preview_failed_notice: String,
}

fn default_timeout_secs() -> u64 {
    180
}

fn default_show_page_counter() -> bool {
    true
}

fn default_unauthorized_notice() -> String {
    "Only the person who ran this command can use these buttons.".to_string()
}

fn default_preview_failed_notice() -> String {
    "The preview could not be found or an unknown error occurred.".to_string()
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            timeout_policy: TimeoutPolicy::default(),
            show_page_counter: default_show_page_counter(),
            unauthorized_notice: default_unauthorized_notice(),
            preview_failed_notice: default_preview_failed_notice(),
        }
    }
}

impl NavigatorConfig {
    /// The timeout as a duration, or `None` if disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Top-level Akane configuration.
///
/// # Example
///
/// ```no_run
/// use akane_navigator::AkaneConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = AkaneConfig::load()?;
/// println!("Navigator timeout: {}s", config.navigator.timeout_secs());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AkaneConfig {
    /// Navigator behaviour
    #[serde(default)]
    pub navigator: NavigatorConfig,

    /// Preview cache sizing
    #[serde(default)]
    pub cache: PreviewCacheConfig,
}

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../akane.toml");

impl AkaneConfig {
    /// Load configuration from a specific file path.
    ///
    /// Fields missing from the file take their built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> AkaneResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                AkaneError::from(ConfigError::new(ConfigErrorKind::Read(format!(
                    "{}: {}",
                    path.as_ref().display(),
                    e
                ))))
            })?
            .try_deserialize()
            .map_err(|e| AkaneError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string()))))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> AkaneResult<Self> {
        Self::load_with(None)
    }

    /// Like [`AkaneConfig::load`], with an extra required file on top.
    #[instrument(skip(extra), fields(extra = ?extra.map(Path::display)))]
    pub fn load_with(extra: Option<&Path>) -> AkaneResult<Self> {
        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/akane/akane.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("akane").required(false));

        if let Some(path) = extra {
            builder = builder.add_source(File::from(path));
        }

        let config: Self = builder
            .build()
            .map_err(|e| AkaneError::from(ConfigError::new(ConfigErrorKind::Read(e.to_string()))))?
            .try_deserialize()
            .map_err(|e| AkaneError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string()))))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot work.
    ///
    /// The bot registers every navigator it starts and only the timeout
    /// retires navigators nobody kills, so a disabled timeout is rejected here
    /// even though [`NavigatorConfig`] on its own allows it.
    pub fn validate(&self) -> AkaneResult<()> {
        if self.navigator.timeout_secs == 0 {
            return Err(ConfigError::invalid("navigator.timeout_secs", "must be at least 1").into());
        }
        if self.navigator.unauthorized_notice.trim().is_empty() {
            return Err(
                ConfigError::invalid("navigator.unauthorized_notice", "must not be empty").into(),
            );
        }
        if self.navigator.preview_failed_notice.trim().is_empty() {
            return Err(
                ConfigError::invalid("navigator.preview_failed_notice", "must not be empty").into(),
            );
        }
        if *self.cache.max_size() == 0 {
            return Err(ConfigError::invalid("cache.max_size", "must be at least 1").into());
        }
        Ok(())
    }
}
