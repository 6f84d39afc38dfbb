//! Session configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default `<attachments-root>` for project uploads
pub const DEFAULT_ATTACHMENTS_ROOT: &str = "PROJECT_ATTACHMENTS";

/// Scope configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Root folder under which each project's attachments are stored
    pub attachments_root: String,
    /// Reject attachment mutations when the viewer has no member role
    pub enforce_attachment_permissions: bool,
    /// Skip renders whose inputs are unchanged by value
    pub suppress_redundant_renders: bool,
    /// Logging setup
    pub logging: LoggingConfig,
}

impl ScopeConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML, filling absent keys with defaults
    ///
    /// # Errors
    /// - `ConfigError::Parse` on malformed TOML
    /// - `ConfigError::Invalid` if the parsed values fail [`Self::validate`]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values are usable
    ///
    /// # Errors
    /// `ConfigError::Invalid` naming the offending key
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attachments_root.trim_matches('/').is_empty() {
            return Err(ConfigError::Invalid(
                "attachments_root must not be empty".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// With attachments root
    #[inline]
    #[must_use]
    pub fn with_attachments_root(mut self, root: impl Into<String>) -> Self {
        self.attachments_root = root.into();
        self
    }

    /// With attachment permission guard
    #[inline]
    #[must_use]
    pub fn with_attachment_guard(mut self, enforce: bool) -> Self {
        self.enforce_attachment_permissions = enforce;
        self
    }

    /// With render suppression
    #[inline]
    #[must_use]
    pub fn with_render_suppression(mut self, suppress: bool) -> Self {
        self.suppress_redundant_renders = suppress;
        self
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            attachments_root: DEFAULT_ATTACHMENTS_ROOT.to_string(),
            enforce_attachment_permissions: true,
            suppress_redundant_renders: true,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
