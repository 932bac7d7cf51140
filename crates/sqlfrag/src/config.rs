//! Renderer configuration.
//!
//! Defaults suit most callers; a config can also be loaded from TOML:
//!
//! ```toml
//! log_sql = true
//! log_level = "trace"
//! max_sql_length = 500
//! max_params = 1000
//! ```

use crate::error::FragResult;
use serde::Deserialize;

/// Bind messages carry the parameter count as a 16-bit integer.
pub const MAX_BIND_PARAMS: usize = 65535;

/// Level at which rendered statements are logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

#[cfg(feature = "tracing")]
impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

/// Configuration for [`Renderer`](crate::sql::Renderer).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Emit a `tracing` event per rendered statement.
    pub log_sql: bool,
    pub log_level: LogLevel,
    /// Truncate logged SQL (in chars). `None` logs the full text.
    pub max_sql_length: Option<usize>,
    /// Upper bound on bound values accepted by
    /// [`Renderer::validate`](crate::sql::Renderer::validate).
    pub max_params: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            log_sql: true,
            log_level: LogLevel::Debug,
            max_sql_length: Some(200),
            max_params: MAX_BIND_PARAMS,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> FragResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub fn disable_logging(mut self) -> Self {
        self.log_sql = false;
        self
    }

    pub fn with_max_params(mut self, max: usize) -> Self {
        self.max_params = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RenderConfig::default();
        assert!(config.log_sql);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.max_sql_length, Some(200));
        assert_eq!(config.max_params, MAX_BIND_PARAMS);
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let toml = "log_level = \"trace\"\nmax_params = 10\n";
        let config = RenderConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.max_params, 10);
        assert!(config.log_sql);
        assert_eq!(config.max_sql_length, Some(200));
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(RenderConfig::from_toml_str("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn toml_rejects_unknown_keys_and_levels() {
        let err = RenderConfig::from_toml_str("placeholder = \"?\"").unwrap_err();
        assert!(matches!(err, crate::FragError::Config(_)));
        assert!(RenderConfig::from_toml_str("log_level = \"loud\"").is_err());
    }

    #[test]
    fn builder_methods() {
        let config = RenderConfig::new()
            .with_log_level(LogLevel::Info)
            .no_truncate()
            .disable_logging()
            .with_max_params(3);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.max_sql_length, None);
        assert!(!config.log_sql);
        assert_eq!(config.max_params, 3);
    }
}
