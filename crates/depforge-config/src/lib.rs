//! Configuration system for depforge.
//!
//! Load parser configuration from TOML or YAML to control the candidate
//! window, the classifier null marker and batch threading without code
//! changes. Every load path validates, so an out-of-range `max_span` is
//! rejected at setup time rather than per sentence.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use depforge_config::{ParserConfig, RelationSlot, ThreadCount};
//!
//! let config = ParserConfig::from_toml_str(r#"
//!     max_span = 12
//!     relation_slot = "dependent"
//!
//!     [thread_count]
//!     count = 4
//! "#).unwrap();
//!
//! assert_eq!(config.max_span, 12);
//! assert_eq!(config.relation_slot, RelationSlot::Dependent);
//! assert_eq!(config.thread_count, ThreadCount::Count(4));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use depforge_config::ParserConfig;
//!
//! let config = ParserConfig::load("parser.toml").unwrap_or_default();
//! assert_eq!(config.max_span, 20);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Default distance window for candidate (dependent, head) pairs.
pub const DEFAULT_MAX_SPAN: usize = 20;

/// Largest accepted `max_span`.
pub const MAX_SPAN_CEILING: usize = 50;

/// Default classifier label meaning "no answer".
pub const DEFAULT_NULL_LABEL: &str = "__";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("max_span {max_span} exceeds the ceiling of {ceiling}")]
    MaxSpanTooLarge { max_span: usize, ceiling: usize },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ParserConfig {
    /// Largest `|head - dependent|` distance for which a pair instance is
    /// classified.
    pub max_span: usize,

    /// Predicted label meaning "no answer".
    pub null_label: String,

    /// Token whose incoming-relation facts back a non-root edge.
    pub relation_slot: RelationSlot,

    /// Number of threads for batch parsing.
    pub thread_count: ThreadCount,

    /// Whether the three classifiers of a sentence run concurrently.
    pub parallel_classifiers: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_span: DEFAULT_MAX_SPAN,
            null_label: DEFAULT_NULL_LABEL.to_string(),
            relation_slot: RelationSlot::default(),
            thread_count: ThreadCount::default(),
            parallel_classifiers: true,
        }
    }
}

impl ParserConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use depforge_config::{ConfigError, ParserConfig};
    ///
    /// let mut config = ParserConfig::default();
    /// config.max_span = 51;
    /// assert!(matches!(
    ///     config.validate(),
    ///     Err(ConfigError::MaxSpanTooLarge { max_span: 51, ceiling: 50 })
    /// ));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_span > MAX_SPAN_CEILING {
            return Err(ConfigError::MaxSpanTooLarge {
                max_span: self.max_span,
                ceiling: MAX_SPAN_CEILING,
            });
        }
        if self.null_label.is_empty() {
            return Err(ConfigError::Invalid(
                "null_label must not be empty".to_string(),
            ));
        }
        if self.thread_count == ThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "thread_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the candidate window.
    pub fn with_max_span(mut self, max_span: usize) -> Result<Self, ConfigError> {
        self.max_span = max_span;
        self.validate()?;
        Ok(self)
    }

    /// Sets the null marker.
    pub fn with_null_label(mut self, null_label: impl Into<String>) -> Self {
        self.null_label = null_label.into();
        self
    }

    /// Sets the relation slot.
    pub fn with_relation_slot(mut self, relation_slot: RelationSlot) -> Self {
        self.relation_slot = relation_slot;
        self
    }

    /// Sets the batch thread count.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.thread_count = thread_count;
        self
    }

    /// Enables or disables concurrent classifier calls.
    pub fn with_parallel_classifiers(mut self, parallel: bool) -> Self {
        self.parallel_classifiers = parallel;
        self
    }
}

/// Token whose incoming-relation facts are consulted for a non-root edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationSlot {
    /// Look up the head token's facts.
    #[default]
    Head,

    /// Look up the dependent token's facts.
    Dependent,
}

/// Batch thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Use the global rayon pool.
    #[default]
    Auto,

    /// Parse sentences one after another on the calling thread.
    None,

    /// Use a dedicated pool with this many threads.
    Count(usize),
}
