//! Editor configuration.
//!
//! A [`Config`] controls how a [`PageEditor`](crate::transform::PageEditor)
//! resolves selections, names split output and reacts to failures inside a
//! batch. Every field has a default, so a configuration file only needs to
//! name what it changes.

use serde::{Deserialize, Serialize};

use crate::error::{PageKitError, Result};

/// Settings shared by every operation an editor applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sort selected indexes ascending before they are used.
    pub sort_selections: bool,

    /// Keep running a batch after an operation fails.
    pub continue_on_error: bool,

    /// Prefix for generated split document names.
    ///
    /// When unset, the source document's name is used.
    pub split_name_prefix: Option<String>,

    /// Log per-page changes at `debug` instead of `trace`.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sort_selections: true,
            continue_on_error: false,
            split_name_prefix: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON and validate it.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagekit::Config;
    ///
    /// let config = Config::from_json(r#"{"continue_on_error": true}"#).unwrap();
    /// assert!(config.continue_on_error);
    /// assert!(config.sort_selections);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `split_name_prefix` is empty or only whitespace.
    pub fn validate(&self) -> Result<()> {
        if let Some(prefix) = &self.split_name_prefix
            && prefix.trim().is_empty()
        {
            return Err(PageKitError::invalid_config(
                "split name prefix cannot be blank",
            ));
        }

        Ok(())
    }

    /// Log level for per-page diagnostics.
    pub fn page_log_level(&self) -> log::Level {
        if self.verbose {
            log::Level::Debug
        } else {
            log::Level::Trace
        }
    }
}
