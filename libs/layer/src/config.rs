//! Layer configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The configuration of a [`Layer`](crate::Layer).
///
/// # Example
///
/// ```
/// # use layer::config::LayerConfig;
/// let config = LayerConfig::from_toml_str(
///     r#"
///     width = 8
///     height = 4
///
///     [history]
///     max_undo_depth = 32
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.history.max_undo_depth, Some(32));
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// The number of columns.
    pub width: usize,
    /// The number of rows.
    pub height: usize,
    /// Undo history settings.
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Undo history settings.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// The maximum number of undoable transactions; unbounded when absent.
    #[serde(default)]
    pub max_undo_depth: Option<usize>,
}

impl LayerConfig {
    /// A configuration for a `width` by `height` layer with unbounded history.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            history: HistoryConfig::default(),
        }
    }

    /// Parses a configuration from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
