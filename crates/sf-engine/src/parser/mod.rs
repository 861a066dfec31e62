//! Config Parser - JSON game configuration into [`GameConfig`]
//!
//! Parsing happens in two steps. The document is first deserialized into a
//! loose raw form where every field is optional, then [`validator`] checks
//! every field, collects all violations and only builds the typed
//! configuration when there are none.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = ConfigParser::new().load("config/config.json")?;
//! ```

mod validator;

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::config::GameConfig;
use crate::error::{ConfigError, ConfigResult};

/// Config parser
pub struct ConfigParser {
    /// Validation limits
    pub limits: ConfigLimits,
}

/// Optional grid size caps applied during validation. Unbounded by default.
#[derive(Debug, Clone, Default)]
pub struct ConfigLimits {
    pub max_rows: Option<usize>,
    pub max_columns: Option<usize>,
}

impl ConfigParser {
    /// Create a parser without grid size caps
    pub fn new() -> Self {
        Self {
            limits: ConfigLimits::default(),
        }
    }

    /// Create parser with custom limits
    pub fn with_limits(limits: ConfigLimits) -> Self {
        Self { limits }
    }

    /// Read and parse a configuration file
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<GameConfig> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = self.parse_json(&json)?;
        log::info!(
            "Loaded config {}: {}x{} grid, {} symbols, {} win combinations",
            path.display(),
            config.rows,
            config.columns,
            config.symbols.len(),
            config.win_combinations.len()
        );
        Ok(config)
    }

    /// Parse and validate a JSON configuration document
    pub fn parse_json(&self, json: &str) -> ConfigResult<GameConfig> {
        let doc: RawDocument = serde_json::from_str(json)?;
        validator::validate(&doc, &self.limits).map_err(ConfigError::Invalid)
    }
}

impl Default for ConfigParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration document as written, before validation.
///
/// Scalars stay as raw JSON values so a wrong type becomes one more
/// violation instead of aborting deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    pub rows: Option<Value>,
    pub columns: Option<Value>,
    pub symbols: Option<IndexMap<String, RawSymbol>>,
    pub probabilities: Option<RawProbabilities>,
    pub win_combinations: Option<IndexMap<String, RawCombination>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSymbol {
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub reward_multiplier: Option<Value>,
    pub impact: Option<Value>,
    pub extra: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProbabilities {
    pub standard_symbols: Option<Vec<RawProbabilityCell>>,
    pub bonus_symbols: Option<RawBonusProbabilities>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProbabilityCell {
    pub row: Option<Value>,
    pub column: Option<Value>,
    pub symbols: Option<IndexMap<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBonusProbabilities {
    pub symbols: Option<IndexMap<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCombination {
    pub reward_multiplier: Option<Value>,
    pub when: Option<Value>,
    pub count: Option<Value>,
    pub covered_areas: Option<Vec<Vec<Value>>>,
}
