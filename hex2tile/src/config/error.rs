//! Configuration error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading entries or validating run settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON.
    #[error("Config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The top-level JSON value is not an object keyed by hex id.
    #[error("Config JSON must be an object keyed by hex id")]
    NotAnObject,

    /// An entry value is not a JSON object.
    #[error("Entry '{id}' is not an object")]
    EntryNotAnObject { id: String },

    /// An entry lacks one of `file`, `q` or `p`.
    #[error("Entry '{id}' missing required key: {field}")]
    MissingField { id: String, field: &'static str },

    /// An entry field has the wrong type or value.
    #[error("Entry '{id}' has invalid '{field}': {reason}")]
    InvalidField {
        id: String,
        field: &'static str,
        reason: String,
    },

    /// The configuration contains no entries.
    #[error("Config contains no hex entries; at least one is required")]
    Empty,

    /// Two entries share the same id.
    #[error("Duplicate hex id '{id}'")]
    DuplicateId { id: String },

    /// A run setting is out of range.
    #[error("Invalid setting '{name}': {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_entry_and_key() {
        let err = ConfigError::MissingField {
            id: "forest".to_string(),
            field: "q",
        };
        assert_eq!(err.to_string(), "Entry 'forest' missing required key: q");
    }

    #[test]
    fn test_invalid_setting_display() {
        let err = ConfigError::InvalidSetting {
            name: "tile_size",
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid setting 'tile_size': must be greater than zero"
        );
    }
}
