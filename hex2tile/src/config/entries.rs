//! Hex entry loading.
//!
//! The entry configuration is a JSON object keyed by hex id:
//!
//! ```json
//! {
//!   "forest": { "name": "Old Forest", "file": "sprites/forest.png", "q": 0, "p": 1 },
//!   "lake":   { "file": "sprites/lake.png", "q": 1, "p": 0 }
//! }
//! ```
//!
//! Key order is preserved: it is the draw order of the sprites.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::ConfigError;
use crate::coord::AxialCoord;

/// One placed sprite on the hex map.
#[derive(Debug, Clone, PartialEq)]
pub struct HexEntry {
    /// Unique key from the configuration.
    pub id: String,
    /// Label used in logs. Defaults to the id.
    pub name: String,
    /// Sprite image path.
    pub file: PathBuf,
    pub q: f64,
    pub p: f64,
}

impl HexEntry {
    /// Create an entry whose name is its id.
    pub fn new(id: impl Into<String>, file: impl Into<PathBuf>, q: f64, p: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            file: file.into(),
            q,
            p,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Axial coordinates of this entry's cell.
    pub fn coord(&self) -> AxialCoord {
        AxialCoord::new(self.q, self.p)
    }
}

/// Ordered, non-empty collection of hex entries with unique ids.
///
/// Later entries draw on top of earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySet {
    entries: Vec<HexEntry>,
}

impl EntrySet {
    /// Create an entry set, rejecting empty input and duplicate ids.
    pub fn new(entries: Vec<HexEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::DuplicateId {
                    id: entry.id.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Load entries from a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse entries from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    /// Build entries from an already-parsed JSON value.
    pub fn from_json_value(value: &Value) -> Result<Self, ConfigError> {
        let object = value.as_object().ok_or(ConfigError::NotAnObject)?;

        let entries = object
            .iter()
            .map(|(id, entry)| parse_entry(id, entry))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(entries)
    }

    /// Resolve relative sprite paths against `base_dir`.
    ///
    /// Absolute paths are left untouched.
    pub fn with_base_dir(mut self, base_dir: &Path) -> Self {
        for entry in &mut self.entries {
            if entry.file.is_relative() {
                entry.file = base_dir.join(&entry.file);
            }
        }
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HexEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed set; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Axial coordinates of every entry, in draw order.
    pub fn cells(&self) -> impl Iterator<Item = AxialCoord> + '_ {
        self.entries.iter().map(HexEntry::coord)
    }
}

impl<'a> IntoIterator for &'a EntrySet {
    type Item = &'a HexEntry;
    type IntoIter = std::slice::Iter<'a, HexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn parse_entry(id: &str, value: &Value) -> Result<HexEntry, ConfigError> {
    let object = value
        .as_object()
        .ok_or_else(|| ConfigError::EntryNotAnObject { id: id.to_string() })?;

    for field in ["file", "q", "p"] {
        if !object.contains_key(field) {
            return Err(ConfigError::MissingField {
                id: id.to_string(),
                field,
            });
        }
    }

    let file = string_field(id, object, "file")?;
    let q = number_field(id, object, "q")?;
    let p = number_field(id, object, "p")?;
    let name = match object.get("name") {
        None | Some(Value::Null) => id.to_string(),
        Some(Value::String(name)) => name.clone(),
        Some(_) => return Err(invalid(id, "name", "expected a string")),
    };

    Ok(HexEntry {
        id: id.to_string(),
        name,
        file: PathBuf::from(file),
        q,
        p,
    })
}

fn string_field(
    id: &str,
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ConfigError> {
    match object.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(invalid(id, field, "must not be empty")),
        _ => Err(invalid(id, field, "expected a string")),
    }
}

fn number_field(
    id: &str,
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<f64, ConfigError> {
    match object.get(field).and_then(Value::as_f64) {
        Some(n) if n.is_finite() => Ok(n),
        Some(_) => Err(invalid(id, field, "must be finite")),
        None => Err(invalid(id, field, "expected a number")),
    }
}

fn invalid(id: &str, field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidField {
        id: id.to_string(),
        field,
        reason: reason.to_string(),
    }
}
