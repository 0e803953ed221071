//! Heterogeneous record rows
//!
//! Rows carry no declared schema. Call, text, social and direct-mail records
//! share no guaranteed fields, so every lookup is presence-based and total.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single record as a JSON object.
///
/// Lookups accept dotted paths (`transfer.agentId`) that walk nested objects.
///
/// # Example
///
/// ```
/// use colwright_core::Row;
/// use serde_json::json;
///
/// let row = Row::from_value(json!({"transfer": {"agentId": "A1"}, "smsOptOut": true}));
/// assert_eq!(row.text("transfer.agentId").as_deref(), Some("A1"));
/// assert!(row.flag("smsOptOut"));
/// assert!(!row.flag("emailOptOut"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builds a row from any JSON value. Non-object values yield an empty row.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::new(),
        }
    }

    /// Sets a top-level field (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Returns the underlying field map.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Iterates over top-level field names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns `true` if the row has a top-level field with this name,
    /// whatever its value.
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns `true` if any of the given top-level fields is present.
    pub fn has_any(&self, fields: &[&str]) -> bool {
        fields.iter().any(|f| self.has(f))
    }

    /// Returns the top-level value, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Resolves a dotted path through nested objects.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns the nested object at `path`, if it is one.
    pub fn object(&self, path: &str) -> Option<&Map<String, Value>> {
        self.get_path(path).and_then(Value::as_object)
    }

    /// Returns a non-blank display string for the path.
    ///
    /// Strings are trimmed; numbers and booleans are stringified. Objects,
    /// arrays, null and blank strings yield `None`.
    pub fn text(&self, path: &str) -> Option<String> {
        self.get_path(path).and_then(value_text)
    }

    /// Returns the first non-blank text among the aliased paths.
    pub fn first_text(&self, aliases: &[&str]) -> Option<String> {
        aliases.iter().find_map(|alias| self.text(alias))
    }

    /// Returns the truthiness of the path. Missing fields are `false`.
    pub fn flag(&self, path: &str) -> bool {
        self.get_path(path).is_some_and(value_truthy)
    }

    /// Returns `true` if any of the aliased paths is truthy.
    pub fn any_flag(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|alias| self.flag(alias))
    }

    /// Returns the flag value only when the path is present.
    pub fn explicit_flag(&self, path: &str) -> Option<bool> {
        self.get_path(path).map(value_truthy)
    }

    /// Returns a numeric reading of the path, parsing numeric strings.
    pub fn number(&self, path: &str) -> Option<f64> {
        match self.get_path(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns the first numeric reading among the aliased paths.
    pub fn first_number(&self, aliases: &[&str]) -> Option<f64> {
        aliases.iter().find_map(|alias| self.number(alias))
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Value> for Row {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Display text for a scalar JSON value.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Loose truthiness used by opt-out and suppression flags.
pub fn value_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================


// =============================================================================
// PROPERTY-BASED TESTS
// =============================================================================
