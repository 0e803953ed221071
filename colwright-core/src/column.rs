//! Column descriptors
//!
//! A [`ColumnDescriptor`] is the unit exchanged with the table-rendering
//! collaborator. The engine only inspects `id` and the accessor key; headers,
//! cells, filters and layout pass through untouched.

use crate::error::{ColwrightResult, ValidationError};
use crate::row::Row;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Closure form of an accessor.
pub type AccessorFn = Arc<dyn Fn(&Row) -> Value + Send + Sync>;

/// Renders a cell from the accessed value and its row.
pub type CellFn = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// Produces a header label on demand.
pub type HeaderFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Column header: a fixed label or a label-producing function.
#[derive(Clone)]
pub enum Header {
    Label(String),
    Dynamic(HeaderFn),
}

impl Header {
    /// Resolve the header to display text.
    pub fn text(&self) -> String {
        match self {
            Header::Label(label) => label.clone(),
            Header::Dynamic(f) => f(),
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Header::Label(label) => f.debug_tuple("Label").field(label).finish(),
            Header::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

impl From<&str> for Header {
    fn from(label: &str) -> Self {
        Header::Label(label.to_string())
    }
}

impl From<String> for Header {
    fn from(label: String) -> Self {
        Header::Label(label)
    }
}

/// How a column reads its value from a row.
#[derive(Clone)]
pub enum Accessor {
    /// Reads the named field (dotted paths allowed); `Null` when missing.
    Key(String),
    /// Computes the value from the whole row.
    Compute(AccessorFn),
}

impl Accessor {
    /// Build a computed accessor from a closure.
    pub fn compute<F>(f: F) -> Self
    where
        F: Fn(&Row) -> Value + Send + Sync + 'static,
    {
        Accessor::Compute(Arc::new(f))
    }

    /// The accessor key, when this accessor reads a named field.
    pub fn key(&self) -> Option<&str> {
        match self {
            Accessor::Key(key) => Some(key),
            Accessor::Compute(_) => None,
        }
    }

    /// Read the value from a row. Never panics on missing fields.
    pub fn read(&self, row: &Row) -> Value {
        match self {
            Accessor::Key(key) => row.get_path(key).cloned().unwrap_or(Value::Null),
            Accessor::Compute(f) => f(row),
        }
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Accessor::Compute(_) => f.write_str("Compute(<fn>)"),
        }
    }
}

/// Cell renderer wrapper.
#[derive(Clone)]
pub struct CellRenderer(CellFn);

impl CellRenderer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Row) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn render(&self, value: &Value, row: &Row) -> String {
        (self.0)(value, row)
    }
}

impl Default for CellRenderer {
    fn default() -> Self {
        Self::new(|value, _| render_plain(value))
    }
}

impl fmt::Debug for CellRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellRenderer(<fn>)")
    }
}

/// Plain-text rendering: booleans as Yes/No, null as empty.
pub fn render_plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Filter widget variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterVariant {
    Text,
    Range,
    Select,
    Date,
}

/// Option for select-style filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: Value,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Column filter descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub variant: FilterVariant,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FilterOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FilterSpec {
    /// Free-text filter.
    pub fn text(placeholder: impl Into<String>) -> Self {
        Self {
            variant: FilterVariant::Text,
            options: Vec::new(),
            placeholder: Some(placeholder.into()),
        }
    }

    /// Select filter with fixed options.
    pub fn select(options: Vec<FilterOption>) -> Self {
        Self {
            variant: FilterVariant::Select,
            options,
            placeholder: None,
        }
    }
}

/// Column layout hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnLayout {
    pub size: u32,
    pub enable_sorting: bool,
    pub enable_hiding: bool,
    pub enable_column_filter: bool,
}

impl ColumnLayout {
    pub const fn sized(size: u32) -> Self {
        Self {
            size,
            enable_sorting: true,
            enable_hiding: true,
            enable_column_filter: true,
        }
    }

    pub const fn without_sorting(mut self) -> Self {
        self.enable_sorting = false;
        self
    }

    pub const fn without_filter(mut self) -> Self {
        self.enable_column_filter = false;
        self
    }
}

/// One table column.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub id: String,
    pub header: Header,
    pub accessor: Accessor,
    pub cell: CellRenderer,
    pub filter: Option<FilterSpec>,
    pub layout: Option<ColumnLayout>,
}

impl ColumnDescriptor {
    /// Column reading a named field; the id doubles as the accessor key.
    pub fn keyed(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            header: Header::Label(id.clone()),
            accessor: Accessor::Key(id.clone()),
            id,
            cell: CellRenderer::default(),
            filter: None,
            layout: None,
        }
    }

    /// Column computing its value from the row.
    pub fn computed<F>(id: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Row) -> Value + Send + Sync + 'static,
    {
        let id = id.into();
        Self {
            header: Header::Label(id.clone()),
            accessor: Accessor::compute(f),
            id,
            cell: CellRenderer::default(),
            filter: None,
            layout: None,
        }
    }

    pub fn with_header(mut self, header: impl Into<Header>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_accessor_key(mut self, key: impl Into<String>) -> Self {
        self.accessor = Accessor::Key(key.into());
        self
    }

    pub fn with_cell(mut self, cell: CellRenderer) -> Self {
        self.cell = cell;
        self
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// The accessor key, if the column reads a named field.
    pub fn accessor_key(&self) -> Option<&str> {
        self.accessor.key()
    }

    /// Read this column's value from a row.
    pub fn value(&self, row: &Row) -> Value {
        self.accessor.read(row)
    }

    /// Read and render this column's cell for a row.
    pub fn render(&self, row: &Row) -> String {
        let value = self.value(row);
        self.cell.render(&value, row)
    }
}

/// Collect column ids in order.
pub fn column_ids(columns: &[ColumnDescriptor]) -> Vec<String> {
    columns.iter().map(|c| c.id.clone()).collect()
}

/// Check that every id is non-empty and unique within the list.
pub fn validate_unique_ids(columns: &[ColumnDescriptor]) -> ColwrightResult<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for (position, column) in columns.iter().enumerate() {
        if column.id.is_empty() {
            return Err(ValidationError::EmptyColumnId { position }.into());
        }
        if !seen.insert(column.id.as_str()) {
            return Err(ValidationError::DuplicateColumnId {
                id: column.id.clone(),
            }
            .into());
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
