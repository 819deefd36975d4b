//! Normalized schema metadata: what a schema scan produces and what query trees refer to.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::data_type::DataType;

fn default_nullable() -> bool {
    true
}

/// Information about a column of a remote table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    pub name: String,
    /// Serialized `ColumnAdapterNotes`.
    #[serde(default)]
    pub adapter_notes: String,
    pub data_type: DataType,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub identity: bool,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub comment: String,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        ColumnMetadata {
            name: name.into(),
            adapter_notes: String::new(),
            data_type,
            nullable: true,
            identity: false,
            default_value: String::new(),
            comment: String::new(),
        }
    }

    #[must_use]
    pub fn with_adapter_notes(mut self, adapter_notes: impl Into<String>) -> Self {
        self.adapter_notes = adapter_notes.into();
        self
    }
}

/// Information about a remote table (or view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableMetadata {
    pub name: String,
    #[serde(default)]
    pub adapter_notes: String,
    pub columns: Vec<ColumnMetadata>,
    #[serde(default)]
    pub comment: String,
}

impl TableMetadata {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnMetadata>) -> Self {
        TableMetadata {
            name: name.into(),
            adapter_notes: String::new(),
            columns,
            comment: String::new(),
        }
    }
}

/// The result of a schema scan. Each refresh produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMetadata {
    /// Serialized `SchemaAdapterNotes`.
    pub adapter_notes: String,
    pub tables: Vec<TableMetadata>,
}

impl SchemaMetadata {
    pub fn empty() -> Self {
        SchemaMetadata::default()
    }

    pub fn table(&self, name: &str) -> Option<&TableMetadata> {
        self.tables.iter().find(|table| table.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_nullable_unless_stated() {
        let column: ColumnMetadata =
            serde_json::from_str(r#"{"name":"C1","dataType":{"type":"boolean"}}"#).unwrap();
        assert!(column.nullable);
        assert!(!column.identity);
        assert_eq!(column.adapter_notes, "");
    }

    #[test]
    fn tables_are_found_by_exact_name() {
        let schema = SchemaMetadata {
            adapter_notes: String::new(),
            tables: vec![TableMetadata::new("T", vec![])],
        };
        assert!(schema.table("T").is_some());
        assert!(schema.table("t").is_none());
    }
}
