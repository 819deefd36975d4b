//! Adapter notes: opaque JSON payloads attached to schema and column metadata so later stages
//! can recover source type information without asking the remote database again.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::remote::TypeCode;

/// Source type of a column, as reported by the catalog scan.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAdapterNotes {
    pub jdbc_data_type: i32,
    pub type_name: String,
}

impl ColumnAdapterNotes {
    pub fn new(type_code: TypeCode, type_name: impl Into<String>) -> Self {
        ColumnAdapterNotes {
            jdbc_data_type: type_code.code(),
            type_name: type_name.into(),
        }
    }

    pub fn type_code(&self) -> TypeCode {
        TypeCode::from_code(self.jdbc_data_type)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(notes: &str) -> serde_json::Result<Self> {
        serde_json::from_str(notes)
    }
}

/// Identifier and null sorting properties of the remote database.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAdapterNotes {
    pub catalog_separator: String,
    pub identifier_quote_string: String,
    pub stores_lower_case_identifiers: bool,
    pub stores_upper_case_identifiers: bool,
    pub stores_mixed_case_identifiers: bool,
    pub supports_mixed_case_identifiers: bool,
    pub stores_lower_case_quoted_identifiers: bool,
    pub stores_upper_case_quoted_identifiers: bool,
    pub stores_mixed_case_quoted_identifiers: bool,
    pub supports_mixed_case_quoted_identifiers: bool,
    pub nulls_are_sorted_at_end: bool,
    pub nulls_are_sorted_at_start: bool,
    pub nulls_are_sorted_high: bool,
    pub nulls_are_sorted_low: bool,
}

impl Default for SchemaAdapterNotes {
    fn default() -> Self {
        SchemaAdapterNotes {
            catalog_separator: ".".to_string(),
            identifier_quote_string: "\"".to_string(),
            stores_lower_case_identifiers: false,
            stores_upper_case_identifiers: false,
            stores_mixed_case_identifiers: false,
            supports_mixed_case_identifiers: false,
            stores_lower_case_quoted_identifiers: false,
            stores_upper_case_quoted_identifiers: false,
            stores_mixed_case_quoted_identifiers: false,
            supports_mixed_case_quoted_identifiers: false,
            nulls_are_sorted_at_end: false,
            nulls_are_sorted_at_start: false,
            nulls_are_sorted_high: false,
            nulls_are_sorted_low: false,
        }
    }
}

impl SchemaAdapterNotes {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(notes: &str) -> serde_json::Result<Self> {
        serde_json::from_str(notes)
    }
}
