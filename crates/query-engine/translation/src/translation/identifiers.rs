//! How remote identifiers are presented in the normalized schema.

use std::sync::LazyLock;

use pushdown_configuration::PostgresIdentifierMapping;
use query_engine_metadata::metadata::SchemaAdapterNotes;
use regex::Regex;

static POSTGRESQL_UNQUOTED_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][0-9a-z_]*$").expect("valid unquoted identifier regex")
});

/// How the remote source treats the case of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseHandling {
    InterpretAsLower,
    InterpretAsUpper,
    InterpretCaseSensitive,
}

/// Case handling for unquoted and quoted identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierCaseHandling {
    pub unquoted: CaseHandling,
    pub quoted: CaseHandling,
}

impl Default for IdentifierCaseHandling {
    fn default() -> Self {
        IdentifierCaseHandling {
            unquoted: CaseHandling::InterpretAsUpper,
            quoted: CaseHandling::InterpretCaseSensitive,
        }
    }
}

impl IdentifierCaseHandling {
    pub fn lower_unquoted() -> Self {
        IdentifierCaseHandling {
            unquoted: CaseHandling::InterpretAsLower,
            quoted: CaseHandling::InterpretCaseSensitive,
        }
    }

    /// Derive the handling from what the remote driver reports about its catalog.
    pub fn from_schema_notes(notes: &SchemaAdapterNotes) -> Self {
        let unquoted = if notes.stores_upper_case_identifiers {
            CaseHandling::InterpretAsUpper
        } else if notes.stores_lower_case_identifiers {
            CaseHandling::InterpretAsLower
        } else {
            CaseHandling::InterpretCaseSensitive
        };
        let quoted = if notes.stores_upper_case_quoted_identifiers {
            CaseHandling::InterpretAsUpper
        } else if notes.stores_lower_case_quoted_identifiers {
            CaseHandling::InterpretAsLower
        } else {
            CaseHandling::InterpretCaseSensitive
        };
        IdentifierCaseHandling { unquoted, quoted }
    }

    /// Neither quoting nor case changes what an identifier refers to.
    pub fn is_case_insensitive(&self) -> bool {
        self.unquoted != CaseHandling::InterpretCaseSensitive
            && self.quoted != CaseHandling::InterpretCaseSensitive
    }
}

/// Converts remote table and column names into the names presented to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierConverter {
    Standard(IdentifierCaseHandling),
    PostgreSql(PostgresIdentifierMapping),
}

impl IdentifierConverter {
    pub fn case_handling(&self) -> IdentifierCaseHandling {
        match self {
            IdentifierConverter::Standard(handling) => *handling,
            IdentifierConverter::PostgreSql(_) => IdentifierCaseHandling::lower_unquoted(),
        }
    }

    pub fn convert(&self, identifier: &str) -> String {
        match self {
            IdentifierConverter::Standard(handling) => {
                if handling.quoted == handling.unquoted
                    && handling.unquoted != CaseHandling::InterpretCaseSensitive
                {
                    identifier.to_uppercase()
                } else {
                    identifier.to_string()
                }
            }
            IdentifierConverter::PostgreSql(PostgresIdentifierMapping::PreserveOriginalCase) => {
                identifier.to_string()
            }
            IdentifierConverter::PostgreSql(PostgresIdentifierMapping::ConvertToUpper) => {
                if POSTGRESQL_UNQUOTED_IDENTIFIER.is_match(identifier) {
                    identifier.to_uppercase()
                } else {
                    identifier.to_string()
                }
            }
        }
    }

    pub fn convert_column_name(&self, column_name: &str) -> String {
        match self {
            IdentifierConverter::PostgreSql(PostgresIdentifierMapping::ConvertToUpper) => {
                column_name.to_uppercase()
            }
            _ => column_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_handling_keeps_identifiers() {
        let converter = IdentifierConverter::Standard(IdentifierCaseHandling::default());
        assert_eq!(converter.convert("MixedCase"), "MixedCase");
    }

    #[test]
    fn uniform_case_insensitive_handling_upper_cases() {
        let converter = IdentifierConverter::Standard(IdentifierCaseHandling {
            unquoted: CaseHandling::InterpretAsLower,
            quoted: CaseHandling::InterpretAsLower,
        });
        assert_eq!(converter.convert("orders"), "ORDERS");
    }

    #[test]
    fn postgresql_upper_cases_only_plain_lower_case_names() {
        let converter = IdentifierConverter::PostgreSql(PostgresIdentifierMapping::ConvertToUpper);
        assert_eq!(converter.convert("order_items2"), "ORDER_ITEMS2");
        assert_eq!(converter.convert("OrderItems"), "OrderItems");
        assert_eq!(converter.convert("2fast"), "2fast");
        assert_eq!(converter.convert("with space"), "with space");
    }

    #[test]
    fn postgresql_can_preserve_the_original_case() {
        let converter =
            IdentifierConverter::PostgreSql(PostgresIdentifierMapping::PreserveOriginalCase);
        assert_eq!(converter.convert("orders"), "orders");
        assert_eq!(converter.convert_column_name("id"), "id");
    }

    #[test]
    fn handling_is_read_from_schema_notes() {
        let notes = SchemaAdapterNotes {
            stores_lower_case_identifiers: true,
            stores_lower_case_quoted_identifiers: true,
            ..SchemaAdapterNotes::default()
        };
        let handling = IdentifierCaseHandling::from_schema_notes(&notes);
        assert!(handling.is_case_insensitive());
        assert_eq!(handling.unquoted, CaseHandling::InterpretAsLower);
    }
}
