//! Adapter behaviour switches.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the rewritten query reaches the remote database.
#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ImportMode {
    /// `IMPORT INTO (...) FROM JDBC ...`
    #[default]
    Jdbc,
    /// The remote database is the local one; the generated query is run as is.
    Local,
    /// `IMPORT FROM EXA AT '<exaConnectionString>' ...`
    #[serde(rename_all = "camelCase")]
    FromExa { exa_connection_string: String },
    /// `IMPORT FROM ORA AT <oraConnectionName> ...`
    #[serde(rename_all = "camelCase")]
    FromOra { ora_connection_name: String },
}

/// What to do when reading the metadata of a single relation fails during a schema scan.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExceptionHandlingMode {
    /// Skip views whose columns cannot be read.
    IgnoreInvalidViews,
    #[default]
    None,
}

/// How PostgreSQL identifiers are presented.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostgresIdentifierMapping {
    /// Unquoted lower case identifiers are presented in upper case.
    #[default]
    ConvertToUpper,
    PreserveOriginalCase,
}

/// A schema scan error the user has chosen to tolerate.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IgnoredError {
    /// Leave out PostgreSQL tables whose names cannot be presented in upper case, instead of
    /// failing the scan.
    PostgresqlUppercaseTables,
}

impl IgnoredError {
    pub fn name(self) -> &'static str {
        match self {
            IgnoredError::PostgresqlUppercaseTables => "POSTGRESQL_UPPERCASE_TABLES",
        }
    }

    /// Look a switch up by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "POSTGRESQL_UPPERCASE_TABLES" => Some(IgnoredError::PostgresqlUppercaseTables),
            _ => None,
        }
    }
}

impl std::fmt::Display for IgnoredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
