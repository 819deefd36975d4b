//! Errors for translation, grouped by what went wrong.

use pushdown_configuration::IgnoredError;
use query_engine_metadata::metadata::RemoteAccessError;
use thiserror::Error;

/// A dialect could not be built or found. Always a configuration error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialectError {
    #[error("unable to alias {function} in dialect {dialect}: only simple functions can be aliased")]
    AliasForNonSimpleFunction {
        dialect: &'static str,
        function: String,
    },
    #[error("unknown SQL dialect \"{name}\"; available dialects are: {available}")]
    Unknown { name: String, available: String },
}

/// An excluded capability entry names no known capability.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown capability \"{0}\" in the excluded capabilities")]
pub struct CapabilityError(pub String);

/// The query tree cannot be rendered. The whole translation is abandoned.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("unable to read the adapter notes of column {column}: {source}")]
    MalformedColumnAdapterNotes {
        column: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to read the schema adapter notes: {0}")]
    MalformedSchemaAdapterNotes(#[source] serde_json::Error),
    #[error("identifier {identifier:?} contains the quote string {quote:?}")]
    IllegalIdentifier { identifier: String, quote: String },
    #[error("identifier {0:?} contains characters the remote database does not accept")]
    IdentifierCharacters(String),
    #[error("string literal {0:?} contains a line break or a backslash")]
    StringLiteralCharacters(String),
    #[error("double literal {0} is not a finite number")]
    NonFiniteDouble(f64),
    #[error("row limit {limit} with offset {offset} exceeds the largest representable row count")]
    LimitOverflow { limit: u64, offset: u64 },
    #[error("{function} expects {expected} argument(s) but got {actual}")]
    ArgumentCount {
        function: String,
        expected: &'static str,
        actual: usize,
    },
    #[error("interval literal {value:?} has the non-interval type {data_type}")]
    IntervalLiteralType { value: String, data_type: String },
    #[error("{0} expects a numeric literal argument")]
    ExpectedNumericLiteral(String),
    #[error("CASE has {results} result(s) for {arguments} WHEN branch(es)")]
    CaseBranches { arguments: usize, results: usize },
    #[error("empty {0}")]
    EmptyList(&'static str),
}

/// The connection properties do not describe a single valid connection clause.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionDefinitionError {
    #[error("a connection name and a connection string cannot be combined; use one or the other")]
    NameAndAddress,
    #[error("a named connection can only be overridden with both a user and a password")]
    PartialCredentialOverride,
    #[error("incomplete connection information: specify a connection name, or a connection string with user and password")]
    Incomplete,
    #[error("importing from {source_kind} requires {requirement}")]
    ImportRequirement {
        source_kind: &'static str,
        requirement: &'static str,
    },
    #[error("dialect {dialect} does not support the {mode} import mode")]
    UnsupportedImportMode {
        dialect: &'static str,
        mode: &'static str,
    },
}

/// Some result columns of a push-down query have no normalized type.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unsupported data type(s) in column(s) {}", format_positions(.positions))]
pub struct UnsupportedColumnsError {
    /// 1-based column positions.
    pub positions: Vec<usize>,
}

fn format_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A failure while rewriting a push-down query into an import statement.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error(transparent)]
    Connection(#[from] ConnectionDefinitionError),
    #[error("unable to describe the result columns of the push-down query: {0}")]
    RemoteAccess(#[from] RemoteAccessError),
    #[error(transparent)]
    UnsupportedColumns(#[from] UnsupportedColumnsError),
}

/// A failure while scanning the remote schema.
#[derive(Debug, Error)]
pub enum SchemaReadError {
    #[error(transparent)]
    Dialect(#[from] DialectError),
    #[error("unable to read the remote schema: {0}")]
    RemoteAccess(#[from] RemoteAccessError),
    #[error("unable to serialize the schema adapter notes: {0}")]
    AdapterNotes(#[from] serde_json::Error),
    #[error(
        "table {table} cannot be presented in upper case; add {} to ignoreErrors to leave it out",
        IgnoredError::PostgresqlUppercaseTables
    )]
    UpperCaseTable { table: String },
}

/// A configuration that cannot be turned into a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Dialect(#[from] DialectError),
    #[error(transparent)]
    Capability(#[from] CapabilityError),
    #[error(transparent)]
    Connection(#[from] ConnectionDefinitionError),
}
