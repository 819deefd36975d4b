//! Configuration for the adapter.

use std::collections::BTreeSet;

use query_engine_metadata::metadata::DataType;
use schemars::{gen::SchemaSettings, schema::RootSchema};

use crate::options::{ExceptionHandlingMode, IgnoredError, ImportMode, PostgresIdentifierMapping};
pub use crate::values::ConnectionInformation;
use crate::version1::ParsedConfiguration;

/// The 'Configuration' type collects all the information necessary to translate and rewrite
/// push-down queries at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', which resolves secrets from an environment and checks the
/// numeric override. Dialect specific checks (connection clause, excluded capabilities, import
/// mode) happen when the translation layer opens a session for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub dialect: String,
    pub catalog_name: Option<String>,
    pub schema_name: Option<String>,
    pub connection: ConnectionInformation,
    pub database_url: Option<String>,
    pub import_mode: ImportMode,
    pub exception_handling: ExceptionHandlingMode,
    pub excluded_capabilities: Vec<String>,
    pub numeric_override: Option<DataType>,
    pub table_filter: Vec<String>,
    pub ignore_errors: BTreeSet<IgnoredError>,
    pub postgresql_identifier_mapping: PostgresIdentifierMapping,
}

/// The JSON schema of the configuration file.
pub fn generate_json_schema() -> RootSchema {
    SchemaSettings::draft07()
        .into_generator()
        .into_root_schema_for::<ParsedConfiguration>()
}
