//! Version 1 of the adapter configuration file.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::connection_settings::ConnectionSettings;
use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::options::{ExceptionHandlingMode, ImportMode, PostgresIdentifierMapping};

const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const DEFAULT_DIALECT: &str = "GENERIC";

/// Initial configuration, just enough to pick a dialect, connect to the remote database and
/// elaborate a full 'Configuration'.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    // Which version of the configuration format are we using
    pub version: u32,
    /// Name of the remote SQL dialect, e.g. `POSTGRESQL`.
    pub dialect: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(default)]
    pub connection: ConnectionSettings,
    #[serde(default)]
    pub import_mode: ImportMode,
    #[serde(default)]
    pub exception_handling: ExceptionHandlingMode,
    /// Comma separated capabilities that must not be pushed down, e.g. `FN_AGG_SUM, LIMIT`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub excluded_capabilities: String,
    /// Fixed `<precision>,<scale>` for numbers too wide to map as they are.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_override: Option<String>,
    /// Only tables with these names are scanned. Empty means all of them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub table_filter: Vec<String>,
    /// Comma separated scan errors to tolerate, e.g. `POSTGRESQL_UPPERCASE_TABLES`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ignore_errors: String,
    #[serde(default)]
    pub postgresql_identifier_mapping: PostgresIdentifierMapping,
}

impl ParsedConfiguration {
    pub fn initial() -> Self {
        ParsedConfiguration::empty()
    }

    pub fn empty() -> Self {
        Self {
            version: CURRENT_VERSION,
            dialect: DEFAULT_DIALECT.into(),
            catalog_name: None,
            schema_name: None,
            connection: ConnectionSettings::empty(),
            import_mode: ImportMode::default(),
            exception_handling: ExceptionHandlingMode::default(),
            excluded_capabilities: String::new(),
            numeric_override: None,
            table_filter: vec![],
            ignore_errors: String::new(),
            postgresql_identifier_mapping: PostgresIdentifierMapping::default(),
        }
    }
}

/// Read `configuration.json` from the given directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|err| {
                ParseConfigurationError::IoErrorButStringified(format!(
                    "{}: {}",
                    &configuration_file.display(),
                    err
                ))
            })?;

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if parsed_config.version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion(
            parsed_config.version,
        ));
    }

    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk.
pub async fn write_parsed_configuration(
    parsed_config: ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().to_owned().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    // create the configuration file
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(&parsed_config)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    Ok(())
}
