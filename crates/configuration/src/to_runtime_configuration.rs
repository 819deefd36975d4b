//! Convert a parsed configuration into the runtime configuration.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use query_engine_metadata::metadata::{DataType, MAX_DECIMAL_PRECISION};
use regex::Regex;

use crate::configuration::Configuration;
use crate::environment::Environment;
use crate::error::{MakeRuntimeConfigurationError, NumericOverrideError};
use crate::options::IgnoredError;
use crate::values::{ConnectionInformation, SecretSetting};
use crate::version1::ParsedConfiguration;

/// Resolve secrets and check the numeric override.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let connection = ConnectionInformation::resolve(&parsed_config.connection, &environment)?;
    let database_url = parsed_config
        .connection
        .database_url
        .as_ref()
        .map(|value| value.resolve(&environment))
        .transpose()?;

    let numeric_override = parsed_config
        .numeric_override
        .as_deref()
        .map(parse_numeric_override)
        .transpose()?;

    let excluded_capabilities = parsed_config
        .excluded_capabilities
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect();

    let ignore_errors = parse_ignore_errors(&parsed_config.ignore_errors)?;

    tracing::debug!(dialect = parsed_config.dialect, "Configuration resolved");

    Ok(Configuration {
        dialect: parsed_config.dialect.to_uppercase(),
        catalog_name: parsed_config.catalog_name,
        schema_name: parsed_config.schema_name,
        connection,
        database_url,
        import_mode: parsed_config.import_mode,
        exception_handling: parsed_config.exception_handling,
        excluded_capabilities,
        numeric_override,
        table_filter: parsed_config.table_filter,
        ignore_errors,
        postgresql_identifier_mapping: parsed_config.postgresql_identifier_mapping,
    })
}

fn parse_ignore_errors(
    value: &str,
) -> Result<BTreeSet<IgnoredError>, MakeRuntimeConfigurationError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            IgnoredError::from_name(entry)
                .ok_or_else(|| MakeRuntimeConfigurationError::UnknownIgnoredError(entry.to_string()))
        })
        .collect()
}

static NUMERIC_OVERRIDE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*,\s*(\d+)\s*$").expect("valid numeric override regex")
});

/// Parse a `"<precision>,<scale>"` override into the decimal type it stands for.
pub fn parse_numeric_override(value: &str) -> Result<DataType, NumericOverrideError> {
    let malformed = || NumericOverrideError::Malformed(value.to_string());
    let captures = NUMERIC_OVERRIDE_PATTERN
        .captures(value)
        .ok_or_else(malformed)?;
    let precision: u32 = captures[1].parse().map_err(|_| malformed())?;
    let scale: u32 = captures[2].parse().map_err(|_| malformed())?;
    if precision > MAX_DECIMAL_PRECISION {
        return Err(NumericOverrideError::PrecisionTooLarge {
            value: value.to_string(),
            precision,
            maximum: MAX_DECIMAL_PRECISION,
        });
    }
    if scale > precision {
        return Err(NumericOverrideError::ScaleExceedsPrecision {
            value: value.to_string(),
            precision,
            scale,
        });
    }
    Ok(DataType::decimal(precision, scale))
}
