pub mod configuration;
pub mod connection_settings;
pub mod environment;
pub mod error;
pub mod options;
pub mod to_runtime_configuration;
pub mod values;
pub mod version1;

pub use configuration::{generate_json_schema, Configuration};
pub use connection_settings::ConnectionSettings;
pub use options::{ExceptionHandlingMode, IgnoredError, ImportMode, PostgresIdentifierMapping};
pub use to_runtime_configuration::{make_runtime_configuration, parse_numeric_override};
pub use values::{
    ConnectionInformation, ConnectionString, DatabaseUrl, Password, Secret, SecretSetting,
};
pub use version1::{
    parse_configuration, write_parsed_configuration, ParsedConfiguration, CONFIGURATION_FILENAME,
};
