//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("unsupported configuration version {0}")]
    UnsupportedVersion(u32),
    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("missing environment variable when processing {setting}: {message}")]
    MissingEnvironmentVariable { setting: String, message: String },
    #[error(transparent)]
    NumericOverride(#[from] NumericOverrideError),
    #[error("unknown error switch \"{0}\" in ignoreErrors")]
    UnknownIgnoredError(String),
}

/// The numeric override is not of the form `<precision>,<scale>`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NumericOverrideError {
    #[error("unable to parse numeric override \"{0}\": expected \"<precision>,<scale>\"")]
    Malformed(String),
    #[error("numeric override \"{value}\": scale {scale} exceeds precision {precision}")]
    ScaleExceedsPrecision {
        value: String,
        precision: u32,
        scale: u32,
    },
    #[error("numeric override \"{value}\": precision {precision} exceeds the maximum of {maximum}")]
    PrecisionTooLarge {
        value: String,
        precision: u32,
        maximum: u32,
    },
}
