//! Scan the remote catalog into normalized schema metadata.

mod columns;
mod schema;
mod tables;

pub use columns::ColumnMetadataReader;
pub use schema::SchemaMetadataReader;
pub use tables::TableMetadataReader;

use std::collections::BTreeSet;

use pushdown_configuration::{ExceptionHandlingMode, IgnoredError};

/// User settings that shape a schema scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Only tables with these names are mapped. Empty means all of them.
    pub table_filter: Vec<String>,
    pub exception_handling: ExceptionHandlingMode,
    /// Scan errors that leave the offending relation out instead of failing the scan.
    pub ignore_errors: BTreeSet<IgnoredError>,
}
