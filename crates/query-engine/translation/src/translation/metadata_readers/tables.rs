use pushdown_configuration::{ExceptionHandlingMode, IgnoredError, PostgresIdentifierMapping};
use query_engine_metadata::metadata::{CatalogSource, RemoteTable, TableKind, TableMetadata};
use tracing::{info_span, Instrument};

use super::columns::ColumnMetadataReader;
use super::ScanOptions;
use crate::translation::dialect::Dialect;
use crate::translation::error::SchemaReadError;
use crate::translation::identifiers::IdentifierConverter;

/// Maps the tables of the configured catalog and schema.
pub struct TableMetadataReader<'a> {
    source: &'a dyn CatalogSource,
    dialect: &'a Dialect,
    options: &'a ScanOptions,
}

impl<'a> TableMetadataReader<'a> {
    pub fn new(
        source: &'a dyn CatalogSource,
        dialect: &'a Dialect,
        options: &'a ScanOptions,
    ) -> Self {
        TableMetadataReader {
            source,
            dialect,
            options,
        }
    }

    /// Map every table, or only `selected` ones when given. Tables without supported columns are
    /// left out.
    pub async fn read_tables(
        &self,
        selected: Option<&[String]>,
    ) -> Result<Vec<TableMetadata>, SchemaReadError> {
        let remote_tables = self
            .source
            .tables(self.dialect.catalog_name(), self.dialect.schema_name())
            .instrument(info_span!("Read tables"))
            .await?;

        let columns = ColumnMetadataReader::new(self.source, self.dialect);
        let mut tables = Vec::new();
        for remote in remote_tables {
            if !self.is_included(&remote.name, selected)? {
                continue;
            }
            let table_columns = match columns.read_columns(&remote.name).await {
                Ok(table_columns) => table_columns,
                Err(SchemaReadError::RemoteAccess(error))
                    if self.skips_invalid_relation(&remote) =>
                {
                    tracing::warn!(
                        view = %remote.name,
                        error = %error,
                        "Skipping view whose columns cannot be read"
                    );
                    continue;
                }
                Err(error) => return Err(error),
            };
            if table_columns.is_empty() {
                tracing::debug!(table = %remote.name, "Skipping table without supported columns");
                continue;
            }
            tables.push(TableMetadata {
                name: self.dialect.identifier_converter().convert(&remote.name),
                adapter_notes: String::new(),
                columns: table_columns,
                comment: remote.comment.unwrap_or_default(),
            });
        }
        Ok(tables)
    }

    fn is_included(
        &self,
        name: &str,
        selected: Option<&[String]>,
    ) -> Result<bool, SchemaReadError> {
        if !self.is_mappable(name) {
            if !self
                .options
                .ignore_errors
                .contains(&IgnoredError::PostgresqlUppercaseTables)
            {
                return Err(SchemaReadError::UpperCaseTable {
                    table: name.to_string(),
                });
            }
            tracing::debug!(
                table = %name,
                "Skipping table with upper case characters; it cannot be presented in upper case"
            );
            return Ok(false);
        }
        if let Some(selected) = selected {
            if !selected.iter().any(|candidate| self.names_match(candidate, name)) {
                return Ok(false);
            }
        }
        if !self.options.table_filter.is_empty()
            && !self
                .options
                .table_filter
                .iter()
                .any(|candidate| self.names_match(candidate, name))
        {
            tracing::debug!(table = %name, "Skipping table excluded by the table filter");
            return Ok(false);
        }
        Ok(true)
    }

    /// PostgreSQL tables with upper case names would collide with the upper-cased names of
    /// lower case tables.
    fn is_mappable(&self, name: &str) -> bool {
        match self.dialect.identifier_converter() {
            IdentifierConverter::PostgreSql(PostgresIdentifierMapping::ConvertToUpper) => {
                !name.chars().any(char::is_uppercase)
            }
            _ => true,
        }
    }

    fn names_match(&self, candidate: &str, name: &str) -> bool {
        if self
            .dialect
            .identifier_converter()
            .case_handling()
            .is_case_insensitive()
        {
            candidate.to_uppercase() == name.to_uppercase()
        } else {
            candidate == name
        }
    }

    fn skips_invalid_relation(&self, remote: &RemoteTable) -> bool {
        remote.kind == TableKind::View
            && self.options.exception_handling == ExceptionHandlingMode::IgnoreInvalidViews
    }
}
