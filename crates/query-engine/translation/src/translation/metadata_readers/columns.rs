use query_engine_metadata::metadata::{
    CatalogSource, ColumnAdapterNotes, ColumnMetadata, RemoteColumn,
};
use tracing::{info_span, Instrument};

use crate::translation::dialect::Dialect;
use crate::translation::error::SchemaReadError;

/// Maps the column listing of a remote table.
pub struct ColumnMetadataReader<'a> {
    source: &'a dyn CatalogSource,
    dialect: &'a Dialect,
}

impl<'a> ColumnMetadataReader<'a> {
    pub fn new(source: &'a dyn CatalogSource, dialect: &'a Dialect) -> Self {
        ColumnMetadataReader { source, dialect }
    }

    /// The supported columns of a table, in ordinal order.
    pub async fn read_columns(&self, table: &str) -> Result<Vec<ColumnMetadata>, SchemaReadError> {
        let rows = self
            .source
            .columns(self.dialect.catalog_name(), self.dialect.schema_name(), table)
            .instrument(info_span!("Read columns", table = %table))
            .await?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            match self.map_column(row)? {
                Some(column) => columns.push(column),
                None => tracing::debug!(
                    table = %table,
                    column = %row.name,
                    type_name = %row.type_name,
                    "Dropping column with unsupported type"
                ),
            }
        }
        Ok(columns)
    }

    /// `None` when the column type has no normalized counterpart.
    pub fn map_column(&self, row: &RemoteColumn) -> Result<Option<ColumnMetadata>, SchemaReadError> {
        let data_type = self.dialect.type_mapper().map(&row.type_descriptor());
        if !data_type.is_supported() {
            return Ok(None);
        }
        let adapter_notes = ColumnAdapterNotes::new(row.type_code, row.type_name.clone()).to_json()?;
        Ok(Some(ColumnMetadata {
            name: self
                .dialect
                .identifier_converter()
                .convert_column_name(&row.name),
            adapter_notes,
            data_type,
            nullable: !row
                .is_nullable
                .as_deref()
                .is_some_and(|nullable| nullable.eq_ignore_ascii_case("NO")),
            identity: row
                .is_autoincrement
                .as_deref()
                .is_some_and(|autoincrement| autoincrement.eq_ignore_ascii_case("YES")),
            default_value: row.column_default.clone().unwrap_or_default(),
            comment: row.remarks.clone().unwrap_or_default(),
        }))
    }
}
