use query_engine_metadata::metadata::{CatalogSource, SchemaAdapterNotes, SchemaMetadata};

use super::tables::TableMetadataReader;
use super::ScanOptions;
use crate::translation::dialect::Dialect;
use crate::translation::error::SchemaReadError;

/// Produces a complete `SchemaMetadata` for one refresh.
pub struct SchemaMetadataReader<'a> {
    source: &'a dyn CatalogSource,
    dialect: &'a Dialect,
    options: &'a ScanOptions,
}

impl<'a> SchemaMetadataReader<'a> {
    pub fn new(
        source: &'a dyn CatalogSource,
        dialect: &'a Dialect,
        options: &'a ScanOptions,
    ) -> Self {
        SchemaMetadataReader {
            source,
            dialect,
            options,
        }
    }

    /// Read the schema. `notes` are the properties the remote database reported for this
    /// refresh; they are stored with the result for later translations.
    pub async fn read(
        &self,
        notes: &SchemaAdapterNotes,
        selected: Option<&[String]>,
    ) -> Result<SchemaMetadata, SchemaReadError> {
        let tables = TableMetadataReader::new(self.source, self.dialect, self.options)
            .read_tables(selected)
            .await?;
        tracing::info!(
            dialect = self.dialect.name(),
            catalog = ?self.dialect.catalog_name(),
            schema = ?self.dialect.schema_name(),
            tables = tables.len(),
            "Read remote schema metadata"
        );
        Ok(SchemaMetadata {
            adapter_notes: notes.to_json()?,
            tables,
        })
    }
}
