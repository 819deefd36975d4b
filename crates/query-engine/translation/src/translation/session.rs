//! A validated configuration, ready to translate queries and scan the remote schema.

use pushdown_configuration::{Configuration, ImportMode};
use query_engine_metadata::metadata::{
    CatalogSource, ResultSetProbe, SchemaAdapterNotes, SchemaMetadata,
};
use query_engine_sql::sql::ast::Select;
use tracing::{info_span, Instrument};

use super::capabilities::Capabilities;
use super::connection::{check_import_mode, ConnectionDefinition};
use super::dialect::{Dialect, DialectContext, DialectRegistry};
use super::error::{RewriteError, SchemaReadError, SessionError, TranslationError};
use super::generation::generate;
use super::metadata_readers::{ScanOptions, SchemaMetadataReader};
use super::rewriter::{rewrite, RewriteContext};

/// Everything a push-down request needs, checked once up front.
#[derive(Debug, Clone)]
pub struct AdapterSession {
    registry: DialectRegistry,
    context: DialectContext,
    dialect: Dialect,
    capabilities: Capabilities,
    connection: ConnectionDefinition,
    import_mode: ImportMode,
    scan_options: ScanOptions,
}

impl AdapterSession {
    /// Resolve the dialect and check the connection, the excluded capabilities and the import
    /// mode. Nothing here talks to the remote database.
    pub fn new(
        configuration: &Configuration,
        registry: &DialectRegistry,
        schema_adapter_notes: SchemaAdapterNotes,
    ) -> Result<AdapterSession, SessionError> {
        let context = DialectContext {
            catalog_name: configuration.catalog_name.clone(),
            schema_name: configuration.schema_name.clone(),
            schema_adapter_notes,
            postgresql_identifier_mapping: configuration.postgresql_identifier_mapping,
            numeric_override: configuration.numeric_override,
        };
        let dialect = registry.resolve(&configuration.dialect, &context)?;
        let connection = ConnectionDefinition::from_information(&configuration.connection)?;
        check_import_mode(&configuration.import_mode, &dialect, &connection)?;
        let excluded = Capabilities::parse_excluded(&configuration.excluded_capabilities)?;
        let capabilities = dialect.capabilities().subtract(&excluded);

        tracing::debug!(
            dialect = dialect.name(),
            excluded = configuration.excluded_capabilities.len(),
            "Opened adapter session"
        );

        Ok(AdapterSession {
            registry: registry.clone(),
            context,
            dialect,
            capabilities,
            connection,
            import_mode: configuration.import_mode.clone(),
            scan_options: ScanOptions {
                table_filter: configuration.table_filter.clone(),
                exception_handling: configuration.exception_handling,
                ignore_errors: configuration.ignore_errors.clone(),
            },
        })
    }

    /// The schema adapter notes stored by a previous refresh. A schema that was never refreshed
    /// has none.
    pub fn stored_adapter_notes(
        schema: &SchemaMetadata,
    ) -> Result<SchemaAdapterNotes, TranslationError> {
        if schema.adapter_notes.is_empty() {
            Ok(SchemaAdapterNotes::default())
        } else {
            SchemaAdapterNotes::from_json(&schema.adapter_notes)
                .map_err(TranslationError::MalformedSchemaAdapterNotes)
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// The dialect's capabilities without the excluded ones.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn connection(&self) -> &ConnectionDefinition {
        &self.connection
    }

    pub fn generate(&self, select: &Select) -> Result<String, TranslationError> {
        generate(select, &self.dialect)
    }

    pub async fn rewrite(
        &self,
        select: &Select,
        probe: &dyn ResultSetProbe,
    ) -> Result<String, RewriteError> {
        let context = RewriteContext {
            dialect: &self.dialect,
            connection: &self.connection,
            import_mode: &self.import_mode,
        };
        rewrite(select, context, probe).await
    }

    /// Scan the remote schema. The dialect is rebuilt from the properties the remote database
    /// reports now, so the result never depends on an earlier scan.
    pub async fn refresh(
        &self,
        source: &dyn CatalogSource,
        selected_tables: Option<&[String]>,
    ) -> Result<SchemaMetadata, SchemaReadError> {
        let notes = source
            .schema_properties()
            .instrument(info_span!("Read schema properties"))
            .await?;
        let context = DialectContext {
            schema_adapter_notes: notes.clone(),
            ..self.context.clone()
        };
        let dialect = self.registry.resolve(self.dialect.name(), &context)?;
        SchemaMetadataReader::new(source, &dialect, &self.scan_options)
            .read(&notes, selected_tables)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pushdown_configuration::configuration::ConnectionInformation;
    use pushdown_configuration::{ExceptionHandlingMode, PostgresIdentifierMapping};
    use query_engine_metadata::metadata::TypeCode;

    use super::*;
    use crate::translation::capabilities::MainCapability;
    use crate::translation::error::{CapabilityError, ConnectionDefinitionError};
    use crate::translation::metadata_readers::fake::{remote_column, InMemoryCatalog};

    fn configuration(dialect: &str) -> Configuration {
        Configuration {
            dialect: dialect.to_string(),
            catalog_name: None,
            schema_name: Some("S".to_string()),
            connection: ConnectionInformation {
                connection_name: Some("MY_CONN".to_string()),
                ..ConnectionInformation::default()
            },
            database_url: None,
            import_mode: ImportMode::Jdbc,
            exception_handling: ExceptionHandlingMode::None,
            excluded_capabilities: vec![],
            numeric_override: None,
            table_filter: vec![],
            ignore_errors: BTreeSet::new(),
            postgresql_identifier_mapping: PostgresIdentifierMapping::ConvertToUpper,
        }
    }

    fn open(configuration: &Configuration) -> Result<AdapterSession, SessionError> {
        AdapterSession::new(
            configuration,
            &DialectRegistry::with_builtin_dialects(),
            SchemaAdapterNotes::default(),
        )
    }

    #[test]
    fn excluded_capabilities_are_removed() {
        let mut configuration = configuration("EXASOL");
        configuration.excluded_capabilities = vec!["LIMIT".to_string()];
        let session = open(&configuration).unwrap();
        assert!(!session.capabilities().main.contains(&MainCapability::Limit));
        assert!(session.dialect().capabilities().main.contains(&MainCapability::Limit));
    }

    #[test]
    fn configuration_errors_surface_before_any_remote_call() {
        let mut unknown_capability = configuration("EXASOL");
        unknown_capability.excluded_capabilities = vec!["TELEPORT".to_string()];
        assert!(matches!(
            open(&unknown_capability),
            Err(SessionError::Capability(CapabilityError(name))) if name == "TELEPORT"
        ));

        let mut no_connection = configuration("EXASOL");
        no_connection.connection = ConnectionInformation::default();
        assert!(matches!(
            open(&no_connection),
            Err(SessionError::Connection(ConnectionDefinitionError::Incomplete))
        ));

        let mut local_on_mysql = configuration("MYSQL");
        local_on_mysql.import_mode = ImportMode::Local;
        assert!(matches!(
            open(&local_on_mysql),
            Err(SessionError::Connection(
                ConnectionDefinitionError::UnsupportedImportMode { .. }
            ))
        ));

        assert!(matches!(
            open(&configuration("NOSUCHDB")),
            Err(SessionError::Dialect(_))
        ));
    }

    #[test]
    fn stored_adapter_notes_default_when_never_refreshed() {
        assert_eq!(
            AdapterSession::stored_adapter_notes(&SchemaMetadata::empty()).unwrap(),
            SchemaAdapterNotes::default()
        );
        let broken = SchemaMetadata {
            adapter_notes: "{".to_string(),
            tables: vec![],
        };
        assert!(matches!(
            AdapterSession::stored_adapter_notes(&broken),
            Err(TranslationError::MalformedSchemaAdapterNotes(_))
        ));
    }

    #[tokio::test]
    async fn refresh_uses_the_reported_schema_properties() {
        let notes = SchemaAdapterNotes {
            stores_upper_case_identifiers: true,
            stores_upper_case_quoted_identifiers: true,
            ..SchemaAdapterNotes::default()
        };
        let catalog = InMemoryCatalog {
            notes: notes.clone(),
            ..InMemoryCatalog::default()
        }
        .with_table("orders", vec![remote_column("D", TypeCode::Date, 0, "DATE")]);
        let session = open(&configuration("GENERIC")).unwrap();

        let schema = session.refresh(&catalog, None).await.unwrap();

        assert_eq!(schema.tables.len(), 1);
        assert_eq!(schema.tables[0].name, "ORDERS");
        assert_eq!(AdapterSession::stored_adapter_notes(&schema).unwrap(), notes);
    }
}
