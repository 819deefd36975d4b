//! Lookup of dialects by name.

use std::collections::BTreeMap;

use pushdown_configuration::PostgresIdentifierMapping;
use query_engine_metadata::metadata::{DataType, SchemaAdapterNotes};

use super::{
    athena, bigquery, db2, exasol, generic, hive, impala, mysql, oracle, postgresql, redshift,
    saphana, snowflake, sqlserver, sybase, teradata,
};
use super::{Dialect, DialectDefinition};
use crate::translation::error::DialectError;

/// The per-session inputs a dialect definition may depend on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialectContext {
    pub catalog_name: Option<String>,
    pub schema_name: Option<String>,
    /// What the remote driver reported at the last schema scan.
    pub schema_adapter_notes: SchemaAdapterNotes,
    pub postgresql_identifier_mapping: PostgresIdentifierMapping,
    pub numeric_override: Option<DataType>,
}

pub type DialectFactory = fn(&DialectContext) -> DialectDefinition;

/// Dialect factories keyed by upper-case name.
#[derive(Debug, Clone, Default)]
pub struct DialectRegistry {
    factories: BTreeMap<&'static str, DialectFactory>,
}

impl DialectRegistry {
    pub fn empty() -> Self {
        DialectRegistry::default()
    }

    /// A registry holding every built-in dialect.
    pub fn with_builtin_dialects() -> Self {
        let mut registry = DialectRegistry::empty();
        registry.register(athena::NAME, athena::definition);
        registry.register(bigquery::NAME, bigquery::definition);
        registry.register(db2::NAME, db2::definition);
        registry.register(exasol::NAME, exasol::definition);
        registry.register(generic::NAME, generic::definition);
        registry.register(hive::NAME, hive::definition);
        registry.register(impala::NAME, impala::definition);
        registry.register(mysql::NAME, mysql::definition);
        registry.register(oracle::NAME, oracle::definition);
        registry.register(postgresql::NAME, postgresql::definition);
        registry.register(redshift::NAME, redshift::definition);
        registry.register(saphana::NAME, saphana::definition);
        registry.register(snowflake::NAME, snowflake::definition);
        registry.register(sqlserver::NAME, sqlserver::definition);
        registry.register(sybase::NAME, sybase::definition);
        registry.register(teradata::NAME, teradata::definition);
        registry
    }

    /// Register a dialect, replacing any dialect of the same name.
    pub fn register(&mut self, name: &'static str, factory: DialectFactory) {
        self.factories.insert(name, factory);
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Build and validate the dialect with the given name. Names are matched case-insensitively.
    pub fn resolve(&self, name: &str, context: &DialectContext) -> Result<Dialect, DialectError> {
        let factory = self
            .factories
            .get(name.to_uppercase().as_str())
            .ok_or_else(|| DialectError::Unknown {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })?;
        Dialect::new(factory(context), context)
    }
}
