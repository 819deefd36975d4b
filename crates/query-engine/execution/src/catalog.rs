//! The remote catalog as the metadata readers see it.

use async_trait::async_trait;
use query_engine_metadata::metadata::{
    CatalogSource, RemoteAccessError, RemoteColumn, RemoteTable, SchemaAdapterNotes, TableKind,
};
use serde::Deserialize;
use sqlx::Row;

use crate::columns::read_columns;
use crate::PostgresRemote;

/// One JSON array of relations. `$1` is the schema, the current one when null; `$2` optionally
/// restricts the database.
const TABLES_QUERY: &str = "
    select coalesce(
        json_agg(
            json_build_object(
                'name', t.table_name,
                'tableType', t.table_type,
                'comment', obj_description(
                    format('%I.%I', t.table_schema, t.table_name)::regclass,
                    'pg_class'
                )
            )
            order by t.table_name
        ),
        '[]'::json
    )
    from information_schema.tables t
    where t.table_schema = coalesce($1::text, current_schema()::text)
      and ($2::text is null or t.table_catalog = $2)
";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableRow {
    name: String,
    table_type: String,
    comment: Option<String>,
}

impl From<TableRow> for RemoteTable {
    fn from(row: TableRow) -> Self {
        RemoteTable {
            kind: TableKind::from_catalog(&row.table_type),
            name: row.name,
            comment: row.comment,
        }
    }
}

/// What the PostgreSQL JDBC driver reports about identifiers and null ordering.
pub fn postgresql_schema_properties() -> SchemaAdapterNotes {
    SchemaAdapterNotes {
        catalog_separator: ".".to_string(),
        identifier_quote_string: "\"".to_string(),
        stores_lower_case_identifiers: true,
        stores_upper_case_identifiers: false,
        stores_mixed_case_identifiers: false,
        supports_mixed_case_identifiers: false,
        stores_lower_case_quoted_identifiers: false,
        stores_upper_case_quoted_identifiers: false,
        stores_mixed_case_quoted_identifiers: false,
        supports_mixed_case_quoted_identifiers: true,
        nulls_are_sorted_at_end: false,
        nulls_are_sorted_at_start: false,
        nulls_are_sorted_high: true,
        nulls_are_sorted_low: false,
    }
}

#[async_trait]
impl CatalogSource for PostgresRemote {
    async fn tables(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
    ) -> Result<Vec<RemoteTable>, RemoteAccessError> {
        let context = || "unable to list the remote tables".to_string();
        let row = sqlx::query(TABLES_QUERY)
            .bind(schema)
            .bind(catalog)
            .fetch_one(self.pool())
            .await
            .map_err(|error| RemoteAccessError::new(context(), error))?;
        let value: serde_json::Value = row
            .try_get(0)
            .map_err(|error| RemoteAccessError::new(context(), error))?;
        let rows: Vec<TableRow> = serde_json::from_value(value)
            .map_err(|error| RemoteAccessError::new(context(), error))?;
        tracing::debug!(tables = rows.len(), "Listed remote tables");
        Ok(rows.into_iter().map(RemoteTable::from).collect())
    }

    async fn columns(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<RemoteColumn>, RemoteAccessError> {
        let mut connection = self.pool().acquire().await.map_err(|error| {
            RemoteAccessError::new("unable to acquire a remote connection", error)
        })?;
        read_columns(&mut connection, catalog, schema, table).await
    }

    async fn schema_properties(&self) -> Result<SchemaAdapterNotes, RemoteAccessError> {
        Ok(postgresql_schema_properties())
    }
}
