//! Describe the result columns of a push-down query without running it.
//!
//! The query becomes a temporary view inside a transaction that is always rolled back, so the
//! columns can be read with their declared lengths, precisions and scales.

use async_trait::async_trait;
use query_engine_metadata::metadata::{
    RemoteAccessError, RemoteColumn, RemoteTypeDescriptor, ResultSetProbe,
};
use sqlx::Row;

use crate::columns::read_columns;
use crate::PostgresRemote;

const PROBE_VIEW: &str = "pushdown_probe";

const TEMPORARY_SCHEMA_QUERY: &str =
    "select nspname::text from pg_namespace where oid = pg_my_temp_schema()";

#[async_trait]
impl ResultSetProbe for PostgresRemote {
    async fn describe(&self, query: &str) -> Result<Vec<RemoteTypeDescriptor>, RemoteAccessError> {
        tracing::debug!(query = %query, "Describing push-down query");
        let failed = |error: sqlx::Error| {
            RemoteAccessError::new("unable to describe the push-down query", error)
        };

        let mut transaction = self.pool().begin().await.map_err(failed)?;
        sqlx::query(&format!("create temporary view {PROBE_VIEW} as {query}"))
            .execute(&mut *transaction)
            .await
            .map_err(failed)?;
        let temporary_schema: String = sqlx::query(TEMPORARY_SCHEMA_QUERY)
            .fetch_one(&mut *transaction)
            .await
            .and_then(|row| row.try_get(0))
            .map_err(failed)?;
        let columns = read_columns(
            &mut transaction,
            None,
            Some(&temporary_schema),
            PROBE_VIEW,
        )
        .await?;
        transaction.rollback().await.map_err(failed)?;

        Ok(columns.iter().map(RemoteColumn::type_descriptor).collect())
    }
}
