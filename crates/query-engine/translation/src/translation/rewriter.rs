//! Wrap the generated SQL into the import statement the local database runs.

use pushdown_configuration::ImportMode;
use query_engine_metadata::metadata::{RemoteTypeDescriptor, ResultSetProbe};
use query_engine_sql::sql::ast::Select;
use query_engine_sql::sql::string::{quote_string_literal, SQL};
use tracing::{info_span, Instrument};

use super::connection::{credentials, ConnectionDefinition};
use super::dialect::Dialect;
use super::error::{ConnectionDefinitionError, RewriteError, UnsupportedColumnsError};
use super::generation::generate;
use super::type_mapper::TypeMapper;

/// Everything besides the query that shapes the import statement.
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    pub dialect: &'a Dialect,
    pub connection: &'a ConnectionDefinition,
    pub import_mode: &'a ImportMode,
}

/// Generate the push-down SQL and compose the statement that imports its result.
///
/// Only the `JDBC` form needs the result columns, so only it probes the remote database.
pub async fn rewrite(
    select: &Select,
    context: RewriteContext<'_>,
    probe: &dyn ResultSetProbe,
) -> Result<String, RewriteError> {
    let pushdown_sql = generate(select, context.dialect)?;

    let mut sql = SQL::new();
    match context.import_mode {
        ImportMode::Local => sql.append_syntax(&pushdown_sql),
        ImportMode::FromExa {
            exa_connection_string,
        } => {
            let (username, password) = context.connection.credentials().ok_or(
                ConnectionDefinitionError::ImportRequirement {
                    source_kind: "EXA",
                    requirement: "a user and a password",
                },
            )?;
            sql.append_syntax("IMPORT FROM EXA AT ");
            sql.append_syntax(&quote_string_literal(exa_connection_string));
            sql.append_syntax(&credentials(username, password));
            statement(&pushdown_sql, &mut sql);
        }
        ImportMode::FromOra {
            ora_connection_name,
        } => {
            sql.append_syntax("IMPORT FROM ORA AT ");
            sql.append_syntax(ora_connection_name);
            statement(&pushdown_sql, &mut sql);
        }
        ImportMode::Jdbc => {
            let descriptors = probe
                .describe(&pushdown_sql)
                .instrument(info_span!("Describe result columns"))
                .await?;
            sql.append_syntax("IMPORT INTO (");
            sql.append_syntax(&column_description(
                context.dialect.type_mapper(),
                &descriptors,
            )?);
            sql.append_syntax(") FROM JDBC ");
            sql.append_syntax(&context.connection.clause());
            statement(&pushdown_sql, &mut sql);
        }
    }

    let sql = sql.into_string();
    tracing::debug!(dialect = context.dialect.name(), statement = %sql, "Rewritten push-down query");
    Ok(sql)
}

fn statement(pushdown_sql: &str, sql: &mut SQL) {
    sql.append_syntax(" STATEMENT ");
    sql.append_syntax(&quote_string_literal(pushdown_sql));
}

/// `c1 <TYPE>, c2 <TYPE>, ...` for the result columns of the push-down query.
pub fn column_description(
    type_mapper: &TypeMapper,
    descriptors: &[RemoteTypeDescriptor],
) -> Result<String, UnsupportedColumnsError> {
    let data_types: Vec<_> = descriptors
        .iter()
        .map(|descriptor| type_mapper.map(descriptor))
        .collect();

    let positions: Vec<usize> = data_types
        .iter()
        .enumerate()
        .filter(|(_, data_type)| !data_type.is_supported())
        .map(|(index, _)| index + 1)
        .collect();
    if !positions.is_empty() {
        return Err(UnsupportedColumnsError { positions });
    }

    Ok(data_types
        .iter()
        .enumerate()
        .map(|(index, data_type)| format!("c{} {data_type}", index + 1))
        .collect::<Vec<_>>()
        .join(", "))
}
