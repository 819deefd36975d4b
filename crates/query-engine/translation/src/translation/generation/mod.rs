//! Render a push-down query tree as SQL text for a dialect.
//!
//! A single visitor serves every dialect. Where databases differ, it asks the `Dialect` which
//! strategy to apply. What a node needs to know about its surroundings (is it directly in the
//! select list, must select list items be aliased) is passed down during the traversal.

mod expressions;
mod functions;
mod rewrites;
mod select;

use query_engine_sql::sql::ast::Select;
use query_engine_sql::sql::string::SQL;

use super::dialect::Dialect;
use super::error::TranslationError;

/// Translate a query tree into the SQL text of the given dialect.
///
/// Generation either produces the complete statement or fails; no partial text is returned.
pub fn generate(select: &Select, dialect: &Dialect) -> Result<String, TranslationError> {
    let mut sql = SQL::new();
    Generator::new(dialect).statement(select, &mut sql)?;
    let sql = sql.into_string();
    tracing::debug!(dialect = dialect.name(), sql = %sql, "Generated push-down SQL");
    Ok(sql)
}

/// Where an expression sits. Some dialects render expressions directly in the select list
/// differently from the same expressions anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    SelectList,
    Nested,
}

/// The state shared by one traversal.
pub(crate) struct Generator<'a> {
    dialect: &'a Dialect,
}

impl<'a> Generator<'a> {
    pub(crate) fn new(dialect: &'a Dialect) -> Self {
        Generator { dialect }
    }

    /// Render `items` separated by `", "`.
    fn comma_separated<T>(
        &self,
        items: &[T],
        sql: &mut SQL,
        mut render: impl FnMut(&T, &mut SQL) -> Result<(), TranslationError>,
    ) -> Result<(), TranslationError> {
        for (index, item) in items.iter().enumerate() {
            render(item, sql)?;
            if index < (items.len() - 1) {
                sql.append_syntax(", ");
            }
        }
        Ok(())
    }
}
