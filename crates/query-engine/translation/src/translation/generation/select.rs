//! Statements, select lists, FROM clauses and the trailing clauses.

use query_engine_sql::sql::ast::{
    Column, From, Limit, OrderBy, OrderByElement, Select, SelectList, Table,
};
use query_engine_sql::sql::string::SQL;

use super::{Generator, Placement};
use crate::translation::dialect::{LimitStrategy, NullOrdering};
use crate::translation::error::TranslationError;

/// How the statement itself is laid out, as decided by the limit strategy.
#[derive(Debug, Clone, Copy, Default)]
struct Layout {
    top: Option<u64>,
    limit_clause: bool,
    fetch_first: bool,
    /// Suffix every select list item with ` AS c<index>`.
    alias_select_list: bool,
}

impl Generator<'_> {
    pub(super) fn statement(&self, select: &Select, sql: &mut SQL) -> Result<(), TranslationError> {
        match (self.dialect.definition().limit, &select.limit) {
            (LimitStrategy::Standard, _) | (_, None) => self.select(
                select,
                Layout {
                    limit_clause: true,
                    ..Layout::default()
                },
                sql,
            ),
            (LimitStrategy::Top, Some(limit)) => self.select(
                select,
                Layout {
                    top: Some(limit.limit),
                    ..Layout::default()
                },
                sql,
            ),
            (LimitStrategy::RowNum, Some(limit)) => self.rownum_statement(select, *limit, sql),
            (LimitStrategy::FetchFirst, Some(_)) => self.select(
                select,
                Layout {
                    fetch_first: true,
                    ..Layout::default()
                },
                sql,
            ),
        }
    }

    /// The `ROWNUM` filter is evaluated before ORDER BY, so the ordered statement is wrapped. An
    /// offset needs a second level that filters on the numbered rows and projects the aliased
    /// columns, leaving out the row number.
    fn rownum_statement(
        &self,
        select: &Select,
        limit: Limit,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        let upper_bound =
            limit
                .limit
                .checked_add(limit.offset)
                .ok_or(TranslationError::LimitOverflow {
                    limit: limit.limit,
                    offset: limit.offset,
                })?;
        if limit.offset == 0 {
            sql.append_syntax("SELECT LIMIT_SUBSELECT.* FROM ( ");
            self.select(select, Layout::default(), sql)?;
            sql.append_syntax(" ) LIMIT_SUBSELECT WHERE ROWNUM <= ");
            sql.append_display(upper_bound);
            return Ok(());
        }

        let column_count = match &select.select_list {
            SelectList::AnyValue => 1,
            SelectList::Star => select
                .from
                .tables()
                .iter()
                .map(|table| table.metadata.columns.len())
                .sum(),
            SelectList::Expressions { expressions } => expressions.len(),
        };
        sql.append_syntax("SELECT ");
        for index in 0..column_count {
            sql.append_syntax(&format!("c{index}"));
            if index < (column_count - 1) {
                sql.append_syntax(", ");
            }
        }
        sql.append_syntax(" FROM ( SELECT LIMIT_SUBSELECT.*, ROWNUM ROWNUM_SUB FROM ( ");
        self.select(
            select,
            Layout {
                alias_select_list: true,
                ..Layout::default()
            },
            sql,
        )?;
        sql.append_syntax(" ) LIMIT_SUBSELECT WHERE ROWNUM <= ");
        sql.append_display(upper_bound);
        sql.append_syntax(" ) WHERE ROWNUM_SUB > ");
        sql.append_display(limit.offset);
        Ok(())
    }

    fn select(&self, select: &Select, layout: Layout, sql: &mut SQL) -> Result<(), TranslationError> {
        sql.append_syntax("SELECT ");
        if let Some(top) = layout.top {
            sql.append_syntax("TOP ");
            sql.append_display(top);
            sql.append_syntax(" ");
        }
        self.select_list(&select.select_list, &select.from, layout.alias_select_list, sql)?;

        sql.append_syntax(" FROM ");
        self.from(&select.from, sql)?;

        if let Some(where_) = &select.where_ {
            sql.append_syntax(" WHERE ");
            self.expression(where_, Placement::Nested, sql)?;
        }
        if let Some(group_by) = &select.group_by {
            if group_by.expressions.is_empty() {
                return Err(TranslationError::EmptyList("GROUP BY"));
            }
            sql.append_syntax(" GROUP BY ");
            self.comma_separated(&group_by.expressions, sql, |expression, sql| {
                self.expression(expression, Placement::Nested, sql)
            })?;
        }
        if let Some(having) = &select.having {
            sql.append_syntax(" HAVING ");
            self.expression(having, Placement::Nested, sql)?;
        }
        if let Some(order_by) = &select.order_by {
            sql.append_syntax(" ");
            self.order_by(order_by, sql)?;
        }
        if layout.limit_clause {
            if let Some(limit) = &select.limit {
                sql.append_syntax(" ");
                limit_to_sql(*limit, sql);
            }
        }
        if layout.fetch_first {
            if let Some(limit) = &select.limit {
                sql.append_syntax(" ");
                fetch_first_to_sql(*limit, sql);
            }
        }
        Ok(())
    }

    fn select_list(
        &self,
        select_list: &SelectList,
        from: &From,
        alias_select_list: bool,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        match select_list {
            SelectList::AnyValue => {
                sql.append_syntax("1");
                if alias_select_list {
                    sql.append_syntax(" AS c0");
                }
                Ok(())
            }
            SelectList::Star => {
                let columns = star_columns(from);
                if !alias_select_list && !self.star_requires_casts(&columns)? {
                    sql.append_syntax("*");
                    return Ok(());
                }
                self.aliased_items(&columns, alias_select_list, sql, |column, sql| {
                    self.column(column, Placement::SelectList, sql)
                })
            }
            SelectList::Expressions { expressions } => {
                if expressions.is_empty() {
                    return Err(TranslationError::EmptyList("select list"));
                }
                self.aliased_items(expressions, alias_select_list, sql, |expression, sql| {
                    self.expression(expression, Placement::SelectList, sql)
                })
            }
        }
    }

    fn aliased_items<T>(
        &self,
        items: &[T],
        alias_select_list: bool,
        sql: &mut SQL,
        mut render: impl FnMut(&T, &mut SQL) -> Result<(), TranslationError>,
    ) -> Result<(), TranslationError> {
        let mut index = 0;
        self.comma_separated(items, sql, |item, sql| {
            render(item, sql)?;
            if alias_select_list {
                sql.append_syntax(&format!(" AS c{index}"));
            }
            index += 1;
            Ok(())
        })
    }

    fn star_requires_casts(&self, columns: &[Column]) -> Result<bool, TranslationError> {
        for column in columns {
            if self.column_projection(column, "")?.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn from(&self, from: &From, sql: &mut SQL) -> Result<(), TranslationError> {
        match from {
            From::Table(table) => self.table(table, sql),
            From::Join(join) => {
                self.from(&join.left, sql)?;
                sql.append_syntax(" ");
                sql.append_syntax(join.join_type.keyword());
                sql.append_syntax(" JOIN ");
                self.from(&join.right, sql)?;
                sql.append_syntax(" ON ");
                self.expression(&join.condition, Placement::Nested, sql)
            }
        }
    }

    fn table(&self, table: &Table, sql: &mut SQL) -> Result<(), TranslationError> {
        let definition = self.dialect.definition();
        let qualifiers = [
            (definition.catalog_qualified, self.dialect.catalog_name()),
            (definition.schema_qualified, self.dialect.schema_name()),
        ];
        for (enabled, name) in qualifiers {
            if let Some(name) = name.filter(|name| enabled && !name.is_empty()) {
                sql.append_syntax(&self.dialect.quote_identifier(name)?);
                sql.append_syntax(&definition.catalog_separator);
            }
        }
        sql.append_syntax(&self.dialect.quote_identifier(&table.name)?);
        if let Some(alias) = &table.alias {
            sql.append_syntax(" ");
            sql.append_syntax(&self.dialect.quote_identifier(alias)?);
        }
        Ok(())
    }

    pub(super) fn order_by(&self, order_by: &OrderBy, sql: &mut SQL) -> Result<(), TranslationError> {
        if order_by.elements.is_empty() {
            return Err(TranslationError::EmptyList("ORDER BY"));
        }
        sql.append_syntax("ORDER BY ");
        self.comma_separated(&order_by.elements, sql, |element, sql| {
            self.order_by_element(element, sql)
        })
    }

    fn order_by_element(
        &self,
        element: &OrderByElement,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        let explicit_nulls =
            element.nulls_last != self.dialect.nulls_last_by_default(element.ascending);
        let null_ordering = self.dialect.definition().null_ordering;
        if explicit_nulls && null_ordering == NullOrdering::CaseExpression {
            sql.append_syntax("(CASE WHEN ");
            self.expression(&element.expression, Placement::Nested, sql)?;
            if element.nulls_last {
                sql.append_syntax(" IS NULL THEN 1 ELSE 0 END), ");
            } else {
                sql.append_syntax(" IS NULL THEN 0 ELSE 1 END), ");
            }
        }
        self.expression(&element.expression, Placement::Nested, sql)?;
        if !element.ascending {
            sql.append_syntax(" DESC");
        }
        if explicit_nulls && null_ordering == NullOrdering::Keywords {
            if element.nulls_last {
                sql.append_syntax(" NULLS LAST");
            } else {
                sql.append_syntax(" NULLS FIRST");
            }
        }
        Ok(())
    }
}

/// The columns `*` stands for, in FROM clause order.
fn star_columns(from: &From) -> Vec<Column> {
    let mut columns = vec![];
    for table in from.tables() {
        for column in &table.metadata.columns {
            columns.push(Column {
                id: u32::try_from(columns.len()).unwrap_or(u32::MAX),
                table_alias: table.alias.clone(),
                metadata: column.clone(),
            });
        }
    }
    columns
}

fn limit_to_sql(limit: Limit, sql: &mut SQL) {
    sql.append_syntax("LIMIT ");
    sql.append_display(limit.limit);
    if limit.offset > 0 {
        sql.append_syntax(" OFFSET ");
        sql.append_display(limit.offset);
    }
}

fn fetch_first_to_sql(limit: Limit, sql: &mut SQL) {
    if limit.offset > 0 {
        sql.append_syntax("OFFSET ");
        sql.append_display(limit.offset);
        sql.append_syntax(" ROWS ");
    }
    sql.append_syntax("FETCH FIRST ");
    sql.append_display(limit.limit);
    sql.append_syntax(" ROWS ONLY");
}
