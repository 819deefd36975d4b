//! Function calls and the special forms with their own syntax.

use query_engine_metadata::metadata::DataType;
use query_engine_sql::sql::ast::{
    AggregateFunction, Expression, Function, OrderBy, ScalarFunction,
};
use query_engine_sql::sql::string::SQL;

use super::{Generator, Placement};
use crate::translation::dialect::GroupConcatStyle;
use crate::translation::error::TranslationError;

const DEFAULT_SEPARATOR: &str = ",";

pub(super) fn argument_count(
    function: ScalarFunction,
    expected: &'static str,
    arguments: usize,
) -> TranslationError {
    TranslationError::ArgumentCount {
        function: function.name().to_string(),
        expected,
        actual: arguments,
    }
}

impl Generator<'_> {
    pub(super) fn function(
        &self,
        function: &Function,
        placement: Placement,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        let casts = &self.dialect.definition().select_list_casts;
        let cast_to = match (placement, function) {
            (Placement::SelectList, Function::Scalar { function, .. })
                if casts.float_scalars.contains(function) =>
            {
                Some("FLOAT")
            }
            (Placement::SelectList, Function::Aggregate { function, .. })
                if casts.float_aggregates.contains(function) =>
            {
                Some("FLOAT")
            }
            (Placement::SelectList, Function::Aggregate { function, .. })
                if casts.double_aggregates.contains(function) =>
            {
                Some("DOUBLE")
            }
            _ => None,
        };
        if cast_to.is_some() {
            sql.append_syntax("CAST(");
        }

        match function {
            Function::Scalar {
                function,
                arguments,
            } => self.scalar(*function, arguments, sql)?,
            Function::Aggregate {
                function,
                arguments,
                distinct,
            } => self.aggregate(*function, arguments, *distinct, sql)?,
            Function::GroupConcat {
                argument,
                distinct,
                order_by,
                separator,
            } => self.group_concat(argument, *distinct, order_by.as_ref(), separator.as_deref(), sql)?,
            Function::Case {
                basis,
                arguments,
                results,
            } => self.case(basis.as_deref(), arguments, results, sql)?,
            Function::Cast {
                expression,
                data_type,
            } => self.cast(expression, data_type, sql)?,
            Function::Extract { field, expression } => {
                sql.append_syntax("EXTRACT(");
                sql.append_syntax(field);
                sql.append_syntax(" FROM ");
                self.expression(expression, Placement::Nested, sql)?;
                sql.append_syntax(")");
            }
        }

        if let Some(data_type) = cast_to {
            sql.append_syntax(" AS ");
            sql.append_syntax(data_type);
            sql.append_syntax(")");
        }
        Ok(())
    }

    /// Resolution order: dialect rewrite, direct alias, infix operator, prefix operator, then the
    /// canonical name.
    fn scalar(
        &self,
        function: ScalarFunction,
        arguments: &[Expression],
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        if let Some(rewritten) = self.rewrite_scalar(function, arguments)? {
            sql.append_syntax(&rewritten);
            return Ok(());
        }

        let definition = self.dialect.definition();
        let name = if let Some(alias) = definition.scalar_aliases.get(&function) {
            alias.as_str()
        } else if let Some(operator) = definition.infix_aliases.get(&function) {
            let [left, right] = arguments else {
                return Err(argument_count(function, "2", arguments.len()));
            };
            sql.append_syntax("(");
            self.expression(left, Placement::Nested, sql)?;
            sql.append_syntax(" ");
            sql.append_syntax(operator);
            sql.append_syntax(" ");
            self.expression(right, Placement::Nested, sql)?;
            sql.append_syntax(")");
            return Ok(());
        } else if let Some(operator) = definition.prefix_aliases.get(&function) {
            let [operand] = arguments else {
                return Err(argument_count(function, "1", arguments.len()));
            };
            sql.append_syntax("(");
            sql.append_syntax(operator);
            self.expression(operand, Placement::Nested, sql)?;
            sql.append_syntax(")");
            return Ok(());
        } else {
            function.name()
        };

        sql.append_syntax(name);
        if arguments.is_empty() && definition.omit_parentheses.contains(&function) {
            return Ok(());
        }
        self.arguments(arguments, sql)
    }

    fn arguments(&self, arguments: &[Expression], sql: &mut SQL) -> Result<(), TranslationError> {
        sql.append_syntax("(");
        self.comma_separated(arguments, sql, |argument, sql| {
            self.expression(argument, Placement::Nested, sql)
        })?;
        sql.append_syntax(")");
        Ok(())
    }

    fn aggregate(
        &self,
        function: AggregateFunction,
        arguments: &[Expression],
        distinct: bool,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        let name = self
            .dialect
            .definition()
            .aggregate_aliases
            .get(&function)
            .map_or(function.name(), String::as_str);
        sql.append_syntax(name);
        sql.append_syntax("(");
        if distinct {
            sql.append_syntax("DISTINCT ");
        }
        if arguments.is_empty() && function == AggregateFunction::Count {
            sql.append_syntax("*");
        } else {
            self.comma_separated(arguments, sql, |argument, sql| {
                self.expression(argument, Placement::Nested, sql)
            })?;
        }
        sql.append_syntax(")");
        Ok(())
    }

    fn group_concat(
        &self,
        argument: &Expression,
        distinct: bool,
        order_by: Option<&OrderBy>,
        separator: Option<&str>,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        match self.dialect.definition().group_concat {
            GroupConcatStyle::Standard => {
                sql.append_syntax("GROUP_CONCAT(");
                if distinct {
                    sql.append_syntax("DISTINCT ");
                }
                self.expression(argument, Placement::Nested, sql)?;
                if let Some(order_by) = order_by {
                    sql.append_syntax(" ");
                    self.order_by(order_by, sql)?;
                }
                if let Some(separator) = separator {
                    sql.append_syntax(" SEPARATOR ");
                    sql.append_syntax(&self.dialect.string_literal(separator)?);
                }
                sql.append_syntax(")");
            }
            GroupConcatStyle::CastToString => {
                sql.append_syntax("GROUP_CONCAT(CAST(");
                self.expression(argument, Placement::Nested, sql)?;
                sql.append_syntax(" AS STRING)");
                if let Some(separator) = separator {
                    sql.append_syntax(", ");
                    sql.append_syntax(&self.dialect.string_literal(separator)?);
                }
                sql.append_syntax(")");
            }
            GroupConcatStyle::StringAgg => {
                sql.append_syntax("STRING_AGG(");
                self.expression(argument, Placement::Nested, sql)?;
                sql.append_syntax(", ");
                sql.append_syntax(
                    &self
                        .dialect
                        .string_literal(separator.unwrap_or(DEFAULT_SEPARATOR))?,
                );
                sql.append_syntax(") ");
            }
            GroupConcatStyle::ListAgg { null_order } => {
                sql.append_syntax("LISTAGG(");
                self.expression(argument, Placement::Nested, sql)?;
                sql.append_syntax(", ");
                sql.append_syntax(
                    &self
                        .dialect
                        .string_literal(separator.unwrap_or(DEFAULT_SEPARATOR))?,
                );
                sql.append_syntax(") WITHIN GROUP(ORDER BY ");
                match order_by.filter(|order_by| !order_by.elements.is_empty()) {
                    Some(order_by) => {
                        self.comma_separated(&order_by.elements, sql, |element, sql| {
                            self.expression(&element.expression, Placement::Nested, sql)?;
                            if !element.ascending {
                                sql.append_syntax(" DESC");
                            }
                            if null_order && !element.nulls_last {
                                sql.append_syntax(" NULLS FIRST");
                            }
                            Ok(())
                        })?;
                    }
                    None => self.expression(argument, Placement::Nested, sql)?,
                }
                sql.append_syntax(")");
            }
        }
        Ok(())
    }

    fn case(
        &self,
        basis: Option<&Expression>,
        arguments: &[Expression],
        results: &[Expression],
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        if results.len() != arguments.len() && results.len() != arguments.len() + 1 {
            return Err(TranslationError::CaseBranches {
                arguments: arguments.len(),
                results: results.len(),
            });
        }
        sql.append_syntax("CASE");
        if let Some(basis) = basis {
            sql.append_syntax(" ");
            self.expression(basis, Placement::Nested, sql)?;
        }
        for (argument, result) in arguments.iter().zip(results) {
            sql.append_syntax(" WHEN ");
            self.expression(argument, Placement::Nested, sql)?;
            sql.append_syntax(" THEN ");
            self.expression(result, Placement::Nested, sql)?;
        }
        if results.len() > arguments.len() {
            if let Some(otherwise) = results.last() {
                sql.append_syntax(" ELSE ");
                self.expression(otherwise, Placement::Nested, sql)?;
            }
        }
        sql.append_syntax(" END");
        Ok(())
    }

    fn cast(
        &self,
        expression: &Expression,
        data_type: &DataType,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        sql.append_syntax("CAST(");
        self.expression(expression, Placement::Nested, sql)?;
        sql.append_syntax(" AS ");
        sql.append_display(data_type);
        sql.append_syntax(")");
        Ok(())
    }
}
