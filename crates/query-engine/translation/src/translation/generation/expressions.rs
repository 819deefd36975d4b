//! Columns, literals and predicates.

use query_engine_metadata::metadata::{ColumnAdapterNotes, DataType, IntervalType};
use query_engine_sql::sql::ast::{Column, Expression, Literal, Predicate};
use query_engine_sql::sql::string::SQL;

use super::{Generator, Placement};
use crate::translation::dialect::{LiteralTemplates, RegexpLikeStyle};
use crate::translation::error::TranslationError;

impl Generator<'_> {
    pub(super) fn expression(
        &self,
        expression: &Expression,
        placement: Placement,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        match expression {
            Expression::Column(column) => self.column(column, placement, sql),
            Expression::Literal(literal) => self.literal(literal, placement, sql),
            Expression::Predicate(predicate) => self.predicate(predicate, sql),
            Expression::Function(function) => self.function(function, placement, sql),
        }
    }

    /// Render an expression on its own, for templates that place arguments out of order.
    pub(super) fn render(&self, expression: &Expression) -> Result<String, TranslationError> {
        let mut sql = SQL::new();
        self.expression(expression, Placement::Nested, &mut sql)?;
        Ok(sql.into_string())
    }

    pub(super) fn column(
        &self,
        column: &Column,
        placement: Placement,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        let mut reference = String::new();
        if let Some(table_alias) = &column.table_alias {
            reference.push_str(&self.dialect.quote_identifier(table_alias)?);
            reference.push('.');
        }
        reference.push_str(&self.dialect.quote_identifier(column.name())?);

        let projection = match placement {
            Placement::SelectList => self.column_projection(column, &reference)?,
            Placement::Nested => None,
        };
        sql.append_syntax(projection.as_deref().unwrap_or(&reference));
        Ok(())
    }

    /// How the dialect projects a column in a select list, or `None` when the column is read as
    /// it is. Columns without adapter notes are never cast.
    pub(super) fn column_projection(
        &self,
        column: &Column,
        reference: &str,
    ) -> Result<Option<String>, TranslationError> {
        let rules = &self.dialect.definition().projection_rules;
        if rules.is_empty() || column.metadata.adapter_notes.is_empty() {
            return Ok(None);
        }
        let notes = ColumnAdapterNotes::from_json(&column.metadata.adapter_notes).map_err(
            |source| TranslationError::MalformedColumnAdapterNotes {
                column: column.name().to_string(),
                source,
            },
        )?;
        Ok(rules
            .iter()
            .filter(|rule| rule.matcher.matches(&notes))
            .find_map(|rule| {
                rule.cast.apply(
                    reference,
                    &notes,
                    &column.metadata.data_type,
                    self.dialect.type_mapper().numeric_override(),
                )
            }))
    }

    fn literal(
        &self,
        literal: &Literal,
        placement: Placement,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        let templates = &self.dialect.definition().literal_templates;
        match literal {
            Literal::Null => sql.append_syntax("NULL"),
            Literal::Bool { value } => sql.append_syntax(if *value { "true" } else { "false" }),
            Literal::String { value } => sql.append_syntax(&self.dialect.string_literal(value)?),
            Literal::ExactNumeric { value } => {
                self.numeric_literal(value, placement, sql);
            }
            Literal::Double { value } => {
                if !value.is_finite() {
                    return Err(TranslationError::NonFiniteDouble(*value));
                }
                self.numeric_literal(&format!("{value:?}"), placement, sql);
            }
            Literal::Date { value } => {
                let value = self.dialect.string_literal(value)?;
                sql.append_syntax(&LiteralTemplates::fill(templates.date, &value, 0, 0));
            }
            Literal::Timestamp { value } | Literal::TimestampUtc { value } => {
                let value = self.dialect.string_literal(value)?;
                sql.append_syntax(&LiteralTemplates::fill(templates.timestamp, &value, 0, 0));
            }
            Literal::Interval { value, data_type } => {
                let DataType::Interval {
                    interval_type,
                    precision,
                    fraction,
                } = data_type
                else {
                    return Err(TranslationError::IntervalLiteralType {
                        value: value.clone(),
                        data_type: data_type.to_string(),
                    });
                };
                let template = match interval_type {
                    IntervalType::YearToMonth => templates.interval_year_to_month,
                    IntervalType::DayToSecond => templates.interval_day_to_second,
                };
                let value = self.dialect.string_literal(value)?;
                sql.append_syntax(&LiteralTemplates::fill(
                    template, &value, *precision, *fraction,
                ));
            }
        }
        Ok(())
    }

    fn numeric_literal(&self, value: &str, placement: Placement, sql: &mut SQL) {
        if placement == Placement::SelectList
            && self.dialect.definition().select_list_casts.numeric_literals_to_char
        {
            sql.append_syntax("TO_CHAR(");
            sql.append_syntax(value);
            sql.append_syntax(")");
        } else {
            sql.append_syntax(value);
        }
    }

    fn predicate(&self, predicate: &Predicate, sql: &mut SQL) -> Result<(), TranslationError> {
        match predicate {
            Predicate::And { operands } => self.junction(operands, " AND ", "AND", sql),
            Predicate::Or { operands } => self.junction(operands, " OR ", "OR", sql),
            Predicate::Not { operand } => {
                sql.append_syntax("NOT (");
                self.expression(operand, Placement::Nested, sql)?;
                sql.append_syntax(")");
                Ok(())
            }
            Predicate::Equal { left, right } => self.comparison(left, " = ", right, sql),
            Predicate::NotEqual { left, right } => self.comparison(left, " <> ", right, sql),
            Predicate::Less { left, right } => self.comparison(left, " < ", right, sql),
            Predicate::LessEqual { left, right } => self.comparison(left, " <= ", right, sql),
            Predicate::Between {
                expression,
                lower,
                upper,
            } => {
                self.expression(expression, Placement::Nested, sql)?;
                sql.append_syntax(" BETWEEN ");
                self.expression(lower, Placement::Nested, sql)?;
                sql.append_syntax(" AND ");
                self.expression(upper, Placement::Nested, sql)
            }
            Predicate::Like {
                expression,
                pattern,
                escape,
            } => {
                self.comparison(expression, " LIKE ", pattern, sql)?;
                if let Some(escape) = escape {
                    sql.append_syntax(" ESCAPE ");
                    self.expression(escape, Placement::Nested, sql)?;
                }
                Ok(())
            }
            Predicate::LikeRegexp {
                expression,
                pattern,
            } => match self.dialect.definition().regexp_like {
                RegexpLikeStyle::Infix => self.comparison(expression, " REGEXP_LIKE ", pattern, sql),
                RegexpLikeStyle::Function => {
                    sql.append_syntax("REGEXP_LIKE(");
                    self.comparison(expression, ", ", pattern, sql)?;
                    sql.append_syntax(")");
                    Ok(())
                }
                RegexpLikeStyle::Regexp => self.comparison(expression, " REGEXP ", pattern, sql),
            },
            Predicate::IsNull { expression } => {
                self.expression(expression, Placement::Nested, sql)?;
                sql.append_syntax(" IS NULL");
                Ok(())
            }
            Predicate::IsNotNull { expression } => {
                self.expression(expression, Placement::Nested, sql)?;
                sql.append_syntax(" IS NOT NULL");
                Ok(())
            }
            Predicate::InConstList {
                expression,
                arguments,
            } => {
                if arguments.is_empty() {
                    return Err(TranslationError::EmptyList("IN list"));
                }
                self.expression(expression, Placement::Nested, sql)?;
                sql.append_syntax(" IN (");
                self.comma_separated(arguments, sql, |argument, sql| {
                    self.expression(argument, Placement::Nested, sql)
                })?;
                sql.append_syntax(")");
                Ok(())
            }
        }
    }

    /// `(a AND b AND c)`: one pair of parentheses around the whole list.
    fn junction(
        &self,
        operands: &[Expression],
        separator: &str,
        name: &'static str,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        if operands.is_empty() {
            return Err(TranslationError::EmptyList(name));
        }
        sql.append_syntax("(");
        for (index, operand) in operands.iter().enumerate() {
            self.expression(operand, Placement::Nested, sql)?;
            if index < (operands.len() - 1) {
                sql.append_syntax(separator);
            }
        }
        sql.append_syntax(")");
        Ok(())
    }

    fn comparison(
        &self,
        left: &Expression,
        operator: &str,
        right: &Expression,
        sql: &mut SQL,
    ) -> Result<(), TranslationError> {
        self.expression(left, Placement::Nested, sql)?;
        sql.append_syntax(operator);
        self.expression(right, Placement::Nested, sql)
    }
}

#[cfg(test)]
mod tests {
    use query_engine_metadata::metadata::{
        ColumnAdapterNotes, ColumnMetadata, DataType, TableMetadata, TypeCode,
    };
    use query_engine_sql::sql::ast::{Expression, Literal, Predicate, SelectList};
    use query_engine_sql::sql::helpers;
    use similar_asserts::assert_eq;

    use crate::translation::dialect::{
        Dialect, DialectContext, DialectDefinition, DialectRegistry, LiteralTemplates,
    };
    use crate::translation::error::TranslationError;
    use crate::translation::generation::generate;

    fn where_clause(dialect: &str, predicate: Expression) -> Result<String, TranslationError> {
        let context = DialectContext {
            schema_name: Some("S".to_string()),
            ..DialectContext::default()
        };
        let dialect = DialectRegistry::with_builtin_dialects()
            .resolve(dialect, &context)
            .unwrap();
        let mut select = helpers::star_select(helpers::table(TableMetadata::new(
            "T",
            vec![ColumnMetadata::new("A", DataType::decimal(10, 0))],
        )));
        select.where_ = Some(predicate);
        generate(&select, &dialect)
    }

    fn a() -> Expression {
        helpers::column(0, ColumnMetadata::new("A", DataType::decimal(10, 0)))
    }

    fn literal(literal: Literal) -> Expression {
        Expression::Literal(literal)
    }

    #[test]
    fn junctions_share_one_pair_of_parentheses() {
        let predicate = helpers::and(vec![
            helpers::equal(a(), helpers::exact_numeric("1")),
            helpers::or(vec![helpers::is_null(a()), helpers::less(a(), helpers::exact_numeric("0"))]),
        ]);
        assert_eq!(
            where_clause("EXASOL", predicate).unwrap(),
            "SELECT * FROM \"S\".\"T\" WHERE (\"A\" = 1 AND (\"A\" IS NULL OR \"A\" < 0))"
        );
    }

    #[test]
    fn fixed_predicate_templates() {
        let cases = [
            (
                Predicate::NotEqual {
                    left: Box::new(a()),
                    right: Box::new(helpers::exact_numeric("2")),
                },
                "\"A\" <> 2",
            ),
            (
                Predicate::Between {
                    expression: Box::new(a()),
                    lower: Box::new(helpers::exact_numeric("1")),
                    upper: Box::new(helpers::exact_numeric("9")),
                },
                "\"A\" BETWEEN 1 AND 9",
            ),
            (
                Predicate::Like {
                    expression: Box::new(a()),
                    pattern: Box::new(helpers::string_literal("x%")),
                    escape: Some(Box::new(helpers::string_literal("\\"))),
                },
                "\"A\" LIKE 'x%' ESCAPE '\\'",
            ),
            (
                Predicate::InConstList {
                    expression: Box::new(a()),
                    arguments: vec![helpers::exact_numeric("1"), helpers::exact_numeric("2")],
                },
                "\"A\" IN (1, 2)",
            ),
            (
                Predicate::IsNotNull {
                    expression: Box::new(a()),
                },
                "\"A\" IS NOT NULL",
            ),
            (
                Predicate::LikeRegexp {
                    expression: Box::new(a()),
                    pattern: Box::new(helpers::string_literal("^a")),
                },
                "\"A\" REGEXP_LIKE '^a'",
            ),
        ];
        for (predicate, expected) in cases {
            assert_eq!(
                where_clause("EXASOL", Expression::Predicate(predicate)).unwrap(),
                format!("SELECT * FROM \"S\".\"T\" WHERE {expected}")
            );
        }
    }

    #[test]
    fn oracle_calls_regexp_like_as_a_function() {
        let predicate = Expression::Predicate(Predicate::LikeRegexp {
            expression: Box::new(a()),
            pattern: Box::new(helpers::string_literal("^a")),
        });
        assert_eq!(
            where_clause("ORACLE", predicate).unwrap(),
            "SELECT * FROM \"S\".\"T\" WHERE REGEXP_LIKE(\"A\", '^a')"
        );
    }

    #[test]
    fn literal_templates() {
        let predicate = helpers::and(vec![
            helpers::equal(a(), literal(Literal::Date {
                value: "2024-01-31".to_string(),
            })),
            helpers::equal(a(), literal(Literal::TimestampUtc {
                value: "2024-01-31 10:00:00.000".to_string(),
            })),
            helpers::equal(a(), literal(Literal::Interval {
                value: "+5-3".to_string(),
                data_type: DataType::interval_year_to_month(2),
            })),
            helpers::equal(a(), literal(Literal::Interval {
                value: "+2 12:50:10.123".to_string(),
                data_type: DataType::interval_day_to_second(2, 3),
            })),
            helpers::equal(a(), helpers::double(1.5)),
            helpers::equal(a(), helpers::null()),
            helpers::bool_literal(false),
        ]);
        assert_eq!(
            where_clause("EXASOL", predicate).unwrap(),
            "SELECT * FROM \"S\".\"T\" WHERE (\"A\" = DATE '2024-01-31' AND \"A\" = TIMESTAMP '2024-01-31 10:00:00.000' AND \"A\" = INTERVAL '+5-3' YEAR (2) TO MONTH AND \"A\" = INTERVAL '+2 12:50:10.123' DAY (2) TO SECOND (3) AND \"A\" = 1.5 AND \"A\" = NULL AND false)"
        );
    }

    #[test]
    fn interval_literals_need_an_interval_type() {
        let predicate = helpers::equal(
            a(),
            literal(Literal::Interval {
                value: "5".to_string(),
                data_type: DataType::Date,
            }),
        );
        assert!(matches!(
            where_clause("EXASOL", predicate),
            Err(TranslationError::IntervalLiteralType { .. })
        ));
    }

    #[test]
    fn empty_in_lists_are_rejected() {
        let predicate = Expression::Predicate(Predicate::InConstList {
            expression: Box::new(a()),
            arguments: vec![],
        });
        assert!(matches!(
            where_clause("EXASOL", predicate),
            Err(TranslationError::EmptyList(_))
        ));
    }

    #[test]
    fn oracle_projects_text_and_literals_in_the_select_list() {
        let context = DialectContext {
            schema_name: Some("S".to_string()),
            ..DialectContext::default()
        };
        let dialect = DialectRegistry::with_builtin_dialects()
            .resolve("ORACLE", &context)
            .unwrap();
        let created = ColumnMetadata::new("CREATED", DataType::timestamp(false)).with_adapter_notes(
            ColumnAdapterNotes::new(TypeCode::Timestamp, "TIMESTAMP(6)")
                .to_json()
                .unwrap(),
        );
        let select = helpers::simple_select(
            SelectList::Expressions {
                expressions: vec![
                    helpers::column(0, created.clone()),
                    helpers::exact_numeric("7"),
                ],
            },
            helpers::table(TableMetadata::new("T", vec![created.clone()])),
        );
        let mut filtered = select.clone();
        filtered.where_ = Some(helpers::is_null(helpers::column(0, created)));
        assert_eq!(
            generate(&select, &dialect).unwrap(),
            "SELECT TO_CHAR(\"CREATED\"), TO_CHAR(7) FROM \"S\".\"T\""
        );
        assert_eq!(
            generate(&filtered, &dialect).unwrap(),
            "SELECT TO_CHAR(\"CREATED\"), TO_CHAR(7) FROM \"S\".\"T\" WHERE \"CREATED\" IS NULL"
        );
    }

    #[test]
    fn non_finite_doubles_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let predicate = helpers::equal(a(), helpers::double(value));
            assert!(matches!(
                where_clause("EXASOL", predicate),
                Err(TranslationError::NonFiniteDouble(_))
            ));
        }
    }

    #[test]
    fn date_and_timestamp_values_are_escaped() {
        let predicate = helpers::and(vec![
            helpers::equal(a(), literal(Literal::Date {
                value: "2024-01-31' OR '1'='1".to_string(),
            })),
            helpers::equal(a(), literal(Literal::Timestamp {
                value: "2024-01-31 10:00:00\\'".to_string(),
            })),
        ]);
        assert_eq!(
            where_clause("MYSQL", predicate).unwrap(),
            "SELECT * FROM `T` WHERE (`A` = DATE '2024-01-31'' OR ''1''=''1' AND `A` = TIMESTAMP '2024-01-31 10:00:00\\\\''')"
        );
    }

    #[test]
    fn dialects_can_respell_typed_literals() {
        let mut definition = DialectDefinition::new("TESTING");
        definition.literal_templates = LiteralTemplates {
            date: "CAST({value} AS DATE)",
            timestamp: "CONVERT(DATETIME2, {value}, 121)",
            interval_year_to_month: "INTERVAL {value} YEAR({precision}) TO MONTH",
            ..LiteralTemplates::default()
        };
        let context = DialectContext {
            schema_name: Some("S".to_string()),
            ..DialectContext::default()
        };
        let dialect = Dialect::new(definition, &context).unwrap();
        let mut select = helpers::star_select(helpers::table(TableMetadata::new(
            "T",
            vec![ColumnMetadata::new("A", DataType::decimal(10, 0))],
        )));
        select.where_ = Some(helpers::and(vec![
            helpers::equal(a(), literal(Literal::Date {
                value: "2024-01-31".to_string(),
            })),
            helpers::equal(a(), literal(Literal::Timestamp {
                value: "2024-01-31 10:00:00.000".to_string(),
            })),
            helpers::equal(a(), literal(Literal::Interval {
                value: "+5-3".to_string(),
                data_type: DataType::interval_year_to_month(2),
            })),
            helpers::equal(a(), literal(Literal::Interval {
                value: "+2 12:50:10.123".to_string(),
                data_type: DataType::interval_day_to_second(2, 3),
            })),
        ]));
        assert_eq!(
            generate(&select, &dialect).unwrap(),
            "SELECT * FROM \"S\".\"T\" WHERE (\"A\" = CAST('2024-01-31' AS DATE) AND \"A\" = CONVERT(DATETIME2, '2024-01-31 10:00:00.000', 121) AND \"A\" = INTERVAL '+5-3' YEAR(2) TO MONTH AND \"A\" = INTERVAL '+2 12:50:10.123' DAY (2) TO SECOND (3))"
        );
    }

    #[test]
    fn impala_matches_regular_expressions_with_regexp() {
        let predicate = Expression::Predicate(Predicate::LikeRegexp {
            expression: Box::new(a()),
            pattern: Box::new(helpers::string_literal("^a")),
        });
        assert_eq!(
            where_clause("IMPALA", predicate).unwrap(),
            "SELECT * FROM `S`.`T` WHERE `A` REGEXP '^a'"
        );
    }
}
