//! IBM DB2.

use query_engine_sql::sql::ast::AggregateFunction;

use super::registry::DialectContext;
use super::{
    capabilities, DialectDefinition, GroupConcatStyle, LimitStrategy, ProjectionCast,
    ProjectionRule, ScalarRewrites, TypeMatcher,
};
use crate::translation::type_mapper::TypeMapping;

pub const NAME: &str = "DB2";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    DialectDefinition {
        limit: LimitStrategy::FetchFirst,
        group_concat: GroupConcatStyle::ListAgg { null_order: false },
        scalar_rewrites: ScalarRewrites::Db2,
        projection_rules: vec![
            ProjectionRule::new(TypeMatcher::TypeName("BLOB"), ProjectionCast::NotSupportedLiteral),
            ProjectionRule::wrap(
                TypeMatcher::TypeName("XML"),
                "XMLSERIALIZE(",
                " as VARCHAR(32000) INCLUDING XMLDECLARATION)",
            ),
            ProjectionRule::wrap(
                TypeMatcher::TypeName("CLOB"),
                "CAST(SUBSTRING(",
                ",32672) AS VARCHAR(32672))",
            ),
            ProjectionRule::wrap(TypeMatcher::TypeName("CHAR () FOR BIT DATA"), "HEX(", ")"),
            ProjectionRule::wrap(TypeMatcher::TypeName("VARCHAR () FOR BIT DATA"), "HEX(", ")"),
            ProjectionRule::wrap(TypeMatcher::TypeName("TIME"), "VARCHAR(", ")"),
            ProjectionRule::wrap(TypeMatcher::TypeName("TIMESTAMP"), "VARCHAR(", ")"),
        ],
        type_mapping: TypeMapping::Db2,
        capabilities: capabilities! {
            main: [
                SelectListProjection, SelectListExpressions, FilterExpressions,
                AggregateSingleGroup, AggregateGroupByColumn, AggregateGroupByExpression,
                AggregateGroupByTuple, AggregateHaving, OrderByColumn, OrderByExpression, Limit,
            ],
            literals: [
                Null, Date, Timestamp, TimestampUtc, Double, ExactNumeric, String, Interval,
            ],
            predicates: [
                And, Or, Not, Equal, NotEqual, Less, LessEqual, Like, LikeEscape, Between,
                InConstList, IsNull, IsNotNull,
            ],
            aggregates: [
                Count, CountStar, CountDistinct, GroupConcat, GroupConcatSeparator,
                GroupConcatOrderBy, Sum, SumDistinct, Min, Max, Avg, AvgDistinct, Median,
                FirstValue, LastValue, Stddev, StddevPop, StddevSamp, Variance, VarianceDistinct,
                VarPop, VarSamp,
            ],
            scalars: [
                Ceil, Div, Floor, Sign, Add, Sub, Mult, FloatDiv, Neg, Abs, Acos, Asin, Atan,
                Atan2, Cos, Cosh, Cot, Degrees, Exp, Greatest, Least, Ln, Log, Mod, Power, Radians,
                Sin, Sinh, Sqrt, Tan, Tanh, Ascii, Chr, Instr, Length, Locate, Lower, Lpad, Ltrim,
                Repeat, Replace, Right, Rpad, Rtrim, Soundex, Substr, Translate, Trim, Upper,
                AddDays, AddHours, AddMinutes, AddMonths, AddSeconds, AddWeeks, AddYears,
                CurrentDate, CurrentTimestamp, Localtimestamp, Sysdate, Systimestamp, Cast, ToChar,
                ToDate, ToNumber, ToTimestamp, Case, CurrentSchema, CurrentUser, Nullifzero,
                Zeroifnull,
            ],
        },
        ..DialectDefinition::new(NAME)
    }
    .with_aggregate_aliases([(AggregateFunction::VarSamp, "VARIANCE_SAMP")])
}

#[cfg(test)]
mod tests {
    use query_engine_metadata::metadata::{ColumnMetadata, DataType, TableMetadata};
    use query_engine_sql::sql::ast::OrderBy;
    use query_engine_sql::sql::helpers;
    use similar_asserts::assert_eq;

    use super::*;
    use crate::translation::dialect::Dialect;
    use crate::translation::generation::generate;

    #[test]
    fn db2_fetches_first_rows_after_ordering() {
        let context = DialectContext {
            schema_name: Some("DB2INST1".to_string()),
            ..DialectContext::default()
        };
        let dialect = Dialect::new(definition(&context), &context).unwrap();
        assert_eq!(dialect.quote_identifier("a\"b").unwrap(), "\"a\"\"b\"");
        assert!(dialect.nulls_last_by_default(true));
        let column = ColumnMetadata::new("EMPNO", DataType::decimal(6, 0));
        let mut select = helpers::star_select(helpers::table(TableMetadata::new(
            "EMPLOYEE",
            vec![column.clone()],
        )));
        select.order_by = Some(OrderBy {
            elements: vec![helpers::order_by_element(
                helpers::column(0, column),
                false,
                false,
            )],
        });
        select.limit = Some(helpers::limit(10, 20));
        assert_eq!(
            generate(&select, &dialect).unwrap(),
            "SELECT * FROM \"DB2INST1\".\"EMPLOYEE\" ORDER BY \"EMPNO\" DESC NULLS FIRST OFFSET 20 ROWS FETCH FIRST 10 ROWS ONLY"
        );
    }
}
