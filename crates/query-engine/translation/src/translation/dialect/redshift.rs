//! Amazon Redshift.

use query_engine_sql::sql::ast::ScalarFunction;

use super::registry::DialectContext;
use super::{capabilities, DialectDefinition, GroupConcatStyle};

pub const NAME: &str = "REDSHIFT";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    DialectDefinition {
        group_concat: GroupConcatStyle::ListAgg { null_order: true },
        capabilities: capabilities! {
            main: [
                SelectListProjection, SelectListExpressions, FilterExpressions,
                AggregateSingleGroup, AggregateGroupByColumn, AggregateGroupByExpression,
                AggregateGroupByTuple, AggregateHaving, OrderByColumn, OrderByExpression, Limit,
                LimitWithOffset,
            ],
            literals: [
                Bool, Null, Date, Timestamp, TimestampUtc, Double, ExactNumeric, String, Interval,
            ],
            predicates: [
                And, Or, Not, Equal, NotEqual, Less, LessEqual, Like, LikeEscape, Between,
                RegexpLike, InConstList, IsNull, IsNotNull,
            ],
            aggregates: [
                Count, CountStar, CountDistinct, Sum, SumDistinct, Min, Max, Avg, AvgDistinct,
                Median, FirstValue, LastValue, Stddev, StddevDistinct, StddevPop,
                StddevPopDistinct, StddevSamp, StddevSampDistinct, Variance, VarianceDistinct,
                VarPop, VarPopDistinct, VarSamp, VarSampDistinct, GroupConcat,
            ],
            scalars: [
                Add, Sub, Mult, FloatDiv, Neg, Abs, Acos, Asin, Atan, Atan2, Ceil, Cos, Cot,
                Degrees, Div, Exp, Floor, Greatest, Least, Ln, Log, Mod, Power, Radians, Round,
                Sign, Sin, Sinh, Sqrt, Tan, Tanh, Trunc, Ascii, Chr, Concat, Locate, Instr, Length,
                Lower, Lpad, Ltrim, RegexpInstr, RegexpReplace, RegexpSubstr, Repeat, Replace,
                Reverse, Right, Rpad, Rtrim, Substr, Translate, Trim, Upper, BitAnd, BitOr,
                AddMonths, MonthsBetween, ConvertTz, Sysdate, Year, CurrentDate, CurrentTimestamp,
                Extract, Cast, ToNumber, ToTimestamp, ToDate, HashSha1, HashMd5, CurrentSchema,
                CurrentUser,
            ],
        },
        ..DialectDefinition::new(NAME)
    }
    .with_scalar_aliases([
        (ScalarFunction::Year, "DATE_PART_YEAR"),
        (ScalarFunction::ConvertTz, "CONVERT_TIMEZONE"),
        (ScalarFunction::HashMd5, "MD5"),
        (ScalarFunction::HashSha1, "FUNC_SHA1"),
        (ScalarFunction::Substr, "SUBSTRING"),
    ])
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
    fn redshift_writes_explicit_nulls_first_and_standard_limits() {
        let context = DialectContext {
            schema_name: Some("public".to_string()),
            ..DialectContext::default()
        };
        let dialect = Dialect::new(definition(&context), &context).unwrap();
        assert_eq!(dialect.quote_identifier("a\"b").unwrap(), "\"a\"\"b\"");
        let column = ColumnMetadata::new("venue", DataType::decimal(18, 0));
        let mut select = helpers::star_select(helpers::table(TableMetadata::new(
            "sales",
            vec![column.clone()],
        )));
        select.order_by = Some(OrderBy {
            elements: vec![helpers::order_by_element(
                helpers::column(0, column),
                true,
                false,
            )],
        });
        select.limit = Some(helpers::limit(10, 10));
        assert_eq!(
            generate(&select, &dialect).unwrap(),
            "SELECT * FROM \"public\".\"sales\" ORDER BY \"venue\" NULLS FIRST LIMIT 10 OFFSET 10"
        );
    }
}
