//! Apache Hive.

use query_engine_sql::sql::ast::ScalarFunction;

use super::registry::DialectContext;
use super::{capabilities, DialectDefinition, IdentifierQuote, NullSorting};

pub const NAME: &str = "HIVE";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    DialectDefinition {
        identifier_quote: IdentifierQuote::Backticks,
        null_sorting: NullSorting::Low,
        // the alias already carries the parentheses
        omit_parentheses: [ScalarFunction::CurrentUser].into_iter().collect(),
        capabilities: capabilities! {
            main: [
                SelectListProjection, SelectListExpressions, FilterExpressions,
                AggregateSingleGroup, AggregateGroupByColumn, AggregateHaving, OrderByColumn,
                OrderByExpression, Limit, Join, JoinTypeInner, JoinTypeLeftOuter,
                JoinTypeRightOuter, JoinTypeFullOuter, JoinConditionEqui,
            ],
            literals: [Null, Bool, Date, Timestamp, Double, ExactNumeric, String],
            predicates: [
                And, Or, Not, Equal, NotEqual, Less, LessEqual, Like, Between, RegexpLike,
                InConstList, IsNull, IsNotNull,
            ],
            aggregates: [
                Count, CountStar, CountDistinct, Sum, SumDistinct, Min, Max, Avg, AvgDistinct,
                StddevPop, StddevPopDistinct, StddevSamp, StddevSampDistinct, VarPop,
                VarPopDistinct, VarSamp, VarSampDistinct,
            ],
            scalars: [
                Add, Sub, Mult, FloatDiv, Neg, Abs, Acos, Asin, Atan, Ceil, Cos, Degrees, Div,
                Exp, Floor, Ln, Log, Mod, Power, Radians, Sign, Sin, Sqrt, Tan, Ascii, Concat,
                Length, Lower, Lpad, Repeat, Reverse, Rpad, Soundex, Space, Substr, Translate,
                Upper, AddDays, AddMonths, CurrentDate, CurrentTimestamp, DateTrunc, Day,
                DaysBetween, Minute, Month, MonthsBetween, Second, Week, Cast, BitAnd, BitOr,
                BitXor, CurrentUser,
            ],
        },
        ..DialectDefinition::new(NAME)
    }
    .with_scalar_aliases([
        (ScalarFunction::AddDays, "DATE_ADD"),
        (ScalarFunction::DaysBetween, "DATEDIFF"),
        (ScalarFunction::Week, "WEEKOFYEAR"),
        (ScalarFunction::CurrentUser, "CURRENT_USER()"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::dialect::Dialect;

    #[test]
    fn hive_sorts_nulls_low() {
        let context = DialectContext::default();
        let dialect = Dialect::new(definition(&context), &context).unwrap();
        assert!(!dialect.nulls_last_by_default(true));
        assert!(dialect.nulls_last_by_default(false));
        assert_eq!(dialect.quote_identifier("t").unwrap(), "`t`");
    }
}
