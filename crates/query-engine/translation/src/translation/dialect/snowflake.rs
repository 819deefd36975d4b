//! Snowflake.

use super::registry::DialectContext;
use super::{capabilities, DialectDefinition, IdentifierQuote, NullSorting};

pub const NAME: &str = "SNOWFLAKE";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    DialectDefinition {
        identifier_quote: IdentifierQuote::Custom("\"".to_string()),
        schema_qualified: false,
        null_sorting: NullSorting::AtStart,
        capabilities: capabilities! {
            main: [
                SelectListProjection, SelectListExpressions, FilterExpressions,
                AggregateSingleGroup, AggregateGroupByColumn, AggregateGroupByExpression,
                AggregateGroupByTuple, AggregateHaving, OrderByColumn, OrderByExpression, Limit,
            ],
            literals: [
                Null, Bool, Date, Timestamp, TimestampUtc, Double, ExactNumeric, String, Interval,
            ],
            predicates: [
                And, Or, Not, Equal, NotEqual, Less, LessEqual, Like, RegexpLike, Between, IsNull,
                IsNotNull,
            ],
            aggregates: [
                Count, CountStar, Sum, Min, Max, Avg, Stddev, StddevPop, StddevSamp, Variance,
                VarPop, VarSamp, ApproximateCountDistinct,
            ],
            scalars: [
                Cast, Abs, Ceil, Acos, Asin, Atan, Atan2, Cos, Cosh, Degrees, Exp, Floor, Ln, Log,
                Mod, Power, Radians, Rand, Round, Sign, Sin, Sqrt, Tan, Tanh, Trunc, BitAnd,
                BitNot, BitOr, BitXor, Chr, Concat, Length, Lower, Lpad, Ltrim, Replace, Reverse,
                Rpad, Rtrim, Substr, Trim, Upper, CurrentDate, CurrentTimestamp, DateTrunc,
                Minute, Second, Day, Month, Week, Year, RegexpReplace, HashMd5, HashSha1,
            ],
        },
        ..DialectDefinition::new(NAME)
    }
}
