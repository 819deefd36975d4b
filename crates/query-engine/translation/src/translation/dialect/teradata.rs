//! Teradata.

use super::registry::DialectContext;
use super::{capabilities, DialectDefinition, LimitStrategy, NullSorting};

pub const NAME: &str = "TERADATA";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    DialectDefinition {
        null_sorting: NullSorting::High,
        limit: LimitStrategy::Top,
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
                And, Or, Not, Equal, NotEqual, Less, LessEqual, Like, LikeEscape, RegexpLike,
                Between, InConstList, IsNull, IsNotNull,
            ],
            aggregates: [
                Count, CountStar, CountDistinct, Sum, SumDistinct, Min, Max, Avg, AvgDistinct,
                Median, FirstValue, LastValue, StddevPop, StddevSamp, VarPop, VarSamp,
            ],
            scalars: [
                Ceil, Div, Floor, Sign, Add, Sub, Mult, FloatDiv, Neg, Abs, Acos, Asin, Atan,
                Atan2, Cos, Cosh, Cot, Degrees, Exp, Greatest, Least, Ln, Log, Mod, Power, Radians,
                Sin, Sinh, Sqrt, Tan, Tanh, Ascii, Chr, Instr, Length, Locate, Lower, Lpad, Ltrim,
                RegexpInstr, RegexpReplace, RegexpSubstr, Repeat, Replace, Reverse, Rpad, Rtrim,
                Soundex, Substr, Translate, Trim, Upper, AddDays, AddHours, AddMinutes, AddMonths,
                AddSeconds, AddWeeks, AddYears, CurrentDate, CurrentTimestamp, Nullifzero,
                Zeroifnull, Trunc, Round,
            ],
        },
        ..DialectDefinition::new(NAME)
    }
}
