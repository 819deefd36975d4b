//! Apache Impala.

use query_engine_sql::sql::ast::{AggregateFunction, ScalarFunction};

use super::registry::DialectContext;
use super::{
    capabilities, DialectDefinition, GroupConcatStyle, IdentifierQuote, NullSorting,
    RegexpLikeStyle, SelectListCasts, StringLiteralStyle,
};
use crate::translation::identifiers::{CaseHandling, IdentifierCaseHandling, IdentifierConverter};

pub const NAME: &str = "IMPALA";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    DialectDefinition {
        // backticks cannot be escaped inside a quoted identifier
        identifier_quote: IdentifierQuote::Custom("`".to_string()),
        identifier_converter: IdentifierConverter::Standard(IdentifierCaseHandling {
            unquoted: CaseHandling::InterpretAsLower,
            quoted: CaseHandling::InterpretAsLower,
        }),
        string_literal: StringLiteralStyle::BackslashQuoted,
        null_sorting: NullSorting::High,
        group_concat: GroupConcatStyle::CastToString,
        regexp_like: RegexpLikeStyle::Regexp,
        // the driver describes SUM as DOUBLE but returns DECIMAL
        select_list_casts: SelectListCasts {
            double_aggregates: [AggregateFunction::Sum].into_iter().collect(),
            ..SelectListCasts::default()
        },
        capabilities: capabilities! {
            main: [
                SelectListProjection, SelectListExpressions, FilterExpressions,
                AggregateSingleGroup, AggregateGroupByColumn, AggregateGroupByExpression,
                AggregateGroupByTuple, AggregateHaving, OrderByColumn, OrderByExpression, Limit,
                LimitWithOffset,
            ],
            literals: [Null, Double, ExactNumeric, String, Bool],
            predicates: [
                And, Or, Not, Equal, NotEqual, Less, LessEqual, Like, RegexpLike, Between,
                InConstList, IsNull, IsNotNull,
            ],
            aggregates: [
                Count, CountStar, CountDistinct, GroupConcat, GroupConcatSeparator, Sum,
                SumDistinct, Min, Max, Avg,
            ],
            scalars: [
                Abs, Acos, Asin, Atan, Atan2, Ceil, Cos, Cosh, Cot, Degrees, Exp, Floor, Greatest,
                Least, Ln, Log, Mod, Neg, Power, Radians, Rand, Round, Sign, Sin, Sinh, Sqrt, Tan,
                Tanh, Trunc, BitAnd, BitNot, BitOr, BitXor, BitSet, Cast, AddMonths,
                CurrentTimestamp, Day, AddDays, AddHours, Minute, AddMinutes, Month,
                MonthsBetween, Second, AddSeconds, ToDate, ToTimestamp, AddWeeks, Year, AddYears,
                Ascii, Concat, Instr, Length, Locate, Lower, Lpad, Ltrim, RegexpReplace, Repeat,
                Reverse, Rpad, Rtrim, Space, Substr, Translate, Trim, Upper, Sysdate,
            ],
        },
        ..DialectDefinition::new(NAME)
    }
    .with_scalar_aliases([
        (ScalarFunction::Neg, "NEGATIVE"),
        (ScalarFunction::Trunc, "TRUNCATE"),
        (ScalarFunction::BitAnd, "BITAND"),
        (ScalarFunction::BitNot, "BITNOT"),
        (ScalarFunction::BitOr, "BITOR"),
        (ScalarFunction::BitXor, "BITXOR"),
        (ScalarFunction::BitSet, "SETBIT"),
        (ScalarFunction::AddDays, "DAYS_ADD"),
        (ScalarFunction::MonthsBetween, "INT_MONTHS_BETWEEN"),
        (ScalarFunction::AddMinutes, "MINUTES_ADD"),
        (ScalarFunction::AddMonths, "MONTHS_ADD"),
        (ScalarFunction::AddSeconds, "SECONDS_ADD"),
        (ScalarFunction::AddWeeks, "WEEKS_ADD"),
        (ScalarFunction::AddYears, "YEARS_ADD"),
        (ScalarFunction::Sysdate, "NOW"),
    ])
}
