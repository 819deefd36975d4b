//! Google BigQuery.

use query_engine_sql::sql::ast::{AggregateFunction, ScalarFunction};

use super::registry::DialectContext;
use super::{capabilities, DialectDefinition, IdentifierQuote, StringLiteralStyle};
use crate::translation::identifiers::{IdentifierCaseHandling, IdentifierConverter};

pub const NAME: &str = "BIGQUERY";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    DialectDefinition {
        identifier_quote: IdentifierQuote::EscapedBackticks,
        identifier_converter: IdentifierConverter::Standard(IdentifierCaseHandling::lower_unquoted()),
        string_literal: StringLiteralStyle::BackslashQuoted,
        catalog_qualified: true,
        schema_qualified: true,
        capabilities: capabilities! {
            main: [
                SelectListProjection, SelectListExpressions, FilterExpressions,
                AggregateSingleGroup, AggregateGroupByColumn, AggregateGroupByTuple,
                AggregateHaving, OrderByExpression, Limit, LimitWithOffset,
            ],
            literals: [Null, Bool, Date, Timestamp, ExactNumeric, String],
            predicates: [
                And, Or, Not, Equal, NotEqual, Less, LessEqual, Like, Between, RegexpLike,
                InConstList, IsNull, IsNotNull,
            ],
            aggregates: [
                Count, CountStar, CountDistinct, Sum, SumDistinct, Min, Max, Avg, AvgDistinct,
                FirstValue, LastValue, Stddev, StddevDistinct, StddevPop, StddevPopDistinct,
                StddevSamp, StddevSampDistinct, Variance, VarianceDistinct, VarPop,
                VarPopDistinct, VarSamp, VarSampDistinct, GroupConcat, ApproximateCountDistinct,
            ],
            scalars: [
                Abs, Acos, Asin, Atan, Atan2, Ceil, Cos, Cosh, Degrees, Div, Exp, Floor,
                Greatest, Least, Ln, Log, Mod, Power, Rand, Round, Sign, Sin, Sinh, Sqrt, Tan,
                Tanh, Trunc, ColognePhonetic, Concat, Insert, Instr, Length, Lower, Lpad, Ltrim,
                RegexpReplace, Repeat, Replace, Reverse, Right, Rpad, Rtrim, Soundex, Space,
                Substr, Trim, Upper, CurrentDate, CurrentTimestamp, DateTrunc, Day, Extract,
                Minute, Month, Second, Week, Year, StX, StY, StLength, StNumpoints, StArea,
                StBoundary, StCentroid, StContains, StDifference, StDimension, StDisjoint,
                StDistance, StEquals, StIntersection, StIntersects, StIsempty, StTouches,
                StUnion, StWithin, Cast, ToTimestamp, BitAnd, BitOr, BitXor, Case, HashMd5,
            ],
        },
        ..DialectDefinition::new(NAME)
    }
    .with_scalar_aliases([(ScalarFunction::HashMd5, "MD5")])
    .with_aggregate_aliases([(
        AggregateFunction::ApproximateCountDistinct,
        "APPROX_COUNT_DISTINCT",
    )])
}
