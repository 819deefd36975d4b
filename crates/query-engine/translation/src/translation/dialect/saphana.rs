//! SAP HANA.

use query_engine_sql::sql::ast::ScalarFunction;

use super::registry::DialectContext;
use super::{capabilities, DialectDefinition, IdentifierQuote, NullSorting};

pub const NAME: &str = "SAPHANA";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    DialectDefinition {
        // HANA has no escape for a double quote inside a delimited identifier
        identifier_quote: IdentifierQuote::Custom("\"".to_string()),
        null_sorting: NullSorting::AtStart,
        capabilities: capabilities! {
            main: [
                SelectListProjection, SelectListExpressions, FilterExpressions,
                AggregateSingleGroup, AggregateGroupByColumn, AggregateGroupByExpression,
                AggregateGroupByTuple, AggregateHaving, OrderByColumn, OrderByExpression, Limit,
                LimitWithOffset,
            ],
            literals: [Null, Bool, Date, Timestamp, Double, ExactNumeric, String],
            predicates: [
                And, Or, Not, Equal, NotEqual, Less, LessEqual, Like, RegexpLike, Between, IsNull,
                IsNotNull,
            ],
            aggregates: [
                Count, CountStar, CountDistinct, Sum, Min, Max, Avg, Median, FirstValue,
                LastValue, StddevPop, StddevSamp, VarPop, VarSamp,
            ],
            scalars: [
                Abs, Acos, Asin, Atan, Atan2, Ceil, Cos, Cosh, Cot, Floor, Greatest, Least, Ln,
                Log, Mod, Power, Rand, Round, Sign, Sin, Sinh, Sqrt, Tan, Tanh, Ascii, Concat,
                Length, Locate, Lower, Lpad, Ltrim, RegexpReplace, RegexpSubstr, Right, Rpad,
                Rtrim, Soundex, Substr, Trim, Unicode, Upper, AddDays, AddMonths, AddSeconds,
                AddYears, CurrentDate, CurrentTimestamp, DaysBetween, Extract, Minute, Month,
                MonthsBetween, Second, SecondsBetween, Week, Year, YearsBetween, StX, StY,
                StEndpoint, StIsclosed, StIsring, StLength, StNumpoints, StPointn, StStartpoint,
                StArea, StExteriorring, StInteriorringn, StNuminteriorrings, StGeometryn,
                StNumgeometries, StBoundary, StBuffer, StCentroid, StContains, StConvexhull,
                StCrosses, StDifference, StDimension, StDisjoint, StDistance, StEnvelope,
                StEquals, StGeometrytype, StIntersection, StIntersects, StIsempty, StIssimple,
                StOverlaps, StSymdifference, StTouches, StTransform, StUnion, StWithin, Cast,
                ToDate, ToTimestamp, BitAnd, BitNot, BitOr, BitSet, BitXor, CurrentSchema,
                CurrentUser, HashMd5,
            ],
        },
        ..DialectDefinition::new(NAME)
    }
    .with_scalar_aliases([
        (ScalarFunction::RegexpSubstr, "SUBSTRING_REGEXPR"),
        (ScalarFunction::RegexpReplace, "REPLACE_REGEXPR"),
        (ScalarFunction::Substr, "SUBSTRING"),
        (ScalarFunction::BitAnd, "BITAND"),
        (ScalarFunction::BitNot, "BITNOT"),
        (ScalarFunction::BitOr, "BITOR"),
        (ScalarFunction::BitSet, "BITSET"),
        (ScalarFunction::BitXor, "BITXOR"),
    ])
}
