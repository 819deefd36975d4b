//! Microsoft SQL Server.

use query_engine_metadata::metadata::TypeCode;
use query_engine_sql::sql::ast::{AggregateFunction, ScalarFunction};

use super::registry::DialectContext;
use super::{
    capabilities, DialectDefinition, IdentifierQuote, LimitStrategy, NullSorting, ProjectionRule,
    ScalarRewrites, TypeMatcher,
};
use crate::translation::type_mapper::{TypeMapping, SQLSERVER_DATETIME_OFFSET};

pub const NAME: &str = "SQLSERVER";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    DialectDefinition {
        identifier_quote: IdentifierQuote::SquareBrackets,
        catalog_qualified: true,
        schema_qualified: true,
        null_sorting: NullSorting::AtStart,
        limit: LimitStrategy::Top,
        scalar_rewrites: ScalarRewrites::SqlServer,
        projection_rules: vec![
            ProjectionRule::wrap(TypeMatcher::TypeCode(TypeCode::Time), "CAST(", " as VARCHAR(16))"),
            ProjectionRule::wrap(
                TypeMatcher::TypeCode(TypeCode::Vendor(SQLSERVER_DATETIME_OFFSET)),
                "CAST(",
                " as VARCHAR(34))",
            ),
        ],
        type_mapping: TypeMapping::SqlServer,
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
                And, Or, Not, Equal, NotEqual, Less, LessEqual, Like, LikeEscape, Between,
                RegexpLike, InConstList, IsNull, IsNotNull,
            ],
            aggregates: [
                Count, CountStar, CountDistinct, Sum, SumDistinct, Min, Max, Avg, AvgDistinct,
                Median, FirstValue, LastValue, Stddev, StddevDistinct, StddevPop,
                StddevPopDistinct, Variance, VarianceDistinct, VarPop, VarPopDistinct,
            ],
            scalars: [
                Abs, Acos, Asin, Atan, Atan2, Ceil, Cos, Cot, Degrees, Exp, Floor, Log, Mod,
                Power, Radians, Rand, Round, Sign, Sin, Sqrt, Tan, Ascii, Chr, Concat, Instr,
                Length, Locate, Lower, Lpad, Ltrim, Repeat, Replace, Reverse, Right, Rpad, Rtrim,
                Soundex, Space, Substr, Trim, Upper, AddDays, AddHours, AddMinutes, AddMonths,
                AddSeconds, AddWeeks, AddYears, CurrentDate, CurrentTimestamp, Day, DaysBetween,
                HoursBetween, MinutesBetween, Month, MonthsBetween, SecondsBetween, Sysdate,
                Systimestamp, Year, YearsBetween, StX, StY, StEndpoint, StIsclosed, StIsring,
                StLength, StNumpoints, StPointn, StStartpoint, StArea, StExteriorring,
                StInteriorringn, StNuminteriorrings, StGeometryn, StNumgeometries, StBoundary,
                StBuffer, StCentroid, StContains, StConvexhull, StCrosses, StDifference,
                StDimension, StDisjoint, StDistance, StEnvelope, StEquals, StGeometrytype,
                StIntersection, StIntersects, StIsempty, StIssimple, StOverlaps, StSymdifference,
                StTouches, StUnion, StWithin, BitAnd, BitNot, BitOr, BitXor, Case, HashMd5,
                HashSha, HashSha1, Nullifzero, Zeroifnull,
            ],
        },
        ..DialectDefinition::new(NAME)
    }
    .with_scalar_aliases([
        (ScalarFunction::Atan2, "ATN2"),
        (ScalarFunction::Ceil, "CEILING"),
        (ScalarFunction::Chr, "CHAR"),
        (ScalarFunction::Length, "LEN"),
        (ScalarFunction::Locate, "CHARINDEX"),
        (ScalarFunction::Repeat, "REPLICATE"),
        (ScalarFunction::Substr, "SUBSTRING"),
        (ScalarFunction::Nullifzero, "NULLIF"),
    ])
    .with_aggregate_aliases([
        (AggregateFunction::Stddev, "STDEV"),
        (AggregateFunction::StddevPop, "STDEVP"),
        (AggregateFunction::Variance, "VAR"),
        (AggregateFunction::VarPop, "VARP"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::dialect::Dialect;

    #[test]
    fn sqlserver_brackets_identifiers_and_sorts_nulls_first() {
        let context = DialectContext::default();
        let dialect = Dialect::new(definition(&context), &context).unwrap();
        assert_eq!(dialect.quote_identifier("Order Details").unwrap(), "[Order Details]");
        assert!(!dialect.nulls_last_by_default(true));
        assert!(!dialect.nulls_last_by_default(false));
        assert_eq!(
            dialect.definition().scalar_aliases.get(&ScalarFunction::Length),
            Some(&"LEN".to_string())
        );
    }
}
