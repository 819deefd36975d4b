//! PostgreSQL.

use pushdown_configuration::PostgresIdentifierMapping;
use query_engine_sql::sql::ast::ScalarFunction;

use super::registry::DialectContext;
use super::{
    capabilities, DialectDefinition, GroupConcatStyle, ProjectionCast, ProjectionRule,
    ScalarRewrites, TypeMatcher,
};
use crate::translation::identifiers::IdentifierConverter;
use crate::translation::type_mapper::TypeMapping;

pub const NAME: &str = "POSTGRESQL";

/// Types the driver cannot hand over as they are, read as text instead.
const VARCHAR_CAST_TYPES: [&str; 19] = [
    "point", "line", "varbit", "lseg", "box", "path", "polygon", "circle", "cidr", "citext",
    "inet", "macaddr", "interval", "json", "jsonb", "uuid", "tsquery", "tsvector", "xml",
];

pub fn definition(context: &DialectContext) -> DialectDefinition {
    let mapping = context.postgresql_identifier_mapping;
    let mut projection_rules: Vec<ProjectionRule> = VARCHAR_CAST_TYPES
        .into_iter()
        .map(|type_name| {
            ProjectionRule::wrap(TypeMatcher::TypeName(type_name), "CAST(", "  as VARCHAR )")
        })
        .collect();
    projection_rules.extend([
        ProjectionRule::wrap(TypeMatcher::TypeName("smallserial"), "CAST(", "  as SMALLINT )"),
        ProjectionRule::wrap(TypeMatcher::TypeName("serial"), "CAST(", "  as INTEGER )"),
        ProjectionRule::wrap(TypeMatcher::TypeName("bigserial"), "CAST(", "  as BIGINT )"),
        ProjectionRule::new(TypeMatcher::TypeName("bytea"), ProjectionCast::NotSupported),
    ]);

    DialectDefinition {
        lower_case_before_quoting: mapping == PostgresIdentifierMapping::ConvertToUpper,
        identifier_converter: IdentifierConverter::PostgreSql(mapping),
        group_concat: GroupConcatStyle::StringAgg,
        scalar_rewrites: ScalarRewrites::PostgreSql,
        projection_rules,
        type_mapping: TypeMapping::PostgreSql,
        capabilities: capabilities! {
            main: [
                SelectListProjection, SelectListExpressions, FilterExpressions,
                AggregateSingleGroup, AggregateGroupByColumn, AggregateGroupByExpression,
                AggregateGroupByTuple, AggregateHaving, OrderByColumn, OrderByExpression, Limit,
                LimitWithOffset, Join, JoinTypeInner, JoinTypeLeftOuter, JoinTypeRightOuter,
                JoinTypeFullOuter, JoinConditionEqui,
            ],
            literals: [Null, Bool, Date, Timestamp, TimestampUtc, Double, ExactNumeric, String],
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
                Degrees, Div, Exp, Floor, Ln, Log, Mod, Power, Radians, Round, Sign, Sin, Sqrt,
                Tan, Trunc, Ascii, BitLength, Chr, Concat, Instr, Length, Lower, Lpad, Ltrim,
                OctetLength, RegexpReplace, Repeat, Replace, Reverse, Right, Rpad, Rtrim, Substr,
                Translate, Trim, Unicode, Unicodechr, Upper, AddDays, AddHours, AddMinutes,
                AddMonths, AddSeconds, AddWeeks, AddYears, DaysBetween, HoursBetween,
                MinutesBetween, MonthsBetween, SecondsBetween, YearsBetween, Minute, Second, Day,
                Week, Month, Year, CurrentDate, CurrentTimestamp, DateTrunc, Extract,
                Localtimestamp, PosixTime, ToChar, Case, HashMd5,
            ],
        },
        ..DialectDefinition::new(NAME)
    }
    .with_scalar_aliases([
        (ScalarFunction::Substr, "SUBSTRING"),
        (ScalarFunction::HashMd5, "MD5"),
    ])
}
