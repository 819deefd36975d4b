//! SAP Sybase ASE.

use query_engine_sql::sql::ast::{AggregateFunction, ScalarFunction};

use super::registry::DialectContext;
use super::{
    capabilities, DialectDefinition, IdentifierQuote, LimitStrategy, NullOrdering, NullSorting,
    ProjectionCast, ProjectionRule, ScalarRewrites, StringLiteralStyle, TypeMatcher,
};
use crate::translation::type_mapper::TypeMapping;

pub const NAME: &str = "SYBASE";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    DialectDefinition {
        identifier_quote: IdentifierQuote::RestrictedSquareBrackets,
        string_literal: StringLiteralStyle::SingleLine,
        catalog_qualified: true,
        schema_qualified: true,
        null_sorting: NullSorting::Low,
        null_ordering: NullOrdering::CaseExpression,
        limit: LimitStrategy::Top,
        scalar_rewrites: ScalarRewrites::SqlServer,
        projection_rules: vec![
            ProjectionRule::wrap(TypeMatcher::TypeNamePrefix("text"), "CAST(", "  as NVARCHAR(4000) )"),
            ProjectionRule::wrap(TypeMatcher::TypeNamePrefix("xml"), "CAST(", "  as NVARCHAR(4000) )"),
            ProjectionRule::wrap(TypeMatcher::TypeName("time"), "CONVERT(VARCHAR(12), ", ", 137)"),
            ProjectionRule::wrap(TypeMatcher::TypeName("bigtime"), "CONVERT(VARCHAR(16), ", ", 137)"),
            ProjectionRule::new(TypeMatcher::TypeName("varbinary"), ProjectionCast::NotSupportedLiteral),
            ProjectionRule::new(TypeMatcher::TypeName("binary"), ProjectionCast::NotSupportedLiteral),
            ProjectionRule::new(TypeMatcher::TypeName("image"), ProjectionCast::NotSupportedLiteral),
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
                InConstList, IsNull, IsNotNull,
            ],
            aggregates: [
                Count, CountStar, CountDistinct, Sum, SumDistinct, Min, Max, Avg, AvgDistinct,
                Stddev, StddevDistinct, StddevPop, StddevPopDistinct, Variance, VarianceDistinct,
                VarPop, VarPopDistinct,
            ],
            scalars: [
                Abs, Acos, Asin, Atan, Atan2, Ceil, Cos, Cot, Degrees, Exp, Floor, Log, Mod,
                Power, Radians, Rand, Round, Sign, Sin, Sqrt, Tan, Ascii, Chr, Concat, Instr,
                Length, Locate, Lower, Lpad, Ltrim, Repeat, Replace, Reverse, Right, Rpad, Rtrim,
                Soundex, Space, Substr, Trim, Upper, AddDays, AddHours, AddMinutes, AddMonths,
                AddSeconds, AddWeeks, AddYears, CurrentDate, CurrentTimestamp, Day, DaysBetween,
                HoursBetween, MinutesBetween, Month, MonthsBetween, SecondsBetween, Sysdate,
                Systimestamp, Year, YearsBetween, BitAnd, BitNot, BitOr, BitXor, Case, HashMd5,
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
    use query_engine_metadata::metadata::{ColumnMetadata, DataType, TableMetadata};
    use query_engine_sql::sql::helpers;
    use similar_asserts::assert_eq;

    use super::*;
    use crate::translation::dialect::Dialect;
    use crate::translation::error::TranslationError;
    use crate::translation::generation::generate;

    fn dialect() -> Dialect {
        let context = DialectContext {
            catalog_name: Some("pubs".to_string()),
            schema_name: Some("dbo".to_string()),
            ..DialectContext::default()
        };
        Dialect::new(definition(&context), &context).unwrap()
    }

    #[test]
    fn sybase_brackets_only_plain_identifiers() {
        let dialect = dialect();
        assert_eq!(dialect.quote_identifier("titles").unwrap(), "[titles]");
        assert!(matches!(
            dialect.quote_identifier("title id"),
            Err(TranslationError::IdentifierCharacters(_))
        ));
        assert!(matches!(
            dialect.string_literal("a\nb"),
            Err(TranslationError::StringLiteralCharacters(_))
        ));
    }

    #[test]
    fn sybase_limits_with_top_and_sorts_nulls_low() {
        let dialect = dialect();
        assert!(!dialect.nulls_last_by_default(true));
        assert!(dialect.nulls_last_by_default(false));
        let mut select = helpers::star_select(helpers::table(TableMetadata::new(
            "titles",
            vec![ColumnMetadata::new("price", DataType::decimal(18, 2))],
        )));
        select.limit = Some(helpers::limit(7, 0));
        assert_eq!(
            generate(&select, &dialect).unwrap(),
            "SELECT TOP 7 * FROM [pubs].[dbo].[titles]"
        );
    }
}
