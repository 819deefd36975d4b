//! Amazon Athena.

use super::registry::DialectContext;
use super::{capabilities, DialectDefinition, IdentifierQuote};

pub const NAME: &str = "ATHENA";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    DialectDefinition {
        identifier_quote: IdentifierQuote::WordCharacters,
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
            schema_name: Some("sales".to_string()),
            ..DialectContext::default()
        };
        Dialect::new(definition(&context), &context).unwrap()
    }

    #[test]
    fn athena_quotes_by_leading_character() {
        let dialect = dialect();
        assert_eq!(dialect.quote_identifier("orders").unwrap(), "\"orders\"");
        assert_eq!(dialect.quote_identifier("_hidden").unwrap(), "`_hidden`");
        assert!(matches!(
            dialect.quote_identifier("order-lines"),
            Err(TranslationError::IdentifierCharacters(_))
        ));
    }

    #[test]
    fn athena_limits_and_sorts_nulls_at_the_end() {
        let dialect = dialect();
        assert!(dialect.nulls_last_by_default(true));
        assert!(dialect.nulls_last_by_default(false));
        let mut select = helpers::star_select(helpers::table(TableMetadata::new(
            "orders",
            vec![ColumnMetadata::new("id", DataType::decimal(18, 0))],
        )));
        select.limit = Some(helpers::limit(5, 0));
        assert_eq!(
            generate(&select, &dialect).unwrap(),
            "SELECT * FROM \"sales\".\"orders\" LIMIT 5"
        );
    }
}
