//! MySQL.

use super::registry::DialectContext;
use super::{capabilities, DialectDefinition, IdentifierQuote, StringLiteralStyle};
use crate::translation::type_mapper::TypeMapping;

pub const NAME: &str = "MYSQL";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    let mut definition = DialectDefinition::new(NAME);
    definition.identifier_quote = IdentifierQuote::Backticks;
    definition.string_literal = StringLiteralStyle::BackslashEscaped;
    definition.catalog_qualified = true;
    definition.schema_qualified = false;
    definition.type_mapping = TypeMapping::MySql;
    definition.capabilities = capabilities! {
        main: [
            SelectListProjection, SelectListExpressions, FilterExpressions, AggregateSingleGroup,
            AggregateGroupByColumn, AggregateGroupByExpression, AggregateGroupByTuple,
            AggregateHaving, OrderByColumn, OrderByExpression, Limit, LimitWithOffset, Join,
            JoinTypeInner, JoinTypeLeftOuter, JoinTypeRightOuter, JoinConditionEqui,
        ],
        literals: [
            Null, Bool, Date, Timestamp, TimestampUtc, Double, ExactNumeric, String, Interval,
        ],
        predicates: [
            And, Or, Not, Equal, NotEqual, Less, LessEqual, Like, Between, IsNull, IsNotNull,
        ],
        aggregates: [
            Count, Sum, Min, Max, Avg, Stddev, StddevPop, StddevSamp, Variance, VarPop, VarSamp,
        ],
        scalars: [
            Abs, Acos, Asin, Atan, Atan2, Ceil, Cos, Cot, Degrees, Div, Exp, Floor, Greatest,
            Least, Ln, Log, Mod, Power, Radians, Rand, Round, Sign, Sin, Sqrt, Tan, Ascii,
            BitLength, Concat, Insert, Instr, Length, Locate, Lower, Lpad, Ltrim, OctetLength,
            RegexpInstr, RegexpReplace, RegexpSubstr, Repeat, Replace, Reverse, Right, Rpad,
            Rtrim, Soundex, Space, Substr, Trim, Upper, AddDays, AddHours, AddMinutes, AddMonths,
            AddSeconds, AddWeeks, AddYears, ConvertTz, CurrentDate, CurrentTimestamp, Extract,
            Localtimestamp, Minute, Month, Second, Sysdate, Systimestamp, Week, Year, StX, StY,
            StEndpoint, StIsclosed, StLength, StNumpoints, StPointn, StStartpoint, StArea,
            StExteriorring, StInteriorringn, StNuminteriorrings, StGeometryn, StNumgeometries,
            StBuffer, StCentroid, StContains, StConvexhull, StCrosses, StDifference, StDimension,
            StDisjoint, StDistance, StEnvelope, StEquals, StGeometrytype, StIntersection,
            StIntersects, StIsempty, StIssimple, StOverlaps, StSymdifference, StTouches,
            StTransform, StUnion, StWithin, Cast, BitAnd, BitOr, BitXor, Case, CurrentUser,
        ],
    };
    definition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::capabilities::MainCapability;
    use crate::translation::dialect::Dialect;

    #[test]
    fn mysql_quotes_with_backticks_and_qualifies_by_catalog() {
        let context = DialectContext {
            catalog_name: Some("shop".to_string()),
            ..DialectContext::default()
        };
        let dialect = Dialect::new(definition(&context), &context).unwrap();
        assert_eq!(dialect.quote_identifier("a`b").unwrap(), "`a``b`");
        assert_eq!(dialect.string_literal("a\\'").unwrap(), "'a\\\\'''");
        assert!(dialect.definition().catalog_qualified);
        assert!(!dialect.definition().schema_qualified);
        assert!(!dialect
            .capabilities()
            .main
            .contains(&MainCapability::JoinTypeFullOuter));
    }
}
