//! Oracle.
//!
//! Oracle's driver reports useless result metadata for a number of expressions, so this dialect
//! casts aggregates and arithmetic in the select list to `FLOAT`, renders numeric literals and
//! several column types as text, and limits rows with a `ROWNUM` filter.

use query_engine_sql::sql::ast::{AggregateFunction, ScalarFunction};

use super::registry::DialectContext;
use super::{
    capabilities, DialectDefinition, GroupConcatStyle, ImportSupport, LimitStrategy, NullSorting,
    ProjectionCast, ProjectionRule, RegexpLikeStyle, ScalarRewrites, SelectListCasts, TypeMatcher,
};
use crate::translation::type_mapper::TypeMapping;

pub const NAME: &str = "ORACLE";

pub fn definition(_context: &DialectContext) -> DialectDefinition {
    let mut definition = DialectDefinition::new(NAME);
    definition.null_sorting = NullSorting::High;
    definition.omit_parentheses = [
        ScalarFunction::CurrentDate,
        ScalarFunction::CurrentTimestamp,
        ScalarFunction::Dbtimezone,
        ScalarFunction::Localtimestamp,
        ScalarFunction::Sessiontimezone,
        ScalarFunction::Systimestamp,
    ]
    .into_iter()
    .collect();
    definition.limit = LimitStrategy::RowNum;
    definition.group_concat = GroupConcatStyle::ListAgg { null_order: true };
    definition.regexp_like = RegexpLikeStyle::Function;
    definition.scalar_rewrites = ScalarRewrites::Oracle;
    definition.projection_rules = vec![
        ProjectionRule::wrap(TypeMatcher::TypeNamePrefix("TIMESTAMP"), "TO_CHAR(", ")"),
        ProjectionRule::wrap(TypeMatcher::TypeNamePrefix("INTERVAL"), "TO_CHAR(", ")"),
        ProjectionRule::wrap(TypeMatcher::TypeName("BINARY_FLOAT"), "TO_CHAR(", ")"),
        ProjectionRule::wrap(TypeMatcher::TypeName("BINARY_DOUBLE"), "TO_CHAR(", ")"),
        ProjectionRule::wrap(TypeMatcher::TypeName("CLOB"), "TO_CHAR(", ")"),
        ProjectionRule::wrap(TypeMatcher::TypeName("NCLOB"), "TO_CHAR(", ")"),
        ProjectionRule::wrap(TypeMatcher::TypeName("ROWID"), "ROWIDTOCHAR(", ")"),
        ProjectionRule::wrap(TypeMatcher::TypeName("UROWID"), "ROWIDTOCHAR(", ")"),
        ProjectionRule::wrap(TypeMatcher::TypeName("BLOB"), "UTL_RAW.CAST_TO_VARCHAR2(", ")"),
        ProjectionRule::new(TypeMatcher::TypeName("NUMBER"), ProjectionCast::OracleNumber),
    ];
    definition.select_list_casts = SelectListCasts {
        float_aggregates: [
            AggregateFunction::Sum,
            AggregateFunction::Min,
            AggregateFunction::Max,
            AggregateFunction::Avg,
            AggregateFunction::Median,
            AggregateFunction::FirstValue,
            AggregateFunction::LastValue,
            AggregateFunction::Stddev,
            AggregateFunction::StddevPop,
            AggregateFunction::StddevSamp,
            AggregateFunction::Variance,
            AggregateFunction::VarPop,
            AggregateFunction::VarSamp,
        ]
        .into_iter()
        .collect(),
        float_scalars: [
            ScalarFunction::Add,
            ScalarFunction::Sub,
            ScalarFunction::Mult,
            ScalarFunction::FloatDiv,
            ScalarFunction::Neg,
            ScalarFunction::Abs,
            ScalarFunction::Acos,
            ScalarFunction::Asin,
            ScalarFunction::Atan,
            ScalarFunction::Atan2,
            ScalarFunction::Cos,
            ScalarFunction::Cosh,
            ScalarFunction::Cot,
            ScalarFunction::Degrees,
            ScalarFunction::Exp,
            ScalarFunction::Greatest,
            ScalarFunction::Least,
            ScalarFunction::Ln,
            ScalarFunction::Log,
            ScalarFunction::Mod,
            ScalarFunction::Power,
            ScalarFunction::Radians,
            ScalarFunction::Sin,
            ScalarFunction::Sinh,
            ScalarFunction::Sqrt,
            ScalarFunction::Tan,
            ScalarFunction::Tanh,
        ]
        .into_iter()
        .collect(),
        numeric_literals_to_char: true,
        ..SelectListCasts::default()
    };
    definition.type_mapping = TypeMapping::Oracle;
    definition.capabilities = capabilities! {
        main: [
            SelectListProjection, SelectListExpressions, FilterExpressions, AggregateSingleGroup,
            AggregateGroupByColumn, AggregateGroupByExpression, AggregateGroupByTuple,
            AggregateHaving, OrderByColumn, OrderByExpression, Limit, LimitWithOffset, Join,
            JoinTypeInner, JoinTypeLeftOuter, JoinTypeRightOuter, JoinTypeFullOuter,
            JoinConditionEqui,
        ],
        literals: [Null, Date, Timestamp, TimestampUtc, Double, ExactNumeric, String, Interval],
        predicates: [
            And, Or, Not, Equal, NotEqual, Less, LessEqual, Like, LikeEscape, Between, RegexpLike,
            InConstList, IsNull, IsNotNull,
        ],
        aggregates: [
            Count, CountStar, CountDistinct, GroupConcat, GroupConcatSeparator,
            GroupConcatOrderBy, Sum, SumDistinct, Min, Max, Avg, AvgDistinct, Median, FirstValue,
            LastValue, Stddev, StddevDistinct, StddevPop, StddevSamp, Variance, VarianceDistinct,
            VarPop, VarSamp,
        ],
        scalars: [
            Ceil, Div, Floor, Sign, Add, Sub, Mult, FloatDiv, Neg, Abs, Acos, Asin, Atan, Atan2,
            Cos, Cosh, Cot, Degrees, Exp, Greatest, Least, Ln, Log, Mod, Power, Radians, Sin,
            Sinh, Sqrt, Tan, Tanh, Ascii, Chr, Instr, Length, Locate, Lower, Lpad, Ltrim,
            RegexpInstr, RegexpReplace, RegexpSubstr, Repeat, Replace, Reverse, Rpad, Rtrim,
            Soundex, Substr, Translate, Trim, Upper, AddDays, AddHours, AddMinutes, AddMonths,
            AddSeconds, AddWeeks, AddYears, CurrentDate, CurrentTimestamp, Dbtimezone,
            Localtimestamp, Numtodsinterval, Numtoyminterval, Sessiontimezone, Sysdate,
            Systimestamp, Cast, ToChar, ToDate, ToDsinterval, ToYminterval, ToNumber, ToTimestamp,
            BitAnd, BitToNum, Case, Nullifzero, Zeroifnull,
        ],
    };
    definition.import_support = ImportSupport {
        local: false,
        from_exa: false,
        from_ora: true,
    };
    definition
}
