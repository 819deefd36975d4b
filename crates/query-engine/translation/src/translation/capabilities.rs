//! The constructs a dialect can execute. Used upstream to decide what may be pushed down; the
//! generator itself never consults it.

use std::collections::BTreeSet;

use enum_iterator::Sequence;
use serde::Serialize;

use query_engine_sql::sql::ast::ScalarFunction;

use super::error::CapabilityError;

macro_rules! capability_enum {
    (
        $(#[$meta:meta])*
        $enum_name:ident {
            $($variant:ident => $name:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence, Serialize)]
        pub enum $enum_name {
            $(
                #[serde(rename = $name)]
                $variant,
            )*
        }

        impl $enum_name {
            pub fn name(self) -> &'static str {
                match self {
                    $($enum_name::$variant => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some($enum_name::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

capability_enum! {
    /// Statement level constructs.
    MainCapability {
        SelectListProjection => "SELECTLIST_PROJECTION",
        SelectListExpressions => "SELECTLIST_EXPRESSIONS",
        FilterExpressions => "FILTER_EXPRESSIONS",
        AggregateSingleGroup => "AGGREGATE_SINGLE_GROUP",
        AggregateGroupByColumn => "AGGREGATE_GROUP_BY_COLUMN",
        AggregateGroupByExpression => "AGGREGATE_GROUP_BY_EXPRESSION",
        AggregateGroupByTuple => "AGGREGATE_GROUP_BY_TUPLE",
        AggregateHaving => "AGGREGATE_HAVING",
        OrderByColumn => "ORDER_BY_COLUMN",
        OrderByExpression => "ORDER_BY_EXPRESSION",
        Limit => "LIMIT",
        LimitWithOffset => "LIMIT_WITH_OFFSET",
        Join => "JOIN",
        JoinTypeInner => "JOIN_TYPE_INNER",
        JoinTypeLeftOuter => "JOIN_TYPE_LEFT_OUTER",
        JoinTypeRightOuter => "JOIN_TYPE_RIGHT_OUTER",
        JoinTypeFullOuter => "JOIN_TYPE_FULL_OUTER",
        JoinConditionEqui => "JOIN_CONDITION_EQUI",
    }
}

capability_enum! {
    PredicateCapability {
        And => "AND",
        Or => "OR",
        Not => "NOT",
        Equal => "EQUAL",
        NotEqual => "NOTEQUAL",
        Less => "LESS",
        LessEqual => "LESSEQUAL",
        Like => "LIKE",
        LikeEscape => "LIKE_ESCAPE",
        Between => "BETWEEN",
        RegexpLike => "REGEXP_LIKE",
        InConstList => "IN_CONSTLIST",
        IsNull => "IS_NULL",
        IsNotNull => "IS_NOT_NULL",
    }
}

capability_enum! {
    LiteralCapability {
        Null => "NULL",
        Bool => "BOOL",
        Date => "DATE",
        Timestamp => "TIMESTAMP",
        TimestampUtc => "TIMESTAMP_UTC",
        Double => "DOUBLE",
        ExactNumeric => "EXACTNUMERIC",
        String => "STRING",
        Interval => "INTERVAL",
    }
}

capability_enum! {
    /// Aggregate functions, including the variants for `*`, `DISTINCT` and the group concat
    /// options.
    AggregateFunctionCapability {
        Count => "COUNT",
        CountStar => "COUNT_STAR",
        CountDistinct => "COUNT_DISTINCT",
        Sum => "SUM",
        SumDistinct => "SUM_DISTINCT",
        Min => "MIN",
        Max => "MAX",
        Avg => "AVG",
        AvgDistinct => "AVG_DISTINCT",
        Median => "MEDIAN",
        FirstValue => "FIRST_VALUE",
        LastValue => "LAST_VALUE",
        Stddev => "STDDEV",
        StddevDistinct => "STDDEV_DISTINCT",
        StddevPop => "STDDEV_POP",
        StddevPopDistinct => "STDDEV_POP_DISTINCT",
        StddevSamp => "STDDEV_SAMP",
        StddevSampDistinct => "STDDEV_SAMP_DISTINCT",
        Variance => "VARIANCE",
        VarianceDistinct => "VARIANCE_DISTINCT",
        VarPop => "VAR_POP",
        VarPopDistinct => "VAR_POP_DISTINCT",
        VarSamp => "VAR_SAMP",
        VarSampDistinct => "VAR_SAMP_DISTINCT",
        GroupConcat => "GROUP_CONCAT",
        GroupConcatDistinct => "GROUP_CONCAT_DISTINCT",
        GroupConcatSeparator => "GROUP_CONCAT_SEPARATOR",
        GroupConcatOrderBy => "GROUP_CONCAT_ORDER_BY",
        GeoIntersectionAggregate => "GEO_INTERSECTION_AGGREGATE",
        GeoUnionAggregate => "GEO_UNION_AGGREGATE",
        ApproximateCountDistinct => "APPROXIMATE_COUNT_DISTINCT",
    }
}

const LITERAL_PREFIX: &str = "LITERAL_";
const PREDICATE_PREFIX: &str = "FN_PRED_";
const AGGREGATE_PREFIX: &str = "FN_AGG_";
const SCALAR_PREFIX: &str = "FN_";

/// A set of capabilities, one set per kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub main: BTreeSet<MainCapability>,
    pub literals: BTreeSet<LiteralCapability>,
    pub predicates: BTreeSet<PredicateCapability>,
    pub aggregate_functions: BTreeSet<AggregateFunctionCapability>,
    pub scalar_functions: BTreeSet<ScalarFunction>,
}

impl Capabilities {
    pub fn empty() -> Self {
        Capabilities::default()
    }

    /// Every capability there is.
    pub fn all() -> Self {
        Capabilities {
            main: enum_iterator::all().collect(),
            literals: enum_iterator::all().collect(),
            predicates: enum_iterator::all().collect(),
            aggregate_functions: enum_iterator::all().collect(),
            scalar_functions: enum_iterator::all().collect(),
        }
    }

    /// Parse excluded capability entries such as `LIMIT`, `LITERAL_NULL`, `FN_PRED_LIKE`,
    /// `FN_AGG_SUM` or `FN_ABS`. Blank entries are skipped.
    pub fn parse_excluded<S: AsRef<str>>(entries: &[S]) -> Result<Self, CapabilityError> {
        let mut excluded = Capabilities::empty();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            let unknown = || CapabilityError(entry.to_string());
            if let Some(name) = entry.strip_prefix(LITERAL_PREFIX) {
                excluded
                    .literals
                    .insert(LiteralCapability::from_name(name).ok_or_else(unknown)?);
            } else if let Some(name) = entry.strip_prefix(PREDICATE_PREFIX) {
                excluded
                    .predicates
                    .insert(PredicateCapability::from_name(name).ok_or_else(unknown)?);
            } else if let Some(name) = entry.strip_prefix(AGGREGATE_PREFIX) {
                excluded
                    .aggregate_functions
                    .insert(AggregateFunctionCapability::from_name(name).ok_or_else(unknown)?);
            } else if let Some(name) = entry.strip_prefix(SCALAR_PREFIX) {
                excluded
                    .scalar_functions
                    .insert(ScalarFunction::from_name(name).ok_or_else(unknown)?);
            } else {
                excluded
                    .main
                    .insert(MainCapability::from_name(entry).ok_or_else(unknown)?);
            }
        }
        Ok(excluded)
    }

    /// The capabilities of `self` that are not in `other`.
    #[must_use]
    pub fn subtract(&self, other: &Capabilities) -> Capabilities {
        Capabilities {
            main: self.main.difference(&other.main).copied().collect(),
            literals: self.literals.difference(&other.literals).copied().collect(),
            predicates: self
                .predicates
                .difference(&other.predicates)
                .copied()
                .collect(),
            aggregate_functions: self
                .aggregate_functions
                .difference(&other.aggregate_functions)
                .copied()
                .collect(),
            scalar_functions: self
                .scalar_functions
                .difference(&other.scalar_functions)
                .copied()
                .collect(),
        }
    }
}
