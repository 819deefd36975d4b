//! The closed sets of scalar and aggregate functions a push-down query may call.

use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};

macro_rules! sql_functions {
    (
        $(#[$meta:meta])*
        $enum_name:ident {
            $($variant:ident => $name:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence, Serialize, Deserialize,
        )]
        pub enum $enum_name {
            $(
                #[serde(rename = $name)]
                $variant,
            )*
        }

        impl $enum_name {
            /// The canonical upper-case name of the function.
            pub fn name(self) -> &'static str {
                match self {
                    $($enum_name::$variant => $name,)*
                }
            }

            /// Look a function up by its canonical name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some($enum_name::$variant),)*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

sql_functions! {
    /// A scalar function.
    ScalarFunction {
        Add => "ADD",
        Sub => "SUB",
        Mult => "MULT",
        FloatDiv => "FLOAT_DIV",
        Neg => "NEG",
        Abs => "ABS",
        Acos => "ACOS",
        Asin => "ASIN",
        Atan => "ATAN",
        Atan2 => "ATAN2",
        Ceil => "CEIL",
        Cos => "COS",
        Cosh => "COSH",
        Cot => "COT",
        Degrees => "DEGREES",
        Div => "DIV",
        Exp => "EXP",
        Floor => "FLOOR",
        Greatest => "GREATEST",
        Least => "LEAST",
        Ln => "LN",
        Log => "LOG",
        Mod => "MOD",
        Power => "POWER",
        Radians => "RADIANS",
        Rand => "RAND",
        Round => "ROUND",
        Sign => "SIGN",
        Sin => "SIN",
        Sinh => "SINH",
        Sqrt => "SQRT",
        Tan => "TAN",
        Tanh => "TANH",
        Trunc => "TRUNC",
        Ascii => "ASCII",
        BitLength => "BIT_LENGTH",
        Chr => "CHR",
        ColognePhonetic => "COLOGNE_PHONETIC",
        Concat => "CONCAT",
        Dump => "DUMP",
        EditDistance => "EDIT_DISTANCE",
        Insert => "INSERT",
        Instr => "INSTR",
        Length => "LENGTH",
        Locate => "LOCATE",
        Lower => "LOWER",
        Lpad => "LPAD",
        Ltrim => "LTRIM",
        OctetLength => "OCTET_LENGTH",
        RegexpInstr => "REGEXP_INSTR",
        RegexpReplace => "REGEXP_REPLACE",
        RegexpSubstr => "REGEXP_SUBSTR",
        Repeat => "REPEAT",
        Replace => "REPLACE",
        Reverse => "REVERSE",
        Right => "RIGHT",
        Rpad => "RPAD",
        Rtrim => "RTRIM",
        Soundex => "SOUNDEX",
        Space => "SPACE",
        Substr => "SUBSTR",
        Translate => "TRANSLATE",
        Trim => "TRIM",
        Unicode => "UNICODE",
        Unicodechr => "UNICODECHR",
        Upper => "UPPER",
        AddDays => "ADD_DAYS",
        AddHours => "ADD_HOURS",
        AddMinutes => "ADD_MINUTES",
        AddMonths => "ADD_MONTHS",
        AddSeconds => "ADD_SECONDS",
        AddWeeks => "ADD_WEEKS",
        AddYears => "ADD_YEARS",
        ConvertTz => "CONVERT_TZ",
        CurrentDate => "CURRENT_DATE",
        CurrentTimestamp => "CURRENT_TIMESTAMP",
        DateTrunc => "DATE_TRUNC",
        Day => "DAY",
        DaysBetween => "DAYS_BETWEEN",
        Dbtimezone => "DBTIMEZONE",
        Extract => "EXTRACT",
        HoursBetween => "HOURS_BETWEEN",
        Localtimestamp => "LOCALTIMESTAMP",
        Minute => "MINUTE",
        MinutesBetween => "MINUTES_BETWEEN",
        Month => "MONTH",
        MonthsBetween => "MONTHS_BETWEEN",
        Numtodsinterval => "NUMTODSINTERVAL",
        Numtoyminterval => "NUMTOYMINTERVAL",
        PosixTime => "POSIX_TIME",
        Second => "SECOND",
        SecondsBetween => "SECONDS_BETWEEN",
        Sessiontimezone => "SESSIONTIMEZONE",
        Sysdate => "SYSDATE",
        Systimestamp => "SYSTIMESTAMP",
        Week => "WEEK",
        Year => "YEAR",
        YearsBetween => "YEARS_BETWEEN",
        StX => "ST_X",
        StY => "ST_Y",
        StEndpoint => "ST_ENDPOINT",
        StIsclosed => "ST_ISCLOSED",
        StIsring => "ST_ISRING",
        StLength => "ST_LENGTH",
        StNumpoints => "ST_NUMPOINTS",
        StPointn => "ST_POINTN",
        StStartpoint => "ST_STARTPOINT",
        StArea => "ST_AREA",
        StExteriorring => "ST_EXTERIORRING",
        StInteriorringn => "ST_INTERIORRINGN",
        StNuminteriorrings => "ST_NUMINTERIORRINGS",
        StGeometryn => "ST_GEOMETRYN",
        StNumgeometries => "ST_NUMGEOMETRIES",
        StBoundary => "ST_BOUNDARY",
        StBuffer => "ST_BUFFER",
        StCentroid => "ST_CENTROID",
        StContains => "ST_CONTAINS",
        StConvexhull => "ST_CONVEXHULL",
        StCrosses => "ST_CROSSES",
        StDifference => "ST_DIFFERENCE",
        StDimension => "ST_DIMENSION",
        StDisjoint => "ST_DISJOINT",
        StDistance => "ST_DISTANCE",
        StEnvelope => "ST_ENVELOPE",
        StEquals => "ST_EQUALS",
        StForce2d => "ST_FORCE2D",
        StGeometrytype => "ST_GEOMETRYTYPE",
        StIntersection => "ST_INTERSECTION",
        StIntersects => "ST_INTERSECTS",
        StIsempty => "ST_ISEMPTY",
        StIssimple => "ST_ISSIMPLE",
        StOverlaps => "ST_OVERLAPS",
        StSetsrid => "ST_SETSRID",
        StSymdifference => "ST_SYMDIFFERENCE",
        StTouches => "ST_TOUCHES",
        StTransform => "ST_TRANSFORM",
        StUnion => "ST_UNION",
        StWithin => "ST_WITHIN",
        Cast => "CAST",
        IsNumber => "IS_NUMBER",
        IsBoolean => "IS_BOOLEAN",
        IsDate => "IS_DATE",
        IsDsinterval => "IS_DSINTERVAL",
        IsYminterval => "IS_YMINTERVAL",
        IsTimestamp => "IS_TIMESTAMP",
        ToChar => "TO_CHAR",
        ToDate => "TO_DATE",
        ToDsinterval => "TO_DSINTERVAL",
        ToYminterval => "TO_YMINTERVAL",
        ToNumber => "TO_NUMBER",
        ToTimestamp => "TO_TIMESTAMP",
        BitAnd => "BIT_AND",
        BitCheck => "BIT_CHECK",
        BitNot => "BIT_NOT",
        BitOr => "BIT_OR",
        BitSet => "BIT_SET",
        BitToNum => "BIT_TO_NUM",
        BitXor => "BIT_XOR",
        Case => "CASE",
        CurrentSchema => "CURRENT_SCHEMA",
        CurrentSession => "CURRENT_SESSION",
        CurrentStatement => "CURRENT_STATEMENT",
        CurrentUser => "CURRENT_USER",
        HashMd5 => "HASH_MD5",
        HashSha => "HASH_SHA",
        HashSha1 => "HASH_SHA1",
        HashTiger => "HASH_TIGER",
        Nullifzero => "NULLIFZERO",
        SysGuid => "SYS_GUID",
        Zeroifnull => "ZEROIFNULL",
    }
}

impl ScalarFunction {
    /// A simple function has a single textual representation, `NAME(args)`, and may therefore
    /// be renamed by a dialect alias.
    pub fn is_simple(self) -> bool {
        !matches!(
            self,
            ScalarFunction::Extract | ScalarFunction::Cast | ScalarFunction::Case
        )
    }
}

sql_functions! {
    /// An aggregate function.
    AggregateFunction {
        Count => "COUNT",
        Sum => "SUM",
        Min => "MIN",
        Max => "MAX",
        Avg => "AVG",
        Median => "MEDIAN",
        FirstValue => "FIRST_VALUE",
        LastValue => "LAST_VALUE",
        Stddev => "STDDEV",
        StddevPop => "STDDEV_POP",
        StddevSamp => "STDDEV_SAMP",
        Variance => "VARIANCE",
        VarPop => "VAR_POP",
        VarSamp => "VAR_SAMP",
        GroupConcat => "GROUP_CONCAT",
        GeoIntersectionAggregate => "GEO_INTERSECTION_AGGREGATE",
        GeoUnionAggregate => "GEO_UNION_AGGREGATE",
        ApproximateCountDistinct => "APPROXIMATE_COUNT_DISTINCT",
    }
}

impl AggregateFunction {
    pub fn is_simple(self) -> bool {
        self != AggregateFunction::GroupConcat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_lookups_agree() {
        for function in enum_iterator::all::<ScalarFunction>() {
            assert_eq!(ScalarFunction::from_name(function.name()), Some(function));
        }
        for function in enum_iterator::all::<AggregateFunction>() {
            assert_eq!(
                AggregateFunction::from_name(function.name()),
                Some(function)
            );
        }
    }

    #[test]
    fn serialized_form_is_the_canonical_name() {
        assert_eq!(
            serde_json::to_string(&ScalarFunction::StInteriorringn).unwrap(),
            r#""ST_INTERIORRINGN""#
        );
        assert_eq!(
            serde_json::from_str::<AggregateFunction>(r#""VAR_POP""#).unwrap(),
            AggregateFunction::VarPop
        );
    }

    #[test]
    fn only_multi_form_functions_are_not_simple() {
        let complex: Vec<_> = enum_iterator::all::<ScalarFunction>()
            .filter(|function| !function.is_simple())
            .collect();
        assert_eq!(
            complex,
            vec![
                ScalarFunction::Extract,
                ScalarFunction::Cast,
                ScalarFunction::Case
            ]
        );
        assert!(!AggregateFunction::GroupConcat.is_simple());
    }
}
