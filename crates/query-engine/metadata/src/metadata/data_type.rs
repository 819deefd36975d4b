//! The normalized column type system every remote type is mapped onto.

use std::fmt;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest precision a `DECIMAL` can carry.
pub const MAX_DECIMAL_PRECISION: u32 = 36;

/// Largest size of a `VARCHAR`.
pub const MAX_VARCHAR_SIZE: u32 = 2_000_000;

/// Largest size of a `CHAR`.
pub const MAX_CHAR_SIZE: u32 = 2_000;

/// Character set of a string column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Charset {
    Utf8,
    Ascii,
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charset::Utf8 => write!(f, "UTF8"),
            Charset::Ascii => write!(f, "ASCII"),
        }
    }
}

/// The two interval families.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum IntervalType {
    YearToMonth,
    DayToSecond,
}

/// A normalized column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataType {
    Decimal {
        precision: u32,
        scale: u32,
    },
    Double,
    Varchar {
        size: u32,
        charset: Charset,
    },
    Char {
        size: u32,
        charset: Charset,
    },
    Boolean,
    Date,
    Timestamp {
        #[serde(default)]
        with_local_time_zone: bool,
    },
    Interval {
        interval_type: IntervalType,
        precision: u32,
        /// Fractional second digits, only meaningful for `DAY TO SECOND`.
        #[serde(default)]
        fraction: u32,
    },
    Geometry {
        srid: u32,
    },
    /// Marker for a remote type that has no normalized counterpart.
    Unsupported,
}

impl DataType {
    pub fn decimal(precision: u32, scale: u32) -> Self {
        DataType::Decimal { precision, scale }
    }

    pub fn varchar(size: u32, charset: Charset) -> Self {
        DataType::Varchar { size, charset }
    }

    /// The catch-all text type used by every fallback rule.
    pub fn max_size_varchar(charset: Charset) -> Self {
        DataType::Varchar {
            size: MAX_VARCHAR_SIZE,
            charset,
        }
    }

    pub fn char(size: u32, charset: Charset) -> Self {
        DataType::Char { size, charset }
    }

    pub fn timestamp(with_local_time_zone: bool) -> Self {
        DataType::Timestamp {
            with_local_time_zone,
        }
    }

    pub fn interval_year_to_month(precision: u32) -> Self {
        DataType::Interval {
            interval_type: IntervalType::YearToMonth,
            precision,
            fraction: 0,
        }
    }

    pub fn interval_day_to_second(precision: u32, fraction: u32) -> Self {
        DataType::Interval {
            interval_type: IntervalType::DayToSecond,
            precision,
            fraction,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, DataType::Unsupported)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Decimal { precision, scale } => write!(f, "DECIMAL({precision}, {scale})"),
            DataType::Double => write!(f, "DOUBLE"),
            DataType::Varchar { size, charset } => write!(f, "VARCHAR({size}) {charset}"),
            DataType::Char { size, charset } => write!(f, "CHAR({size}) {charset}"),
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Date => write!(f, "DATE"),
            DataType::Timestamp {
                with_local_time_zone: false,
            } => write!(f, "TIMESTAMP"),
            DataType::Timestamp {
                with_local_time_zone: true,
            } => write!(f, "TIMESTAMP WITH LOCAL TIME ZONE"),
            DataType::Interval {
                interval_type: IntervalType::YearToMonth,
                precision,
                ..
            } => write!(f, "INTERVAL YEAR ({precision}) TO MONTH"),
            DataType::Interval {
                interval_type: IntervalType::DayToSecond,
                precision,
                fraction,
            } => write!(f, "INTERVAL DAY ({precision}) TO SECOND ({fraction})"),
            DataType::Geometry { srid } => write!(f, "GEOMETRY({srid})"),
            DataType::Unsupported => write!(f, "UNSUPPORTED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn renders_type_names_used_in_column_descriptions() {
        let cases = [
            (DataType::decimal(18, 2), "DECIMAL(18, 2)"),
            (DataType::Double, "DOUBLE"),
            (DataType::varchar(20, Charset::Ascii), "VARCHAR(20) ASCII"),
            (
                DataType::max_size_varchar(Charset::Utf8),
                "VARCHAR(2000000) UTF8",
            ),
            (DataType::char(3, Charset::Utf8), "CHAR(3) UTF8"),
            (DataType::Boolean, "BOOLEAN"),
            (DataType::Date, "DATE"),
            (DataType::timestamp(false), "TIMESTAMP"),
            (
                DataType::timestamp(true),
                "TIMESTAMP WITH LOCAL TIME ZONE",
            ),
            (
                DataType::interval_year_to_month(2),
                "INTERVAL YEAR (2) TO MONTH",
            ),
            (
                DataType::interval_day_to_second(2, 3),
                "INTERVAL DAY (2) TO SECOND (3)",
            ),
            (DataType::Geometry { srid: 4326 }, "GEOMETRY(4326)"),
        ];
        for (data_type, expected) in cases {
            assert_eq!(data_type.to_string(), expected);
        }
    }

    #[test]
    fn only_the_marker_is_unsupported() {
        assert!(!DataType::Unsupported.is_supported());
        assert!(DataType::Double.is_supported());
    }

    #[test]
    fn serializes_with_a_type_tag() {
        let json = serde_json::to_value(DataType::varchar(10, Charset::Utf8)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "varchar", "size": 10, "charset": "UTF8"})
        );
    }
}
