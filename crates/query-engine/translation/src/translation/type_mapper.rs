//! Map remote type descriptors onto the normalized column types.

use query_engine_metadata::metadata::{
    Charset, DataType, RemoteTypeDescriptor, TypeCode, MAX_CHAR_SIZE, MAX_DECIMAL_PRECISION,
    MAX_VARCHAR_SIZE,
};

/// Scale Oracle reports for a `NUMBER` declared without precision and scale.
pub const ORACLE_MAGIC_NUMBER_SCALE: i32 = -127;

const DEFAULT_SMALL_INTEGER_PRECISION: u32 = 9;
const DEFAULT_INTEGER_PRECISION: u32 = 18;
const DEFAULT_BIG_INTEGER_PRECISION: u32 = 36;

const MYSQL_TEXT_TYPE_NAME: &str = "TEXT";
const MYSQL_TEXT_SIZE: u32 = 65_535;
const POSTGRESQL_VARBIT_TYPE_NAME: &str = "varbit";

const ORACLE_TIMESTAMP_WITH_LOCAL_TIME_ZONE: i32 = -101;
const ORACLE_TIMESTAMP_WITH_TIME_ZONE: i32 = -102;
const ORACLE_INTERVAL_YEAR_TO_MONTH: i32 = -103;
const ORACLE_INTERVAL_DAY_TO_SECOND: i32 = -104;
const ORACLE_BINARY_FLOAT: i32 = 100;
const ORACLE_BINARY_DOUBLE: i32 = 101;

/// Size of the text DB2 timestamps are read as.
const DB2_TIMESTAMP_TEXT_SIZE: u32 = 32;

/// Type code SQL Server reports for `DATETIMEOFFSET`.
pub const SQLSERVER_DATETIME_OFFSET: i32 = -155;

/// The per-dialect layer of overrides on top of the base mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMapping {
    Standard,
    PostgreSql,
    MySql,
    Oracle,
    SqlServer,
    Db2,
}

/// Maps remote type descriptors for one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapper {
    mapping: TypeMapping,
    numeric_override: Option<DataType>,
}

impl TypeMapper {
    pub fn new(mapping: TypeMapping, numeric_override: Option<DataType>) -> Self {
        TypeMapper {
            mapping,
            numeric_override,
        }
    }

    pub fn mapping(&self) -> TypeMapping {
        self.mapping
    }

    pub fn numeric_override(&self) -> Option<DataType> {
        self.numeric_override
    }

    /// The normalized type of a remote column.
    pub fn map(&self, descriptor: &RemoteTypeDescriptor) -> DataType {
        let data_type = match self.mapping {
            TypeMapping::Standard => self.map_base(descriptor),
            TypeMapping::PostgreSql => self.map_postgresql(descriptor),
            TypeMapping::MySql => self.map_mysql(descriptor),
            TypeMapping::Oracle => self.map_oracle(descriptor),
            TypeMapping::SqlServer => self.map_sqlserver(descriptor),
            TypeMapping::Db2 => self.map_db2(descriptor),
        };
        if !data_type.is_supported() {
            tracing::debug!(
                type_code = descriptor.type_code.code(),
                type_name = %descriptor.type_name,
                "remote type has no normalized counterpart"
            );
        }
        data_type
    }

    fn map_base(&self, descriptor: &RemoteTypeDescriptor) -> DataType {
        let precision = descriptor.precision_or_size;
        match descriptor.type_code {
            TypeCode::TinyInt | TypeCode::SmallInt => {
                integer(precision, DEFAULT_SMALL_INTEGER_PRECISION)
            }
            TypeCode::Integer => integer(precision, DEFAULT_INTEGER_PRECISION),
            TypeCode::BigInt => integer(precision, DEFAULT_BIG_INTEGER_PRECISION),
            TypeCode::Decimal | TypeCode::Numeric => {
                if precision <= MAX_DECIMAL_PRECISION {
                    DataType::decimal(precision, clamp_scale(descriptor.decimal_scale))
                } else {
                    self.wide_decimal_fallback()
                }
            }
            TypeCode::Real | TypeCode::Float | TypeCode::Double => DataType::Double,
            TypeCode::Varchar
            | TypeCode::NVarchar
            | TypeCode::LongVarchar
            | TypeCode::LongNVarchar => varchar(precision, charset_of(descriptor)),
            TypeCode::Char | TypeCode::NChar => {
                if precision <= MAX_CHAR_SIZE {
                    DataType::char(precision, charset_of(descriptor))
                } else {
                    varchar(precision, charset_of(descriptor))
                }
            }
            TypeCode::Date => DataType::Date,
            TypeCode::Timestamp => DataType::timestamp(false),
            TypeCode::Bit | TypeCode::Boolean => DataType::Boolean,
            _ => DataType::Unsupported,
        }
    }

    fn wide_decimal_fallback(&self) -> DataType {
        self.numeric_override
            .unwrap_or_else(|| DataType::max_size_varchar(Charset::Utf8))
    }

    fn map_postgresql(&self, descriptor: &RemoteTypeDescriptor) -> DataType {
        match descriptor.type_code {
            TypeCode::Other if descriptor.type_name == POSTGRESQL_VARBIT_TYPE_NAME => {
                DataType::varchar(descriptor.precision_or_size, Charset::Utf8)
            }
            TypeCode::Other | TypeCode::SqlXml | TypeCode::Distinct | TypeCode::Binary => {
                DataType::max_size_varchar(Charset::Utf8)
            }
            _ => self.map_base(descriptor),
        }
    }

    fn map_mysql(&self, descriptor: &RemoteTypeDescriptor) -> DataType {
        match descriptor.type_code {
            TypeCode::Time => DataType::timestamp(false),
            TypeCode::Binary => DataType::Unsupported,
            TypeCode::LongVarchar => {
                let size = if descriptor.type_name == MYSQL_TEXT_TYPE_NAME {
                    MYSQL_TEXT_SIZE
                } else {
                    descriptor.precision_or_size
                };
                let charset = if descriptor.octet_length == size {
                    Charset::Ascii
                } else {
                    Charset::Utf8
                };
                varchar(size, charset)
            }
            _ => self.map_base(descriptor),
        }
    }

    fn map_oracle(&self, descriptor: &RemoteTypeDescriptor) -> DataType {
        match descriptor.type_code {
            TypeCode::Decimal | TypeCode::Numeric => {
                if descriptor.decimal_scale == ORACLE_MAGIC_NUMBER_SCALE
                    || descriptor.precision_or_size > MAX_DECIMAL_PRECISION
                {
                    self.wide_decimal_fallback()
                } else {
                    DataType::decimal(
                        descriptor.precision_or_size,
                        clamp_scale(descriptor.decimal_scale),
                    )
                }
            }
            TypeCode::Vendor(
                ORACLE_TIMESTAMP_WITH_TIME_ZONE | ORACLE_TIMESTAMP_WITH_LOCAL_TIME_ZONE,
            ) => DataType::timestamp(false),
            TypeCode::NClob
            | TypeCode::Other
            | TypeCode::RowId
            | TypeCode::Vendor(
                ORACLE_INTERVAL_YEAR_TO_MONTH
                | ORACLE_INTERVAL_DAY_TO_SECOND
                | ORACLE_BINARY_FLOAT
                | ORACLE_BINARY_DOUBLE,
            ) => DataType::max_size_varchar(Charset::Utf8),
            TypeCode::Blob => DataType::Unsupported,
            _ => self.map_base(descriptor),
        }
    }

    fn map_sqlserver(&self, descriptor: &RemoteTypeDescriptor) -> DataType {
        match descriptor.type_code {
            TypeCode::Numeric => {
                if descriptor.precision_or_size <= MAX_DECIMAL_PRECISION {
                    DataType::decimal(
                        descriptor.precision_or_size,
                        clamp_scale(descriptor.decimal_scale),
                    )
                } else {
                    DataType::Double
                }
            }
            TypeCode::Vendor(SQLSERVER_DATETIME_OFFSET) => {
                DataType::varchar(descriptor.precision_or_size, Charset::Utf8)
            }
            _ => self.map_base(descriptor),
        }
    }
}

impl TypeMapper {
    /// DB2 columns are mostly read as text: timestamps keep their full precision that way and
    /// binary columns arrive hex encoded.
    fn map_db2(&self, descriptor: &RemoteTypeDescriptor) -> DataType {
        let size = descriptor.precision_or_size;
        match descriptor.type_code {
            TypeCode::Clob | TypeCode::Other => DataType::max_size_varchar(Charset::Utf8),
            TypeCode::Timestamp => DataType::varchar(DB2_TIMESTAMP_TEXT_SIZE, Charset::Utf8),
            TypeCode::Varchar
            | TypeCode::NVarchar
            | TypeCode::LongVarchar
            | TypeCode::Char
            | TypeCode::NChar
            | TypeCode::LongNVarchar => {
                DataType::varchar(size.min(MAX_VARCHAR_SIZE), Charset::Utf8)
            }
            TypeCode::Binary if size.saturating_mul(2) <= MAX_CHAR_SIZE => {
                DataType::char(size * 2, Charset::Ascii)
            }
            TypeCode::Binary | TypeCode::VarBinary => {
                DataType::varchar(size.saturating_mul(2).min(MAX_VARCHAR_SIZE), Charset::Ascii)
            }
            _ => self.map_base(descriptor),
        }
    }
}

fn integer(precision: u32, default_precision: u32) -> DataType {
    if precision > MAX_DECIMAL_PRECISION {
        DataType::max_size_varchar(Charset::Utf8)
    } else if precision == 0 {
        DataType::decimal(default_precision, 0)
    } else {
        DataType::decimal(precision, 0)
    }
}

fn varchar(precision: u32, charset: Charset) -> DataType {
    let size = if precision == 0 {
        MAX_VARCHAR_SIZE
    } else {
        precision.min(MAX_VARCHAR_SIZE)
    };
    DataType::varchar(size, charset)
}

fn charset_of(descriptor: &RemoteTypeDescriptor) -> Charset {
    if descriptor.octet_length == descriptor.precision_or_size {
        Charset::Ascii
    } else {
        Charset::Utf8
    }
}

fn clamp_scale(scale: i32) -> u32 {
    u32::try_from(scale).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn standard() -> TypeMapper {
        TypeMapper::new(TypeMapping::Standard, None)
    }

    fn descriptor(type_code: TypeCode, precision: u32) -> RemoteTypeDescriptor {
        RemoteTypeDescriptor::new(type_code).with_precision(precision)
    }

    #[test]
    fn integers_take_default_precisions() {
        let mapper = standard();
        assert_eq!(
            mapper.map(&descriptor(TypeCode::SmallInt, 0)),
            DataType::decimal(9, 0)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Integer, 0)),
            DataType::decimal(18, 0)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::BigInt, 0)),
            DataType::decimal(36, 0)
        );
    }

    #[test]
    fn precision_boundary_falls_back_to_text() {
        let mapper = standard();
        for type_code in [
            TypeCode::SmallInt,
            TypeCode::Integer,
            TypeCode::BigInt,
            TypeCode::Decimal,
        ] {
            assert_eq!(
                mapper.map(&descriptor(type_code, MAX_DECIMAL_PRECISION)),
                DataType::decimal(MAX_DECIMAL_PRECISION, 0),
                "{type_code:?}"
            );
            assert_eq!(
                mapper.map(&descriptor(type_code, MAX_DECIMAL_PRECISION + 1)),
                DataType::max_size_varchar(Charset::Utf8),
                "{type_code:?}"
            );
        }
    }

    #[test]
    fn wide_integer_is_a_utf8_varchar() {
        assert_eq!(
            standard().map(&descriptor(TypeCode::Integer, 40)),
            DataType::varchar(MAX_VARCHAR_SIZE, Charset::Utf8)
        );
    }

    #[test]
    fn numeric_override_replaces_the_decimal_fallback() {
        let mapper = TypeMapper::new(TypeMapping::Standard, Some(DataType::decimal(36, 4)));
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Numeric, 50)),
            DataType::decimal(36, 4)
        );
    }

    #[test]
    fn varchar_charset_follows_the_octet_length() {
        let mapper = standard();
        let ascii = descriptor(TypeCode::Varchar, 20).with_octet_length(20);
        let utf8 = descriptor(TypeCode::Varchar, 20).with_octet_length(80);
        assert_eq!(mapper.map(&ascii), DataType::varchar(20, Charset::Ascii));
        assert_eq!(mapper.map(&utf8), DataType::varchar(20, Charset::Utf8));
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Varchar, 0).with_octet_length(4)),
            DataType::varchar(MAX_VARCHAR_SIZE, Charset::Utf8)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::LongVarchar, 3_000_000).with_octet_length(1)),
            DataType::varchar(MAX_VARCHAR_SIZE, Charset::Utf8)
        );
    }

    #[test]
    fn wide_char_becomes_varchar() {
        let mapper = standard();
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Char, 10).with_octet_length(10)),
            DataType::char(10, Charset::Ascii)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::NChar, 3_000).with_octet_length(12_000)),
            DataType::varchar(3_000, Charset::Utf8)
        );
    }

    #[test]
    fn other_types_are_unsupported_at_the_base_layer() {
        let mapper = standard();
        for type_code in [
            TypeCode::Binary,
            TypeCode::Blob,
            TypeCode::Clob,
            TypeCode::Array,
            TypeCode::Struct,
            TypeCode::Time,
            TypeCode::Vendor(-155),
        ] {
            assert_eq!(
                mapper.map(&descriptor(type_code, 10)),
                DataType::Unsupported,
                "{type_code:?}"
            );
        }
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Bit, 1)),
            DataType::Boolean
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Timestamp, 29)),
            DataType::timestamp(false)
        );
    }

    #[test]
    fn postgresql_maps_varbit_and_other_types_to_text() {
        let mapper = TypeMapper::new(TypeMapping::PostgreSql, None);
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Other, 5).with_type_name("varbit")),
            DataType::varchar(5, Charset::Utf8)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Other, 0).with_type_name("json")),
            DataType::max_size_varchar(Charset::Utf8)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Binary, 0).with_type_name("bytea")),
            DataType::max_size_varchar(Charset::Utf8)
        );
    }

    #[test]
    fn mysql_text_has_a_fixed_size() {
        let mapper = TypeMapper::new(TypeMapping::MySql, None);
        assert_eq!(
            mapper.map(
                &descriptor(TypeCode::LongVarchar, 0)
                    .with_type_name("TEXT")
                    .with_octet_length(65_535)
            ),
            DataType::varchar(65_535, Charset::Ascii)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Time, 8)),
            DataType::timestamp(false)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Binary, 8)),
            DataType::Unsupported
        );
    }

    #[test]
    fn oracle_number_without_precision_uses_the_override() {
        let number = descriptor(TypeCode::Numeric, 0)
            .with_scale(ORACLE_MAGIC_NUMBER_SCALE)
            .with_type_name("NUMBER");
        assert_eq!(
            TypeMapper::new(TypeMapping::Oracle, None).map(&number),
            DataType::max_size_varchar(Charset::Utf8)
        );
        assert_eq!(
            TypeMapper::new(TypeMapping::Oracle, Some(DataType::decimal(36, 10))).map(&number),
            DataType::decimal(36, 10)
        );
        assert_eq!(
            TypeMapper::new(TypeMapping::Oracle, None)
                .map(&descriptor(TypeCode::Numeric, 10).with_scale(2)),
            DataType::decimal(10, 2)
        );
    }

    #[test]
    fn oracle_vendor_types() {
        let mapper = TypeMapper::new(TypeMapping::Oracle, None);
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Vendor(-101), 11)),
            DataType::timestamp(false)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Vendor(-104), 11)),
            DataType::max_size_varchar(Charset::Utf8)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Blob, 0)),
            DataType::Unsupported
        );
    }

    #[test]
    fn sqlserver_numeric_falls_back_to_double() {
        let mapper = TypeMapper::new(TypeMapping::SqlServer, None);
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Numeric, 38)),
            DataType::Double
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Decimal, 38)),
            DataType::max_size_varchar(Charset::Utf8)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Vendor(SQLSERVER_DATETIME_OFFSET), 34)),
            DataType::varchar(34, Charset::Utf8)
        );
    }

    #[test]
    fn db2_reads_text_timestamps_and_hex_binaries() {
        let mapper = TypeMapper::new(TypeMapping::Db2, None);
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Timestamp, 26)),
            DataType::varchar(32, Charset::Utf8)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Clob, 0)),
            DataType::max_size_varchar(Charset::Utf8)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Char, 10)),
            DataType::varchar(10, Charset::Utf8)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Binary, 8)),
            DataType::char(16, Charset::Ascii)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::VarBinary, 100)),
            DataType::varchar(200, Charset::Ascii)
        );
        assert_eq!(
            mapper.map(&descriptor(TypeCode::Date, 0)),
            DataType::Date
        );
    }
}
