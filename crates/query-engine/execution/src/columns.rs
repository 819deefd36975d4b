//! Column listings read from `information_schema.columns`.

use query_engine_metadata::metadata::{RemoteAccessError, RemoteColumn, TypeCode};
use serde::Deserialize;
use sqlx::{PgConnection, Row};

/// Reported size of `text` and of `varchar` without a length.
const UNBOUNDED_TEXT_SIZE: u32 = 2_147_483_647;
/// Reported precision of `numeric` without a precision.
const UNCONSTRAINED_NUMERIC_PRECISION: u32 = 1000;

/// One JSON array of column objects, in ordinal order. `$1` is the schema, the current one when
/// null; `$2` is the table and `$3` optionally restricts the database.
const COLUMNS_QUERY: &str = "
    select coalesce(
        json_agg(
            json_build_object(
                'name', c.column_name,
                'udtName', c.udt_name,
                'characterMaximumLength', c.character_maximum_length,
                'characterOctetLength', c.character_octet_length,
                'numericPrecision', c.numeric_precision,
                'numericScale', c.numeric_scale,
                'isNullable', c.is_nullable,
                'isIdentity', c.is_identity,
                'columnDefault', c.column_default,
                'remarks', col_description(
                    format('%I.%I', c.table_schema, c.table_name)::regclass,
                    c.ordinal_position
                )
            )
            order by c.ordinal_position
        ),
        '[]'::json
    )
    from information_schema.columns c
    where c.table_schema = coalesce($1::text, current_schema()::text)
      and c.table_name = $2
      and ($3::text is null or c.table_catalog = $3)
";

/// A column as `information_schema.columns` describes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRow {
    pub name: String,
    pub udt_name: String,
    pub character_maximum_length: Option<i64>,
    pub character_octet_length: Option<i64>,
    pub numeric_precision: Option<i64>,
    pub numeric_scale: Option<i64>,
    pub is_nullable: String,
    pub is_identity: Option<String>,
    pub column_default: Option<String>,
    pub remarks: Option<String>,
}

impl ColumnRow {
    fn is_sequence_backed(&self) -> bool {
        self.column_default
            .as_deref()
            .is_some_and(|default| default.starts_with("nextval("))
    }

    /// Integer columns filled from a sequence are reported under their `serial` names.
    fn type_name(&self) -> &str {
        match (self.udt_name.as_str(), self.is_sequence_backed()) {
            ("int2", true) => "smallserial",
            ("int4", true) => "serial",
            ("int8", true) => "bigserial",
            (name, _) => name,
        }
    }

    pub fn into_remote_column(self) -> RemoteColumn {
        let type_code = type_code(&self.udt_name);
        let column_size = match type_code {
            TypeCode::SmallInt => 5,
            TypeCode::Integer => 10,
            TypeCode::BigInt => 19,
            TypeCode::Numeric => {
                to_u32(self.numeric_precision).unwrap_or(UNCONSTRAINED_NUMERIC_PRECISION)
            }
            TypeCode::Char | TypeCode::Varchar => {
                to_u32(self.character_maximum_length).unwrap_or(UNBOUNDED_TEXT_SIZE)
            }
            _ => 0,
        };
        let is_autoincrement = self.is_sequence_backed()
            || self
                .is_identity
                .as_deref()
                .is_some_and(|identity| identity.eq_ignore_ascii_case("YES"));

        RemoteColumn {
            type_code,
            column_size,
            decimal_digits: self
                .numeric_scale
                .and_then(|scale| i32::try_from(scale).ok())
                .unwrap_or(0),
            char_octet_length: to_u32(self.character_octet_length).unwrap_or(0),
            type_name: self.type_name().to_string(),
            remarks: self.remarks,
            column_default: self.column_default,
            is_autoincrement: Some(if is_autoincrement { "YES" } else { "NO" }.to_string()),
            is_nullable: Some(self.is_nullable),
            name: self.name,
        }
    }
}

/// The type code the PostgreSQL JDBC driver reports for a `udt_name`.
pub fn type_code(udt_name: &str) -> TypeCode {
    match udt_name {
        "bool" => TypeCode::Bit,
        "int2" => TypeCode::SmallInt,
        "int4" | "oid" => TypeCode::Integer,
        "int8" => TypeCode::BigInt,
        "float4" => TypeCode::Real,
        "float8" => TypeCode::Double,
        "numeric" => TypeCode::Numeric,
        "bpchar" | "char" => TypeCode::Char,
        "varchar" | "text" | "name" => TypeCode::Varchar,
        "date" => TypeCode::Date,
        "time" | "timetz" => TypeCode::Time,
        "timestamp" | "timestamptz" => TypeCode::Timestamp,
        "bytea" => TypeCode::Binary,
        "xml" => TypeCode::SqlXml,
        array if array.starts_with('_') => TypeCode::Array,
        _ => TypeCode::Other,
    }
}

fn to_u32(value: Option<i64>) -> Option<u32> {
    value.and_then(|value| u32::try_from(value).ok())
}

/// Read the columns of one table or view.
pub(crate) async fn read_columns(
    connection: &mut PgConnection,
    catalog: Option<&str>,
    schema: Option<&str>,
    table: &str,
) -> Result<Vec<RemoteColumn>, RemoteAccessError> {
    let context = || format!("unable to read the columns of {table}");
    let row = sqlx::query(COLUMNS_QUERY)
        .bind(schema)
        .bind(table)
        .bind(catalog)
        .fetch_one(connection)
        .await
        .map_err(|error| RemoteAccessError::new(context(), error))?;
    let rows: Vec<ColumnRow> = row
        .try_get::<serde_json::Value, _>(0)
        .map_err(|error| RemoteAccessError::new(context(), error))
        .and_then(|value| {
            serde_json::from_value(value).map_err(|error| RemoteAccessError::new(context(), error))
        })?;
    Ok(rows.into_iter().map(ColumnRow::into_remote_column).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn row(udt_name: &str) -> ColumnRow {
        ColumnRow {
            name: "c".to_string(),
            udt_name: udt_name.to_string(),
            character_maximum_length: None,
            character_octet_length: None,
            numeric_precision: None,
            numeric_scale: None,
            is_nullable: "YES".to_string(),
            is_identity: Some("NO".to_string()),
            column_default: None,
            remarks: None,
        }
    }

    #[test]
    fn rows_deserialize_from_the_catalog_json() {
        let rows: Vec<ColumnRow> = serde_json::from_str(
            r#"[{"name":"id","udtName":"int4","characterMaximumLength":null,
                 "characterOctetLength":null,"numericPrecision":32,"numericScale":0,
                 "isNullable":"NO","isIdentity":"NO","columnDefault":null,"remarks":"key"}]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].remarks.as_deref(), Some("key"));
    }

    #[test]
    fn integers_report_driver_precisions() {
        let mut integer = row("int4");
        integer.numeric_precision = Some(32);
        let column = integer.into_remote_column();
        assert_eq!(column.type_code, TypeCode::Integer);
        assert_eq!(column.column_size, 10);
        assert_eq!(column.type_name, "int4");
    }

    #[test]
    fn sequence_backed_integers_are_serials() {
        let mut serial = row("int8");
        serial.column_default = Some("nextval('orders_id_seq'::regclass)".to_string());
        let column = serial.into_remote_column();
        assert_eq!(column.type_name, "bigserial");
        assert_eq!(column.is_autoincrement.as_deref(), Some("YES"));
    }

    #[test]
    fn unbounded_types_report_the_widest_size() {
        assert_eq!(row("text").into_remote_column().column_size, UNBOUNDED_TEXT_SIZE);
        assert_eq!(
            row("numeric").into_remote_column().column_size,
            UNCONSTRAINED_NUMERIC_PRECISION
        );

        let mut bounded = row("numeric");
        bounded.numeric_precision = Some(12);
        bounded.numeric_scale = Some(3);
        let column = bounded.into_remote_column();
        assert_eq!((column.column_size, column.decimal_digits), (12, 3));
    }

    #[test]
    fn driver_type_codes() {
        assert_eq!(type_code("bool"), TypeCode::Bit);
        assert_eq!(type_code("timestamptz"), TypeCode::Timestamp);
        assert_eq!(type_code("_int4"), TypeCode::Array);
        assert_eq!(type_code("jsonb"), TypeCode::Other);
        assert_eq!(type_code("varbit"), TypeCode::Other);
    }
}
