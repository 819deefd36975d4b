//! The boundary towards the remote database: the type codes it reports, the rows of a catalog
//! scan and the traits the translation layer uses to reach a live connection.

use async_trait::async_trait;
use thiserror::Error;

use super::adapter_notes::SchemaAdapterNotes;

macro_rules! type_codes {
    ($($variant:ident = $code:literal),* $(,)?) => {
        /// A JDBC style type code as reported by a catalog scan or a result set description.
        /// Vendor specific codes are kept verbatim.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TypeCode {
            $($variant,)*
            Vendor(i32),
        }

        impl TypeCode {
            pub fn from_code(code: i32) -> Self {
                match code {
                    $($code => TypeCode::$variant,)*
                    other => TypeCode::Vendor(other),
                }
            }

            pub fn code(self) -> i32 {
                match self {
                    $(TypeCode::$variant => $code,)*
                    TypeCode::Vendor(code) => code,
                }
            }
        }
    };
}

type_codes! {
    Bit = -7,
    TinyInt = -6,
    SmallInt = 5,
    Integer = 4,
    BigInt = -5,
    Float = 6,
    Real = 7,
    Double = 8,
    Numeric = 2,
    Decimal = 3,
    Char = 1,
    Varchar = 12,
    LongVarchar = -1,
    NChar = -15,
    NVarchar = -9,
    LongNVarchar = -16,
    Date = 91,
    Time = 92,
    Timestamp = 93,
    TimeWithTimeZone = 2013,
    TimestampWithTimeZone = 2014,
    Binary = -2,
    VarBinary = -3,
    LongVarBinary = -4,
    Null = 0,
    Other = 1111,
    JavaObject = 2000,
    Distinct = 2001,
    Struct = 2002,
    Array = 2003,
    Blob = 2004,
    Clob = 2005,
    Ref = 2006,
    Datalink = 70,
    Boolean = 16,
    RowId = -8,
    NClob = 2011,
    SqlXml = 2009,
    RefCursor = 2012,
}

impl From<i32> for TypeCode {
    fn from(code: i32) -> Self {
        TypeCode::from_code(code)
    }
}

/// The type of one remote column, transient between a scan and the type mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTypeDescriptor {
    pub type_code: TypeCode,
    pub decimal_scale: i32,
    pub precision_or_size: u32,
    pub octet_length: u32,
    pub type_name: String,
}

impl RemoteTypeDescriptor {
    pub fn new(type_code: TypeCode) -> Self {
        RemoteTypeDescriptor {
            type_code,
            decimal_scale: 0,
            precision_or_size: 0,
            octet_length: 0,
            type_name: String::new(),
        }
    }

    #[must_use]
    pub fn with_precision(mut self, precision_or_size: u32) -> Self {
        self.precision_or_size = precision_or_size;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, decimal_scale: i32) -> Self {
        self.decimal_scale = decimal_scale;
        self
    }

    #[must_use]
    pub fn with_octet_length(mut self, octet_length: u32) -> Self {
        self.octet_length = octet_length;
        self
    }

    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }
}

/// What kind of relation a catalog entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Table,
    View,
    Other,
}

impl TableKind {
    /// Interpret the `TABLE_TYPE` column of a catalog listing.
    pub fn from_catalog(table_type: &str) -> Self {
        match table_type.to_ascii_uppercase().as_str() {
            "TABLE" | "BASE TABLE" => TableKind::Table,
            "VIEW" => TableKind::View,
            _ => TableKind::Other,
        }
    }
}

/// A relation listed by a catalog scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTable {
    pub name: String,
    pub comment: Option<String>,
    pub kind: TableKind,
}

/// One row of a column listing, holding the catalog fields used by the metadata readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteColumn {
    pub name: String,
    pub type_code: TypeCode,
    pub column_size: u32,
    pub decimal_digits: i32,
    pub char_octet_length: u32,
    pub type_name: String,
    pub remarks: Option<String>,
    pub column_default: Option<String>,
    pub is_autoincrement: Option<String>,
    pub is_nullable: Option<String>,
}

impl RemoteColumn {
    pub fn type_descriptor(&self) -> RemoteTypeDescriptor {
        RemoteTypeDescriptor {
            type_code: self.type_code,
            decimal_scale: self.decimal_digits,
            precision_or_size: self.column_size,
            octet_length: self.char_octet_length,
            type_name: self.type_name.clone(),
        }
    }
}

/// A failure while talking to the remote database. The driver error is kept as the source.
#[derive(Debug, Error)]
#[error("{context}")]
pub struct RemoteAccessError {
    pub context: String,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl RemoteAccessError {
    pub fn new(
        context: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        RemoteAccessError {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// Read access to the catalog of the remote database.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// List the tables and views of the given catalog and schema.
    async fn tables(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
    ) -> Result<Vec<RemoteTable>, RemoteAccessError>;

    /// List the columns of a single table in ordinal order.
    async fn columns(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: &str,
    ) -> Result<Vec<RemoteColumn>, RemoteAccessError>;

    /// Identifier and null sorting properties of the remote database.
    async fn schema_properties(&self) -> Result<SchemaAdapterNotes, RemoteAccessError>;
}

/// Describes the result columns of a query without fetching rows.
#[async_trait]
pub trait ResultSetProbe: Send + Sync {
    async fn describe(&self, query: &str) -> Result<Vec<RemoteTypeDescriptor>, RemoteAccessError>;
}
