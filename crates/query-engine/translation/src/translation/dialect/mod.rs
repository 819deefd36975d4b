//! The dialect capability object: every per-database policy the SQL generator consults.
//!
//! A `Dialect` is built once from a `DialectDefinition`, validated, and never changed
//! afterwards, so one value can be shared by any number of concurrent translations. Emission
//! differences between databases are strategy values on the definition, not code paths keyed
//! on the dialect name.

pub mod athena;
pub mod bigquery;
pub mod db2;
pub mod exasol;
pub mod generic;
pub mod hive;
pub mod impala;
pub mod mysql;
pub mod oracle;
pub mod postgresql;
pub mod redshift;
pub mod registry;
pub mod saphana;
pub mod snowflake;
pub mod sqlserver;
pub mod sybase;
pub mod teradata;

use std::collections::{BTreeMap, BTreeSet};

use query_engine_metadata::metadata::{ColumnAdapterNotes, DataType, SchemaAdapterNotes, TypeCode};
use query_engine_sql::sql::ast::{AggregateFunction, ScalarFunction};

use super::capabilities::Capabilities;
use super::error::{DialectError, TranslationError};
use super::identifiers::{IdentifierCaseHandling, IdentifierConverter};
use super::type_mapper::{TypeMapper, TypeMapping};

pub use registry::{DialectContext, DialectRegistry};

/// How identifiers are quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierQuote {
    /// `"name"`, with embedded double quotes doubled.
    DoubleQuotes,
    /// `` `name` ``, with embedded backticks doubled.
    Backticks,
    /// `` `name` ``, with embedded backticks escaped by a backslash.
    EscapedBackticks,
    /// `[name]`.
    SquareBrackets,
    /// `[name]`, for names made of ASCII letters, digits and `_ @ # $ ¥ £` only.
    RestrictedSquareBrackets,
    /// Names made of letters, digits and underscores only. A leading underscore needs
    /// backticks, anything else is double quoted.
    WordCharacters,
    /// The quote string reported by the remote driver. Identifiers containing it are rejected.
    Custom(String),
}

impl IdentifierQuote {
    pub fn quote(&self, identifier: &str) -> Result<String, TranslationError> {
        Ok(match self {
            IdentifierQuote::DoubleQuotes => format!("\"{}\"", identifier.replace('"', "\"\"")),
            IdentifierQuote::Backticks => format!("`{}`", identifier.replace('`', "``")),
            IdentifierQuote::EscapedBackticks => format!("`{}`", identifier.replace('`', "\\`")),
            IdentifierQuote::SquareBrackets => format!("[{identifier}]"),
            IdentifierQuote::RestrictedSquareBrackets => {
                let allowed = |c: char| c.is_ascii_alphanumeric() || "_@#$¥£".contains(c);
                if identifier.is_empty() || !identifier.chars().all(allowed) {
                    return Err(TranslationError::IdentifierCharacters(identifier.to_string()));
                }
                format!("[{identifier}]")
            }
            IdentifierQuote::WordCharacters => {
                let allowed = |c: char| c == '_' || c.is_alphanumeric();
                if identifier.is_empty() || !identifier.chars().all(allowed) {
                    return Err(TranslationError::IdentifierCharacters(identifier.to_string()));
                }
                if identifier.starts_with('_') {
                    format!("`{identifier}`")
                } else {
                    format!("\"{identifier}\"")
                }
            }
            IdentifierQuote::Custom(quote) => {
                // drivers report a blank quote string when quoting is not supported
                if quote.trim().is_empty() {
                    identifier.to_string()
                } else if identifier.contains(quote.as_str()) {
                    return Err(TranslationError::IllegalIdentifier {
                        identifier: identifier.to_string(),
                        quote: quote.clone(),
                    });
                } else {
                    format!("{quote}{identifier}{quote}")
                }
            }
        })
    }
}

/// How string literals are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringLiteralStyle {
    /// `'it''s'`
    Standard,
    /// Backslashes doubled, then quotes doubled.
    BackslashEscaped,
    /// Backslashes doubled, quotes escaped with a backslash.
    BackslashQuoted,
    /// `'it''s'`, rejecting line breaks and backslashes.
    SingleLine,
}

impl StringLiteralStyle {
    pub fn literal(self, value: &str) -> Result<String, TranslationError> {
        Ok(match self {
            StringLiteralStyle::Standard => query_engine_sql::sql::string::quote_string_literal(value),
            StringLiteralStyle::BackslashEscaped => {
                format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
            }
            StringLiteralStyle::BackslashQuoted => {
                format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
            }
            StringLiteralStyle::SingleLine => {
                if value.contains(['\n', '\r', '\\']) {
                    return Err(TranslationError::StringLiteralCharacters(value.to_string()));
                }
                query_engine_sql::sql::string::quote_string_literal(value)
            }
        })
    }
}

/// Where the remote database puts NULLs when a sort does not say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullSorting {
    AtEnd,
    AtStart,
    High,
    Low,
}

impl NullSorting {
    pub fn from_schema_notes(notes: &SchemaAdapterNotes) -> Self {
        if notes.nulls_are_sorted_at_end {
            NullSorting::AtEnd
        } else if notes.nulls_are_sorted_at_start {
            NullSorting::AtStart
        } else if notes.nulls_are_sorted_low {
            NullSorting::Low
        } else {
            NullSorting::High
        }
    }

    pub fn nulls_last_by_default(self, ascending: bool) -> bool {
        match self {
            NullSorting::AtEnd => true,
            NullSorting::AtStart => false,
            NullSorting::High => ascending,
            NullSorting::Low => !ascending,
        }
    }
}

/// How a row limit is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStrategy {
    /// `LIMIT n[ OFFSET k]`
    Standard,
    /// `SELECT TOP n ...`
    Top,
    /// A `ROWNUM` filter around the statement.
    RowNum,
    /// `[OFFSET k ROWS ]FETCH FIRST n ROWS ONLY` after the statement.
    FetchFirst,
}

/// How an explicit NULL position in ORDER BY is written, when it differs from the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    /// `NULLS FIRST` / `NULLS LAST`
    Keywords,
    /// A leading `(CASE WHEN x IS NULL THEN .. ELSE .. END)` sort key.
    CaseExpression,
}

/// How `GROUP_CONCAT` is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupConcatStyle {
    Standard,
    StringAgg,
    /// `LISTAGG(x, sep) WITHIN GROUP(ORDER BY ..)`. `null_order` controls whether the ordering
    /// keeps `NULLS FIRST`.
    ListAgg { null_order: bool },
    /// `GROUP_CONCAT(CAST(x AS STRING)[, sep])`
    CastToString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexpLikeStyle {
    /// `x REGEXP_LIKE p`
    Infix,
    /// `REGEXP_LIKE(x, p)`
    Function,
    /// `x REGEXP p`
    Regexp,
}

/// The family of scalar function rewrites a dialect applies on top of alias resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarRewrites {
    None,
    PostgreSql,
    SqlServer,
    Oracle,
    Db2,
}

/// Selects the columns a projection rule applies to, by source type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMatcher {
    TypeName(&'static str),
    TypeNamePrefix(&'static str),
    TypeCode(TypeCode),
}

impl TypeMatcher {
    pub fn matches(&self, notes: &ColumnAdapterNotes) -> bool {
        match self {
            TypeMatcher::TypeName(name) => notes.type_name == *name,
            TypeMatcher::TypeNamePrefix(prefix) => notes.type_name.starts_with(prefix),
            TypeMatcher::TypeCode(type_code) => notes.type_code() == *type_code,
        }
    }
}

/// What happens to a matching column in a select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionCast {
    /// `<prefix><column><suffix>`
    Wrap {
        prefix: &'static str,
        suffix: &'static str,
    },
    /// A constant marking the column as unreadable.
    NotSupported,
    /// A bare string constant naming the unreadable type.
    NotSupportedLiteral,
    /// Oracle `NUMBER`: text for columns mapped to text, an explicit cast for columns mapped to
    /// the numeric override.
    OracleNumber,
}

impl ProjectionCast {
    /// The projection of a column, or `None` when this cast leaves the column alone.
    pub fn apply(
        &self,
        column: &str,
        notes: &ColumnAdapterNotes,
        data_type: &DataType,
        numeric_override: Option<DataType>,
    ) -> Option<String> {
        match self {
            ProjectionCast::Wrap { prefix, suffix } => Some(format!("{prefix}{column}{suffix}")),
            ProjectionCast::NotSupported => Some(format!(
                "cast('{} NOT SUPPORTED' as varchar) as not_supported",
                notes.type_name
            )),
            ProjectionCast::NotSupportedLiteral => {
                Some(format!("'{} NOT SUPPORTED'", notes.type_name))
            }
            ProjectionCast::OracleNumber => match (data_type, numeric_override) {
                (DataType::Varchar { .. }, _) => Some(format!("TO_CHAR({column})")),
                (
                    DataType::Decimal { precision, scale },
                    Some(DataType::Decimal {
                        precision: override_precision,
                        scale: override_scale,
                    }),
                ) if *precision == override_precision && *scale == override_scale => Some(
                    format!("CAST({column} AS DECIMAL({precision},{scale}))"),
                ),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionRule {
    pub matcher: TypeMatcher,
    pub cast: ProjectionCast,
}

impl ProjectionRule {
    pub fn new(matcher: TypeMatcher, cast: ProjectionCast) -> Self {
        ProjectionRule { matcher, cast }
    }

    pub fn wrap(matcher: TypeMatcher, prefix: &'static str, suffix: &'static str) -> Self {
        ProjectionRule::new(matcher, ProjectionCast::Wrap { prefix, suffix })
    }
}

/// Casts applied to expressions sitting directly in a select list, for drivers that report
/// unusable result metadata for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectListCasts {
    pub float_aggregates: BTreeSet<AggregateFunction>,
    pub float_scalars: BTreeSet<ScalarFunction>,
    pub double_aggregates: BTreeSet<AggregateFunction>,
    pub numeric_literals_to_char: bool,
}

/// How typed literals are spelled. `{value}` stands for the quoted value, `{precision}` and
/// `{fraction}` for the interval type's leading and fractional precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralTemplates {
    pub date: &'static str,
    pub timestamp: &'static str,
    pub interval_year_to_month: &'static str,
    pub interval_day_to_second: &'static str,
}

impl Default for LiteralTemplates {
    fn default() -> Self {
        LiteralTemplates {
            date: "DATE {value}",
            timestamp: "TIMESTAMP {value}",
            interval_year_to_month: "INTERVAL {value} YEAR ({precision}) TO MONTH",
            interval_day_to_second: "INTERVAL {value} DAY ({precision}) TO SECOND ({fraction})",
        }
    }
}

impl LiteralTemplates {
    /// Fill a template. The value goes in last so placeholders inside it stay untouched.
    pub fn fill(template: &str, value: &str, precision: u32, fraction: u32) -> String {
        let mut parts = template.split("{value}");
        let mut sql = String::new();
        if let Some(first) = parts.next() {
            sql.push_str(&fill_precision(first, precision, fraction));
        }
        for part in parts {
            sql.push_str(value);
            sql.push_str(&fill_precision(part, precision, fraction));
        }
        sql
    }
}

fn fill_precision(template: &str, precision: u32, fraction: u32) -> String {
    template
        .replace("{precision}", &precision.to_string())
        .replace("{fraction}", &fraction.to_string())
}

/// Which import statements other than `IMPORT ... FROM JDBC` a dialect allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSupport {
    pub local: bool,
    pub from_exa: bool,
    pub from_ora: bool,
}

/// Everything that makes up a dialect, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectDefinition {
    pub name: &'static str,
    pub identifier_quote: IdentifierQuote,
    pub lower_case_before_quoting: bool,
    pub identifier_converter: IdentifierConverter,
    pub string_literal: StringLiteralStyle,
    pub catalog_qualified: bool,
    pub schema_qualified: bool,
    pub catalog_separator: String,
    pub null_sorting: NullSorting,
    pub null_ordering: NullOrdering,
    pub scalar_aliases: BTreeMap<ScalarFunction, String>,
    pub aggregate_aliases: BTreeMap<AggregateFunction, String>,
    pub infix_aliases: BTreeMap<ScalarFunction, String>,
    pub prefix_aliases: BTreeMap<ScalarFunction, String>,
    pub omit_parentheses: BTreeSet<ScalarFunction>,
    pub limit: LimitStrategy,
    pub group_concat: GroupConcatStyle,
    pub regexp_like: RegexpLikeStyle,
    pub scalar_rewrites: ScalarRewrites,
    pub projection_rules: Vec<ProjectionRule>,
    pub select_list_casts: SelectListCasts,
    pub literal_templates: LiteralTemplates,
    pub type_mapping: TypeMapping,
    pub capabilities: Capabilities,
    pub import_support: ImportSupport,
}

impl DialectDefinition {
    /// A schema qualified, double quoting dialect with the default alias maps and no
    /// capabilities.
    pub fn new(name: &'static str) -> Self {
        DialectDefinition {
            name,
            identifier_quote: IdentifierQuote::DoubleQuotes,
            lower_case_before_quoting: false,
            identifier_converter: IdentifierConverter::Standard(IdentifierCaseHandling::default()),
            string_literal: StringLiteralStyle::Standard,
            catalog_qualified: false,
            schema_qualified: true,
            catalog_separator: ".".to_string(),
            null_sorting: NullSorting::AtEnd,
            null_ordering: NullOrdering::Keywords,
            scalar_aliases: BTreeMap::new(),
            aggregate_aliases: default_aggregate_aliases(),
            infix_aliases: default_infix_aliases(),
            prefix_aliases: BTreeMap::from([(ScalarFunction::Neg, "-".to_string())]),
            omit_parentheses: BTreeSet::new(),
            limit: LimitStrategy::Standard,
            group_concat: GroupConcatStyle::Standard,
            regexp_like: RegexpLikeStyle::Infix,
            scalar_rewrites: ScalarRewrites::None,
            projection_rules: vec![],
            select_list_casts: SelectListCasts::default(),
            literal_templates: LiteralTemplates::default(),
            type_mapping: TypeMapping::Standard,
            capabilities: Capabilities::empty(),
            import_support: ImportSupport::default(),
        }
    }

    pub fn with_scalar_aliases<const N: usize>(
        mut self,
        aliases: [(ScalarFunction, &'static str); N],
    ) -> Self {
        self.scalar_aliases
            .extend(aliases.into_iter().map(|(f, alias)| (f, alias.to_string())));
        self
    }

    pub fn with_aggregate_aliases<const N: usize>(
        mut self,
        aliases: [(AggregateFunction, &'static str); N],
    ) -> Self {
        self.aggregate_aliases
            .extend(aliases.into_iter().map(|(f, alias)| (f, alias.to_string())));
        self
    }
}

fn default_infix_aliases() -> BTreeMap<ScalarFunction, String> {
    BTreeMap::from([
        (ScalarFunction::Add, "+".to_string()),
        (ScalarFunction::Sub, "-".to_string()),
        (ScalarFunction::Mult, "*".to_string()),
        (ScalarFunction::FloatDiv, "/".to_string()),
    ])
}

fn default_aggregate_aliases() -> BTreeMap<AggregateFunction, String> {
    BTreeMap::from([
        (
            AggregateFunction::GeoIntersectionAggregate,
            "ST_INTERSECTION".to_string(),
        ),
        (AggregateFunction::GeoUnionAggregate, "ST_UNION".to_string()),
    ])
}

/// A validated, immutable dialect bound to a catalog and schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    definition: DialectDefinition,
    catalog_name: Option<String>,
    schema_name: Option<String>,
    type_mapper: TypeMapper,
}

impl Dialect {
    /// Validate a definition. Aliases are only allowed for functions with a single textual
    /// representation.
    pub fn new(
        definition: DialectDefinition,
        context: &DialectContext,
    ) -> Result<Dialect, DialectError> {
        if let Some(function) = definition
            .scalar_aliases
            .keys()
            .find(|function| !function.is_simple())
        {
            return Err(DialectError::AliasForNonSimpleFunction {
                dialect: definition.name,
                function: function.name().to_string(),
            });
        }
        if let Some(function) = definition
            .aggregate_aliases
            .keys()
            .find(|function| !function.is_simple())
        {
            return Err(DialectError::AliasForNonSimpleFunction {
                dialect: definition.name,
                function: function.name().to_string(),
            });
        }
        let type_mapper = TypeMapper::new(definition.type_mapping, context.numeric_override);
        Ok(Dialect {
            definition,
            catalog_name: context.catalog_name.clone(),
            schema_name: context.schema_name.clone(),
            type_mapper,
        })
    }

    pub fn name(&self) -> &'static str {
        self.definition.name
    }

    pub fn definition(&self) -> &DialectDefinition {
        &self.definition
    }

    /// The constructs this dialect can execute, before any exclusions.
    pub fn capabilities(&self) -> &Capabilities {
        &self.definition.capabilities
    }

    pub fn type_mapper(&self) -> &TypeMapper {
        &self.type_mapper
    }

    pub fn identifier_converter(&self) -> IdentifierConverter {
        self.definition.identifier_converter
    }

    pub fn import_support(&self) -> ImportSupport {
        self.definition.import_support
    }

    pub fn catalog_name(&self) -> Option<&str> {
        self.catalog_name.as_deref()
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema_name.as_deref()
    }

    pub fn quote_identifier(&self, identifier: &str) -> Result<String, TranslationError> {
        if self.definition.lower_case_before_quoting {
            self.definition
                .identifier_quote
                .quote(&identifier.to_lowercase())
        } else {
            self.definition.identifier_quote.quote(identifier)
        }
    }

    pub fn string_literal(&self, value: &str) -> Result<String, TranslationError> {
        self.definition.string_literal.literal(value)
    }

    pub fn nulls_last_by_default(&self, ascending: bool) -> bool {
        self.definition.null_sorting.nulls_last_by_default(ascending)
    }
}

/// Build a capability set from a dialect's declared lists.
macro_rules! capabilities {
    (
        main: [$($main:ident),* $(,)?],
        literals: [$($literal:ident),* $(,)?],
        predicates: [$($predicate:ident),* $(,)?],
        aggregates: [$($aggregate:ident),* $(,)?],
        scalars: [$($scalar:ident),* $(,)?] $(,)?
    ) => {
        $crate::translation::capabilities::Capabilities {
            main: [$($crate::translation::capabilities::MainCapability::$main),*].into_iter().collect(),
            literals: [$($crate::translation::capabilities::LiteralCapability::$literal),*].into_iter().collect(),
            predicates: [$($crate::translation::capabilities::PredicateCapability::$predicate),*].into_iter().collect(),
            aggregate_functions: [$($crate::translation::capabilities::AggregateFunctionCapability::$aggregate),*].into_iter().collect(),
            scalar_functions: [$(query_engine_sql::sql::ast::ScalarFunction::$scalar),*].into_iter().collect(),
        }
    };
}

pub(crate) use capabilities;
