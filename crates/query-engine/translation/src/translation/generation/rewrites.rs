//! Scalar functions a dialect expresses with its own syntax instead of `NAME(args)`.

use query_engine_metadata::metadata::ColumnAdapterNotes;
use query_engine_sql::sql::ast::{Expression, ScalarFunction};

use super::functions::argument_count;
use super::Generator;
use crate::translation::dialect::ScalarRewrites;
use crate::translation::error::TranslationError;

/// Largest `VARCHAR` SQL Server accepts without `MAX`.
const SQLSERVER_MAX_VARCHAR_SIZE: u32 = 8000;

fn expected(count: usize) -> &'static str {
    match count {
        0 => "0",
        1 => "1",
        2 => "2",
        3 => "3",
        _ => "a fixed number of",
    }
}

impl Generator<'_> {
    /// The dialect-specific rendering of a scalar function, if the dialect has one.
    pub(super) fn rewrite_scalar(
        &self,
        function: ScalarFunction,
        arguments: &[Expression],
    ) -> Result<Option<String>, TranslationError> {
        match self.dialect.definition().scalar_rewrites {
            ScalarRewrites::None => Ok(None),
            ScalarRewrites::PostgreSql => self.postgresql_rewrite(function, arguments),
            ScalarRewrites::SqlServer => self.sqlserver_rewrite(function, arguments),
            ScalarRewrites::Oracle => self.oracle_rewrite(function, arguments),
            ScalarRewrites::Db2 => self.db2_rewrite(function, arguments),
        }
    }

    /// Render exactly `N` arguments.
    fn rendered<const N: usize>(
        &self,
        function: ScalarFunction,
        arguments: &[Expression],
    ) -> Result<[String; N], TranslationError> {
        if arguments.len() != N {
            return Err(argument_count(function, expected(N), arguments.len()));
        }
        let rendered = self.rendered_all(arguments)?;
        rendered
            .try_into()
            .map_err(|rendered: Vec<String>| argument_count(function, expected(N), rendered.len()))
    }

    /// Render a required prefix of `N` arguments followed by at most one optional argument.
    fn rendered_with_optional<const N: usize>(
        &self,
        function: ScalarFunction,
        arguments: &[Expression],
        expectation: &'static str,
    ) -> Result<([String; N], Option<String>), TranslationError> {
        if arguments.len() != N && arguments.len() != N + 1 {
            return Err(argument_count(function, expectation, arguments.len()));
        }
        let (required, optional) = arguments.split_at(N);
        let required = self.rendered::<N>(function, required)?;
        let optional = optional
            .first()
            .map(|argument| self.render(argument))
            .transpose()?;
        Ok((required, optional))
    }

    fn rendered_all(&self, arguments: &[Expression]) -> Result<Vec<String>, TranslationError> {
        arguments
            .iter()
            .map(|argument| self.render(argument))
            .collect()
    }

    fn postgresql_rewrite(
        &self,
        function: ScalarFunction,
        arguments: &[Expression],
    ) -> Result<Option<String>, TranslationError> {
        use ScalarFunction as F;
        let sql = match function {
            F::AddDays | F::AddHours | F::AddMinutes | F::AddSeconds | F::AddWeeks | F::AddYears => {
                let unit = match function {
                    F::AddDays => "day",
                    F::AddHours => "hour",
                    F::AddMinutes => "minute",
                    F::AddSeconds => "second",
                    F::AddWeeks => "week",
                    _ => "year",
                };
                let [date, amount] = self.rendered(function, arguments)?;
                format!("{date} +  interval '{amount} {unit}'")
            }
            F::SecondsBetween
            | F::MinutesBetween
            | F::HoursBetween
            | F::DaysBetween
            | F::MonthsBetween
            | F::YearsBetween => {
                let [later, earlier] = self.rendered(function, arguments)?;
                format!(
                    "DATE_PART('{}', AGE({earlier},{later}))",
                    between_unit(function)
                )
            }
            F::Second | F::Minute | F::Day | F::Week | F::Month | F::Year => {
                let [date] = self.rendered(function, arguments)?;
                format!("DATE_PART('{}',{date})", function.name())
            }
            F::PosixTime => {
                let [date] = self.rendered(function, arguments)?;
                format!("EXTRACT(EPOCH FROM {date})")
            }
            _ => return Ok(None),
        };
        Ok(Some(sql))
    }

    fn sqlserver_rewrite(
        &self,
        function: ScalarFunction,
        arguments: &[Expression],
    ) -> Result<Option<String>, TranslationError> {
        use ScalarFunction as F;
        let sql = match function {
            F::Instr => {
                let ([string, search], position) =
                    self.rendered_with_optional(function, arguments, "2 or 3")?;
                match position {
                    Some(position) => format!("CHARINDEX({search}, {string}, {position})"),
                    None => format!("CHARINDEX({search}, {string})"),
                }
            }
            F::Lpad | F::Rpad => {
                let ([string, length], padding) =
                    self.rendered_with_optional(function, arguments, "2 or 3")?;
                let padding = padding.unwrap_or_else(|| "' '".to_string());
                if function == F::Lpad {
                    format!(
                        "RIGHT ( REPLICATE({padding},{length}) + LEFT({string},{length}),{length})"
                    )
                } else {
                    format!(
                        "LEFT(RIGHT({string},{length}) + REPLICATE({padding},{length}),{length})"
                    )
                }
            }
            F::AddDays | F::AddHours | F::AddMinutes | F::AddSeconds | F::AddWeeks | F::AddYears => {
                let unit = match function {
                    F::AddDays => "DAY",
                    F::AddHours => "HOUR",
                    F::AddMinutes => "MINUTE",
                    F::AddSeconds => "SECOND",
                    F::AddWeeks => "WEEK",
                    _ => "YEAR",
                };
                let [date, amount] = self.rendered(function, arguments)?;
                format!("DATEADD({unit},{amount},{date})")
            }
            F::SecondsBetween
            | F::MinutesBetween
            | F::HoursBetween
            | F::DaysBetween
            | F::MonthsBetween
            | F::YearsBetween => {
                let [later, earlier] = self.rendered(function, arguments)?;
                format!("DATEDIFF({},{earlier},{later})", between_unit(function))
            }
            F::CurrentDate => "CAST(GETDATE() AS DATE)".to_string(),
            F::CurrentTimestamp => "GETDATE()".to_string(),
            F::Sysdate => "CAST( SYSDATETIME() AS DATE)".to_string(),
            F::Systimestamp => "SYSDATETIME()".to_string(),
            F::StX | F::StY => {
                let [geometry] = self.rendered(function, arguments)?;
                let property = if function == F::StX { "STX" } else { "STY" };
                format!("{geometry}.{property}")
            }
            F::StIsclosed
            | F::StIsring
            | F::StLength
            | F::StNumpoints
            | F::StArea
            | F::StNuminteriorrings
            | F::StNumgeometries
            | F::StDimension
            | F::StGeometrytype
            | F::StIsempty
            | F::StIssimple => {
                let [geometry] = self.rendered(function, arguments)?;
                format!("{geometry}.{}()", geometry_method(function))
            }
            F::StContains
            | F::StCrosses
            | F::StDistance
            | F::StEquals
            | F::StIntersects
            | F::StOverlaps
            | F::StTouches
            | F::StWithin => {
                let [geometry, other] = self.rendered(function, arguments)?;
                format!("{geometry}.{}({other})", geometry_method(function))
            }
            F::StEndpoint
            | F::StStartpoint
            | F::StExteriorring
            | F::StBoundary
            | F::StCentroid
            | F::StConvexhull
            | F::StEnvelope => {
                let [geometry] = self.rendered(function, arguments)?;
                format!(
                    "CAST({geometry}.{}()as VARCHAR({SQLSERVER_MAX_VARCHAR_SIZE}) )",
                    geometry_method(function)
                )
            }
            F::StPointn
            | F::StInteriorringn
            | F::StGeometryn
            | F::StBuffer
            | F::StDifference
            | F::StDisjoint
            | F::StIntersection
            | F::StSymdifference
            | F::StUnion => {
                let [geometry, other] = self.rendered(function, arguments)?;
                format!(
                    "CAST({geometry}.{}{other})as VARCHAR({SQLSERVER_MAX_VARCHAR_SIZE}) )",
                    geometry_method(function)
                )
            }
            F::BitAnd | F::BitOr | F::BitXor => {
                let [left, right] = self.rendered(function, arguments)?;
                let operator = match function {
                    F::BitAnd => "&",
                    F::BitOr => "|",
                    _ => "^",
                };
                format!("{left} {operator} {right}")
            }
            F::BitNot => {
                let [operand] = self.rendered(function, arguments)?;
                format!("~ {operand}")
            }
            F::HashMd5 | F::HashSha1 => {
                let [value] = self.rendered(function, arguments)?;
                let algorithm = if function == F::HashMd5 { "MD5" } else { "SHA1" };
                format!("CONVERT(Char, HASHBYTES('{algorithm}',{value}), 2)")
            }
            F::Zeroifnull => {
                let [value] = self.rendered(function, arguments)?;
                format!("ISNULL({value},0)")
            }
            _ => return Ok(None),
        };
        Ok(Some(sql))
    }

    fn oracle_rewrite(
        &self,
        function: ScalarFunction,
        arguments: &[Expression],
    ) -> Result<Option<String>, TranslationError> {
        use ScalarFunction as F;
        let sql = match function {
            F::Locate => {
                let ([search, string], position) =
                    self.rendered_with_optional(function, arguments, "2 or 3")?;
                match position {
                    Some(position) => format!("INSTR({string}, {search}, {position})"),
                    None => format!("INSTR({string}, {search})"),
                }
            }
            F::Trim => {
                let ([string], characters) =
                    self.rendered_with_optional(function, arguments, "1 or 2")?;
                match characters {
                    Some(characters) => format!("TRIM({characters} FROM {string})"),
                    None => format!("TRIM({string})"),
                }
            }
            F::AddDays | F::AddHours | F::AddMinutes | F::AddSeconds | F::AddWeeks | F::AddYears => {
                let [date, amount] = self.rendered(function, arguments)?;
                let (amount, unit) = match function {
                    F::AddWeeks => (weeks_in_days(function, &amount)?, "DAY"),
                    F::AddDays => (amount, "DAY"),
                    F::AddHours => (amount, "HOUR"),
                    F::AddMinutes => (amount, "MINUTE"),
                    F::AddSeconds => (amount, "SECOND"),
                    _ => (amount, "YEAR"),
                };
                format!("({date} + INTERVAL '{amount}' {unit})")
            }
            F::Sysdate => "TO_DATE(SYSDATE)".to_string(),
            F::BitAnd | F::BitToNum => {
                let name = if function == F::BitAnd {
                    "BITAND"
                } else {
                    "BIN_TO_NUM"
                };
                format!("{name}({})", self.rendered_all(arguments)?.join(", "))
            }
            F::Nullifzero => {
                let [value] = self.rendered(function, arguments)?;
                format!("NULLIF({value}, 0)")
            }
            F::Zeroifnull => {
                let [value] = self.rendered(function, arguments)?;
                format!("NVL({value}, 0)")
            }
            F::Div => {
                let [dividend, divisor] = self.rendered(function, arguments)?;
                format!("CAST(FLOOR({dividend} / {divisor}) AS NUMBER(36, 0))")
            }
            F::Cot => {
                let [angle] = self.rendered(function, arguments)?;
                format!("(1 / TAN({angle}))")
            }
            F::Degrees => {
                let [angle] = self.rendered(function, arguments)?;
                format!("(({angle}) * 180 / ACOS(-1))")
            }
            F::Radians => {
                let [angle] = self.rendered(function, arguments)?;
                format!("(({angle}) * ACOS(-1) / 180)")
            }
            F::Repeat => {
                let [string, times] = self.rendered(function, arguments)?;
                format!("RPAD(TO_CHAR({string}), LENGTH({string}) * ROUND({times}), {string})")
            }
            F::Reverse => {
                let [string] = self.rendered(function, arguments)?;
                format!("REVERSE(TO_CHAR({string}))")
            }
            _ => return Ok(None),
        };
        Ok(Some(sql))
    }
}

impl Generator<'_> {
    fn db2_rewrite(
        &self,
        function: ScalarFunction,
        arguments: &[Expression],
    ) -> Result<Option<String>, TranslationError> {
        use ScalarFunction as F;
        let sql = match function {
            F::Trim => {
                let ([string], characters) =
                    self.rendered_with_optional(function, arguments, "1 or 2")?;
                match characters {
                    Some(characters) => format!("TRIM({characters} FROM {string})"),
                    None => format!("TRIM({string})"),
                }
            }
            F::AddDays | F::AddHours | F::AddMinutes | F::AddSeconds | F::AddWeeks | F::AddYears => {
                let [date, amount] = self.rendered(function, arguments)?;
                let (amount, unit) = match function {
                    F::AddWeeks => (weeks_in_days(function, &amount)?, "DAYS"),
                    F::AddDays => (amount, "DAYS"),
                    F::AddHours => (amount, "HOURS"),
                    F::AddMinutes => (amount, "MINUTES"),
                    F::AddSeconds => (amount, "SECONDS"),
                    _ => (amount, "YEARS"),
                };
                if self.is_timestamp_column(&arguments[0])? {
                    format!("VARCHAR({date} + {amount} {unit})")
                } else {
                    format!("{date} + {amount} {unit}")
                }
            }
            F::CurrentDate | F::Sysdate => "CURRENT DATE".to_string(),
            F::CurrentTimestamp | F::Systimestamp => "VARCHAR(CURRENT TIMESTAMP)".to_string(),
            F::Dbtimezone => "DBTIMEZONE".to_string(),
            F::Localtimestamp => "LOCALTIMESTAMP".to_string(),
            F::Sessiontimezone => "SESSIONTIMEZONE".to_string(),
            F::BitAnd | F::BitToNum => {
                let name = if function == F::BitAnd {
                    "BITAND"
                } else {
                    "BIN_TO_NUM"
                };
                format!("{name}({})", self.rendered_all(arguments)?.join(", "))
            }
            F::Nullifzero => {
                let [value] = self.rendered(function, arguments)?;
                format!("NULLIF({value}, 0)")
            }
            F::Zeroifnull => {
                let [value] = self.rendered(function, arguments)?;
                format!("IFNULL({value}, 0)")
            }
            F::Div => {
                let [dividend, divisor] = self.rendered(function, arguments)?;
                format!("CAST(FLOOR({dividend} / FLOOR({divisor})) AS DECIMAL(36, 0))")
            }
            _ => return Ok(None),
        };
        Ok(Some(sql))
    }

    /// Whether the expression is a column whose remote type is a timestamp.
    fn is_timestamp_column(&self, expression: &Expression) -> Result<bool, TranslationError> {
        let Expression::Column(column) = expression else {
            return Ok(false);
        };
        if column.metadata.adapter_notes.is_empty() {
            return Ok(false);
        }
        let notes = ColumnAdapterNotes::from_json(&column.metadata.adapter_notes).map_err(
            |source| TranslationError::MalformedColumnAdapterNotes {
                column: column.name().to_string(),
                source,
            },
        )?;
        Ok(notes.type_name.contains("TIMESTAMP"))
    }
}

fn weeks_in_days(function: ScalarFunction, amount: &str) -> Result<String, TranslationError> {
    let weeks: i64 = amount
        .trim()
        .parse()
        .map_err(|_| TranslationError::ExpectedNumericLiteral(function.name().to_string()))?;
    weeks
        .checked_mul(7)
        .map(|days| days.to_string())
        .ok_or_else(|| TranslationError::ExpectedNumericLiteral(function.name().to_string()))
}

fn between_unit(function: ScalarFunction) -> &'static str {
    match function {
        ScalarFunction::SecondsBetween => "SECOND",
        ScalarFunction::MinutesBetween => "MINUTE",
        ScalarFunction::HoursBetween => "HOUR",
        ScalarFunction::DaysBetween => "DAY",
        ScalarFunction::MonthsBetween => "MONTH",
        _ => "YEAR",
    }
}

/// The SQL Server geometry method, including the opening parenthesis for methods taking an
/// argument inside a cast.
fn geometry_method(function: ScalarFunction) -> &'static str {
    use ScalarFunction as F;
    match function {
        F::StIsclosed => "STIsClosed",
        F::StIsring => "STIsRing",
        F::StLength => "STLength",
        F::StNumpoints => "STNumPoints",
        F::StArea => "STArea",
        F::StNuminteriorrings => "STNumInteriorRing",
        F::StNumgeometries => "STNumGeometries",
        F::StDimension => "STDimension",
        F::StGeometrytype => "STGeometryType",
        F::StIsempty => "STIsEmpty",
        F::StIssimple => "STIsSimple",
        F::StContains => "STContains",
        F::StCrosses => "STCrosses",
        F::StDistance => "STDistance",
        F::StEquals => "STEquals",
        F::StIntersects => "STIntersects",
        F::StOverlaps => "STOverlaps",
        F::StTouches => "STTouches",
        F::StWithin => "STWithin",
        F::StEndpoint => "STEndPoint",
        F::StStartpoint => "STStartPoint",
        F::StExteriorring => "STExteriorRing",
        F::StBoundary => "STBoundary",
        F::StCentroid => "STCentroid",
        F::StConvexhull => "STConvexHull",
        F::StEnvelope => "STEnvelope",
        F::StPointn => "STPointN(",
        F::StInteriorringn => "STInteriorRingN (",
        F::StGeometryn => "STGeometryN(",
        F::StBuffer => "STBuffer(",
        F::StDifference => "STDifference(",
        F::StDisjoint => "STDisjoint(",
        F::StIntersection => "STIntersection(",
        F::StSymdifference => "STSymDifference (",
        F::StUnion => "STUnion(",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use query_engine_metadata::metadata::{ColumnAdapterNotes, ColumnMetadata, DataType, TypeCode};
    use query_engine_sql::sql::ast::{Expression, ScalarFunction};
    use query_engine_sql::sql::helpers;
    use similar_asserts::assert_eq;

    use crate::translation::dialect::{DialectContext, DialectRegistry};
    use crate::translation::error::TranslationError;
    use crate::translation::generation::Generator;

    fn rewrite(
        dialect: &str,
        function: ScalarFunction,
        arguments: Vec<Expression>,
    ) -> Result<Option<String>, TranslationError> {
        let dialect = DialectRegistry::with_builtin_dialects()
            .resolve(dialect, &DialectContext::default())
            .unwrap();
        Generator::new(&dialect).rewrite_scalar(function, &arguments)
    }

    fn column(name: &str) -> Expression {
        helpers::column(0, ColumnMetadata::new(name, DataType::Date))
    }

    fn number(value: &str) -> Expression {
        helpers::exact_numeric(value)
    }

    #[test]
    fn postgresql_date_arithmetic() {
        assert_eq!(
            rewrite(
                "POSTGRESQL",
                ScalarFunction::AddDays,
                vec![column("d"), number("10")]
            )
            .unwrap()
            .as_deref(),
            Some("\"d\" +  interval '10 day'")
        );
        assert_eq!(
            rewrite(
                "POSTGRESQL",
                ScalarFunction::MonthsBetween,
                vec![column("a"), column("b")]
            )
            .unwrap()
            .as_deref(),
            Some("DATE_PART('MONTH', AGE(\"b\",\"a\"))")
        );
        assert_eq!(
            rewrite("POSTGRESQL", ScalarFunction::Week, vec![column("d")])
                .unwrap()
                .as_deref(),
            Some("DATE_PART('WEEK',\"d\")")
        );
        assert_eq!(
            rewrite("POSTGRESQL", ScalarFunction::PosixTime, vec![column("d")])
                .unwrap()
                .as_deref(),
            Some("EXTRACT(EPOCH FROM \"d\")")
        );
        assert_eq!(
            rewrite(
                "POSTGRESQL",
                ScalarFunction::AddMonths,
                vec![column("d"), number("1")]
            )
            .unwrap(),
            None
        );
    }

    #[test]
    fn sqlserver_string_functions() {
        let text = || helpers::string_literal("test");
        assert_eq!(
            rewrite(
                "SQLSERVER",
                ScalarFunction::Instr,
                vec![text(), helpers::string_literal("test2"), helpers::string_literal("test3")]
            )
            .unwrap()
            .as_deref(),
            Some("CHARINDEX('test2', 'test', 'test3')")
        );
        assert_eq!(
            rewrite(
                "SQLSERVER",
                ScalarFunction::Lpad,
                vec![text(), number("5")]
            )
            .unwrap()
            .as_deref(),
            Some("RIGHT ( REPLICATE(' ',5) + LEFT('test',5),5)")
        );
        assert_eq!(
            rewrite(
                "SQLSERVER",
                ScalarFunction::Rpad,
                vec![text(), number("5"), helpers::string_literal("x")]
            )
            .unwrap()
            .as_deref(),
            Some("LEFT(RIGHT('test',5) + REPLICATE('x',5),5)")
        );
    }

    #[test]
    fn sqlserver_dates_and_clock() {
        assert_eq!(
            rewrite(
                "SQLSERVER",
                ScalarFunction::AddWeeks,
                vec![column("D"), number("10")]
            )
            .unwrap()
            .as_deref(),
            Some("DATEADD(WEEK,10,[D])")
        );
        assert_eq!(
            rewrite(
                "SQLSERVER",
                ScalarFunction::DaysBetween,
                vec![column("D"), number("10")]
            )
            .unwrap()
            .as_deref(),
            Some("DATEDIFF(DAY,10,[D])")
        );
        assert_eq!(
            rewrite("SQLSERVER", ScalarFunction::Sysdate, vec![])
                .unwrap()
                .as_deref(),
            Some("CAST( SYSDATETIME() AS DATE)")
        );
    }

    #[test]
    fn sqlserver_geometry_methods() {
        let cases = [
            (ScalarFunction::StX, vec![column("G")], "[G].STX"),
            (ScalarFunction::StArea, vec![column("G")], "[G].STArea()"),
            (
                ScalarFunction::StWithin,
                vec![column("G"), column("H")],
                "[G].STWithin([H])",
            ),
            (
                ScalarFunction::StEnvelope,
                vec![column("G")],
                "CAST([G].STEnvelope()as VARCHAR(8000) )",
            ),
            (
                ScalarFunction::StSymdifference,
                vec![column("G"), column("H")],
                "CAST([G].STSymDifference ([H])as VARCHAR(8000) )",
            ),
        ];
        for (function, arguments, expected) in cases {
            assert_eq!(
                rewrite("SQLSERVER", function, arguments).unwrap().as_deref(),
                Some(expected)
            );
        }
    }

    #[test]
    fn sqlserver_bits_and_hashes() {
        let text = || helpers::string_literal("left");
        assert_eq!(
            rewrite(
                "SQLSERVER",
                ScalarFunction::BitXor,
                vec![text(), helpers::string_literal("right")]
            )
            .unwrap()
            .as_deref(),
            Some("'left' ^ 'right'")
        );
        assert_eq!(
            rewrite("SQLSERVER", ScalarFunction::BitNot, vec![text()])
                .unwrap()
                .as_deref(),
            Some("~ 'left'")
        );
        assert_eq!(
            rewrite("SQLSERVER", ScalarFunction::HashSha1, vec![text()])
                .unwrap()
                .as_deref(),
            Some("CONVERT(Char, HASHBYTES('SHA1','left'), 2)")
        );
        assert_eq!(
            rewrite("SQLSERVER", ScalarFunction::Zeroifnull, vec![text()])
                .unwrap()
                .as_deref(),
            Some("ISNULL('left',0)")
        );
    }

    #[test]
    fn oracle_rewrites() {
        let cases = [
            (
                ScalarFunction::Locate,
                vec![helpers::string_literal("a"), column("S")],
                "INSTR(\"S\", 'a')",
            ),
            (
                ScalarFunction::Trim,
                vec![column("S"), helpers::string_literal("x")],
                "TRIM('x' FROM \"S\")",
            ),
            (
                ScalarFunction::AddWeeks,
                vec![column("D"), number("2")],
                "(\"D\" + INTERVAL '14' DAY)",
            ),
            (
                ScalarFunction::AddHours,
                vec![column("D"), number("3")],
                "(\"D\" + INTERVAL '3' HOUR)",
            ),
            (ScalarFunction::Sysdate, vec![], "TO_DATE(SYSDATE)"),
            (
                ScalarFunction::Div,
                vec![number("7"), number("2")],
                "CAST(FLOOR(7 / 2) AS NUMBER(36, 0))",
            ),
            (ScalarFunction::Degrees, vec![column("A")], "((\"A\") * 180 / ACOS(-1))"),
            (
                ScalarFunction::Repeat,
                vec![column("S"), number("3")],
                "RPAD(TO_CHAR(\"S\"), LENGTH(\"S\") * ROUND(3), \"S\")",
            ),
            (
                ScalarFunction::BitAnd,
                vec![number("6"), number("3")],
                "BITAND(6, 3)",
            ),
        ];
        for (function, arguments, expected) in cases {
            assert_eq!(
                rewrite("ORACLE", function, arguments).unwrap().as_deref(),
                Some(expected)
            );
        }
        assert_eq!(
            rewrite("ORACLE", ScalarFunction::AddMonths, vec![column("D"), number("1")]).unwrap(),
            None
        );
    }

    #[test]
    fn oracle_week_arithmetic_needs_a_number() {
        assert!(matches!(
            rewrite("ORACLE", ScalarFunction::AddWeeks, vec![column("D"), column("N")]),
            Err(TranslationError::ExpectedNumericLiteral(_))
        ));
    }

    #[test]
    fn rewrites_check_their_arity() {
        let error = rewrite("SQLSERVER", ScalarFunction::Instr, vec![column("S")]).unwrap_err();
        assert!(matches!(
            error,
            TranslationError::ArgumentCount {
                expected: "2 or 3",
                actual: 1,
                ..
            }
        ));
        assert_eq!(
            error.to_string(),
            TranslationError::ArgumentCount {
                function: "INSTR".to_string(),
                expected: "2 or 3",
                actual: 1,
            }
            .to_string()
        );
    }

    #[test]
    fn dialects_without_rewrites_decline() {
        assert_eq!(
            rewrite("EXASOL", ScalarFunction::AddDays, vec![column("D"), number("1")]).unwrap(),
            None
        );
    }

    #[test]
    fn db2_rewrites() {
        let created = helpers::column(
            0,
            ColumnMetadata::new("CREATED", DataType::timestamp(false)).with_adapter_notes(
                ColumnAdapterNotes::new(TypeCode::Timestamp, "TIMESTAMP")
                    .to_json()
                    .unwrap(),
            ),
        );
        let cases = [
            (
                ScalarFunction::AddWeeks,
                vec![column("D"), number("2")],
                "\"D\" + 14 DAYS",
            ),
            (
                ScalarFunction::AddHours,
                vec![created, number("3")],
                "VARCHAR(\"CREATED\" + 3 HOURS)",
            ),
            (
                ScalarFunction::Trim,
                vec![column("S"), helpers::string_literal("x")],
                "TRIM('x' FROM \"S\")",
            ),
            (ScalarFunction::Sysdate, vec![], "CURRENT DATE"),
            (
                ScalarFunction::CurrentTimestamp,
                vec![],
                "VARCHAR(CURRENT TIMESTAMP)",
            ),
            (
                ScalarFunction::Zeroifnull,
                vec![column("N")],
                "IFNULL(\"N\", 0)",
            ),
            (
                ScalarFunction::Div,
                vec![number("7"), number("2")],
                "CAST(FLOOR(7 / FLOOR(2)) AS DECIMAL(36, 0))",
            ),
        ];
        for (function, arguments, expected) in cases {
            assert_eq!(
                rewrite("DB2", function, arguments).unwrap().as_deref(),
                Some(expected)
            );
        }
        assert!(matches!(
            rewrite("DB2", ScalarFunction::AddWeeks, vec![column("D"), column("W")]),
            Err(TranslationError::ExpectedNumericLiteral(_))
        ));
    }

    #[test]
    fn sybase_shares_the_sqlserver_rewrites() {
        assert_eq!(
            rewrite(
                "SYBASE",
                ScalarFunction::AddDays,
                vec![column("D"), number("1")]
            )
            .unwrap()
            .as_deref(),
            Some("DATEADD(DAY,1,[D])")
        );
    }
}
