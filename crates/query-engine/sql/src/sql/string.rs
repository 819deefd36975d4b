/// Type definitions of a low-level SQL string representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SQL {
    pub sql: String,
}

impl Default for SQL {
    fn default() -> Self {
        Self::new()
    }
}

impl SQL {
    pub fn new() -> SQL {
        SQL { sql: String::new() }
    }

    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a value that needs no escaping, such as a number.
    pub fn append_display(&mut self, value: impl std::fmt::Display) {
        self.sql.push_str(&value.to_string());
    }

    /// Append already rendered SQL of a nested statement.
    pub fn append_sql(&mut self, other: &SQL) {
        self.sql.push_str(&other.sql);
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn into_string(self) -> String {
        self.sql
    }
}

/// Render a string literal in single quotes, doubling embedded quotes.
pub fn quote_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
