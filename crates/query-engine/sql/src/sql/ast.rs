//! Type definitions of the push-down query tree.
//!
//! The tree is immutable and closed: every node kind is a variant of one of the enums below and
//! renderers match on them exhaustively. Nodes never point back to their parents; whatever a
//! renderer needs to know about the enclosing statement is handed down while traversing.

use serde::{Deserialize, Serialize};

use query_engine_metadata::metadata::{ColumnMetadata, DataType, TableMetadata};

pub use super::functions::{AggregateFunction, ScalarFunction};

/// The root of a push-down query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub select_list: SelectList,
    pub from: From,
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<GroupBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub having: Option<Expression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
}

/// The projection of a SELECT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectList {
    /// Any single value will do, e.g. for `COUNT(*)` over a table.
    AnyValue,
    /// All columns of all tables in the FROM clause.
    Star,
    Expressions { expressions: Vec<Expression> },
}

/// A FROM clause: a single table or a tree of joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum From {
    Table(Table),
    Join(Join),
}

impl From {
    /// The tables of this clause, left to right, in a pre-order walk of the join tree.
    pub fn tables(&self) -> Vec<&Table> {
        let mut tables = vec![];
        self.collect_tables(&mut tables);
        tables
    }

    fn collect_tables<'a>(&'a self, tables: &mut Vec<&'a Table>) {
        match self {
            From::Table(table) => tables.push(table),
            From::Join(join) => {
                join.left.collect_tables(tables);
                join.right.collect_tables(tables);
            }
        }
    }
}

/// A reference to a remote table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub metadata: TableMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinType {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
}

impl JoinType {
    /// The keyword as written in SQL, without the trailing `JOIN`.
    pub fn keyword(self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::LeftOuter => "LEFT OUTER",
            JoinType::RightOuter => "RIGHT OUTER",
            JoinType::FullOuter => "FULL OUTER",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub join_type: JoinType,
    pub left: Box<From>,
    pub right: Box<From>,
    pub condition: Box<Expression>,
}

/// A column of one of the tables in the FROM clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_alias: Option<String>,
    pub metadata: ColumnMetadata,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Expression {
    Column(Column),
    Literal(Literal),
    Predicate(Predicate),
    Function(Function),
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "literal", rename_all = "snake_case")]
pub enum Literal {
    Null,
    Bool { value: bool },
    String { value: String },
    /// An exact number, kept as the text it was received as.
    ExactNumeric { value: String },
    Double { value: f64 },
    Date { value: String },
    Timestamp { value: String },
    TimestampUtc { value: String },
    Interval { value: String, data_type: DataType },
}

/// A boolean condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "predicate", rename_all = "snake_case")]
pub enum Predicate {
    And {
        operands: Vec<Expression>,
    },
    Or {
        operands: Vec<Expression>,
    },
    Not {
        operand: Box<Expression>,
    },
    Equal {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    NotEqual {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Less {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    LessEqual {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Between {
        expression: Box<Expression>,
        lower: Box<Expression>,
        upper: Box<Expression>,
    },
    Like {
        expression: Box<Expression>,
        pattern: Box<Expression>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        escape: Option<Box<Expression>>,
    },
    LikeRegexp {
        expression: Box<Expression>,
        pattern: Box<Expression>,
    },
    IsNull {
        expression: Box<Expression>,
    },
    IsNotNull {
        expression: Box<Expression>,
    },
    InConstList {
        expression: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

/// A function call, including the special forms with their own syntax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "function_kind", rename_all = "snake_case")]
pub enum Function {
    Scalar {
        function: ScalarFunction,
        arguments: Vec<Expression>,
    },
    Aggregate {
        function: AggregateFunction,
        arguments: Vec<Expression>,
        #[serde(default)]
        distinct: bool,
    },
    GroupConcat {
        argument: Box<Expression>,
        #[serde(default)]
        distinct: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        order_by: Option<OrderBy>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        separator: Option<String>,
    },
    /// `CASE [basis] WHEN argument THEN result ... [ELSE result] END`. One more result than
    /// arguments supplies the ELSE branch.
    Case {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        basis: Option<Box<Expression>>,
        arguments: Vec<Expression>,
        results: Vec<Expression>,
    },
    Cast {
        expression: Box<Expression>,
        data_type: DataType,
    },
    Extract {
        field: String,
        expression: Box<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBy {
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub elements: Vec<OrderByElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByElement {
    pub expression: Expression,
    pub ascending: bool,
    pub nulls_last: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}
