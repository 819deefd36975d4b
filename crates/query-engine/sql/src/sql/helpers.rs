//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;
use query_engine_metadata::metadata::{ColumnMetadata, TableMetadata};

/// Build a select with a select list and a FROM clause, and every optional clause empty.
pub fn simple_select(select_list: SelectList, from: From) -> Select {
    Select {
        select_list,
        from,
        where_: None,
        group_by: None,
        having: None,
        order_by: None,
        limit: None,
    }
}

/// Build a simple select *
pub fn star_select(from: From) -> Select {
    simple_select(SelectList::Star, from)
}

/// A select list made of expressions.
pub fn select_list(expressions: Vec<Expression>) -> SelectList {
    SelectList::Expressions { expressions }
}

/// A FROM clause naming a single table without an alias.
pub fn table(metadata: TableMetadata) -> From {
    From::Table(Table {
        name: metadata.name.clone(),
        alias: None,
        metadata,
    })
}

/// A FROM clause naming a single aliased table.
pub fn aliased_table(metadata: TableMetadata, alias: impl Into<String>) -> From {
    From::Table(Table {
        name: metadata.name.clone(),
        alias: Some(alias.into()),
        metadata,
    })
}

pub fn join(join_type: JoinType, left: From, right: From, condition: Expression) -> From {
    From::Join(Join {
        join_type,
        left: Box::new(left),
        right: Box::new(right),
        condition: Box::new(condition),
    })
}

/// Generate a column expression.
pub fn column(id: u32, metadata: ColumnMetadata) -> Expression {
    Expression::Column(Column {
        id,
        table_alias: None,
        metadata,
    })
}

/// Generate a column expression refering to a specific table.
pub fn qualified_column(id: u32, table_alias: impl Into<String>, metadata: ColumnMetadata) -> Expression {
    Expression::Column(Column {
        id,
        table_alias: Some(table_alias.into()),
        metadata,
    })
}

// Literals //

pub fn null() -> Expression {
    Expression::Literal(Literal::Null)
}

pub fn bool_literal(value: bool) -> Expression {
    Expression::Literal(Literal::Bool { value })
}

pub fn string_literal(value: impl Into<String>) -> Expression {
    Expression::Literal(Literal::String {
        value: value.into(),
    })
}

pub fn exact_numeric(value: impl Into<String>) -> Expression {
    Expression::Literal(Literal::ExactNumeric {
        value: value.into(),
    })
}

pub fn double(value: f64) -> Expression {
    Expression::Literal(Literal::Double { value })
}

// Predicates //

pub fn and(operands: Vec<Expression>) -> Expression {
    Expression::Predicate(Predicate::And { operands })
}

pub fn or(operands: Vec<Expression>) -> Expression {
    Expression::Predicate(Predicate::Or { operands })
}

pub fn not(operand: Expression) -> Expression {
    Expression::Predicate(Predicate::Not {
        operand: Box::new(operand),
    })
}

pub fn equal(left: Expression, right: Expression) -> Expression {
    Expression::Predicate(Predicate::Equal {
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn less(left: Expression, right: Expression) -> Expression {
    Expression::Predicate(Predicate::Less {
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn is_null(expression: Expression) -> Expression {
    Expression::Predicate(Predicate::IsNull {
        expression: Box::new(expression),
    })
}

// Functions //

pub fn scalar(function: ScalarFunction, arguments: Vec<Expression>) -> Expression {
    Expression::Function(Function::Scalar {
        function,
        arguments,
    })
}

pub fn aggregate(function: AggregateFunction, arguments: Vec<Expression>) -> Expression {
    Expression::Function(Function::Aggregate {
        function,
        arguments,
        distinct: false,
    })
}

pub fn distinct_aggregate(function: AggregateFunction, arguments: Vec<Expression>) -> Expression {
    Expression::Function(Function::Aggregate {
        function,
        arguments,
        distinct: true,
    })
}

/// An ORDER BY element.
pub fn order_by_element(expression: Expression, ascending: bool, nulls_last: bool) -> OrderByElement {
    OrderByElement {
        expression,
        ascending,
        nulls_last,
    }
}

pub fn limit(limit: u64, offset: u64) -> Limit {
    Limit { limit, offset }
}
