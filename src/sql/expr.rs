//! Expression vocabulary
//!
//! Closed taxonomies of the operators, special forms, and literal values the
//! expression providers can render. Operand sub-expressions are rendered by
//! the caller before a provider is invoked, so providers only ever see
//! already-translated operand text.

use chrono::NaiveDateTime;

/// A constant value to be rendered as a SQL literal
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

/// Standard unary and binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Negate,
    Not,
}

impl OperatorKind {
    /// Number of operands the operator consumes
    pub fn arity(&self) -> usize {
        match self {
            OperatorKind::Negate | OperatorKind::Not => 1,
            _ => 2,
        }
    }
}

/// Expression kinds beyond the standard operators, each requiring bespoke
/// per-dialect rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    /// String concatenation over one or more operands
    Concat,
    /// First non-null of two or more operands
    Coalesce,
    IsNull,
    IsNotNull,
    Like,
    /// Membership test: first operand is the needle, the rest the set
    In,
    Upper,
    Lower,
    Trim,
    /// Source, start position, optional length
    Substring,
    StringLength,
    /// Source expression and target type name
    Cast,
}
