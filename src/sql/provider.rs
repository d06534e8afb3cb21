//! The dialect abstraction
//!
//! `ExpressionProvider` is the single seam between the dialect-neutral
//! expression vocabulary and concrete SQL text. Default method bodies cover
//! the ANSI-flavored common case; each dialect overrides only what its syntax
//! actually changes. Every operation is a pure function of its inputs.

use crate::error::SqlscribeError;
use crate::sql::expr::{OperatorKind, SpecialForm, Value};

/// SQL reserved words that must be quoted when used as identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "order", "group", "user", "table", "select", "from", "where", "join", "left", "right",
    "inner", "outer", "on", "and", "or", "not", "null", "true", "false", "limit", "offset",
    "as", "in", "is", "like", "between", "having", "union", "all", "distinct", "case", "when",
    "then", "else", "end", "create", "alter", "drop", "insert", "update", "delete", "index",
    "key", "primary", "foreign", "references", "default", "constraint", "check",
];

/// Whether a bare identifier part must be quoted for safe use in SQL.
fn needs_quoting(name: &str) -> bool {
    let lower = name.to_lowercase();
    RESERVED_WORDS.contains(&lower.as_str())
        || name.chars().any(|c| !c.is_alphanumeric() && c != '_')
        || name.chars().next().map(|c| c.is_numeric()).unwrap_or(true)
}

fn operand_error(kind: impl std::fmt::Debug, expected: &'static str, got: usize) -> SqlscribeError {
    SqlscribeError::Operands {
        kind: format!("{:?}", kind),
        expected,
        got,
    }
}

/// Translates literals, operators, special forms, and identifier formatting
/// into the SQL text of one target dialect.
///
/// Operand texts passed to `operator` and `special_form` are already rendered
/// and already parenthesized by the caller; providers assemble, they never
/// recurse. Same inputs always produce the same text.
pub trait ExpressionProvider {
    /// Quote an identifier unconditionally, dialect quoting rules applied.
    fn quote_identifier(&self, name: &str) -> String;

    /// Format a bind-parameter name from a base name.
    fn parameter_name(&self, base: &str) -> String;

    /// Quote an identifier only when required (reserved word, special
    /// characters, leading digit). Dotted identifiers are quoted per part.
    fn escape_identifier(&self, name: &str) -> String {
        name.split('.')
            .map(|part| {
                if needs_quoting(part) {
                    self.quote_identifier(part)
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Render a constant as a dialect literal. NULL is always the dialect
    /// null keyword, never empty text.
    fn literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => {
                if *b {
                    "1".to_string()
                } else {
                    "0".to_string()
                }
            }
            Value::Int(i) => i.to_string(),
            Value::Float(f) => format!("{:?}", f),
            Value::Text(s) => self.quote_string(s),
            // Fixed format, independent of any locale setting
            Value::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }

    /// Quote a string literal with embedded-quote escaping.
    fn quote_string(&self, s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    /// Render a standard operator over pre-rendered operand texts.
    fn operator(&self, op: OperatorKind, operands: &[String]) -> Result<String, SqlscribeError> {
        if operands.len() != op.arity() {
            let expected = if op.arity() == 1 { "1" } else { "2" };
            return Err(operand_error(op, expected, operands.len()));
        }
        let text = match op {
            OperatorKind::Negate => format!("-{}", operands[0]),
            OperatorKind::Not => format!("NOT {}", operands[0]),
            _ => {
                let symbol = match op {
                    OperatorKind::Add => "+",
                    OperatorKind::Subtract => "-",
                    OperatorKind::Multiply => "*",
                    OperatorKind::Divide => "/",
                    OperatorKind::Modulo => "%",
                    OperatorKind::And => "AND",
                    OperatorKind::Or => "OR",
                    OperatorKind::Equal => "=",
                    OperatorKind::NotEqual => "<>",
                    OperatorKind::GreaterThan => ">",
                    OperatorKind::GreaterThanOrEqual => ">=",
                    OperatorKind::LessThan => "<",
                    OperatorKind::LessThanOrEqual => "<=",
                    OperatorKind::Negate | OperatorKind::Not => unreachable!(),
                };
                format!("{} {} {}", operands[0], symbol, operands[1])
            }
        };
        Ok(text)
    }

    /// Render a special form over pre-rendered operand texts.
    fn special_form(
        &self,
        form: SpecialForm,
        operands: &[String],
    ) -> Result<String, SqlscribeError> {
        ansi_special_form(form, operands)
    }

    /// Wrap unconditionally. Precedence decisions belong to the caller.
    fn parenthesize(&self, inner: &str) -> String {
        format!("({})", inner)
    }

    /// A column qualified by a table or alias text. The qualifier is passed
    /// through as given; the column part is escaped here.
    fn column(&self, table: &str, column: &str) -> String {
        if table.is_empty() {
            self.escape_identifier(column)
        } else {
            format!("{}.{}", table, self.escape_identifier(column))
        }
    }

    fn table(&self, name: &str) -> String {
        self.escape_identifier(name)
    }

    fn table_with_alias(&self, table: &str, alias: &str) -> String {
        format!("{} {}", self.escape_identifier(table), alias)
    }

    /// All columns of an aliased table (`alias.*`), or `*` with no alias.
    fn all_columns(&self, alias: &str) -> String {
        if alias.is_empty() {
            "*".to_string()
        } else {
            format!("{}.*", alias)
        }
    }

    fn from_clause(&self, tables: &[String]) -> String {
        if tables.is_empty() {
            String::new()
        } else {
            format!("FROM {}", tables.join(", "))
        }
    }

    fn where_clause(&self, conditions: &[String]) -> String {
        if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        }
    }

    /// Derive a valid alias from a base name: lowercased, non-alphanumeric
    /// characters folded to underscores, prefixed when it would start with a
    /// digit.
    fn table_alias(&self, base: &str) -> String {
        let alias: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();
        if alias.is_empty() || alias.starts_with(|c: char| c.is_ascii_digit()) {
            format!("t{}", alias)
        } else {
            alias
        }
    }
}

/// ANSI-flavored special-form rendering, shared by the trait default and by
/// dialects that override only some forms.
pub(crate) fn ansi_special_form(
    form: SpecialForm,
    operands: &[String],
) -> Result<String, SqlscribeError> {
    let text = match form {
        SpecialForm::Concat => {
            if operands.is_empty() {
                return Err(operand_error(form, "at least 1", 0));
            }
            operands.join(" || ")
        }
        SpecialForm::Coalesce => {
            if operands.len() < 2 {
                return Err(operand_error(form, "at least 2", operands.len()));
            }
            format!("COALESCE({})", operands.join(", "))
        }
        SpecialForm::IsNull => {
            if operands.len() != 1 {
                return Err(operand_error(form, "1", operands.len()));
            }
            format!("{} IS NULL", operands[0])
        }
        SpecialForm::IsNotNull => {
            if operands.len() != 1 {
                return Err(operand_error(form, "1", operands.len()));
            }
            format!("{} IS NOT NULL", operands[0])
        }
        SpecialForm::Like => {
            if operands.len() != 2 {
                return Err(operand_error(form, "2", operands.len()));
            }
            format!("{} LIKE {}", operands[0], operands[1])
        }
        SpecialForm::In => {
            if operands.len() < 2 {
                return Err(operand_error(form, "at least 2", operands.len()));
            }
            format!("{} IN ({})", operands[0], operands[1..].join(", "))
        }
        SpecialForm::Upper => {
            if operands.len() != 1 {
                return Err(operand_error(form, "1", operands.len()));
            }
            format!("UPPER({})", operands[0])
        }
        SpecialForm::Lower => {
            if operands.len() != 1 {
                return Err(operand_error(form, "1", operands.len()));
            }
            format!("LOWER({})", operands[0])
        }
        SpecialForm::Trim => {
            if operands.len() != 1 {
                return Err(operand_error(form, "1", operands.len()));
            }
            format!("TRIM({})", operands[0])
        }
        SpecialForm::Substring => {
            if operands.len() != 2 && operands.len() != 3 {
                return Err(operand_error(form, "2 or 3", operands.len()));
            }
            format!("SUBSTR({})", operands.join(", "))
        }
        SpecialForm::StringLength => {
            if operands.len() != 1 {
                return Err(operand_error(form, "1", operands.len()));
            }
            format!("LENGTH({})", operands[0])
        }
        SpecialForm::Cast => {
            if operands.len() != 2 {
                return Err(operand_error(form, "2", operands.len()));
            }
            format!("CAST({} AS {})", operands[0], operands[1])
        }
    };
    Ok(text)
}

/// Arity-check helper for dialect overrides.
pub(crate) fn require_operands(
    form: SpecialForm,
    expected: &'static str,
    ok: bool,
    got: usize,
) -> Result<(), SqlscribeError> {
    if ok {
        Ok(())
    } else {
        Err(operand_error(form, expected, got))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal provider exercising the ANSI defaults.
    struct AnsiProvider;

    impl ExpressionProvider for AnsiProvider {
        fn quote_identifier(&self, name: &str) -> String {
            format!("\"{}\"", name.replace('"', "\"\""))
        }

        fn parameter_name(&self, base: &str) -> String {
            format!(":{}", base)
        }
    }

    /// Provider that refuses a form, to check the failure stays loud and
    /// call-local.
    struct NoCastProvider;

    impl ExpressionProvider for NoCastProvider {
        fn quote_identifier(&self, name: &str) -> String {
            format!("\"{}\"", name)
        }

        fn parameter_name(&self, base: &str) -> String {
            format!(":{}", base)
        }

        fn special_form(
            &self,
            form: SpecialForm,
            operands: &[String],
        ) -> Result<String, SqlscribeError> {
            if form == SpecialForm::Cast {
                return Err(SqlscribeError::UnsupportedExpression {
                    kind: format!("{:?}", form),
                });
            }
            ansi_special_form(form, operands)
        }
    }

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_operator_add() {
        let p = AnsiProvider;
        let text = p
            .operator(OperatorKind::Add, &strings(&["1", "2"]))
            .unwrap();
        assert_eq!(text, "1 + 2");
    }

    #[test]
    fn test_operator_is_idempotent() {
        let p = AnsiProvider;
        let operands = strings(&["a", "b"]);
        let first = p.operator(OperatorKind::Equal, &operands).unwrap();
        let second = p.operator(OperatorKind::Equal, &operands).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "a = b");
    }

    #[test]
    fn test_operator_unary() {
        let p = AnsiProvider;
        assert_eq!(
            p.operator(OperatorKind::Not, &strings(&["x"])).unwrap(),
            "NOT x"
        );
        assert_eq!(
            p.operator(OperatorKind::Negate, &strings(&["x"])).unwrap(),
            "-x"
        );
    }

    #[test]
    fn test_operator_arity_mismatch() {
        let p = AnsiProvider;
        let err = p.operator(OperatorKind::Add, &strings(&["1"])).unwrap_err();
        assert!(matches!(err, SqlscribeError::Operands { got: 1, .. }));
    }

    #[test]
    fn test_null_literal_is_never_empty() {
        let p = AnsiProvider;
        assert_eq!(p.literal(&Value::Null), "NULL");
    }

    #[test]
    fn test_string_literal_escaping() {
        let p = AnsiProvider;
        assert_eq!(p.literal(&Value::Text("O'Brien".to_string())), "'O''Brien'");
    }

    #[test]
    fn test_special_form_defaults() {
        let p = AnsiProvider;
        assert_eq!(
            p.special_form(SpecialForm::Concat, &strings(&["a", "b", "c"]))
                .unwrap(),
            "a || b || c"
        );
        assert_eq!(
            p.special_form(SpecialForm::Coalesce, &strings(&["a", "NULL"]))
                .unwrap(),
            "COALESCE(a, NULL)"
        );
        assert_eq!(
            p.special_form(SpecialForm::In, &strings(&["x", "1", "2"]))
                .unwrap(),
            "x IN (1, 2)"
        );
        assert_eq!(
            p.special_form(SpecialForm::IsNull, &strings(&["x"]))
                .unwrap(),
            "x IS NULL"
        );
    }

    #[test]
    fn test_special_form_arity_mismatch() {
        let p = AnsiProvider;
        let err = p
            .special_form(SpecialForm::Coalesce, &strings(&["a"]))
            .unwrap_err();
        assert!(matches!(err, SqlscribeError::Operands { .. }));
    }

    #[test]
    fn test_unsupported_form_fails_loudly() {
        let p = NoCastProvider;
        let err = p
            .special_form(SpecialForm::Cast, &strings(&["x", "TEXT"]))
            .unwrap_err();
        assert!(matches!(err, SqlscribeError::UnsupportedExpression { .. }));
        // Other forms keep working: the failure is call-local.
        assert!(p.special_form(SpecialForm::Trim, &strings(&["x"])).is_ok());
    }

    #[test]
    fn test_escape_identifier() {
        let p = AnsiProvider;
        assert_eq!(p.escape_identifier("customers"), "customers");
        assert_eq!(p.escape_identifier("order"), "\"order\"");
        assert_eq!(p.escape_identifier("t0.order"), "t0.\"order\"");
        assert_eq!(p.escape_identifier("2fast"), "\"2fast\"");
    }

    #[test]
    fn test_clauses() {
        let p = AnsiProvider;
        assert_eq!(
            p.from_clause(&strings(&["customers c", "orders o"])),
            "FROM customers c, orders o"
        );
        assert_eq!(
            p.where_clause(&strings(&["(a = b)", "(c > d)"])),
            "WHERE (a = b) AND (c > d)"
        );
        assert_eq!(p.where_clause(&[]), "");
        assert_eq!(p.from_clause(&[]), "");
    }

    #[test]
    fn test_table_alias_sanitization() {
        let p = AnsiProvider;
        assert_eq!(p.table_alias("Customers"), "customers");
        assert_eq!(p.table_alias("Order Details"), "order_details");
        assert_eq!(p.table_alias("2pc"), "t2pc");
    }

    #[test]
    fn test_parenthesize_wraps_unconditionally() {
        let p = AnsiProvider;
        assert_eq!(p.parenthesize("(x)"), "((x))");
    }
}
