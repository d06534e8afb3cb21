//! SQLite dialect
//!
//! The reference dialect. SQLite tracks the ANSI defaults almost everywhere,
//! so only identifier quoting and parameter naming are overridden.

use crate::sql::provider::ExpressionProvider;

pub struct SqliteProvider;

impl ExpressionProvider for SqliteProvider {
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn parameter_name(&self, base: &str) -> String {
        format!(":{}", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::expr::{OperatorKind, SpecialForm, Value};

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reference_add() {
        let p = SqliteProvider;
        assert_eq!(
            p.operator(OperatorKind::Add, &strings(&["1", "2"])).unwrap(),
            "1 + 2"
        );
    }

    #[test]
    fn test_null_literal() {
        let p = SqliteProvider;
        assert_eq!(p.literal(&Value::Null), "NULL");
    }

    #[test]
    fn test_concat_uses_pipes() {
        let p = SqliteProvider;
        assert_eq!(
            p.special_form(SpecialForm::Concat, &strings(&["'a'", "'b'"]))
                .unwrap(),
            "'a' || 'b'"
        );
    }

    #[test]
    fn test_identifier_quoting() {
        let p = SqliteProvider;
        assert_eq!(p.quote_identifier("order"), "\"order\"");
        assert_eq!(p.escape_identifier("customers"), "customers");
        assert_eq!(p.escape_identifier("group"), "\"group\"");
    }

    #[test]
    fn test_parameter_name() {
        let p = SqliteProvider;
        assert_eq!(p.parameter_name("city"), ":city");
    }

    #[test]
    fn test_string_escaping() {
        let p = SqliteProvider;
        assert_eq!(
            p.literal(&Value::Text("it's".to_string())),
            "'it''s'"
        );
    }
}
