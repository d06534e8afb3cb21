//! MySQL dialect

use crate::error::SqlscribeError;
use crate::sql::expr::SpecialForm;
use crate::sql::provider::{ansi_special_form, require_operands, ExpressionProvider};

pub struct MysqlProvider;

impl ExpressionProvider for MysqlProvider {
    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn parameter_name(&self, base: &str) -> String {
        format!("@{}", base)
    }

    fn quote_string(&self, s: &str) -> String {
        // Backslash is an escape character in MySQL string literals
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn special_form(
        &self,
        form: SpecialForm,
        operands: &[String],
    ) -> Result<String, SqlscribeError> {
        match form {
            SpecialForm::Concat => {
                require_operands(form, "at least 1", !operands.is_empty(), operands.len())?;
                Ok(format!("CONCAT({})", operands.join(", ")))
            }
            SpecialForm::StringLength => {
                require_operands(form, "1", operands.len() == 1, operands.len())?;
                Ok(format!("CHAR_LENGTH({})", operands[0]))
            }
            SpecialForm::Substring => {
                require_operands(
                    form,
                    "2 or 3",
                    operands.len() == 2 || operands.len() == 3,
                    operands.len(),
                )?;
                Ok(format!("SUBSTRING({})", operands.join(", ")))
            }
            _ => ansi_special_form(form, operands),
        }
    }
}
