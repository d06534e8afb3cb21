//! Dialect-abstracted SQL rendering
//!
//! An external query-building layer hands this module pre-rendered operand
//! texts; a dialect's [`ExpressionProvider`] turns operators, special forms,
//! literals, and identifiers into SQL text for that target. Providers are
//! chosen once, at construction time, through [`Dialect::provider`].

pub mod expr;
pub mod provider;

mod mysql;
mod sqlite;

pub use expr::{OperatorKind, SpecialForm, Value};
pub use mysql::MysqlProvider;
pub use provider::ExpressionProvider;
pub use sqlite::SqliteProvider;

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Mysql,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::Sqlite
    }
}

impl Dialect {
    pub fn provider(&self) -> Box<dyn ExpressionProvider> {
        match self {
            Dialect::Sqlite => Box::new(SqliteProvider),
            Dialect::Mysql => Box::new(MysqlProvider),
        }
    }
}
