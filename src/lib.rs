//! # sqlscribe
//!
//! Generate typed data-access source code from database schema descriptors,
//! and dialect-correct SQL text from abstract expressions.
//!
//! The crate has two independent surfaces: `codegen` synthesizes one complete
//! source document per database snapshot, and `sql` renders operators,
//! special forms, and literals for a chosen dialect. Both are pure; callers
//! own all I/O.

pub mod codegen;
pub mod descriptor;
pub mod error;
pub mod schema;
pub mod sql;

pub mod prelude {
    pub use crate::codegen::{
        CSharpGenerator, CodeGenOptions, CodeGenerator, Document, FormatConfig,
    };
    pub use crate::error::SqlscribeError;
    pub use crate::schema::{
        Association, AssociationKind, Column, DataType, Database, Function, Parameter, Table,
    };
    pub use crate::sql::{Dialect, ExpressionProvider, OperatorKind, SpecialForm, Value};
}
