//! Code generation
//!
//! This module turns a schema snapshot into one complete source document of
//! typed data-access classes. Generators are pure: same schema, options, and
//! formatting configuration always produce byte-identical output, and nothing
//! here touches the filesystem.

use crate::error::SqlscribeError;
use crate::schema::Database;

pub mod csharp;

pub use csharp::CSharpGenerator;

/// Options for one generation run
#[derive(Debug, Clone)]
pub struct CodeGenOptions {
    /// Wrap the generated body in this namespace and re-indent it one level
    pub namespace: Option<String>,
    /// Base type of the generated context class
    pub context_base: String,
    /// Where the schema came from; used only in the header comment
    pub source_description: String,
    /// Timestamp text for the header comment. Supplied by the caller so
    /// generation itself stays deterministic.
    pub generated_at: String,
}

impl CodeGenOptions {
    pub fn new(context_base: impl Into<String>) -> Self {
        Self {
            namespace: None,
            context_base: context_base.into(),
            source_description: String::new(),
            generated_at: String::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_source_description(mut self, source: impl Into<String>) -> Self {
        self.source_description = source.into();
        self
    }

    pub fn with_generated_at(mut self, generated_at: impl Into<String>) -> Self {
        self.generated_at = generated_at.into();
        self
    }
}

/// Formatting conventions, threaded explicitly through generation instead of
/// living in process-wide state
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Line ending applied uniformly across the whole document
    pub newline: String,
    /// One level of indentation
    pub indent: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            newline: "\n".to_string(),
            indent: "    ".to_string(),
        }
    }
}

/// The final output text and its file-extension convention. Immutable once
/// returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub extension: &'static str,
}

/// Trait for language-specific source generators
pub trait CodeGenerator {
    /// File extension of the generated source, without the dot
    fn extension(&self) -> &'static str;

    /// Generate the complete source document for a database
    fn document(
        &self,
        database: &Database,
        options: &CodeGenOptions,
        fmt: &FormatConfig,
    ) -> Result<Document, SqlscribeError>;
}
