use thiserror::Error;

/// sqlscribe errors
#[derive(Error, Debug)]
pub enum SqlscribeError {
    #[error("Failed to load schema descriptor '{path}': {message}")]
    Descriptor { path: String, message: String },

    #[error("Code generation failed for table '{table}': {message}")]
    CodeGen { table: String, message: String },

    #[error("Unsupported expression kind: {kind}")]
    UnsupportedExpression { kind: String },

    #[error("Expression '{kind}' expects {expected} operands, got {got}")]
    Operands {
        kind: String,
        expected: &'static str,
        got: usize,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
