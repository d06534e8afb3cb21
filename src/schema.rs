//! Schema data structures
//!
//! These types represent database schema information and form the contract
//! between descriptor loading (produces) and code generation (consumes).
//! Everything here is a passive snapshot: the generators read it, never
//! mutate it.

use serde::Deserialize;

/// A complete database schema
///
/// Tables are ordered parent-first: a table referenced by other tables comes
/// before the tables that reference it. That ordering is supplied by the
/// descriptor and trusted as-is; the generators never re-derive or validate
/// it.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub name: String,
    /// Optional override for the generated context class name
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub functions: Vec<Function>,
}

impl Database {
    /// Name of the generated context class, falling back to the database name
    pub fn context_class_name(&self) -> &str {
        self.class.as_deref().unwrap_or(&self.name)
    }
}

/// Database table
#[derive(Debug, Clone, Deserialize)]
pub struct Table {
    pub name: String,
    /// Accessor name on the context class; defaults to PascalCase of `name`
    #[serde(default)]
    pub member: Option<String>,
    /// Row class name; defaults to singular PascalCase of `name`
    #[serde(default)]
    pub row_type: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub associations: Vec<Association>,
}

impl Table {
    /// Accessor name on the generated context class
    pub fn member_name(&self) -> String {
        match &self.member {
            Some(member) => member.clone(),
            None => to_pascal_case(&self.name),
        }
    }

    /// Name of the generated row class
    pub fn row_type_name(&self) -> String {
        match &self.row_type {
            Some(row_type) => row_type.clone(),
            None => singularize(&to_pascal_case(&self.name)),
        }
    }
}

/// A table column
#[derive(Debug, Clone, Deserialize)]
pub struct Column {
    pub name: String,
    /// Property name in the generated row class; defaults to PascalCase of `name`
    #[serde(default)]
    pub member: Option<String>,
    pub data_type: DataType,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
    /// Value produced by the database (identity, computed)
    #[serde(default)]
    pub db_generated: bool,
}

impl Column {
    pub fn member_name(&self) -> String {
        match &self.member {
            Some(member) => member.clone(),
            None => to_pascal_case(&self.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    SmallInt,
    Integer,
    BigInt,
    /// Carried in the model but unsupported by the class generator; see
    /// the accessor-generation notes in `codegen::csharp`.
    UnsignedInt,
    Boolean,
    Text,
    Char,
    Real,
    DoublePrecision,
    Numeric,
    DateTime,
    Binary,
}

/// A relationship between two tables, rendered as an accessor on the
/// referencing row class
#[derive(Debug, Clone, Deserialize)]
pub struct Association {
    /// Accessor name on the row class
    pub member: String,
    /// Row class name of the related table
    pub target: String,
    pub kind: AssociationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// Reference to a single parent row
    Parent,
    /// Collection of child rows
    Children,
}

/// A stored procedure or database function
#[derive(Debug, Clone, Deserialize)]
pub struct Function {
    pub name: String,
    /// Method name of the generated wrapper; defaults to PascalCase of `name`
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Return type, or `None` for void procedures
    #[serde(default)]
    pub returns: Option<DataType>,
}

impl Function {
    pub fn method_name(&self) -> String {
        match &self.method {
            Some(method) => method.clone(),
            None => to_pascal_case(&self.name),
        }
    }
}

/// A stored procedure parameter
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub data_type: DataType,
}

/// Convert snake_case to PascalCase
///
/// This is a shared utility used for all generated member, class, and
/// method name fallbacks.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    let first_upper = first.to_uppercase().to_string();
                    first_upper + chars.as_str()
                }
            }
        })
        .collect()
}

/// Convert snake_case to camelCase
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().to_string() + chars.as_str(),
    }
}

/// Returns the singular form of a name (basic heuristic)
pub fn singularize(name: &str) -> String {
    if name.ends_with("ies") {
        format!("{}y", &name[..name.len() - 3])
    } else if name.ends_with('s') && !name.ends_with("ss") {
        name[..name.len() - 1].to_string()
    } else {
        name.to_string()
    }
}
