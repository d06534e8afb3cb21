//! C# code generator
//!
//! Emits one complete C# source document per database: a context class with
//! one typed collection accessor per table, one row class per table, and
//! typed stored-procedure wrappers. Class skeletons live in embedded
//! templates; every loop, join, and ordering decision happens here so the
//! formatting contracts stay byte-exact.

use minijinja::Environment;
use tracing::{debug, info, warn};

use crate::codegen::{CodeGenOptions, CodeGenerator, Document, FormatConfig};
use crate::error::SqlscribeError;
use crate::schema::{to_camel_case, AssociationKind, Column, DataType, Database, Function, Table};

/// C# code generator
pub struct CSharpGenerator {
    env: Environment<'static>,
}

impl CSharpGenerator {
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template("entity", include_str!("templates/entity.cs.jinja"))
            .expect("Failed to load entity template");
        env.add_template("context", include_str!("templates/context.cs.jinja"))
            .expect("Failed to load context template");
        env.add_template("procedure", include_str!("templates/procedure.cs.jinja"))
            .expect("Failed to load procedure template");

        Self { env }
    }
}

impl Default for CSharpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for CSharpGenerator {
    fn extension(&self) -> &'static str {
        "cs"
    }

    fn document(
        &self,
        database: &Database,
        options: &CodeGenOptions,
        fmt: &FormatConfig,
    ) -> Result<Document, SqlscribeError> {
        info!(
            database = ?database.name,
            tables = database.tables.len(),
            functions = database.functions.len(),
            namespace = ?options.namespace,
            "Generating C# document"
        );

        let body = self.assemble_body(database, options)?;

        // The namespace wrap is a plain textual transform over the finished
        // body: one indent unit in front of every line, blank lines included.
        let body = match &options.namespace {
            Some(namespace) => {
                format!("namespace {}\n{{\n{}\n}}", namespace, indent_every_line(&body))
            }
            None => body,
        };

        let text = format!("{}{}\n", prolog(options), body);

        Ok(Document {
            text: apply_format(text, fmt),
            extension: self.extension(),
        })
    }
}

impl CSharpGenerator {
    /// Context class followed by the row classes, joined by a double blank
    /// line. Per-table failures become inline diagnostics so one malformed
    /// table never truncates the document.
    fn assemble_body(
        &self,
        database: &Database,
        options: &CodeGenOptions,
    ) -> Result<String, SqlscribeError> {
        let context = if database.tables.is_empty() {
            warn!(database = ?database.name, "Database has no tables");
            format!(
                "// sqlscribe: no tables found in database \"{}\"",
                database.name
            )
        } else {
            self.context_class(database, options)?
        };

        let mut parts = vec![context];
        for table in &database.tables {
            match self.class_source(table) {
                Ok(class_body) => parts.push(class_body),
                Err(e) => {
                    warn!(table = ?table.name, error = %e, "Emitting inline diagnostic for table");
                    parts.push(format!("// {}", e));
                }
            }
        }

        Ok(parts.join("\n\n\n"))
    }

    /// Render the context class: one accessor per table in declared order.
    /// The order is a descriptor invariant (parents before children) and is
    /// never re-derived here.
    pub fn context_class(
        &self,
        database: &Database,
        options: &CodeGenOptions,
    ) -> Result<String, SqlscribeError> {
        let accessors = database
            .tables
            .iter()
            .map(|table| {
                let row = table.row_type_name();
                format!(
                    "    public Table<{row}> {member} {{ get {{ return GetTable<{row}>(); }} }}",
                    row = row,
                    member = table.member_name()
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut wrappers = Vec::new();
        for function in &database.functions {
            wrappers.push(indent_every_line(&self.procedure_call(function)?));
        }
        let procedures = wrappers.join("\n\n");

        debug!(
            class = ?database.context_class_name(),
            accessors = database.tables.len(),
            procedures = database.functions.len(),
            "Rendered context class"
        );

        let template =
            self.env
                .get_template("context")
                .map_err(|e| SqlscribeError::CodeGen {
                    table: database.name.clone(),
                    message: format!("Template error: {}", e),
                })?;

        template
            .render(minijinja::context! {
                db_name => &database.name,
                class_name => database.context_class_name(),
                base_type => &options.context_base,
                accessors => accessors,
                procedures => procedures,
            })
            .map_err(|e| SqlscribeError::CodeGen {
                table: database.name.clone(),
                message: format!("Render error: {}", e),
            })
    }

    /// Render one row class. Members mirror column declaration order; a
    /// table with no columns is refused outright.
    pub fn class_source(&self, table: &Table) -> Result<String, SqlscribeError> {
        if table.columns.is_empty() {
            return Err(SqlscribeError::CodeGen {
                table: table.name.clone(),
                message: "table has no columns".to_string(),
            });
        }

        let mut properties = Vec::new();
        let mut reads = Vec::new();
        for (ordinal, column) in table.columns.iter().enumerate() {
            match column_accessor(column) {
                Some((property_type, reader_method)) => {
                    properties.push(format!(
                        "    [Column({})]\n    public {} {} {{ get; set; }}",
                        column_attribute(column),
                        property_type,
                        column.member_name()
                    ));
                    reads.push(format!(
                        "        {} = reader.{}({});",
                        column.member_name(),
                        reader_method,
                        ordinal
                    ));
                }
                None => {
                    warn!(
                        table = ?table.name,
                        column = ?column.name,
                        data_type = ?column.data_type,
                        "Unsupported column type, emitting diagnostic"
                    );
                    properties.push(format!(
                        "    // column \"{}\": unsupported column type {:?}",
                        column.name, column.data_type
                    ));
                    reads.push(format!(
                        "        // column \"{}\" skipped: unsupported column type {:?}",
                        column.name, column.data_type
                    ));
                }
            }
        }

        let associations = table
            .associations
            .iter()
            .map(|assoc| match assoc.kind {
                AssociationKind::Children => format!(
                    "    public List<{}> {} {{ get; set; }}",
                    assoc.target, assoc.member
                ),
                AssociationKind::Parent => format!(
                    "    public {} {} {{ get; set; }}",
                    assoc.target, assoc.member
                ),
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let template = self
            .env
            .get_template("entity")
            .map_err(|e| SqlscribeError::CodeGen {
                table: table.name.clone(),
                message: format!("Template error: {}", e),
            })?;

        template
            .render(minijinja::context! {
                table_name => &table.name,
                class_name => table.row_type_name(),
                properties => properties.join("\n\n"),
                reads => reads.join("\n"),
                associations => associations,
            })
            .map_err(|e| SqlscribeError::CodeGen {
                table: table.name.clone(),
                message: format!("Render error: {}", e),
            })
    }

    /// Render one stored-procedure wrapper, parameters in declaration order.
    pub fn procedure_call(&self, function: &Function) -> Result<String, SqlscribeError> {
        let parameters = function
            .parameters
            .iter()
            .map(|parameter| {
                let ty = match csharp_type(parameter.data_type) {
                    Some(ty) => ty,
                    None => {
                        warn!(
                            function = ?function.name,
                            parameter = ?parameter.name,
                            "Unsupported parameter type, using object"
                        );
                        "object"
                    }
                };
                format!("{} {}", ty, to_camel_case(&parameter.name))
            })
            .collect::<Vec<_>>()
            .join(", ");

        let arguments: String = function
            .parameters
            .iter()
            .map(|parameter| format!(", {}", to_camel_case(&parameter.name)))
            .collect();

        let (return_type, body) = match function.returns {
            Some(data_type) => {
                let ty = match csharp_type(data_type) {
                    Some(ty) => ty,
                    None => {
                        warn!(
                            function = ?function.name,
                            "Unsupported return type, using object"
                        );
                        "object"
                    }
                };
                (
                    ty.to_string(),
                    format!(
                        "    var result = ExecuteMethodCall(\"{}\"{});\n    return ({})result;",
                        function.name, arguments, ty
                    ),
                )
            }
            None => (
                "void".to_string(),
                format!("    ExecuteMethodCall(\"{}\"{});", function.name, arguments),
            ),
        };

        let template =
            self.env
                .get_template("procedure")
                .map_err(|e| SqlscribeError::CodeGen {
                    table: function.name.clone(),
                    message: format!("Template error: {}", e),
                })?;

        template
            .render(minijinja::context! {
                function_name => &function.name,
                method_name => function.method_name(),
                return_type => return_type,
                parameters => parameters,
                body => body,
            })
            .map_err(|e| SqlscribeError::CodeGen {
                table: function.name.clone(),
                message: format!("Render error: {}", e),
            })
    }
}

/// Property type and reader method for a column, or `None` when the column
/// type has no accessor support.
fn column_accessor(column: &Column) -> Option<(String, String)> {
    let base = csharp_type(column.data_type)?;
    let reader = reader_method(column.data_type)?;

    let property = if column.nullable && !is_reference_type(column.data_type) {
        format!("{}?", base)
    } else {
        base.to_string()
    };

    // Nullable columns read through the absent-value variant so a null cell
    // surfaces as absent, never as a default.
    let reader = if column.nullable {
        format!("{}N", reader)
    } else {
        reader.to_string()
    };

    Some((property, reader))
}

fn csharp_type(data_type: DataType) -> Option<&'static str> {
    match data_type {
        DataType::SmallInt => Some("short"),
        DataType::Integer => Some("int"),
        DataType::BigInt => Some("long"),
        DataType::UnsignedInt => None,
        DataType::Boolean => Some("bool"),
        DataType::Text => Some("string"),
        DataType::Char => Some("char"),
        DataType::Real => Some("float"),
        DataType::DoublePrecision => Some("double"),
        DataType::Numeric => Some("decimal"),
        DataType::DateTime => Some("DateTime"),
        DataType::Binary => Some("byte[]"),
    }
}

fn reader_method(data_type: DataType) -> Option<&'static str> {
    match data_type {
        DataType::SmallInt => Some("GetInt16"),
        DataType::Integer => Some("GetInt32"),
        DataType::BigInt => Some("GetInt64"),
        // The reader layer never implemented unsigned 32-bit reads; an
        // accessor here would silently return defaults.
        DataType::UnsignedInt => None,
        // Non-nullable boolean reads map a null cell to false instead of
        // faulting. Intentional, for legacy boolean columns only.
        DataType::Boolean => Some("GetBoolean"),
        DataType::Text => Some("GetString"),
        DataType::Char => Some("GetChar"),
        DataType::Real => Some("GetFloat"),
        DataType::DoublePrecision => Some("GetDouble"),
        DataType::Numeric => Some("GetDecimal"),
        DataType::DateTime => Some("GetDateTime"),
        DataType::Binary => Some("GetBytes"),
    }
}

fn is_reference_type(data_type: DataType) -> bool {
    matches!(data_type, DataType::Text | DataType::Binary)
}

fn db_type(data_type: DataType) -> &'static str {
    match data_type {
        DataType::SmallInt => "SMALLINT",
        DataType::Integer => "INTEGER",
        DataType::BigInt => "BIGINT",
        DataType::UnsignedInt => "INTEGER UNSIGNED",
        DataType::Boolean => "BOOLEAN",
        DataType::Text => "TEXT",
        DataType::Char => "CHAR",
        DataType::Real => "REAL",
        DataType::DoublePrecision => "DOUBLE",
        DataType::Numeric => "DECIMAL",
        DataType::DateTime => "DATETIME",
        DataType::Binary => "BLOB",
    }
}

fn column_attribute(column: &Column) -> String {
    let mut attr = format!(
        "Name = \"{}\", DbType = \"{}\"",
        column.name,
        db_type(column.data_type)
    );
    if column.primary_key {
        attr.push_str(", IsPrimaryKey = true");
    }
    if column.db_generated {
        attr.push_str(", IsDbGenerated = true");
    }
    if column.nullable {
        attr.push_str(", CanBeNull = true");
    }
    attr
}

/// Prefix every line, blank lines included, with one indent unit. Line count
/// is preserved exactly.
fn indent_every_line(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn prolog(options: &CodeGenOptions) -> String {
    format!(
        "//#########################################################################\n\
         // Generated by sqlscribe on {} - extracted from {}.\n\
         //#########################################################################\n\
         \n\
         using System;\n\
         using System.Collections.Generic;\n\
         using System.Data;\n\
         \n",
        options.generated_at, options.source_description
    )
}

/// Convert the canonically-assembled text (`\n`, four-space indents) to the
/// configured conventions. Runs once, over the whole document.
fn apply_format(text: String, fmt: &FormatConfig) -> String {
    let text = if fmt.indent != "    " {
        text.replace("    ", &fmt.indent)
    } else {
        text
    };
    if fmt.newline != "\n" {
        text.replace('\n', &fmt.newline)
    } else {
        text
    }
}
