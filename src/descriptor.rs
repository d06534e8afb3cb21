//! Schema descriptor loading
//!
//! Reads a JSON schema descriptor into a `Database` snapshot. This is the
//! only place schema data enters the system; the generators themselves never
//! touch the filesystem or a live database.

use std::fs;
use std::path::Path;

use tracing::{debug, error, info};

use crate::error::SqlscribeError;
use crate::schema::Database;

/// Parse a JSON descriptor held in memory
pub fn from_json(text: &str) -> Result<Database, SqlscribeError> {
    serde_json::from_str(text).map_err(|e| SqlscribeError::Descriptor {
        path: "<inline>".to_string(),
        message: e.to_string(),
    })
}

/// Load a JSON descriptor file
pub fn load(path: &Path) -> Result<Database, SqlscribeError> {
    debug!(path = ?path, "Loading schema descriptor");

    let text = fs::read_to_string(path).map_err(|e| {
        error!(path = ?path, error = ?e, "Failed to read schema descriptor");
        SqlscribeError::Descriptor {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;

    let database: Database = serde_json::from_str(&text).map_err(|e| {
        error!(path = ?path, error = ?e, "Failed to parse schema descriptor");
        SqlscribeError::Descriptor {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;

    info!(
        database = ?database.name,
        tables = database.tables.len(),
        functions = database.functions.len(),
        "Loaded schema descriptor"
    );

    Ok(database)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AssociationKind, DataType};

    const SAMPLE: &str = r#"{
        "name": "Northwind",
        "tables": [
            {
                "name": "customers",
                "columns": [
                    {"name": "id", "data_type": "integer", "primary_key": true},
                    {"name": "name", "data_type": "text", "nullable": true}
                ],
                "associations": [
                    {"member": "Orders", "target": "Order", "kind": "children"}
                ]
            },
            {
                "name": "orders",
                "columns": [
                    {"name": "id", "data_type": "integer", "primary_key": true},
                    {"name": "placed_at", "data_type": "date_time"}
                ]
            }
        ],
        "functions": [
            {
                "name": "get_order_count",
                "parameters": [{"name": "customer_id", "data_type": "integer"}],
                "returns": "integer"
            }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let db = from_json(SAMPLE).unwrap();

        assert_eq!(db.name, "Northwind");
        assert_eq!(db.tables.len(), 2);
        assert_eq!(db.functions.len(), 1);

        let customers = &db.tables[0];
        assert_eq!(customers.columns.len(), 2);
        assert!(customers.columns[0].primary_key);
        assert!(!customers.columns[0].nullable);
        assert!(customers.columns[1].nullable);
        assert_eq!(customers.associations[0].kind, AssociationKind::Children);

        assert_eq!(db.tables[1].columns[1].data_type, DataType::DateTime);
        assert_eq!(db.functions[0].returns, Some(DataType::Integer));
    }

    #[test]
    fn test_defaults_applied() {
        let db = from_json(SAMPLE).unwrap();
        // No member/row_type overrides in the descriptor: fallbacks apply.
        assert_eq!(db.tables[0].member_name(), "Customers");
        assert_eq!(db.tables[0].row_type_name(), "Customer");
        assert_eq!(db.context_class_name(), "Northwind");
    }

    #[test]
    fn test_unknown_data_type_is_rejected() {
        let bad = r#"{
            "name": "X",
            "tables": [
                {"name": "t", "columns": [{"name": "c", "data_type": "uuid"}]}
            ]
        }"#;
        let err = from_json(bad).unwrap_err();
        assert!(matches!(err, SqlscribeError::Descriptor { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("sqlscribe_descriptor_test.json");
        fs::write(&path, SAMPLE).unwrap();

        let db = load(&path).unwrap();
        assert_eq!(db.name, "Northwind");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("sqlscribe_does_not_exist.json");
        let err = load(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("sqlscribe_does_not_exist.json"));
    }
}
