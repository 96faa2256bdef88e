//! Tests for the column schema.

use super::*;

/// Verify schema construction preserves order.
#[test]
fn test_schema_preserves_order() {
    let schema = ColumnSchema::new(["ISBN", "Title", "Subtitle"]).expect("valid schema");

    let columns: Vec<&str> = schema.iter().collect();
    assert_eq!(columns, vec!["ISBN", "Title", "Subtitle"]);
    assert_eq!(schema.len(), 3);
}

/// Verify an empty column list is rejected.
#[test]
fn test_empty_schema_rejected() {
    let result = ColumnSchema::new(Vec::<String>::new());

    assert_eq!(result, Err(SchemaError::Empty));
}

/// Verify duplicate column names are rejected.
#[test]
fn test_duplicate_column_rejected() {
    let result = ColumnSchema::new(["ISBN", "Title", "ISBN"]);

    assert_eq!(
        result,
        Err(SchemaError::DuplicateColumn {
            column: "ISBN".to_string()
        }),
        "A repeated header cell should fail schema construction"
    );
}

/// Verify header-line parsing trims whitespace around cells.
#[test]
fn test_from_header_line_trims_cells() {
    let schema =
        ColumnSchema::from_header_line("ISBN, Title ,Short Description").expect("valid header");

    let columns: Vec<&str> = schema.iter().collect();
    assert_eq!(columns, vec!["ISBN", "Title", "Short Description"]);
}

/// Verify position lookup.
#[test]
fn test_position_lookup() {
    let schema = ColumnSchema::new(["ISBN", "Title"]).expect("valid schema");

    assert_eq!(schema.position("Title"), Some(1));
    assert_eq!(schema.position("Price"), None);
    assert!(schema.contains("ISBN"));
    assert!(!schema.contains("Price"));
}
