//! Loading dialects from TOML.

#![cfg(feature = "toml")]

use sqlstmt::{DialectConfig, ErrorKind, SortDirection, StatementBuilder, StmtError, StmtResult};

const ROW_COLUMN_TOML: &str = r#"
select_format = "SELECT COUNT() as row_count, {fields} FROM {table} WHERE row_no >= {startingParam} AND row_no < {endingParam}{whereClause}{sortOrder};"
parameter_format = ":{name}"
include_order_by_clause = true
require_sort_order = false
"#;

#[test]
fn empty_toml_is_the_default_dialect() -> StmtResult<()> {
    assert_eq!(DialectConfig::from_toml_str("")?, DialectConfig::default());
    Ok(())
}

#[test]
fn toml_dialect_drives_rendering() -> StmtResult<()> {
    let dialect = DialectConfig::from_toml_str(ROW_COLUMN_TOML)?;
    assert_eq!(
        dialect,
        DialectConfig::row_column().with_parameter_format(":{name}")
    );

    let mut builder = StatementBuilder::with_dialect(dialect)?;
    builder
        .add_table_name("applications")?
        .add_available_fields(["ApplicationID", "Description"])?
        .add_filters([("Description", "x")])?
        .add_sort_order([("ApplicationID", SortDirection::Ascending)])?;

    assert_eq!(
        builder.build_select_command()?,
        "SELECT COUNT() as row_count, ApplicationID, Description FROM applications \
         WHERE row_no >= :startingRowNumber AND row_no < :endingRowNumber \
         AND Description = :description ORDER BY ApplicationID ASC;"
    );
    Ok(())
}

#[test]
fn unknown_keys_are_config_errors() {
    let err = DialectConfig::from_toml_str("paramter_format = \"?\"").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn wrong_types_are_config_errors() {
    let err = DialectConfig::from_toml_str("require_sort_order = \"yes\"").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn unknown_placeholders_are_template_errors() {
    let err = DialectConfig::from_toml_str(r#"insert_format = "INSERT INTO {table} VALUES ({values});""#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Template);
    assert_eq!(
        err.to_string(),
        "Template error: insert_format uses unknown placeholder {values}"
    );
}

#[test]
fn delete_without_where_clause_is_rejected() {
    let err = DialectConfig::from_toml_str(r#"delete_format = "DELETE FROM {table};""#)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Template);
    assert_eq!(
        err.to_string(),
        "Template error: delete_format is missing placeholder {whereClause}"
    );
}

#[test]
fn dialect_round_trips_through_toml() -> StmtResult<()> {
    let dialect = DialectConfig::row_column();
    let raw = toml::to_string(&dialect).map_err(|e| StmtError::config(e.to_string()))?;
    assert_eq!(DialectConfig::from_toml_str(&raw)?, dialect);
    Ok(())
}
