//! End-to-end statement rendering through the public API.

use serde_json::json;
use sqlstmt::{
    ErrorKind, FieldMap, PagedResult, SortDirection, StatementBuilder, StatementKind, StmtResult,
    Value,
};

fn builder(table: &str, fields: &[&str]) -> StmtResult<StatementBuilder> {
    let mut builder = StatementBuilder::new();
    builder.add_table_name(table)?.add_available_fields(fields)?;
    Ok(builder)
}

#[test]
fn delete_without_filters_has_no_where_clause() -> StmtResult<()> {
    for table in ["t", "dbo.Applications", "public.users"] {
        let b = builder(table, &["Id"])?;
        assert_eq!(b.build_delete_command()?, format!("DELETE FROM {table};"));
    }
    Ok(())
}

#[test]
fn where_clause_has_one_term_per_filter_in_order() -> StmtResult<()> {
    let fields = ["A", "B", "C", "D", "E"];
    for n in 1..=fields.len() {
        let mut b = builder("t", &fields)?;
        let filters: FieldMap<Value> = fields[..n]
            .iter()
            .rev()
            .map(|f| (*f, json!(f)))
            .collect();
        b.add_filters(filters)?.add_update_fields([("A", 0)])?;

        let expected = fields[..n]
            .iter()
            .rev()
            .map(|f| format!("{f} = @{}", f.to_lowercase()))
            .collect::<Vec<_>>()
            .join(" AND ");

        assert_eq!(b.build_delete_command()?, format!("DELETE FROM t WHERE {expected};"));
        assert!(b.build_update_command()?.ends_with(&format!(" WHERE {expected};")));
    }
    Ok(())
}

#[test]
fn insert_lists_have_equal_length() -> StmtResult<()> {
    let fields = ["ApplicationID", "Description", "Name", "CreatedBy"];
    let b = builder("dbo.Applications", &fields)?;
    let built = b.build(StatementKind::Insert)?;
    let sql = built.sql();

    let open = sql.find('(').unwrap();
    let close = sql.find(')').unwrap();
    let columns: Vec<_> = sql[open + 1..close].split(", ").collect();
    let values_at = sql.find("VALUES (").unwrap() + "VALUES (".len();
    let params: Vec<_> = sql[values_at..sql.len() - 2].split(", ").collect();

    assert_eq!(columns, fields);
    assert_eq!(params.len(), fields.len());
    for (field, param) in columns.iter().zip(&params) {
        assert!(param.eq_ignore_ascii_case(&format!("@{field}")));
    }
    assert_eq!(built.bindings().len(), fields.len());
    Ok(())
}

#[test]
fn select_sort_order_requirement_follows_dialect() -> StmtResult<()> {
    let b = builder("dbo.Applications", &["ApplicationID", "Description"])?;
    let err = b.build_select_command().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotConfigured);

    let mut relaxed = StatementBuilder::with_dialect(
        sqlstmt::DialectConfig::default().with_require_sort_order(false),
    )?;
    relaxed
        .add_table_name("dbo.Applications")?
        .add_available_fields(["ApplicationID", "Description"])?;
    assert!(relaxed.build_select_command().is_ok());
    Ok(())
}

#[test]
fn select_window_example() -> StmtResult<()> {
    let mut b = builder("dbo.Applications", &["ApplicationID", "Description"])?;
    b.add_sort_order([("Description", SortDirection::Ascending)])?;
    let sql = b.build_select_command()?;
    assert!(sql.contains("ROW_NUMBER() OVER(Description ASC)"));
    assert!(sql.ends_with(
        "WHERE subSelect.row_no >= @startingRowNumber AND subSelect.row_num < @endingRowNumber;"
    ));
    Ok(())
}

#[test]
fn invalid_names_are_reported_in_source_order() -> StmtResult<()> {
    let mut b = builder("t", &["A"])?;
    b.add_filters([("Zeta", 1), ("Alpha", 2), ("Mu", 3)])?;
    let err = b.build_delete_command().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Filters contains the following invalid field names: Zeta, Alpha, Mu."
    );
    Ok(())
}

#[test]
fn builder_is_reusable_across_builds() -> StmtResult<()> {
    let mut b = builder("dbo.Applications", &["ApplicationID", "Description"])?;
    b.add_filters([("ApplicationID", 1)])?;
    let first = b.build_delete_command()?;
    assert_eq!(first, b.build_delete_command()?);

    b.add_filters(Vec::<(&str, Value)>::new())?;
    assert_eq!(b.build_delete_command()?, "DELETE FROM dbo.Applications;");
    Ok(())
}

#[test]
fn paged_select_binds_row_window() -> StmtResult<()> {
    let mut b = builder("dbo.Applications", &["ApplicationID", "Description"])?;
    b.add_sort_order([("Description", SortDirection::Descending)])?;
    let built = b.build(StatementKind::Select)?;

    let page = PagedResult::new(30, 10, 95, vec!["row"; 10])?;
    let (start, end) = page.row_window();
    let bounds: Vec<_> = built.bindings()[..2]
        .iter()
        .map(|b| b.token.as_str())
        .zip([start, end])
        .collect();
    assert_eq!(
        bounds,
        vec![("@startingRowNumber", 31), ("@endingRowNumber", 41)]
    );
    Ok(())
}

#[test]
fn update_bindings_carry_builder_values() -> StmtResult<()> {
    let id = uuid::Uuid::new_v4();
    let mut b = builder("dbo.Applications", &["ApplicationID", "Description"])?;
    b.add_update_fields([("Description", json!("renamed"))])?
        .add_filters([("ApplicationID", json!(id))])?;

    let built = b.build(StatementKind::Update)?;
    assert_eq!(
        built.sql(),
        "UPDATE dbo.Applications SET Description = @description WHERE ApplicationID = @applicationID;"
    );

    let values: Vec<_> = built
        .bindings()
        .iter()
        .map(|b| (b.name.as_str(), b.value.cloned()))
        .collect();
    assert_eq!(
        values,
        vec![
            ("description", Some(json!("renamed"))),
            ("applicationID", Some(json!(id.to_string()))),
        ]
    );
    assert!(!built.sql().contains(&id.to_string()));
    Ok(())
}

#[test]
fn error_kinds_distinguish_failures() {
    let mut b = StatementBuilder::new();
    let err = b.add_table_name(None::<&str>).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    let err = b.add_table_name("   ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BlankValue);
    let err = b.build_select_command().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotConfigured);
}
