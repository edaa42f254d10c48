//! Parameterized statement builder.
//!
//! [`StatementBuilder`] holds a table name, its available fields, filters,
//! sort order and update values, and renders them through a
//! [`DialectConfig`] into SELECT/INSERT/UPDATE/DELETE text.
//!
//! ## Design
//!
//! - Setters replace their value wholesale and return the builder for chaining.
//! - Field names are only checked against the available fields at build time.
//! - Values never reach the SQL text; every build also reports the parameter
//!   tokens the execution layer must bind.
//!
//! # Example
//!
//! ```
//! use sqlstmt::StatementBuilder;
//!
//! let mut builder = StatementBuilder::new();
//! builder
//!     .add_table_name("dbo.Applications")?
//!     .add_available_fields(["ApplicationID", "Description"])?
//!     .add_filters([("ApplicationID", 42)])?;
//!
//! assert_eq!(
//!     builder.build_delete_command()?,
//!     "DELETE FROM dbo.Applications WHERE ApplicationID = @applicationID;"
//! );
//! # Ok::<(), sqlstmt::StmtError>(())
//! ```

mod render;

use crate::dialect::DialectConfig;
use crate::error::{StmtError, StmtResult};
use crate::fields::{
    FieldList, FieldMap, FieldValidator, IntoFieldList, IntoFieldMap, IntoName,
};
use crate::naming::{NameTransform, NamingConvention};
use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Default name of the first-row pagination parameter.
pub const DEFAULT_STARTING_ROW_NUMBER_PARAMETER_NAME: &str = "startingRowNumber";
/// Default name of the exclusive last-row pagination parameter.
pub const DEFAULT_ENDING_ROW_NUMBER_PARAMETER_NAME: &str = "endingRowNumber";

/// Sort direction of one sort-order entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// The four statement kinds a builder renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    /// Indefinite article for error messages ("an INSERT", "a SELECT").
    fn article(self) -> &'static str {
        match self {
            Self::Insert | Self::Update => "an",
            Self::Select | Self::Delete => "a",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parameter token the execution layer must bind.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<'a> {
    /// Parameter name, e.g. `applicationID`.
    pub name: String,
    /// Token as it appears in the SQL, e.g. `@applicationID`.
    pub token: String,
    /// Value held by the builder; `None` when the caller supplies it
    /// (insert fields, pagination bounds).
    pub value: Option<&'a Value>,
}

/// Rendered statement text plus its bindings in token order.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltStatement<'a> {
    kind: StatementKind,
    sql: String,
    bindings: Vec<Binding<'a>>,
}

impl<'a> BuiltStatement<'a> {
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn bindings(&self) -> &[Binding<'a>] {
        &self.bindings
    }

    pub fn into_sql(self) -> String {
        self.sql
    }
}

/// Builder for SELECT, INSERT, UPDATE and DELETE statements.
///
/// The dialect and naming transform are fixed at construction; everything
/// else is configured through the `add_*` setters and may be changed between
/// builds. Not synchronized: use one builder per query under construction.
#[derive(Clone)]
pub struct StatementBuilder {
    dialect: DialectConfig,
    naming: Arc<dyn NameTransform>,
    table_name: Option<String>,
    available_fields: FieldList,
    filters: FieldMap<Value>,
    sort_order: FieldMap<SortDirection>,
    update_fields: FieldMap<Value>,
    starting_row_number_parameter_name: String,
    ending_row_number_parameter_name: String,
}

impl StatementBuilder {
    /// Builder for the default dialect with [`NamingConvention::LowerFirst`].
    pub fn new() -> Self {
        Self::from_parts(DialectConfig::default(), Arc::new(NamingConvention::default()))
    }

    /// Builder for `dialect`, which is validated first.
    pub fn with_dialect(dialect: DialectConfig) -> StmtResult<Self> {
        Self::custom(dialect, NamingConvention::default())
    }

    /// Builder with a dialect and a custom field-name transform.
    ///
    /// Fails with a template error when [`DialectConfig::validate`] rejects
    /// the dialect.
    pub fn custom(
        dialect: DialectConfig,
        naming: impl NameTransform + 'static,
    ) -> StmtResult<Self> {
        dialect.validate()?;
        Ok(Self::from_parts(dialect, Arc::new(naming)))
    }

    fn from_parts(dialect: DialectConfig, naming: Arc<dyn NameTransform>) -> Self {
        Self {
            dialect,
            naming,
            table_name: None,
            available_fields: FieldList::new(),
            filters: FieldMap::new(),
            sort_order: FieldMap::new(),
            update_fields: FieldMap::new(),
            starting_row_number_parameter_name: DEFAULT_STARTING_ROW_NUMBER_PARAMETER_NAME
                .to_string(),
            ending_row_number_parameter_name: DEFAULT_ENDING_ROW_NUMBER_PARAMETER_NAME.to_string(),
        }
    }

    // ==================== Configuration ====================

    /// Set the table name.
    pub fn add_table_name(&mut self, table_name: impl IntoName) -> StmtResult<&mut Self> {
        self.table_name = Some(required_name(table_name, "tableName")?);
        Ok(self)
    }

    /// Replace the available fields. At least one field is required.
    pub fn add_available_fields(
        &mut self,
        available_fields: impl IntoFieldList,
    ) -> StmtResult<&mut Self> {
        let fields = available_fields
            .into_field_list()
            .ok_or(StmtError::missing("availableFields"))?;
        if fields.is_empty() {
            return Err(StmtError::empty_collection(
                "availableFields",
                "AvailableFields must contain at least 1 field.",
            ));
        }
        self.available_fields = fields;
        Ok(self)
    }

    /// Replace the filters. An empty map removes the WHERE clause.
    pub fn add_filters(&mut self, filters: impl IntoFieldMap<Value>) -> StmtResult<&mut Self> {
        self.filters = filters
            .into_field_map()
            .ok_or(StmtError::missing("filters"))?;
        Ok(self)
    }

    /// Replace the sort order. Entry order is the emitted order.
    pub fn add_sort_order(
        &mut self,
        sort_order: impl IntoFieldMap<SortDirection>,
    ) -> StmtResult<&mut Self> {
        self.sort_order = sort_order
            .into_field_map()
            .ok_or(StmtError::missing("sortOrder"))?;
        Ok(self)
    }

    /// Replace the update fields. At least one field is required.
    pub fn add_update_fields(
        &mut self,
        update_fields: impl IntoFieldMap<Value>,
    ) -> StmtResult<&mut Self> {
        let fields = update_fields
            .into_field_map()
            .ok_or(StmtError::missing("updateFields"))?;
        if fields.is_empty() {
            return Err(StmtError::empty_collection(
                "updateFields",
                "UpdateFields must contain at least 1 field.",
            ));
        }
        self.update_fields = fields;
        Ok(self)
    }

    pub fn add_starting_row_number_parameter_name(
        &mut self,
        name: impl IntoName,
    ) -> StmtResult<&mut Self> {
        self.starting_row_number_parameter_name =
            required_name(name, "startingRowNumberParameterName")?;
        Ok(self)
    }

    pub fn add_ending_row_number_parameter_name(
        &mut self,
        name: impl IntoName,
    ) -> StmtResult<&mut Self> {
        self.ending_row_number_parameter_name =
            required_name(name, "endingRowNumberParameterName")?;
        Ok(self)
    }

    // ==================== Accessors ====================

    pub fn dialect(&self) -> &DialectConfig {
        &self.dialect
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn available_fields(&self) -> &FieldList {
        &self.available_fields
    }

    pub fn filters(&self) -> &FieldMap<Value> {
        &self.filters
    }

    pub fn sort_order(&self) -> &FieldMap<SortDirection> {
        &self.sort_order
    }

    pub fn update_fields(&self) -> &FieldMap<Value> {
        &self.update_fields
    }

    pub fn starting_row_number_parameter_name(&self) -> &str {
        &self.starting_row_number_parameter_name
    }

    pub fn ending_row_number_parameter_name(&self) -> &str {
        &self.ending_row_number_parameter_name
    }

    // ==================== Build ====================

    /// Build a statement of `kind` with its bindings.
    pub fn build(&self, kind: StatementKind) -> StmtResult<BuiltStatement<'_>> {
        let result = match kind {
            StatementKind::Select => self.render_select(),
            StatementKind::Insert => self.render_insert(),
            StatementKind::Update => self.render_update(),
            StatementKind::Delete => self.render_delete(),
        };

        match &result {
            Ok(built) => crate::trace::statement_built(built),
            Err(err) => crate::trace::statement_rejected(kind, err),
        }
        result
    }

    /// Build a DELETE command that is ready for execution.
    pub fn build_delete_command(&self) -> StmtResult<String> {
        self.build(StatementKind::Delete).map(BuiltStatement::into_sql)
    }

    /// Build an INSERT command that is ready for execution.
    pub fn build_insert_command(&self) -> StmtResult<String> {
        self.build(StatementKind::Insert).map(BuiltStatement::into_sql)
    }

    /// Build a paginated SELECT command that is ready for execution.
    pub fn build_select_command(&self) -> StmtResult<String> {
        self.build(StatementKind::Select).map(BuiltStatement::into_sql)
    }

    /// Build an UPDATE command that is ready for execution.
    pub fn build_update_command(&self) -> StmtResult<String> {
        self.build(StatementKind::Update).map(BuiltStatement::into_sql)
    }

    /// Table name, after checking the configuration every build needs.
    fn require_configured(&self, kind: StatementKind) -> StmtResult<&str> {
        let table = match self.table_name.as_deref() {
            Some(table) if !table.trim().is_empty() => table,
            _ => {
                return Err(StmtError::not_configured(format!(
                    "TableName must be specified to build {} {kind} command.",
                    kind.article()
                )));
            }
        };

        if self.available_fields.is_empty() {
            return Err(StmtError::not_configured(format!(
                "AvailableFields must be specified to build {} {kind} command.",
                kind.article()
            )));
        }

        Ok(table)
    }
}

impl Default for StatementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StatementBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementBuilder")
            .field("dialect", &self.dialect)
            .field("table_name", &self.table_name)
            .field("available_fields", &self.available_fields)
            .field("filters", &self.filters)
            .field("sort_order", &self.sort_order)
            .field("update_fields", &self.update_fields)
            .field(
                "starting_row_number_parameter_name",
                &self.starting_row_number_parameter_name,
            )
            .field(
                "ending_row_number_parameter_name",
                &self.ending_row_number_parameter_name,
            )
            .finish_non_exhaustive()
    }
}

impl FieldValidator for StatementBuilder {
    fn containing_type(&self) -> &str {
        self.table_name.as_deref().unwrap_or_default()
    }

    fn supports(&self, field: &str) -> bool {
        self.available_fields.contains(field)
    }
}

fn required_name(value: impl IntoName, param: &'static str) -> StmtResult<String> {
    let value = value.into_name().ok_or(StmtError::missing(param))?;
    if value.trim().is_empty() {
        return Err(StmtError::blank(param));
    }
    Ok(value)
}
