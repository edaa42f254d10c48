//! # sqlstmt
//!
//! Parameterized SQL statement text for SELECT, INSERT, UPDATE and DELETE.
//!
//! ## Features
//!
//! - **Whitelisted fields**: filters, sort order and update fields are checked
//!   against the table's available fields before anything is rendered
//! - **Parameters only**: values are never spliced into SQL; each build reports
//!   the tokens (`@applicationID`, `:id`, `?`) to bind
//! - **Dialects as data**: statement templates, parameter format and SELECT
//!   flags live in a [`DialectConfig`] that can be loaded from TOML
//! - **Pluggable naming**: field names reach parameter tokens through a
//!   [`NameTransform`]
//!
//! Executing statements, connections and value binding belong to the caller.
//!
//! ```
//! use sqlstmt::{SortDirection, StatementBuilder};
//!
//! let mut builder = StatementBuilder::new();
//! builder
//!     .add_table_name("dbo.Applications")?
//!     .add_available_fields(["ApplicationID", "Description"])?
//!     .add_sort_order([("Description", SortDirection::Ascending)])?;
//!
//! let sql = builder.build_select_command()?;
//! assert!(sql.contains("ROW_NUMBER() OVER(Description ASC)"));
//! # Ok::<(), sqlstmt::StmtError>(())
//! ```

pub mod builder;
pub mod dialect;
pub mod error;
pub mod fields;
pub mod naming;
pub mod page;
mod trace;

pub use builder::{Binding, BuiltStatement, SortDirection, StatementBuilder, StatementKind};
pub use dialect::DialectConfig;
pub use error::{ErrorKind, InvalidFieldReport, StmtError, StmtResult};
pub use fields::{
    FieldList, FieldMap, FieldValidator, IntoFieldList, IntoFieldMap, IntoName, invalid_fields,
};
pub use naming::{NameTransform, NamingConvention};
pub use page::PagedResult;

/// Opaque filter / update value handed through to the execution layer.
pub use serde_json::Value;
