//! `tracing` events for built and rejected statements.
//!
//! Enable via the crate feature: `sqlstmt = { features = ["tracing"] }`.
//! Events use the `sqlstmt.sql` target at DEBUG level.

use crate::builder::{BuiltStatement, StatementKind};
use crate::error::StmtError;

#[cfg(feature = "tracing")]
pub(crate) fn statement_built(built: &BuiltStatement<'_>) {
    tracing::debug!(
        target: "sqlstmt.sql",
        statement = built.kind().keyword(),
        param_count = built.bindings().len(),
        sql = %built.sql(),
        "built statement"
    );
}

#[cfg(feature = "tracing")]
pub(crate) fn statement_rejected(kind: StatementKind, err: &StmtError) {
    tracing::debug!(
        target: "sqlstmt.sql",
        statement = kind.keyword(),
        error_kind = ?err.kind(),
        error = %err,
        "statement rejected"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn statement_built(_built: &BuiltStatement<'_>) {}

#[cfg(not(feature = "tracing"))]
pub(crate) fn statement_rejected(_kind: StatementKind, _err: &StmtError) {}
