//! Statement rendering: validation plus fragment assembly.

use super::{Binding, BuiltStatement, SortDirection, StatementBuilder, StatementKind};
use crate::dialect::{
    render, ENDING_PARAM, FIELDS, PARAMETERS, SORT_ORDER, STARTING_PARAM, TABLE,
    UPDATE_ASSIGNMENTS, WHERE_CLAUSE,
};
use crate::error::{InvalidFieldReport, StmtError, StmtResult};
use crate::fields::{invalid_fields, FieldMap};
use crate::Value;

/// How the filter list is introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WhereStyle {
    /// ` WHERE a = @a AND b = @b`
    Where,
    /// ` AND a = @a AND b = @b`, appended after conditions the template owns.
    LeadingAnd,
}

impl StatementBuilder {
    pub(super) fn render_delete(&self) -> StmtResult<BuiltStatement<'_>> {
        let kind = StatementKind::Delete;
        let table = self.require_configured(kind)?;

        InvalidFieldReport {
            filters: invalid_fields(self.filters.keys(), &self.available_fields),
            ..Default::default()
        }
        .into_result()?;

        let mut bindings = Vec::with_capacity(self.filters.len());
        let where_clause = self.where_clause(WhereStyle::Where, &mut bindings);
        let sql = render(
            &self.dialect.delete_format,
            &[(TABLE, table), (WHERE_CLAUSE, where_clause.as_str())],
        );

        Ok(BuiltStatement {
            kind,
            sql,
            bindings,
        })
    }

    pub(super) fn render_insert(&self) -> StmtResult<BuiltStatement<'_>> {
        let kind = StatementKind::Insert;
        let table = self.require_configured(kind)?;

        let bindings: Vec<_> = self
            .available_fields
            .iter()
            .map(|field| self.binding(field, None))
            .collect();
        let fields = self.available_fields.join(", ");
        let parameters = join_tokens(&bindings);

        let sql = render(
            &self.dialect.insert_format,
            &[(TABLE, table), (FIELDS, fields.as_str()), (PARAMETERS, parameters.as_str())],
        );

        Ok(BuiltStatement {
            kind,
            sql,
            bindings,
        })
    }

    pub(super) fn render_select(&self) -> StmtResult<BuiltStatement<'_>> {
        let kind = StatementKind::Select;
        let table = self.require_configured(kind)?;

        if self.dialect.require_sort_order && self.sort_order.is_empty() {
            return Err(StmtError::not_configured(
                "SortOrder must be specified to build a SELECT command.",
            ));
        }

        InvalidFieldReport {
            filters: invalid_fields(self.filters.keys(), &self.available_fields),
            sort_order: invalid_fields(self.sort_order.keys(), &self.available_fields),
            ..Default::default()
        }
        .into_result()?;

        let mut bindings = Vec::with_capacity(self.filters.len() + 2);
        let start = self.pagination_binding(&self.starting_row_number_parameter_name);
        let end = self.pagination_binding(&self.ending_row_number_parameter_name);
        let (start_token, end_token) = (start.token.clone(), end.token.clone());
        bindings.push(start);
        bindings.push(end);

        let fields = self.available_fields.join(", ");
        let where_clause = self.where_clause(WhereStyle::LeadingAnd, &mut bindings);
        let sort_order = self.sort_fragment();

        let sql = render(
            &self.dialect.select_format,
            &[
                (TABLE, table),
                (FIELDS, fields.as_str()),
                (WHERE_CLAUSE, where_clause.as_str()),
                (STARTING_PARAM, start_token.as_str()),
                (ENDING_PARAM, end_token.as_str()),
                (SORT_ORDER, sort_order.as_str()),
            ],
        );

        Ok(BuiltStatement {
            kind,
            sql,
            bindings,
        })
    }

    pub(super) fn render_update(&self) -> StmtResult<BuiltStatement<'_>> {
        let kind = StatementKind::Update;
        let table = self.require_configured(kind)?;

        if self.update_fields.is_empty() {
            return Err(StmtError::not_configured(
                "UpdateFields must be specified to build an UPDATE command.",
            ));
        }

        InvalidFieldReport {
            filters: invalid_fields(self.filters.keys(), &self.available_fields),
            update_fields: invalid_fields(self.update_fields.keys(), &self.available_fields),
            ..Default::default()
        }
        .into_result()?;

        let mut bindings = Vec::with_capacity(self.update_fields.len() + self.filters.len());
        let assignments = self.assignments(&self.update_fields, &mut bindings).join(", ");
        let where_clause = self.where_clause(WhereStyle::Where, &mut bindings);

        let sql = render(
            &self.dialect.update_format,
            &[
                (TABLE, table),
                (UPDATE_ASSIGNMENTS, assignments.as_str()),
                (WHERE_CLAUSE, where_clause.as_str()),
            ],
        );

        Ok(BuiltStatement {
            kind,
            sql,
            bindings,
        })
    }

    // ==================== Fragments ====================

    fn binding<'a>(&self, field: &str, value: Option<&'a Value>) -> Binding<'a> {
        let name = self.naming.normalize(field);
        let token = self.dialect.parameter_token(&name);
        Binding { name, token, value }
    }

    /// Pagination names are used as given, without the naming transform.
    fn pagination_binding(&self, name: &str) -> Binding<'static> {
        Binding {
            name: name.to_string(),
            token: self.dialect.parameter_token(name),
            value: None,
        }
    }

    /// `field = token` terms in map order, recording a binding for each.
    fn assignments<'a>(
        &self,
        map: &'a FieldMap<Value>,
        bindings: &mut Vec<Binding<'a>>,
    ) -> Vec<String> {
        map.iter()
            .map(|(field, value)| {
                let binding = self.binding(field, Some(value));
                let term = format!("{field} = {}", binding.token);
                bindings.push(binding);
                term
            })
            .collect()
    }

    /// Filter terms joined by ` AND `; empty when there are no filters.
    fn where_clause<'a>(&'a self, style: WhereStyle, bindings: &mut Vec<Binding<'a>>) -> String {
        if self.filters.is_empty() {
            return String::new();
        }

        let terms = self.assignments(&self.filters, bindings);
        match style {
            WhereStyle::Where => format!(" WHERE {}", terms.join(" AND ")),
            WhereStyle::LeadingAnd => terms.iter().map(|t| format!(" AND {t}")).collect(),
        }
    }

    /// `field ASC, field DESC`, prefixed with ` ORDER BY ` when the dialect
    /// asks for it and there is something to order by.
    fn sort_fragment(&self) -> String {
        let list = self
            .sort_order
            .iter()
            .map(|(field, direction)| format!("{field} {}", SortDirection::as_sql(*direction)))
            .collect::<Vec<_>>()
            .join(", ");

        if self.dialect.include_order_by_clause && !list.is_empty() {
            format!(" ORDER BY {list}")
        } else {
            list
        }
    }
}

fn join_tokens(bindings: &[Binding<'_>]) -> String {
    bindings
        .iter()
        .map(|b| b.token.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
