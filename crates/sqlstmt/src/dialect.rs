//! Per-dialect statement templates and flags.
//!
//! A [`DialectConfig`] holds the four statement templates, the parameter
//! format and the two SELECT flags. Templates use named placeholders:
//!
//! | Template          | Placeholders |
//! |-------------------|--------------|
//! | `delete_format`   | `{table}` `{whereClause}` |
//! | `insert_format`   | `{table}` `{fields}` `{parameters}` |
//! | `select_format`   | `{table}` `{fields}` `{whereClause}` `{startingParam}` `{endingParam}` `{sortOrder}` |
//! | `update_format`   | `{table}` `{updateAssignments}` `{whereClause}` |
//! | `parameter_format`| `{name}` (optional, e.g. `"?"`) |
//!
//! Every statement template must contain `{table}`; DELETE, UPDATE and
//! SELECT templates must also carry `{whereClause}` so filters are never
//! dropped, and INSERT/UPDATE must carry their field lists.
//!
//! # Example
//! ```
//! use sqlstmt::DialectConfig;
//!
//! let oracle = DialectConfig::default().with_parameter_format(":{name}");
//! assert_eq!(oracle.parameter_token("id"), ":id");
//! ```

use crate::error::{StmtError, StmtResult};
use serde::{Deserialize, Serialize};

pub(crate) const TABLE: &str = "table";
pub(crate) const WHERE_CLAUSE: &str = "whereClause";
pub(crate) const FIELDS: &str = "fields";
pub(crate) const PARAMETERS: &str = "parameters";
pub(crate) const UPDATE_ASSIGNMENTS: &str = "updateAssignments";
pub(crate) const SORT_ORDER: &str = "sortOrder";
pub(crate) const STARTING_PARAM: &str = "startingParam";
pub(crate) const ENDING_PARAM: &str = "endingParam";
pub(crate) const NAME: &str = "name";

const DELETE_PLACEHOLDERS: &[&str] = &[TABLE, WHERE_CLAUSE];
const INSERT_PLACEHOLDERS: &[&str] = &[TABLE, FIELDS, PARAMETERS];
const SELECT_PLACEHOLDERS: &[&str] = &[
    TABLE,
    FIELDS,
    WHERE_CLAUSE,
    STARTING_PARAM,
    ENDING_PARAM,
    SORT_ORDER,
];
const UPDATE_PLACEHOLDERS: &[&str] = &[TABLE, UPDATE_ASSIGNMENTS, WHERE_CLAUSE];
const PARAMETER_PLACEHOLDERS: &[&str] = &[NAME];

const DELETE_REQUIRED: &[&str] = &[TABLE, WHERE_CLAUSE];
const INSERT_REQUIRED: &[&str] = &[TABLE, FIELDS, PARAMETERS];
const SELECT_REQUIRED: &[&str] = &[TABLE, FIELDS, WHERE_CLAUSE];
const UPDATE_REQUIRED: &[&str] = &[TABLE, UPDATE_ASSIGNMENTS, WHERE_CLAUSE];
const PARAMETER_REQUIRED: &[&str] = &[];

pub const DEFAULT_DELETE_FORMAT: &str = "DELETE FROM {table}{whereClause};";
pub const DEFAULT_INSERT_FORMAT: &str = "INSERT INTO {table} ({fields}) VALUES ({parameters});";
pub const DEFAULT_UPDATE_FORMAT: &str = "UPDATE {table} SET {updateAssignments}{whereClause};";
pub const DEFAULT_PARAMETER_FORMAT: &str = "@{name}";

/// Windowed pagination: rows are numbered by `ROW_NUMBER() OVER(<sort order>)`
/// in a sub-select, and every row carries `row_count`.
pub const DEFAULT_SELECT_FORMAT: &str = concat!(
    "SELECT {fields} FROM",
    " (SELECT COUNT() as row_count, ROW_NUMBER() OVER({sortOrder}) AS row_no, {fields} FROM {table}) as subSelect",
    " WHERE subSelect.row_no >= {startingParam} AND subSelect.row_num < {endingParam}{whereClause};"
);

/// For tables that already expose a `row_no` column; ordering trails the query.
pub const ROW_COLUMN_SELECT_FORMAT: &str = concat!(
    "SELECT COUNT() as row_count, {fields} FROM {table}",
    " WHERE row_no >= {startingParam} AND row_no < {endingParam}{whereClause}{sortOrder};"
);

/// Statement templates and flags for one SQL dialect.
///
/// Fixed once handed to a [`StatementBuilder`](crate::StatementBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialectConfig {
    pub delete_format: String,
    pub insert_format: String,
    pub select_format: String,
    pub update_format: String,
    /// Parameter token format, e.g. `"@{name}"`, `":{name}"` or `"?"`.
    pub parameter_format: String,
    /// Prefix the SELECT sort fragment with ` ORDER BY `.
    pub include_order_by_clause: bool,
    /// Refuse to build a SELECT without a sort order.
    pub require_sort_order: bool,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self::row_number()
    }
}

impl DialectConfig {
    /// The default dialect: `ROW_NUMBER() OVER(...)` windowing, `@name`
    /// parameters, sort order required and embedded in the window.
    pub fn row_number() -> Self {
        Self {
            delete_format: DEFAULT_DELETE_FORMAT.to_string(),
            insert_format: DEFAULT_INSERT_FORMAT.to_string(),
            select_format: DEFAULT_SELECT_FORMAT.to_string(),
            update_format: DEFAULT_UPDATE_FORMAT.to_string(),
            parameter_format: DEFAULT_PARAMETER_FORMAT.to_string(),
            include_order_by_clause: false,
            require_sort_order: true,
        }
    }

    /// A dialect whose tables carry a `row_no` column: trailing `ORDER BY`,
    /// sort order optional.
    pub fn row_column() -> Self {
        Self {
            select_format: ROW_COLUMN_SELECT_FORMAT.to_string(),
            include_order_by_clause: true,
            require_sort_order: false,
            ..Self::row_number()
        }
    }

    pub fn with_delete_format(mut self, format: impl Into<String>) -> Self {
        self.delete_format = format.into();
        self
    }

    pub fn with_insert_format(mut self, format: impl Into<String>) -> Self {
        self.insert_format = format.into();
        self
    }

    pub fn with_select_format(mut self, format: impl Into<String>) -> Self {
        self.select_format = format.into();
        self
    }

    pub fn with_update_format(mut self, format: impl Into<String>) -> Self {
        self.update_format = format.into();
        self
    }

    pub fn with_parameter_format(mut self, format: impl Into<String>) -> Self {
        self.parameter_format = format.into();
        self
    }

    pub fn with_include_order_by_clause(mut self, include: bool) -> Self {
        self.include_order_by_clause = include;
        self
    }

    pub fn with_require_sort_order(mut self, require: bool) -> Self {
        self.require_sort_order = require;
        self
    }

    /// Apply the parameter format to an already-normalized name.
    pub fn parameter_token(&self, name: &str) -> String {
        render(&self.parameter_format, &[(NAME, name)])
    }

    /// Check that no template is blank, uses a placeholder its statement
    /// kind does not provide, or omits one the statement needs.
    pub fn validate(&self) -> StmtResult<()> {
        let templates = [
            ("delete_format", &self.delete_format, DELETE_PLACEHOLDERS, DELETE_REQUIRED),
            ("insert_format", &self.insert_format, INSERT_PLACEHOLDERS, INSERT_REQUIRED),
            ("select_format", &self.select_format, SELECT_PLACEHOLDERS, SELECT_REQUIRED),
            ("update_format", &self.update_format, UPDATE_PLACEHOLDERS, UPDATE_REQUIRED),
            ("parameter_format", &self.parameter_format, PARAMETER_PLACEHOLDERS, PARAMETER_REQUIRED),
        ];

        for (field, template, known, required) in templates {
            if template.trim().is_empty() {
                return Err(StmtError::template(format!(
                    "{field} cannot be empty or whitespace"
                )));
            }
            if let Some(unknown) = placeholders(template).find(|p| !known.contains(p)) {
                return Err(StmtError::template(format!(
                    "{field} uses unknown placeholder {{{unknown}}}"
                )));
            }
            if let Some(missing) = required
                .iter()
                .find(|r| !placeholders(template).any(|p| p == **r))
            {
                return Err(StmtError::template(format!(
                    "{field} is missing placeholder {{{missing}}}"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a dialect from TOML. Missing keys keep the
    /// default dialect's values.
    ///
    /// ```
    /// use sqlstmt::DialectConfig;
    ///
    /// let dialect = DialectConfig::from_toml_str(r#"parameter_format = ":{name}""#)?;
    /// assert_eq!(dialect.parameter_format, ":{name}");
    /// assert!(dialect.require_sort_order);
    /// # Ok::<(), sqlstmt::StmtError>(())
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(raw: &str) -> StmtResult<Self> {
        let dialect: Self = toml::from_str(raw)?;
        dialect.validate()?;
        Ok(dialect)
    }
}

/// Iterate the `{name}` placeholders of a template.
fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    let mut rest = template;
    std::iter::from_fn(move || {
        loop {
            let open = rest.find('{')?;
            let after = &rest[open + 1..];
            match placeholder_len(after) {
                Some(len) => {
                    rest = &after[len + 1..];
                    return Some(&after[..len]);
                }
                None => rest = after,
            }
        }
    })
}

/// Length of an identifier at the start of `s` that is closed by `}`.
fn placeholder_len(s: &str) -> Option<usize> {
    let len = s
        .char_indices()
        .find(|&(i, c)| {
            !(c.is_ascii_alphabetic() || (i > 0 && (c.is_ascii_digit() || c == '_')))
        })
        .map(|(i, _)| i)?;
    (len > 0 && s[len..].starts_with('}')).then_some(len)
}

/// Substitute placeholders in a single pass.
///
/// Placeholders without a matching argument are kept verbatim; substituted
/// text is never scanned again.
pub(crate) fn render(template: &str, args: &[(&str, &str)]) -> String {
    let extra: usize = args.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = placeholder_len(after).and_then(|len| {
            args.iter()
                .find(|(k, _)| *k == &after[..len])
                .map(|(_, v)| (len, *v))
        });
        match arg {
            Some((len, value)) => {
                out.push_str(value);
                rest = &after[len + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
