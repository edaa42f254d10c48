//! Error types for sqlstmt

use std::fmt;
use thiserror::Error;

/// Result type alias for sqlstmt operations
pub type StmtResult<T> = Result<T, StmtError>;

/// Coarse classification of a [`StmtError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required argument was not supplied.
    InvalidInput,
    /// A required string argument was empty or whitespace-only.
    BlankValue,
    /// A required collection argument had no entries.
    EmptyCollection,
    /// A build was attempted before mandatory configuration was set.
    NotConfigured,
    /// A build referenced field names missing from the available fields.
    InvalidField,
    /// A dialect template is malformed.
    Template,
    /// Dialect configuration could not be loaded.
    Config,
    /// A numeric argument was outside its allowed range.
    OutOfRange,
}

/// Error types for statement configuration and rendering
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StmtError {
    /// Required argument missing
    #[error("{param} is required.")]
    MissingValue { param: &'static str },

    /// Required string argument is empty or whitespace
    #[error("{param} cannot be empty or whitespace.")]
    BlankValue { param: &'static str },

    /// Required collection argument is empty
    #[error("{message}")]
    EmptyCollection {
        param: &'static str,
        message: String,
    },

    /// Build invoked before mandatory configuration
    #[error("{0}")]
    NotConfigured(String),

    /// Filters, sort order or update fields reference unknown fields
    #[error("{0}")]
    InvalidFields(InvalidFieldReport),

    /// Malformed dialect template
    #[error("Template error: {0}")]
    Template(String),

    /// Dialect configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Numeric argument outside its allowed range
    #[error("{message}")]
    OutOfRange {
        param: &'static str,
        value: i64,
        message: String,
    },
}

impl StmtError {
    /// Create a missing-argument error
    pub fn missing(param: &'static str) -> Self {
        Self::MissingValue { param }
    }

    /// Create a blank-string error
    pub fn blank(param: &'static str) -> Self {
        Self::BlankValue { param }
    }

    /// Create an empty-collection error
    pub fn empty_collection(param: &'static str, message: impl Into<String>) -> Self {
        Self::EmptyCollection {
            param,
            message: message.into(),
        }
    }

    /// Create a not-configured error
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::NotConfigured(message.into())
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an out-of-range error
    pub fn out_of_range(param: &'static str, value: i64, message: impl Into<String>) -> Self {
        Self::OutOfRange {
            param,
            value,
            message: message.into(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingValue { .. } => ErrorKind::InvalidInput,
            Self::BlankValue { .. } => ErrorKind::BlankValue,
            Self::EmptyCollection { .. } => ErrorKind::EmptyCollection,
            Self::NotConfigured(_) => ErrorKind::NotConfigured,
            Self::InvalidFields(_) => ErrorKind::InvalidField,
            Self::Template(_) => ErrorKind::Template,
            Self::Config(_) => ErrorKind::Config,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }

    /// Name of the offending argument, for setter and range errors.
    pub fn param(&self) -> Option<&'static str> {
        match self {
            Self::MissingValue { param }
            | Self::BlankValue { param }
            | Self::EmptyCollection { param, .. }
            | Self::OutOfRange { param, .. } => Some(*param),
            _ => None,
        }
    }

    /// Check if this is a not-configured error
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured(_))
    }

    /// Check if this is an invalid-field error
    pub fn is_invalid_field(&self) -> bool {
        matches!(self, Self::InvalidFields(_))
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for StmtError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

/// Field names rejected by a build, grouped by the collection they came from.
///
/// Each list keeps the iteration order of its source collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvalidFieldReport {
    pub filters: Vec<String>,
    pub sort_order: Vec<String>,
    pub update_fields: Vec<String>,
}

impl InvalidFieldReport {
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.sort_order.is_empty() && self.update_fields.is_empty()
    }

    /// `Ok(())` when nothing was rejected, otherwise the report as an error.
    pub fn into_result(self) -> StmtResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(StmtError::InvalidFields(self))
        }
    }
}

impl fmt::Display for InvalidFieldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = [
            ("Filters", &self.filters),
            ("SortOrder", &self.sort_order),
            ("UpdateFields", &self.update_fields),
        ];

        let mut first = true;
        for (collection, names) in sections {
            if names.is_empty() {
                continue;
            }
            if !first {
                f.write_str("\r\n")?;
            }
            write!(
                f,
                "{collection} contains the following invalid field names: {}.",
                names.join(", ")
            )?;
            first = false;
        }
        Ok(())
    }
}
