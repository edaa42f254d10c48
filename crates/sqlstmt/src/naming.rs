//! Field name to parameter name transforms.
//!
//! A [`NameTransform`] turns a column name into the name embedded in its
//! parameter token (`ApplicationID` -> `applicationID` -> `@applicationID`).
//! Transforms must be pure: the same input always yields the same output.

use heck::{ToLowerCamelCase, ToSnakeCase};
use serde::{Deserialize, Serialize};

/// Normalizes a field name before it is substituted into the parameter format.
pub trait NameTransform: Send + Sync {
    fn normalize(&self, field: &str) -> String;
}

impl<F> NameTransform for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, field: &str) -> String {
        self(field)
    }
}

/// Built-in naming conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// Lower-case the first character only: `ApplicationID` -> `applicationID`.
    #[default]
    LowerFirst,
    /// `ApplicationID` -> `applicationId`.
    LowerCamel,
    /// `ApplicationID` -> `application_id`.
    Snake,
    /// Use the field name unchanged.
    Verbatim,
}

impl NameTransform for NamingConvention {
    fn normalize(&self, field: &str) -> String {
        match self {
            Self::LowerFirst => lower_first(field),
            Self::LowerCamel => field.to_lower_camel_case(),
            Self::Snake => field.to_snake_case(),
            Self::Verbatim => field.to_string(),
        }
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_first_keeps_the_rest() {
        let n = NamingConvention::LowerFirst;
        assert_eq!(n.normalize("ApplicationID"), "applicationID");
        assert_eq!(n.normalize("CreatedBy"), "createdBy");
        assert_eq!(n.normalize("name"), "name");
        assert_eq!(n.normalize(""), "");
    }

    #[test]
    fn heck_conventions() {
        assert_eq!(NamingConvention::LowerCamel.normalize("CreatedBy"), "createdBy");
        assert_eq!(NamingConvention::Snake.normalize("CreatedBy"), "created_by");
        assert_eq!(NamingConvention::Verbatim.normalize("CreatedBy"), "CreatedBy");
    }

    #[test]
    fn closures_are_transforms() {
        let upper = |s: &str| s.to_uppercase();
        assert_eq!(upper.normalize("name"), "NAME");
    }
}
