use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use validator::ValidationErrors;

pub mod categories;

/// Validation messages grouped by the name of the failing field.
///
/// Serialises as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the failing fields in alphabetical order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(value: &ValidationErrors) -> Self {
        let mut errors = Self::default();
        for (field, field_errors) in value.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| error.code.to_string());
                errors.add(&field.to_string(), message);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_messages_per_field() {
        let mut errors = FieldErrors::default();
        errors.add("name", "required");
        errors.add("image", "required");
        errors.add("name", "too short");

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["image", "name"]);
        assert_eq!(errors.get("name").unwrap(), ["required", "too short"]);
        assert_eq!(errors.to_string(), "image: required; name: required, too short");
    }

    #[test]
    fn serialises_as_a_plain_map() {
        let mut errors = FieldErrors::default();
        errors.add("description", "required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"description": ["required"]}));
    }
}
