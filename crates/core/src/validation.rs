//! Field-scoped form validation errors.
//!
//! Forms never fail a request on bad input. Validation fills a
//! [`FieldErrors`] map and the page re-renders each message next to its
//! field.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Map of form field name to a human-readable error message.
///
/// Only the first message recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Create an empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record an error for `field` unless one is already present.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether `field` has an error.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Whether no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(value)` when there are no errors, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the error map itself if it is not empty.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("codigo", "El código es requerido");
        errors.insert("codigo", "Este código ya existe");
        assert_eq!(errors.get("codigo"), Some("El código es requerido"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(FieldErrors::new().into_result(5), Ok(5));

        let mut errors = FieldErrors::new();
        errors.insert("precio", "El precio debe ser mayor a 0");
        let err = errors.into_result(5).unwrap_err();
        assert!(err.has("precio"));
        assert!(!err.has("nombre"));
    }

    #[test]
    fn test_display_joins_fields_in_order() {
        let mut errors = FieldErrors::new();
        errors.insert("nombre", "requerido");
        errors.insert("email", "inválido");
        assert_eq!(errors.to_string(), "email: inválido; nombre: requerido");
    }
}
