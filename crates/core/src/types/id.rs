//! Newtype codes for type-safe entity references.
//!
//! Shop entities are identified by short human-entered strings (`P001`,
//! `001`, `cielo-rosa`). Use the `define_code!` macro to create wrappers that
//! prevent accidentally mixing codes from different entity types.

/// Errors that can occur when parsing a code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// The input is empty after trimming.
    #[error("code cannot be empty")]
    Empty,
    /// The input contains whitespace.
    #[error("code cannot contain whitespace")]
    Whitespace,
}

/// Macro to define a type-safe string code wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `parse()` (trims, rejects empty and inner whitespace), `as_str()`
/// - `Display`, `FromStr` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use la_reyna_core::define_code;
/// define_code!(SkuCode);
/// define_code!(StoreCode);
///
/// let sku = SkuCode::parse("P001").unwrap();
/// let store = StoreCode::parse("P001").unwrap();
/// assert_eq!(sku.as_str(), store.as_str());
///
/// // These are different types, so this won't compile:
/// // let _: SkuCode = store;
/// ```
#[macro_export]
macro_rules! define_code {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse a code, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns an error if the trimmed input is empty or contains whitespace.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::CodeError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::CodeError::Empty);
                }
                if trimmed.chars().any(char::is_whitespace) {
                    return Err($crate::CodeError::Whitespace);
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Wrap a compile-time literal without validation.
            ///
            /// For seed data only; the literal must already be a valid code.
            #[must_use]
            pub fn from_static(s: &'static str) -> Self {
                debug_assert!(Self::parse(s).is_ok(), "invalid static code");
                Self(s.to_owned())
            }

            /// Returns the code as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::CodeError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Catalog slug used in product URLs (e.g. `cielo-rosa`).
define_code!(CatalogKey);
// Back-office product code (e.g. `P001`).
define_code!(ProductCode);
// Back-office customer code (e.g. `001`).
define_code!(CustomerCode);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let code = ProductCode::parse("  P001 ").unwrap();
        assert_eq!(code.as_str(), "P001");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProductCode::parse("   "), Err(CodeError::Empty));
    }

    #[test]
    fn test_parse_inner_whitespace() {
        assert_eq!(CustomerCode::parse("00 1"), Err(CodeError::Whitespace));
    }

    #[test]
    fn test_serde_transparent() {
        let key = CatalogKey::parse("cielo-rosa").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"cielo-rosa\"");
    }
}
