//! Domain models for admin.
//!
//! Products and customers are [`Record`](crate::maintenance::Record)s kept
//! in memory. Each has a form type holding the raw strings a browser
//! posts; converting a form into a record is where validation happens.

pub mod customer;
pub mod product;
pub mod session;

pub use customer::{Customer, CustomerForm};
pub use product::{Category, Product, ProductForm, Sex};
pub use session::{CurrentAdmin, keys as session_keys};

use la_reyna_core::{CodeError, FieldErrors};

use crate::maintenance::{Maintenance, Record};

/// Message for a blank code.
pub const CODE_REQUIRED: &str = "El código es requerido";

/// Message for a code another record already uses.
pub const CODE_TAKEN: &str = "Este código ya existe";

/// Message for a code with spaces inside.
pub const CODE_WHITESPACE: &str = "El código no puede contener espacios";

/// Trimmed value of a required text field, or an error for it.
fn required(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    message: &str,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, message);
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse the code of a record about to be added to `list`.
fn new_code<R: Record>(
    errors: &mut FieldErrors,
    raw: &str,
    parse: fn(&str) -> Result<R::Code, CodeError>,
    list: &Maintenance<R>,
) -> Option<R::Code> {
    match parse(raw) {
        Ok(code) if list.contains(&code) => {
            errors.insert("code", CODE_TAKEN);
            None
        }
        Ok(code) => Some(code),
        Err(CodeError::Empty) => {
            errors.insert("code", CODE_REQUIRED);
            None
        }
        Err(CodeError::Whitespace) => {
            errors.insert("code", CODE_WHITESPACE);
            None
        }
    }
}
