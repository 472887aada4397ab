//! Back-office customers.

use la_reyna_core::{CustomerCode, Email, EmailError, FieldErrors, Phone, PhoneError};
use serde::Deserialize;

use super::{new_code, required};
use crate::maintenance::{Maintenance, Record};

/// A customer in the back-office list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub code: CustomerCode,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub address: String,
    pub phone: Phone,
    /// Number of orders placed.
    pub orders: u32,
}

impl Record for Customer {
    type Code = CustomerCode;

    fn code(&self) -> &CustomerCode {
        &self.code
    }
}

impl Customer {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match of `query` against code, first and last name.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || [
                self.code.as_str(),
                self.first_name.as_str(),
                self.last_name.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_customer(
    code: &'static str,
    first_name: &str,
    last_name: &str,
    email: &str,
    address: &str,
    phone: &str,
    orders: u32,
) -> Option<Customer> {
    Some(Customer {
        code: CustomerCode::from_static(code),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: Email::parse(email).ok()?,
        address: address.to_string(),
        phone: Phone::parse(phone).ok()?,
        orders,
    })
}

/// Customers the back-office starts with.
#[must_use]
pub fn seed() -> Vec<Customer> {
    [
        seed_customer(
            "001",
            "Mariano",
            "Torres",
            "mariano.torres@example.com",
            "Av. Primavera 123 - Surco",
            "987654321",
            0,
        ),
        seed_customer(
            "002",
            "Jorge",
            "Ramirez",
            "j.ramirez@example.com",
            "Jr. Los Jardines 456 - San Borja",
            "965432187",
            2,
        ),
        seed_customer(
            "003",
            "Lucia",
            "Mendoza",
            "lucia.mendoza@example.com",
            "Calle Las Violetas 789 - Miraflores",
            "912345678",
            4,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Customer form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub orders: String,
}

impl CustomerForm {
    /// Prefill the edit form from an existing customer.
    #[must_use]
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            code: customer.code.to_string(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.to_string(),
            address: customer.address.clone(),
            phone: customer.phone.to_string(),
            orders: customer.orders.to_string(),
        }
    }

    /// Validate a customer about to be added to `list`.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages, including a taken code.
    pub fn into_new(self, list: &Maintenance<Customer>) -> Result<Customer, FieldErrors> {
        let mut errors = FieldErrors::new();
        let code = new_code(&mut errors, &self.code, CustomerCode::parse, list);
        self.build(code, errors)
    }

    /// Validate an edit of the customer with `code`.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages.
    pub fn into_update(self, code: CustomerCode) -> Result<Customer, FieldErrors> {
        self.build(Some(code), FieldErrors::new())
    }

    fn build(
        self,
        code: Option<CustomerCode>,
        mut errors: FieldErrors,
    ) -> Result<Customer, FieldErrors> {
        let first_name = required(&mut errors, "first_name", &self.first_name, "El nombre es requerido");
        let last_name = required(&mut errors, "last_name", &self.last_name, "El apellido es requerido");

        let email = Email::parse(&self.email)
            .inspect_err(|e| {
                let message = match e {
                    EmailError::Empty => "El email es requerido",
                    _ => "El formato de email no es válido",
                };
                errors.insert("email", message);
            })
            .ok();

        let address = required(&mut errors, "address", &self.address, "La dirección es requerida");

        let phone = Phone::parse(&self.phone)
            .inspect_err(|e| {
                let message = match e {
                    PhoneError::Empty => "El celular es requerido",
                    PhoneError::InvalidFormat { .. } => "El celular debe tener 9 dígitos",
                };
                errors.insert("phone", message);
            })
            .ok();

        let orders = match self.orders.trim() {
            "" => Some(0),
            raw => raw
                .parse::<u32>()
                .inspect_err(|_| errors.insert("orders", "El número de pedidos no es válido"))
                .ok(),
        };

        match (code, first_name, last_name, email, address, phone, orders) {
            (
                Some(code),
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(address),
                Some(phone),
                Some(orders),
            ) if errors.is_empty() => Ok(Customer {
                code,
                first_name,
                last_name,
                email,
                address,
                phone,
                orders,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::CODE_TAKEN;

    fn form() -> CustomerForm {
        CustomerForm {
            code: "004".to_string(),
            first_name: "Rosa".to_string(),
            last_name: "Quispe".to_string(),
            email: "rosa.quispe@example.com".to_string(),
            address: "Av. Arequipa 1500 - Lince".to_string(),
            phone: "934567812".to_string(),
            orders: String::new(),
        }
    }

    #[test]
    fn test_seed() {
        let customers = seed();
        assert_eq!(customers.len(), 3);
        assert_eq!(customers[2].full_name(), "Lucia Mendoza");
        assert_eq!(customers[2].orders, 4);
    }

    #[test]
    fn test_valid_form_defaults_orders_to_zero() {
        let list = Maintenance::new(seed());
        let customer = form().into_new(&list).unwrap();
        assert_eq!(customer.code.as_str(), "004");
        assert_eq!(customer.orders, 0);
    }

    #[test]
    fn test_duplicate_code() {
        let list = Maintenance::new(seed());
        let errors = CustomerForm {
            code: "002".to_string(),
            ..form()
        }
        .into_new(&list)
        .unwrap_err();
        assert_eq!(errors.get("code"), Some(CODE_TAKEN));
    }

    #[test]
    fn test_phone_messages() {
        let list = Maintenance::new(seed());

        let errors = CustomerForm {
            phone: "12345".to_string(),
            ..form()
        }
        .into_new(&list)
        .unwrap_err();
        assert_eq!(errors.get("phone"), Some("El celular debe tener 9 dígitos"));

        let errors = CustomerForm {
            phone: "  ".to_string(),
            ..form()
        }
        .into_new(&list)
        .unwrap_err();
        assert_eq!(errors.get("phone"), Some("El celular es requerido"));
    }

    #[test]
    fn test_email_messages() {
        let list = Maintenance::new(seed());

        let errors = CustomerForm {
            email: "rosa@localhost".to_string(),
            ..form()
        }
        .into_new(&list)
        .unwrap_err();
        assert_eq!(errors.get("email"), Some("El formato de email no es válido"));

        let errors = CustomerForm {
            email: String::new(),
            ..form()
        }
        .into_new(&list)
        .unwrap_err();
        assert_eq!(errors.get("email"), Some("El email es requerido"));
    }

    #[test]
    fn test_update_skips_uniqueness() {
        let code = CustomerCode::from_static("001");
        let customer = form().into_update(code.clone()).unwrap();
        assert_eq!(customer.code, code);
        assert_eq!(customer.first_name, "Rosa");
    }

    #[test]
    fn test_matches() {
        let customer = seed().remove(1);
        assert!(customer.matches("ramirez"));
        assert!(customer.matches("JOR"));
        assert!(customer.matches("002"));
        assert!(customer.matches(""));
        assert!(!customer.matches("lucia"));
    }
}
