//! Back-office products.

use std::fmt;
use std::str::FromStr;

use la_reyna_core::{FieldErrors, Price, ProductCode};
use serde::Deserialize;

use super::{new_code, required};
use crate::maintenance::{Maintenance, Record};

/// Brands offered in the product form.
pub const BRANDS: [&str; 6] = [
    "Dior",
    "Carolina Herrera",
    "Lancôme",
    "MAC",
    "L'Oreal",
    "Maybelline",
];

/// Label of the category filter entry that shows everything.
pub const ALL_CATEGORIES: &str = "Todos";

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Perfumes,
    Maquillaje,
    Cremas,
    Joyas,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Self; 4] = [Self::Perfumes, Self::Maquillaje, Self::Cremas, Self::Joyas];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perfumes => "Perfumes",
            Self::Maquillaje => "Maquillaje",
            Self::Cremas => "Cremas",
            Self::Joyas => "Joyas",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Optional audience of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Masculino,
    Femenino,
    Unisex,
}

impl Sex {
    pub const ALL: [Self; 3] = [Self::Masculino, Self::Femenino, Self::Unisex];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Masculino => "Masculino",
            Self::Femenino => "Femenino",
            Self::Unisex => "Unisex",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|x| x.as_str() == s.trim())
            .ok_or_else(|| format!("unknown sex: {s}"))
    }
}

/// A product in the back-office list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub code: ProductCode,
    pub name: String,
    pub category: Category,
    /// Seeded products have no brand.
    pub brand: Option<String>,
    pub sex: Option<Sex>,
    pub price: Price,
}

impl Record for Product {
    type Code = ProductCode;

    fn code(&self) -> &ProductCode {
        &self.code
    }
}

impl Product {
    /// Whether the product belongs to the selected filter entry.
    ///
    /// `None` and `Todos` select everything.
    #[must_use]
    pub fn in_category(&self, filter: Option<&str>) -> bool {
        match filter.map(str::trim) {
            None | Some("" | ALL_CATEGORIES) => true,
            Some(name) => self.category.as_str() == name,
        }
    }
}

fn seed_product(code: &'static str, name: &str, soles: i64) -> Product {
    Product {
        code: ProductCode::from_static(code),
        name: name.to_string(),
        category: Category::Perfumes,
        brand: None,
        sex: None,
        price: Price::from_soles(soles),
    }
}

/// Products the back-office starts with.
#[must_use]
pub fn seed() -> Vec<Product> {
    vec![
        seed_product("P001", "Set Ccori Rosé: Parfum + Loción Perfumada", 119),
        seed_product("P002", "Cielo en Rosa Eau de Parfum", 113),
        seed_product("P003", "Set Sauvage Dior: Parfum + Estuche Elegante", 105),
        seed_product("P004", "Bombshell Seduction Eau de Parfum", 180),
        seed_product("P005", "Una Instinct Eau de Parfum", 165),
        seed_product("P006", "Fragancia Intensa para Hombre", 150),
    ]
}

/// Product form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub code: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub sex: String,
    pub price: String,
}

impl ProductForm {
    /// Prefill the edit form from an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            code: product.code.to_string(),
            name: product.name.clone(),
            category: product.category.to_string(),
            brand: product.brand.clone().unwrap_or_default(),
            sex: product.sex.map(|s| s.to_string()).unwrap_or_default(),
            price: product.price.amount().to_string(),
        }
    }

    /// Validate a product about to be added to `list`.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages, including a taken code.
    pub fn into_new(self, list: &Maintenance<Product>) -> Result<Product, FieldErrors> {
        let mut errors = FieldErrors::new();
        let code = new_code(&mut errors, &self.code, ProductCode::parse, list);
        self.build(code, errors)
    }

    /// Validate an edit of the product with `code`. The code itself is
    /// not editable.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages.
    pub fn into_update(self, code: ProductCode) -> Result<Product, FieldErrors> {
        self.build(Some(code), FieldErrors::new())
    }

    fn build(
        self,
        code: Option<ProductCode>,
        mut errors: FieldErrors,
    ) -> Result<Product, FieldErrors> {
        let name = required(&mut errors, "name", &self.name, "El nombre es requerido");

        let category = self
            .category
            .parse::<Category>()
            .inspect_err(|_| errors.insert("category", "La categoría es requerida"))
            .ok();

        let brand = BRANDS
            .iter()
            .find(|b| **b == self.brand.trim())
            .map(|b| (*b).to_string());
        if brand.is_none() {
            errors.insert("brand", "La marca es requerida");
        }

        // Optional; anything unrecognised counts as not given.
        let sex = self.sex.parse::<Sex>().ok();

        let price = Price::parse(&self.price)
            .ok()
            .filter(Price::is_positive);
        if price.is_none() {
            errors.insert("price", "El precio debe ser mayor a 0");
        }

        match (code, name, category, brand, price) {
            (Some(code), Some(name), Some(category), brand @ Some(_), Some(price))
                if errors.is_empty() =>
            {
                Ok(Product {
                    code,
                    name,
                    category,
                    brand,
                    sex,
                    price,
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::CODE_TAKEN;

    fn form() -> ProductForm {
        ProductForm {
            code: "P007".to_string(),
            name: "Rouge Dior".to_string(),
            category: "Maquillaje".to_string(),
            brand: "Dior".to_string(),
            sex: "Femenino".to_string(),
            price: "89.90".to_string(),
        }
    }

    #[test]
    fn test_seed_codes() {
        let codes: Vec<_> = seed().iter().map(|p| p.code.to_string()).collect();
        assert_eq!(codes, ["P001", "P002", "P003", "P004", "P005", "P006"]);
    }

    #[test]
    fn test_valid_form() {
        let list = Maintenance::new(seed());
        let product = form().into_new(&list).unwrap();

        assert_eq!(product.code.as_str(), "P007");
        assert_eq!(product.category, Category::Maquillaje);
        assert_eq!(product.sex, Some(Sex::Femenino));
        assert_eq!(product.price, Price::from_cents(8990));
    }

    #[test]
    fn test_duplicate_code() {
        let list = Maintenance::new(seed());
        let errors = ProductForm {
            code: "P001".to_string(),
            ..form()
        }
        .into_new(&list)
        .unwrap_err();

        assert_eq!(errors.get("code"), Some(CODE_TAKEN));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let list = Maintenance::new(seed());
        let errors = ProductForm::default().into_new(&list).unwrap_err();

        assert_eq!(errors.get("code"), Some("El código es requerido"));
        assert_eq!(errors.get("name"), Some("El nombre es requerido"));
        assert_eq!(errors.get("category"), Some("La categoría es requerida"));
        assert_eq!(errors.get("brand"), Some("La marca es requerida"));
        assert_eq!(errors.get("price"), Some("El precio debe ser mayor a 0"));
        assert!(!errors.has("sex"));
    }

    #[test]
    fn test_price_must_be_positive() {
        let list = Maintenance::new(seed());
        for price in ["0", "-5", "gratis"] {
            let errors = ProductForm {
                price: price.to_string(),
                ..form()
            }
            .into_new(&list)
            .unwrap_err();
            assert!(errors.has("price"), "{price} accepted");
        }
    }

    #[test]
    fn test_update_keeps_code_even_if_taken() {
        let code = ProductCode::from_static("P001");
        let product = ProductForm {
            code: "ignored".to_string(),
            ..form()
        }
        .into_update(code.clone())
        .unwrap();
        assert_eq!(product.code, code);
    }

    #[test]
    fn test_category_filter() {
        let product = seed().remove(0);
        assert!(product.in_category(None));
        assert!(product.in_category(Some(ALL_CATEGORIES)));
        assert!(product.in_category(Some("Perfumes")));
        assert!(!product.in_category(Some("Joyas")));
    }

    #[test]
    fn test_form_round_trips_product() {
        let list = Maintenance::new(seed());
        let product = form().into_new(&list).unwrap();
        let again = ProductForm::from_product(&product)
            .into_update(product.code.clone())
            .unwrap();
        assert_eq!(again, product);
    }
}
