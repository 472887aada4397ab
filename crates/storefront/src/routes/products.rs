//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::{Audience, CatalogQuery, Ingredient, Product};
use crate::error::AppError;
use crate::middleware::Nav;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub key: String,
    pub name: String,
    pub volume: Option<String>,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            key: product.key.to_string(),
            name: product.name.clone(),
            volume: product.volume.clone(),
            price: product.price.display(),
            image: product.image.clone(),
        }
    }
}

/// Side-menu entry.
#[derive(Clone)]
pub struct AudienceLink {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Pagination link.
#[derive(Clone)]
pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub current: bool,
}

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub page: Option<usize>,
    pub q: Option<String>,
    pub category: Option<String>,
}

impl CatalogParams {
    fn query(&self) -> CatalogQuery {
        CatalogQuery {
            search: self.q.clone().filter(|q| !q.trim().is_empty()),
            audience: self.category.as_deref().and_then(|c| c.parse().ok()),
        }
    }

    /// Link to `page` keeping the current filters.
    fn href(&self, page: usize) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(q) = self.q.as_deref().filter(|q| !q.trim().is_empty()) {
            query.append_pair("q", q);
        }
        if let Some(category) = &self.category {
            query.append_pair("category", category);
        }
        query.append_pair("page", &page.to_string());
        format!("/products?{}", query.finish())
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub nav: Nav,
    pub products: Vec<ProductCardView>,
    pub audiences: Vec<AudienceLink>,
    pub search: String,
    pub category: Option<String>,
    pub pages: Vec<PageLink>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub total_items: usize,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nav: Nav,
    pub key: String,
    pub title: String,
    pub volume: Option<String>,
    pub price: String,
    pub image: String,
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

/// Display the catalog.
#[instrument(skip(state, nav))]
pub async fn index(
    State(state): State<AppState>,
    nav: Nav,
    Query(params): Query<CatalogParams>,
) -> ProductsIndexTemplate {
    let query = params.query();
    let page = state
        .catalog()
        .list(&query, params.page.unwrap_or(1))
        .await;

    let pages = (1..=page.total_pages)
        .map(|number| PageLink {
            number,
            href: params.href(number),
            current: number == page.current,
        })
        .collect();

    ProductsIndexTemplate {
        nav,
        products: page.items.iter().map(ProductCardView::from).collect(),
        audiences: Audience::ALL
            .into_iter()
            .map(|a| AudienceLink {
                slug: a.slug(),
                label: a.label(),
                active: query.audience == Some(a),
            })
            .collect(),
        search: params.q.clone().unwrap_or_default(),
        category: query.audience.map(|a| a.slug().to_string()),
        prev_href: (page.current > 1).then(|| params.href(page.current - 1)),
        next_href: (page.current < page.total_pages).then(|| params.href(page.current + 1)),
        pages,
        total_items: page.total_items,
    }
}

/// Display a product detail page.
#[instrument(skip(state, nav))]
pub async fn show(
    State(state): State<AppState>,
    nav: Nav,
    Path(key): Path<String>,
) -> Result<ProductShowTemplate, AppError> {
    let product = state
        .catalog()
        .find(&key)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product `{key}`")))?;

    Ok(ProductShowTemplate {
        nav,
        key: product.key.to_string(),
        title: product.title,
        volume: product.volume,
        price: product.price.display(),
        image: product.image,
        description: product.description,
        ingredients: product.ingredients,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_params_href_keeps_filters() {
        let params = CatalogParams {
            page: Some(1),
            q: Some("rosa bella".to_string()),
            category: Some("damas".to_string()),
        };
        assert_eq!(params.href(2), "/products?q=rosa+bella&category=damas&page=2");
    }

    #[test]
    fn test_params_query_ignores_unknown_category() {
        let params = CatalogParams {
            page: None,
            q: Some("  ".to_string()),
            category: Some("gatos".to_string()),
        };
        let query = params.query();
        assert!(query.search.is_none());
        assert!(query.audience.is_none());
    }
}
