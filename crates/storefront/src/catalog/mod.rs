//! Product catalog.
//!
//! By default the catalog is the built-in list in [`data`]. With
//! `CATALOG_SOURCE=api` it is fetched from the backend's
//! `GET /api/productos`, cached for five minutes, and matched by name
//! against the built-in entries to pick up images and descriptions. Any
//! backend failure falls back to the built-in list.

mod data;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use la_reyna_backend::{BackendClient, BackendProduct};
use la_reyna_core::{CatalogKey, Price};
use moka::future::Cache;
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

/// Products per listing page.
pub const PAGE_SIZE: usize = 6;

/// How many products the home page features.
pub const FEATURED_COUNT: usize = 4;

/// Cache key for the backend product list.
const PRODUCTS_CACHE_KEY: &str = "products";

/// Image used for backend products with no built-in match.
const PLACEHOLDER_IMAGE: &str = "/static/img/producto.png";

/// One scent note on a product detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub description: String,
}

/// Shopper group used by the catalog side menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    Kids,
    Teens,
    Men,
    Women,
}

impl Audience {
    /// All audiences in menu order.
    pub const ALL: [Self; 4] = [Self::Kids, Self::Teens, Self::Men, Self::Women];

    /// Query-string value.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Kids => "ninos",
            Self::Teens => "adolescentes",
            Self::Men => "caballeros",
            Self::Women => "damas",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kids => "Niños",
            Self::Teens => "Adolescentes",
            Self::Men => "Caballeros",
            Self::Women => "Damas",
        }
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown audience `{s}`"))
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// URL slug (`/products/{key}`).
    pub key: CatalogKey,
    /// Name shown on listing cards.
    pub name: String,
    /// Title shown on the detail page; also the cart line name.
    pub title: String,
    /// Volume label, if any.
    pub volume: Option<String>,
    pub price: Price,
    /// Image URL.
    pub image: String,
    pub audience: Audience,
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

/// Where product data comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogSource {
    /// The built-in list.
    #[default]
    Static,
    /// The backend's product table.
    Api,
}

impl FromStr for CatalogSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "api" => Ok(Self::Api),
            other => Err(format!("expected `static` or `api`, got `{other}`")),
        }
    }
}

/// Listing filters from the query string.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    pub audience: Option<Audience>,
}

impl CatalogQuery {
    fn matches(&self, product: &Product) -> bool {
        let audience_ok = self.audience.is_none_or(|a| a == product.audience);
        let search_ok = self.search.as_deref().map(str::trim).is_none_or(|q| {
            q.is_empty() || product.name.to_lowercase().contains(&q.to_lowercase())
        });
        audience_ok && search_ok
    }
}

/// One page of listing results.
#[derive(Debug, Clone)]
pub struct Page {
    pub items: Vec<Product>,
    /// 1-based page number after clamping.
    pub current: usize,
    /// Always at least one.
    pub total_pages: usize,
    /// Matching products across all pages.
    pub total_items: usize,
}

/// Slice `products` into fixed-size pages.
///
/// `page` is 1-based and clamped into `1..=total_pages`.
#[must_use]
pub fn paginate(products: &[Product], page: usize, per_page: usize) -> Page {
    let per_page = per_page.max(1);
    let total_pages = products.len().div_ceil(per_page).max(1);
    let current = page.clamp(1, total_pages);
    let items = products
        .iter()
        .skip((current - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    Page {
        items,
        current,
        total_pages,
        total_items: products.len(),
    }
}

/// Product catalog service.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    source: CatalogSource,
    builtin: Arc<Vec<Product>>,
    backend: BackendClient,
    cache: Cache<&'static str, Arc<Vec<Product>>>,
}

impl Catalog {
    /// Create a catalog reading from `source`.
    #[must_use]
    pub fn new(source: CatalogSource, backend: BackendClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogInner {
                source,
                builtin: Arc::new(data::products()),
                backend,
                cache,
            }),
        }
    }

    /// Which source this catalog reads from.
    #[must_use]
    pub fn source(&self) -> CatalogSource {
        self.inner.source
    }

    /// All products in listing order.
    #[instrument(skip(self), fields(source = ?self.inner.source))]
    pub async fn products(&self) -> Arc<Vec<Product>> {
        if self.inner.source == CatalogSource::Static {
            return Arc::clone(&self.inner.builtin);
        }

        if let Some(products) = self.inner.cache.get(PRODUCTS_CACHE_KEY).await {
            debug!("Cache hit for products");
            return products;
        }

        match self.inner.backend.get_products().await {
            Ok(rows) => {
                let products = Arc::new(merge_backend_rows(&rows, &self.inner.builtin));
                self.inner
                    .cache
                    .insert(PRODUCTS_CACHE_KEY, Arc::clone(&products))
                    .await;
                products
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch products, using built-in catalog");
                Arc::clone(&self.inner.builtin)
            }
        }
    }

    /// Look up a product by its URL key.
    pub async fn find(&self, key: &str) -> Option<Product> {
        self.products()
            .await
            .iter()
            .find(|p| p.key.as_str() == key)
            .cloned()
    }

    /// Filtered, paginated listing.
    pub async fn list(&self, query: &CatalogQuery, page: usize) -> Page {
        let products = self.products().await;
        let matching: Vec<Product> = products
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        paginate(&matching, page, PAGE_SIZE)
    }

    /// Products featured on the home page.
    pub async fn featured(&self) -> Vec<Product> {
        self.products()
            .await
            .iter()
            .take(FEATURED_COUNT)
            .cloned()
            .collect()
    }

    /// Drop the cached backend list.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Turn backend rows into products, borrowing details from built-in
/// entries whose name matches.
fn merge_backend_rows(rows: &[BackendProduct], builtin: &[Product]) -> Vec<Product> {
    rows.iter()
        .map(|row| {
            let price = Decimal::from_f64_retain(row.price)
                .map_or(Price::ZERO, |d| Price::new(d.round_dp(2)));

            builtin
                .iter()
                .find(|p| {
                    p.name.eq_ignore_ascii_case(&row.name) || p.title.eq_ignore_ascii_case(&row.name)
                })
                .map_or_else(
                    || Product {
                        key: CatalogKey::parse(&format!("producto-{}", row.id))
                            .unwrap_or_else(|_| CatalogKey::from_static("producto")),
                        name: row.name.clone(),
                        title: row.name.clone(),
                        volume: None,
                        price,
                        image: PLACEHOLDER_IMAGE.to_string(),
                        audience: Audience::Women,
                        description: None,
                        ingredients: Vec::new(),
                    },
                    |known| Product {
                        price,
                        ..known.clone()
                    },
                )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::{Json, Router, routing::get};
    use serde_json::{Value, json};

    use super::*;

    fn static_catalog() -> Catalog {
        Catalog::new(CatalogSource::Static, BackendClient::new("http://127.0.0.1:9"))
    }

    #[test]
    fn test_builtin_has_twelve_products_with_unique_keys() {
        let products = data::products();
        assert_eq!(products.len(), 12);

        let mut keys: Vec<_> = products.iter().map(|p| p.key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 12);
    }

    #[test]
    fn test_detailed_products_have_three_ingredients() {
        let products = data::products();
        let detailed: Vec<_> = products.iter().filter(|p| p.description.is_some()).collect();
        assert_eq!(detailed.len(), 6);
        assert!(detailed.iter().all(|p| p.ingredients.len() == 3));
    }

    #[test]
    fn test_paginate_two_pages_of_six() {
        let products = data::products();
        let first = paginate(&products, 1, PAGE_SIZE);
        let second = paginate(&products, 2, PAGE_SIZE);

        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items.len(), 6);
        assert_eq!(first.items[0].key.as_str(), "ccori-rose");
        assert_eq!(second.items[0].key.as_str(), "euforia-floral");
    }

    #[test]
    fn test_paginate_clamps_page() {
        let products = data::products();
        assert_eq!(paginate(&products, 0, PAGE_SIZE).current, 1);
        assert_eq!(paginate(&products, 99, PAGE_SIZE).current, 2);
    }

    #[test]
    fn test_paginate_empty_has_one_page() {
        let page = paginate(&[], 3, PAGE_SIZE);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_audience_from_str() {
        assert_eq!("Caballeros".parse::<Audience>(), Ok(Audience::Men));
        assert_eq!("ninos".parse::<Audience>(), Ok(Audience::Kids));
        assert!("mascotas".parse::<Audience>().is_err());
    }

    #[test]
    fn test_catalog_source_from_str() {
        assert_eq!("API".parse::<CatalogSource>(), Ok(CatalogSource::Api));
        assert_eq!("static".parse::<CatalogSource>(), Ok(CatalogSource::Static));
        assert!("db".parse::<CatalogSource>().is_err());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let catalog = static_catalog();
        let query = CatalogQuery {
            search: Some("ROSA".to_string()),
            audience: None,
        };
        let page = catalog.list(&query, 1).await;
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].key.as_str(), "cielo-rosa");
    }

    #[tokio::test]
    async fn test_audience_filter() {
        let catalog = static_catalog();
        let men = CatalogQuery {
            search: None,
            audience: Some(Audience::Men),
        };
        let page = catalog.list(&men, 1).await;
        assert_eq!(page.total_items, 3);

        let kids = CatalogQuery {
            search: None,
            audience: Some(Audience::Kids),
        };
        assert_eq!(catalog.list(&kids, 1).await.total_items, 0);
    }

    #[tokio::test]
    async fn test_find_and_featured() {
        let catalog = static_catalog();
        let product = catalog.find("sauvage-dior").await.unwrap();
        assert_eq!(product.price, Price::from_soles(105));
        assert!(catalog.find("missing").await.is_none());
        assert_eq!(catalog.featured().await.len(), FEATURED_COUNT);
    }

    #[test]
    fn test_merge_backend_rows() {
        let rows = vec![
            BackendProduct {
                id: 1,
                name: "cielo en rosa eau de parfum".to_string(),
                price: 99.5,
                category: Some(1),
            },
            BackendProduct {
                id: 42,
                name: "Labial Mate".to_string(),
                price: 35.0,
                category: Some(2),
            },
        ];

        let merged = merge_backend_rows(&rows, &data::products());
        assert_eq!(merged[0].key.as_str(), "cielo-rosa");
        assert_eq!(merged[0].price, Price::from_cents(9950));
        assert_eq!(merged[0].ingredients.len(), 3);
        assert_eq!(merged[1].key.as_str(), "producto-42");
        assert_eq!(merged[1].image, PLACEHOLDER_IMAGE);
    }

    async fn mock_backend(body: Value) -> BackendClient {
        let app = Router::new().route("/api/productos", get(move || async move { Json(body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        BackendClient::new(&format!("http://{addr}"))
    }

    #[tokio::test]
    async fn test_api_source_uses_backend() {
        let backend = mock_backend(json!([
            {"id_producto": 7, "nombre_producto": "Ocean Breeze For Men", "precio": 160.0}
        ]))
        .await;
        let catalog = Catalog::new(CatalogSource::Api, backend);

        let products = catalog.products().await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].key.as_str(), "ocean-breeze");
        assert_eq!(products[0].price, Price::from_soles(160));
    }

    #[tokio::test]
    async fn test_api_source_falls_back_on_error() {
        let backend = mock_backend(json!({"unexpected": true})).await;
        let catalog = Catalog::new(CatalogSource::Api, backend);
        assert_eq!(catalog.products().await.len(), 12);
    }
}
