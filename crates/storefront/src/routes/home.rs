//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::Nav;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Category tile on the home page.
#[derive(Clone)]
pub struct CategoryTile {
    pub title: &'static str,
    pub image: &'static str,
}

/// Category tiles in display order.
pub const CATEGORIES: [CategoryTile; 4] = [
    CategoryTile {
        title: "FRAGANCIAS",
        image: "/static/img/cat-fragancias.png",
    },
    CategoryTile {
        title: "TRATAMIENTOS FACIALES",
        image: "/static/img/cat-tratamientos.png",
    },
    CategoryTile {
        title: "MAQUILLAJE",
        image: "/static/img/cat-maquillaje.png",
    },
    CategoryTile {
        title: "CUIDADO PERSONAL",
        image: "/static/img/cat-cuidado.png",
    },
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Nav,
    pub categories: Vec<CategoryTile>,
    pub featured: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(state, nav))]
pub async fn home(State(state): State<AppState>, nav: Nav) -> HomeTemplate {
    let featured = state.catalog().featured().await;

    HomeTemplate {
        nav,
        categories: CATEGORIES.to_vec(),
        featured: featured.iter().map(ProductCardView::from).collect(),
    }
}
