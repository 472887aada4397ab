//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the visitor's session under the `cart` key.
//! Every mutation answers with `HX-Trigger: cart-updated` so the header
//! badge re-fetches `/cart/count`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{Cart, CartLineItem, Totals};
use crate::error::{AppError, add_breadcrumb};
use crate::middleware::Nav;
use crate::routes::{CART_UPDATED_TRIGGER, is_htmx};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub index: usize,
    pub image: String,
    pub name: String,
    pub volume: Option<String>,
    pub price: String,
    pub discounted_price: Option<String>,
    pub quantity: u32,
    /// Quantity posted by the minus button; may be zero.
    pub decrement: i64,
    pub increment: i64,
    pub line_total: String,
}

/// Cart totals display data for templates.
#[derive(Clone)]
pub struct TotalsView {
    pub subtotal: String,
    pub discount: Option<String>,
    pub total: String,
}

/// Promo code feedback shown under the totals.
#[derive(Clone)]
pub struct PromoNotice {
    pub applied: bool,
    pub message: &'static str,
}

// =============================================================================
// Type Conversions
// =============================================================================

fn item_views(cart: &Cart) -> Vec<CartItemView> {
    cart.items()
        .iter()
        .enumerate()
        .map(|(index, item)| CartItemView {
            index,
            image: item.image.clone(),
            name: item.name.clone(),
            volume: item.volume.clone(),
            price: item.price.display(),
            discounted_price: item.discounted_price.map(|p| p.display()),
            quantity: item.quantity,
            decrement: i64::from(item.quantity) - 1,
            increment: i64::from(item.quantity) + 1,
            line_total: item.line_total().display(),
        })
        .collect()
}

impl From<&Totals> for TotalsView {
    fn from(totals: &Totals) -> Self {
        Self {
            subtotal: totals.subtotal.display(),
            discount: totals.has_discount().then(|| totals.discount.display()),
            total: totals.total.display(),
        }
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub key: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
///
/// `quantity` is signed so the decrement button can post 0 or less,
/// which is ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub index: usize,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Promo code form data.
#[derive(Debug, Deserialize)]
pub struct PromoForm {
    #[serde(default)]
    pub code: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: Nav,
    pub items: Vec<CartItemView>,
    pub totals: TotalsView,
    pub promo: Option<PromoNotice>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub items: Vec<CartItemView>,
    pub totals: TotalsView,
    pub promo: Option<PromoNotice>,
}

/// Cart totals fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_totals.html")]
pub struct CartTotalsTemplate {
    pub totals: TotalsView,
    pub promo: Option<PromoNotice>,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// "Added to bag" toast fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_added.html")]
pub struct CartAddedTemplate {
    pub name: String,
    pub count: u32,
}

impl CartItemsTemplate {
    fn for_cart(cart: &Cart) -> Self {
        Self {
            items: item_views(cart),
            totals: TotalsView::from(&Totals::undiscounted(cart)),
            promo: None,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session, nav))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    nav: Nav,
) -> Result<CartShowTemplate, AppError> {
    let cart = state.carts(session).get().await?;

    Ok(CartShowTemplate {
        nav,
        items: item_views(&cart),
        totals: TotalsView::from(&Totals::undiscounted(&cart)),
        promo: None,
    })
}

/// Add a catalog product to the cart (HTMX).
///
/// The line is built from the catalog entry so the price cannot be
/// chosen by the client. Quantities below one are raised to one.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let product = state
        .catalog()
        .find(&form.key)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product `{}`", form.key)))?;

    let item = CartLineItem::new(
        product.image,
        product.title,
        product.volume,
        product.price,
        form.quantity.unwrap_or(1).max(1),
    )
    .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let name = item.name.clone();

    let cart = state.carts(session).add_to_cart(item).await?;
    add_breadcrumb("cart", "Added to cart", Some(&[("product", form.key.as_str())]));

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/cart").into_response());
    }

    Ok((
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartAddedTemplate {
            name,
            count: cart.count(),
        },
    )
        .into_response())
}

/// Update cart line quantity (HTMX).
#[instrument(skip(state, session, headers))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response, AppError> {
    let quantity = u32::try_from(form.quantity).unwrap_or(0);
    let cart = state
        .carts(session)
        .update_quantity(form.index, quantity)
        .await?;

    Ok(items_response(&cart, &headers))
}

/// Remove cart line (HTMX).
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response, AppError> {
    let cart = state.carts(session).remove_item(form.index).await?;

    Ok(items_response(&cart, &headers))
}

/// Apply a promo code (HTMX).
///
/// The discount is not stored: it only affects the totals returned here.
#[instrument(skip(state, session, headers, nav))]
pub async fn promo(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    nav: Nav,
    Form(form): Form<PromoForm>,
) -> Result<Response, AppError> {
    let cart = state.carts(session).get().await?;
    let totals = Totals::with_promo(&cart, &form.code);
    let promo = Some(promo_notice(&totals));

    if !is_htmx(&headers) {
        return Ok(CartShowTemplate {
            nav,
            items: item_views(&cart),
            totals: TotalsView::from(&totals),
            promo,
        }
        .into_response());
    }

    Ok(CartTotalsTemplate {
        totals: TotalsView::from(&totals),
        promo,
    }
    .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(
    State(state): State<AppState>,
    session: Session,
) -> Result<CartCountTemplate, AppError> {
    let count = state.carts(session).count().await?;
    Ok(CartCountTemplate { count })
}

fn items_response(cart: &Cart, headers: &HeaderMap) -> Response {
    if !is_htmx(headers) {
        return Redirect::to("/cart").into_response();
    }

    (
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartItemsTemplate::for_cart(cart),
    )
        .into_response()
}

fn promo_notice(totals: &Totals) -> PromoNotice {
    if totals.has_discount() {
        PromoNotice {
            applied: true,
            message: "¡Código promocional aplicado con éxito!",
        }
    } else {
        PromoNotice {
            applied: false,
            message: "Código promocional inválido",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use la_reyna_core::Price;

    use super::*;

    fn cart() -> Cart {
        Cart::from(vec![
            CartLineItem::new("/a.png", "A", Some("50ml".to_string()), Price::from_soles(50), 2)
                .unwrap(),
            CartLineItem::new("/b.png", "B", None, Price::from_soles(30), 1).unwrap(),
        ])
    }

    #[test]
    fn test_item_views_keep_positions() {
        let views = item_views(&cart());
        assert_eq!(views.len(), 2);
        assert_eq!(views[1].index, 1);
        assert_eq!(views[0].line_total, "S/ 100.00");
        assert_eq!(views[0].volume.as_deref(), Some("50ml"));
    }

    #[test]
    fn test_totals_view_hides_zero_discount() {
        let view = TotalsView::from(&Totals::undiscounted(&cart()));
        assert_eq!(view.subtotal, "S/ 130.00");
        assert!(view.discount.is_none());

        let view = TotalsView::from(&Totals::with_promo(&cart(), "promo10"));
        assert_eq!(view.discount.as_deref(), Some("S/ 10.00"));
        assert_eq!(view.total, "S/ 120.00");
    }

    #[test]
    fn test_promo_notice() {
        assert!(promo_notice(&Totals::with_promo(&cart(), "PROMO10")).applied);
        let notice = promo_notice(&Totals::with_promo(&cart(), "PROMO20"));
        assert!(!notice.applied);
        assert_eq!(notice.message, "Código promocional inválido");
    }

    #[test]
    fn test_cart_count_template_renders() {
        let html = CartCountTemplate { count: 3 }.render().unwrap();
        assert!(html.contains('3'));
        assert!(html.contains("cart-updated"));
    }
}
