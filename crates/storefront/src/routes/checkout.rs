//! Checkout route handlers.
//!
//! Every action posts a plain form and redirects back to `/checkout`, so
//! the page state in the session is the single source of truth.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{Cart, Totals};
use crate::checkout::{CheckoutError, CheckoutState, Confirmation, ContactInfo, PaymentMethod};
use crate::error::{AppError, add_breadcrumb};
use crate::middleware::{Nav, OptionalAuth};
use crate::state::AppState;

/// Message shown when submitting without accepting the terms.
pub const TERMS_REQUIRED_MESSAGE: &str =
    "Debe aceptar los términos y condiciones para enviar su pedido";

/// Order summary line.
#[derive(Clone)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Payment option radio.
#[derive(Clone)]
pub struct PaymentOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub nav: Nav,
    pub contact: ContactInfo,
    /// Open contact form contents.
    pub draft: Option<ContactInfo>,
    pub terms_accepted: bool,
    pub payment_options: Vec<PaymentOption>,
    pub lines: Vec<SummaryLine>,
    pub subtotal: String,
    pub total: String,
    pub error: Option<&'static str>,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub nav: Nav,
    pub reference: String,
    pub placed_at: String,
    pub customer_name: String,
    pub payment_method: &'static str,
    pub items: u32,
    pub total: String,
}

impl CheckoutTemplate {
    fn new(nav: Nav, state: CheckoutState, cart: &Cart) -> Self {
        let totals = Totals::undiscounted(cart);
        Self {
            nav,
            payment_options: PaymentMethod::ALL
                .into_iter()
                .map(|m| PaymentOption {
                    value: m.as_str(),
                    label: m.label(),
                    selected: m == state.payment_method,
                })
                .collect(),
            lines: cart
                .items()
                .iter()
                .map(|item| SummaryLine {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    line_total: item.line_total().display(),
                })
                .collect(),
            subtotal: totals.subtotal.display(),
            total: totals.total.display(),
            contact: state.contact,
            draft: state.draft,
            terms_accepted: state.terms_accepted,
            error: None,
        }
    }
}

impl ConfirmationTemplate {
    fn new(mut nav: Nav, confirmation: &Confirmation) -> Self {
        // The header was read before the cart was cleared
        nav.cart_count = 0;
        Self {
            nav,
            reference: confirmation.short_reference(),
            placed_at: confirmation
                .placed_at
                .format("%d/%m/%Y %H:%M")
                .to_string(),
            customer_name: confirmation.contact.full_name.clone(),
            payment_method: confirmation.payment_method.label(),
            items: confirmation.items,
            total: confirmation.total.display(),
        }
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Terms checkbox / dialog form.
#[derive(Debug, Deserialize)]
pub struct TermsForm {
    /// `toggle` for the checkbox, `accept` for the dialog button.
    pub action: String,
}

/// Payment method form.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    pub method: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the checkout page.
///
/// An empty cart has nothing to check out and redirects to `/cart`.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    nav: Nav,
    OptionalAuth(user): OptionalAuth,
) -> Result<Response, AppError> {
    let checkout = state.checkout(session);
    let cart = checkout.carts().get().await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let page = checkout.state(user.as_ref()).await?;
    Ok(CheckoutTemplate::new(nav, page, &cart).into_response())
}

/// Open the contact form.
#[instrument(skip_all)]
pub async fn edit(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> Result<Redirect, AppError> {
    state
        .checkout(session)
        .update(user.as_ref(), CheckoutState::begin_edit)
        .await?;
    Ok(Redirect::to("/checkout"))
}

/// Save the contact form.
#[instrument(skip_all)]
pub async fn save_contact(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Form(contact): Form<ContactInfo>,
) -> Result<Redirect, AppError> {
    state
        .checkout(session)
        .update(user.as_ref(), |page| {
            page.update_draft(contact);
            if !page.save_edit() {
                tracing::debug!("Contact form posted while not editing");
            }
        })
        .await?;
    Ok(Redirect::to("/checkout"))
}

/// Close the contact form without saving.
#[instrument(skip_all)]
pub async fn cancel(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> Result<Redirect, AppError> {
    state
        .checkout(session)
        .update(user.as_ref(), CheckoutState::cancel_edit)
        .await?;
    Ok(Redirect::to("/checkout"))
}

/// Toggle the terms checkbox or accept from the dialog.
#[instrument(skip(state, session, user))]
pub async fn terms(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<TermsForm>,
) -> Result<Redirect, AppError> {
    let mutate: fn(&mut CheckoutState) = match form.action.as_str() {
        "toggle" => CheckoutState::toggle_terms,
        "accept" => CheckoutState::accept_terms,
        other => return Err(AppError::BadRequest(format!("unknown terms action `{other}`"))),
    };
    state
        .checkout(session)
        .update(user.as_ref(), mutate)
        .await?;
    Ok(Redirect::to("/checkout"))
}

/// Choose the payment method.
#[instrument(skip(state, session, user))]
pub async fn payment(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<PaymentForm>,
) -> Result<Redirect, AppError> {
    let method = form
        .method
        .parse::<PaymentMethod>()
        .map_err(AppError::BadRequest)?;
    state
        .checkout(session)
        .update(user.as_ref(), |page| page.set_payment_method(method))
        .await?;
    Ok(Redirect::to("/checkout"))
}

/// Place the order.
///
/// Without accepted terms the unchanged page is shown again with a
/// message and `422`.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    nav: Nav,
    OptionalAuth(user): OptionalAuth,
) -> Result<Response, AppError> {
    let checkout = state.checkout(session);

    match checkout.submit(user.as_ref()).await {
        Ok(confirmation) => {
            let reference = confirmation.short_reference();
            add_breadcrumb(
                "checkout",
                "Order submitted",
                Some(&[("reference", reference.as_str())]),
            );
            Ok(ConfirmationTemplate::new(nav, &confirmation).into_response())
        }
        Err(CheckoutError::EmptyCart) => Ok(Redirect::to("/cart").into_response()),
        Err(CheckoutError::TermsNotAccepted) => {
            let cart = checkout.carts().get().await?;
            let page = checkout.state(user.as_ref()).await?;
            let mut template = CheckoutTemplate::new(nav, page, &cart);
            template.error = Some(TERMS_REQUIRED_MESSAGE);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
