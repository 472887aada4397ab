//! Checkout flow.
//!
//! ```text
//! Viewing ──edit──▶ Editing ──save/cancel──▶ Viewing
//!    │
//!    └─ terms accepted? ──submit──▶ Confirmed (cart cleared)
//! ```
//!
//! The page state (contact info, edit draft, terms checkbox, payment
//! method) is kept under the `checkout` key so it survives the round trips
//! between form posts. Submitting does not send an order anywhere: it
//! clears the cart and returns a confirmation.

use chrono::{DateTime, Utc};
use la_reyna_core::Price;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::cart::{CartStore, Totals};
use crate::models::CurrentUser;
use crate::storage::{KeyValueStore, StorageError, keys};

/// Errors from checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Submission attempted before accepting the terms.
    #[error("terms and conditions not accepted")]
    TermsNotAccepted,

    /// Nothing to check out.
    #[error("cart is empty")]
    EmptyCart,

    /// The visitor's store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Customer contact details shown on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl ContactInfo {
    /// Pre-fill from the logged-in user.
    #[must_use]
    pub fn from_user(user: &CurrentUser) -> Self {
        Self {
            full_name: user.display_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            address: user.address.clone().unwrap_or_default(),
        }
    }
}

/// How the customer will pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay when picking up at the shop.
    #[default]
    InStore,
    /// Pay the courier on delivery.
    CashOnDelivery,
}

impl PaymentMethod {
    /// Both methods in display order.
    pub const ALL: [Self; 2] = [Self::InStore, Self::CashOnDelivery];

    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStore => "tienda",
            Self::CashOnDelivery => "contraentrega",
        }
    }

    /// Radio button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStore => "Pago en tienda",
            Self::CashOnDelivery => "Pago contraentrega",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| format!("unknown payment method `{s}`"))
    }
}

/// Checkout page state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutState {
    pub contact: ContactInfo,
    /// Edit buffer; `Some` while the contact form is open.
    pub draft: Option<ContactInfo>,
    pub terms_accepted: bool,
    pub payment_method: PaymentMethod,
}

impl CheckoutState {
    /// Fresh state, pre-filled from the logged-in user if any.
    #[must_use]
    pub fn for_user(user: Option<&CurrentUser>) -> Self {
        Self {
            contact: user.map(ContactInfo::from_user).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Whether the contact form is open.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Open the contact form with a copy of the current details.
    pub fn begin_edit(&mut self) {
        self.draft = Some(self.contact.clone());
    }

    /// Replace the draft. Ignored when not editing.
    pub fn update_draft(&mut self, draft: ContactInfo) {
        if self.is_editing() {
            self.draft = Some(draft);
        }
    }

    /// Commit the draft. Returns `false` when not editing.
    pub fn save_edit(&mut self) -> bool {
        match self.draft.take() {
            Some(draft) => {
                self.contact = draft;
                true
            }
            None => false,
        }
    }

    /// Discard the draft.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Flip the terms checkbox.
    pub fn toggle_terms(&mut self) {
        self.terms_accepted = !self.terms_accepted;
    }

    /// Accept the terms from the terms dialog.
    pub fn accept_terms(&mut self) {
        self.terms_accepted = true;
    }

    /// Choose how the order will be paid.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        self.terms_accepted
    }
}

/// What the customer sees after submitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Order reference shown to the customer.
    pub reference: Uuid,
    pub placed_at: DateTime<Utc>,
    pub contact: ContactInfo,
    pub payment_method: PaymentMethod,
    /// Units checked out.
    pub items: u32,
    pub total: Price,
}

impl Confirmation {
    /// Short uppercase reference (`LR-1A2B3C4D`).
    #[must_use]
    pub fn short_reference(&self) -> String {
        let simple = self.reference.simple().to_string();
        format!("LR-{}", simple.get(..8).unwrap_or(&simple).to_uppercase())
    }
}

/// Checkout operations over one visitor's store.
pub struct Checkout<S> {
    store: S,
    carts: CartStore<S>,
}

impl<S: KeyValueStore> Checkout<S> {
    /// Create a checkout over `store`, clearing the cart through `carts`.
    #[must_use]
    pub const fn new(store: S, carts: CartStore<S>) -> Self {
        Self { store, carts }
    }

    /// Access the cart store.
    #[must_use]
    pub const fn carts(&self) -> &CartStore<S> {
        &self.carts
    }

    /// Current page state, starting fresh from `user` if none is saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store fails.
    pub async fn state(&self, user: Option<&CurrentUser>) -> Result<CheckoutState, StorageError> {
        Ok(self
            .store
            .load::<CheckoutState>(keys::CHECKOUT)
            .await?
            .unwrap_or_else(|| CheckoutState::for_user(user)))
    }

    /// Load, mutate and save the page state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store fails.
    pub async fn update<F>(
        &self,
        user: Option<&CurrentUser>,
        mutate: F,
    ) -> Result<CheckoutState, StorageError>
    where
        F: FnOnce(&mut CheckoutState) + Send,
    {
        let mut state = self.state(user).await?;
        mutate(&mut state);
        self.store.save(keys::CHECKOUT, &state).await?;
        Ok(state)
    }

    /// Place the order: check the gate, clear the cart, forget the page
    /// state.
    ///
    /// Totals are computed without a promo discount. On error nothing is
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` or `CheckoutError::TermsNotAccepted`
    /// when the order cannot be placed, or a storage error.
    #[instrument(skip_all)]
    pub async fn submit(&self, user: Option<&CurrentUser>) -> Result<Confirmation, CheckoutError> {
        let cart = self.carts.get().await?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let state = self.state(user).await?;
        if !state.can_submit() {
            return Err(CheckoutError::TermsNotAccepted);
        }

        let totals = Totals::undiscounted(&cart);
        self.carts.clear().await?;
        self.store.remove(keys::CHECKOUT).await?;

        let confirmation = Confirmation {
            reference: Uuid::new_v4(),
            placed_at: Utc::now(),
            contact: state.contact,
            payment_method: state.payment_method,
            items: cart.count(),
            total: totals.total,
        };
        tracing::info!(
            reference = %confirmation.reference,
            items = confirmation.items,
            total = %confirmation.total,
            payment = confirmation.payment_method.as_str(),
            "Order submitted"
        );

        Ok(confirmation)
    }
}
