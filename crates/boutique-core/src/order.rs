//! # Order Module
//!
//! Maps a non-empty cart into the payload submitted to the backend.
//!
//! ## Wire Format
//! The `PUT /billing` body is the array of line objects:
//! ```json
//! [{
//!   "productId": 12,
//!   "variantId": 77,
//!   "scanCode": "NL-TEE-M-BLK",
//!   "quantity": 2,
//!   "lineTotal": 98820
//! }]
//! ```
//! `lineTotal` is the externally-submitted truth and uses the exact
//! net-amount formula the totals use - the number the backend records
//! must be the number the operator saw on screen and on the receipt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{Cart, Totals};
use crate::error::{CartError, CartResult};
use crate::money::{Money, TaxRate};

// =============================================================================
// Order Line
// =============================================================================

/// One submitted line of the finalized order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: i64,
    pub variant_id: i64,
    pub scan_code: String,
    pub quantity: u32,

    /// Net amount in paise, after the line's discount.
    pub line_total: Money,
}

// =============================================================================
// Order Draft
// =============================================================================

/// The finalized order: submission payload plus the figures the receipt
/// renders from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Locally generated order identifier (also the QR payload key).
    pub order_id: Uuid,

    pub created_at: DateTime<Utc>,

    /// The `PUT /billing` body.
    pub lines: Vec<OrderLine>,

    pub totals: Totals,
}

/// Builds the submission payload from the current cart.
///
/// ## Preconditions
/// The cart must be non-empty; an empty order is never submitted.
///
/// ## Determinism
/// Lines come out in cart (insertion) order, and each `lineTotal` is
/// computed by [`Cart::line_net`] - the same function the pricing
/// summary sums over, so `sum(lineTotal) == subtotal` by construction.
pub fn build_order(cart: &Cart, rate: TaxRate) -> CartResult<OrderDraft> {
    if cart.is_empty() {
        return Err(CartError::EmptyCart);
    }

    let lines = cart
        .lines()
        .iter()
        .map(|line| OrderLine {
            product_id: line.product_id,
            variant_id: line.variant_id,
            scan_code: line.scan_code.clone(),
            quantity: line.quantity,
            line_total: cart.line_net(line),
        })
        .collect();

    Ok(OrderDraft {
        order_id: Uuid::new_v4(),
        created_at: Utc::now(),
        lines,
        totals: cart.totals(rate),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
