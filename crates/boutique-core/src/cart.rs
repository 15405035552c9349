//! # Cart Module
//!
//! The in-progress order: insertion-ordered lines keyed by variant scan
//! code, a per-line discount map, and fully-derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                                   │
//! │                                                                         │
//! │  Operator Action          Engine Operation         Cart State Change    │
//! │  ───────────────          ────────────────         ─────────────────    │
//! │                                                                         │
//! │  Scan / pick variant ───► add_line() ────────────► merge or append     │
//! │                                                                         │
//! │  +/- on a line ─────────► update_quantity() ─────► qty within ceiling  │
//! │                                                                         │
//! │  Enter discount ────────► update_discount() ─────► discounts[key] = n  │
//! │                                                                         │
//! │  Remove line ───────────► remove_line() ─────────► line + discount out │
//! │                                                                         │
//! │  Any read of totals ────► totals() ──────────────► recomputed, O(n)    │
//! │                                                                         │
//! │  NOTE: every rejected operation returns a typed error and leaves the   │
//! │        cart exactly as it was. There is no partial mutation path.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - No two lines share a scan code (adds merge into the existing line)
//! - `1 <= quantity <= max_stock` for every line, always
//! - A discount entry exists only while its line exists
//! - Totals are derived on every read; nothing is cached

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{Product, Variant};
use crate::error::{CartError, CartResult};
use crate::money::{Money, TaxRate};
use crate::validation::validate_discount_percent;
use crate::MAX_CART_LINES;

// =============================================================================
// Cart Line
// =============================================================================

/// One entry in the in-progress order, one per distinct variant.
///
/// ## Snapshot Pattern
/// Display fields, the unit price, and the stock ceiling are all frozen
/// at add time. If the catalog changes mid-session the line keeps what
/// the operator saw when it was added; see [`Cart::add_line`] for the
/// known limitation around the stale ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The variant's scan code - unique within the cart.
    pub scan_code: String,

    pub product_id: i64,
    pub variant_id: i64,

    /// Display name at add time (frozen).
    pub name: String,
    pub brand: String,
    pub size: String,
    pub color: String,

    /// Unit price at add time: base price + variant delta (frozen).
    pub unit_price: Money,

    /// Units of this variant in the order.
    pub quantity: u32,

    /// Stock ceiling captured at add time (frozen, possibly stale).
    pub max_stock: u32,
}

impl CartLine {
    fn from_catalog(product: &Product, variant: &Variant) -> Self {
        CartLine {
            scan_code: variant.scan_code.clone(),
            product_id: product.id,
            variant_id: variant.id,
            name: product.name.clone(),
            brand: product.brand.name.clone(),
            size: variant.size.clone(),
            color: variant.color.clone(),
            unit_price: product.unit_price(variant),
            quantity: 1,
            max_stock: variant.stock_quantity,
        }
    }

    /// Net amount for this line at the given discount:
    /// `unit_price * (1 - discount/100) * quantity`.
    ///
    /// This is the single formula behind the totals, the submitted
    /// `lineTotal`, and the receipt - they must never diverge.
    pub fn net_amount(&self, discount_percent: u8) -> Money {
        self.unit_price
            .apply_discount_percent(discount_percent)
            .multiply_quantity(self.quantity as i64)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Derived pricing summary. Never stored on the cart; see [`Cart::totals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

// =============================================================================
// Cart
// =============================================================================

/// The in-progress order.
///
/// ## Lifecycle
/// One cart per checkout session. Cleared by [`Cart::clear`] after a
/// successful submission or an explicit reset - and **only** then: a
/// failed submission must leave the cart intact so the operator can
/// retry without re-scanning the whole order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in insertion order (= display order).
    lines: Vec<CartLine>,

    /// Per-line discount percent, keyed by scan code.
    /// Kept in lockstep with `lines`; see the module invariants.
    discounts: HashMap<String, u8>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a variant to the cart, merging into an existing line.
    ///
    /// ## Behavior
    /// - Existing line: quantity + 1, rejected with a stock-ceiling
    ///   error if that would exceed the ceiling captured at add time
    /// - New line: quantity 1, unit price and ceiling frozen now
    /// - The discount (default 0) is recorded either way
    ///
    /// ## Known Limitation
    /// The ceiling is `variant.stock_quantity` as of the catalog
    /// snapshot and is not re-read afterwards. A session that outlives
    /// a stock change can oversell unless the caller re-validates
    /// against a fresh snapshot before submission (the checkout session
    /// does exactly that).
    pub fn add_line(
        &mut self,
        product: &Product,
        variant: &Variant,
        discount_percent: Option<u8>,
    ) -> CartResult<()> {
        let discount = discount_percent.unwrap_or(0);
        validate_discount_percent(discount)?;

        let existing = self
            .lines
            .iter()
            .position(|l| l.scan_code == variant.scan_code);

        if let Some(idx) = existing {
            let line = &mut self.lines[idx];
            // No arithmetic on quantity here: stock off the wire is
            // unbounded and quantity + 1 could overflow at u32::MAX
            if line.quantity >= line.max_stock {
                return Err(CartError::StockCeiling {
                    name: line.name.clone(),
                    available: line.max_stock,
                });
            }
            line.quantity += 1;
            debug!(scan_code = %variant.scan_code, quantity = line.quantity, "merged into existing line");
        } else {
            if variant.stock_quantity == 0 {
                return Err(CartError::StockCeiling {
                    name: product.name.clone(),
                    available: 0,
                });
            }
            if self.lines.len() >= MAX_CART_LINES {
                return Err(CartError::CartTooLarge {
                    max: MAX_CART_LINES,
                });
            }
            self.lines.push(CartLine::from_catalog(product, variant));
            debug!(scan_code = %variant.scan_code, "appended new line");
        }

        self.discounts.insert(variant.scan_code.clone(), discount);
        Ok(())
    }

    /// Steps a line's quantity by `delta` (+1 / -1 from the terminal).
    ///
    /// Accepted only if the new quantity stays in `[1, max_stock]`:
    /// - above the ceiling: rejected with the available count
    /// - zero or below: rejected; removal is an explicit operation
    ///
    /// Rejected updates are state no-ops.
    pub fn update_quantity(&mut self, scan_code: &str, delta: i32) -> CartResult<()> {
        let line = self
            .line_mut(scan_code)
            .ok_or_else(|| CartError::LineNotFound(scan_code.to_string()))?;

        let new_quantity = line.quantity as i64 + delta as i64;
        if new_quantity < 1 {
            return Err(CartError::QuantityBelowMinimum);
        }
        if new_quantity > line.max_stock as i64 {
            return Err(CartError::StockCeiling {
                name: line.name.clone(),
                available: line.max_stock,
            });
        }

        line.quantity = new_quantity as u32;
        Ok(())
    }

    /// Overwrites the discount for a line.
    ///
    /// The engine re-checks the `[0, 99]` range itself rather than
    /// trusting the caller, since this value governs a money
    /// computation.
    pub fn update_discount(&mut self, scan_code: &str, percent: u8) -> CartResult<()> {
        validate_discount_percent(percent)?;

        if self.line(scan_code).is_none() {
            return Err(CartError::LineNotFound(scan_code.to_string()));
        }

        self.discounts.insert(scan_code.to_string(), percent);
        Ok(())
    }

    /// Removes a line and its discount entry atomically.
    pub fn remove_line(&mut self, scan_code: &str) -> CartResult<()> {
        let before = self.lines.len();
        self.lines.retain(|l| l.scan_code != scan_code);

        if self.lines.len() == before {
            return Err(CartError::LineNotFound(scan_code.to_string()));
        }

        self.discounts.remove(scan_code);
        Ok(())
    }

    /// Clears all lines and discounts (session reset).
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discounts.clear();
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by scan code.
    pub fn line(&self, scan_code: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.scan_code == scan_code)
    }

    fn line_mut(&mut self, scan_code: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.scan_code == scan_code)
    }

    /// Discount percent recorded for a line (0 when absent).
    pub fn discount(&self, scan_code: &str) -> u8 {
        self.discounts.get(scan_code).copied().unwrap_or(0)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Net amount for one line, using its recorded discount.
    pub fn line_net(&self, line: &CartLine) -> Money {
        line.net_amount(self.discount(&line.scan_code))
    }

    /// Computes the pricing summary from scratch.
    ///
    /// ## Purity
    /// A pure function of the current lines and discounts: no caching,
    /// no hidden recomputation triggers, two calls without a mutation
    /// in between return identical values. O(n) over distinct lines,
    /// which is tens at most - correctness beats an incremental
    /// accumulator here.
    pub fn totals(&self, rate: TaxRate) -> Totals {
        let subtotal: Money = self.lines.iter().map(|l| self.line_net(l)).sum();
        let tax = subtotal.calculate_tax(rate);
        Totals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
