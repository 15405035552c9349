//! # boutique-core: Pure Business Logic for Boutique POS
//!
//! This crate is the **heart** of Boutique POS. It contains the entire
//! cart/billing computation engine as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Boutique POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   apps/terminal (operator UI)                   │   │
//! │  │    Scan loop ──► Cart view ──► Finalize ──► Receipt file       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                      boutique-client                            │   │
//! │  │    GET /products, PUT /billing, config, CheckoutSession        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ boutique-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   money   │  │   cart    │  │   order   │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ OrderLine │  │   │
//! │  │   │  Variant  │  │  TaxRate  │  │ CartLine  │  │  Receipt  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Read-only product/variant snapshot and scan-code lookup
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The in-progress order: lines, discounts, totals
//! - [`order`] - Finalized order payload for `PUT /billing`
//! - [`receipt`] - Printable receipt line model and text rendering
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation of operator input
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Totals are recomputed from the cart on every
//!    call - there is no cached accumulator that can drift
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64)
//! 4. **Explicit Errors**: Rejected mutations return typed errors, never
//!    strings, and never mutate state on the failure path
//!
//! ## Example Usage
//!
//! ```rust
//! use boutique_core::money::{Money, TaxRate};
//!
//! // A line of 2 units at ₹500.00 with a 10% discount
//! let unit = Money::from_paise(50_000);
//! let net = unit.apply_discount_percent(10).multiply_quantity(2);
//! assert_eq!(net.paise(), 90_000); // ₹900.00
//!
//! // GST at 18% on the subtotal
//! let tax = net.calculate_tax(TaxRate::from_bps(1800));
//! assert_eq!(tax.paise(), 16_200); // ₹162.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod receipt;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use boutique_core::Cart` instead of
// `use boutique_core::cart::Cart`

pub use cart::{Cart, CartLine, Totals};
pub use catalog::{Catalog, Product, Variant};
pub use error::{CartError, CartResult, ValidationError};
pub use money::{Money, TaxRate};
pub use order::{OrderDraft, OrderLine};
pub use receipt::Receipt;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tax rate in basis points (1800 = 18% GST).
///
/// ## Why a constant?
/// The store currently charges a single flat GST rate. Keeping it here
/// (and threading it through [`money::TaxRate`]) means the rate is
/// configuration, not a literal buried inside the billing math.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1800;

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_LINES: usize = 100;

/// Maximum per-line discount percentage.
///
/// ## Business Reason
/// A 100% discount would zero out a line; anything a cashier hands out
/// beyond 99% is a data-entry mistake, not a sale.
pub const MAX_DISCOUNT_PERCENT: u8 = 99;
