//! # Checkout Session
//!
//! The explicit session context for one operator checkout: the catalog
//! snapshot, the cart, the tax rate, and the search filter, created at
//! session start and torn down when the order completes. No ambient or
//! global state - everything the billing screen used to keep in
//! framework state is a field here with a visible owner.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Session Lifecycle                          │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌───────────┐     ┌──────────┐      │
//! │  │ Catalog  │────►│ Scanning │────►│ Finalize  │────►│ Receipt  │      │
//! │  │ fetched  │     │ & edits  │     │ (submit)  │     │ + reset  │      │
//! │  └──────────┘     └──────────┘     └─────┬─────┘     └──────────┘      │
//! │                        ▲                 │                              │
//! │                        │    submission failed: cart PRESERVED,         │
//! │                        └─── operator retries without re-scanning       │
//! │                                                                         │
//! │  The search filter survives the post-submission reset; the cart and    │
//! │  discount map do not.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use boutique_core::cart::Totals;
use boutique_core::catalog::{Catalog, Product, Variant};
use boutique_core::error::CartError;
use boutique_core::money::TaxRate;
use boutique_core::order::{build_order, OrderLine};
use boutique_core::receipt::Receipt;
use boutique_core::validation::{validate_scan_code, validate_search_query};
use boutique_core::Cart;

use crate::error::ClientResult;

// =============================================================================
// Submission Seam
// =============================================================================

/// The order-submission seam.
///
/// [`crate::ApiClient`] is the production implementation; tests plug in
/// an in-memory submitter so session behavior (especially the
/// cart-preserved-on-failure property) is assertable without a network.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit(&self, lines: &[OrderLine]) -> ClientResult<()>;
}

// =============================================================================
// Session Error
// =============================================================================

/// Errors surfaced by session operations: either the engine rejected a
/// mutation, or the backend rejected a call.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Cart(#[from] boutique_core::error::CartError),

    #[error(transparent)]
    Client(#[from] crate::error::ClientError),
}

// =============================================================================
// Checkout Session
// =============================================================================

/// One operator's in-progress checkout.
pub struct CheckoutSession<S: OrderSubmitter> {
    catalog: Catalog,
    cart: Cart,
    tax_rate: TaxRate,
    store_name: String,
    /// Free-text product filter; survives the post-submission reset.
    filter: String,
    submitter: S,
}

impl<S: OrderSubmitter> CheckoutSession<S> {
    /// Starts a session over a catalog snapshot.
    pub fn new(catalog: Catalog, tax_rate: TaxRate, store_name: &str, submitter: S) -> Self {
        CheckoutSession {
            catalog,
            cart: Cart::new(),
            tax_rate,
            store_name: store_name.to_string(),
            filter: String::new(),
            submitter,
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// The current catalog snapshot.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Installs a refreshed snapshot mid-session.
    ///
    /// Existing cart lines keep their frozen prices and ceilings; the
    /// fresh snapshot is what [`CheckoutSession::finalize`] re-validates
    /// quantities against.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        info!(products = catalog.len(), "catalog snapshot replaced");
        self.catalog = catalog;
    }

    /// Resolves a scan code against the snapshot. A miss is `None`,
    /// never an error, and never touches the cart.
    pub fn resolve_scan(&self, code: &str) -> Option<(&Product, &Variant)> {
        self.catalog.resolve_scan(code)
    }

    /// Sets the free-text product filter.
    pub fn set_filter(&mut self, query: &str) -> Result<(), SessionError> {
        let query = validate_search_query(query).map_err(CartError::from)?;
        self.filter = query;
        Ok(())
    }

    /// Products matching the current filter, in catalog order.
    pub fn filtered_products(&self) -> Vec<&Product> {
        self.catalog.filter_by_name(&self.filter)
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// The in-progress cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Scans a code into the cart.
    ///
    /// ## Returns
    /// - `Ok(true)` - resolved and added (or merged)
    /// - `Ok(false)` - unknown code; logged, cart untouched (barcode
    ///   noise is routine, not an error)
    /// - `Err(_)` - malformed code, or resolved but rejected (stock
    ///   ceiling, bad discount)
    pub fn add_by_scan(&mut self, code: &str, discount: Option<u8>) -> Result<bool, SessionError> {
        validate_scan_code(code).map_err(CartError::from)?;
        match self.catalog.resolve_scan(code) {
            Some((product, variant)) => {
                self.cart.add_line(product, variant, discount)?;
                debug!(scan_code = %code, "scan added to cart");
                Ok(true)
            }
            None => {
                warn!(scan_code = %code, "scan code matched no catalog variant");
                Ok(false)
            }
        }
    }

    /// Adds a picked variant (the variant-picker path, where the
    /// operator chose from a product's variant list).
    pub fn add_line(
        &mut self,
        product: &Product,
        variant: &Variant,
        discount: Option<u8>,
    ) -> Result<(), SessionError> {
        self.cart.add_line(product, variant, discount)?;
        Ok(())
    }

    /// Steps a line's quantity by `delta`.
    pub fn update_quantity(&mut self, scan_code: &str, delta: i32) -> Result<(), SessionError> {
        self.cart.update_quantity(scan_code, delta)?;
        Ok(())
    }

    /// Overwrites a line's discount percent.
    pub fn update_discount(&mut self, scan_code: &str, percent: u8) -> Result<(), SessionError> {
        self.cart.update_discount(scan_code, percent)?;
        Ok(())
    }

    /// Removes a line and its discount entry.
    pub fn remove_line(&mut self, scan_code: &str) -> Result<(), SessionError> {
        self.cart.remove_line(scan_code)?;
        Ok(())
    }

    /// Current pricing summary, recomputed from scratch.
    pub fn totals(&self) -> Totals {
        self.cart.totals(self.tax_rate)
    }

    // =========================================================================
    // Finalization
    // =========================================================================

    /// Finalizes the order: builds the payload, re-validates stock,
    /// submits, and resets the cart.
    ///
    /// ## Failure Modes
    /// - Empty cart: rejected before anything is built or sent
    /// - Stock re-check failure: rejected before submission
    /// - Backend rejection / transport failure: the error is returned
    ///   and the cart is left **fully intact** so the operator can
    ///   retry without re-scanning the order
    ///
    /// Only a successful submission clears the cart and discount map;
    /// the search filter is preserved across the reset.
    pub async fn finalize(&mut self) -> Result<Receipt, SessionError> {
        let order = build_order(&self.cart, self.tax_rate)?;

        self.revalidate_stock()?;

        self.submitter.submit(&order.lines).await?;

        let receipt = Receipt::from_order(
            &self.store_name,
            &order,
            &self.cart,
            self.tax_rate.percentage(),
        );

        self.cart.clear();
        info!(order_id = %order.order_id, total = %order.totals.total, "order finalized");
        Ok(receipt)
    }

    /// Re-validates every line's quantity against the current snapshot.
    ///
    /// The ceiling frozen at add time goes stale if stock changed
    /// mid-session; checking the latest snapshot here closes most of
    /// that window. A variant that vanished from the snapshot keeps its
    /// add-time ceiling - the backend remains the final authority.
    fn revalidate_stock(&self) -> Result<(), SessionError> {
        for line in self.cart.lines() {
            if let Some((_, variant)) = self.catalog.resolve_scan(&line.scan_code) {
                if variant.stock_quantity < line.quantity {
                    warn!(
                        scan_code = %line.scan_code,
                        in_cart = line.quantity,
                        available = variant.stock_quantity,
                        "stock shrank since line was added"
                    );
                    return Err(CartError::StockCeiling {
                        name: line.name.clone(),
                        available: variant.stock_quantity,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use boutique_core::catalog::Brand;
    use boutique_core::money::Money;

    use crate::error::ClientError;

    /// In-memory submitter: records payloads, optionally fails.
    #[derive(Default)]
    struct FakeSubmitter {
        fail: AtomicBool,
        submitted: Mutex<Vec<Vec<OrderLine>>>,
    }

    #[async_trait]
    impl OrderSubmitter for FakeSubmitter {
        async fn submit(&self, lines: &[OrderLine]) -> ClientResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ClientError::Backend { status: 503 });
            }
            self.submitted.lock().unwrap().push(lines.to_vec());
            Ok(())
        }
    }

    fn variant(id: i64, code: &str, stock: u32) -> Variant {
        Variant {
            id,
            scan_code: code.to_string(),
            size: "M".to_string(),
            color: "Black".to_string(),
            additional_price: Money::from_paise(0),
            stock_quantity: stock,
        }
    }

    fn product(id: i64, name: &str, base: i64, variants: Vec<Variant>) -> Product {
        Product {
            id,
            name: name.to_string(),
            base_price: Money::from_paise(base),
            brand: Brand {
                name: "Northline".to_string(),
            },
            variants,
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            product(1, "Crew Tee", 500, vec![variant(10, "TEE-M", 3)]),
            product(2, "Oxford Shirt", 1000, vec![variant(20, "OXF-L", 5)]),
        ])
    }

    fn session() -> CheckoutSession<FakeSubmitter> {
        CheckoutSession::new(
            sample_catalog(),
            TaxRate::from_bps(1800),
            "Boutique Store",
            FakeSubmitter::default(),
        )
    }

    #[test]
    fn test_unknown_scan_leaves_cart_unchanged() {
        let mut session = session();
        session.add_by_scan("TEE-M", None).unwrap();
        let before = serde_json::to_string(session.cart()).unwrap();

        let added = session.add_by_scan("UNKNOWN-CODE", None).unwrap();
        assert!(!added);

        let after = serde_json::to_string(session.cart()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_malformed_scan_code_rejected_before_lookup() {
        let mut session = session();

        let err = session.add_by_scan("", None).unwrap_err();
        assert!(matches!(err, SessionError::Cart(CartError::Validation(_))));

        let err = session.add_by_scan("TEE M", None).unwrap_err();
        assert!(matches!(err, SessionError::Cart(CartError::Validation(_))));

        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_scan_merges_and_caps_at_stock() {
        let mut session = session();
        for _ in 0..3 {
            assert!(session.add_by_scan("TEE-M", None).unwrap());
        }
        let err = session.add_by_scan("TEE-M", None).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Cart(CartError::StockCeiling { available: 3, .. })
        ));
        assert_eq!(session.cart().line("TEE-M").unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_finalize_empty_cart_never_submits() {
        let mut session = session();
        let err = session.finalize().await.unwrap_err();
        assert!(matches!(err, SessionError::Cart(CartError::EmptyCart)));
        assert!(session.submitter.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_finalize_success_submits_and_resets() {
        let mut session = session();
        session.set_filter("tee").unwrap();
        session.add_by_scan("TEE-M", Some(10)).unwrap();
        session.add_by_scan("TEE-M", None).unwrap();
        session.add_by_scan("OXF-L", None).unwrap();

        // TEE-M: 500 * 2, discount reset to 0 by the second add → 1000
        // OXF-L: 1000 * 1 → 1000
        let receipt = session.finalize().await.unwrap();
        assert_eq!(receipt.totals.subtotal.paise(), 2000);
        assert_eq!(receipt.totals.tax.paise(), 360);
        assert_eq!(receipt.totals.total.paise(), 2360);

        // Cart and discounts reset, filter preserved
        assert!(session.cart().is_empty());
        assert_eq!(session.filtered_products().len(), 1);

        let submitted = session.submitter.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].len(), 2);
        assert_eq!(submitted[0][0].scan_code, "TEE-M");
    }

    #[tokio::test]
    async fn test_finalize_failure_preserves_cart_for_retry() {
        let mut session = session();
        session.add_by_scan("TEE-M", None).unwrap();
        session.add_by_scan("OXF-L", None).unwrap();
        let totals_before = session.totals();

        session.submitter.fail.store(true, Ordering::SeqCst);
        let err = session.finalize().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Client(ClientError::Backend { status: 503 })
        ));

        // The whole order is still there, byte for byte
        assert_eq!(session.cart().line_count(), 2);
        assert_eq!(session.totals(), totals_before);

        // And the retry succeeds without re-scanning
        session.submitter.fail.store(false, Ordering::SeqCst);
        session.finalize().await.unwrap();
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_finalize_revalidates_against_fresh_snapshot() {
        let mut session = session();
        session.add_by_scan("TEE-M", None).unwrap();
        session.add_by_scan("TEE-M", None).unwrap();

        // Stock shrank to 1 unit while the operator was scanning
        session.replace_catalog(Catalog::new(vec![product(
            1,
            "Crew Tee",
            500,
            vec![variant(10, "TEE-M", 1)],
        )]));

        let err = session.finalize().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Cart(CartError::StockCeiling { available: 1, .. })
        ));

        // Nothing was submitted and the cart is intact for the operator
        assert!(session.submitter.submitted.lock().unwrap().is_empty());
        assert_eq!(session.cart().line("TEE-M").unwrap().quantity, 2);
    }

    #[test]
    fn test_filter_survives_validation() {
        let mut session = session();
        assert!(session.set_filter(&"a".repeat(200)).is_err());
        session.set_filter("  oxford ").unwrap();
        assert_eq!(session.filtered_products().len(), 1);
    }
}
