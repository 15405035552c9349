//! # Catalog Module
//!
//! Read-only product/variant snapshot fetched once per session from the
//! admin backend, plus the scan-code resolver that drives the billing
//! screen.
//!
//! ## Wire Format
//! The types here deserialize directly from `GET /products`:
//! ```json
//! [{
//!   "id": 12,
//!   "name": "Crew Tee",
//!   "basePrice": 49900,
//!   "brand": { "name": "Northline" },
//!   "variants": [{
//!     "id": 77,
//!     "scanCode": "NL-TEE-M-BLK",
//!     "size": "M",
//!     "color": "Black",
//!     "additionalPrice": 5000,
//!     "stockQuantity": 3
//!   }]
//! }]
//! ```
//! Prices on the wire are integer paise; see [`crate::money::Money`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::validate_price_paise;

// =============================================================================
// Catalog Entities
// =============================================================================

/// A product brand (the backend nests it as `brand: { name }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
}

/// A sellable size/color combination of a product.
///
/// `stock_quantity` is the availability **at fetch time**; the cart
/// captures it as a ceiling when a line is first added and does not
/// watch it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Backend identifier.
    pub id: i64,

    /// Unique barcode string used for lookup.
    pub scan_code: String,

    pub size: String,
    pub color: String,

    /// Price delta on top of the product base price, in paise.
    pub additional_price: Money,

    /// Units available at fetch time (non-negative).
    pub stock_quantity: u32,
}

/// A product with its nested variants, as served by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,

    /// Base price in paise; each variant adds its delta on top.
    pub base_price: Money,

    pub brand: Brand,
    pub variants: Vec<Variant>,
}

impl Product {
    /// Unit price of one of this product's variants:
    /// base price + variant additional price.
    #[inline]
    pub fn unit_price(&self, variant: &Variant) -> Money {
        self.base_price + variant.additional_price
    }
}

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// The catalog snapshot a checkout session renders against.
///
/// ## Lifecycle
/// Fetched once at session start. A fetch failure leaves it empty
/// (degraded mode: the operator can still see the terminal, just with
/// nothing to sell) and is reported, not swallowed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from the deserialized `GET /products` body.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Resolves a scan code to its product and variant.
    ///
    /// ## Behavior
    /// Linear search over products in catalog order, and over each
    /// product's variants in array order; the first match wins. Returns
    /// `None` when nothing matches - barcode noise and mistyped codes
    /// are frequent, so a miss is not an error and must not touch the
    /// cart. Callers log the miss.
    ///
    /// Linear is fine here: catalogs are hundreds of variants, scanned
    /// by a human at human speed.
    pub fn resolve_scan(&self, code: &str) -> Option<(&Product, &Variant)> {
        for product in &self.products {
            for variant in &product.variants {
                if variant.scan_code == code {
                    return Some((product, variant));
                }
            }
        }
        None
    }

    /// Case-insensitive substring filter on product names.
    ///
    /// This is the billing screen's free-text search; an empty query
    /// returns everything.
    pub fn filter_by_name(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Checks every price in the snapshot for corrupt wire data.
    ///
    /// Base prices and variant deltas must be non-negative; a negative
    /// value off the wire would flow straight into the billing math, so
    /// the fetch path rejects the whole snapshot instead of selling
    /// from it.
    pub fn validate_prices(&self) -> Result<(), ValidationError> {
        for product in &self.products {
            validate_price_paise(product.base_price.paise())?;
            for variant in &product.variants {
                validate_price_paise(variant.additional_price.paise())?;
            }
        }
        Ok(())
    }

    /// Number of products in the snapshot.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the snapshot holds no products (degraded mode).
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: i64, code: &str, stock: u32) -> Variant {
        Variant {
            id,
            scan_code: code.to_string(),
            size: "M".to_string(),
            color: "Black".to_string(),
            additional_price: Money::from_paise(5000),
            stock_quantity: stock,
        }
    }

    fn product(id: i64, name: &str, variants: Vec<Variant>) -> Product {
        Product {
            id,
            name: name.to_string(),
            base_price: Money::from_paise(49_900),
            brand: Brand {
                name: "Northline".to_string(),
            },
            variants,
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            product(1, "Crew Tee", vec![variant(10, "NL-TEE-M-BLK", 3)]),
            product(
                2,
                "Oxford Shirt",
                vec![variant(20, "NL-OXF-L-WHT", 5), variant(21, "NL-OXF-M-WHT", 0)],
            ),
        ])
    }

    #[test]
    fn test_resolve_scan_finds_first_match_in_order() {
        let catalog = sample_catalog();
        let (p, v) = catalog.resolve_scan("NL-OXF-M-WHT").unwrap();
        assert_eq!(p.id, 2);
        assert_eq!(v.id, 21);
    }

    #[test]
    fn test_resolve_scan_unknown_code() {
        let catalog = sample_catalog();
        assert!(catalog.resolve_scan("UNKNOWN-CODE").is_none());
    }

    #[test]
    fn test_unit_price_is_base_plus_delta() {
        let catalog = sample_catalog();
        let (p, v) = catalog.resolve_scan("NL-TEE-M-BLK").unwrap();
        assert_eq!(p.unit_price(v).paise(), 54_900);
    }

    #[test]
    fn test_filter_by_name() {
        let catalog = sample_catalog();
        assert_eq!(catalog.filter_by_name("oxford").len(), 1);
        assert_eq!(catalog.filter_by_name("  TEE ").len(), 1);
        assert_eq!(catalog.filter_by_name("").len(), 2);
        assert!(catalog.filter_by_name("denim").is_empty());
    }

    #[test]
    fn test_validate_prices_rejects_negative_wire_values() {
        let catalog = sample_catalog();
        assert!(catalog.validate_prices().is_ok());

        let mut bad = sample_catalog();
        bad.products[0].base_price = Money::from_paise(-100);
        assert!(bad.validate_prices().is_err());

        let mut bad = sample_catalog();
        bad.products[1].variants[0].additional_price = Money::from_paise(-1);
        assert!(bad.validate_prices().is_err());
    }

    #[test]
    fn test_wire_deserialization() {
        let body = r#"[{
            "id": 12,
            "name": "Crew Tee",
            "basePrice": 49900,
            "brand": { "name": "Northline" },
            "variants": [{
                "id": 77,
                "scanCode": "NL-TEE-M-BLK",
                "size": "M",
                "color": "Black",
                "additionalPrice": 5000,
                "stockQuantity": 3
            }]
        }]"#;

        let products: Vec<Product> = serde_json::from_str(body).unwrap();
        let catalog = Catalog::new(products);
        let (p, v) = catalog.resolve_scan("NL-TEE-M-BLK").unwrap();
        assert_eq!(p.base_price.paise(), 49_900);
        assert_eq!(v.stock_quantity, 3);
    }
}
