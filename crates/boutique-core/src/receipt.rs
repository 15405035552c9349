//! # Receipt Module
//!
//! Printable receipt model built from a finalized order, rendered as
//! fixed-width text in the 80mm thermal-printer style.
//!
//! ## Layout
//! ```text
//!              BOUTIQUE STORE
//! ---------------------------------------------
//! Date: 2024-03-14 18:02
//! Order: 7c9e6679-7425-40de-944b-e07fc1f90ae7
//! ---------------------------------------------
//! Item                          Qty        Amt
//! Northline Crew Tee (M)          2    ₹900.00
//! Northline Oxford Shirt (L)      1  ₹1000.00
//! ---------------------------------------------
//! Subtotal                           ₹1900.00
//! GST (18%)                           ₹342.00
//! GRAND TOTAL                        ₹2242.00
//!
//! QR: Order:7c9e6679...|Total:2242
//! Thank you for shopping!
//! ```
//! Pixel positions, fonts and the PDF container are rendering concerns
//! that live outside this crate; this model only guarantees the numeric
//! fields are the ones the order was submitted with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{Cart, Totals};
use crate::money::Money;
use crate::order::OrderDraft;

/// Width of a thermal receipt line in characters.
const RECEIPT_WIDTH: usize = 45;

// =============================================================================
// Receipt Model
// =============================================================================

/// One printed line of the receipt body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    /// "Brand Name (Size)" as shown to the customer.
    pub description: String,
    pub quantity: u32,
    /// Net amount after the line's discount.
    pub amount: Money,
}

/// A printable receipt for a finalized order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub store_name: String,
    pub order_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    pub totals: Totals,
    /// Tax rate shown on the tax row, as a percentage string ("18").
    pub tax_label: String,
    /// Payload encoded into the receipt QR code.
    pub qr_payload: String,
}

impl Receipt {
    /// Builds the receipt from the finalized order and the cart it was
    /// built from (the cart still holds the display fields).
    ///
    /// Amounts are taken from the order draft, not recomputed, so the
    /// receipt can never disagree with what was submitted.
    pub fn from_order(store_name: &str, order: &OrderDraft, cart: &Cart, tax_percent: f64) -> Self {
        let lines = order
            .lines
            .iter()
            .map(|ol| {
                let description = cart
                    .line(&ol.scan_code)
                    .map(|l| format!("{} {} ({})", l.brand, l.name, l.size))
                    .unwrap_or_else(|| ol.scan_code.clone());
                ReceiptLine {
                    description,
                    quantity: ol.quantity,
                    amount: ol.line_total,
                }
            })
            .collect();

        Receipt {
            store_name: store_name.to_string(),
            order_id: order.order_id,
            issued_at: order.created_at,
            lines,
            totals: order.totals,
            tax_label: format!("{}", tax_percent),
            qr_payload: format!(
                "Order:{}|Total:{}",
                order.order_id,
                format_plain(order.totals.total)
            ),
        }
    }

    /// Renders the receipt as fixed-width text.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let rule = "-".repeat(RECEIPT_WIDTH);

        out.push_str(&center(&self.store_name.to_uppercase()));
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!(
            "Date: {}\n",
            self.issued_at.format("%Y-%m-%d %H:%M")
        ));
        out.push_str(&format!("Order: {}\n", self.order_id));
        out.push_str(&rule);
        out.push('\n');

        out.push_str(&row("Item", "Qty", "Amt"));
        for line in &self.lines {
            out.push_str(&row(
                &truncate(&line.description, 28),
                &line.quantity.to_string(),
                &line.amount.to_string(),
            ));
        }

        out.push_str(&rule);
        out.push('\n');
        out.push_str(&totals_row("Subtotal", self.totals.subtotal));
        out.push_str(&totals_row(
            &format!("GST ({}%)", self.tax_label),
            self.totals.tax,
        ));
        out.push_str(&totals_row("GRAND TOTAL", self.totals.total));
        out.push('\n');

        out.push_str(&format!("QR: {}\n", self.qr_payload));
        out.push_str(&center("Thank you for shopping!"));
        out.push('\n');
        out.push_str(&center("No exchange without bill."));
        out.push('\n');

        out
    }
}

// =============================================================================
// Formatting Helpers
// =============================================================================

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= RECEIPT_WIDTH {
        return text.to_string();
    }
    let pad = (RECEIPT_WIDTH - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max.saturating_sub(1)).collect::<String>() + "…"
    }
}

/// Item / qty / amount row: item left-aligned, the rest right-aligned.
fn row(item: &str, qty: &str, amt: &str) -> String {
    let item_width = 28;
    let qty_width = 5;
    let amt_width = RECEIPT_WIDTH - item_width - qty_width;
    format!(
        "{:<iw$}{:>qw$}{:>aw$}\n",
        item,
        qty,
        amt,
        iw = item_width,
        qw = qty_width,
        aw = amt_width,
    )
}

fn totals_row(label: &str, amount: Money) -> String {
    let amt = amount.to_string();
    let label_width = RECEIPT_WIDTH.saturating_sub(amt.chars().count());
    format!("{:<w$}{}\n", label, amt, w = label_width)
}

/// Total without the currency symbol, for the QR payload.
fn format_plain(amount: Money) -> String {
    format!("{}.{:02}", amount.rupees(), amount.paise_part())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Brand, Product, Variant};
    use crate::money::TaxRate;
    use crate::order::build_order;

    fn sample() -> (Cart, OrderDraft) {
        let v = Variant {
            id: 10,
            scan_code: "TEE-M".to_string(),
            size: "M".to_string(),
            color: "Black".to_string(),
            additional_price: Money::from_paise(0),
            stock_quantity: 5,
        };
        let p = Product {
            id: 1,
            name: "Crew Tee".to_string(),
            base_price: Money::from_paise(1000),
            brand: Brand {
                name: "Northline".to_string(),
            },
            variants: vec![v.clone()],
        };

        let mut cart = Cart::new();
        cart.add_line(&p, &v, None).unwrap();
        cart.update_quantity("TEE-M", 1).unwrap();
        let order = build_order(&cart, TaxRate::from_bps(1800)).unwrap();
        (cart, order)
    }

    #[test]
    fn test_receipt_carries_order_figures() {
        let (cart, order) = sample();
        let receipt = Receipt::from_order("Boutique Store", &order, &cart, 18.0);

        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].description, "Northline Crew Tee (M)");
        assert_eq!(receipt.lines[0].quantity, 2);
        assert_eq!(receipt.lines[0].amount, order.totals.subtotal);
        assert_eq!(receipt.totals, order.totals);
    }

    #[test]
    fn test_qr_payload_format() {
        let (cart, order) = sample();
        let receipt = Receipt::from_order("Boutique Store", &order, &cart, 18.0);

        // subtotal 2000, tax 360, total 2360 paise = 23.60
        assert_eq!(
            receipt.qr_payload,
            format!("Order:{}|Total:23.60", order.order_id)
        );
    }

    #[test]
    fn test_render_contains_totals_and_branding() {
        let (cart, order) = sample();
        let receipt = Receipt::from_order("Boutique Store", &order, &cart, 18.0);
        let text = receipt.render_text();

        assert!(text.contains("BOUTIQUE STORE"));
        assert!(text.contains("GST (18%)"));
        assert!(text.contains("GRAND TOTAL"));
        assert!(text.contains("₹23.60"));
        assert!(text.contains("Thank you for shopping!"));
    }
}
