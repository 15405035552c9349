//! # Error Types
//!
//! Domain-specific error types for boutique-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  boutique-core errors (this file)                                      │
//! │  ├── CartError        - Rejected cart mutations                        │
//! │  └── ValidationError  - Operator input validation failures             │
//! │                                                                         │
//! │  boutique-client errors (separate crate)                               │
//! │  ├── ClientError      - HTTP / config failures                         │
//! │  └── SessionError     - CartError ∪ ClientError at the session seam    │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → SessionError → operator message   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (scan code, available stock)
//! 3. Errors are enum variants, never String
//! 4. Every error is recoverable: a rejected operation leaves the cart
//!    exactly as it was

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart/billing engine errors.
///
/// Each variant corresponds to a user-facing warning on the terminal;
/// none of them is fatal to the checkout session.
#[derive(Debug, Error)]
pub enum CartError {
    /// Adding or incrementing a line would exceed the stock ceiling
    /// captured when the line was first added.
    ///
    /// ## User Workflow
    /// ```text
    /// Scan "TSHIRT-M-BLK" (4th time, stock = 3)
    ///      │
    ///      ▼
    /// StockCeiling { name: "Crew Tee", available: 3 }
    ///      │
    ///      ▼
    /// Terminal shows: "Only 3 available for Crew Tee"
    /// ```
    #[error("Only {available} available for {name}")]
    StockCeiling { name: String, available: u32 },

    /// No cart line exists for the given scan code.
    #[error("No cart line for scan code: {0}")]
    LineNotFound(String),

    /// A quantity update would drop the line to zero or below.
    ///
    /// ## Policy
    /// Lines never silently reach quantity zero; removal is an explicit
    /// operation so the discount entry is released at the same moment.
    #[error("Quantity cannot go below 1; remove the line instead")]
    QuantityBelowMinimum,

    /// Discount percentage outside `[0, 99]`.
    ///
    /// The engine re-checks this even though the UI clamps, because the
    /// value feeds directly into a money computation.
    #[error("Discount {requested}% is out of range (0-{max}%)")]
    DiscountOutOfRange { requested: u8, max: u8 },

    /// Cart has reached the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Finalization requested on an empty cart.
    #[error("Cart is empty; nothing to finalize")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Operator input validation errors.
///
/// Used for early validation before the billing logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. scan code with whitespace).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
