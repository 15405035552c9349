//! # Validation Module
//!
//! Boundary validation of operator input for Boutique POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal input parsing                                       │
//! │  ├── Basic shape checks (numeric arguments, known commands)            │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (engine boundary)                                │
//! │  ├── Discount range, scan code shape, query length                     │
//! │  └── The engine never trusts the caller for money-bearing inputs       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Authoritative stock and price checks on submission                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_DISCOUNT_PERCENT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a scan code before lookup.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 64 characters
/// - No interior whitespace (barcode payloads never contain any)
pub fn validate_scan_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "scan code".to_string(),
        });
    }

    if code.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "scan code".to_string(),
            max: 64,
        });
    }

    if code.chars().any(|c| c.is_whitespace()) {
        return Err(ValidationError::InvalidFormat {
            field: "scan code".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates a product search query.
///
/// ## Rules
/// - Can be empty (returns the full catalog)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a per-line discount percentage.
///
/// ## Rules
/// - Must be in `[0, 99]`; a 100% discount is a data-entry mistake
pub fn validate_discount_percent(pct: u8) -> ValidationResult<()> {
    if pct > MAX_DISCOUNT_PERCENT {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: MAX_DISCOUNT_PERCENT as i64,
        });
    }

    Ok(())
}

/// Validates a price in paise coming off the wire.
///
/// Zero is allowed (promotional freebies); negative is corrupt data.
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_scan_code() {
        assert!(validate_scan_code("NL-TEE-M-BLK").is_ok());
        assert!(validate_scan_code("  NL-TEE-M-BLK  ").is_ok());

        assert!(validate_scan_code("").is_err());
        assert!(validate_scan_code("   ").is_err());
        assert!(validate_scan_code("has space").is_err());
        assert!(validate_scan_code(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_discount_percent() {
        assert!(validate_discount_percent(0).is_ok());
        assert!(validate_discount_percent(50).is_ok());
        assert!(validate_discount_percent(99).is_ok());

        assert!(validate_discount_percent(100).is_err());
        assert!(validate_discount_percent(255).is_err());
    }

    #[test]
    fn test_validate_price_paise() {
        assert!(validate_price_paise(0).is_ok());
        assert!(validate_price_paise(49_900).is_ok());
        assert!(validate_price_paise(-1).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  tee  ").unwrap(), "tee");
        assert!(validate_search_query(&"a".repeat(200)).is_err());
    }
}
