//! Validation utilities for the AgriGIS Farm Management Platform
//!
//! Includes Philippines-specific validations for field data captured by the
//! municipal agriculture office.

use rust_decimal::Decimal;

// ============================================================================
// Crop Data Validations
// ============================================================================

/// Validate a reported harvest volume. Valuation is only attempted for
/// finite, positive quantities; anything else renders as "unavailable".
pub fn validate_volume(volume: Decimal) -> Result<(), &'static str> {
    if volume <= Decimal::ZERO {
        return Err("Volume must be a positive number");
    }
    Ok(())
}

/// Validate a field area in hectares
pub fn validate_hectares(hectares: Decimal) -> Result<(), &'static str> {
    if hectares <= Decimal::ZERO {
        return Err("Area must be a positive number of hectares");
    }
    // Municipal field records top out well below this
    if hectares > Decimal::from(10_000) {
        return Err("Area exceeds plausible municipal field size");
    }
    Ok(())
}

/// Validate a numeric severity score for calamity reports (1-10)
pub fn validate_severity_score(score: i32) -> Result<(), &'static str> {
    if !(1..=10).contains(&score) {
        return Err("Severity score must be between 1 and 10");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate a barangay name is present and printable
pub fn validate_barangay(barangay: &str) -> Result<(), &'static str> {
    let trimmed = barangay.trim();
    if trimmed.is_empty() {
        return Err("Barangay is required");
    }
    if trimmed.len() > 100 {
        return Err("Barangay name is too long");
    }
    Ok(())
}

// ============================================================================
// Philippines-Specific Validations
// ============================================================================

/// Validate a Philippine mobile number
/// Accepts: 09171234567, 0917-123-4567, +639171234567
pub fn validate_ph_mobile(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Local format: 11 digits starting with 09
    if digits.len() == 11 && digits.starts_with("09") {
        return Ok(());
    }
    // International format: 12 digits starting with 639
    if digits.len() == 12 && digits.starts_with("639") {
        return Ok(());
    }

    Err("Invalid Philippine mobile number format")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_volume() {
        assert!(validate_volume(Decimal::from(10)).is_ok());
        assert!(validate_volume(Decimal::new(5, 1)).is_ok());
        assert!(validate_volume(Decimal::ZERO).is_err());
        assert!(validate_volume(Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_validate_hectares() {
        assert!(validate_hectares(Decimal::new(25, 1)).is_ok());
        assert!(validate_hectares(Decimal::ZERO).is_err());
        assert!(validate_hectares(Decimal::from(20_000)).is_err());
    }

    #[test]
    fn test_validate_severity_score() {
        assert!(validate_severity_score(1).is_ok());
        assert!(validate_severity_score(10).is_ok());
        assert!(validate_severity_score(0).is_err());
        assert!(validate_severity_score(11).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("mao@municipality.gov.ph").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_barangay() {
        assert!(validate_barangay("Poblacion").is_ok());
        assert!(validate_barangay("  ").is_err());
    }

    #[test]
    fn test_validate_ph_mobile() {
        assert!(validate_ph_mobile("09171234567").is_ok());
        assert!(validate_ph_mobile("0917-123-4567").is_ok());
        assert!(validate_ph_mobile("+639171234567").is_ok());
        assert!(validate_ph_mobile("639171234567").is_ok());
        assert!(validate_ph_mobile("12345").is_err());
        assert!(validate_ph_mobile("08171234567").is_err());
    }
}
