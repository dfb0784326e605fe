// src/common/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

/// `#[validate(custom(function = "validate_not_negative"))]` for money fields.
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("negative_amount".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_positive_amounts_pass() {
        assert!(validate_not_negative(&Decimal::ZERO).is_ok());
        assert!(validate_not_negative(&Decimal::new(120050, 2)).is_ok());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = validate_not_negative(&Decimal::new(-1, 2)).unwrap_err();
        assert_eq!(err.code, "range");
    }
}
