use crate::error::{BonusError, Result};

/// Check whether a slice contains NaN or infinite values
pub fn has_invalid_values(arr: &[f64]) -> bool {
    arr.iter().any(|&x| x.is_nan() || x.is_infinite())
}

/// Scale values in place so they sum to one.
///
/// Returns `false` and leaves the slice untouched when the sum is not a
/// positive finite number.
pub fn normalize_in_place(values: &mut [f64]) -> bool {
    let sum: f64 = values.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return false;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
    true
}

/// Ensure a weight vector is usable as an (unnormalized) prior
pub fn validate_prior(prior: &[f64]) -> Result<()> {
    if has_invalid_values(prior) {
        return Err(BonusError::InvalidConfig(
            "prior contains non-finite values".to_string(),
        ));
    }
    if prior.iter().any(|&p| p < 0.0) {
        return Err(BonusError::InvalidConfig(
            "prior contains negative weights".to_string(),
        ));
    }
    let sum: f64 = prior.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return Err(BonusError::InvalidConfig(format!(
            "prior must sum to a positive finite value, got {sum}"
        )));
    }
    Ok(())
}

/// Ensure a blend weight lies in [0, 1]
pub fn validate_unit_weight(name: &str, weight: f64) -> Result<()> {
    if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
        return Err(BonusError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {weight}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_invalid_values() {
        assert!(!has_invalid_values(&[0.0, 1.0]));
        assert!(has_invalid_values(&[0.0, f64::NAN]));
        assert!(has_invalid_values(&[f64::NEG_INFINITY]));
    }

    #[test]
    fn test_normalize_in_place() {
        let mut v = [1.0, 3.0];
        assert!(normalize_in_place(&mut v));
        assert!((v[0] - 0.25).abs() < 1e-12);
        assert!((v[1] - 0.75).abs() < 1e-12);

        let mut zeros = [0.0, 0.0];
        assert!(!normalize_in_place(&mut zeros));
        assert_eq!(zeros, [0.0, 0.0]);
    }

    #[test]
    fn test_validate_prior() {
        assert!(validate_prior(&[0.5, 0.5]).is_ok());
        assert!(validate_prior(&[0.0, 0.0]).is_err());
        assert!(validate_prior(&[-0.1, 1.1]).is_err());
        assert!(validate_prior(&[f64::NAN, 1.0]).is_err());
        // Each weight is finite but the total overflows
        assert!(validate_prior(&[1e308; 6]).is_err());
    }

    #[test]
    fn test_validate_unit_weight() {
        assert!(validate_unit_weight("w", 0.0).is_ok());
        assert!(validate_unit_weight("w", 1.0).is_ok());
        assert!(validate_unit_weight("w", 1.5).is_err());
        assert!(validate_unit_weight("w", f64::NAN).is_err());
    }
}
