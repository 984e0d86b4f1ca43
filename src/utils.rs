use crate::errors::ContingencyError;

/// Generate labels of the form `"{prefix} 1"`, `"{prefix} 2"`, ...
pub fn default_labels(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("{} {}", prefix, i)).collect()
}

// Validation
pub fn validate_alpha(alpha: f64) -> Result<(), ContingencyError> {
    // NaN fails both comparisons.
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(ContingencyError::InvalidAlpha(alpha))
    }
}

pub fn validate_non_negative_parameter(value: f64, parameter: &str) -> Result<(), ContingencyError> {
    validate_float_parameter(value, 0.0, f64::INFINITY, parameter)
}

pub fn validate_float_parameter(value: f64, min: f64, max: f64, parameter: &str) -> Result<(), ContingencyError> {
    if value.is_nan() || value < min || max < value {
        let ex_msg = format!("real value within range {} and {}", min, max);
        Err(ContingencyError::InvalidParameter(
            parameter.to_string(),
            ex_msg,
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Smallest of `r - 1` and `c - 1`, the scale of Cramér's V.
#[inline]
pub fn min_dimension(rows: usize, cols: usize) -> usize {
    rows.min(cols).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        assert_eq!(default_labels("Row", 3), vec!["Row 1", "Row 2", "Row 3"]);
        assert!(default_labels("Col", 0).is_empty());
    }

    #[test]
    fn test_validate_alpha() {
        assert!(validate_alpha(0.05).is_ok());
        assert!(validate_alpha(0.999).is_ok());
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(validate_alpha(bad), Err(ContingencyError::InvalidAlpha(_))));
        }
    }

    #[test]
    fn test_validate_float_parameter() {
        assert!(validate_non_negative_parameter(0.0, "min_expected_count").is_ok());
        assert!(validate_non_negative_parameter(5.0, "min_expected_count").is_ok());
        let err = validate_non_negative_parameter(-1.0, "min_expected_count").unwrap_err();
        assert!(err.to_string().contains("min_expected_count"));
        assert!(validate_float_parameter(f64::NAN, 0.0, 1.0, "x").is_err());
    }

    #[test]
    fn test_min_dimension() {
        assert_eq!(min_dimension(2, 2), 1);
        assert_eq!(min_dimension(3, 4), 2);
        assert_eq!(min_dimension(5, 3), 2);
    }
}
