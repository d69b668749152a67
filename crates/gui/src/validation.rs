//! Height input validation.
//!
//! The height field accepts decimal digits only (`^[0-9]*$`). An empty field
//! is valid and means height 0.

/// Height input that does not match the digits-only rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightInputError {
    pub input: String,
}

impl std::fmt::Display for HeightInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Height '{}' must contain digits only", self.input)
    }
}

impl std::error::Error for HeightInputError {}

/// Check the digits-only rule.
pub fn is_valid_height(input: &str) -> bool {
    input.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a height in meters. Empty input is 0.
pub fn parse_height(input: &str) -> Result<f64, HeightInputError> {
    if !is_valid_height(input) {
        return Err(HeightInputError {
            input: input.to_string(),
        });
    }
    if input.is_empty() {
        return Ok(0.0);
    }
    // Digits only, so this cannot fail; very long inputs round like any f64.
    input.parse::<f64>().map_err(|_| HeightInputError {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_inputs() {
        assert_eq!(parse_height(""), Ok(0.0));
        assert_eq!(parse_height("0"), Ok(0.0));
        assert_eq!(parse_height("42"), Ok(42.0));
        assert_eq!(parse_height("007"), Ok(7.0));
    }

    #[test]
    fn test_invalid_inputs() {
        for input in ["abc", "-1", "4.2", " 1", "1e3", "+5", "١٢"] {
            assert!(!is_valid_height(input), "{input} should be rejected");
            assert!(parse_height(input).is_err());
        }
    }

    #[test]
    fn test_error_message_mentions_input() {
        let err = parse_height("4.2").unwrap_err();
        assert!(err.to_string().contains("4.2"));
    }

    #[test]
    fn test_huge_input_still_parses() {
        let h = parse_height("99999999999999999999").unwrap();
        assert!(h > 9.9e19);
    }
}
