use super::{ExtractError, normalize_digits};

/// Ten-thousand suffix used by the in-app power display.
pub const TEN_THOUSAND_SUFFIX: char = '万';

/// Parses a power reading such as `"81234"` or `"12万"`.
///
/// The suffix is expanded by appending `"0000"` to the text, not by numeric
/// multiplication, so `"万"` alone reads as `0`. Full-width digits are
/// accepted. Values past `u64::MAX` are a parse failure.
pub fn parse_power(text: &str) -> Result<u64, ExtractError> {
    let expanded = match text.strip_suffix(TEN_THOUSAND_SUFFIX) {
        Some(prefix) => format!("{prefix}0000"),
        None => text.to_string(),
    };

    normalize_digits(&expanded)
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or_else(|| ExtractError::Power {
            text: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_digits() {
        assert_eq!(parse_power("81234"), Ok(81234));
        assert_eq!(parse_power("0"), Ok(0));
    }

    #[test]
    fn test_ten_thousand_suffix() {
        assert_eq!(parse_power("12万"), Ok(120000));
        assert_eq!(parse_power("5万"), Ok(50000));
    }

    #[test]
    fn test_bare_suffix_is_textual_zero() {
        assert_eq!(parse_power("万"), Ok(0));
    }

    #[test]
    fn test_rejects_malformed() {
        for text in ["", "12a", "1.5万", "12万万", " 12", "-3", "万12"] {
            assert!(
                matches!(parse_power(text), Err(ExtractError::Power { .. })),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn test_full_width_digits() {
        assert_eq!(parse_power("１２万"), Ok(120000));
        assert_eq!(parse_power("８１２３４"), Ok(81234));
    }

    #[test]
    fn test_out_of_range_is_parse_failure() {
        assert_eq!(parse_power("18446744073709551615"), Ok(u64::MAX));
        assert!(matches!(
            parse_power("18446744073709551616"),
            Err(ExtractError::Power { .. })
        ));
        assert!(matches!(
            parse_power("1844674407370956万"),
            Err(ExtractError::Power { .. })
        ));
    }

    #[test]
    fn test_error_mentions_parse_failure() {
        let err = parse_power("abc").unwrap_err();
        assert!(err.to_string().starts_with("parse failure"));
    }

    proptest! {
        #[test]
        fn prop_digit_strings_parse_as_integers(s in "[0-9]{1,15}") {
            prop_assert_eq!(parse_power(&s), Ok(s.parse::<u64>().unwrap()));
        }

        #[test]
        fn prop_suffix_appends_four_zeros(s in "[0-9]{1,12}") {
            let expected = format!("{s}0000").parse::<u64>().unwrap();
            prop_assert_eq!(parse_power(&format!("{s}万")), Ok(expected));
        }
    }
}
