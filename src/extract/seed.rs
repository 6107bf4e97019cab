use super::{ExtractError, normalize_digits};

const PREFIX: &str = "剩余";

/// Parses the remaining-seed counter, e.g. `"剩余:3/10"` → `3`.
///
/// Whitespace is dropped before matching. The colon must directly follow the
/// first `剩余` and may be ASCII or full-width; the count is whatever sits
/// between the colon and the next `/`.
pub fn parse_seed_count(text: &str) -> Result<u32, ExtractError> {
    let source: String = text.trim().replace(' ', "");

    let Some(prefix_at) = source.find(PREFIX) else {
        return Err(ExtractError::SeedMissingPrefix { text: source });
    };

    let after_prefix = &source[prefix_at + PREFIX.len()..];
    let Some(rest) = after_prefix
        .strip_prefix(':')
        .or_else(|| after_prefix.strip_prefix('：'))
    else {
        return Err(ExtractError::SeedMissingColon { text: source });
    };

    let Some(slash_at) = rest.find('/') else {
        return Err(ExtractError::SeedMissingSlash { text: source });
    };

    let count = &rest[..slash_at];
    normalize_digits(count)
        .and_then(|digits| digits.parse::<u32>().ok())
        .ok_or_else(|| ExtractError::SeedNotNumeric {
            count: count.to_string(),
            text: source.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_colon() {
        assert_eq!(parse_seed_count("剩余:3/10"), Ok(3));
    }

    #[test]
    fn test_full_width_colon() {
        assert_eq!(parse_seed_count("剩余：7/10"), Ok(7));
    }

    #[test]
    fn test_full_width_count() {
        assert_eq!(parse_seed_count("剩余：７/10"), Ok(7));
        assert_eq!(parse_seed_count("剩余:１２/１０"), Ok(12));
    }

    #[test]
    fn test_spaces_removed() {
        assert_eq!(parse_seed_count("  剩余 : 12 / 10 "), Ok(12));
    }

    #[test]
    fn test_leading_text_before_prefix() {
        assert_eq!(parse_seed_count("种子剩余:4/10"), Ok(4));
    }

    #[test]
    fn test_empty_text() {
        assert!(matches!(
            parse_seed_count(""),
            Err(ExtractError::SeedMissingPrefix { .. })
        ));
    }

    #[test]
    fn test_missing_prefix() {
        assert!(matches!(
            parse_seed_count("3/10"),
            Err(ExtractError::SeedMissingPrefix { .. })
        ));
    }

    #[test]
    fn test_missing_colon() {
        assert!(matches!(
            parse_seed_count("剩余3/10"),
            Err(ExtractError::SeedMissingColon { .. })
        ));
        // prefix at the very end of the text
        assert!(matches!(
            parse_seed_count("剩余"),
            Err(ExtractError::SeedMissingColon { .. })
        ));
    }

    #[test]
    fn test_missing_slash() {
        assert!(matches!(
            parse_seed_count("剩余:3_10"),
            Err(ExtractError::SeedMissingSlash { .. })
        ));
    }

    #[test]
    fn test_non_digit_count() {
        assert_eq!(
            parse_seed_count("剩余:x/10"),
            Err(ExtractError::SeedNotNumeric {
                count: "x".to_string(),
                text: "剩余:x/10".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_count() {
        assert!(matches!(
            parse_seed_count("剩余:/10"),
            Err(ExtractError::SeedNotNumeric { .. })
        ));
    }
}
