use crate::checksum::IDENTIFIER_DIGITS;

const MASK_PREFIX: &str = "XXXX-XXXX-";

/// Mask a 12-character identifier as `XXXX-XXXX-` + its last four characters.
///
/// Any other length passes through unchanged; upstream channels only ever
/// supply 12 digits, so this is the documented fallback.
pub fn mask_identifier(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    if chars.len() != IDENTIFIER_DIGITS {
        return identifier.to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{MASK_PREFIX}{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_characters_are_masked() {
        assert_eq!(mask_identifier("111122223333"), "XXXX-XXXX-3333");
    }

    #[test]
    fn other_lengths_pass_through() {
        assert_eq!(mask_identifier("1111222233"), "1111222233");
        assert_eq!(mask_identifier("1111 2222 3333"), "1111 2222 3333");
        assert_eq!(mask_identifier(""), "");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_eq!(mask_identifier("१२३४५६७८९०१२"), "XXXX-XXXX-९०१२");
    }
}
