//! Check digits for the human-readable label of retail symbologies.
//!
//! These never feed the encoder: the codec computes its own check digit for
//! the bars. They only complete the digits printed under the symbol.

use crate::models::{LabelRule, Symbology};

/// GS1 mod-10 check digit.
///
/// Weights alternate 3, 1, 3, ... starting from the rightmost digit.
/// `digits` holds values 0-9.
pub fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| d as u32 * if i % 2 == 0 { 3 } else { 1 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

fn parse_digits(s: &str) -> Option<Vec<u8>> {
    s.bytes()
        .map(|b| b.is_ascii_digit().then(|| b - b'0'))
        .collect()
}

/// Expand a 7-digit UPC-E body (number system + six digits, no check digit)
/// into the 11-digit UPC-A body it stands for.
pub fn expand_upce(digits: &[u8]) -> Option<[u8; 11]> {
    let &[ns, d1, d2, d3, d4, d5, d6] = digits else {
        return None;
    };
    let expanded = match d6 {
        0..=2 => [ns, d1, d2, d6, 0, 0, 0, 0, d3, d4, d5],
        3 => [ns, d1, d2, d3, 0, 0, 0, 0, 0, d4, d5],
        4 => [ns, d1, d2, d3, d4, 0, 0, 0, 0, 0, d5],
        5..=9 => [ns, d1, d2, d3, d4, d5, 0, 0, 0, 0, d6],
        _ => return None,
    };
    Some(expanded)
}

/// Text printed under a linear symbol.
///
/// Retail symbologies get their check digit appended when the content is
/// exactly one digit short; any other content is printed verbatim.
pub fn display_label(symbology: Symbology, content: &str) -> String {
    let with_check = |check: u8| format!("{content}{check}");
    match symbology.info().label {
        LabelRule::Verbatim => content.to_string(),
        LabelRule::CheckDigit { full_len } => match parse_digits(content) {
            Some(digits) if digits.len() + 1 == full_len => with_check(check_digit(&digits)),
            _ => content.to_string(),
        },
        LabelRule::UpcE => match parse_digits(content).as_deref().and_then(expand_upce) {
            Some(expanded) => with_check(check_digit(&expanded)),
            None => content.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> Vec<u8> {
        parse_digits(s).unwrap()
    }

    #[test]
    fn test_ean13_check_digit() {
        assert_eq!(check_digit(&digits("590123412345")), 7);
        assert_eq!(check_digit(&digits("400638133393")), 1);
    }

    #[test]
    fn test_ean8_and_upca_check_digit() {
        assert_eq!(check_digit(&digits("9638507")), 4);
        assert_eq!(check_digit(&digits("03600029145")), 2);
    }

    #[test]
    fn test_check_digit_zero_case() {
        // weighted sum 20 -> check digit 0, not 10
        assert_eq!(check_digit(&digits("55")), 0);
    }

    #[test]
    fn test_upce_expansion_branches() {
        let expand = |s: &str| -> String {
            expand_upce(&digits(s))
                .unwrap()
                .iter()
                .map(|d| char::from(b'0' + d))
                .collect()
        };
        assert_eq!(expand("0123450"), "01200000345");
        assert_eq!(expand("0425261"), "04210000526");
        assert_eq!(expand("0123452"), "01220000345");
        assert_eq!(expand("0123453"), "01230000045");
        assert_eq!(expand("0123454"), "01234000005");
        assert_eq!(expand("0123455"), "01234500005");
        assert_eq!(expand("0123459"), "01234500009");
        assert!(expand_upce(&digits("012345")).is_none());
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label(Symbology::Ean13, "590123412345"), "5901234123457");
        assert_eq!(display_label(Symbology::Ean8, "9638507"), "96385074");
        assert_eq!(display_label(Symbology::UpcA, "03600029145"), "036000291452");
        assert_eq!(display_label(Symbology::UpcE, "0425261"), "04252614");
    }

    #[test]
    fn test_display_label_verbatim() {
        // already complete
        assert_eq!(display_label(Symbology::Ean13, "5901234123457"), "5901234123457");
        // wrong length or not numeric
        assert_eq!(display_label(Symbology::Ean13, "12345"), "12345");
        assert_eq!(display_label(Symbology::Ean8, "ABCDEFG"), "ABCDEFG");
        assert_eq!(display_label(Symbology::UpcE, "04252614"), "04252614");
        assert_eq!(display_label(Symbology::Code128, "ABC-123"), "ABC-123");
    }
}
