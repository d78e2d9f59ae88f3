//! Chemical formula text rules
//!
//! Both functions here are syntactic conveniences. Neither knows about element
//! symbols or stoichiometry; the server does the chemistry.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// A lowercase ASCII letter at an ASCII word boundary.
///
/// Word characters are `[A-Za-z0-9_]`, so a letter counts as starting a word
/// at the beginning of the text or after any other character.
static WORD_START_LOWERCASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^A-Za-z0-9_])([a-z])").expect("Invalid word start regex")
});

/// Quick syntax check for a chemical formula.
///
/// Accepts only ASCII letters, digits and parentheses, with parentheses that
/// never close before they open and are all closed at the end.
///
/// ```
/// use mmcalc_core::formula::is_valid_formula;
///
/// assert!(is_valid_formula("Ca(OH)2"));
/// assert!(!is_valid_formula("H2SO4!"));
/// assert!(!is_valid_formula("Ca(OH"));
/// ```
pub fn is_valid_formula(formula: &str) -> bool {
    if formula.is_empty() {
        return false;
    }
    if !formula
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '(' || c == ')')
    {
        return false;
    }

    let mut depth: i64 = 0;
    for c in formula.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }

    depth == 0
}

/// Rewrite formula input as the user types.
///
/// Strips all whitespace and uppercases a lowercase letter that starts a word.
/// Later letters are left alone, so `"cl"` becomes `"Cl"` but `"nacl"` stays
/// `"Nacl"`.
pub fn normalize_formula_input(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    WORD_START_LOWERCASE
        .replace_all(&compact, |caps: &Captures<'_>| {
            format!("{}{}", &caps[1], caps[2].to_ascii_uppercase())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_simple_and_grouped_formulas() {
        assert!(is_valid_formula("H2O"));
        assert!(is_valid_formula("Ca(OH)2"));
        assert!(is_valid_formula("CH3(CH2)3OH"));
        assert!(is_valid_formula("Mg3(PO4)2"));
        assert!(is_valid_formula("K4(Fe(CN)6)"));
    }

    #[test]
    fn test_rejects_characters_outside_the_set() {
        assert!(!is_valid_formula("H2SO4!"));
        assert!(!is_valid_formula("H2 O"));
        assert!(!is_valid_formula("CuSO4·5H2O"));
        assert!(!is_valid_formula("[Fe(CN)6]"));
    }

    #[test]
    fn test_rejects_unbalanced_parentheses() {
        assert!(!is_valid_formula("Ca(OH"));
        assert!(!is_valid_formula(")H2O"));
        assert!(!is_valid_formula("Ca)OH("));
        assert!(!is_valid_formula("(()"));
    }

    #[test]
    fn test_syntax_only_check_accepts_nonsense_symbols() {
        // Character set and bracket balance are all that is checked
        assert!(is_valid_formula("Xq9"));
        assert!(is_valid_formula("()"));
    }

    #[test]
    fn test_empty_formula_is_rejected() {
        assert!(!is_valid_formula(""));
    }

    #[test]
    fn test_normalize_strips_whitespace() {
        assert_eq!(normalize_formula_input(" H2 SO4 "), "H2SO4");
        assert_eq!(normalize_formula_input("Ca (OH)\t2"), "Ca(OH)2");
    }

    #[test]
    fn test_normalize_capitalizes_word_starts() {
        assert_eq!(normalize_formula_input("h2o"), "H2o");
        assert_eq!(normalize_formula_input("ca(oh)2"), "Ca(Oh)2");
        assert_eq!(normalize_formula_input("nacl"), "Nacl");
    }

    #[test]
    fn test_normalize_after_digit_is_not_a_boundary() {
        // Digits are word characters, so the `o` after `2` stays lowercase
        assert_eq!(normalize_formula_input("h2o2"), "H2o2");
    }

    #[test]
    fn test_normalize_whitespace_removal_happens_first() {
        // "na cl" compacts to "nacl" before capitalisation
        assert_eq!(normalize_formula_input("na cl"), "Nacl");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_formula_input("mg3(po4)2");
        assert_eq!(normalize_formula_input(&once), once);
    }
}
