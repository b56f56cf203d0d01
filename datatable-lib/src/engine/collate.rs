//! Locale-aware string ordering.
//!
//! Strings compare by base letters first (accents and case ignored), then by
//! accents, then by case with lowercase first, then by code point. The last
//! step makes the order total: two strings compare equal only when identical.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two strings for display ordering.
pub fn compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented(a).cmp(accented(b)))
        .then_with(|| case_bits(a).cmp(case_bits(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_bits(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.nfd().map(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_is_secondary() {
        assert_eq!(compare("apple", "Banana"), Ordering::Less);
        assert_eq!(compare("Apple", "banana"), Ordering::Less);
        assert_eq!(compare("a", "A"), Ordering::Less);
    }

    #[test]
    fn test_accents_sort_with_base_letter() {
        assert_eq!(compare("Émile", "Frank"), Ordering::Less);
        assert_eq!(compare("Emile", "Émile"), Ordering::Less);
    }

    #[test]
    fn test_equal_only_when_identical() {
        assert_eq!(compare("Amy", "Amy"), Ordering::Equal);
        assert_ne!(compare("amy", "Amy"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare("Bo", "Bob"), Ordering::Less);
    }
}
