//! Validation rules mirroring the domain's user constraints.
//!
//! Generated names and country codes must be accepted by the `monk` domain
//! types (`DisplayName` and `CountryCode`) when peers are converted.
//!
//! # Validation Rules
//!
//! - Display names are 3 to 64 characters of letters, digits, spaces, and
//!   underscores, and not whitespace-only
//! - Country codes are exactly two ASCII letters

/// Minimum allowed length for a generated display name.
pub const DISPLAY_NAME_MIN: usize = 3;

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Validates a generated display name.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_display_name;
///
/// assert!(is_valid_display_name("Ada Lovelace"));
/// assert!(is_valid_display_name("user_123"));
/// assert!(!is_valid_display_name("ab"));           // Too short
/// assert!(!is_valid_display_name("O'Brien"));      // Invalid character
/// assert!(!is_valid_display_name("   "));          // Whitespace-only
/// ```
#[must_use]
pub fn is_valid_display_name(name: &str) -> bool {
    let length = name.chars().count();
    if !(DISPLAY_NAME_MIN..=DISPLAY_NAME_MAX).contains(&length) {
        return false;
    }
    if name.trim().is_empty() {
        return false;
    }
    name.chars().all(is_valid_display_name_char)
}

/// Validates an ISO 3166 alpha-2 style country code.
///
/// Only the shape is checked; case is not significant.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_country_code;
///
/// assert!(is_valid_country_code("GB"));
/// assert!(is_valid_country_code("us"));
/// assert!(!is_valid_country_code("GBR"));
/// ```
#[must_use]
pub fn is_valid_country_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic())
}

#[must_use]
const fn is_valid_display_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || c == '_'
}

/// Replaces characters that are not allowed in a display name with
/// underscores. Length is not enforced.
#[must_use]
pub(crate) fn sanitize_display_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if is_valid_display_name_char(c) {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Builds the local part of an email address from a display name.
///
/// Letters and digits are lowercased; runs of anything else collapse to a
/// single dot.
#[must_use]
pub(crate) fn email_local_part(display_name: &str) -> String {
    let mut local = String::with_capacity(display_name.len());
    for c in display_name.chars() {
        if c.is_ascii_alphanumeric() {
            local.push(c.to_ascii_lowercase());
        } else if !local.is_empty() && !local.ends_with('.') {
            local.push('.');
        }
    }
    local.trim_end_matches('.').to_owned()
}

#[cfg(test)]
mod tests {
    //! Covers display name, country code, and email helpers.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Ada")]
    #[case("Ada Lovelace")]
    #[case("user_123")]
    #[case("A B C")]
    fn accepts_valid_display_names(#[case] name: &str) {
        assert!(is_valid_display_name(name));
    }

    #[rstest]
    #[case("ab")] // Too short
    #[case("")] // Empty
    #[case("O'Brien")] // Apostrophe
    #[case("Marie-Claire")] // Hyphen
    #[case("   ")] // Whitespace-only
    fn rejects_invalid_display_names(#[case] name: &str) {
        assert!(!is_valid_display_name(name));
    }

    #[rstest]
    fn display_name_length_bounds_are_inclusive() {
        assert!(is_valid_display_name(&"A".repeat(DISPLAY_NAME_MIN)));
        assert!(is_valid_display_name(&"A".repeat(DISPLAY_NAME_MAX)));
        assert!(!is_valid_display_name(&"A".repeat(DISPLAY_NAME_MAX + 1)));
    }

    #[rstest]
    #[case("GB", true)]
    #[case("jp", true)]
    #[case("G", false)]
    #[case("GBR", false)]
    #[case("1A", false)]
    #[case("", false)]
    fn country_code_shape(#[case] code: &str, #[case] expected: bool) {
        assert_eq!(is_valid_country_code(code), expected);
    }

    #[rstest]
    #[case("O'Brien", "O_Brien")]
    #[case("Marie-Claire", "Marie_Claire")]
    #[case("Ada Lovelace", "Ada Lovelace")]
    fn sanitize_replaces_invalid_characters(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize_display_name(raw), expected);
    }

    #[rstest]
    #[case("Ada Lovelace", "ada.lovelace")]
    #[case("O_Brien  Smith", "o.brien.smith")]
    #[case(" Grace ", "grace")]
    fn email_local_part_is_dotted_lowercase(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(email_local_part(name), expected);
    }
}
