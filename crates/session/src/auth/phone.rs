//! Canonicalization of user-supplied Saudi phone numbers.

const CANONICAL_PREFIX: &str = "+966";

/// Convert raw phone input into the canonical `+966XXXXXXXXX` form.
///
/// Accepts spaces, dashes, parentheses and a leading `+`; recognizes the
/// `966...` international form, the `05...` local form and the bare
/// 9-digit subscriber number. Anything else keeps its digits best-effort,
/// deferring real validation to the identity service. Never fails.
///
/// # Examples
/// ```
/// use session::auth::phone::normalize;
/// assert_eq!(normalize("+966 51 234 5678"), "+966512345678");
/// assert_eq!(normalize("0512345678"), "+966512345678");
/// assert_eq!(normalize("512345678"), "+966512345678");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.starts_with("966") && digits.len() == 12 {
        return format!("{CANONICAL_PREFIX}{}", &digits[3..]);
    }
    if digits.starts_with("05") && digits.len() == 10 {
        return format!("{CANONICAL_PREFIX}{}", &digits[1..]);
    }
    if digits.starts_with('5') && digits.len() == 9 {
        return format!("{CANONICAL_PREFIX}{digits}");
    }

    // Unrecognized shape: keep whatever digits remain.
    format!("{CANONICAL_PREFIX}{digits}")
}
