//! Phone number normalization.

/// Formats a US phone number as `+1 XXX-XXX-XXXX`.
///
/// Non-digits are stripped and a leading country `1` on eleven-digit
/// numbers is dropped. Anything that does not reduce to ten digits
/// (including blank input) yields an empty string.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let digits = if digits.len() == 11 && digits.starts_with('1') {
        &digits[1..]
    } else {
        digits.as_str()
    };

    if digits.len() == 10 {
        format!("+1 {}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        String::new()
    }
}
