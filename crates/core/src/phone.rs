//! Phone number input formatting.

/// Maximum digit count the `(DD) DDDDD-DDDD` mask applies to.
pub const MAX_FORMATTED_DIGITS: usize = 11;

/// Reformat phone input into `(DD) DDDDD-DDDD`.
///
/// Non-digits are stripped first. With 11 digits the mask applies exactly;
/// 10-digit landline numbers use a four-digit middle group. Partial input
/// (fewer than 10 digits) is returned as bare digits so typing is not fought
/// on every keystroke. Input with more than 11 digits is returned unchanged.
///
/// # Examples
///
/// ```
/// use locator_core::phone::format_phone;
/// assert_eq!(format_phone("65999991234"), "(65) 99999-1234");
/// assert_eq!(format_phone("659999912345"), "659999912345");
/// ```
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    if digits.len() > MAX_FORMATTED_DIGITS {
        return input.to_string();
    }
    if digits.len() < 10 {
        return digits;
    }

    let (area, rest) = digits.split_at(2);
    let (middle, last) = rest.split_at(rest.len() - 4);
    format!("({area}) {middle}-{last}")
}

/// Digits only, for transmission.
pub fn phone_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Whether the input holds a plausible 10 or 11 digit number.
pub fn is_valid_phone(input: &str) -> bool {
    matches!(phone_digits(input).len(), 10 | 11)
}
