// src/phone.rs

/// Number of digits in an accepted patient phone number.
pub const PHONE_DIGITS: usize = 10;

/// Strip everything that is not an ASCII digit.
pub fn digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid(raw: &str) -> bool {
    digits(raw).len() == PHONE_DIGITS
}

/// The bare 10 digits of `raw`, or `None` when it does not hold exactly 10.
pub fn normalize(raw: &str) -> Option<String> {
    let d = digits(raw);
    (d.len() == PHONE_DIGITS).then_some(d)
}

/// Progressive formatting used while a number is being typed:
/// `5` -> `(5`, `55512` -> `(55512`, `555123` -> `(555) 123`,
/// `5551234567` -> `(555) 123-4567`.
///
/// Input carrying more than 10 digits is returned untouched.
pub fn format_as_you_type(raw: &str) -> String {
    let d = digits(raw);
    if d.len() > PHONE_DIGITS {
        return raw.to_string();
    }

    let area = &d[..d.len().min(3)];
    let exchange = &d[area.len()..d.len().min(6)];
    let line = &d[area.len() + exchange.len()..];

    let mut out = String::with_capacity(14);
    if !area.is_empty() {
        out.push('(');
        out.push_str(area);
    }
    if !exchange.is_empty() {
        if exchange.len() == 3 {
            out.push_str(") ");
        }
        out.push_str(exchange);
    }
    if !line.is_empty() {
        out.push('-');
        out.push_str(line);
    }
    out
}

/// `(123) 456-7890` for a complete number; anything else comes back as given.
pub fn format_display(raw: &str) -> String {
    match normalize(raw) {
        Some(d) => format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..]),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        assert_eq!(format_display("1234567890"), "(123) 456-7890");
        assert_eq!(format_display("123-456-7890"), "(123) 456-7890");
        // not 10 digits: unchanged
        assert_eq!(format_display("12345"), "12345");
        assert_eq!(format_display("+1 123 456 7890"), "+1 123 456 7890");
    }

    #[test]
    fn test_as_you_type() {
        assert_eq!(format_as_you_type(""), "");
        assert_eq!(format_as_you_type("5"), "(5");
        assert_eq!(format_as_you_type("555"), "(555");
        assert_eq!(format_as_you_type("5551"), "(5551");
        assert_eq!(format_as_you_type("555123"), "(555) 123");
        assert_eq!(format_as_you_type("5551234"), "(555) 123-4");
        assert_eq!(format_as_you_type("(555) 123-4567"), "(555) 123-4567");
        assert_eq!(format_as_you_type("55512345678"), "55512345678");
    }

    #[test]
    fn test_validity() {
        assert!(is_valid("(555) 123-4567"));
        assert!(!is_valid("555123456"));
        assert!(!is_valid("55512345678"));
        assert_eq!(normalize(" 555.123.4567 ").as_deref(), Some("5551234567"));
        assert_eq!(normalize("abc"), None);
    }
}
