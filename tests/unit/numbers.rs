//! Number normalization and prefixes.

use callroute::{normalized_digits, NumberError, Prefix};

#[test]
fn test_normalized_forms() {
    assert_eq!(normalized_digits("+15124156620"), Ok("15124156620"));
    assert_eq!(normalized_digits("+0"), Ok("0"));
}

#[test]
fn test_malformed_forms() {
    assert_eq!(normalized_digits(""), Err(NumberError::Empty));
    assert_eq!(normalized_digits("+"), Err(NumberError::NoDigits));
    assert_eq!(normalized_digits("15124156620"), Err(NumberError::MissingMarker));
    assert_eq!(
        normalized_digits("+1-512"),
        Err(NumberError::InvalidCharacter { position: 2, found: '-' })
    );
    assert_eq!(
        normalized_digits("++1"),
        Err(NumberError::InvalidCharacter { position: 1, found: '+' })
    );
    assert!(normalized_digits("+１２").is_err());
}

#[test]
fn test_prefix_display_and_order() {
    let a: Prefix = "+1415".parse().unwrap();
    let b = Prefix::parse("+14152").unwrap();
    assert_eq!(a.to_string(), "+1415");
    assert_eq!(a.digits(), "1415");
    assert_eq!(a.len(), 4);
    assert!(a < b);
}

#[test]
fn test_prefix_matches() {
    let prefix = Prefix::parse("+1415").unwrap();
    assert!(prefix.matches("+14155550000"));
    assert!(prefix.matches("+1415"));
    assert!(!prefix.matches("+1416"));
    assert!(!prefix.matches("+141"));
    assert!(!prefix.matches("14155550000"));
}
