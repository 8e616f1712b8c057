//! Cost literals: parsing, ordering, display.

use callroute::{Cost, CostParseError};

use crate::common::cost;

#[test]
fn test_accepts_plain_decimals() {
    for literal in ["0", "0.00", "0.03", "1", "12.5", "0.000001"] {
        let parsed: Cost = literal.parse().unwrap();
        assert_eq!(parsed.to_string(), literal);
    }
}

#[test]
fn test_rejects_everything_else() {
    let cases = [
        ("", CostParseError::Empty),
        (".5", CostParseError::MissingIntegerDigits),
        ("5.", CostParseError::MissingFractionDigits),
        ("-0.02", CostParseError::InvalidCharacter { position: 0, found: '-' }),
        ("1e3", CostParseError::InvalidCharacter { position: 1, found: 'e' }),
        ("0.0.1", CostParseError::InvalidCharacter { position: 3, found: '.' }),
        (" 1", CostParseError::InvalidCharacter { position: 0, found: ' ' }),
        ("99999999999999999999", CostParseError::Overflow),
        ("0.0000000000000000001", CostParseError::TooPrecise { digits: 19 }),
    ];
    for (literal, expected) in cases {
        assert_eq!(literal.parse::<Cost>(), Err(expected), "literal {:?}", literal);
    }
}

#[test]
fn test_compares_numerically_across_scales() {
    assert_eq!(cost("0.1"), cost("0.10"));
    assert!(cost("0.09") < cost("0.1"));
    assert!(cost("2") > cost("1.999"));
    assert!(cost("0.04") < cost("0.4"));
    // a string comparison would get this one wrong
    assert!(cost("9") < cost("10"));
    assert_eq!(cost("0.030").min(cost("0.03")), cost("0.03"));
}

#[test]
fn test_zero() {
    assert!(cost("0.000").is_zero());
    assert_eq!(Cost::ZERO, cost("0"));
    assert!(!cost("0.001").is_zero());
}

#[test]
fn test_from_units() {
    let c = Cost::from_units(125, 4).unwrap();
    assert_eq!(c.to_string(), "0.0125");
    assert_eq!((c.units(), c.scale()), (125, 4));
    assert!(Cost::from_units(1, callroute::MAX_SCALE + 1).is_none());
}

#[test]
fn test_serde_as_string() {
    let json = serde_json::to_string(&cost("0.030")).unwrap();
    assert_eq!(json, "\"0.030\"");
    let back: Cost = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_string(), "0.030");
    assert!(serde_json::from_str::<Cost>("\"abc\"").is_err());
}
