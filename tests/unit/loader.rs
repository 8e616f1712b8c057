//! Rate-sheet and phone-list readers.

use std::io::Cursor;

use callroute::load::{load_reader, parse_record, read_numbers, RecordError};
use callroute::PrefixIndex;

use crate::common::{dump, SCENARIO_ROUTES};

#[test]
fn test_parse_record_tolerates_whitespace_and_crlf() {
    assert_eq!(parse_record(" +1415 ,  0.02 \r\n").unwrap().to_string(), "+1415,0.02");
}

#[test]
fn test_parse_record_field_count() {
    assert_eq!(parse_record(""), Err(RecordError::FieldCount { found: 1 }));
    assert_eq!(parse_record("+1415;0.02"), Err(RecordError::FieldCount { found: 1 }));
    assert_eq!(parse_record("+1415,0.02,"), Err(RecordError::FieldCount { found: 3 }));
}

#[test]
fn test_header_line_is_rejected_not_fatal() {
    let input = format!("prefix,cost\n{}", SCENARIO_ROUTES);
    let mut index = PrefixIndex::new();
    let report = load_reader(Cursor::new(input), "with-header", &mut index).unwrap();
    assert_eq!(report.rejected, 1);
    assert_eq!(report.accepted, 4);
    assert_eq!(report.rejects[0].line, 1);
}

#[test]
fn test_min_merge_within_one_sheet() {
    let input = "+1415,0.05\n+1415,0.02\n+1415,0.03\n";
    let mut index = PrefixIndex::new();
    let report = load_reader(Cursor::new(input), "dups", &mut index).unwrap();
    assert_eq!(report.merge.inserted, 1);
    assert_eq!(report.merge.improved, 1);
    assert_eq!(report.merge.unchanged, 1);
    assert_eq!(dump(&index), ["+1415,0.02"]);
}

#[test]
fn test_missing_trailing_newline() {
    let mut index = PrefixIndex::new();
    load_reader(Cursor::new("+1,0.05\n+44,0.10"), "no-eol", &mut index).unwrap();
    assert_eq!(index.len(), 2);
}

#[test]
fn test_read_numbers_streams_lazily() {
    let mut numbers = read_numbers(Cursor::new("+1\n\n+2,0.03\n  +3  \n"));
    assert_eq!(numbers.next().unwrap().unwrap(), "+1");
    assert_eq!(numbers.next().unwrap().unwrap(), "+2");
    assert_eq!(numbers.next().unwrap().unwrap(), "+3");
    assert!(numbers.next().is_none());
}
