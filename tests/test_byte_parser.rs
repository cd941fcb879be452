use tolsplit::parser::ByteParser;
use tolsplit::parser::ParsingErrorType;

const DELIMITERS: &[u8] = b",);";

#[test]
fn test_skip_whitespace() {
    let mut parser = ByteParser::for_str(" \r  \t\n \t x y");
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));

    parser.next_byte(); // skip x
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'y'));
}

#[test]
fn test_consume_if() {
    let mut parser = ByteParser::for_str("(A");
    assert!(!parser.consume_if(b'A'));
    assert!(parser.consume_if(b'('));
    assert!(parser.consume_if(b'A'));
    assert!(parser.is_eof());
    assert_eq!(parser.position(), 2);
}

#[test]
fn test_unquoted_label_stops_at_delimiter() {
    let mut parser = ByteParser::for_str("Puffinus_puffinus_ott1,rest");
    let label = parser.parse_label(DELIMITERS).unwrap();
    assert_eq!(label, "Puffinus puffinus ott1");
    assert_eq!(parser.peek(), Some(b','));
}

#[test]
fn test_label_until_eof() {
    let mut parser = ByteParser::for_str("Aves_ott81461");
    let label = parser.parse_label(DELIMITERS).unwrap();
    assert_eq!(label, "Aves ott81461");
    assert!(parser.is_eof());
}

#[test]
fn test_separators_fold_and_leading_ones_drop() {
    let mut parser = ByteParser::for_str("_ _foo");
    assert_eq!(parser.parse_label(DELIMITERS).unwrap(), "foo");

    let mut parser = ByteParser::for_str("Anas__\tplatyrhynchos___ott7)");
    assert_eq!(parser.parse_label(DELIMITERS).unwrap(), "Anas platyrhynchos ott7");
    assert_eq!(parser.peek(), Some(b')'));
}

#[test]
fn test_trailing_separators_drop() {
    let mut parser = ByteParser::for_str("Anas_ ;");
    assert_eq!(parser.parse_label(DELIMITERS).unwrap(), "Anas");
    assert_eq!(parser.peek(), Some(b';'));
}

#[test]
fn test_quoted_label_with_escaped_quote() {
    let mut parser = ByteParser::for_str("'A''B'");
    assert_eq!(parser.parse_label(DELIMITERS).unwrap(), "A'B");
    assert!(parser.is_eof());
}

#[test]
fn test_quoted_segment_keeps_delimiters_and_underscores() {
    let mut parser = ByteParser::for_str("'a,b)c_d;'_ott3,");
    assert_eq!(parser.parse_label(DELIMITERS).unwrap(), "a,b)c_d; ott3");
    assert_eq!(parser.peek(), Some(b','));
}

#[test]
fn test_unclosed_quote_is_eof_error() {
    let mut parser = ByteParser::for_str("'Baillon''s crake");
    let err = parser.parse_label(DELIMITERS).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_multibyte_label() {
    let mut parser = ByteParser::for_str("Pérez_ott9,");
    assert_eq!(parser.parse_label(DELIMITERS).unwrap(), "Pérez ott9");
}

#[test]
fn test_invalid_utf8_label() {
    let mut parser = ByteParser::for_bytes(b"ab\xffcd,");
    let err = parser.parse_label(DELIMITERS).unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::InvalidUtf8);
    assert_eq!(err.position(), 0);
}

#[test]
fn test_context_string() {
    let mut parser = ByteParser::for_str("0123456789");
    parser.next_byte();
    parser.next_byte();
    assert_eq!(parser.get_context_as_string(3), "234");
    assert_eq!(parser.get_context_as_string(100), "23456789");
}
