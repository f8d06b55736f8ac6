use std::io::Read;

use crate::{Error, JsonReader, SyntaxError};

fn reader_over(doc: &str) -> JsonReader<'_, &[u8]> {
    JsonReader::new(doc.as_bytes())
}

fn expect_syntax(err: &Error) -> (&SyntaxError, usize, usize) {
    match err {
        Error::Syntax { kind, line, column } => (kind, *line, *column),
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn absent_property_fails_with_property_not_found() {
    let mut reader = reader_over(r#"{"a": 1}"#);
    let err = reader.read_i32("zzz").unwrap_err();
    assert!(matches!(err, Error::PropertyNotFound(name) if name == "zzz"));
}

#[test]
fn out_of_order_request_fails_with_property_not_found() {
    let mut reader = reader_over(r#"{"a": 1, "b": 2}"#);
    assert_eq!(reader.read_i32("b").unwrap(), Some(2));
    let err = reader.read_i32("a").unwrap_err();
    assert!(matches!(err, Error::PropertyNotFound(_)));
}

#[test]
fn wrong_value_type_is_reported() {
    let mut reader = reader_over(r#"{"a": "x"}"#);
    let err = reader.read_i32("a").unwrap_err();
    assert!(matches!(
        err,
        Error::ExpectedValue { property, .. } if property == "a"
    ));

    let mut reader = reader_over(r#"{"a": 1}"#);
    let err = reader.read_string("a").unwrap_err();
    assert!(matches!(err, Error::ExpectedValue { .. }));

    let mut reader = reader_over(r#"{"a": 1}"#);
    let err = reader.read_object("a").unwrap_err();
    assert!(matches!(err, Error::Syntax { .. }));
}

#[test]
fn input_that_is_not_an_object_fails_immediately() {
    let mut reader = reader_over("42");
    let err = reader.read_i32("a").unwrap_err();
    let (kind, line, column) = expect_syntax(&err);
    assert_eq!(*kind, SyntaxError::UnexpectedCharacter('4'));
    assert_eq!((line, column), (1, 1));
}

#[test]
fn unterminated_string_fails() {
    let mut reader = reader_over(r#"{"a": "abc"#);
    let err = reader.read_string("a").unwrap_err();
    let (kind, _, _) = expect_syntax(&err);
    assert_eq!(*kind, SyntaxError::UnterminatedString);
}

#[test]
fn malformed_null_literal_fails() {
    let mut reader = reader_over(r#"{"a": nul}"#);
    let err = reader.read_i32("a").unwrap_err();
    let (kind, _, _) = expect_syntax(&err);
    assert_eq!(*kind, SyntaxError::InvalidNullLiteral);

    // the literal must be followed by whitespace, `}`, or `,`
    let mut reader = reader_over(r#"{"a": nullx}"#);
    let err = reader.read_i32("a").unwrap_err();
    let (kind, _, _) = expect_syntax(&err);
    assert_eq!(*kind, SyntaxError::InvalidNullLiteral);
}

#[test]
fn integer_overflow_fails() {
    let mut reader = reader_over(r#"{"a": 2147483648}"#);
    let err = reader.read_i32("a").unwrap_err();
    let (kind, _, _) = expect_syntax(&err);
    assert_eq!(
        *kind,
        SyntaxError::InvalidNumber("2147483648".to_owned())
    );
}

#[test]
fn input_ending_after_a_comma_fails() {
    let mut reader = reader_over(r#"{"a": 1,"#);
    assert_eq!(reader.read_i32("a").unwrap(), Some(1));
    let err = reader.read_i32("b").unwrap_err();
    let (kind, _, _) = expect_syntax(&err);
    assert_eq!(*kind, SyntaxError::UnexpectedEndOfInput);
}

#[test]
fn syntax_errors_carry_the_source_position() {
    let mut reader = reader_over("{\n  \"a\": @}");
    let err = reader.read_i32("a").unwrap_err();
    let (kind, line, column) = expect_syntax(&err);
    assert_eq!(*kind, SyntaxError::UnexpectedCharacter('@'));
    assert_eq!((line, column), (2, 8));
}

#[test]
fn abandoned_blob_stream_leaves_the_string_pending() {
    let mut reader = reader_over(r#"{"b": "SGVsbG8=", "c": 1}"#);
    drop(reader.read_stream("b").unwrap());
    let err = reader.read_i32("c").unwrap_err();
    assert!(matches!(err, Error::StringPending));
}

#[test]
fn blob_with_length_not_a_multiple_of_four_fails() {
    let mut reader = reader_over(r#"{"b": "SGVsbG8"}"#);
    let mut stream = reader.read_stream("b").unwrap().unwrap();
    let err = stream.read_to_end(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("multiple of 4"));
}

#[test]
fn blob_with_character_outside_the_alphabet_fails() {
    let mut reader = reader_over(r#"{"b": "SGV_bG8="}"#);
    let mut stream = reader.read_stream("b").unwrap().unwrap();
    let err = stream.read_to_end(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("invalid character"));
}

#[test]
fn unterminated_blob_fails() {
    let mut reader = reader_over(r#"{"b": "SGVs"#);
    let mut stream = reader.read_stream("b").unwrap().unwrap();
    let err = stream.read_to_end(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("unterminated"));
}

#[test]
fn blob_with_misplaced_padding_fails() {
    let mut reader = reader_over(r#"{"b": "S=Vs"}"#);
    let mut stream = reader.read_stream("b").unwrap().unwrap();
    let err = stream.read_to_end(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("misplaced padding"));
}

#[test]
fn invalid_escape_in_string_value_fails() {
    let mut reader = reader_over(r#"{"a": "\q"}"#);
    let err = reader.read_string("a").unwrap_err();
    let (kind, _, _) = expect_syntax(&err);
    assert_eq!(*kind, SyntaxError::InvalidEscape('q'));
}

#[test]
fn raw_control_character_in_string_value_fails() {
    let mut reader = reader_over("{\"a\": \"x\u{0001}y\"}");
    let err = reader.read_string("a").unwrap_err();
    let (kind, _, _) = expect_syntax(&err);
    assert_eq!(*kind, SyntaxError::ControlCharacter('\u{0001}'));
}

#[test]
fn closing_with_a_pending_string_fails() {
    let mut reader = reader_over(r#"{"b": "SGVsbG8=", "c": 1}"#);
    drop(reader.read_stream("b").unwrap());
    let err = reader.close().unwrap_err();
    assert!(matches!(err, Error::StringPending));
}
