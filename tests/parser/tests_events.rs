//! Depth-tagged event stream behavior.

use rstest::rstest;
use tilelisp::error::{Error, SchemaError, StructuralError};
use tilelisp::parser::{Parser, Value};

fn collect(source: &str) -> Vec<(usize, Value<'_>)> {
    Parser::new(source)
        .map(|event| event.map(|e| (e.depth, e.value)))
        .collect::<Result<_, _>>()
        .unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"))
}

#[test]
fn test_nested_depths() {
    assert_eq!(
        collect(r#"(tile (images "a.png") #t)"#),
        vec![
            (0, Value::StartList),
            (1, Value::Symbol("tile".into())),
            (1, Value::StartList),
            (2, Value::Symbol("images".into())),
            (2, Value::String("a.png".into())),
            (1, Value::EndList),
            (1, Value::Boolean(true)),
            (0, Value::EndList),
        ]
    );
}

#[rstest]
#[case("")]
#[case("()")]
#[case("(a (b (c)) (d) e)")]
#[case("(a) (b) ; comment\n(c (d))")]
#[case("((((deep))))")]
fn test_start_and_end_depths_match(#[case] source: &str) {
    let mut open = Vec::new();
    let mut parser = Parser::new(source);
    while let Some(event) = parser.next_event().unwrap() {
        match event.value {
            Value::StartList => open.push(event.depth),
            Value::EndList => assert_eq!(open.pop(), Some(event.depth)),
            _ => assert_eq!(event.depth, open.len()),
        }
        assert_eq!(parser.depth(), open.len());
    }
    assert!(open.is_empty());
}

#[test]
fn test_close_at_depth_zero() {
    let mut parser = Parser::new("(a))");
    for _ in 0..3 {
        parser.next_event().unwrap();
    }
    assert!(matches!(
        parser.next_event(),
        Err(Error::Structural(StructuralError::UnexpectedClose { line: 1 }))
    ));
}

#[test]
fn test_eof_resets_depth() {
    let mut parser = Parser::new("(a (b");
    while parser.next_event().unwrap().is_some() {}
    assert_eq!(parser.depth(), 0);
    assert_eq!(parser.next_event().unwrap(), None);
}

#[test]
fn test_numbers_and_lines() {
    let events: Vec<_> = Parser::new("(fps\n 2.5\n -3)")
        .map(|e| e.unwrap())
        .map(|e| (e.line, e.value))
        .collect();
    assert_eq!(events[2], (2, Value::Real(2.5)));
    assert_eq!(events[3], (3, Value::Integer(-3)));
}

#[test]
fn test_integer_overflow_is_schema_error() {
    let result: Result<Vec<_>, _> = Parser::new("(n 99999999999999999999)").collect();
    assert!(matches!(
        result,
        Err(Error::Schema(SchemaError::InvalidNumber { ref text, .. }))
            if text == "99999999999999999999"
    ));
}
