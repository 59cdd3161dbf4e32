// Literal parsing tests
// Tests for numbers, strings, templates and regular expressions

use pretty_assertions::assert_eq;
use rn_debundle_parser::{ast::*, parse_expression, parse_program};

fn literal(input: &str) -> Literal {
    match parse_expression(input).unwrap().kind {
        ExpressionKind::Literal(literal) => literal,
        other => panic!("Expected literal, got: {:?}", other),
    }
}

fn number(input: &str) -> NumberLiteral {
    match literal(input) {
        Literal::Number(number) => number,
        other => panic!("Expected number literal, got: {:?}", other),
    }
}

fn string(input: &str) -> StringLiteral {
    match literal(input) {
        Literal::String(string) => string,
        other => panic!("Expected string literal, got: {:?}", other),
    }
}

// === NUMBERS ===

#[test]
fn test_number_literals_keep_raw_spelling() {
    let hex = number("0xFF");
    assert_eq!(hex.value, 255.0);
    assert_eq!(hex.raw, "0xFF");

    let separated = number("1_000_000");
    assert_eq!(separated.value, 1_000_000.0);
    assert_eq!(separated.raw, "1_000_000");

    assert_eq!(number("0b1010").value, 10.0);
    assert_eq!(number("0o777").value, 511.0);
    assert_eq!(number(".25").value, 0.25);
    assert_eq!(number("6.02e23").value, 6.02e23);
}

#[test]
fn test_bigint_literal() {
    match literal("123_456n") {
        Literal::BigInt(bigint) => {
            assert_eq!(bigint.digits, "123456");
            assert_eq!(bigint.raw, "123_456n");
        }
        other => panic!("Expected BigInt literal, got: {:?}", other),
    }
}

#[test]
fn test_number_followed_by_identifier_is_rejected() {
    assert!(parse_program("3in[x];").is_err());
}

// === STRINGS ===

#[test]
fn test_string_quotes_and_escapes() {
    let double = string(r#""say \"hi\"""#);
    assert_eq!(double.value, "say \"hi\"");
    assert_eq!(double.raw, r#""say \"hi\"""#);

    let single = string(r"'it\'s\ttabbed'");
    assert_eq!(single.value, "it's\ttabbed");

    assert_eq!(string(r"'é\u{1F600}'").value, "é😀");
    assert_eq!(string(r"'\x41\102'").value, "AB");
}

#[test]
fn test_string_cannot_span_lines() {
    assert!(parse_program("var s = 'a\nb';").is_err());
}

#[test]
fn test_invalid_escape_is_an_error() {
    assert!(parse_program(r"var s = '\u12';").is_err());
}

#[test]
fn test_keyword_literals() {
    assert_eq!(literal("null"), Literal::Null);
    assert_eq!(literal("true"), Literal::Boolean(true));
    assert_eq!(literal("false"), Literal::Boolean(false));
    assert!(matches!(
        parse_expression("nullable").unwrap().kind,
        ExpressionKind::Identifier(_)
    ));
}

// === TEMPLATES ===

#[test]
fn test_template_literal_parts() {
    let expr = parse_expression("`a${b}c${d + 1}`").unwrap();

    match &expr.kind {
        ExpressionKind::Template(template) => {
            assert_eq!(template.quasis, vec!["a", "c", ""]);
            assert_eq!(template.expressions.len(), 2);
            assert!(matches!(template.expressions[1].kind, ExpressionKind::Binary(_)));
        }
        _ => panic!("Expected template literal"),
    }
}

#[test]
fn test_template_literal_keeps_escapes_raw() {
    let expr = parse_expression(r"`line\n$ \${x}`").unwrap();

    match &expr.kind {
        ExpressionKind::Template(template) => {
            assert_eq!(template.quasis, vec![r"line\n$ \${x}"]);
            assert!(template.expressions.is_empty());
        }
        _ => panic!("Expected template literal"),
    }
}

#[test]
fn test_tagged_template() {
    let expr = parse_expression("css`color: ${c};`").unwrap();

    match &expr.kind {
        ExpressionKind::TaggedTemplate(tagged) => {
            assert!(matches!(tagged.tag.kind, ExpressionKind::Identifier(_)));
            assert_eq!(tagged.quasi.quasis, vec!["color: ", ";"]);
        }
        _ => panic!("Expected tagged template"),
    }
}

// === REGULAR EXPRESSIONS ===

#[test]
fn test_regex_literal() {
    match literal(r"/[a-z/]+\/x/gi") {
        Literal::RegExp(regex) => {
            assert_eq!(regex.pattern, r"[a-z/]+\/x");
            assert_eq!(regex.flags, "gi");
        }
        other => panic!("Expected regex literal, got: {:?}", other),
    }
}

#[test]
fn test_division_is_not_a_regex() {
    let expr = parse_expression("a / b / c").unwrap();

    match &expr.kind {
        ExpressionKind::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Divide);
            assert!(matches!(binary.left.kind, ExpressionKind::Binary(_)));
        }
        _ => panic!("Expected division"),
    }
}
