// Literal parsing functions for the JavaScript parser
// Handles numbers, strings, templates and regular expressions

use super::{JavaScriptParser, Rule};
use crate::ast::*;
use crate::error::*;

impl JavaScriptParser {
    /// Parse a numeric literal, keeping its source spelling
    pub(super) fn parse_numeric_literal(pair: pest::iterators::Pair<Rule>) -> ParseResult<Literal> {
        let span = Self::span_from_pair(&pair);
        let raw = pair.as_str().to_string();

        if let Some(digits) = raw.strip_suffix('n') {
            return Ok(Literal::BigInt(BigIntLiteral {
                digits: digits.replace('_', ""),
                raw,
                span,
            }));
        }

        let value = parse_number_value(&raw)
            .ok_or_else(|| Self::create_parse_error(&span, &raw, ParseError::invalid_number))?;

        Ok(Literal::Number(NumberLiteral { value, raw, span }))
    }

    /// Parse a quoted string literal, decoding escape sequences
    pub(crate) fn parse_string_literal(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<StringLiteral> {
        let span = Self::span_from_pair(&pair);
        let raw = pair.as_str().to_string();

        // Both quote characters are single bytes
        let content = &raw[1..raw.len() - 1];
        let value = decode_string_content(content).map_err(|escape| {
            Self::create_parse_error(&span, &escape, ParseError::invalid_string_escape)
        })?;

        Ok(StringLiteral { value, raw, span })
    }

    pub(super) fn parse_regex_literal(pair: pest::iterators::Pair<Rule>) -> RegExpLiteral {
        let span = Self::span_from_pair(&pair);
        let raw = pair.as_str();

        // The grammar guarantees a closing slash; flags never contain one
        let closing = raw.rfind('/').unwrap_or(raw.len());
        let pattern = raw.get(1..closing).unwrap_or_default().to_string();
        let flags = raw.get(closing + 1..).unwrap_or_default().to_string();

        RegExpLiteral {
            pattern,
            flags,
            span,
        }
    }

    pub(super) fn parse_template_literal(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<TemplateLiteral> {
        let mut quasis = vec![String::new()];
        let mut expressions = Vec::new();

        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::template_chunk => {
                    if let Some(current) = quasis.last_mut() {
                        current.push_str(part.as_str());
                    }
                }
                Rule::template_substitution => {
                    let span = Self::span_from_pair(&part);
                    let expression = Self::expect_inner(part.into_inner(), "expression", &span)?;
                    expressions.push(Self::parse_expression_from_pair(expression)?);
                    quasis.push(String::new());
                }
                _ => return Err(Self::unexpected_rule("template text or substitution", &part)),
            }
        }

        Ok(TemplateLiteral {
            quasis,
            expressions,
        })
    }
}

/// Numeric value of a non-BigInt literal, or `None` when it is malformed
pub(crate) fn parse_number_value(raw: &str) -> Option<f64> {
    let text = raw.replace('_', "");
    let lower = text.to_ascii_lowercase();

    let radix_digits = |prefix: &str, radix: u32| {
        lower
            .strip_prefix(prefix)
            .map(|digits| radix_value(digits, radix))
    };

    if let Some(value) = radix_digits("0x", 16) {
        return value;
    }
    if let Some(value) = radix_digits("0o", 8) {
        return value;
    }
    if let Some(value) = radix_digits("0b", 2) {
        return value;
    }

    // Legacy octal: 017 === 15, while 019 is decimal
    if text.len() > 1
        && text.starts_with('0')
        && text.bytes().all(|b| b.is_ascii_digit())
        && text.bytes().all(|b| b < b'8')
    {
        return radix_value(&text[1..], 8);
    }

    let mut normalized = text;
    if normalized.starts_with('.') {
        normalized.insert(0, '0');
    }
    if let Some(dot) = normalized.find('.') {
        let after = normalized[dot + 1..].chars().next();
        if !matches!(after, Some(c) if c.is_ascii_digit()) {
            normalized.insert(dot + 1, '0');
        }
    }

    normalized.parse::<f64>().ok()
}

fn radix_value(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    })
}

/// Decode the text between the quotes of a string literal.
/// On failure returns the offending escape sequence.
pub(crate) fn decode_string_content(content: &str) -> Result<String, String> {
    let mut value = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }

        let escape = chars.next().ok_or_else(|| "\\".to_string())?;
        match escape {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            'b' => value.push('\u{8}'),
            'f' => value.push('\u{c}'),
            'v' => value.push('\u{b}'),
            // Line continuations contribute nothing
            '\n' | '\u{2028}' | '\u{2029}' => {}
            '\r' => {
                chars.next_if_eq(&'\n');
            }
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 2)
                    .ok_or_else(|| format!("\\x{}", hex))?;
                value.push(char::from_u32(code).ok_or_else(|| format!("\\x{}", hex))?);
            }
            'u' => {
                let code = read_unicode_escape(&mut chars)?;
                if (0xD800..0xDC00).contains(&code) {
                    // High surrogate: pair it with a following \uXXXX low surrogate
                    let mut lookahead = chars.clone();
                    let low = match (lookahead.next(), lookahead.next()) {
                        (Some('\\'), Some('u')) => read_unicode_escape(&mut lookahead).ok(),
                        _ => None,
                    };
                    match low {
                        Some(low) if (0xDC00..0xE000).contains(&low) => {
                            chars = lookahead;
                            let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                            value.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                        }
                        _ => value.push('\u{FFFD}'),
                    }
                } else {
                    value.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
                }
            }
            '0'..='7' => {
                // \0 alone is NUL; longer runs are legacy octal escapes
                let mut code = escape.to_digit(8).unwrap_or(0);
                let max_digits = if escape <= '3' { 2 } else { 1 };
                for _ in 0..max_digits {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                value.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            other => value.push(other),
        }
    }

    Ok(value)
}

/// Read the part of a `\u` escape after the `u`: `XXXX` or `{X...}`
fn read_unicode_escape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<u32, String> {
    if chars.next_if_eq(&'{').is_some() {
        let mut hex = String::new();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                _ => return Err(format!("\\u{{{}", hex)),
            }
        }
        return u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|code| *code <= 0x10FFFF)
            .ok_or_else(|| format!("\\u{{{}}}", hex));
    }

    let hex: String = chars.by_ref().take(4).collect();
    u32::from_str_radix(&hex, 16)
        .ok()
        .filter(|_| hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| format!("\\u{}", hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_values() {
        assert_eq!(parse_number_value("42"), Some(42.0));
        assert_eq!(parse_number_value("0x1F"), Some(31.0));
        assert_eq!(parse_number_value("0o17"), Some(15.0));
        assert_eq!(parse_number_value("0b101"), Some(5.0));
        assert_eq!(parse_number_value("017"), Some(15.0));
        assert_eq!(parse_number_value("019"), Some(19.0));
        assert_eq!(parse_number_value(".5"), Some(0.5));
        assert_eq!(parse_number_value("1."), Some(1.0));
        assert_eq!(parse_number_value("1.e2"), Some(100.0));
        assert_eq!(parse_number_value("1_000"), Some(1000.0));
        assert_eq!(parse_number_value("2.5e-3"), Some(0.0025));
    }

    #[test]
    fn test_decode_simple_escapes() {
        assert_eq!(decode_string_content(r"a\nb\tc").unwrap(), "a\nb\tc");
        assert_eq!(decode_string_content(r"\'\\").unwrap(), "'\\");
        assert_eq!(decode_string_content(r"\x41B\u{43}").unwrap(), "ABC");
    }

    #[test]
    fn test_decode_surrogate_pair() {
        assert_eq!(decode_string_content(r"\uD83D\uDE00").unwrap(), "😀");
        assert_eq!(decode_string_content(r"\uD83D").unwrap(), "\u{FFFD}");
    }

    #[test]
    fn test_decode_legacy_octal_and_continuation() {
        assert_eq!(decode_string_content(r"\0").unwrap(), "\0");
        assert_eq!(decode_string_content(r"\101").unwrap(), "A");
        assert_eq!(decode_string_content("a\\\nb").unwrap(), "ab");
    }

    #[test]
    fn test_decode_rejects_bad_hex() {
        assert_eq!(decode_string_content(r"\xZZ"), Err(r"\xZZ".to_string()));
        assert!(decode_string_content(r"\u12").is_err());
    }
}
