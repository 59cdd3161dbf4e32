// JavaScript parser
// Turns pest parse trees into the typed AST

use miette::SourceSpan;
use pest::Parser;
use pest_derive::Parser;

use crate::ast::*;
use crate::error::*;

mod collections;
mod control_flow;
mod expressions;
mod functions;
mod literals;
mod statements;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct JavaScriptParser;

impl JavaScriptParser {
    /// Parse a complete program
    pub fn parse_program(input: &str) -> ParseResult<Program> {
        Self::parse_program_with_source(input, None)
    }

    /// Parse a complete program, recording the file it came from
    pub fn parse_program_with_source(
        input: &str,
        source_file: Option<String>,
    ) -> ParseResult<Program> {
        let mut pairs = Self::parse(Rule::program, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let program_pair = pairs.next().ok_or_else(|| ParseError::MissingNode {
            src: input.to_string(),
            span: SourceSpan::new(0.into(), 0),
            expected: "program".to_string(),
        })?;

        let span = Self::span_from_pair(&program_pair);
        let mut body = Vec::new();

        for pair in program_pair.into_inner() {
            if matches!(pair.as_rule(), Rule::EOI | Rule::hashbang) {
                continue;
            }
            body.push(Self::parse_statement(pair).map_err(|e| e.with_source_code(input))?);
        }

        let source_type = if body
            .iter()
            .any(|statement| matches!(statement.kind, StatementKind::Import(_)))
        {
            SourceType::Module
        } else {
            SourceType::Script
        };

        Ok(Program {
            body,
            source_type,
            debug_info: DebugInfo::with_source_file(source_file),
            span,
        })
    }

    /// Parse a single expression
    pub fn parse_expression(input: &str) -> ParseResult<Expression> {
        let mut pairs = Self::parse(Rule::expression_input, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let input_pair = pairs.next().ok_or_else(|| ParseError::MissingNode {
            src: input.to_string(),
            span: SourceSpan::new(0.into(), 0),
            expected: "expression".to_string(),
        })?;
        let span = Self::span_from_pair(&input_pair);
        let expression_pair = Self::expect_inner(input_pair.into_inner(), "expression", &span)
            .map_err(|e| e.with_source_code(input))?;

        Self::parse_expression_from_pair(expression_pair).map_err(|e| e.with_source_code(input))
    }

    /// Span covering a whole pair
    pub(crate) fn span_from_pair(pair: &pest::iterators::Pair<Rule>) -> Span {
        let pest_span = pair.as_span();
        Span::new(pest_span.start(), pest_span.end())
    }

    pub(crate) fn span_from_range(start: usize, end: usize) -> Span {
        Span::new(start, end)
    }

    /// Take the next child of a node, failing when the grammar left it out
    pub(crate) fn expect_inner<'i>(
        mut pairs: pest::iterators::Pairs<'i, Rule>,
        expected: &str,
        span: &Span,
    ) -> ParseResult<pest::iterators::Pair<'i, Rule>> {
        pairs.next().ok_or_else(|| Self::missing_node(expected, span))
    }

    /// Same as `expect_inner`, for callers that keep consuming the iterator
    pub(crate) fn next_inner<'i>(
        pairs: &mut pest::iterators::Pairs<'i, Rule>,
        expected: &str,
        span: &Span,
    ) -> ParseResult<pest::iterators::Pair<'i, Rule>> {
        pairs.next().ok_or_else(|| Self::missing_node(expected, span))
    }

    pub(crate) fn missing_node(expected: &str, span: &Span) -> ParseError {
        ParseError::MissingNode {
            src: String::new(),
            span: span.into(),
            expected: expected.to_string(),
        }
    }

    pub(crate) fn unexpected_rule(expected: &str, pair: &pest::iterators::Pair<Rule>) -> ParseError {
        ParseError::UnexpectedRule {
            src: String::new(),
            span: (&Self::span_from_pair(pair)).into(),
            expected: expected.to_string(),
            found: pair.as_rule(),
        }
    }

    /// Helper for literal errors that carry the offending text
    pub(crate) fn create_parse_error<F>(span: &Span, text: &str, error_fn: F) -> ParseError
    where
        F: FnOnce(String, miette::SourceSpan, String) -> ParseError,
    {
        error_fn(String::new(), span.into(), text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_rule_accepts_empty_input() {
        let program = JavaScriptParser::parse_program("").unwrap();
        assert!(program.body.is_empty());
        assert_eq!(program.source_type, SourceType::Script);
    }

    #[test]
    fn test_imports_mark_program_as_module() {
        let program = JavaScriptParser::parse_program("import a from './mod_1';").unwrap();
        assert_eq!(program.source_type, SourceType::Module);
    }

    #[test]
    fn test_source_file_is_recorded() {
        let program =
            JavaScriptParser::parse_program_with_source("a;", Some("bundle.js".to_string()))
                .unwrap();
        assert_eq!(program.debug_info.source_file.as_deref(), Some("bundle.js"));
    }
}
