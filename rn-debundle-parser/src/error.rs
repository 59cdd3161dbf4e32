// JavaScript Parser Error Handling
// Error reporting with miette integration

use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

const DEFAULT_SYNTAX_HELP: &str = "Check the syntax near the highlighted location";

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("Parse error")]
    #[diagnostic(code(rn_debundle::parse::syntax_error), help("{message}"))]
    PestError {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        span: SourceSpan,
        /// What the parser expected at the error position, with hints
        message: String,
    },

    #[error("Invalid number literal")]
    #[diagnostic(
        code(rn_debundle::parse::invalid_number),
        help("Number literals must be decimal, 0x, 0o or 0b integers, or decimal fractions")
    )]
    InvalidNumber {
        #[source_code]
        src: String,
        #[label("invalid number")]
        span: SourceSpan,
        found: String,
    },

    #[error("Invalid string escape sequence")]
    #[diagnostic(
        code(rn_debundle::parse::invalid_string_escape),
        help("Valid escape sequences: \\n, \\t, \\r, \\xHH, \\uXXXX, \\u{{X...}}")
    )]
    InvalidStringEscape {
        #[source_code]
        src: String,
        #[label("invalid escape sequence")]
        span: SourceSpan,
        found: String,
    },

    #[error("Invalid assignment target")]
    #[diagnostic(
        code(rn_debundle::parse::invalid_assignment_target),
        help("Only identifiers, member expressions and destructuring patterns can be assigned")
    )]
    InvalidAssignmentTarget {
        #[source_code]
        src: String,
        #[label("cannot be assigned to")]
        span: SourceSpan,
    },

    #[error("Unexpected grammar rule")]
    #[diagnostic(
        code(rn_debundle::parse::unexpected_rule),
        help("Expected rule: {expected}")
    )]
    UnexpectedRule {
        #[source_code]
        src: String,
        #[label("found {found:?}")]
        span: SourceSpan,
        expected: String,
        found: Rule,
    },

    #[error("Missing syntax node")]
    #[diagnostic(
        code(rn_debundle::parse::missing_node),
        help("Expected {expected} inside this construct")
    )]
    MissingNode {
        #[source_code]
        src: String,
        #[label("incomplete construct")]
        span: SourceSpan,
        expected: String,
    },
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 1),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError {
                positives,
                negatives: _,
            } => {
                let mut message_parts = Vec::new();

                if !positives.is_empty() {
                    let expected_descriptions: Vec<String> = positives
                        .iter()
                        .map(rule_to_user_friendly_description)
                        .collect();

                    if expected_descriptions.len() == 1 {
                        message_parts.push(format!("Expected {}", expected_descriptions[0]));
                    } else {
                        let mut expected = "Expected one of:".to_string();
                        for desc in expected_descriptions {
                            expected.push_str(&format!("\n   • {}", desc));
                        }
                        message_parts.push(expected);
                    }
                }

                let location_context = get_parsing_context(&src, &error.location);
                if !location_context.is_empty() {
                    message_parts.push(format!("Context: {}", location_context));
                }

                let suggestions = get_suggestions_for_rules(positives);
                if !suggestions.is_empty() {
                    message_parts.push(format!("Suggestions:\n{}", suggestions));
                }

                if message_parts.is_empty() {
                    DEFAULT_SYNTAX_HELP.to_string()
                } else {
                    message_parts.join("\n")
                }
            }
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };

        ParseError::PestError {
            src,
            span,
            message,
        }
    }

    /// Create an invalid number error
    pub fn invalid_number(src: String, span: SourceSpan, found: String) -> Self {
        ParseError::InvalidNumber { src, span, found }
    }

    /// Create an invalid string escape error
    pub fn invalid_string_escape(src: String, span: SourceSpan, found: String) -> Self {
        ParseError::InvalidStringEscape { src, span, found }
    }

    /// The detailed message for syntax errors
    pub fn message(&self) -> Option<&str> {
        match self {
            ParseError::PestError { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Attach the full program text to errors raised while building the AST
    pub(crate) fn with_source_code(mut self, input: &str) -> Self {
        match &mut self {
            ParseError::PestError { src, .. }
            | ParseError::InvalidNumber { src, .. }
            | ParseError::InvalidStringEscape { src, .. }
            | ParseError::InvalidAssignmentTarget { src, .. }
            | ParseError::UnexpectedRule { src, .. }
            | ParseError::MissingNode { src, .. } => {
                if src.is_empty() {
                    *src = input.to_string();
                }
            }
        }
        self
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convert a parser rule to a user-friendly description
fn rule_to_user_friendly_description(rule: &Rule) -> String {
    match rule {
        // Literals
        Rule::numeric_literal => "a number (like 42, 0xFF, 1.5e3)".to_string(),
        Rule::string_literal => "a string (like 'text' or \"text\")".to_string(),
        Rule::template_literal => "a template literal (like `text ${value}`)".to_string(),
        Rule::regex_literal => "a regular expression (like /ab+c/g)".to_string(),
        Rule::boolean_literal => "a boolean (true or false)".to_string(),
        Rule::null_literal => "null".to_string(),
        Rule::array_literal => "an array (like [1, 2, 3])".to_string(),
        Rule::object_literal => "an object (like { key: value })".to_string(),

        // Identifiers
        Rule::identifier => "an identifier (like moduleName)".to_string(),
        Rule::identifier_name => "a property name".to_string(),
        Rule::private_name => "a private name (like #field)".to_string(),
        Rule::property_key => "a property key".to_string(),

        // Expressions
        Rule::expression => "an expression".to_string(),
        Rule::assignment_expression => "an expression".to_string(),
        Rule::conditional_expression => "an expression".to_string(),
        Rule::unary_expression => "an expression".to_string(),
        Rule::left_hand_side_expression => "a call or member expression".to_string(),
        Rule::arguments => "an argument list (like (a, b))".to_string(),
        Rule::assignment_operator => "an assignment operator (like = or +=)".to_string(),
        Rule::arrow_function => "an arrow function (like (a) => a)".to_string(),
        Rule::function_expression => "a function expression (function () { ... })".to_string(),
        Rule::function_body => "a function body ({ ... })".to_string(),
        Rule::formal_parameters => "a parameter list (like (a, b))".to_string(),

        // Statements
        Rule::block_statement => "a block ({ ... })".to_string(),
        Rule::variable_declaration => "a declaration (var, let or const)".to_string(),
        Rule::variable_kind => "var, let or const".to_string(),
        Rule::function_declaration => "a function declaration".to_string(),
        Rule::class_declaration => "a class declaration".to_string(),
        Rule::class_body => "a class body ({ ... })".to_string(),
        Rule::import_declaration => "an import declaration".to_string(),
        Rule::case_clause => "a case clause (case value:)".to_string(),
        Rule::default_clause => "a default clause (default:)".to_string(),
        Rule::catch_clause => "a catch clause".to_string(),
        Rule::finally_clause => "a finally clause".to_string(),

        // Operators
        Rule::op_nullish => "a nullish coalescing operator (??)".to_string(),
        Rule::op_logical_or => "a logical OR operator (||)".to_string(),
        Rule::op_logical_and => "a logical AND operator (&&)".to_string(),
        Rule::op_strict_equal => "a strict equality operator (===)".to_string(),
        Rule::op_equal => "an equality operator (==)".to_string(),
        Rule::op_less => "a less-than operator (<)".to_string(),
        Rule::op_greater => "a greater-than operator (>)".to_string(),
        Rule::op_add => "an addition operator (+)".to_string(),
        Rule::op_subtract => "a subtraction operator (-)".to_string(),
        Rule::op_multiply => "a multiplication operator (*)".to_string(),
        Rule::op_divide => "a division operator (/)".to_string(),
        Rule::update_operator => "an update operator (++ or --)".to_string(),

        // Structure
        Rule::program => "a program".to_string(),
        Rule::EOI => "end of input".to_string(),

        // Fallback for unknown rules
        _ => format!("a {:?}", rule).replace('_', " "),
    }
}

/// Get parsing context based on the location in source
fn get_parsing_context(source: &str, location: &pest::error::InputLocation) -> String {
    let position = match location {
        pest::error::InputLocation::Pos(pos) => *pos,
        pest::error::InputLocation::Span((start, _)) => *start,
    };

    let mut current_pos = 0;
    for (line_num, line) in source.split('\n').enumerate() {
        let line_end = current_pos + line.len();

        if position >= current_pos && position <= line_end {
            let trimmed = line.trim();
            let content_context = if trimmed.is_empty() {
                "on empty line".to_string()
            } else if trimmed.chars().count() > 80 {
                // Bundles are often minified onto a handful of very long lines
                let column = position - current_pos;
                let window_start = floor_char_boundary(line, column.saturating_sub(40));
                let window_end = floor_char_boundary(line, (column + 40).min(line.len()));
                format!("near: {}", line[window_start..window_end].trim())
            } else {
                format!("in: {}", trimmed)
            };

            return format!("line {}, {}", line_num + 1, content_context);
        }

        current_pos = line_end + 1;
    }

    "unknown location".to_string()
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Generate helpful suggestions based on expected rules
fn get_suggestions_for_rules(rules: &[Rule]) -> String {
    let mut suggestions = Vec::new();

    if rules.contains(&Rule::EOI) {
        suggestions.push("   • Check for an unbalanced closing bracket or brace".to_string());
    }

    if rules.contains(&Rule::expression) || rules.contains(&Rule::assignment_expression) {
        suggestions.push(
            "   • Try a literal (42, 'text', true), identifier, call or function expression"
                .to_string(),
        );
    }

    if rules.contains(&Rule::function_body) {
        suggestions.push("   • Function bodies are wrapped in braces: function () { ... }".to_string());
    }

    if rules.contains(&Rule::identifier) {
        suggestions
            .push("   • Reserved words such as `class` or `new` cannot be used as names".to_string());
    }

    suggestions.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_help_lists_expectations() {
        let error = crate::parse_program("var a = ;").unwrap_err();
        let help = error.help().map(|help| help.to_string()).unwrap_or_default();

        assert_eq!(error.message(), Some(help.as_str()));
        assert!(help.contains("Expected"), "{}", help);
        assert!(help.contains("Context: line 1, in: var a = ;"), "{}", help);
    }

    #[test]
    fn test_parsing_context_reports_line() {
        let source = "var a = 1;\nvar b = ;";
        let context = get_parsing_context(source, &pest::error::InputLocation::Pos(19));
        assert_eq!(context, "line 2, in: var b = ;");
    }

    #[test]
    fn test_parsing_context_windows_long_lines() {
        let source = format!("{}BROKEN{}", "a".repeat(100), "b".repeat(100));
        let context = get_parsing_context(&source, &pest::error::InputLocation::Pos(100));
        assert!(context.starts_with("line 1, near: "));
        assert!(context.contains("BROKEN"));
        assert!(context.len() < 100);
    }
}
