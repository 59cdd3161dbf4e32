// JavaScript Parser Library
// Pest-based parser and code generator for React Native bundles

pub mod ast;
pub mod codegen;
pub mod error;
pub mod parser;

pub use ast::*;
pub use codegen::*;
pub use error::*;
pub use parser::*;

// Re-export parser rule for manual testing
pub use parser::Rule;

// Main parsing functions
pub fn parse_program(input: &str) -> Result<Program, ParseError> {
    parser::JavaScriptParser::parse_program(input)
}

pub fn parse_program_with_source(
    input: &str,
    source_file: Option<String>,
) -> Result<Program, ParseError> {
    parser::JavaScriptParser::parse_program_with_source(input, source_file)
}

pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    parser::JavaScriptParser::parse_expression(input)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
