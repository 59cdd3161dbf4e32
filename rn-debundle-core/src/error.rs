//! Error types for debundling
//!
//! Follows the parser's miette patterns so every failure renders against the
//! bundle source with a label on the offending node.

use std::path::PathBuf;

use miette::{Diagnostic, SourceSpan};
use rn_debundle_parser::{ParseError, Span};
use thiserror::Error;

/// A registration call whose arguments do not have the expected shape
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("expected function literal")]
    #[diagnostic(
        code(rn_debundle::shape::function_literal),
        help("The module factory must be a `function` expression or an arrow function with a block body")
    )]
    ExpectedFunctionLiteral {
        found: String,
        #[label("found {found}")]
        span: SourceSpan,
    },

    #[error("expected literal module id")]
    #[diagnostic(
        code(rn_debundle::shape::module_id),
        help("Module ids must be string or number literals")
    )]
    ExpectedLiteralId {
        found: String,
        #[label("found {found}")]
        span: SourceSpan,
    },

    #[error("expected literal dependency array")]
    #[diagnostic(
        code(rn_debundle::shape::dependency_array),
        help("Dependencies must be an array literal of string or number literals, without holes or spreads")
    )]
    ExpectedDependencyArray {
        found: String,
        #[label("found {found}")]
        span: SourceSpan,
    },

    #[error("expected identifier parameter")]
    #[diagnostic(
        code(rn_debundle::shape::parameter),
        help("Factory parameters are bound to dependencies and must be plain identifiers")
    )]
    ExpectedIdentifierParameter {
        found: String,
        #[label("found {found}")]
        span: SourceSpan,
    },
}

impl ShapeError {
    pub fn expected_function_literal(found: impl Into<String>, span: &Span) -> Self {
        Self::ExpectedFunctionLiteral {
            found: found.into(),
            span: span.into(),
        }
    }

    pub fn expected_literal_id(found: impl Into<String>, span: &Span) -> Self {
        Self::ExpectedLiteralId {
            found: found.into(),
            span: span.into(),
        }
    }

    pub fn expected_dependency_array(found: impl Into<String>, span: &Span) -> Self {
        Self::ExpectedDependencyArray {
            found: found.into(),
            span: span.into(),
        }
    }

    pub fn expected_identifier_parameter(found: impl Into<String>, span: &Span) -> Self {
        Self::ExpectedIdentifierParameter {
            found: found.into(),
            span: span.into(),
        }
    }

    /// Description of the node that failed validation
    pub fn found(&self) -> &str {
        match self {
            Self::ExpectedFunctionLiteral { found, .. }
            | Self::ExpectedLiteralId { found, .. }
            | Self::ExpectedDependencyArray { found, .. }
            | Self::ExpectedIdentifierParameter { found, .. } => found,
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            Self::ExpectedFunctionLiteral { span, .. }
            | Self::ExpectedLiteralId { span, .. }
            | Self::ExpectedDependencyArray { span, .. }
            | Self::ExpectedIdentifierParameter { span, .. } => *span,
        }
    }
}

/// Any failure of a debundling run
#[derive(Error, Diagnostic, Debug)]
#[allow(clippy::result_large_err)]
pub enum DebundleError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Shape(#[from] ShapeError),

    #[error("Failed to read bundle {}", path.display())]
    #[diagnostic(code(rn_debundle::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}", path.display())]
    #[diagnostic(code(rn_debundle::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to write `{file_name}` outside the output directory")]
    #[diagnostic(
        code(rn_debundle::write::unsafe_file_name),
        help("Module ids containing path separators cannot be used as file names")
    )]
    UnsafeFileName { file_name: String },

    #[error("Failed to start the debundling thread")]
    #[diagnostic(code(rn_debundle::worker))]
    Worker(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_messages() {
        let span = Span::new(4, 9);
        let error = ShapeError::expected_literal_id("identifier reference", &span);

        assert_eq!(error.to_string(), "expected literal module id");
        assert_eq!(error.found(), "identifier reference");
        assert_eq!(error.span(), SourceSpan::new(4.into(), 5));
    }

    #[test]
    fn test_shape_error_converts_into_debundle_error() {
        let error: DebundleError =
            ShapeError::expected_function_literal("nothing", &Span::new(0, 0)).into();
        assert!(matches!(error, DebundleError::Shape(_)));
        assert_eq!(error.to_string(), "expected function literal");
    }
}
