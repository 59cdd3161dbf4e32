//! Registration call decoding
//!
//! Validates the arguments of one registration call and turns it into a
//! [`Module`]. Checks run in a fixed order and stop at the first failure:
//! factory function, module id, dependency array, then factory parameters.

use rn_debundle_parser::{
    Argument, ArrayElement, ArrowBody, ArrowFunction, Expression, ExpressionKind, Identifier,
    Pattern, Span, Statement,
};

use crate::config::RegistrationPattern;
use crate::error::ShapeError;
use crate::module::{Module, ModuleId, ModuleImplementation, RegistrationCall};

/// Description used when the call has no argument at a configured position
const MISSING_ARGUMENT: &str = "no argument";

/// Decode a detached registration call
pub fn decode_module(
    registration: RegistrationCall,
    pattern: &RegistrationPattern,
) -> Result<Module, ShapeError> {
    let RegistrationCall { call, span } = registration;
    let positions = pattern.arguments;

    let mut arguments: Vec<Option<Argument>> = call.arguments.into_iter().map(Some).collect();
    let mut take = |index: usize| arguments.get_mut(index).and_then(Option::take);
    let factory = take(positions.implementation);
    let id = take(positions.id);
    let dependencies = take(positions.dependencies);

    let (params, body, implementation_span) = decode_factory(factory, &span)?;
    let id = decode_id(id.as_ref(), &span)?;
    let dependencies = decode_dependencies(dependencies.as_ref(), &span)?;
    let parameters = decode_parameters(params)?;

    Ok(Module {
        id,
        implementation: ModuleImplementation {
            parameters,
            body,
            span: implementation_span,
        },
        dependencies,
        span,
    })
}

/// Split the factory argument into its raw parameters and body
fn decode_factory(
    argument: Option<Argument>,
    call_span: &Span,
) -> Result<(Vec<Pattern>, Vec<Statement>, Span), ShapeError> {
    let expression = match argument {
        Some(Argument::Expression(expression)) => expression,
        Some(Argument::Spread(expression)) => {
            return Err(ShapeError::expected_function_literal(
                "spread argument",
                &expression.span,
            ))
        }
        None => return Err(ShapeError::expected_function_literal(MISSING_ARGUMENT, call_span)),
    };

    match expression.kind {
        ExpressionKind::Function(function) => Ok((function.params, function.body, expression.span)),
        ExpressionKind::Arrow(ArrowFunction {
            params,
            body: ArrowBody::Block(body),
            ..
        }) => Ok((params, body, expression.span)),
        ExpressionKind::Arrow(_) => Err(ShapeError::expected_function_literal(
            "arrow function with an expression body",
            &expression.span,
        )),
        kind => {
            let expression = Expression::new(kind, expression.span);
            Err(ShapeError::expected_function_literal(
                expression.describe(),
                &expression.span,
            ))
        }
    }
}

fn decode_id(argument: Option<&Argument>, call_span: &Span) -> Result<ModuleId, ShapeError> {
    let expression = match argument {
        Some(Argument::Expression(expression)) => expression,
        Some(Argument::Spread(expression)) => {
            return Err(ShapeError::expected_literal_id("spread argument", &expression.span))
        }
        None => return Err(ShapeError::expected_literal_id(MISSING_ARGUMENT, call_span)),
    };

    literal_id(expression)
        .ok_or_else(|| ShapeError::expected_literal_id(expression.describe(), &expression.span))
}

fn decode_dependencies(
    argument: Option<&Argument>,
    call_span: &Span,
) -> Result<Vec<ModuleId>, ShapeError> {
    let expression = match argument {
        Some(Argument::Expression(expression)) => expression,
        Some(Argument::Spread(expression)) => {
            return Err(ShapeError::expected_dependency_array(
                "spread argument",
                &expression.span,
            ))
        }
        None => return Err(ShapeError::expected_dependency_array(MISSING_ARGUMENT, call_span)),
    };

    let ExpressionKind::Array(array) = &expression.kind else {
        return Err(ShapeError::expected_dependency_array(
            expression.describe(),
            &expression.span,
        ));
    };

    array
        .elements
        .iter()
        .map(|element| match element {
            ArrayElement::Expression(element) => literal_id(element).ok_or_else(|| {
                ShapeError::expected_dependency_array(element.describe(), &element.span)
            }),
            ArrayElement::Spread(element) => Err(ShapeError::expected_dependency_array(
                "spread element",
                &element.span,
            )),
            // Holes carry no span of their own
            ArrayElement::Hole => Err(ShapeError::expected_dependency_array(
                "array hole",
                &expression.span,
            )),
        })
        .collect()
}

fn decode_parameters(params: Vec<Pattern>) -> Result<Vec<Identifier>, ShapeError> {
    params
        .into_iter()
        .map(|param| match param {
            Pattern::Identifier(identifier) => Ok(identifier),
            other => Err(ShapeError::expected_identifier_parameter(
                other.describe(),
                other.span(),
            )),
        })
        .collect()
}

fn literal_id(expression: &Expression) -> Option<ModuleId> {
    match &expression.kind {
        ExpressionKind::Literal(literal) => ModuleId::from_literal(literal),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_modules;
    use pretty_assertions::assert_eq;
    use rn_debundle_parser::parse_program;

    fn decode(source: &str) -> Result<Module, ShapeError> {
        let program = parse_program(source).unwrap();
        let pattern = RegistrationPattern::default();
        let mut extraction = extract_modules(program, &pattern);
        assert_eq!(extraction.calls.len(), 1, "Expected one registration in {:?}", source);
        decode_module(extraction.calls.remove(0), &pattern)
    }

    #[test]
    fn test_decodes_metro_registration() {
        let module =
            decode("__d(function (g, r, i, a, m, e, d) { e.exports = r(d[0]); }, 42, [7, 9]);")
                .unwrap();

        assert_eq!(module.id, ModuleId::new("42"));
        assert_eq!(module.dependencies, vec![ModuleId::new("7"), ModuleId::new("9")]);
        let names: Vec<_> = module
            .implementation
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["g", "r", "i", "a", "m", "e", "d"]);
        assert_eq!(module.implementation.body.len(), 1);
    }

    #[test]
    fn test_accepts_block_bodied_arrow() {
        let module = decode("__d((a, b) => { a(); }, 'x', ['y']);").unwrap();
        assert_eq!(module.id, ModuleId::new("x"));
        assert_eq!(module.implementation.parameters.len(), 2);
    }

    #[test]
    fn test_rejects_non_function_factory() {
        let error = decode("__d(factory, 1, []);").unwrap_err();
        assert!(matches!(error, ShapeError::ExpectedFunctionLiteral { .. }));
        assert_eq!(error.found(), "identifier reference");

        let error = decode("__d(() => 1, 1, []);").unwrap_err();
        assert_eq!(error.found(), "arrow function with an expression body");

        let error = decode("__d();").unwrap_err();
        assert_eq!(error.found(), "no argument");
    }

    #[test]
    fn test_rejects_non_literal_id() {
        let error = decode("__d(function () {}, moduleId, []);").unwrap_err();
        assert!(matches!(error, ShapeError::ExpectedLiteralId { .. }));
        assert_eq!(error.to_string(), "expected literal module id");
    }

    #[test]
    fn test_rejects_bad_dependency_arrays() {
        for (source, found) in [
            ("__d(function () {}, 1, deps);", "identifier reference"),
            ("__d(function () {}, 1, [a]);", "identifier reference"),
            ("__d(function () {}, 1, [1, , 2]);", "array hole"),
            ("__d(function () {}, 1, [...rest]);", "spread element"),
            ("__d(function () {}, 1);", "no argument"),
        ] {
            let error = decode(source).unwrap_err();
            assert!(
                matches!(error, ShapeError::ExpectedDependencyArray { .. }),
                "{}",
                source
            );
            assert_eq!(error.found(), found, "{}", source);
        }
    }

    #[test]
    fn test_rejects_destructured_parameter() {
        let error = decode("__d(function ({ a }) {}, 1, [2]);").unwrap_err();
        assert!(matches!(error, ShapeError::ExpectedIdentifierParameter { .. }));

        let error = decode("__d(function (a = 1) {}, 1, [2]);").unwrap_err();
        assert!(matches!(error, ShapeError::ExpectedIdentifierParameter { .. }));
    }

    #[test]
    fn test_factory_is_checked_before_id() {
        let error = decode("__d(factory, moduleId, deps);").unwrap_err();
        assert!(matches!(error, ShapeError::ExpectedFunctionLiteral { .. }));
    }

    #[test]
    fn test_error_span_points_at_offending_node() {
        let source = "__d(function () {}, moduleId, []);";
        let error = decode(source).unwrap_err();
        let span = error.span();
        assert_eq!(&source[span.offset()..span.offset() + span.len()], "moduleId");
    }

    #[test]
    fn test_custom_argument_positions() {
        let program = parse_program("define('a', ['b'], function (b) {});").unwrap();
        let pattern = RegistrationPattern::new()
            .with_marker_name("define")
            .with_arguments(crate::config::ArgumentPositions {
                implementation: 2,
                id: 0,
                dependencies: 1,
            });
        let mut extraction = extract_modules(program, &pattern);
        let module = decode_module(extraction.calls.remove(0), &pattern).unwrap();

        assert_eq!(module.id, ModuleId::new("a"));
        assert_eq!(module.dependencies, vec![ModuleId::new("b")]);
    }
}
