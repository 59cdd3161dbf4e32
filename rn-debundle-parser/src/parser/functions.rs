// Function parsing functions for the JavaScript parser
// Handles functions, arrows, classes, methods, parameters and binding patterns

use super::{JavaScriptParser, Rule};
use crate::ast::*;
use crate::error::*;

impl JavaScriptParser {
    /// Parse a function declaration or function expression
    pub(crate) fn parse_function(pair: pest::iterators::Pair<Rule>) -> ParseResult<Function> {
        let span = Self::span_from_pair(&pair);
        let mut id = None;
        let mut params = None;
        let mut body = None;
        let mut is_async = false;
        let mut is_generator = false;

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::async_marker => is_async = true,
                Rule::generator_marker => is_generator = true,
                Rule::identifier => id = Some(Self::parse_identifier(inner_pair)),
                Rule::formal_parameters => params = Some(Self::parse_formal_parameters(inner_pair)?),
                Rule::function_body => body = Some(Self::parse_function_body(inner_pair)?),
                _ => return Err(Self::unexpected_rule("function component", &inner_pair)),
            }
        }

        Ok(Function {
            id,
            params: params.ok_or_else(|| Self::missing_node("parameter list", &span))?,
            body: body.ok_or_else(|| Self::missing_node("function body", &span))?,
            is_async,
            is_generator,
            span,
        })
    }

    pub(super) fn parse_formal_parameters(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<Vec<Pattern>> {
        pair.into_inner().map(Self::parse_parameter).collect()
    }

    /// Parse a rest_element or binding_element
    fn parse_parameter(pair: pest::iterators::Pair<Rule>) -> ParseResult<Pattern> {
        match pair.as_rule() {
            Rule::rest_element => Ok(Pattern::Rest(Self::parse_rest_element(pair)?)),
            Rule::binding_element => Self::parse_binding_element(pair),
            _ => Err(Self::unexpected_rule("parameter", &pair)),
        }
    }

    pub(super) fn parse_function_body(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<Vec<Statement>> {
        Self::parse_statement_list(pair.into_inner())
    }

    pub(super) fn parse_arrow_function(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<ArrowFunction> {
        let span = Self::span_from_pair(&pair);
        let mut params = Vec::new();
        let mut body = None;
        let mut is_async = false;

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::async_marker => is_async = true,
                Rule::identifier => params.push(Pattern::Identifier(Self::parse_identifier(inner_pair))),
                Rule::formal_parameters => params = Self::parse_formal_parameters(inner_pair)?,
                Rule::arrow_body => body = Some(Self::parse_arrow_body(inner_pair)?),
                _ => return Err(Self::unexpected_rule("arrow function component", &inner_pair)),
            }
        }

        Ok(ArrowFunction {
            params,
            body: body.ok_or_else(|| Self::missing_node("arrow body", &span))?,
            is_async,
            span,
        })
    }

    fn parse_arrow_body(pair: pest::iterators::Pair<Rule>) -> ParseResult<ArrowBody> {
        let span = Self::span_from_pair(&pair);
        let inner = Self::expect_inner(pair.into_inner(), "arrow body", &span)?;

        match inner.as_rule() {
            Rule::function_body => Ok(ArrowBody::Block(Self::parse_function_body(inner)?)),
            _ => Ok(ArrowBody::Expression(Box::new(
                Self::parse_expression_from_pair(inner)?,
            ))),
        }
    }

    /// Parse a class declaration or class expression
    pub(crate) fn parse_class(pair: pest::iterators::Pair<Rule>) -> ParseResult<Class> {
        let span = Self::span_from_pair(&pair);
        let mut id = None;
        let mut super_class = None;
        let mut body = Vec::new();

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::identifier => id = Some(Self::parse_identifier(inner_pair)),
                Rule::class_heritage => {
                    let heritage_span = Self::span_from_pair(&inner_pair);
                    let parent =
                        Self::expect_inner(inner_pair.into_inner(), "superclass", &heritage_span)?;
                    super_class = Some(Box::new(Self::parse_expression_from_pair(parent)?));
                }
                Rule::class_body => {
                    for member in inner_pair.into_inner() {
                        body.push(Self::parse_class_member(member)?);
                    }
                }
                _ => return Err(Self::unexpected_rule("class component", &inner_pair)),
            }
        }

        Ok(Class {
            id,
            super_class,
            body,
            span,
        })
    }

    fn parse_class_member(pair: pest::iterators::Pair<Rule>) -> ParseResult<ClassMember> {
        let span = Self::span_from_pair(&pair);
        let rule = pair.as_rule();
        let mut inner = pair.into_inner().peekable();

        let is_static = inner
            .next_if(|p| p.as_rule() == Rule::static_marker)
            .is_some();

        match rule {
            Rule::class_method => {
                let method_pair = inner
                    .next()
                    .ok_or_else(|| Self::missing_node("method", &span))?;
                Ok(ClassMember::Method {
                    is_static,
                    method: Self::parse_method_definition(method_pair)?,
                })
            }
            Rule::class_field => {
                let key_pair = inner
                    .next()
                    .ok_or_else(|| Self::missing_node("field name", &span))?;
                let key = Self::parse_property_key(key_pair)?;
                let value = inner
                    .next()
                    .map(Self::parse_expression_from_pair)
                    .transpose()?;
                Ok(ClassMember::Field {
                    is_static,
                    key,
                    value,
                    span,
                })
            }
            _ => Err(Self::missing_node("class member", &span)),
        }
    }

    /// Parse getter_method, setter_method or method
    pub(super) fn parse_method_definition(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<MethodDefinition> {
        let span = Self::span_from_pair(&pair);
        let kind = match pair.as_rule() {
            Rule::getter_method => MethodKind::Getter,
            Rule::setter_method => MethodKind::Setter,
            Rule::method => MethodKind::Method,
            _ => return Err(Self::unexpected_rule("method", &pair)),
        };

        let mut key = None;
        let mut params = Vec::new();
        let mut body = None;
        let mut is_async = false;
        let mut is_generator = false;

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::async_marker => is_async = true,
                Rule::generator_marker => is_generator = true,
                Rule::property_key => key = Some(Self::parse_property_key(inner_pair)?),
                Rule::formal_parameters => params = Self::parse_formal_parameters(inner_pair)?,
                Rule::rest_element | Rule::binding_element => {
                    params.push(Self::parse_parameter(inner_pair)?)
                }
                Rule::function_body => body = Some(Self::parse_function_body(inner_pair)?),
                _ => return Err(Self::unexpected_rule("method component", &inner_pair)),
            }
        }

        let function = Function {
            id: None,
            params,
            body: body.ok_or_else(|| Self::missing_node("method body", &span))?,
            is_async,
            is_generator,
            span: span.clone(),
        };

        Ok(MethodDefinition {
            kind,
            key: key.ok_or_else(|| Self::missing_node("method name", &span))?,
            function,
            span,
        })
    }

    pub(crate) fn parse_property_key(pair: pest::iterators::Pair<Rule>) -> ParseResult<PropertyKey> {
        let span = Self::span_from_pair(&pair);
        let inner = Self::expect_inner(pair.into_inner(), "property key", &span)?;

        match inner.as_rule() {
            Rule::computed_key => {
                let computed_span = Self::span_from_pair(&inner);
                let expression =
                    Self::expect_inner(inner.into_inner(), "computed key", &computed_span)?;
                Ok(PropertyKey::Computed(Box::new(
                    Self::parse_expression_from_pair(expression)?,
                )))
            }
            Rule::identifier_name => Ok(PropertyKey::Identifier(Self::parse_identifier(inner))),
            Rule::private_name => Ok(PropertyKey::Private(Self::parse_identifier(inner))),
            Rule::string_literal => Ok(PropertyKey::String(Self::parse_string_literal(inner)?)),
            Rule::numeric_literal => match Self::parse_numeric_literal(inner)? {
                Literal::Number(number) => Ok(PropertyKey::Number(number)),
                _ => Err(Self::create_parse_error(
                    &span,
                    "BigInt property key",
                    ParseError::invalid_number,
                )),
            },
            _ => Err(Self::unexpected_rule("property key", &inner)),
        }
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    /// Parse identifier, array_pattern or object_pattern
    pub(crate) fn parse_binding_target(pair: pest::iterators::Pair<Rule>) -> ParseResult<Pattern> {
        match pair.as_rule() {
            Rule::identifier => Ok(Pattern::Identifier(Self::parse_identifier(pair))),
            Rule::array_pattern => Self::parse_array_pattern(pair),
            Rule::object_pattern => Self::parse_object_pattern(pair),
            _ => Err(Self::unexpected_rule("binding pattern", &pair)),
        }
    }

    /// A binding target with an optional default value
    fn parse_binding_element(pair: pest::iterators::Pair<Rule>) -> ParseResult<Pattern> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let target = Self::parse_binding_target(Self::next_inner(&mut inner, "binding", &span)?)?;

        match inner.next() {
            Some(default) => Ok(Pattern::Assignment(AssignmentPattern {
                target: Box::new(target),
                default: Box::new(Self::parse_expression_from_pair(default)?),
                span,
            })),
            None => Ok(target),
        }
    }

    fn parse_rest_element(pair: pest::iterators::Pair<Rule>) -> ParseResult<RestElement> {
        let span = Self::span_from_pair(&pair);
        let target = Self::expect_inner(pair.into_inner(), "rest binding", &span)?;

        Ok(RestElement {
            argument: Box::new(Self::parse_binding_target(target)?),
            span,
        })
    }

    fn parse_array_pattern(pair: pest::iterators::Pair<Rule>) -> ParseResult<Pattern> {
        let span = Self::span_from_pair(&pair);
        let mut elements = Vec::new();

        for element in pair.into_inner() {
            match element.as_rule() {
                Rule::pattern_hole => elements.push(None),
                _ => elements.push(Some(Self::parse_parameter(element)?)),
            }
        }

        Ok(Pattern::Array(ArrayPattern { elements, span }))
    }

    fn parse_object_pattern(pair: pest::iterators::Pair<Rule>) -> ParseResult<Pattern> {
        let span = Self::span_from_pair(&pair);
        let mut properties = Vec::new();

        for property in pair.into_inner() {
            let property_span = Self::span_from_pair(&property);
            match property.as_rule() {
                Rule::rest_element => {
                    properties.push(ObjectPatternProperty::Rest(Self::parse_rest_element(property)?))
                }
                Rule::pattern_property => {
                    let mut inner = property.into_inner();
                    let key = Self::parse_property_key(Self::next_inner(
                        &mut inner,
                        "property key",
                        &property_span,
                    )?)?;
                    let value = Self::parse_binding_element(Self::next_inner(
                        &mut inner,
                        "binding",
                        &property_span,
                    )?)?;
                    properties.push(ObjectPatternProperty::KeyValue { key, value });
                }
                Rule::shorthand_pattern => {
                    let mut inner = property.into_inner();
                    let name = Self::parse_identifier(Self::next_inner(
                        &mut inner,
                        "binding name",
                        &property_span,
                    )?);
                    let default = inner
                        .next()
                        .map(Self::parse_expression_from_pair)
                        .transpose()?;
                    properties.push(ObjectPatternProperty::Shorthand { name, default });
                }
                _ => return Err(Self::unexpected_rule("object pattern property", &property)),
            }
        }

        Ok(Pattern::Object(ObjectPattern { properties, span }))
    }
}
