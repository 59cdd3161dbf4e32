// Collection parsing functions for the JavaScript parser
// Handles array and object literals

use super::{JavaScriptParser, Rule};
use crate::ast::*;
use crate::error::*;

impl JavaScriptParser {
    /// Parse an array literal, keeping holes and spreads in place
    pub(super) fn parse_array_literal(pair: pest::iterators::Pair<Rule>) -> ParseResult<ArrayLiteral> {
        let mut elements = Vec::new();

        for element in pair.into_inner() {
            let element = match element.as_rule() {
                Rule::array_hole => ArrayElement::Hole,
                Rule::spread_element => ArrayElement::Spread(Self::parse_spread_argument(element)?),
                _ => ArrayElement::Expression(Self::parse_expression_from_pair(element)?),
            };
            elements.push(element);
        }

        Ok(ArrayLiteral { elements })
    }

    /// Parse an object literal
    pub(super) fn parse_object_literal(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<ObjectLiteral> {
        let properties = pair
            .into_inner()
            .map(Self::parse_object_member)
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(ObjectLiteral { properties })
    }

    fn parse_object_member(pair: pest::iterators::Pair<Rule>) -> ParseResult<ObjectMember> {
        let span = Self::span_from_pair(&pair);

        match pair.as_rule() {
            Rule::spread_element => Ok(ObjectMember::Spread(Self::parse_spread_argument(pair)?)),
            Rule::getter_method | Rule::setter_method | Rule::method => {
                Ok(ObjectMember::Method(Self::parse_method_definition(pair)?))
            }
            Rule::key_value_property => {
                let mut inner = pair.into_inner();
                let key = Self::parse_property_key(Self::next_inner(
                    &mut inner,
                    "property key",
                    &span,
                )?)?;
                let value = Self::parse_expression_from_pair(Self::next_inner(
                    &mut inner,
                    "property value",
                    &span,
                )?)?;
                Ok(ObjectMember::KeyValue { key, value })
            }
            Rule::shorthand_property => {
                let mut inner = pair.into_inner();
                let name = Self::parse_identifier(Self::next_inner(&mut inner, "name", &span)?);
                let default = inner
                    .next()
                    .map(Self::parse_expression_from_pair)
                    .transpose()?
                    .map(Box::new);
                Ok(ObjectMember::Shorthand { name, default })
            }
            _ => Err(Self::unexpected_rule("object property", &pair)),
        }
    }
}
