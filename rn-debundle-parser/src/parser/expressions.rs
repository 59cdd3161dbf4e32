// Expression parsing module
// Handles operator precedence, assignments, calls and member access chains

use std::sync::OnceLock;

use pest::pratt_parser::{Assoc, Op, PrattParser};

use crate::ast::*;
use crate::error::*;
use crate::parser::{JavaScriptParser, Rule};

impl JavaScriptParser {
    /// Binary operator precedence parser
    /// Precedence levels from lowest to highest, following ECMAScript
    pub(crate) fn pratt_parser() -> &'static PrattParser<Rule> {
        static PRATT: OnceLock<PrattParser<Rule>> = OnceLock::new();

        PRATT.get_or_init(|| {
            PrattParser::new()
                // Level 1: Nullish coalescing
                .op(Op::infix(Rule::op_nullish, Assoc::Left))
                // Level 2: Logical OR
                .op(Op::infix(Rule::op_logical_or, Assoc::Left))
                // Level 3: Logical AND
                .op(Op::infix(Rule::op_logical_and, Assoc::Left))
                // Level 4: Bitwise OR
                .op(Op::infix(Rule::op_bitwise_or, Assoc::Left))
                // Level 5: Bitwise XOR
                .op(Op::infix(Rule::op_bitwise_xor, Assoc::Left))
                // Level 6: Bitwise AND
                .op(Op::infix(Rule::op_bitwise_and, Assoc::Left))
                // Level 7: Equality
                .op(Op::infix(Rule::op_equal, Assoc::Left)
                    | Op::infix(Rule::op_not_equal, Assoc::Left)
                    | Op::infix(Rule::op_strict_equal, Assoc::Left)
                    | Op::infix(Rule::op_strict_not_equal, Assoc::Left))
                // Level 8: Relational
                .op(Op::infix(Rule::op_less, Assoc::Left)
                    | Op::infix(Rule::op_less_equal, Assoc::Left)
                    | Op::infix(Rule::op_greater, Assoc::Left)
                    | Op::infix(Rule::op_greater_equal, Assoc::Left)
                    | Op::infix(Rule::op_instanceof, Assoc::Left)
                    | Op::infix(Rule::op_in, Assoc::Left))
                // Level 9: Shift
                .op(Op::infix(Rule::op_shift_left, Assoc::Left)
                    | Op::infix(Rule::op_shift_right, Assoc::Left)
                    | Op::infix(Rule::op_shift_right_unsigned, Assoc::Left))
                // Level 10: Additive
                .op(Op::infix(Rule::op_add, Assoc::Left) | Op::infix(Rule::op_subtract, Assoc::Left))
                // Level 11: Multiplicative
                .op(Op::infix(Rule::op_multiply, Assoc::Left)
                    | Op::infix(Rule::op_divide, Assoc::Left)
                    | Op::infix(Rule::op_modulo, Assoc::Left))
                // Level 12: Exponentiation (highest precedence, right associative)
                .op(Op::infix(Rule::op_exponent, Assoc::Right))
        })
    }

    /// Parse a binary expression chain using precedence climbing
    pub(crate) fn parse_expression_with_precedence(
        pairs: pest::iterators::Pairs<Rule>,
    ) -> ParseResult<Expression> {
        Self::pratt_parser()
            .map_primary(Self::parse_expression_from_pair)
            .map_infix(
                |left: ParseResult<Expression>,
                 op: pest::iterators::Pair<Rule>,
                 right: ParseResult<Expression>| {
                    let left = left?;
                    let right = right?;

                    let operator = match op.as_rule() {
                        Rule::op_nullish => BinaryOperator::NullishCoalescing,
                        // Logical operators
                        Rule::op_logical_or => BinaryOperator::LogicalOr,
                        Rule::op_logical_and => BinaryOperator::LogicalAnd,
                        // Bitwise operators
                        Rule::op_bitwise_or => BinaryOperator::BitwiseOr,
                        Rule::op_bitwise_xor => BinaryOperator::BitwiseXor,
                        Rule::op_bitwise_and => BinaryOperator::BitwiseAnd,
                        // Equality operators
                        Rule::op_equal => BinaryOperator::Equal,
                        Rule::op_not_equal => BinaryOperator::NotEqual,
                        Rule::op_strict_equal => BinaryOperator::StrictEqual,
                        Rule::op_strict_not_equal => BinaryOperator::StrictNotEqual,
                        // Relational operators
                        Rule::op_less => BinaryOperator::Less,
                        Rule::op_less_equal => BinaryOperator::LessEqual,
                        Rule::op_greater => BinaryOperator::Greater,
                        Rule::op_greater_equal => BinaryOperator::GreaterEqual,
                        Rule::op_instanceof => BinaryOperator::InstanceOf,
                        Rule::op_in => BinaryOperator::In,
                        // Shift operators
                        Rule::op_shift_left => BinaryOperator::ShiftLeft,
                        Rule::op_shift_right => BinaryOperator::ShiftRight,
                        Rule::op_shift_right_unsigned => BinaryOperator::ShiftRightUnsigned,
                        // Arithmetic operators
                        Rule::op_add => BinaryOperator::Add,
                        Rule::op_subtract => BinaryOperator::Subtract,
                        Rule::op_multiply => BinaryOperator::Multiply,
                        Rule::op_divide => BinaryOperator::Divide,
                        Rule::op_modulo => BinaryOperator::Modulo,
                        Rule::op_exponent => BinaryOperator::Exponent,
                        _ => return Err(Self::unexpected_rule("binary operator", &op)),
                    };

                    let span = Self::span_from_range(left.span.start, right.span.end);

                    Ok(Expression {
                        kind: ExpressionKind::Binary(BinaryOperation {
                            left: Box::new(left),
                            operator,
                            right: Box::new(right),
                        }),
                        span,
                    })
                },
            )
            .parse(pairs)
    }

    /// Parse an expression from any expression-producing pair
    pub(crate) fn parse_expression_from_pair(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);

        let kind = match pair.as_rule() {
            Rule::expression => {
                let mut expressions = pair
                    .into_inner()
                    .map(Self::parse_expression_from_pair)
                    .collect::<ParseResult<Vec<_>>>()?;
                if expressions.len() == 1 {
                    return expressions
                        .pop()
                        .ok_or_else(|| Self::missing_node("expression", &span));
                }
                ExpressionKind::Sequence(expressions)
            }
            Rule::assignment_expression => return Self::parse_assignment_expression(pair),
            Rule::conditional_expression => return Self::parse_conditional_expression(pair),
            Rule::binary_expression => {
                let inner = pair.into_inner();
                if inner.clone().nth(1).is_none() {
                    let operand = Self::expect_inner(inner, "operand", &span)?;
                    return Self::parse_expression_from_pair(operand);
                }
                return Self::parse_expression_with_precedence(inner);
            }
            Rule::unary_expression => return Self::parse_unary_expression(pair),
            Rule::left_hand_side_expression => return Self::parse_left_hand_side(pair),
            Rule::arrow_function => ExpressionKind::Arrow(Self::parse_arrow_function(pair)?),
            Rule::yield_expression => {
                let mut delegate = false;
                let mut argument = None;
                for inner_pair in pair.into_inner() {
                    match inner_pair.as_rule() {
                        Rule::generator_marker => delegate = true,
                        _ => {
                            argument = Some(Box::new(Self::parse_expression_from_pair(inner_pair)?))
                        }
                    }
                }
                ExpressionKind::Yield(YieldExpression { argument, delegate })
            }

            // Primary expressions
            Rule::identifier => ExpressionKind::Identifier(Self::parse_identifier(pair)),
            Rule::this_expression => ExpressionKind::This,
            Rule::super_expression => ExpressionKind::Super,
            Rule::null_literal => ExpressionKind::Literal(Literal::Null),
            Rule::boolean_literal => ExpressionKind::Literal(Literal::Boolean(pair.as_str() == "true")),
            Rule::numeric_literal => ExpressionKind::Literal(Self::parse_numeric_literal(pair)?),
            Rule::string_literal => {
                ExpressionKind::Literal(Literal::String(Self::parse_string_literal(pair)?))
            }
            Rule::regex_literal => ExpressionKind::Literal(Literal::RegExp(Self::parse_regex_literal(pair))),
            Rule::template_literal => ExpressionKind::Template(Self::parse_template_literal(pair)?),
            Rule::array_literal => ExpressionKind::Array(Self::parse_array_literal(pair)?),
            Rule::object_literal => ExpressionKind::Object(Self::parse_object_literal(pair)?),
            Rule::function_expression => ExpressionKind::Function(Self::parse_function(pair)?),
            Rule::class_expression => ExpressionKind::Class(Self::parse_class(pair)?),
            Rule::meta_property => {
                let (meta, property) = pair.as_str().split_once('.').unwrap_or((pair.as_str(), ""));
                ExpressionKind::MetaProperty(MetaProperty {
                    meta: meta.to_string(),
                    property: property.to_string(),
                })
            }
            Rule::import_call => {
                let source = Self::expect_inner(pair.into_inner(), "module specifier", &span)?;
                ExpressionKind::ImportCall(Box::new(Self::parse_expression_from_pair(source)?))
            }
            Rule::parenthesized_expression => {
                // Parentheses only group; the inner node keeps its own span
                let inner = Self::expect_inner(pair.into_inner(), "expression", &span)?;
                return Self::parse_expression_from_pair(inner);
            }
            _ => return Err(Self::unexpected_rule("expression", &pair)),
        };

        Ok(Expression { kind, span })
    }

    fn parse_assignment_expression(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let first = Self::next_inner(&mut inner, "expression", &span)?;
        let target = Self::parse_expression_from_pair(first)?;

        let operator_pair = match inner.next() {
            Some(operator_pair) => operator_pair,
            None => return Ok(target),
        };
        let operator = AssignmentOperator::from_str(operator_pair.as_str())
            .ok_or_else(|| Self::unexpected_rule("assignment operator", &operator_pair))?;
        let value = Self::parse_expression_from_pair(Self::next_inner(
            &mut inner,
            "assigned value",
            &span,
        )?)?;

        Self::validate_assignment_target(&target, operator)?;

        Ok(Expression {
            kind: ExpressionKind::Assignment(AssignmentOperation {
                target: Box::new(target),
                operator,
                value: Box::new(value),
            }),
            span,
        })
    }

    /// Plain `=` also accepts array and object destructuring targets
    fn validate_assignment_target(
        target: &Expression,
        operator: AssignmentOperator,
    ) -> ParseResult<()> {
        let valid = match &target.kind {
            ExpressionKind::Identifier(_) | ExpressionKind::Member(_) => true,
            ExpressionKind::Array(_) | ExpressionKind::Object(_) => {
                operator == AssignmentOperator::Assign
            }
            _ => false,
        };

        if valid {
            Ok(())
        } else {
            Err(ParseError::InvalidAssignmentTarget {
                src: String::new(),
                span: (&target.span).into(),
            })
        }
    }

    fn parse_conditional_expression(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let test = Self::parse_expression_from_pair(Self::next_inner(
            &mut inner,
            "condition",
            &span,
        )?)?;

        let consequent = match inner.next() {
            Some(consequent) => Self::parse_expression_from_pair(consequent)?,
            None => return Ok(test),
        };
        let alternate = Self::parse_expression_from_pair(Self::next_inner(
            &mut inner,
            "alternate branch",
            &span,
        )?)?;

        Ok(Expression {
            kind: ExpressionKind::Conditional(ConditionalExpression {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            }),
            span,
        })
    }

    fn parse_unary_expression(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();
        let first = Self::next_inner(&mut inner, "operand", &span)?;

        let operator = match first.as_rule() {
            Rule::op_delete => UnaryOperator::Delete,
            Rule::op_void => UnaryOperator::Void,
            Rule::op_typeof => UnaryOperator::TypeOf,
            Rule::op_unary_plus => UnaryOperator::Plus,
            Rule::op_unary_minus => UnaryOperator::Minus,
            Rule::op_bitwise_not => UnaryOperator::BitwiseNot,
            Rule::op_logical_not => UnaryOperator::LogicalNot,
            Rule::prefix_update_expression => {
                let mut update_inner = first.into_inner();
                let operator = Self::parse_update_operator(&Self::next_inner(
                    &mut update_inner,
                    "update operator",
                    &span,
                )?)?;
                let operand = Self::parse_expression_from_pair(Self::next_inner(
                    &mut update_inner,
                    "operand",
                    &span,
                )?)?;
                return Self::build_update(operator, true, operand, span);
            }
            Rule::await_expression => {
                let operand = Self::expect_inner(first.into_inner(), "operand", &span)?;
                return Ok(Expression {
                    kind: ExpressionKind::Await(Box::new(Self::parse_expression_from_pair(
                        operand,
                    )?)),
                    span,
                });
            }
            Rule::postfix_expression => {
                let mut postfix_inner = first.into_inner();
                let operand = Self::parse_left_hand_side(Self::next_inner(
                    &mut postfix_inner,
                    "operand",
                    &span,
                )?)?;
                return match postfix_inner.next() {
                    Some(operator_pair) => {
                        let operator = Self::parse_update_operator(&operator_pair)?;
                        Self::build_update(operator, false, operand, span)
                    }
                    None => Ok(operand),
                };
            }
            _ => return Err(Self::unexpected_rule("unary expression", &first)),
        };

        let operand =
            Self::parse_expression_from_pair(Self::next_inner(&mut inner, "operand", &span)?)?;

        Ok(Expression {
            kind: ExpressionKind::Unary(UnaryOperation {
                operator,
                operand: Box::new(operand),
            }),
            span,
        })
    }

    fn parse_update_operator(pair: &pest::iterators::Pair<Rule>) -> ParseResult<UpdateOperator> {
        match pair.as_str() {
            "++" => Ok(UpdateOperator::Increment),
            "--" => Ok(UpdateOperator::Decrement),
            _ => Err(Self::unexpected_rule("++ or --", pair)),
        }
    }

    fn build_update(
        operator: UpdateOperator,
        prefix: bool,
        operand: Expression,
        span: Span,
    ) -> ParseResult<Expression> {
        if !matches!(
            operand.kind,
            ExpressionKind::Identifier(_) | ExpressionKind::Member(_)
        ) {
            return Err(ParseError::InvalidAssignmentTarget {
                src: String::new(),
                span: (&operand.span).into(),
            });
        }

        Ok(Expression {
            kind: ExpressionKind::Update(UpdateOperation {
                operator,
                prefix,
                operand: Box::new(operand),
            }),
            span,
        })
    }

    /// Parse a primary or `new` expression followed by call and member suffixes
    pub(crate) fn parse_left_hand_side(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let head = Self::next_inner(&mut inner, "expression", &span)?;
        let mut expression = match head.as_rule() {
            Rule::new_expression => Self::parse_new_expression(head)?,
            _ => Self::parse_expression_from_pair(head)?,
        };

        for suffix in inner {
            expression = Self::apply_suffix(expression, suffix)?;
        }

        Ok(expression)
    }

    fn parse_new_expression(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let callee_pair = Self::next_inner(&mut inner, "constructor", &span)?;
        let callee_span = Self::span_from_pair(&callee_pair);
        let mut callee_inner = callee_pair.into_inner();

        let head = Self::next_inner(&mut callee_inner, "constructor", &callee_span)?;
        let mut callee = match head.as_rule() {
            Rule::new_expression => Self::parse_new_expression(head)?,
            _ => Self::parse_expression_from_pair(head)?,
        };
        for suffix in callee_inner {
            callee = Self::apply_suffix(callee, suffix)?;
        }

        let arguments = match inner.next() {
            Some(arguments) => Self::parse_arguments(arguments)?,
            None => Vec::new(),
        };

        Ok(Expression {
            kind: ExpressionKind::New(NewExpression {
                callee: Box::new(callee),
                arguments,
            }),
            span,
        })
    }

    /// Extend an expression with one call, member or template suffix
    fn apply_suffix(
        object: Expression,
        suffix: pest::iterators::Pair<Rule>,
    ) -> ParseResult<Expression> {
        let suffix_span = Self::span_from_pair(&suffix);
        let span = Self::span_from_range(object.span.start, suffix_span.end);

        let kind = match suffix.as_rule() {
            Rule::arguments => ExpressionKind::Call(CallExpression {
                callee: Box::new(object),
                arguments: Self::parse_arguments(suffix)?,
                optional: false,
            }),
            Rule::static_member => {
                let property = Self::expect_inner(suffix.into_inner(), "property name", &suffix_span)?;
                ExpressionKind::Member(MemberExpression {
                    object: Box::new(object),
                    property: Self::parse_member_name(property),
                    optional: false,
                })
            }
            Rule::computed_member => {
                let property = Self::expect_inner(suffix.into_inner(), "property", &suffix_span)?;
                ExpressionKind::Member(MemberExpression {
                    object: Box::new(object),
                    property: MemberProperty::Computed(Box::new(Self::parse_expression_from_pair(
                        property,
                    )?)),
                    optional: false,
                })
            }
            Rule::tagged_template => {
                let template = Self::expect_inner(suffix.into_inner(), "template", &suffix_span)?;
                ExpressionKind::TaggedTemplate(TaggedTemplate {
                    tag: Box::new(object),
                    quasi: Self::parse_template_literal(template)?,
                })
            }
            Rule::optional_suffix => {
                let link = Self::expect_inner(suffix.into_inner(), "optional access", &suffix_span)?;
                match link.as_rule() {
                    Rule::arguments => ExpressionKind::Call(CallExpression {
                        callee: Box::new(object),
                        arguments: Self::parse_arguments(link)?,
                        optional: true,
                    }),
                    Rule::expression => ExpressionKind::Member(MemberExpression {
                        object: Box::new(object),
                        property: MemberProperty::Computed(Box::new(
                            Self::parse_expression_from_pair(link)?,
                        )),
                        optional: true,
                    }),
                    _ => ExpressionKind::Member(MemberExpression {
                        object: Box::new(object),
                        property: Self::parse_member_name(link),
                        optional: true,
                    }),
                }
            }
            _ => return Err(Self::unexpected_rule("call or member access", &suffix)),
        };

        Ok(Expression { kind, span })
    }

    fn parse_member_name(pair: pest::iterators::Pair<Rule>) -> MemberProperty {
        match pair.as_rule() {
            Rule::private_name => MemberProperty::Private(Self::parse_identifier(pair)),
            _ => MemberProperty::Identifier(Self::parse_identifier(pair)),
        }
    }

    pub(super) fn parse_arguments(pair: pest::iterators::Pair<Rule>) -> ParseResult<Vec<Argument>> {
        pair.into_inner()
            .map(|argument| match argument.as_rule() {
                Rule::spread_element => Ok(Argument::Spread(Self::parse_spread_argument(argument)?)),
                _ => Ok(Argument::Expression(Self::parse_expression_from_pair(argument)?)),
            })
            .collect()
    }

    /// The expression being spread by `...expression`
    pub(super) fn parse_spread_argument(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);
        let inner = Self::expect_inner(pair.into_inner(), "spread expression", &span)?;
        Self::parse_expression_from_pair(inner)
    }
}
