// Expression parsing tests
// Tests for operator precedence, calls, member chains, functions and literals

use pretty_assertions::assert_eq;
use rn_debundle_parser::{ast::*, parse_expression, ParseError};

// === OPERATOR PRECEDENCE ===

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let expr = parse_expression("a + b * c").unwrap();

    match &expr.kind {
        ExpressionKind::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Add);
            match &binary.right.kind {
                ExpressionKind::Binary(right) => {
                    assert_eq!(right.operator, BinaryOperator::Multiply)
                }
                _ => panic!("Expected multiplication on the right"),
            }
        }
        _ => panic!("Expected binary expression, got: {:?}", expr.kind),
    }
}

#[test]
fn test_exponent_is_right_associative() {
    let expr = parse_expression("a ** b ** c").unwrap();

    match &expr.kind {
        ExpressionKind::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::Exponent);
            assert!(matches!(binary.left.kind, ExpressionKind::Identifier(_)));
            assert!(matches!(binary.right.kind, ExpressionKind::Binary(_)));
        }
        _ => panic!("Expected binary expression"),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    let expr = parse_expression("a - b - c").unwrap();

    match &expr.kind {
        ExpressionKind::Binary(binary) => {
            assert!(matches!(binary.left.kind, ExpressionKind::Binary(_)));
            assert!(matches!(binary.right.kind, ExpressionKind::Identifier(_)));
        }
        _ => panic!("Expected binary expression"),
    }
}

#[test]
fn test_keyword_operators() {
    let expr = parse_expression("a instanceof B && 'k' in o").unwrap();

    match &expr.kind {
        ExpressionKind::Binary(binary) => {
            assert_eq!(binary.operator, BinaryOperator::LogicalAnd);
            match (&binary.left.kind, &binary.right.kind) {
                (ExpressionKind::Binary(left), ExpressionKind::Binary(right)) => {
                    assert_eq!(left.operator, BinaryOperator::InstanceOf);
                    assert_eq!(right.operator, BinaryOperator::In);
                }
                _ => panic!("Expected binary operands"),
            }
        }
        _ => panic!("Expected binary expression"),
    }
}

#[test]
fn test_identifier_starting_with_keyword() {
    let expr = parse_expression("typeofValue + instance").unwrap();

    match &expr.kind {
        ExpressionKind::Binary(binary) => match &binary.left.kind {
            ExpressionKind::Identifier(identifier) => assert_eq!(identifier.name, "typeofValue"),
            _ => panic!("Expected identifier"),
        },
        _ => panic!("Expected binary expression"),
    }
}

#[test]
fn test_nullish_coalescing() {
    let expr = parse_expression("a ?? b").unwrap();
    assert!(matches!(
        expr.kind,
        ExpressionKind::Binary(BinaryOperation {
            operator: BinaryOperator::NullishCoalescing,
            ..
        })
    ));
}

// === UNARY, UPDATE AND ASSIGNMENT ===

#[test]
fn test_unary_keywords() {
    let expr = parse_expression("typeof void 0").unwrap();

    match &expr.kind {
        ExpressionKind::Unary(unary) => {
            assert_eq!(unary.operator, UnaryOperator::TypeOf);
            assert!(matches!(
                unary.operand.kind,
                ExpressionKind::Unary(UnaryOperation {
                    operator: UnaryOperator::Void,
                    ..
                })
            ));
        }
        _ => panic!("Expected unary expression"),
    }
}

#[test]
fn test_compound_assignment_is_right_associative() {
    let expr = parse_expression("a = b += 1").unwrap();

    match &expr.kind {
        ExpressionKind::Assignment(assignment) => {
            assert_eq!(assignment.operator, AssignmentOperator::Assign);
            match &assignment.value.kind {
                ExpressionKind::Assignment(inner) => {
                    assert_eq!(inner.operator, AssignmentOperator::AddAssign)
                }
                _ => panic!("Expected nested assignment"),
            }
        }
        _ => panic!("Expected assignment"),
    }
}

#[test]
fn test_destructuring_assignment() {
    let expr = parse_expression("[a, b] = [b, a]").unwrap();
    assert!(matches!(expr.kind, ExpressionKind::Assignment(_)));
}

#[test]
fn test_invalid_assignment_target() {
    let error = parse_expression("a + b = c").unwrap_err();
    assert!(matches!(error, ParseError::InvalidAssignmentTarget { .. }));

    let error = parse_expression("f()++").unwrap_err();
    assert!(matches!(error, ParseError::InvalidAssignmentTarget { .. }));
}

#[test]
fn test_conditional_expression() {
    let expr = parse_expression("a ? b : c ? d : e").unwrap();

    match &expr.kind {
        ExpressionKind::Conditional(conditional) => {
            assert!(matches!(
                conditional.alternate.kind,
                ExpressionKind::Conditional(_)
            ));
        }
        _ => panic!("Expected conditional expression"),
    }
}

#[test]
fn test_sequence_expression() {
    let expr = parse_expression("a, b, c").unwrap();

    match &expr.kind {
        ExpressionKind::Sequence(expressions) => assert_eq!(expressions.len(), 3),
        _ => panic!("Expected sequence expression"),
    }
}

// === CALLS AND MEMBER ACCESS ===

#[test]
fn test_call_member_chain() {
    let expr = parse_expression("r(d[0]).default.create(...args)").unwrap();

    match &expr.kind {
        ExpressionKind::Call(call) => {
            assert_eq!(call.arguments.len(), 1);
            assert!(matches!(call.arguments[0], Argument::Spread(_)));
            match &call.callee.kind {
                ExpressionKind::Member(member) => match &member.property {
                    MemberProperty::Identifier(name) => assert_eq!(name.name, "create"),
                    _ => panic!("Expected named property"),
                },
                _ => panic!("Expected member callee"),
            }
        }
        _ => panic!("Expected call expression"),
    }
}

#[test]
fn test_optional_chaining() {
    let expr = parse_expression("a?.b?.[c]?.(d)").unwrap();

    match &expr.kind {
        ExpressionKind::Call(call) => {
            assert!(call.optional);
            match &call.callee.kind {
                ExpressionKind::Member(member) => {
                    assert!(member.optional);
                    assert!(matches!(member.property, MemberProperty::Computed(_)));
                }
                _ => panic!("Expected computed member"),
            }
        }
        _ => panic!("Expected optional call"),
    }
}

#[test]
fn test_conditional_with_decimal_is_not_optional_chain() {
    let expr = parse_expression("a?.5:1").unwrap();
    assert!(matches!(expr.kind, ExpressionKind::Conditional(_)));
}

#[test]
fn test_new_with_and_without_arguments() {
    let expr = parse_expression("new Foo").unwrap();
    match &expr.kind {
        ExpressionKind::New(new) => assert!(new.arguments.is_empty()),
        _ => panic!("Expected new expression"),
    }

    let expr = parse_expression("new a.B(1).c").unwrap();
    match &expr.kind {
        ExpressionKind::Member(member) => match &member.object.kind {
            ExpressionKind::New(new) => {
                assert_eq!(new.arguments.len(), 1);
                assert!(matches!(new.callee.kind, ExpressionKind::Member(_)));
            }
            _ => panic!("Expected new expression as object"),
        },
        _ => panic!("Expected member expression"),
    }
}

#[test]
fn test_meta_property_and_dynamic_import() {
    let expr = parse_expression("new.target").unwrap();
    match &expr.kind {
        ExpressionKind::MetaProperty(meta) => {
            assert_eq!(meta.meta, "new");
            assert_eq!(meta.property, "target");
        }
        _ => panic!("Expected meta property"),
    }

    let expr = parse_expression("import('./a')").unwrap();
    assert!(matches!(expr.kind, ExpressionKind::ImportCall(_)));
}

// === FUNCTIONS ===

#[test]
fn test_arrow_function_forms() {
    let expr = parse_expression("x => x * 2").unwrap();
    match &expr.kind {
        ExpressionKind::Arrow(arrow) => {
            assert_eq!(arrow.params.len(), 1);
            assert!(matches!(arrow.body, ArrowBody::Expression(_)));
        }
        _ => panic!("Expected arrow function"),
    }

    let expr = parse_expression("async ({ a }, ...rest) => { await a; }").unwrap();
    match &expr.kind {
        ExpressionKind::Arrow(arrow) => {
            assert!(arrow.is_async);
            assert!(matches!(arrow.params[0], Pattern::Object(_)));
            assert!(matches!(arrow.params[1], Pattern::Rest(_)));
            assert!(matches!(arrow.body, ArrowBody::Block(_)));
        }
        _ => panic!("Expected async arrow function"),
    }
}

#[test]
fn test_parenthesized_expression_is_not_arrow() {
    let expr = parse_expression("(a, b)").unwrap();
    assert!(matches!(expr.kind, ExpressionKind::Sequence(_)));
}

#[test]
fn test_generator_function_expression() {
    let expr = parse_expression("function* gen(a = 1) { yield* a; }").unwrap();

    match &expr.kind {
        ExpressionKind::Function(function) => {
            assert!(function.is_generator);
            assert_eq!(function.id.as_ref().unwrap().name, "gen");
            assert!(matches!(function.params[0], Pattern::Assignment(_)));
        }
        _ => panic!("Expected function expression"),
    }
}

#[test]
fn test_class_expression_members() {
    let expr = parse_expression(
        "class extends Base { constructor() { super(); } static create() {} get size() { return 1; } #count = 0; }",
    )
    .unwrap();

    match &expr.kind {
        ExpressionKind::Class(class) => {
            assert!(class.id.is_none());
            assert!(class.super_class.is_some());
            assert_eq!(class.body.len(), 4);
            assert!(matches!(
                class.body[1],
                ClassMember::Method {
                    is_static: true,
                    ..
                }
            ));
            match &class.body[2] {
                ClassMember::Method { method, .. } => assert_eq!(method.kind, MethodKind::Getter),
                _ => panic!("Expected getter"),
            }
            assert!(matches!(
                class.body[3],
                ClassMember::Field {
                    key: PropertyKey::Private(_),
                    ..
                }
            ));
        }
        _ => panic!("Expected class expression"),
    }
}

// === COLLECTIONS ===

#[test]
fn test_object_literal_members() {
    let expr = parse_expression("{ a: 1, 'b': 2, 3: c, [d]: 4, e, f() {}, get g() { return 1; }, ...h }")
        .unwrap();

    match &expr.kind {
        ExpressionKind::Object(object) => {
            assert_eq!(object.properties.len(), 8);
            assert!(matches!(
                object.properties[2],
                ObjectMember::KeyValue {
                    key: PropertyKey::Number(_),
                    ..
                }
            ));
            assert!(matches!(
                object.properties[3],
                ObjectMember::KeyValue {
                    key: PropertyKey::Computed(_),
                    ..
                }
            ));
            assert!(matches!(object.properties[4], ObjectMember::Shorthand { .. }));
            assert!(matches!(object.properties[5], ObjectMember::Method(_)));
            assert!(matches!(object.properties[7], ObjectMember::Spread(_)));
        }
        _ => panic!("Expected object literal"),
    }
}

#[test]
fn test_array_literal_with_holes_and_spread() {
    let expr = parse_expression("[, a, , ...b]").unwrap();

    match &expr.kind {
        ExpressionKind::Array(array) => {
            assert_eq!(array.elements.len(), 4);
            assert!(matches!(array.elements[0], ArrayElement::Hole));
            assert!(matches!(array.elements[2], ArrayElement::Hole));
            assert!(matches!(array.elements[3], ArrayElement::Spread(_)));
        }
        _ => panic!("Expected array literal"),
    }
}

// === SPANS ===

#[test]
fn test_spans_cover_source_text() {
    let source = "foo(bar, 42)";
    let expr = parse_expression(source).unwrap();

    assert_eq!(expr.span.start, 0);
    assert_eq!(expr.span.end, source.len());
    match &expr.kind {
        ExpressionKind::Call(call) => {
            let span = call.arguments[1].span();
            assert_eq!(&source[span.start..span.end], "42");
        }
        _ => panic!("Expected call expression"),
    }
}
