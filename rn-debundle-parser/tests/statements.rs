// Statement parsing tests
// Tests for declarations, control flow, imports and automatic semicolon insertion

use pretty_assertions::assert_eq;
use rn_debundle_parser::{ast::*, parse_program};

fn single_statement(input: &str) -> Statement {
    let mut program = parse_program(input).unwrap();
    assert_eq!(program.body.len(), 1, "Expected one statement in {:?}", input);
    program.body.remove(0)
}

// === DECLARATIONS ===

#[test]
fn test_variable_declaration_with_multiple_declarators() {
    let statement = single_statement("var a = 1, b;");

    match &statement.kind {
        StatementKind::VariableDeclaration(declaration) => {
            assert_eq!(declaration.kind, VariableKind::Var);
            assert_eq!(declaration.declarations.len(), 2);
            assert!(declaration.declarations[0].init.is_some());
            assert!(declaration.declarations[1].init.is_none());
        }
        _ => panic!("Expected variable declaration, got: {:?}", statement.kind),
    }
}

#[test]
fn test_let_can_still_be_an_identifier() {
    let statement = single_statement("let = 5;");

    match &statement.kind {
        StatementKind::Expression(expr) => match &expr.kind {
            ExpressionKind::Assignment(assignment) => match &assignment.target.kind {
                ExpressionKind::Identifier(identifier) => assert_eq!(identifier.name, "let"),
                _ => panic!("Expected identifier target"),
            },
            _ => panic!("Expected assignment"),
        },
        _ => panic!("Expected expression statement"),
    }
}

#[test]
fn test_destructuring_declaration() {
    let statement = single_statement("const { a, b: [c, , d], ...rest } = value;");

    match &statement.kind {
        StatementKind::VariableDeclaration(declaration) => {
            assert_eq!(declaration.kind, VariableKind::Const);
            match &declaration.declarations[0].target {
                Pattern::Object(object) => {
                    assert_eq!(object.properties.len(), 3);
                    match &object.properties[1] {
                        ObjectPatternProperty::KeyValue {
                            value: Pattern::Array(array),
                            ..
                        } => {
                            assert_eq!(array.elements.len(), 3);
                            assert!(array.elements[1].is_none());
                        }
                        other => panic!("Expected nested array pattern, got: {:?}", other),
                    }
                    assert!(matches!(object.properties[2], ObjectPatternProperty::Rest(_)));
                }
                other => panic!("Expected object pattern, got: {:?}", other),
            }
        }
        _ => panic!("Expected variable declaration"),
    }
}

// === CONTROL FLOW ===

#[test]
fn test_if_else() {
    let statement = single_statement("if (a) { b(); } else c();");

    match &statement.kind {
        StatementKind::If(if_statement) => {
            assert!(matches!(if_statement.consequent.kind, StatementKind::Block(_)));
            let alternate = if_statement.alternate.as_ref().unwrap();
            assert!(matches!(alternate.kind, StatementKind::Expression(_)));
        }
        _ => panic!("Expected if statement"),
    }
}

#[test]
fn test_classic_for_loop() {
    let statement = single_statement("for (var i = 0; i < n; i++) {}");

    match &statement.kind {
        StatementKind::For(for_statement) => {
            assert!(matches!(for_statement.init, Some(ForInit::Declaration(_))));
            assert!(for_statement.test.is_some());
            match &for_statement.update {
                Some(Expression {
                    kind: ExpressionKind::Update(update),
                    ..
                }) => {
                    assert!(!update.prefix);
                    assert_eq!(update.operator, UpdateOperator::Increment);
                }
                other => panic!("Expected postfix update, got: {:?}", other),
            }
        }
        _ => panic!("Expected for statement"),
    }
}

#[test]
fn test_empty_for_header() {
    let statement = single_statement("for (;;) break;");

    match &statement.kind {
        StatementKind::For(for_statement) => {
            assert!(for_statement.init.is_none());
            assert!(for_statement.test.is_none());
            assert!(for_statement.update.is_none());
            assert!(matches!(for_statement.body.kind, StatementKind::Break(None)));
        }
        _ => panic!("Expected for statement"),
    }
}

#[test]
fn test_for_in_and_for_of() {
    let statement = single_statement("for (var key in object) use(key);");
    match &statement.kind {
        StatementKind::ForIn(for_in) => match &for_in.left {
            ForBinding::Declaration { kind, target } => {
                assert_eq!(*kind, VariableKind::Var);
                assert_eq!(target.as_identifier().unwrap().name, "key");
            }
            other => panic!("Expected declaration binding, got: {:?}", other),
        },
        _ => panic!("Expected for-in statement"),
    }

    let statement = single_statement("for (const item of items) {}");
    match &statement.kind {
        StatementKind::ForOf(for_of) => {
            assert!(!for_of.is_await);
            assert!(matches!(
                for_of.left,
                ForBinding::Declaration {
                    kind: VariableKind::Const,
                    ..
                }
            ));
        }
        _ => panic!("Expected for-of statement"),
    }
}

#[test]
fn test_do_while_without_semicolon() {
    let program = parse_program("do { a(); } while (b)\nc();").unwrap();

    assert_eq!(program.body.len(), 2);
    assert!(matches!(program.body[0].kind, StatementKind::DoWhile(_)));
}

#[test]
fn test_switch_with_default() {
    let statement = single_statement("switch (x) { case 1: a(); break; default: b(); }");

    match &statement.kind {
        StatementKind::Switch(switch) => {
            assert_eq!(switch.cases.len(), 2);
            assert!(switch.cases[0].test.is_some());
            assert_eq!(switch.cases[0].consequent.len(), 2);
            assert!(switch.cases[1].test.is_none());
            assert_eq!(switch.cases[1].consequent.len(), 1);
        }
        _ => panic!("Expected switch statement"),
    }
}

#[test]
fn test_try_catch_finally() {
    let statement = single_statement("try { a(); } catch (e) { b(e); } finally { c(); }");

    match &statement.kind {
        StatementKind::Try(try_statement) => {
            let handler = try_statement.handler.as_ref().unwrap();
            assert_eq!(
                handler.param.as_ref().and_then(|p| p.as_identifier()).unwrap().name,
                "e"
            );
            assert!(try_statement.finalizer.is_some());
        }
        _ => panic!("Expected try statement"),
    }
}

#[test]
fn test_optional_catch_binding() {
    let statement = single_statement("try {} catch {}");

    match &statement.kind {
        StatementKind::Try(try_statement) => {
            assert!(try_statement.handler.as_ref().unwrap().param.is_none());
        }
        _ => panic!("Expected try statement"),
    }
}

#[test]
fn test_labeled_continue() {
    let statement = single_statement("outer: for (;;) { continue outer; }");

    match &statement.kind {
        StatementKind::Labeled(labeled) => {
            assert_eq!(labeled.label.name, "outer");
            match &labeled.body.kind {
                StatementKind::For(for_statement) => match &for_statement.body.kind {
                    StatementKind::Block(block) => match &block.body[0].kind {
                        StatementKind::Continue(Some(label)) => assert_eq!(label.name, "outer"),
                        other => panic!("Expected labeled continue, got: {:?}", other),
                    },
                    _ => panic!("Expected block body"),
                },
                _ => panic!("Expected for statement"),
            }
        }
        _ => panic!("Expected labeled statement"),
    }
}

// === MODULES ===

#[test]
fn test_import_default_and_named() {
    let statement = single_statement("import a, { b as c, d } from './mod_1';");

    match &statement.kind {
        StatementKind::Import(import) => {
            assert_eq!(import.source.value, "./mod_1");
            assert_eq!(import.specifiers.len(), 3);
            assert_eq!(import.specifiers[0].local().name, "a");
            assert_eq!(import.specifiers[1].local().name, "c");
            assert_eq!(import.specifiers[2].local().name, "d");
        }
        _ => panic!("Expected import declaration"),
    }
}

#[test]
fn test_dynamic_import_is_an_expression() {
    let statement = single_statement("import('./chunk').then(run);");
    assert!(matches!(statement.kind, StatementKind::Expression(_)));
}

// === AUTOMATIC SEMICOLON INSERTION ===

#[test]
fn test_statements_separated_by_newlines() {
    let program = parse_program("a = 1\nb = 2\nc()").unwrap();
    assert_eq!(program.body.len(), 3);
}

#[test]
fn test_return_followed_by_newline_returns_nothing() {
    let program = parse_program("function f() {\n  return\n  1;\n}").unwrap();

    match &program.body[0].kind {
        StatementKind::FunctionDeclaration(function) => {
            assert_eq!(function.body.len(), 2);
            assert!(matches!(function.body[0].kind, StatementKind::Return(None)));
        }
        _ => panic!("Expected function declaration"),
    }
}

#[test]
fn test_postfix_operator_does_not_cross_lines() {
    let program = parse_program("a\n++b").unwrap();

    assert_eq!(program.body.len(), 2);
    match &program.body[1].kind {
        StatementKind::Expression(expr) => match &expr.kind {
            ExpressionKind::Update(update) => assert!(update.prefix),
            _ => panic!("Expected prefix update"),
        },
        _ => panic!("Expected expression statement"),
    }
}

#[test]
fn test_postfix_operator_after_assignment_starts_new_statement() {
    let program = parse_program("a = b\n++c").unwrap();
    assert_eq!(program.body.len(), 2);
    assert_eq!(program.to_string(), "a = b;\n++c;");

    let program = parse_program("x = new Foo\n--y").unwrap();
    assert_eq!(program.to_string(), "x = new Foo();\n--y;");
}

#[test]
fn test_multiline_comment_counts_as_line_break() {
    let program = parse_program("a = b /*\n*/ ++c").unwrap();
    assert_eq!(program.to_string(), "a = b;\n++c;");

    let program = parse_program("a = b /* same line */ ++\nc").unwrap();
    assert_eq!(program.to_string(), "a = b++;\nc;");
}

#[test]
fn test_return_before_multiline_comment_returns_nothing() {
    let program = parse_program("function f() { return /* x\n y */ a }").unwrap();

    match &program.body[0].kind {
        StatementKind::FunctionDeclaration(function) => {
            assert_eq!(function.body.len(), 2);
            assert!(matches!(function.body[0].kind, StatementKind::Return(None)));
        }
        _ => panic!("Expected function declaration"),
    }
}

#[test]
fn test_yield_followed_by_newline_yields_nothing() {
    let program = parse_program("function* g() {\n  yield\n  a;\n}").unwrap();

    match &program.body[0].kind {
        StatementKind::FunctionDeclaration(function) => {
            assert_eq!(function.body.len(), 2);
            match &function.body[0].kind {
                StatementKind::Expression(expr) => match &expr.kind {
                    ExpressionKind::Yield(yield_expr) => {
                        assert!(yield_expr.argument.is_none());
                        assert!(!yield_expr.delegate);
                    }
                    _ => panic!("Expected yield expression"),
                },
                _ => panic!("Expected expression statement"),
            }
        }
        _ => panic!("Expected function declaration"),
    }
}

#[test]
fn test_async_followed_by_newline_is_an_identifier() {
    let program = parse_program("var f = async\nfunction g() {}").unwrap();
    assert_eq!(program.body.len(), 2);

    match &program.body[0].kind {
        StatementKind::VariableDeclaration(declaration) => match &declaration.declarations[0].init {
            Some(Expression { kind: ExpressionKind::Identifier(identifier), .. }) => {
                assert_eq!(identifier.name, "async")
            }
            other => panic!("Expected identifier initialiser, got: {:?}", other),
        },
        _ => panic!("Expected variable declaration"),
    }
    match &program.body[1].kind {
        StatementKind::FunctionDeclaration(function) => assert!(!function.is_async),
        _ => panic!("Expected function declaration"),
    }
}

#[test]
fn test_comments_and_hashbang_are_skipped() {
    let program =
        parse_program("#!/usr/bin/env node\na(); // trailing\n/* block */ b();").unwrap();
    assert_eq!(program.body.len(), 2);
}

#[test]
fn test_syntax_error_is_reported() {
    let error = parse_program("var = ;").unwrap_err();
    assert!(matches!(error, rn_debundle_parser::ParseError::PestError { .. }));
}
