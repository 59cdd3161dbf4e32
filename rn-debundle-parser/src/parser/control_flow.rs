// Control flow parsing functions for the JavaScript parser
// Handles conditionals, loops, jumps, exceptions and switch statements

use super::{JavaScriptParser, Rule};
use crate::ast::*;
use crate::error::*;

impl JavaScriptParser {
    pub(super) fn parse_if_statement(pair: pest::iterators::Pair<Rule>) -> ParseResult<IfStatement> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let test = Self::parse_expression_from_pair(Self::next_inner(
            &mut inner,
            "condition",
            &span,
        )?)?;
        let consequent = Self::parse_statement(Self::next_inner(&mut inner, "statement", &span)?)?;
        let alternate = inner
            .next()
            .map(Self::parse_statement)
            .transpose()?
            .map(Box::new);

        Ok(IfStatement {
            test,
            consequent: Box::new(consequent),
            alternate,
        })
    }

    pub(super) fn parse_for_statement(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<ForStatement> {
        let span = Self::span_from_pair(&pair);
        let mut init = None;
        let mut test = None;
        let mut update = None;
        let mut body = None;

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::for_init => {
                    let init_span = Self::span_from_pair(&inner_pair);
                    let init_pair =
                        Self::expect_inner(inner_pair.into_inner(), "initializer", &init_span)?;
                    init = Some(match init_pair.as_rule() {
                        Rule::variable_declaration => {
                            ForInit::Declaration(Self::parse_variable_declaration(init_pair)?)
                        }
                        _ => ForInit::Expression(Self::parse_expression_from_pair(init_pair)?),
                    });
                }
                Rule::for_test => test = Some(Self::parse_wrapped_expression(inner_pair)?),
                Rule::for_update => update = Some(Self::parse_wrapped_expression(inner_pair)?),
                _ => body = Some(Self::parse_statement(inner_pair)?),
            }
        }

        let body = body.ok_or_else(|| Self::missing_node("loop body", &span))?;

        Ok(ForStatement {
            init,
            test,
            update,
            body: Box::new(body),
        })
    }

    pub(super) fn parse_for_in_statement(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<ForInStatement> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let left = Self::parse_for_binding(Self::next_inner(&mut inner, "loop binding", &span)?)?;
        let right = Self::parse_expression_from_pair(Self::next_inner(
            &mut inner,
            "object expression",
            &span,
        )?)?;
        let body = Self::parse_statement(Self::next_inner(&mut inner, "loop body", &span)?)?;

        Ok(ForInStatement {
            left,
            right,
            body: Box::new(body),
        })
    }

    pub(super) fn parse_for_of_statement(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<ForOfStatement> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner().peekable();

        let is_await = inner
            .next_if(|p| p.as_rule() == Rule::await_marker)
            .is_some();

        let left_pair = inner
            .next()
            .ok_or_else(|| Self::missing_node("loop binding", &span))?;
        let left = Self::parse_for_binding(left_pair)?;
        let right_pair = inner
            .next()
            .ok_or_else(|| Self::missing_node("iterable expression", &span))?;
        let right = Self::parse_expression_from_pair(right_pair)?;
        let body_pair = inner
            .next()
            .ok_or_else(|| Self::missing_node("loop body", &span))?;
        let body = Self::parse_statement(body_pair)?;

        Ok(ForOfStatement {
            is_await,
            left,
            right,
            body: Box::new(body),
        })
    }

    fn parse_for_binding(pair: pest::iterators::Pair<Rule>) -> ParseResult<ForBinding> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();
        let first = Self::next_inner(&mut inner, "loop binding", &span)?;

        match first.as_rule() {
            Rule::variable_kind => {
                let kind = Self::parse_variable_kind(&first)?;
                let target =
                    Self::parse_binding_target(Self::next_inner(&mut inner, "binding", &span)?)?;
                Ok(ForBinding::Declaration { kind, target })
            }
            _ => Ok(ForBinding::Target(Self::parse_expression_from_pair(first)?)),
        }
    }

    pub(super) fn parse_while_statement(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<WhileStatement> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let test = Self::parse_expression_from_pair(Self::next_inner(
            &mut inner,
            "condition",
            &span,
        )?)?;
        let body = Self::parse_statement(Self::next_inner(&mut inner, "loop body", &span)?)?;

        Ok(WhileStatement {
            test,
            body: Box::new(body),
        })
    }

    pub(super) fn parse_do_while_statement(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<DoWhileStatement> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let body = Self::parse_statement(Self::next_inner(&mut inner, "loop body", &span)?)?;
        let test = Self::parse_expression_from_pair(Self::next_inner(
            &mut inner,
            "condition",
            &span,
        )?)?;

        Ok(DoWhileStatement {
            body: Box::new(body),
            test,
        })
    }

    /// Label of a `break` or `continue`, if any
    pub(super) fn parse_jump_label(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<Option<Identifier>> {
        let span = Self::span_from_pair(&pair);
        let head = Self::expect_inner(pair.into_inner(), "keyword", &span)?;
        Ok(head.into_inner().next().map(Self::parse_identifier))
    }

    pub(super) fn parse_return_argument(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<Option<Expression>> {
        let span = Self::span_from_pair(&pair);
        let head = Self::expect_inner(pair.into_inner(), "return", &span)?;

        match head.into_inner().next() {
            Some(argument) => Ok(Some(Self::parse_wrapped_expression(argument)?)),
            None => Ok(None),
        }
    }

    pub(super) fn parse_try_statement(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<TryStatement> {
        let span = Self::span_from_pair(&pair);
        let mut block = None;
        let mut handler = None;
        let mut finalizer = None;

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::block_statement => block = Some(Self::parse_block_statement(inner_pair)?),
                Rule::catch_clause => handler = Some(Self::parse_catch_clause(inner_pair)?),
                Rule::finally_clause => {
                    let finally_span = Self::span_from_pair(&inner_pair);
                    let body =
                        Self::expect_inner(inner_pair.into_inner(), "finally block", &finally_span)?;
                    finalizer = Some(Self::parse_block_statement(body)?);
                }
                _ => return Err(Self::unexpected_rule("try, catch or finally block", &inner_pair)),
            }
        }

        let block = block.ok_or_else(|| Self::missing_node("try block", &span))?;

        Ok(TryStatement {
            block,
            handler,
            finalizer,
        })
    }

    fn parse_catch_clause(pair: pest::iterators::Pair<Rule>) -> ParseResult<CatchClause> {
        let span = Self::span_from_pair(&pair);
        let mut param = None;
        let mut body = None;

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::block_statement => body = Some(Self::parse_block_statement(inner_pair)?),
                _ => param = Some(Self::parse_binding_target(inner_pair)?),
            }
        }

        let body = body.ok_or_else(|| Self::missing_node("catch block", &span))?;

        Ok(CatchClause { param, body, span })
    }

    pub(super) fn parse_switch_statement(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<SwitchStatement> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let discriminant = Self::parse_expression_from_pair(Self::next_inner(
            &mut inner,
            "switch discriminant",
            &span,
        )?)?;

        let mut cases = Vec::new();
        for clause in inner {
            let clause_span = Self::span_from_pair(&clause);
            match clause.as_rule() {
                Rule::case_clause => {
                    let mut clause_inner = clause.into_inner();
                    let test = Self::parse_expression_from_pair(Self::next_inner(
                        &mut clause_inner,
                        "case value",
                        &clause_span,
                    )?)?;
                    let consequent = Self::parse_statement_list(clause_inner)?;
                    cases.push(SwitchCase {
                        test: Some(test),
                        consequent,
                        span: clause_span,
                    });
                }
                Rule::default_clause => {
                    let consequent = Self::parse_statement_list(clause.into_inner())?;
                    cases.push(SwitchCase {
                        test: None,
                        consequent,
                        span: clause_span,
                    });
                }
                _ => return Err(Self::unexpected_rule("case or default clause", &clause)),
            }
        }

        Ok(SwitchStatement {
            discriminant,
            cases,
        })
    }

    pub(super) fn parse_with_statement(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<WithStatement> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let object = Self::parse_expression_from_pair(Self::next_inner(
            &mut inner,
            "object expression",
            &span,
        )?)?;
        let body = Self::parse_statement(Self::next_inner(&mut inner, "statement", &span)?)?;

        Ok(WithStatement {
            object,
            body: Box::new(body),
        })
    }

    pub(super) fn parse_labeled_statement(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<LabeledStatement> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let label = Self::parse_identifier(Self::next_inner(&mut inner, "label", &span)?);
        let body = Self::parse_statement(Self::next_inner(&mut inner, "statement", &span)?)?;

        Ok(LabeledStatement {
            label,
            body: Box::new(body),
        })
    }

    /// Parse a node whose only child is an expression (for_test, restricted_argument, ...)
    fn parse_wrapped_expression(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expression> {
        let span = Self::span_from_pair(&pair);
        let expression = Self::expect_inner(pair.into_inner(), "expression", &span)?;
        Self::parse_expression_from_pair(expression)
    }
}
