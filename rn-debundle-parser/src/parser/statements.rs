// Statement parsing functions for the JavaScript parser
// Handles statement dispatch, blocks, declarations and imports

use super::{JavaScriptParser, Rule};
use crate::ast::*;
use crate::error::*;

impl JavaScriptParser {
    /// Parse any statement pair
    pub(crate) fn parse_statement(pair: pest::iterators::Pair<Rule>) -> ParseResult<Statement> {
        let span = Self::span_from_pair(&pair);

        let kind = match pair.as_rule() {
            Rule::block_statement => StatementKind::Block(Self::parse_block_statement(pair)?),
            Rule::empty_statement => StatementKind::Empty,
            Rule::debugger_statement => StatementKind::Debugger,
            Rule::variable_statement => {
                let declaration = Self::expect_inner(pair.into_inner(), "declaration", &span)?;
                StatementKind::VariableDeclaration(Self::parse_variable_declaration(declaration)?)
            }
            Rule::expression_statement => {
                let expression = Self::expect_inner(pair.into_inner(), "expression", &span)?;
                StatementKind::Expression(Self::parse_expression_from_pair(expression)?)
            }
            Rule::import_declaration => StatementKind::Import(Self::parse_import_declaration(pair)?),
            Rule::function_declaration => {
                StatementKind::FunctionDeclaration(Self::parse_function(pair)?)
            }
            Rule::class_declaration => StatementKind::ClassDeclaration(Self::parse_class(pair)?),
            Rule::if_statement => StatementKind::If(Self::parse_if_statement(pair)?),
            Rule::for_statement => StatementKind::For(Self::parse_for_statement(pair)?),
            Rule::for_in_statement => StatementKind::ForIn(Self::parse_for_in_statement(pair)?),
            Rule::for_of_statement => StatementKind::ForOf(Self::parse_for_of_statement(pair)?),
            Rule::while_statement => StatementKind::While(Self::parse_while_statement(pair)?),
            Rule::do_while_statement => {
                StatementKind::DoWhile(Self::parse_do_while_statement(pair)?)
            }
            Rule::continue_statement => StatementKind::Continue(Self::parse_jump_label(pair)?),
            Rule::break_statement => StatementKind::Break(Self::parse_jump_label(pair)?),
            Rule::return_statement => StatementKind::Return(Self::parse_return_argument(pair)?),
            Rule::throw_statement => {
                let argument = Self::expect_inner(pair.into_inner(), "expression", &span)?;
                StatementKind::Throw(Self::parse_expression_from_pair(argument)?)
            }
            Rule::try_statement => StatementKind::Try(Self::parse_try_statement(pair)?),
            Rule::switch_statement => StatementKind::Switch(Self::parse_switch_statement(pair)?),
            Rule::with_statement => StatementKind::With(Self::parse_with_statement(pair)?),
            Rule::labeled_statement => {
                StatementKind::Labeled(Self::parse_labeled_statement(pair)?)
            }
            _ => return Err(Self::unexpected_rule("statement", &pair)),
        };

        Ok(Statement { kind, span })
    }

    /// Parse every statement pair in a sequence
    pub(crate) fn parse_statement_list(
        pairs: pest::iterators::Pairs<Rule>,
    ) -> ParseResult<Vec<Statement>> {
        pairs.map(Self::parse_statement).collect()
    }

    pub(crate) fn parse_block_statement(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<BlockStatement> {
        let span = Self::span_from_pair(&pair);
        let body = Self::parse_statement_list(pair.into_inner())?;
        Ok(BlockStatement { body, span })
    }

    /// Parse `var`/`let`/`const` with one or more declarators
    pub(crate) fn parse_variable_declaration(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<VariableDeclaration> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let kind_pair = Self::next_inner(&mut inner, "var, let or const", &span)?;
        let kind = Self::parse_variable_kind(&kind_pair)?;

        let declarations = inner
            .map(Self::parse_variable_declarator)
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(VariableDeclaration {
            kind,
            declarations,
            span,
        })
    }

    pub(crate) fn parse_variable_kind(
        pair: &pest::iterators::Pair<Rule>,
    ) -> ParseResult<VariableKind> {
        match pair.as_str() {
            "var" => Ok(VariableKind::Var),
            "let" => Ok(VariableKind::Let),
            "const" => Ok(VariableKind::Const),
            _ => Err(Self::unexpected_rule("var, let or const", pair)),
        }
    }

    fn parse_variable_declarator(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<VariableDeclarator> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let target = Self::parse_binding_target(Self::next_inner(
            &mut inner,
            "binding name",
            &span,
        )?)?;
        let init = inner
            .next()
            .map(Self::parse_expression_from_pair)
            .transpose()?;

        Ok(VariableDeclarator { target, init, span })
    }

    /// Parse `import ... from '...'` and bare `import '...'`
    fn parse_import_declaration(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<ImportDeclaration> {
        let span = Self::span_from_pair(&pair);
        let mut specifiers = Vec::new();
        let mut source = None;

        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::import_clause => {
                    for clause_pair in inner_pair.into_inner() {
                        Self::parse_import_clause_part(clause_pair, &mut specifiers)?;
                    }
                }
                Rule::string_literal => source = Some(Self::parse_string_literal(inner_pair)?),
                _ => return Err(Self::unexpected_rule("import clause or module path", &inner_pair)),
            }
        }

        let source = source.ok_or_else(|| Self::missing_node("module path", &span))?;

        Ok(ImportDeclaration {
            specifiers,
            source,
            span,
        })
    }

    fn parse_import_clause_part(
        pair: pest::iterators::Pair<Rule>,
        specifiers: &mut Vec<ImportSpecifier>,
    ) -> ParseResult<()> {
        let span = Self::span_from_pair(&pair);

        match pair.as_rule() {
            Rule::import_default => {
                let local = Self::parse_identifier(Self::expect_inner(
                    pair.into_inner(),
                    "identifier",
                    &span,
                )?);
                specifiers.push(ImportSpecifier::Default { local });
            }
            Rule::import_namespace => {
                let local = Self::parse_identifier(Self::expect_inner(
                    pair.into_inner(),
                    "identifier",
                    &span,
                )?);
                specifiers.push(ImportSpecifier::Namespace { local });
            }
            Rule::named_imports => {
                for specifier in pair.into_inner() {
                    specifiers.push(Self::parse_import_specifier(specifier)?);
                }
            }
            _ => return Err(Self::unexpected_rule("import specifier", &pair)),
        }

        Ok(())
    }

    fn parse_import_specifier(pair: pest::iterators::Pair<Rule>) -> ParseResult<ImportSpecifier> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let imported_pair = Self::next_inner(&mut inner, "imported name", &span)?;
        let imported = match imported_pair.as_rule() {
            Rule::string_literal => {
                ModuleExportName::String(Self::parse_string_literal(imported_pair)?)
            }
            _ => ModuleExportName::Identifier(Self::parse_identifier(imported_pair)),
        };

        let local = match inner.next() {
            Some(local_pair) => Self::parse_identifier(local_pair),
            None => match &imported {
                ModuleExportName::Identifier(identifier) => identifier.clone(),
                ModuleExportName::String(_) => {
                    return Err(Self::missing_node("`as` binding for string import", &span))
                }
            },
        };

        Ok(ImportSpecifier::Named { imported, local })
    }

    /// Parse an identifier, identifier_name or private_name token
    pub(crate) fn parse_identifier(pair: pest::iterators::Pair<Rule>) -> Identifier {
        let span = Self::span_from_pair(&pair);
        let name = pair.as_str().trim_start_matches('#').to_string();
        Identifier { name, span }
    }
}
