//! Module extraction
//!
//! Finds every registration statement in a bundle and detaches it, leaving the
//! residual program. Works in two passes over the same pre-order numbering of
//! statements:
//!
//! 1. [`RegistrationLocator`] walks the tree read-only and records the
//!    positions of matching statements. It does not descend into a match, so a
//!    registration nested inside another registration stays in that module.
//! 2. [`RegistrationDetacher`] walks the tree mutably, drops the recorded
//!    statements from their statement lists and moves their calls out. A match
//!    in a single-statement slot (`if (c) __d(...)`) becomes an empty statement.

use std::collections::BTreeSet;

use rn_debundle_parser::{Expression, ExpressionKind, Program, Statement, StatementKind};
use tracing::debug;

use crate::config::RegistrationPattern;
use crate::module::RegistrationCall;
use crate::visitor::{walk_statement, walk_statement_mut, Visitor, VisitorMut};

/// Result of extraction: the detached calls in pre-order and what remains
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub calls: Vec<RegistrationCall>,
    pub residual: Program,
}

/// Detach all registration statements from `program`
pub fn extract_modules(mut program: Program, pattern: &RegistrationPattern) -> Extraction {
    let mut locator = RegistrationLocator::new(pattern);
    locator.visit_program(&program);
    debug!(
        statements = locator.next_position,
        registrations = locator.positions.len(),
        "located registration statements"
    );

    let mut detacher = RegistrationDetacher::new(locator.positions);
    detacher.visit_program_mut(&mut program);

    Extraction {
        calls: detacher.calls,
        residual: program,
    }
}

/// First pass: pre-order positions of registration statements
struct RegistrationLocator<'a> {
    pattern: &'a RegistrationPattern,
    next_position: usize,
    positions: BTreeSet<usize>,
}

impl<'a> RegistrationLocator<'a> {
    fn new(pattern: &'a RegistrationPattern) -> Self {
        Self {
            pattern,
            next_position: 0,
            positions: BTreeSet::new(),
        }
    }
}

impl Visitor for RegistrationLocator<'_> {
    fn visit_statement(&mut self, statement: &Statement) {
        let position = self.next_position;
        self.next_position += 1;

        if self.pattern.is_registration(statement) {
            self.positions.insert(position);
        } else {
            walk_statement(self, statement);
        }
    }
}

/// Second pass: removes the statements found by the first
struct RegistrationDetacher {
    positions: BTreeSet<usize>,
    next_position: usize,
    calls: Vec<RegistrationCall>,
}

impl RegistrationDetacher {
    fn new(positions: BTreeSet<usize>) -> Self {
        Self {
            calls: Vec::with_capacity(positions.len()),
            positions,
            next_position: 0,
        }
    }

    /// Number the statement and, when it was recorded, move its call out and
    /// leave an empty statement in its place. Returns whether it was detached.
    fn detach_if_recorded(&mut self, statement: &mut Statement) -> bool {
        let position = self.next_position;
        self.next_position += 1;

        if !self.positions.contains(&position) {
            return false;
        }

        let span = statement.span.clone();
        let detached = std::mem::replace(statement, Statement::empty(span.clone()));
        if let StatementKind::Expression(Expression {
            kind: ExpressionKind::Call(call),
            ..
        }) = detached.kind
        {
            self.calls.push(RegistrationCall::new(call, span));
            return true;
        }

        // Both passes number the same tree, so a recorded position is always a call
        *statement = detached;
        false
    }
}

impl VisitorMut for RegistrationDetacher {
    fn visit_statement_list_mut(&mut self, statements: &mut Vec<Statement>) {
        let mut kept = Vec::with_capacity(statements.len());
        for mut statement in statements.drain(..) {
            if !self.detach_if_recorded(&mut statement) {
                walk_statement_mut(self, &mut statement);
                kept.push(statement);
            }
        }
        *statements = kept;
    }

    fn visit_statement_mut(&mut self, statement: &mut Statement) {
        if !self.detach_if_recorded(statement) {
            walk_statement_mut(self, statement);
        }
    }
}
