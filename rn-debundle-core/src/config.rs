//! Registration pattern configuration
//!
//! Describes which calls register modules and where the implementation,
//! id and dependency arguments sit in the call.

use rn_debundle_parser::{CallExpression, ExpressionKind, Statement, StatementKind};

/// Argument indices of a registration call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentPositions {
    pub implementation: usize,
    pub id: usize,
    pub dependencies: usize,
}

impl Default for ArgumentPositions {
    fn default() -> Self {
        Self {
            implementation: 0,
            id: 1,
            dependencies: 2,
        }
    }
}

/// Shape of a module registration call, `__d(factory, id, dependencies)` by default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPattern {
    pub marker_name: String,
    pub arguments: ArgumentPositions,
}

impl Default for RegistrationPattern {
    fn default() -> Self {
        Self {
            marker_name: Self::DEFAULT_MARKER.to_string(),
            arguments: ArgumentPositions::default(),
        }
    }
}

impl RegistrationPattern {
    /// Name of Metro's module definition function
    pub const DEFAULT_MARKER: &'static str = "__d";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker_name(mut self, marker_name: impl Into<String>) -> Self {
        self.marker_name = marker_name.into();
        self
    }

    pub fn with_arguments(mut self, arguments: ArgumentPositions) -> Self {
        self.arguments = arguments;
        self
    }

    /// The registration call of a statement, if the statement is one.
    ///
    /// Only an expression statement that directly calls the marker by its bare
    /// name qualifies; `x.__d()`, `__d?.()` and `(0, __d)()` do not.
    pub fn registration_call<'a>(&self, statement: &'a Statement) -> Option<&'a CallExpression> {
        let StatementKind::Expression(expression) = &statement.kind else {
            return None;
        };
        match &expression.kind {
            ExpressionKind::Call(call) if self.is_marker_call(call) => Some(call),
            _ => None,
        }
    }

    pub fn is_registration(&self, statement: &Statement) -> bool {
        self.registration_call(statement).is_some()
    }

    fn is_marker_call(&self, call: &CallExpression) -> bool {
        !call.optional && call.callee_name() == Some(self.marker_name.as_str())
    }
}
