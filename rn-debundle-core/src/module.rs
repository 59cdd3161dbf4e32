//! Module records decoded from registration calls

use std::fmt;

use rn_debundle_parser::{format_number, Argument, CallExpression, Identifier, Literal, Span, Statement};

/// Identifier of a bundled module.
///
/// Holds the text the bundle runtime uses as the key in its module table, so
/// the number literal `42` and the string literal `"42"` name the same module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub String);

impl ModuleId {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Id for a string or number literal; other literals are not module ids
    pub fn from_literal(literal: &Literal) -> Option<Self> {
        match literal {
            Literal::String(string) => Some(Self(string.value.clone())),
            Literal::Number(number) => Some(Self(format_number(number.value))),
            _ => None,
        }
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registration call detached from the bundle, not yet validated
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationCall {
    pub call: CallExpression,
    /// Span of the statement the call was removed from
    pub span: Span,
}

impl RegistrationCall {
    pub fn new(call: CallExpression, span: Span) -> Self {
        Self { call, span }
    }

    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.call.arguments.get(index)
    }
}

/// Parameters and body of a module factory function
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleImplementation {
    pub parameters: Vec<Identifier>,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// A decoded module registration
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub id: ModuleId,
    pub implementation: ModuleImplementation,
    /// Dependency ids in declaration order; position `i` binds parameter `i`
    pub dependencies: Vec<ModuleId>,
    /// Span of the registration statement in the bundle
    pub span: Span,
}

impl Module {
    /// Parameter and dependency pairs that become imports
    pub fn bindings(&self) -> impl Iterator<Item = (&Identifier, &ModuleId)> {
        self.implementation
            .parameters
            .iter()
            .zip(self.dependencies.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_debundle_parser::{NumberLiteral, StringLiteral};

    #[test]
    fn test_number_and_string_ids_share_identity() {
        let number = ModuleId::from_literal(&Literal::Number(NumberLiteral::new(42.0))).unwrap();
        let string = ModuleId::from_literal(&Literal::String(StringLiteral::new("42"))).unwrap();
        assert_eq!(number, string);
        assert_eq!(number.key(), "42");
    }

    #[test]
    fn test_number_id_uses_javascript_spelling() {
        let mut literal = NumberLiteral::new(16.0);
        literal.raw = "0x10".to_string();
        let id = ModuleId::from_literal(&Literal::Number(literal)).unwrap();
        assert_eq!(id.to_string(), "16");
    }

    #[test]
    fn test_other_literals_are_not_ids() {
        assert!(ModuleId::from_literal(&Literal::Null).is_none());
        assert!(ModuleId::from_literal(&Literal::Boolean(true)).is_none());
    }
}
