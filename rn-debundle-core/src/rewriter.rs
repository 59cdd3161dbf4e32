//! Module rewriting
//!
//! Turns a decoded module into a standalone ES module: factory parameters that
//! receive dependencies become default imports, followed by the factory body.
//! Parameters past the last dependency stay free in the body, since the bundle
//! runtime passes `global`, `require`, `module`, `exports` and friends there.

use rn_debundle_parser::{
    ImportDeclaration, ImportSpecifier, Program, SourceType, Span, Statement, StatementKind,
    StringLiteral,
};

use crate::module::{Module, ModuleId};
use crate::naming::{import_source, module_file_name, module_name};

/// A module ready to be printed as its own file
#[derive(Debug, Clone, PartialEq)]
pub struct RewrittenProgram {
    pub id: ModuleId,
    /// `mod_<id>`
    pub name: String,
    /// `mod_<id>.js`
    pub file_name: String,
    pub program: Program,
    /// Span of the registration statement in the bundle
    pub span: Span,
}

pub fn rewrite_module(module: Module) -> RewrittenProgram {
    let imports: Vec<Statement> = module
        .bindings()
        .map(|(parameter, dependency)| {
            let declaration = ImportDeclaration {
                specifiers: vec![ImportSpecifier::Default {
                    local: parameter.clone(),
                }],
                source: StringLiteral::new(import_source(dependency)),
                span: Span::synthetic(),
            };
            Statement::new(StatementKind::Import(declaration), Span::synthetic())
        })
        .collect();

    let mut body = imports;
    body.extend(module.implementation.body);

    RewrittenProgram {
        name: module_name(&module.id),
        file_name: module_file_name(&module.id),
        program: Program::new(body, SourceType::Module),
        id: module.id,
        span: module.span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistrationPattern;
    use crate::decoder::decode_module;
    use crate::extractor::extract_modules;
    use pretty_assertions::assert_eq;
    use rn_debundle_parser::{generate, parse_program, GenerateOptions};

    fn rewrite(source: &str) -> RewrittenProgram {
        let pattern = RegistrationPattern::default();
        let mut extraction = extract_modules(parse_program(source).unwrap(), &pattern);
        rewrite_module(decode_module(extraction.calls.remove(0), &pattern).unwrap())
    }

    fn print(rewritten: &RewrittenProgram) -> String {
        generate(&rewritten.program, &GenerateOptions::default())
    }

    #[test]
    fn test_dependencies_become_imports() {
        let rewritten =
            rewrite("__d(function (g, r, i, a, m, e, d) { e.exports = g + r; }, '42', ['7', '9']);");

        assert_eq!(rewritten.name, "mod_42");
        assert_eq!(rewritten.file_name, "mod_42.js");
        assert_eq!(rewritten.program.source_type, SourceType::Module);
        assert_eq!(
            print(&rewritten),
            "import g from './mod_7';\nimport r from './mod_9';\ne.exports = g + r;"
        );
    }

    #[test]
    fn test_extra_dependencies_are_dropped() {
        let rewritten = rewrite("__d(function (a) { a(); }, 1, [2, 3, 4]);");
        assert_eq!(print(&rewritten), "import a from './mod_2';\na();");
    }

    #[test]
    fn test_module_without_dependencies() {
        let rewritten = rewrite("__d(function (g, r) { r(0); }, 0, []);");
        assert_eq!(print(&rewritten), "r(0);");
    }

    #[test]
    fn test_numeric_ids_use_canonical_spelling() {
        let rewritten = rewrite("__d(function (a) {}, 0x10, [1.50]);");
        assert_eq!(rewritten.file_name, "mod_16.js");
        assert_eq!(print(&rewritten), "import a from './mod_1.5';");
    }
}
