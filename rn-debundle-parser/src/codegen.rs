// JavaScript code generation
// Prints AST nodes back to source text with minimal parentheses

use std::fmt;

use crate::ast::*;

/// Output formatting options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Text used for one level of indentation
    pub indent: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

/// Print a program. Statements are separated by newlines and the
/// output carries no trailing newline.
pub fn generate(program: &Program, options: &GenerateOptions) -> String {
    CodeGenerator::new(options).program(program)
}

/// Print a single statement at indentation level zero
pub fn generate_statement(statement: &Statement, options: &GenerateOptions) -> String {
    CodeGenerator::new(options).statement(statement)
}

/// Print a single expression
pub fn generate_expression(expression: &Expression, options: &GenerateOptions) -> String {
    CodeGenerator::new(options).expression(expression, Precedence::Sequence)
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", generate(self, &GenerateOptions::default()))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", generate_statement(self, &GenerateOptions::default()))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", generate_expression(self, &GenerateOptions::default()))
    }
}

/// Binding strength, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Sequence,
    Assignment,
    Conditional,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponent,
    Unary,
    Postfix,
    Call,
    New,
    Member,
    Primary,
}

impl Precedence {
    fn next(self) -> Self {
        match self {
            Precedence::Sequence => Precedence::Assignment,
            Precedence::Assignment => Precedence::Conditional,
            Precedence::Conditional => Precedence::Coalesce,
            Precedence::Coalesce => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::BitwiseOr,
            Precedence::BitwiseOr => Precedence::BitwiseXor,
            Precedence::BitwiseXor => Precedence::BitwiseAnd,
            Precedence::BitwiseAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Shift,
            Precedence::Shift => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Exponent,
            Precedence::Exponent => Precedence::Unary,
            Precedence::Unary => Precedence::Postfix,
            Precedence::Postfix => Precedence::Call,
            Precedence::Call => Precedence::New,
            Precedence::New => Precedence::Member,
            Precedence::Member | Precedence::Primary => Precedence::Primary,
        }
    }
}

fn binary_precedence(operator: BinaryOperator) -> Precedence {
    match operator {
        BinaryOperator::NullishCoalescing => Precedence::Coalesce,
        BinaryOperator::LogicalOr => Precedence::LogicalOr,
        BinaryOperator::LogicalAnd => Precedence::LogicalAnd,
        BinaryOperator::BitwiseOr => Precedence::BitwiseOr,
        BinaryOperator::BitwiseXor => Precedence::BitwiseXor,
        BinaryOperator::BitwiseAnd => Precedence::BitwiseAnd,
        BinaryOperator::Equal
        | BinaryOperator::NotEqual
        | BinaryOperator::StrictEqual
        | BinaryOperator::StrictNotEqual => Precedence::Equality,
        BinaryOperator::Less
        | BinaryOperator::LessEqual
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEqual
        | BinaryOperator::InstanceOf
        | BinaryOperator::In => Precedence::Relational,
        BinaryOperator::ShiftLeft
        | BinaryOperator::ShiftRight
        | BinaryOperator::ShiftRightUnsigned => Precedence::Shift,
        BinaryOperator::Add | BinaryOperator::Subtract => Precedence::Additive,
        BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => {
            Precedence::Multiplicative
        }
        BinaryOperator::Exponent => Precedence::Exponent,
    }
}

fn precedence_of(expression: &Expression) -> Precedence {
    match &expression.kind {
        ExpressionKind::Sequence(_) => Precedence::Sequence,
        ExpressionKind::Assignment(_) | ExpressionKind::Arrow(_) | ExpressionKind::Yield(_) => {
            Precedence::Assignment
        }
        ExpressionKind::Conditional(_) => Precedence::Conditional,
        ExpressionKind::Binary(binary) => binary_precedence(binary.operator),
        ExpressionKind::Unary(_) | ExpressionKind::Await(_) => Precedence::Unary,
        ExpressionKind::Update(update) if update.prefix => Precedence::Unary,
        ExpressionKind::Update(_) => Precedence::Postfix,
        ExpressionKind::Call(_) | ExpressionKind::ImportCall(_) => Precedence::Call,
        ExpressionKind::New(_) => Precedence::New,
        ExpressionKind::Member(_) | ExpressionKind::TaggedTemplate(_) => Precedence::Member,
        _ => Precedence::Primary,
    }
}

fn is_binary(expression: &Expression, predicate: impl Fn(BinaryOperator) -> bool) -> bool {
    matches!(&expression.kind, ExpressionKind::Binary(binary) if predicate(binary.operator))
}

/// A call anywhere in a member chain would bind to `new` unless parenthesized
fn has_call_in_chain(expression: &Expression) -> bool {
    match &expression.kind {
        ExpressionKind::Call(_) | ExpressionKind::ImportCall(_) => true,
        ExpressionKind::Member(member) => has_call_in_chain(&member.object),
        ExpressionKind::TaggedTemplate(tagged) => has_call_in_chain(&tagged.tag),
        _ => false,
    }
}

/// `1.toString()` does not parse; `(1).toString()` does
fn is_bare_integer_literal(expression: &Expression) -> bool {
    matches!(
        &expression.kind,
        ExpressionKind::Literal(Literal::Number(number))
            if number.raw.bytes().all(|b| b.is_ascii_digit() || b == b'_')
    )
}

/// An `if` without `else` at the tail of a statement would capture a following `else`
fn ends_with_dangling_if(statement: &Statement) -> bool {
    match &statement.kind {
        StatementKind::If(if_statement) => match &if_statement.alternate {
            Some(alternate) => ends_with_dangling_if(alternate),
            None => true,
        },
        StatementKind::For(for_statement) => ends_with_dangling_if(&for_statement.body),
        StatementKind::ForIn(for_in) => ends_with_dangling_if(&for_in.body),
        StatementKind::ForOf(for_of) => ends_with_dangling_if(&for_of.body),
        StatementKind::While(while_statement) => ends_with_dangling_if(&while_statement.body),
        StatementKind::With(with) => ends_with_dangling_if(&with.body),
        StatementKind::Labeled(labeled) => ends_with_dangling_if(&labeled.body),
        _ => false,
    }
}

fn starts_with_word(text: &str, word: &str) -> bool {
    text.strip_prefix(word).is_some_and(|rest| {
        !rest
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
    })
}

/// Expression statements may not begin with these tokens
fn needs_statement_parens(text: &str) -> bool {
    text.starts_with('{')
        || starts_with_word(text, "function")
        || starts_with_word(text, "class")
        || text.starts_with("let [")
        || (starts_with_word(text, "async")
            && starts_with_word(text["async".len()..].trim_start(), "function"))
}

struct CodeGenerator<'a> {
    options: &'a GenerateOptions,
    level: usize,
    /// Cleared while printing a `for` initializer, where a bare `in` would end the clause
    allow_in: bool,
}

impl<'a> CodeGenerator<'a> {
    fn new(options: &'a GenerateOptions) -> Self {
        Self {
            options,
            level: 0,
            allow_in: true,
        }
    }

    fn indent(&self) -> String {
        self.options.indent.repeat(self.level)
    }

    fn program(&mut self, program: &Program) -> String {
        program
            .body
            .iter()
            .map(|statement| self.statement(statement))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn statement(&mut self, statement: &Statement) -> String {
        match &statement.kind {
            StatementKind::Expression(expression) => {
                let text = self.expression(expression, Precedence::Sequence);
                if needs_statement_parens(&text) {
                    format!("({});", text)
                } else {
                    format!("{};", text)
                }
            }
            StatementKind::Block(block) => self.block(&block.body),
            StatementKind::Empty => ";".to_string(),
            StatementKind::Debugger => "debugger;".to_string(),
            StatementKind::VariableDeclaration(declaration) => {
                format!("{};", self.variable_declaration(declaration))
            }
            StatementKind::FunctionDeclaration(function) => self.function(function),
            StatementKind::ClassDeclaration(class) => self.class(class),
            StatementKind::Return(argument) => match argument {
                Some(argument) => {
                    format!("return {};", self.expression(argument, Precedence::Sequence))
                }
                None => "return;".to_string(),
            },
            StatementKind::If(if_statement) => self.if_statement(if_statement),
            StatementKind::For(for_statement) => self.for_statement(for_statement),
            StatementKind::ForIn(for_in) => {
                let left = self.for_binding(&for_in.left);
                let right = self.expression(&for_in.right, Precedence::Sequence);
                let body = self.body_statement(&for_in.body);
                format!("for ({} in {}){}", left, right, body)
            }
            StatementKind::ForOf(for_of) => {
                let left = self.for_binding(&for_of.left);
                let right = self.expression(&for_of.right, Precedence::Assignment);
                let body = self.body_statement(&for_of.body);
                let keyword = if for_of.is_await { "for await" } else { "for" };
                format!("{} ({} of {}){}", keyword, left, right, body)
            }
            StatementKind::While(while_statement) => {
                let test = self.expression(&while_statement.test, Precedence::Sequence);
                let body = self.body_statement(&while_statement.body);
                format!("while ({}){}", test, body)
            }
            StatementKind::DoWhile(do_while) => {
                let body = self.body_statement(&do_while.body);
                let test = self.expression(&do_while.test, Precedence::Sequence);
                if matches!(do_while.body.kind, StatementKind::Block(_)) {
                    format!("do{} while ({});", body, test)
                } else {
                    format!("do{}\n{}while ({});", body, self.indent(), test)
                }
            }
            StatementKind::Break(label) => match label {
                Some(label) => format!("break {};", label.name),
                None => "break;".to_string(),
            },
            StatementKind::Continue(label) => match label {
                Some(label) => format!("continue {};", label.name),
                None => "continue;".to_string(),
            },
            StatementKind::Throw(argument) => {
                format!("throw {};", self.expression(argument, Precedence::Sequence))
            }
            StatementKind::Try(try_statement) => self.try_statement(try_statement),
            StatementKind::Switch(switch) => self.switch_statement(switch),
            StatementKind::With(with) => {
                let object = self.expression(&with.object, Precedence::Sequence);
                let body = self.body_statement(&with.body);
                format!("with ({}){}", object, body)
            }
            StatementKind::Labeled(labeled) => {
                let body = self.statement(&labeled.body);
                format!("{}: {}", labeled.label.name, body)
            }
            StatementKind::Import(import) => self.import_declaration(import),
        }
    }

    /// Braced statement list; an empty block prints as `{` newline `}`
    fn block(&mut self, body: &[Statement]) -> String {
        let saved_allow_in = std::mem::replace(&mut self.allow_in, true);

        let text = if body.is_empty() {
            format!("{{\n{}}}", self.indent())
        } else {
            self.level += 1;
            let mut text = String::from("{\n");
            for statement in body {
                text.push_str(&self.indent());
                text.push_str(&self.statement(statement));
                text.push('\n');
            }
            self.level -= 1;
            text.push_str(&self.indent());
            text.push('}');
            text
        };

        self.allow_in = saved_allow_in;
        text
    }

    /// Body of a compound statement, printed after its header
    fn body_statement(&mut self, body: &Statement) -> String {
        match &body.kind {
            StatementKind::Block(block) => format!(" {}", self.block(&block.body)),
            StatementKind::Empty => ";".to_string(),
            _ => {
                self.level += 1;
                let text = format!("\n{}{}", self.indent(), self.statement(body));
                self.level -= 1;
                text
            }
        }
    }

    fn variable_declaration(&mut self, declaration: &VariableDeclaration) -> String {
        let declarators = declaration
            .declarations
            .iter()
            .map(|declarator| {
                let target = self.pattern(&declarator.target);
                match &declarator.init {
                    Some(init) => {
                        format!("{} = {}", target, self.expression(init, Precedence::Assignment))
                    }
                    None => target,
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!("{} {}", declaration.kind.as_str(), declarators)
    }

    fn if_statement(&mut self, if_statement: &IfStatement) -> String {
        let test = self.expression(&if_statement.test, Precedence::Sequence);
        let mut text = format!("if ({})", test);

        let consequent_is_block = match &if_statement.alternate {
            Some(_) if ends_with_dangling_if(&if_statement.consequent) => {
                let wrapped = self.block(std::slice::from_ref(if_statement.consequent.as_ref()));
                text.push(' ');
                text.push_str(&wrapped);
                true
            }
            _ => {
                text.push_str(&self.body_statement(&if_statement.consequent));
                matches!(if_statement.consequent.kind, StatementKind::Block(_))
            }
        };

        if let Some(alternate) = &if_statement.alternate {
            if consequent_is_block {
                text.push_str(" else");
            } else {
                text.push('\n');
                text.push_str(&self.indent());
                text.push_str("else");
            }

            match &alternate.kind {
                StatementKind::If(_) => {
                    text.push(' ');
                    text.push_str(&self.statement(alternate));
                }
                _ => text.push_str(&self.body_statement(alternate)),
            }
        }

        text
    }

    fn for_statement(&mut self, for_statement: &ForStatement) -> String {
        let saved_allow_in = std::mem::replace(&mut self.allow_in, false);
        let init = match &for_statement.init {
            Some(ForInit::Declaration(declaration)) => self.variable_declaration(declaration),
            Some(ForInit::Expression(expression)) => {
                let text = self.expression(expression, Precedence::Sequence);
                if text.starts_with("let [") {
                    format!("({})", text)
                } else {
                    text
                }
            }
            None => String::new(),
        };
        self.allow_in = saved_allow_in;

        let test = for_statement
            .test
            .as_ref()
            .map(|test| format!(" {}", self.expression(test, Precedence::Sequence)))
            .unwrap_or_default();
        let update = for_statement
            .update
            .as_ref()
            .map(|update| format!(" {}", self.expression(update, Precedence::Sequence)))
            .unwrap_or_default();
        let body = self.body_statement(&for_statement.body);

        format!("for ({};{};{}){}", init, test, update, body)
    }

    fn for_binding(&mut self, binding: &ForBinding) -> String {
        match binding {
            ForBinding::Declaration { kind, target } => {
                format!("{} {}", kind.as_str(), self.pattern(target))
            }
            ForBinding::Target(expression) => self.expression(expression, Precedence::Call),
        }
    }

    fn try_statement(&mut self, try_statement: &TryStatement) -> String {
        let mut text = format!("try {}", self.block(&try_statement.block.body));

        if let Some(handler) = &try_statement.handler {
            match &handler.param {
                Some(param) => {
                    let param = self.pattern(param);
                    text.push_str(&format!(" catch ({}) ", param));
                }
                None => text.push_str(" catch "),
            }
            text.push_str(&self.block(&handler.body.body));
        }

        if let Some(finalizer) = &try_statement.finalizer {
            text.push_str(" finally ");
            text.push_str(&self.block(&finalizer.body));
        }

        text
    }

    fn switch_statement(&mut self, switch: &SwitchStatement) -> String {
        let discriminant = self.expression(&switch.discriminant, Precedence::Sequence);
        let mut text = format!("switch ({}) {{\n", discriminant);

        for case in &switch.cases {
            text.push_str(&self.indent());
            match &case.test {
                Some(test) => {
                    let test = self.expression(test, Precedence::Sequence);
                    text.push_str(&format!("case {}:", test));
                }
                None => text.push_str("default:"),
            }
            text.push('\n');

            self.level += 1;
            for statement in &case.consequent {
                text.push_str(&self.indent());
                text.push_str(&self.statement(statement));
                text.push('\n');
            }
            self.level -= 1;
        }

        text.push_str(&self.indent());
        text.push('}');
        text
    }

    fn import_declaration(&mut self, import: &ImportDeclaration) -> String {
        let mut clauses = Vec::new();
        let mut named = Vec::new();

        for specifier in &import.specifiers {
            match specifier {
                ImportSpecifier::Default { local } => clauses.push(local.name.clone()),
                ImportSpecifier::Namespace { local } => {
                    clauses.push(format!("* as {}", local.name))
                }
                ImportSpecifier::Named { imported, local } => {
                    let imported_text = match imported {
                        ModuleExportName::Identifier(identifier) => identifier.name.clone(),
                        ModuleExportName::String(string) => string.raw.clone(),
                    };
                    if imported_text == local.name {
                        named.push(imported_text);
                    } else {
                        named.push(format!("{} as {}", imported_text, local.name));
                    }
                }
            }
        }

        if !named.is_empty() {
            clauses.push(format!("{{ {} }}", named.join(", ")));
        }

        if clauses.is_empty() {
            format!("import {};", import.source.raw)
        } else {
            format!("import {} from {};", clauses.join(", "), import.source.raw)
        }
    }

    // =========================================================================
    // Functions and classes
    // =========================================================================

    fn function(&mut self, function: &Function) -> String {
        let mut text = String::new();
        if function.is_async {
            text.push_str("async ");
        }
        text.push_str("function");
        if function.is_generator {
            text.push('*');
        }
        match &function.id {
            Some(id) => {
                text.push(' ');
                text.push_str(&id.name);
            }
            None => text.push(' '),
        }

        let params = self.parameters(&function.params);
        text.push_str(&format!("({}) ", params));
        text.push_str(&self.block(&function.body));
        text
    }

    fn parameters(&mut self, params: &[Pattern]) -> String {
        params
            .iter()
            .map(|param| self.pattern(param))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn arrow_function(&mut self, arrow: &ArrowFunction) -> String {
        let mut text = String::new();
        if arrow.is_async {
            text.push_str("async ");
        }

        match arrow.params.as_slice() {
            [Pattern::Identifier(identifier)] => text.push_str(&identifier.name),
            params => {
                let params = self.parameters(params);
                text.push_str(&format!("({})", params));
            }
        }
        text.push_str(" => ");

        match &arrow.body {
            ArrowBody::Block(body) => text.push_str(&self.block(body)),
            ArrowBody::Expression(expression) => {
                let body = self.expression(expression, Precedence::Assignment);
                if body.starts_with('{') {
                    text.push_str(&format!("({})", body));
                } else {
                    text.push_str(&body);
                }
            }
        }

        text
    }

    fn class(&mut self, class: &Class) -> String {
        let mut text = String::from("class");
        if let Some(id) = &class.id {
            text.push(' ');
            text.push_str(&id.name);
        }
        if let Some(super_class) = &class.super_class {
            let super_class = self.expression(super_class, Precedence::Call);
            text.push_str(&format!(" extends {}", super_class));
        }
        text.push(' ');

        if class.body.is_empty() {
            text.push_str(&format!("{{\n{}}}", self.indent()));
            return text;
        }

        self.level += 1;
        let mut members = String::from("{\n");
        for member in &class.body {
            members.push_str(&self.indent());
            match member {
                ClassMember::Method { is_static, method } => {
                    if *is_static {
                        members.push_str("static ");
                    }
                    members.push_str(&self.method_definition(method));
                }
                ClassMember::Field {
                    is_static,
                    key,
                    value,
                    ..
                } => {
                    if *is_static {
                        members.push_str("static ");
                    }
                    members.push_str(&self.property_key(key));
                    if let Some(value) = value {
                        members.push_str(" = ");
                        members.push_str(&self.expression(value, Precedence::Assignment));
                    }
                    members.push(';');
                }
            }
            members.push('\n');
        }
        self.level -= 1;
        members.push_str(&self.indent());
        members.push('}');

        text.push_str(&members);
        text
    }

    fn method_definition(&mut self, method: &MethodDefinition) -> String {
        let mut text = String::new();
        match method.kind {
            MethodKind::Getter => text.push_str("get "),
            MethodKind::Setter => text.push_str("set "),
            MethodKind::Method => {
                if method.function.is_async {
                    text.push_str("async ");
                }
                if method.function.is_generator {
                    text.push('*');
                }
            }
        }

        text.push_str(&self.property_key(&method.key));
        let params = self.parameters(&method.function.params);
        text.push_str(&format!("({}) ", params));
        text.push_str(&self.block(&method.function.body));
        text
    }

    fn property_key(&mut self, key: &PropertyKey) -> String {
        match key {
            PropertyKey::Identifier(identifier) => identifier.name.clone(),
            PropertyKey::String(string) => string.raw.clone(),
            PropertyKey::Number(number) => number.raw.clone(),
            PropertyKey::Computed(expression) => {
                let saved_allow_in = std::mem::replace(&mut self.allow_in, true);
                let text = format!("[{}]", self.expression(expression, Precedence::Assignment));
                self.allow_in = saved_allow_in;
                text
            }
            PropertyKey::Private(identifier) => format!("#{}", identifier.name),
        }
    }

    // =========================================================================
    // Patterns
    // =========================================================================

    fn pattern(&mut self, pattern: &Pattern) -> String {
        match pattern {
            Pattern::Identifier(identifier) => identifier.name.clone(),
            Pattern::Array(array) => {
                let elements = array
                    .elements
                    .iter()
                    .map(|element| match element {
                        Some(element) => self.pattern(element),
                        None => String::new(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                let trailing_hole = matches!(array.elements.last(), Some(None));
                format!("[{}{}]", elements, if trailing_hole { "," } else { "" })
            }
            Pattern::Object(object) => {
                if object.properties.is_empty() {
                    return "{}".to_string();
                }
                let properties = object
                    .properties
                    .iter()
                    .map(|property| match property {
                        ObjectPatternProperty::KeyValue { key, value } => {
                            format!("{}: {}", self.property_key(key), self.pattern(value))
                        }
                        ObjectPatternProperty::Shorthand { name, default } => match default {
                            Some(default) => format!(
                                "{} = {}",
                                name.name,
                                self.expression(default, Precedence::Assignment)
                            ),
                            None => name.name.clone(),
                        },
                        ObjectPatternProperty::Rest(rest) => {
                            format!("...{}", self.pattern(&rest.argument))
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{ {} }}", properties)
            }
            Pattern::Assignment(assignment) => {
                let target = self.pattern(&assignment.target);
                let default = self.expression(&assignment.default, Precedence::Assignment);
                format!("{} = {}", target, default)
            }
            Pattern::Rest(rest) => format!("...{}", self.pattern(&rest.argument)),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Print an expression, parenthesizing it when it binds looser than `required`
    fn expression(&mut self, expression: &Expression, required: Precedence) -> String {
        let blocked_in = !self.allow_in
            && is_binary(expression, |operator| operator == BinaryOperator::In);

        if precedence_of(expression) < required || blocked_in {
            self.parenthesized(expression)
        } else {
            self.expression_text(expression)
        }
    }

    fn parenthesized(&mut self, expression: &Expression) -> String {
        let saved_allow_in = std::mem::replace(&mut self.allow_in, true);
        let text = format!("({})", self.expression_text(expression));
        self.allow_in = saved_allow_in;
        text
    }

    fn expression_text(&mut self, expression: &Expression) -> String {
        match &expression.kind {
            ExpressionKind::Identifier(identifier) => identifier.name.clone(),
            ExpressionKind::This => "this".to_string(),
            ExpressionKind::Super => "super".to_string(),
            ExpressionKind::Literal(literal) => literal_text(literal),
            ExpressionKind::Template(template) => self.template(template),
            ExpressionKind::TaggedTemplate(tagged) => {
                let tag = self.expression(&tagged.tag, Precedence::Call);
                format!("{}{}", tag, self.template(&tagged.quasi))
            }
            ExpressionKind::Array(array) => self.array_literal(array),
            ExpressionKind::Object(object) => self.object_literal(object),
            ExpressionKind::Function(function) => self.function(function),
            ExpressionKind::Arrow(arrow) => self.arrow_function(arrow),
            ExpressionKind::Class(class) => self.class(class),
            ExpressionKind::Unary(unary) => {
                let operand = if is_binary(&unary.operand, |op| op == BinaryOperator::Exponent) {
                    self.parenthesized(&unary.operand)
                } else {
                    self.expression(&unary.operand, Precedence::Unary)
                };
                let operator = unary.operator.as_str();
                let needs_space = unary.operator.is_keyword()
                    || (matches!(unary.operator, UnaryOperator::Plus | UnaryOperator::Minus)
                        && operand.starts_with(operator));
                if needs_space {
                    format!("{} {}", operator, operand)
                } else {
                    format!("{}{}", operator, operand)
                }
            }
            ExpressionKind::Update(update) => {
                let operand = self.expression(&update.operand, Precedence::Call);
                if update.prefix {
                    format!("{}{}", update.operator.as_str(), operand)
                } else {
                    format!("{}{}", operand, update.operator.as_str())
                }
            }
            ExpressionKind::Binary(binary) => self.binary(binary),
            ExpressionKind::Assignment(assignment) => {
                let target = self.expression(&assignment.target, Precedence::Call);
                let value = self.expression(&assignment.value, Precedence::Assignment);
                format!("{} {} {}", target, assignment.operator.as_str(), value)
            }
            ExpressionKind::Conditional(conditional) => {
                let test = self.expression(&conditional.test, Precedence::Coalesce);
                let consequent = self.expression(&conditional.consequent, Precedence::Assignment);
                let alternate = self.expression(&conditional.alternate, Precedence::Assignment);
                format!("{} ? {} : {}", test, consequent, alternate)
            }
            ExpressionKind::Call(call) => {
                let callee = self.expression(&call.callee, Precedence::Call);
                let arguments = self.arguments(&call.arguments);
                let link = if call.optional { "?." } else { "" };
                format!("{}{}({})", callee, link, arguments)
            }
            ExpressionKind::New(new) => {
                let callee = if has_call_in_chain(&new.callee) {
                    self.parenthesized(&new.callee)
                } else {
                    self.expression(&new.callee, Precedence::New)
                };
                let arguments = self.arguments(&new.arguments);
                format!("new {}({})", callee, arguments)
            }
            ExpressionKind::Member(member) => {
                let object = if is_bare_integer_literal(&member.object) {
                    self.parenthesized(&member.object)
                } else {
                    self.expression(&member.object, Precedence::Call)
                };
                match &member.property {
                    MemberProperty::Identifier(name) => {
                        let link = if member.optional { "?." } else { "." };
                        format!("{}{}{}", object, link, name.name)
                    }
                    MemberProperty::Private(name) => {
                        let link = if member.optional { "?." } else { "." };
                        format!("{}{}#{}", object, link, name.name)
                    }
                    MemberProperty::Computed(property) => {
                        let saved_allow_in = std::mem::replace(&mut self.allow_in, true);
                        let property = self.expression(property, Precedence::Sequence);
                        self.allow_in = saved_allow_in;
                        let link = if member.optional { "?." } else { "" };
                        format!("{}{}[{}]", object, link, property)
                    }
                }
            }
            ExpressionKind::Sequence(expressions) => expressions
                .iter()
                .map(|expression| self.expression(expression, Precedence::Assignment))
                .collect::<Vec<_>>()
                .join(", "),
            ExpressionKind::Yield(yield_expression) => {
                let mut text = String::from("yield");
                if yield_expression.delegate {
                    text.push('*');
                }
                if let Some(argument) = &yield_expression.argument {
                    text.push(' ');
                    text.push_str(&self.expression(argument, Precedence::Assignment));
                }
                text
            }
            ExpressionKind::Await(argument) => {
                let argument = if is_binary(argument, |op| op == BinaryOperator::Exponent) {
                    self.parenthesized(argument)
                } else {
                    self.expression(argument, Precedence::Unary)
                };
                format!("await {}", argument)
            }
            ExpressionKind::MetaProperty(meta) => format!("{}.{}", meta.meta, meta.property),
            ExpressionKind::ImportCall(source) => {
                let saved_allow_in = std::mem::replace(&mut self.allow_in, true);
                let source = self.expression(source, Precedence::Assignment);
                self.allow_in = saved_allow_in;
                format!("import({})", source)
            }
        }
    }

    fn binary(&mut self, binary: &BinaryOperation) -> String {
        let precedence = binary_precedence(binary.operator);
        let is_exponent = binary.operator == BinaryOperator::Exponent;

        // `??` cannot be mixed with `||` or `&&` without parentheses
        let clashes = |child: &Expression| match binary.operator {
            BinaryOperator::NullishCoalescing => is_binary(child, |op| op.is_logical()),
            op if op.is_logical() => {
                is_binary(child, |op| op == BinaryOperator::NullishCoalescing)
            }
            _ => false,
        };

        let (left_required, right_required) = if is_exponent {
            (precedence.next(), precedence)
        } else {
            (precedence, precedence.next())
        };

        let left_is_unary = matches!(
            binary.left.kind,
            ExpressionKind::Unary(_) | ExpressionKind::Await(_)
        );
        let left = if clashes(&binary.left) || (is_exponent && left_is_unary) {
            self.parenthesized(&binary.left)
        } else {
            self.expression(&binary.left, left_required)
        };
        let right = if clashes(&binary.right) {
            self.parenthesized(&binary.right)
        } else {
            self.expression(&binary.right, right_required)
        };

        format!("{} {} {}", left, binary.operator.as_str(), right)
    }

    fn arguments(&mut self, arguments: &[Argument]) -> String {
        let saved_allow_in = std::mem::replace(&mut self.allow_in, true);
        let text = arguments
            .iter()
            .map(|argument| match argument {
                Argument::Expression(expression) => {
                    self.expression(expression, Precedence::Assignment)
                }
                Argument::Spread(expression) => {
                    format!("...{}", self.expression(expression, Precedence::Assignment))
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        self.allow_in = saved_allow_in;
        text
    }

    fn array_literal(&mut self, array: &ArrayLiteral) -> String {
        let saved_allow_in = std::mem::replace(&mut self.allow_in, true);
        let elements = array
            .elements
            .iter()
            .map(|element| match element {
                ArrayElement::Expression(expression) => {
                    self.expression(expression, Precedence::Assignment)
                }
                ArrayElement::Spread(expression) => {
                    format!("...{}", self.expression(expression, Precedence::Assignment))
                }
                ArrayElement::Hole => String::new(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        self.allow_in = saved_allow_in;

        let trailing_hole = matches!(array.elements.last(), Some(ArrayElement::Hole));
        format!("[{}{}]", elements, if trailing_hole { "," } else { "" })
    }

    fn object_literal(&mut self, object: &ObjectLiteral) -> String {
        if object.properties.is_empty() {
            return "{}".to_string();
        }

        let saved_allow_in = std::mem::replace(&mut self.allow_in, true);
        self.level += 1;
        let members = object
            .properties
            .iter()
            .map(|member| {
                let text = match member {
                    ObjectMember::KeyValue { key, value } => {
                        let key = self.property_key(key);
                        format!("{}: {}", key, self.expression(value, Precedence::Assignment))
                    }
                    ObjectMember::Shorthand { name, default } => match default {
                        Some(default) => format!(
                            "{} = {}",
                            name.name,
                            self.expression(default, Precedence::Assignment)
                        ),
                        None => name.name.clone(),
                    },
                    ObjectMember::Method(method) => self.method_definition(method),
                    ObjectMember::Spread(expression) => {
                        format!("...{}", self.expression(expression, Precedence::Assignment))
                    }
                };
                format!("{}{}", self.indent(), text)
            })
            .collect::<Vec<_>>()
            .join(",\n");
        self.level -= 1;
        self.allow_in = saved_allow_in;

        format!("{{\n{}\n{}}}", members, self.indent())
    }

    fn template(&mut self, template: &TemplateLiteral) -> String {
        let saved_allow_in = std::mem::replace(&mut self.allow_in, true);
        let mut text = String::from("`");
        for (index, quasi) in template.quasis.iter().enumerate() {
            text.push_str(quasi);
            if let Some(expression) = template.expressions.get(index) {
                text.push_str("${");
                text.push_str(&self.expression(expression, Precedence::Sequence));
                text.push('}');
            }
        }
        text.push('`');
        self.allow_in = saved_allow_in;
        text
    }
}

fn literal_text(literal: &Literal) -> String {
    match literal {
        Literal::Null => "null".to_string(),
        Literal::Boolean(value) => value.to_string(),
        Literal::Number(number) => number.raw.clone(),
        Literal::BigInt(bigint) => bigint.raw.clone(),
        Literal::String(string) => string.raw.clone(),
        Literal::RegExp(regex) => format!("/{}/{}", regex.pattern, regex.flags),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_start_detection() {
        assert!(needs_statement_parens("{}.a"));
        assert!(needs_statement_parens("function () {\n}()"));
        assert!(needs_statement_parens("async function () {\n}()"));
        assert!(!needs_statement_parens("functional()"));
        assert!(!needs_statement_parens("classy = 1"));
        assert!(!needs_statement_parens("async()"));
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(Precedence::Sequence < Precedence::Assignment);
        assert!(Precedence::Coalesce < Precedence::LogicalOr);
        assert!(Precedence::Call < Precedence::Member);
        assert_eq!(Precedence::Exponent.next(), Precedence::Unary);
    }

    #[test]
    fn test_default_indent_is_two_spaces() {
        assert_eq!(GenerateOptions::default().indent, "  ");
        assert_eq!(GenerateOptions::new().with_indent("\t").indent, "\t");
    }
}
