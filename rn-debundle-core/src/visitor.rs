//! Visitor traits for traversing the JavaScript syntax tree
//!
//! [`Visitor`] borrows the tree and [`VisitorMut`] may rewrite it in place.
//! Both walk depth-first in source order and reach every statement list
//! (program body, blocks, function and method bodies, switch cases), so a
//! statement is visited at the same pre-order position by either walk.
//!
//! Implementors override the `visit_*` hooks they care about and call the
//! matching `walk_*` function to keep descending.

use rn_debundle_parser::{
    ArrayElement, Argument, ArrowBody, ArrowFunction, Class, ClassMember, Expression,
    ExpressionKind, ForBinding, ForInit, Function, MemberProperty, MethodDefinition,
    ObjectMember, ObjectPatternProperty, Pattern, Program, PropertyKey, Statement,
    StatementKind, VariableDeclaration,
};

/// Read-only traversal
pub trait Visitor: Sized {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program)
    }

    /// Visit a statement, in a statement list or in a single-statement slot
    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement)
    }

    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression)
    }

    /// Visit a function declaration, function expression or method body
    fn visit_function(&mut self, function: &Function) {
        walk_function(self, function)
    }

    fn visit_class(&mut self, class: &Class) {
        walk_class(self, class)
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern)
    }
}

/// Mutating traversal
pub trait VisitorMut: Sized {
    fn visit_program_mut(&mut self, program: &mut Program) {
        self.visit_statement_list_mut(&mut program.body)
    }

    /// Visit a statement list; implementors may add or remove statements
    fn visit_statement_list_mut(&mut self, statements: &mut Vec<Statement>) {
        walk_statement_list_mut(self, statements)
    }

    /// Visit a statement in a single-statement slot (`if` branches, loop bodies, labels)
    /// or, through the default list walk, a member of a statement list
    fn visit_statement_mut(&mut self, statement: &mut Statement) {
        walk_statement_mut(self, statement)
    }

    fn visit_expression_mut(&mut self, expression: &mut Expression) {
        walk_expression_mut(self, expression)
    }

    fn visit_function_mut(&mut self, function: &mut Function) {
        walk_function_mut(self, function)
    }

    fn visit_class_mut(&mut self, class: &mut Class) {
        walk_class_mut(self, class)
    }

    fn visit_pattern_mut(&mut self, pattern: &mut Pattern) {
        walk_pattern_mut(self, pattern)
    }
}

// =============================================================================
// Read-only walks
// =============================================================================

pub fn walk_program<V: Visitor>(visitor: &mut V, program: &Program) {
    walk_statements(visitor, &program.body);
}

pub fn walk_statements<V: Visitor>(visitor: &mut V, statements: &[Statement]) {
    for statement in statements {
        visitor.visit_statement(statement);
    }
}

pub fn walk_statement<V: Visitor>(visitor: &mut V, statement: &Statement) {
    match &statement.kind {
        StatementKind::Expression(expression) | StatementKind::Throw(expression) => {
            visitor.visit_expression(expression)
        }
        StatementKind::Block(block) => walk_statements(visitor, &block.body),
        StatementKind::Empty
        | StatementKind::Debugger
        | StatementKind::Break(_)
        | StatementKind::Continue(_)
        | StatementKind::Import(_) => {}
        StatementKind::VariableDeclaration(declaration) => {
            walk_variable_declaration(visitor, declaration)
        }
        StatementKind::FunctionDeclaration(function) => visitor.visit_function(function),
        StatementKind::ClassDeclaration(class) => visitor.visit_class(class),
        StatementKind::Return(argument) => {
            if let Some(argument) = argument {
                visitor.visit_expression(argument);
            }
        }
        StatementKind::If(if_statement) => {
            visitor.visit_expression(&if_statement.test);
            visitor.visit_statement(&if_statement.consequent);
            if let Some(alternate) = &if_statement.alternate {
                visitor.visit_statement(alternate);
            }
        }
        StatementKind::For(for_statement) => {
            match &for_statement.init {
                Some(ForInit::Declaration(declaration)) => {
                    walk_variable_declaration(visitor, declaration)
                }
                Some(ForInit::Expression(expression)) => visitor.visit_expression(expression),
                None => {}
            }
            if let Some(test) = &for_statement.test {
                visitor.visit_expression(test);
            }
            if let Some(update) = &for_statement.update {
                visitor.visit_expression(update);
            }
            visitor.visit_statement(&for_statement.body);
        }
        StatementKind::ForIn(for_in) => {
            walk_for_binding(visitor, &for_in.left);
            visitor.visit_expression(&for_in.right);
            visitor.visit_statement(&for_in.body);
        }
        StatementKind::ForOf(for_of) => {
            walk_for_binding(visitor, &for_of.left);
            visitor.visit_expression(&for_of.right);
            visitor.visit_statement(&for_of.body);
        }
        StatementKind::While(while_statement) => {
            visitor.visit_expression(&while_statement.test);
            visitor.visit_statement(&while_statement.body);
        }
        StatementKind::DoWhile(do_while) => {
            visitor.visit_statement(&do_while.body);
            visitor.visit_expression(&do_while.test);
        }
        StatementKind::Try(try_statement) => {
            walk_statements(visitor, &try_statement.block.body);
            if let Some(handler) = &try_statement.handler {
                if let Some(param) = &handler.param {
                    visitor.visit_pattern(param);
                }
                walk_statements(visitor, &handler.body.body);
            }
            if let Some(finalizer) = &try_statement.finalizer {
                walk_statements(visitor, &finalizer.body);
            }
        }
        StatementKind::Switch(switch) => {
            visitor.visit_expression(&switch.discriminant);
            for case in &switch.cases {
                if let Some(test) = &case.test {
                    visitor.visit_expression(test);
                }
                walk_statements(visitor, &case.consequent);
            }
        }
        StatementKind::With(with) => {
            visitor.visit_expression(&with.object);
            visitor.visit_statement(&with.body);
        }
        StatementKind::Labeled(labeled) => visitor.visit_statement(&labeled.body),
    }
}

fn walk_variable_declaration<V: Visitor>(visitor: &mut V, declaration: &VariableDeclaration) {
    for declarator in &declaration.declarations {
        visitor.visit_pattern(&declarator.target);
        if let Some(init) = &declarator.init {
            visitor.visit_expression(init);
        }
    }
}

fn walk_for_binding<V: Visitor>(visitor: &mut V, binding: &ForBinding) {
    match binding {
        ForBinding::Declaration { target, .. } => visitor.visit_pattern(target),
        ForBinding::Target(expression) => visitor.visit_expression(expression),
    }
}

pub fn walk_expression<V: Visitor>(visitor: &mut V, expression: &Expression) {
    match &expression.kind {
        ExpressionKind::Identifier(_)
        | ExpressionKind::This
        | ExpressionKind::Super
        | ExpressionKind::Literal(_)
        | ExpressionKind::MetaProperty(_) => {}
        ExpressionKind::Template(template) => {
            for expression in &template.expressions {
                visitor.visit_expression(expression);
            }
        }
        ExpressionKind::TaggedTemplate(tagged) => {
            visitor.visit_expression(&tagged.tag);
            for expression in &tagged.quasi.expressions {
                visitor.visit_expression(expression);
            }
        }
        ExpressionKind::Array(array) => {
            for element in &array.elements {
                match element {
                    ArrayElement::Expression(expression) | ArrayElement::Spread(expression) => {
                        visitor.visit_expression(expression)
                    }
                    ArrayElement::Hole => {}
                }
            }
        }
        ExpressionKind::Object(object) => {
            for member in &object.properties {
                match member {
                    ObjectMember::KeyValue { key, value } => {
                        walk_property_key(visitor, key);
                        visitor.visit_expression(value);
                    }
                    ObjectMember::Shorthand { default, .. } => {
                        if let Some(default) = default {
                            visitor.visit_expression(default);
                        }
                    }
                    ObjectMember::Method(method) => walk_method(visitor, method),
                    ObjectMember::Spread(expression) => visitor.visit_expression(expression),
                }
            }
        }
        ExpressionKind::Function(function) => visitor.visit_function(function),
        ExpressionKind::Arrow(arrow) => walk_arrow_function(visitor, arrow),
        ExpressionKind::Class(class) => visitor.visit_class(class),
        ExpressionKind::Unary(unary) => visitor.visit_expression(&unary.operand),
        ExpressionKind::Update(update) => visitor.visit_expression(&update.operand),
        ExpressionKind::Binary(binary) => {
            visitor.visit_expression(&binary.left);
            visitor.visit_expression(&binary.right);
        }
        ExpressionKind::Assignment(assignment) => {
            visitor.visit_expression(&assignment.target);
            visitor.visit_expression(&assignment.value);
        }
        ExpressionKind::Conditional(conditional) => {
            visitor.visit_expression(&conditional.test);
            visitor.visit_expression(&conditional.consequent);
            visitor.visit_expression(&conditional.alternate);
        }
        ExpressionKind::Call(call) => {
            visitor.visit_expression(&call.callee);
            walk_arguments(visitor, &call.arguments);
        }
        ExpressionKind::New(new) => {
            visitor.visit_expression(&new.callee);
            walk_arguments(visitor, &new.arguments);
        }
        ExpressionKind::Member(member) => {
            visitor.visit_expression(&member.object);
            if let MemberProperty::Computed(property) = &member.property {
                visitor.visit_expression(property);
            }
        }
        ExpressionKind::Sequence(expressions) => {
            for expression in expressions {
                visitor.visit_expression(expression);
            }
        }
        ExpressionKind::Yield(yield_expression) => {
            if let Some(argument) = &yield_expression.argument {
                visitor.visit_expression(argument);
            }
        }
        ExpressionKind::Await(argument) | ExpressionKind::ImportCall(argument) => {
            visitor.visit_expression(argument)
        }
    }
}

fn walk_arguments<V: Visitor>(visitor: &mut V, arguments: &[Argument]) {
    for argument in arguments {
        match argument {
            Argument::Expression(expression) | Argument::Spread(expression) => {
                visitor.visit_expression(expression)
            }
        }
    }
}

fn walk_property_key<V: Visitor>(visitor: &mut V, key: &PropertyKey) {
    if let PropertyKey::Computed(expression) = key {
        visitor.visit_expression(expression);
    }
}

fn walk_method<V: Visitor>(visitor: &mut V, method: &MethodDefinition) {
    walk_property_key(visitor, &method.key);
    visitor.visit_function(&method.function);
}

fn walk_arrow_function<V: Visitor>(visitor: &mut V, arrow: &ArrowFunction) {
    for param in &arrow.params {
        visitor.visit_pattern(param);
    }
    match &arrow.body {
        ArrowBody::Block(body) => walk_statements(visitor, body),
        ArrowBody::Expression(expression) => visitor.visit_expression(expression),
    }
}

pub fn walk_function<V: Visitor>(visitor: &mut V, function: &Function) {
    for param in &function.params {
        visitor.visit_pattern(param);
    }
    walk_statements(visitor, &function.body);
}

pub fn walk_class<V: Visitor>(visitor: &mut V, class: &Class) {
    if let Some(super_class) = &class.super_class {
        visitor.visit_expression(super_class);
    }
    for member in &class.body {
        match member {
            ClassMember::Method { method, .. } => walk_method(visitor, method),
            ClassMember::Field { key, value, .. } => {
                walk_property_key(visitor, key);
                if let Some(value) = value {
                    visitor.visit_expression(value);
                }
            }
        }
    }
}

pub fn walk_pattern<V: Visitor>(visitor: &mut V, pattern: &Pattern) {
    match pattern {
        Pattern::Identifier(_) => {}
        Pattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                visitor.visit_pattern(element);
            }
        }
        Pattern::Object(object) => {
            for property in &object.properties {
                match property {
                    ObjectPatternProperty::KeyValue { key, value } => {
                        walk_property_key(visitor, key);
                        visitor.visit_pattern(value);
                    }
                    ObjectPatternProperty::Shorthand { default, .. } => {
                        if let Some(default) = default {
                            visitor.visit_expression(default);
                        }
                    }
                    ObjectPatternProperty::Rest(rest) => visitor.visit_pattern(&rest.argument),
                }
            }
        }
        Pattern::Assignment(assignment) => {
            visitor.visit_pattern(&assignment.target);
            visitor.visit_expression(&assignment.default);
        }
        Pattern::Rest(rest) => visitor.visit_pattern(&rest.argument),
    }
}

// =============================================================================
// Mutating walks
// =============================================================================

pub fn walk_statement_list_mut<V: VisitorMut>(visitor: &mut V, statements: &mut Vec<Statement>) {
    for statement in statements.iter_mut() {
        visitor.visit_statement_mut(statement);
    }
}

pub fn walk_statement_mut<V: VisitorMut>(visitor: &mut V, statement: &mut Statement) {
    match &mut statement.kind {
        StatementKind::Expression(expression) | StatementKind::Throw(expression) => {
            visitor.visit_expression_mut(expression)
        }
        StatementKind::Block(block) => visitor.visit_statement_list_mut(&mut block.body),
        StatementKind::Empty
        | StatementKind::Debugger
        | StatementKind::Break(_)
        | StatementKind::Continue(_)
        | StatementKind::Import(_) => {}
        StatementKind::VariableDeclaration(declaration) => {
            walk_variable_declaration_mut(visitor, declaration)
        }
        StatementKind::FunctionDeclaration(function) => visitor.visit_function_mut(function),
        StatementKind::ClassDeclaration(class) => visitor.visit_class_mut(class),
        StatementKind::Return(argument) => {
            if let Some(argument) = argument {
                visitor.visit_expression_mut(argument);
            }
        }
        StatementKind::If(if_statement) => {
            visitor.visit_expression_mut(&mut if_statement.test);
            visitor.visit_statement_mut(&mut if_statement.consequent);
            if let Some(alternate) = &mut if_statement.alternate {
                visitor.visit_statement_mut(alternate);
            }
        }
        StatementKind::For(for_statement) => {
            match &mut for_statement.init {
                Some(ForInit::Declaration(declaration)) => {
                    walk_variable_declaration_mut(visitor, declaration)
                }
                Some(ForInit::Expression(expression)) => visitor.visit_expression_mut(expression),
                None => {}
            }
            if let Some(test) = &mut for_statement.test {
                visitor.visit_expression_mut(test);
            }
            if let Some(update) = &mut for_statement.update {
                visitor.visit_expression_mut(update);
            }
            visitor.visit_statement_mut(&mut for_statement.body);
        }
        StatementKind::ForIn(for_in) => {
            walk_for_binding_mut(visitor, &mut for_in.left);
            visitor.visit_expression_mut(&mut for_in.right);
            visitor.visit_statement_mut(&mut for_in.body);
        }
        StatementKind::ForOf(for_of) => {
            walk_for_binding_mut(visitor, &mut for_of.left);
            visitor.visit_expression_mut(&mut for_of.right);
            visitor.visit_statement_mut(&mut for_of.body);
        }
        StatementKind::While(while_statement) => {
            visitor.visit_expression_mut(&mut while_statement.test);
            visitor.visit_statement_mut(&mut while_statement.body);
        }
        StatementKind::DoWhile(do_while) => {
            visitor.visit_statement_mut(&mut do_while.body);
            visitor.visit_expression_mut(&mut do_while.test);
        }
        StatementKind::Try(try_statement) => {
            visitor.visit_statement_list_mut(&mut try_statement.block.body);
            if let Some(handler) = &mut try_statement.handler {
                if let Some(param) = &mut handler.param {
                    visitor.visit_pattern_mut(param);
                }
                visitor.visit_statement_list_mut(&mut handler.body.body);
            }
            if let Some(finalizer) = &mut try_statement.finalizer {
                visitor.visit_statement_list_mut(&mut finalizer.body);
            }
        }
        StatementKind::Switch(switch) => {
            visitor.visit_expression_mut(&mut switch.discriminant);
            for case in &mut switch.cases {
                if let Some(test) = &mut case.test {
                    visitor.visit_expression_mut(test);
                }
                visitor.visit_statement_list_mut(&mut case.consequent);
            }
        }
        StatementKind::With(with) => {
            visitor.visit_expression_mut(&mut with.object);
            visitor.visit_statement_mut(&mut with.body);
        }
        StatementKind::Labeled(labeled) => visitor.visit_statement_mut(&mut labeled.body),
    }
}

fn walk_variable_declaration_mut<V: VisitorMut>(
    visitor: &mut V,
    declaration: &mut VariableDeclaration,
) {
    for declarator in &mut declaration.declarations {
        visitor.visit_pattern_mut(&mut declarator.target);
        if let Some(init) = &mut declarator.init {
            visitor.visit_expression_mut(init);
        }
    }
}

fn walk_for_binding_mut<V: VisitorMut>(visitor: &mut V, binding: &mut ForBinding) {
    match binding {
        ForBinding::Declaration { target, .. } => visitor.visit_pattern_mut(target),
        ForBinding::Target(expression) => visitor.visit_expression_mut(expression),
    }
}

pub fn walk_expression_mut<V: VisitorMut>(visitor: &mut V, expression: &mut Expression) {
    match &mut expression.kind {
        ExpressionKind::Identifier(_)
        | ExpressionKind::This
        | ExpressionKind::Super
        | ExpressionKind::Literal(_)
        | ExpressionKind::MetaProperty(_) => {}
        ExpressionKind::Template(template) => {
            for expression in &mut template.expressions {
                visitor.visit_expression_mut(expression);
            }
        }
        ExpressionKind::TaggedTemplate(tagged) => {
            visitor.visit_expression_mut(&mut tagged.tag);
            for expression in &mut tagged.quasi.expressions {
                visitor.visit_expression_mut(expression);
            }
        }
        ExpressionKind::Array(array) => {
            for element in &mut array.elements {
                match element {
                    ArrayElement::Expression(expression) | ArrayElement::Spread(expression) => {
                        visitor.visit_expression_mut(expression)
                    }
                    ArrayElement::Hole => {}
                }
            }
        }
        ExpressionKind::Object(object) => {
            for member in &mut object.properties {
                match member {
                    ObjectMember::KeyValue { key, value } => {
                        walk_property_key_mut(visitor, key);
                        visitor.visit_expression_mut(value);
                    }
                    ObjectMember::Shorthand { default, .. } => {
                        if let Some(default) = default {
                            visitor.visit_expression_mut(default);
                        }
                    }
                    ObjectMember::Method(method) => walk_method_mut(visitor, method),
                    ObjectMember::Spread(expression) => visitor.visit_expression_mut(expression),
                }
            }
        }
        ExpressionKind::Function(function) => visitor.visit_function_mut(function),
        ExpressionKind::Arrow(arrow) => walk_arrow_function_mut(visitor, arrow),
        ExpressionKind::Class(class) => visitor.visit_class_mut(class),
        ExpressionKind::Unary(unary) => visitor.visit_expression_mut(&mut unary.operand),
        ExpressionKind::Update(update) => visitor.visit_expression_mut(&mut update.operand),
        ExpressionKind::Binary(binary) => {
            visitor.visit_expression_mut(&mut binary.left);
            visitor.visit_expression_mut(&mut binary.right);
        }
        ExpressionKind::Assignment(assignment) => {
            visitor.visit_expression_mut(&mut assignment.target);
            visitor.visit_expression_mut(&mut assignment.value);
        }
        ExpressionKind::Conditional(conditional) => {
            visitor.visit_expression_mut(&mut conditional.test);
            visitor.visit_expression_mut(&mut conditional.consequent);
            visitor.visit_expression_mut(&mut conditional.alternate);
        }
        ExpressionKind::Call(call) => {
            visitor.visit_expression_mut(&mut call.callee);
            walk_arguments_mut(visitor, &mut call.arguments);
        }
        ExpressionKind::New(new) => {
            visitor.visit_expression_mut(&mut new.callee);
            walk_arguments_mut(visitor, &mut new.arguments);
        }
        ExpressionKind::Member(member) => {
            visitor.visit_expression_mut(&mut member.object);
            if let MemberProperty::Computed(property) = &mut member.property {
                visitor.visit_expression_mut(property);
            }
        }
        ExpressionKind::Sequence(expressions) => {
            for expression in expressions {
                visitor.visit_expression_mut(expression);
            }
        }
        ExpressionKind::Yield(yield_expression) => {
            if let Some(argument) = &mut yield_expression.argument {
                visitor.visit_expression_mut(argument);
            }
        }
        ExpressionKind::Await(argument) | ExpressionKind::ImportCall(argument) => {
            visitor.visit_expression_mut(argument)
        }
    }
}

fn walk_arguments_mut<V: VisitorMut>(visitor: &mut V, arguments: &mut [Argument]) {
    for argument in arguments {
        match argument {
            Argument::Expression(expression) | Argument::Spread(expression) => {
                visitor.visit_expression_mut(expression)
            }
        }
    }
}

fn walk_property_key_mut<V: VisitorMut>(visitor: &mut V, key: &mut PropertyKey) {
    if let PropertyKey::Computed(expression) = key {
        visitor.visit_expression_mut(expression);
    }
}

fn walk_method_mut<V: VisitorMut>(visitor: &mut V, method: &mut MethodDefinition) {
    walk_property_key_mut(visitor, &mut method.key);
    visitor.visit_function_mut(&mut method.function);
}

fn walk_arrow_function_mut<V: VisitorMut>(visitor: &mut V, arrow: &mut ArrowFunction) {
    for param in &mut arrow.params {
        visitor.visit_pattern_mut(param);
    }
    match &mut arrow.body {
        ArrowBody::Block(body) => visitor.visit_statement_list_mut(body),
        ArrowBody::Expression(expression) => visitor.visit_expression_mut(expression),
    }
}

pub fn walk_function_mut<V: VisitorMut>(visitor: &mut V, function: &mut Function) {
    for param in &mut function.params {
        visitor.visit_pattern_mut(param);
    }
    visitor.visit_statement_list_mut(&mut function.body);
}

pub fn walk_class_mut<V: VisitorMut>(visitor: &mut V, class: &mut Class) {
    if let Some(super_class) = &mut class.super_class {
        visitor.visit_expression_mut(super_class);
    }
    for member in &mut class.body {
        match member {
            ClassMember::Method { method, .. } => walk_method_mut(visitor, method),
            ClassMember::Field { key, value, .. } => {
                walk_property_key_mut(visitor, key);
                if let Some(value) = value {
                    visitor.visit_expression_mut(value);
                }
            }
        }
    }
}

pub fn walk_pattern_mut<V: VisitorMut>(visitor: &mut V, pattern: &mut Pattern) {
    match pattern {
        Pattern::Identifier(_) => {}
        Pattern::Array(array) => {
            for element in array.elements.iter_mut().flatten() {
                visitor.visit_pattern_mut(element);
            }
        }
        Pattern::Object(object) => {
            for property in &mut object.properties {
                match property {
                    ObjectPatternProperty::KeyValue { key, value } => {
                        walk_property_key_mut(visitor, key);
                        visitor.visit_pattern_mut(value);
                    }
                    ObjectPatternProperty::Shorthand { default, .. } => {
                        if let Some(default) = default {
                            visitor.visit_expression_mut(default);
                        }
                    }
                    ObjectPatternProperty::Rest(rest) => {
                        visitor.visit_pattern_mut(&mut rest.argument)
                    }
                }
            }
        }
        Pattern::Assignment(assignment) => {
            visitor.visit_pattern_mut(&mut assignment.target);
            visitor.visit_expression_mut(&mut assignment.default);
        }
        Pattern::Rest(rest) => visitor.visit_pattern_mut(&mut rest.argument),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rn_debundle_parser::{parse_program, Identifier};

    /// Collects called function names in traversal order
    struct CallCollector {
        names: Vec<String>,
    }

    impl Visitor for CallCollector {
        fn visit_expression(&mut self, expression: &Expression) {
            if let ExpressionKind::Call(call) = &expression.kind {
                if let Some(name) = call.callee_name() {
                    self.names.push(name.to_string());
                }
            }
            walk_expression(self, expression);
        }
    }

    /// Counts statements in pre-order
    struct StatementCounter {
        count: usize,
    }

    impl Visitor for StatementCounter {
        fn visit_statement(&mut self, statement: &Statement) {
            self.count += 1;
            walk_statement(self, statement);
        }
    }

    /// Renames every identifier reference
    struct Renamer;

    impl VisitorMut for Renamer {
        fn visit_expression_mut(&mut self, expression: &mut Expression) {
            if let ExpressionKind::Identifier(identifier) = &mut expression.kind {
                *identifier = Identifier::synthetic(format!("{}_renamed", identifier.name));
            }
            walk_expression_mut(self, expression);
        }
    }

    #[test]
    fn test_visitor_reaches_nested_function_bodies() {
        let program = parse_program(
            "a(); function f() { b(); } var g = () => { c(); }; \
             var o = { m() { d(); } }; class K { n() { e(); } }",
        )
        .unwrap();

        let mut collector = CallCollector { names: Vec::new() };
        collector.visit_program(&program);

        assert_eq!(collector.names, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_statement_count_includes_single_statement_slots() {
        let program =
            parse_program("if (a) b(); else { c(); } switch (x) { case 1: d(); }").unwrap();

        let mut counter = StatementCounter { count: 0 };
        counter.visit_program(&program);

        // if, b(), block, c(), switch, d()
        assert_eq!(counter.count, 6);
    }

    #[test]
    fn test_mutable_visitor_rewrites_in_place() {
        let mut program = parse_program("f(x);").unwrap();
        Renamer.visit_program_mut(&mut program);

        let mut collector = CallCollector { names: Vec::new() };
        collector.visit_program(&program);
        assert_eq!(collector.names, vec!["f_renamed"]);
    }
}
