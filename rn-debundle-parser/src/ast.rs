// JavaScript AST Definitions
// Abstract Syntax Tree nodes with source spans

/// Source position information for AST nodes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub start_line_col: Option<(usize, usize)>,
    pub end_line_col: Option<(usize, usize)>,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            start_line_col: None,
            end_line_col: None,
        }
    }

    pub fn with_line_col(
        start: usize,
        end: usize,
        start_line_col: (usize, usize),
        end_line_col: (usize, usize),
    ) -> Self {
        Self {
            start,
            end,
            start_line_col: Some(start_line_col),
            end_line_col: Some(end_line_col),
        }
    }

    /// Span for nodes built by a transform rather than read from source
    pub fn synthetic() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&Span> for miette::SourceSpan {
    fn from(span: &Span) -> Self {
        miette::SourceSpan::new(span.start.into(), span.len())
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (&span).into()
    }
}

/// Debug information for source preservation and tooling
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebugInfo {
    pub source_file: Option<String>,
}

impl DebugInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_file(source_file: Option<String>) -> Self {
        Self { source_file }
    }
}

/// Whether a program is a classic script or an ES module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceType {
    #[default]
    Script,
    Module,
}

/// Top-level program containing all statements
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Statement>,
    pub source_type: SourceType,
    pub debug_info: DebugInfo,
    pub span: Span,
}

impl Program {
    pub fn new(body: Vec<Statement>, source_type: SourceType) -> Self {
        Self {
            body,
            source_type,
            debug_info: DebugInfo::new(),
            span: Span::synthetic(),
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn empty(span: Span) -> Self {
        Self::new(StatementKind::Empty, span)
    }

    /// The expression of an expression statement
    pub fn as_expression(&self) -> Option<&Expression> {
        match &self.kind {
            StatementKind::Expression(expr) => Some(expr),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Expression(Expression),
    Block(BlockStatement),
    Empty,
    Debugger,
    VariableDeclaration(VariableDeclaration),
    FunctionDeclaration(Function),
    ClassDeclaration(Class),
    Return(Option<Expression>),
    If(IfStatement),
    For(ForStatement),
    ForIn(ForInStatement),
    ForOf(ForOfStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    Break(Option<Identifier>),
    Continue(Option<Identifier>),
    Throw(Expression),
    Try(TryStatement),
    Switch(SwitchStatement),
    With(WithStatement),
    Labeled(LabeledStatement),
    Import(ImportDeclaration),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub target: Pattern,
    pub init: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Box<Statement>,
    pub alternate: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration(VariableDeclaration),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub init: Option<ForInit>,
    pub test: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Box<Statement>,
}

/// Left-hand side of a `for-in` / `for-of` head
#[derive(Debug, Clone, PartialEq)]
pub enum ForBinding {
    Declaration { kind: VariableKind, target: Pattern },
    Target(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    pub left: ForBinding,
    pub right: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForOfStatement {
    pub is_await: bool,
    pub left: ForBinding,
    pub right: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub test: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    pub body: Box<Statement>,
    pub test: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    pub block: BlockStatement,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Option<Pattern>,
    pub body: BlockStatement,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
}

/// A `case` clause, or the `default` clause when `test` is `None`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithStatement {
    pub object: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStatement {
    pub label: Identifier,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: StringLiteral,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `import local from '...'`
    Default { local: Identifier },
    /// `import * as local from '...'`
    Namespace { local: Identifier },
    /// `import { imported as local } from '...'`
    Named {
        imported: ModuleExportName,
        local: Identifier,
    },
}

impl ImportSpecifier {
    pub fn local(&self) -> &Identifier {
        match self {
            ImportSpecifier::Default { local }
            | ImportSpecifier::Namespace { local }
            | ImportSpecifier::Named { local, .. } => local,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModuleExportName {
    Identifier(Identifier),
    String(StringLiteral),
}

// =============================================================================
// Functions and classes
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub id: Option<Identifier>,
    pub params: Vec<Pattern>,
    pub body: Vec<Statement>,
    pub is_async: bool,
    pub is_generator: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub params: Vec<Pattern>,
    pub body: ArrowBody,
    pub is_async: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Block(Vec<Statement>),
    Expression(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub id: Option<Identifier>,
    pub super_class: Option<Box<Expression>>,
    pub body: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Method {
        is_static: bool,
        method: MethodDefinition,
    },
    Field {
        is_static: bool,
        key: PropertyKey,
        value: Option<Expression>,
        span: Span,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
}

/// Method shorthand shared by object literals and class bodies
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    pub kind: MethodKind,
    pub key: PropertyKey,
    pub function: Function,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(Identifier),
    String(StringLiteral),
    Number(NumberLiteral),
    Computed(Box<Expression>),
    Private(Identifier),
}

// =============================================================================
// Patterns
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Identifier(Identifier),
    Array(ArrayPattern),
    Object(ObjectPattern),
    Assignment(AssignmentPattern),
    Rest(RestElement),
}

impl Pattern {
    pub fn span(&self) -> &Span {
        match self {
            Pattern::Identifier(identifier) => &identifier.span,
            Pattern::Array(array) => &array.span,
            Pattern::Object(object) => &object.span,
            Pattern::Assignment(assignment) => &assignment.span,
            Pattern::Rest(rest) => &rest.span,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Pattern::Identifier(identifier) => Some(identifier),
            _ => None,
        }
    }

    /// Short human description used in diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Pattern::Identifier(_) => "identifier",
            Pattern::Array(_) => "array destructuring pattern",
            Pattern::Object(_) => "object destructuring pattern",
            Pattern::Assignment(_) => "parameter with a default value",
            Pattern::Rest(_) => "rest parameter",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    /// `None` marks an elision (`[, b]`)
    pub elements: Vec<Option<Pattern>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    pub properties: Vec<ObjectPatternProperty>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternProperty {
    KeyValue {
        key: PropertyKey,
        value: Pattern,
    },
    Shorthand {
        name: Identifier,
        default: Option<Expression>,
    },
    Rest(RestElement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPattern {
    pub target: Box<Pattern>,
    pub default: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestElement {
    pub argument: Box<Pattern>,
    pub span: Span,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Short human description used in diagnostics
    pub fn describe(&self) -> &'static str {
        match &self.kind {
            ExpressionKind::Identifier(_) => "identifier reference",
            ExpressionKind::This => "`this`",
            ExpressionKind::Super => "`super`",
            ExpressionKind::Literal(literal) => literal.describe(),
            ExpressionKind::Template(_) => "template literal",
            ExpressionKind::TaggedTemplate(_) => "tagged template",
            ExpressionKind::Array(_) => "array literal",
            ExpressionKind::Object(_) => "object literal",
            ExpressionKind::Function(_) => "function expression",
            ExpressionKind::Arrow(_) => "arrow function",
            ExpressionKind::Class(_) => "class expression",
            ExpressionKind::Unary(_) => "unary expression",
            ExpressionKind::Update(_) => "update expression",
            ExpressionKind::Binary(_) => "binary expression",
            ExpressionKind::Assignment(_) => "assignment",
            ExpressionKind::Conditional(_) => "conditional expression",
            ExpressionKind::Call(_) => "call expression",
            ExpressionKind::New(_) => "`new` expression",
            ExpressionKind::Member(_) => "member expression",
            ExpressionKind::Sequence(_) => "sequence expression",
            ExpressionKind::Yield(_) => "`yield` expression",
            ExpressionKind::Await(_) => "`await` expression",
            ExpressionKind::MetaProperty(_) => "meta property",
            ExpressionKind::ImportCall(_) => "dynamic import",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Identifier(Identifier),
    This,
    Super,
    Literal(Literal),
    Template(TemplateLiteral),
    TaggedTemplate(TaggedTemplate),
    Array(ArrayLiteral),
    Object(ObjectLiteral),
    Function(Function),
    Arrow(ArrowFunction),
    Class(Class),
    Unary(UnaryOperation),
    Update(UpdateOperation),
    Binary(BinaryOperation),
    Assignment(AssignmentOperation),
    Conditional(ConditionalExpression),
    Call(CallExpression),
    New(NewExpression),
    Member(MemberExpression),
    Sequence(Vec<Expression>),
    Yield(YieldExpression),
    Await(Box<Expression>),
    MetaProperty(MetaProperty),
    ImportCall(Box<Expression>),
}

/// Identifiers with their exact source name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn synthetic(name: impl Into<String>) -> Self {
        Self::new(name, Span::synthetic())
    }
}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Number(NumberLiteral),
    BigInt(BigIntLiteral),
    String(StringLiteral),
    RegExp(RegExpLiteral),
}

impl Literal {
    pub fn describe(&self) -> &'static str {
        match self {
            Literal::Null => "`null` literal",
            Literal::Boolean(_) => "boolean literal",
            Literal::Number(_) => "number literal",
            Literal::BigInt(_) => "BigInt literal",
            Literal::String(_) => "string literal",
            Literal::RegExp(_) => "regular expression literal",
        }
    }
}

/// Number literals keep their source spelling (`0xff`, `1e3`, `.5`)
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub value: f64,
    pub raw: String,
    pub span: Span,
}

impl NumberLiteral {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            raw: format_number(value),
            span: Span::synthetic(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BigIntLiteral {
    /// Digits without the trailing `n`, in source radix form
    pub digits: String,
    pub raw: String,
    pub span: Span,
}

/// String literals with the decoded value and the original quoted text
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub raw: String,
    pub span: Span,
}

impl StringLiteral {
    /// Builds a single-quoted literal for a value that has no source text
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let raw = quote_string(&value);
        Self {
            value,
            raw,
            span: Span::synthetic(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegExpLiteral {
    pub pattern: String,
    pub flags: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    /// Raw text chunks; always one more than `expressions`
    pub quasis: Vec<String>,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTemplate {
    pub tag: Box<Expression>,
    pub quasi: TemplateLiteral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<ArrayElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrayElement {
    Expression(Expression),
    Spread(Expression),
    Hole,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    pub properties: Vec<ObjectMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    KeyValue {
        key: PropertyKey,
        value: Expression,
    },
    /// `{ a }`, or `{ a = 1 }` inside a destructuring assignment target
    Shorthand {
        name: Identifier,
        default: Option<Box<Expression>>,
    },
    Method(MethodDefinition),
    Spread(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Expression(Expression),
    Spread(Expression),
}

impl Argument {
    pub fn span(&self) -> &Span {
        match self {
            Argument::Expression(expr) | Argument::Spread(expr) => &expr.span,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Argument::Expression(expr) => Some(expr),
            Argument::Spread(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Argument>,
    pub optional: bool,
}

impl CallExpression {
    /// The callee name when the callee is a bare identifier
    pub fn callee_name(&self) -> Option<&str> {
        match &self.callee.kind {
            ExpressionKind::Identifier(identifier) => Some(identifier.name.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: MemberProperty,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    Identifier(Identifier),
    Private(Identifier),
    Computed(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldExpression {
    pub argument: Option<Box<Expression>>,
    pub delegate: bool,
}

/// `new.target` or `import.meta`
#[derive(Debug, Clone, PartialEq)]
pub struct MetaProperty {
    pub meta: String,
    pub property: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    NullishCoalescing,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    InstanceOf,
    In,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponent,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::NullishCoalescing => "??",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::StrictEqual => "===",
            BinaryOperator::StrictNotEqual => "!==",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::InstanceOf => "instanceof",
            BinaryOperator::In => "in",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::ShiftRightUnsigned => ">>>",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Exponent => "**",
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperator::LogicalOr | BinaryOperator::LogicalAnd)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperation {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    LogicalNot,
    BitwiseNot,
    TypeOf,
    Void,
    Delete,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::TypeOf => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            UnaryOperator::TypeOf | UnaryOperator::Void | UnaryOperator::Delete
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOperation {
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

impl UpdateOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentOperation {
    pub target: Box<Expression>,
    pub operator: AssignmentOperator,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    ExponentAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    ShiftRightUnsignedAssign,
    BitwiseAndAssign,
    BitwiseOrAssign,
    BitwiseXorAssign,
    LogicalAndAssign,
    LogicalOrAssign,
    NullishAssign,
}

impl AssignmentOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubtractAssign => "-=",
            AssignmentOperator::MultiplyAssign => "*=",
            AssignmentOperator::DivideAssign => "/=",
            AssignmentOperator::ModuloAssign => "%=",
            AssignmentOperator::ExponentAssign => "**=",
            AssignmentOperator::ShiftLeftAssign => "<<=",
            AssignmentOperator::ShiftRightAssign => ">>=",
            AssignmentOperator::ShiftRightUnsignedAssign => ">>>=",
            AssignmentOperator::BitwiseAndAssign => "&=",
            AssignmentOperator::BitwiseOrAssign => "|=",
            AssignmentOperator::BitwiseXorAssign => "^=",
            AssignmentOperator::LogicalAndAssign => "&&=",
            AssignmentOperator::LogicalOrAssign => "||=",
            AssignmentOperator::NullishAssign => "??=",
        }
    }

    pub fn from_str(text: &str) -> Option<Self> {
        let operator = match text {
            "=" => AssignmentOperator::Assign,
            "+=" => AssignmentOperator::AddAssign,
            "-=" => AssignmentOperator::SubtractAssign,
            "*=" => AssignmentOperator::MultiplyAssign,
            "/=" => AssignmentOperator::DivideAssign,
            "%=" => AssignmentOperator::ModuloAssign,
            "**=" => AssignmentOperator::ExponentAssign,
            "<<=" => AssignmentOperator::ShiftLeftAssign,
            ">>=" => AssignmentOperator::ShiftRightAssign,
            ">>>=" => AssignmentOperator::ShiftRightUnsignedAssign,
            "&=" => AssignmentOperator::BitwiseAndAssign,
            "|=" => AssignmentOperator::BitwiseOrAssign,
            "^=" => AssignmentOperator::BitwiseXorAssign,
            "&&=" => AssignmentOperator::LogicalAndAssign,
            "||=" => AssignmentOperator::LogicalOrAssign,
            "??=" => AssignmentOperator::NullishAssign,
            _ => return None,
        };
        Some(operator)
    }
}

// =============================================================================
// Literal text helpers
// =============================================================================

/// Formats a number the way JavaScript's `String(number)` does for the
/// values that occur as literals (integers, plain decimals, huge/tiny values)
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        if value.fract() == 0.0 && magnitude < 9.007_199_254_740_992e15 {
            return format!("{}", value as i64);
        }
        return format!("{}", value);
    }

    // Exponential form: Rust prints `1e21`, JavaScript prints `1e+21`
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Single-quotes a string value, escaping what a JavaScript string literal requires
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        match ch {
            '\'' => quoted.push_str("\\'"),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{c}' => quoted.push_str("\\f"),
            '\u{b}' => quoted.push_str("\\v"),
            '\u{2028}' => quoted.push_str("\\u2028"),
            '\u{2029}' => quoted.push_str("\\u2029"),
            c if (c as u32) < 0x20 => quoted.push_str(&format!("\\x{:02X}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}
