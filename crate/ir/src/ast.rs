use crate::SourceLocation;
use std::fmt;

/// A parsed program: a flat list of top-level statements.
#[derive(Debug)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::And => "aur",
            BinaryOperator::Or => "ya",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOperator {
    Negate,
    Not,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "nahi",
        };
        write!(f, "{s}")
    }
}

/// Literal values produced directly by the lexer/parser, before any runtime
/// representation exists.
#[derive(Debug, Clone)]
pub enum LiteralValue {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    None,
}

#[derive(Debug)]
pub struct FunctionDefStmt {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Statement>,
    pub location: SourceLocation,
}

/// Expression nodes. Every variant carries its source location so
/// diagnostics and IR generation can report exact positions.
#[derive(Debug)]
pub enum Expression {
    Literal(LiteralValue, SourceLocation),
    List(Vec<Expression>, SourceLocation),
    Dict(Vec<(Expression, Expression)>, SourceLocation),
    Variable(String, SourceLocation),
    BinaryOp(BinaryOperator, Box<Expression>, Box<Expression>, SourceLocation),
    UnaryOp(UnaryOperator, Box<Expression>, SourceLocation),
    Parenthesized(Box<Expression>, SourceLocation),
    FunctionCall(Box<Expression>, Vec<Expression>, SourceLocation),
    Lambda(Vec<String>, Box<Expression>, SourceLocation),
    NewObject(String, Vec<Expression>, SourceLocation),
    MethodCall(Box<Expression>, String, Vec<Expression>, SourceLocation),
    PropertyAccess(Box<Expression>, String, SourceLocation),
    Index(Box<Expression>, Box<Expression>, SourceLocation),
    This(SourceLocation),
    Super(Vec<Expression>, SourceLocation),
}

impl Expression {
    pub fn location(&self) -> SourceLocation {
        match self {
            Expression::Literal(_, loc)
            | Expression::List(_, loc)
            | Expression::Dict(_, loc)
            | Expression::Variable(_, loc)
            | Expression::BinaryOp(_, _, _, loc)
            | Expression::UnaryOp(_, _, loc)
            | Expression::Parenthesized(_, loc)
            | Expression::FunctionCall(_, _, loc)
            | Expression::Lambda(_, _, loc)
            | Expression::NewObject(_, _, loc)
            | Expression::MethodCall(_, _, _, loc)
            | Expression::PropertyAccess(_, _, loc)
            | Expression::Index(_, _, loc)
            | Expression::This(loc)
            | Expression::Super(_, loc) => *loc,
        }
    }
}

/// Statement nodes.
#[derive(Debug)]
pub enum Statement {
    VarDecl(String, Expression, SourceLocation),
    Assignment(String, Expression, SourceLocation),
    PropertyAssignment(Expression, String, Expression, SourceLocation),
    IndexAssignment(Expression, Expression, Expression, SourceLocation),
    ExpressionStmt(Expression, SourceLocation),
    Block(Vec<Statement>, SourceLocation),
    If(
        Expression,
        Vec<Statement>,
        Vec<(Expression, Vec<Statement>)>,
        Option<Vec<Statement>>,
        SourceLocation,
    ),
    While(Expression, Vec<Statement>, SourceLocation),
    ForEach(String, Expression, Vec<Statement>, SourceLocation),
    Break(SourceLocation),
    Continue(SourceLocation),
    FunctionDef(FunctionDefStmt),
    Return(Option<Expression>, SourceLocation),
    ClassDef(String, Option<String>, Vec<FunctionDefStmt>, SourceLocation),
    Try(
        Vec<Statement>,
        String,
        Vec<Statement>,
        Option<Vec<Statement>>,
        SourceLocation,
    ),
    Throw(Expression, SourceLocation),
    /// `likho(...)` (newline = true) or `likho_online(...)` (newline = false).
    Print(Vec<Expression>, bool, SourceLocation),
    Input(String, Option<String>, SourceLocation),
    Import(String, SourceLocation),
}

impl Statement {
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::VarDecl(_, _, loc)
            | Statement::Assignment(_, _, loc)
            | Statement::PropertyAssignment(_, _, _, loc)
            | Statement::IndexAssignment(_, _, _, loc)
            | Statement::ExpressionStmt(_, loc)
            | Statement::Block(_, loc)
            | Statement::If(_, _, _, _, loc)
            | Statement::While(_, _, loc)
            | Statement::ForEach(_, _, _, loc)
            | Statement::Break(loc)
            | Statement::Continue(loc)
            | Statement::Return(_, loc)
            | Statement::ClassDef(_, _, _, loc)
            | Statement::Try(_, _, _, _, loc)
            | Statement::Throw(_, loc)
            | Statement::Print(_, _, loc)
            | Statement::Input(_, _, loc)
            | Statement::Import(_, loc) => *loc,
            Statement::FunctionDef(f) => f.location,
        }
    }
}
