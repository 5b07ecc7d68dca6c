//! Provides definitions of the abstract syntax tree for PascalLite programs.
//!
//! The tree holds only syntactic content. Nothing here knows about
//! addresses, labels or types of expressions; those belong to later stages.
use core::fmt;

use serde::Serialize;

use crate::core::{Id, Located, SourceSpan};

/// A complete program: `program name; block.`
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Program {
    pub name: Id,
    pub block: Block,
    #[serde(skip)]
    pub span: SourceSpan,
}

impl Located for Program {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}

/// The declarations and the statement part of a program.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Block {
    pub declarations: DeclarationList,
    pub body: Compound,
}

/// All variable declarations of a program in source order.
///
/// A program may have several `var` sections; they are joined into one list.
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct DeclarationList {
    pub declarations: Vec<Declaration>,
}

impl DeclarationList {
    /// Declared names in the order they appear in the source.
    pub fn names(&self) -> impl Iterator<Item = &Id> {
        self.declarations.iter().flat_map(|decl| decl.names.iter())
    }
}

/// One declaration: `a, b, c: integer`.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Declaration {
    pub names: Vec<Id>,
    pub type_name: TypeName,
    #[serde(skip)]
    pub span: SourceSpan,
}

impl Declaration {
    pub fn new(names: &[&str], type_name: TypeName) -> Self {
        Declaration {
            names: names.iter().map(|name| Id::from(name)).collect(),
            type_name,
            span: SourceSpan::default(),
        }
    }
}

impl Located for Declaration {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}

/// The declared type of a variable.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TypeName {
    Integer,
    Boolean,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeName::Integer => f.write_str("integer"),
            TypeName::Boolean => f.write_str("boolean"),
        }
    }
}

/// A statement sequence between `begin` and `end`.
#[derive(Debug, PartialEq, Clone, Default, Serialize)]
pub struct Compound {
    pub body: Vec<StmtKind>,
    #[serde(skip)]
    pub span: SourceSpan,
}

impl Compound {
    pub fn new(body: Vec<StmtKind>) -> Self {
        Compound {
            body,
            span: SourceSpan::default(),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum StmtKind {
    Assignment(Assignment),
    If(If),
    While(While),
    Read(Read),
    Write(Write),
    Compound(Compound),
}

impl StmtKind {
    pub fn assignment(target: &str, value: ExprKind) -> StmtKind {
        StmtKind::Assignment(Assignment {
            target: Id::from(target),
            value,
        })
    }

    pub fn if_then(condition: ExprKind, then_body: StmtKind) -> StmtKind {
        StmtKind::If(If {
            condition,
            then_body: Box::new(then_body),
            else_body: None,
        })
    }

    pub fn if_then_else(condition: ExprKind, then_body: StmtKind, else_body: StmtKind) -> StmtKind {
        StmtKind::If(If {
            condition,
            then_body: Box::new(then_body),
            else_body: Some(Box::new(else_body)),
        })
    }

    pub fn while_do(condition: ExprKind, body: StmtKind) -> StmtKind {
        StmtKind::While(While {
            condition,
            body: Box::new(body),
        })
    }

    pub fn read(targets: &[&str]) -> StmtKind {
        StmtKind::Read(Read {
            targets: targets.iter().map(|name| Id::from(name)).collect(),
        })
    }

    pub fn write(values: Vec<ExprKind>) -> StmtKind {
        StmtKind::Write(Write { values })
    }

    pub fn compound(body: Vec<StmtKind>) -> StmtKind {
        StmtKind::Compound(Compound::new(body))
    }
}

/// `target := value`
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Assignment {
    pub target: Id,
    pub value: ExprKind,
}

/// `if condition then then_body [else else_body]`
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct If {
    pub condition: ExprKind,
    pub then_body: Box<StmtKind>,
    pub else_body: Option<Box<StmtKind>>,
}

/// `while condition do body`
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct While {
    pub condition: ExprKind,
    pub body: Box<StmtKind>,
}

/// `read(a, b, ...)`
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Read {
    pub targets: Vec<Id>,
}

/// `write(expr, expr, ...)`
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Write {
    pub values: Vec<ExprKind>,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum ExprKind {
    Const(ConstantKind),
    Variable(Id),
    BinaryOp(Box<BinaryExpr>),
    Compare(Box<CompareExpr>),
    UnaryOp(Box<UnaryExpr>),
}

impl ExprKind {
    pub fn integer(value: i64) -> ExprKind {
        ExprKind::Const(ConstantKind::Integer(value))
    }

    pub fn boolean(value: bool) -> ExprKind {
        ExprKind::Const(ConstantKind::Boolean(value))
    }

    pub fn variable(name: &str) -> ExprKind {
        ExprKind::Variable(Id::from(name))
    }

    pub fn binary(op: Operator, left: ExprKind, right: ExprKind) -> ExprKind {
        ExprKind::BinaryOp(Box::new(BinaryExpr { op, left, right }))
    }

    pub fn compare(op: CompareOp, left: ExprKind, right: ExprKind) -> ExprKind {
        ExprKind::Compare(Box::new(CompareExpr { op, left, right }))
    }

    pub fn unary(op: UnaryOp, term: ExprKind) -> ExprKind {
        ExprKind::UnaryOp(Box::new(UnaryExpr { op, term }))
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprKind::Const(constant) => write!(f, "{}", constant),
            ExprKind::Variable(id) => write!(f, "{}", id),
            ExprKind::BinaryOp(expr) => write!(f, "({} {} {})", expr.left, expr.op, expr.right),
            ExprKind::Compare(expr) => write!(f, "({} {} {})", expr.left, expr.op, expr.right),
            ExprKind::UnaryOp(expr) => match expr.op {
                UnaryOp::Neg => write!(f, "-{}", expr.term),
                UnaryOp::Not => write!(f, "not {}", expr.term),
            },
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum ConstantKind {
    Integer(i64),
    Boolean(bool),
}

impl fmt::Display for ConstantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantKind::Integer(value) => write!(f, "{}", value),
            ConstantKind::Boolean(true) => f.write_str("true"),
            ConstantKind::Boolean(false) => f.write_str("false"),
        }
    }
}

/// Arithmetic operators.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    /// `/`
    Div,
    /// `div`
    IntDiv,
    Mod,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::IntDiv => "div",
            Operator::Mod => "mod",
        };
        f.write_str(text)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct BinaryExpr {
    pub op: Operator,
    pub left: ExprKind,
    pub right: ExprKind,
}

/// Relational and logical operators. Both produce a boolean.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum CompareOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CompareOp::Or => "or",
            CompareOp::And => "and",
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::LtEq => "<=",
            CompareOp::GtEq => ">=",
        };
        f.write_str(text)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct CompareExpr {
    pub op: CompareOp,
    pub left: ExprKind,
    pub right: ExprKind,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub term: ExprKind,
}
