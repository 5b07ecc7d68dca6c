//! A set of traits and functions for visiting all nodes in a program.
//!
//! To use the visitor, define a struct and implement the Visitor trait
//! for the struct.
//!
//! Visitor trait functions call functions that implement walking through
//! the program. Selectively call these functions to selectively descend
//! into the program.
//!
//! # Example
//!
//! ```
//! use pascallite_dsl::ast::Declaration;
//! use pascallite_dsl::visitor::{Visitor, visit_declaration};
//!
//! struct Counter {
//!     count: usize,
//! }
//!
//! impl Visitor<String> for Counter {
//!     type Value = ();
//!
//!     fn visit_declaration(&mut self, node: &Declaration) -> Result<Self::Value, String> {
//!         self.count += node.names.len();
//!         visit_declaration(self, node)
//!     }
//! }
//! ```
//!
//! Children are visited in source order, except that an assignment visits
//! its value before its target (the order in which the value is evaluated
//! and then stored).

use crate::ast::*;
use crate::core::Id;

/// Defines a way to recurse into an object in the AST.
pub trait Acceptor {
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E>;
}

/// Recurses into a vec of objects, stopping at the first error.
impl<X> Acceptor for Vec<X>
where
    X: Acceptor,
{
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        for item in self {
            item.accept(visitor)?;
        }
        Ok(V::Value::default())
    }
}

/// Recurses into an optional object. Does nothing if the option is none.
impl<X> Acceptor for Option<X>
where
    X: Acceptor,
{
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        match self.as_ref() {
            Some(x) => x.accept(visitor),
            None => Ok(V::Value::default()),
        }
    }
}

impl<X> Acceptor for Box<X>
where
    X: Acceptor,
{
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        self.as_ref().accept(visitor)
    }
}

/// Defines a visitor for the object tree. The default visitor recursively
/// walks to visit items in the tree.
pub trait Visitor<E> {
    /// Value produced by this visitor when the result is not an error.
    ///
    /// The returned value is usually not meaningful because no guarantee
    /// is provided when returning from vectors of objects.
    type Value: Default;

    fn walk(&mut self, node: &Program) -> Result<Self::Value, E> {
        self.visit_program(node)
    }

    fn visit_program(&mut self, node: &Program) -> Result<Self::Value, E> {
        visit_program(self, node)
    }

    fn visit_declaration_list(&mut self, node: &DeclarationList) -> Result<Self::Value, E> {
        Acceptor::accept(&node.declarations, self)
    }

    fn visit_declaration(&mut self, node: &Declaration) -> Result<Self::Value, E> {
        visit_declaration(self, node)
    }

    fn visit_compound(&mut self, node: &Compound) -> Result<Self::Value, E> {
        Acceptor::accept(&node.body, self)
    }

    fn visit_assignment(&mut self, node: &Assignment) -> Result<Self::Value, E> {
        visit_assignment(self, node)
    }

    fn visit_if(&mut self, node: &If) -> Result<Self::Value, E> {
        visit_if(self, node)
    }

    fn visit_while(&mut self, node: &While) -> Result<Self::Value, E> {
        visit_while(self, node)
    }

    fn visit_read(&mut self, node: &Read) -> Result<Self::Value, E> {
        visit_read(self, node)
    }

    fn visit_write(&mut self, node: &Write) -> Result<Self::Value, E> {
        Acceptor::accept(&node.values, self)
    }

    /// Visits the name that receives a value (assignment target or
    /// `read` argument).
    fn visit_target(&mut self, _node: &Id) -> Result<Self::Value, E> {
        // leaf node - no children
        Ok(Self::Value::default())
    }

    /// Visits a name referenced inside an expression.
    fn visit_variable(&mut self, _node: &Id) -> Result<Self::Value, E> {
        // leaf node - no children
        Ok(Self::Value::default())
    }

    fn visit_constant(&mut self, _node: &ConstantKind) -> Result<Self::Value, E> {
        Ok(Self::Value::default())
    }

    fn visit_binary_op(&mut self, node: &BinaryExpr) -> Result<Self::Value, E> {
        Acceptor::accept(&node.left, self)?;
        Acceptor::accept(&node.right, self)
    }

    fn visit_compare(&mut self, node: &CompareExpr) -> Result<Self::Value, E> {
        Acceptor::accept(&node.left, self)?;
        Acceptor::accept(&node.right, self)
    }

    fn visit_unary_op(&mut self, node: &UnaryExpr) -> Result<Self::Value, E> {
        Acceptor::accept(&node.term, self)
    }
}

pub fn visit_program<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &Program) -> Result<V::Value, E> {
    v.visit_declaration_list(&node.block.declarations)?;
    v.visit_compound(&node.block.body)
}

pub fn visit_declaration<V: Visitor<E> + ?Sized, E>(
    _v: &mut V,
    _node: &Declaration,
) -> Result<V::Value, E> {
    // leaf node - declared names are not references
    Ok(V::Value::default())
}

pub fn visit_assignment<V: Visitor<E> + ?Sized, E>(
    v: &mut V,
    node: &Assignment,
) -> Result<V::Value, E> {
    Acceptor::accept(&node.value, v)?;
    v.visit_target(&node.target)
}

pub fn visit_if<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &If) -> Result<V::Value, E> {
    Acceptor::accept(&node.condition, v)?;
    Acceptor::accept(&node.then_body, v)?;
    Acceptor::accept(&node.else_body, v)
}

pub fn visit_while<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &While) -> Result<V::Value, E> {
    Acceptor::accept(&node.condition, v)?;
    Acceptor::accept(&node.body, v)
}

pub fn visit_read<V: Visitor<E> + ?Sized, E>(v: &mut V, node: &Read) -> Result<V::Value, E> {
    for target in &node.targets {
        v.visit_target(target)?;
    }
    Ok(V::Value::default())
}

impl Acceptor for Declaration {
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        visitor.visit_declaration(self)
    }
}

impl Acceptor for StmtKind {
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        match self {
            StmtKind::Assignment(node) => visitor.visit_assignment(node),
            StmtKind::If(node) => visitor.visit_if(node),
            StmtKind::While(node) => visitor.visit_while(node),
            StmtKind::Read(node) => visitor.visit_read(node),
            StmtKind::Write(node) => visitor.visit_write(node),
            StmtKind::Compound(node) => visitor.visit_compound(node),
        }
    }
}

impl Acceptor for ExprKind {
    fn accept<V: Visitor<E> + ?Sized, E>(&self, visitor: &mut V) -> Result<V::Value, E> {
        match self {
            ExprKind::Const(node) => visitor.visit_constant(node),
            ExprKind::Variable(node) => visitor.visit_variable(node),
            ExprKind::BinaryOp(node) => visitor.visit_binary_op(node),
            ExprKind::Compare(node) => visitor.visit_compare(node),
            ExprKind::UnaryOp(node) => visitor.visit_unary_op(node),
        }
    }
}
