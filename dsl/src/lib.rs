//! Provides definitions of objects from the PascalLite language
//! and base implementations of common patterns for working with programs.

pub mod ast;
pub mod core;
pub mod diagnostic;
pub mod visitor;
