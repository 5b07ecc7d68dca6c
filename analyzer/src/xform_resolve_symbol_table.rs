//! Builds the symbol table for a program and checks every use of a
//! variable against it.
//!
//! ## Passes
//!
//! ```ignore
//! program p;
//! var a, b: integer;
//! begin
//!    a := b
//! end.
//! ```
//!
//! ## Fails
//!
//! ```ignore
//! program p;
//! var a: integer;
//! var a: boolean;
//! begin
//! end.
//! ```
//!
//! ```ignore
//! program p;
//! var a: integer;
//! begin
//!    a := c
//! end.
//! ```
use log::trace;
use pascallite_dsl::{
    ast::{Declaration, Program},
    core::Id,
    diagnostic::Diagnostic,
    visitor::Visitor,
};

use crate::symbol_table::SymbolTable;

/// Declares every variable of the program in the table and resolves
/// every use. Stops at the first problem.
pub fn apply(program: &Program, table: &mut SymbolTable) -> Result<(), Diagnostic> {
    let mut resolver = SymbolResolver { table };
    resolver.walk(program)
}

struct SymbolResolver<'a> {
    table: &'a mut SymbolTable,
}

impl Visitor<Diagnostic> for SymbolResolver<'_> {
    type Value = ();

    fn visit_declaration(&mut self, node: &Declaration) -> Result<(), Diagnostic> {
        for name in &node.names {
            self.table.declare(name, node.type_name)?;
        }
        Ok(())
    }

    fn visit_target(&mut self, node: &Id) -> Result<(), Diagnostic> {
        let address = self.table.resolve(node)?;
        trace!("Store to {} resolved to {}", node, address);
        Ok(())
    }

    fn visit_variable(&mut self, node: &Id) -> Result<(), Diagnostic> {
        let address = self.table.resolve(node)?;
        trace!("Load of {} resolved to {}", node, address);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::parse;

    #[test]
    fn apply_when_all_declared_then_ok() {
        let program = parse("program p; var a, b: integer; begin a := b end.");
        let mut table = SymbolTable::new();

        assert!(apply(&program, &mut table).is_ok());
        assert_eq!(table.size(), 2);
    }

    #[test]
    fn apply_when_duplicate_in_later_section_then_error() {
        let program = parse("program p; var a: integer; var a: boolean; begin end.");
        let mut table = SymbolTable::new();

        let err = apply(&program, &mut table).unwrap_err();
        assert_eq!(err.code, "P0020");
    }

    #[test]
    fn apply_when_duplicate_in_same_list_then_error() {
        let program = parse("program p; var a, a: integer; begin end.");
        let mut table = SymbolTable::new();

        let err = apply(&program, &mut table).unwrap_err();
        assert_eq!(err.code, "P0020");
    }

    #[test]
    fn apply_when_value_and_target_undeclared_then_value_reported() {
        let program = parse("program p; begin x := y end.");
        let mut table = SymbolTable::new();

        let err = apply(&program, &mut table).unwrap_err();
        assert_eq!(err.code, "P0021");
        assert_eq!(
            err.description(),
            "Variable is used but not declared (variable=y)"
        );
    }
}
