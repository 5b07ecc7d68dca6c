//! The table of declared variables and their memory addresses.
//!
//! PascalLite has a single scope, so the table is flat. Addresses are
//! assigned in declaration order starting at 0 and are never reused
//! within one table.
use std::collections::HashMap;

use log::trace;
use pascallite_dsl::ast::TypeName;
use pascallite_dsl::core::{Id, Located};
use pascallite_dsl::diagnostic::{Diagnostic, Label};
use pascallite_problems::Problem;

/// A memory slot in the MEPA data area.
pub type Address = usize;

/// Information about one declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolEntry {
    pub name: Id,
    pub type_name: TypeName,
    pub address: Address,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    /// Entries in address order. The address of an entry is its index.
    entries: Vec<SymbolEntry>,
    index: HashMap<Id, Address>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the name to the table with the next address.
    ///
    /// Returns the address, or an error if the name is already declared.
    pub fn declare(&mut self, name: &Id, type_name: TypeName) -> Result<Address, Diagnostic> {
        if let Some(existing) = self.lookup(name) {
            return Err(Diagnostic::with_id(
                Problem::DuplicateDeclaration,
                name,
                "Declared again here",
            )
            .with_secondary(Label::span(existing.name.span(), "First declared here")));
        }

        let address = self.entries.len();
        self.entries.push(SymbolEntry {
            name: name.clone(),
            type_name,
            address,
        });
        self.index.insert(name.clone(), address);
        trace!("Declared {} {} at {}", name, type_name, address);
        Ok(address)
    }

    /// Returns the address of the name, or an error if the name is not
    /// declared.
    pub fn resolve(&self, name: &Id) -> Result<Address, Diagnostic> {
        self.lookup(name).map(|entry| entry.address).ok_or_else(|| {
            Diagnostic::with_id(Problem::UndeclaredIdentifier, name, "Not declared")
        })
    }

    pub fn lookup(&self, name: &Id) -> Option<&SymbolEntry> {
        self.index
            .get(name)
            .and_then(|address| self.entries.get(*address))
    }

    /// The number of declared names. This is the number of memory slots
    /// the program needs.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry so that addresses start again at 0.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Iterates the entries in address order.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.entries.iter()
    }
}
