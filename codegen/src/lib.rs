#![allow(clippy::result_large_err)]
//! Code generation for PascalLite.
//!
//! This crate transforms a parsed PascalLite AST (`Program`) into
//! instructions for the MEPA stack machine.
//!
//! # Example
//!
//! ```ignore
//! use pascallite_codegen::compile;
//! use pascallite_parser::parse_program;
//!
//! let source = "program p; var x: integer; begin x := 42 end.";
//! let parsed = parse_program(source, &FileId::default(), &ParseOptions::default()).unwrap();
//! let listing = compile(&parsed.program).unwrap();
//! ```

mod compile;
mod emit;
pub mod instruction;
pub mod label;

#[cfg(test)]
mod test_helpers;

pub use compile::{compile, compile_with_context, TranslationContext};
pub use emit::Listing;
