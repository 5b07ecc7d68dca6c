//! Semantic analysis for PascalLite programs.

// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

extern crate pascallite_dsl;

pub mod stages;
pub mod symbol_table;
mod xform_resolve_symbol_table;

#[cfg(test)]
mod test_helpers;
