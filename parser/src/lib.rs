//! Scanner and parser for PascalLite. Converts source text into the
//! abstract syntax tree defined in `pascallite-dsl`.

// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

extern crate pascallite_dsl as dsl;

mod lexer;
pub mod options;
mod parser;
mod rule_identifier_length;
pub mod token;


use dsl::{ast::Program, core::FileId, diagnostic::Diagnostic};
use log::debug;
use options::ParseOptions;
use pascallite_problems::Problem;
use token::Token;

use crate::lexer::tokenize;
use crate::parser::parse_tokens;

/// A parsed program together with the diagnostics that were reported while
/// reading the program but did not prevent building the tree.
#[derive(Debug)]
pub struct ParsedProgram {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenize a PascalLite program.
///
/// Returns a list of tokens and a list of diagnostics. This does not return a result
/// because we usually continue with parsing even if there are token errors because
/// that will give the context of what was wrong in the location with the error.
pub fn tokenize_program(
    source: &str,
    file_id: &FileId,
    options: &ParseOptions,
) -> (Vec<Token>, Vec<Diagnostic>) {
    let (tokens, mut errors) = tokenize(source, file_id);

    let result = check_tokens(&tokens, options);
    match result {
        Ok(_) => {}
        Err(mut diagnostics) => errors.append(&mut diagnostics),
    }

    (tokens, errors)
}

#[allow(clippy::type_complexity)]
fn check_tokens(tokens: &[Token], options: &ParseOptions) -> Result<(), Vec<Diagnostic>> {
    let rules: Vec<fn(&[Token], &ParseOptions) -> Result<(), Vec<Diagnostic>>> =
        vec![rule_identifier_length::apply];

    let mut errors = vec![];
    for rule in rules {
        match rule(tokens, options) {
            Ok(_) => {}
            Err(mut diagnostics) => errors.append(&mut diagnostics),
        };
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(())
}

/// Parse a full PascalLite program.
///
/// Lexical diagnostics do not stop parsing and are returned with the
/// program. The exception is an over-length identifier when the options
/// make that an error.
///
/// When the program cannot be built, the error holds every lexical
/// diagnostic in source order followed by the diagnostic that stopped
/// the parse.
pub fn parse_program(
    source: &str,
    file_id: &FileId,
    options: &ParseOptions,
) -> Result<ParsedProgram, Vec<Diagnostic>> {
    let (tokens, mut diagnostics) = tokenize_program(source, file_id, options);
    debug!(
        "Tokenized {} into {} tokens with {} diagnostics",
        file_id,
        tokens.len(),
        diagnostics.len()
    );

    let fatal = diagnostics.iter().position(|diagnostic| {
        diagnostic.code == Problem::IdentifierTooLong.code() && diagnostic.is_error()
    });
    if let Some(index) = fatal {
        let fatal = diagnostics.remove(index);
        diagnostics.push(fatal);
        return Err(diagnostics);
    }

    let program = match parse_tokens(&tokens, file_id) {
        Ok(program) => program,
        Err(err) => {
            diagnostics.push(err);
            return Err(diagnostics);
        }
    };
    debug!(
        "Parsed program {} with {} statements",
        program.name,
        program.block.body.body.len()
    );

    Ok(ParsedProgram {
        program,
        diagnostics,
    })
}
