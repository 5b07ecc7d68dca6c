use pascallite_dsl::ast::Program;
use pascallite_dsl::core::FileId;
use pascallite_dsl::diagnostic::Diagnostic;
use pascallite_parser::options::ParseOptions;
use pascallite_parser::parse_program;

use crate::compile::compile;
use crate::emit::Listing;

pub fn parse(source: &str) -> Program {
    parse_program(source, &FileId::default(), &ParseOptions::default())
        .unwrap()
        .program
}

pub fn compile_source(source: &str) -> Result<Listing, Diagnostic> {
    compile(&parse(source))
}

pub fn compile_lines(source: &str) -> Vec<String> {
    compile_source(source).unwrap().lines()
}
