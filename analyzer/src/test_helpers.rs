use pascallite_dsl::ast::Program;
use pascallite_dsl::core::FileId;
use pascallite_parser::options::ParseOptions;
use pascallite_parser::parse_program;

#[cfg(test)]
pub fn parse(source: &str) -> Program {
    parse_program(source, &FileId::default(), &ParseOptions::default())
        .unwrap()
        .program
}
