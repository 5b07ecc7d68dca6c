//! Problem codes for the PascalLite compiler.
//!
//! The set of problems is defined in `resources/problem-codes.csv` and the
//! build script turns the file into the [`Problem`] enumeration.

/// The phase of compilation that detects a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    /// Detected by the scanner. Reported but does not stop compilation.
    Lexical,
    /// Detected by the parser. Stops compilation.
    Syntax,
    /// Detected while resolving names. Stops compilation.
    Semantic,
}

include!(concat!(env!("OUT_DIR"), "/problems.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_when_duplicate_declaration_then_semantic_code() {
        assert_eq!(Problem::DuplicateDeclaration.code(), "P0020");
        assert_eq!(Problem::DuplicateDeclaration.kind(), ProblemKind::Semantic);
    }

    #[test]
    fn kind_when_identifier_too_long_then_lexical() {
        assert_eq!(Problem::IdentifierTooLong.kind(), ProblemKind::Lexical);
    }

    #[test]
    fn kind_when_syntax_error_then_syntax() {
        assert_eq!(Problem::SyntaxError.kind(), ProblemKind::Syntax);
        assert_eq!(Problem::UnexpectedEndOfInput.kind(), ProblemKind::Syntax);
    }
}
