use dsl::diagnostic::{Diagnostic, Label, QualifiedPosition, Severity};
use pascallite_problems::Problem;

use crate::{
    options::ParseOptions,
    token::{Token, TokenType},
};

pub fn apply(tokens: &[Token], options: &ParseOptions) -> Result<(), Vec<Diagnostic>> {
    let severity = if options.long_identifier_is_error {
        Severity::Error
    } else {
        Severity::Warning
    };

    let mut errors = Vec::new();

    for tok in tokens {
        if tok.token_type != TokenType::Identifier {
            continue;
        }
        let length = tok.text.chars().count();
        if length > options.max_identifier_length {
            errors.push(
                Diagnostic::problem(
                    Problem::IdentifierTooLong,
                    Label::qualified(
                        tok.span.file_id.clone(),
                        QualifiedPosition::new(tok.line, tok.col, tok.span.start),
                        format!(
                            "Identifier has {} characters but the limit is {}",
                            length, options.max_identifier_length
                        ),
                    ),
                )
                .with_context("identifier", &tok.text)
                .with_severity(severity),
            );
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(())
}
