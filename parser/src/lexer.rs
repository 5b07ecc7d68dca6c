//! Primary lexer for PascalLite. The lexer transforms text into tokens
//! (tokens are the input to the parser).
//!
//! Whitespace, line breaks and comments are consumed here and never reach
//! the parser.
use dsl::{
    core::{FileId, SourceSpan},
    diagnostic::{Diagnostic, Label, QualifiedPosition},
};
use log::trace;
use logos::Logos;
use pascallite_problems::Problem;

use crate::token::{Token, TokenType};

/// Tokenize a PascalLite program.
///
/// Returns a list of tokens and a list of diagnostics. This does not return a result
/// because we continue with parsing even if there are token errors: an illegal
/// character is skipped and the rest of the program is still meaningful.
pub fn tokenize(source: &str, file_id: &FileId) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();
    let mut lexer = TokenType::lexer(source);

    let mut line: usize = 1;
    let mut line_start: usize = 0;

    while let Some(token) = lexer.next() {
        let range = lexer.span();
        let text = lexer.slice();
        let col = source[line_start..range.start].chars().count() + 1;

        match token {
            Ok(token_type) if token_type.is_trivia() => {}
            Ok(token_type) => {
                tokens.push(Token {
                    token_type,
                    span: SourceSpan::range(range.start, range.end).with_file_id(file_id),
                    line,
                    col,
                    text: text.into(),
                });
            }
            Err(_) => {
                let position = QualifiedPosition::new(line, col, range.start);
                let diagnostic = if text.starts_with("(*") || text.starts_with('{') {
                    Diagnostic::problem(
                        Problem::UnterminatedComment,
                        Label::qualified(
                            file_id.clone(),
                            position,
                            "Comment starts here and is never closed",
                        ),
                    )
                } else {
                    Diagnostic::problem(
                        Problem::IllegalCharacter,
                        Label::qualified(
                            file_id.clone(),
                            position,
                            format!("The character '{}' is not valid PascalLite text", text),
                        ),
                    )
                    .with_context("character", text)
                };
                trace!("Lexical error {}", diagnostic);
                diagnostics.push(diagnostic);
            }
        }

        // Line breaks may be inside of comments, so every token can move
        // the line position.
        if let Some(last) = text.rfind('\n') {
            line += text.matches('\n').count();
            line_start = range.start + last + 1;
        }
    }

    (tokens, diagnostics)
}
