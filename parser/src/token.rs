//! Provides definitions of tokens for PascalLite.
use core::fmt;

use dsl::core::SourceSpan;
use logos::{Lexer, Logos};

/// A token along with its position in the source.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
    /// The line number (1-indexed)
    pub line: usize,
    /// The column number (1-indexed)
    pub col: usize,
    /// The text of the token exactly as written.
    pub text: String,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line: {}, Column: {} - Token: {} - Lexeme: {}",
            self.line, self.col, self.token_type, self.text
        )
    }
}

/// Consumes a `(* ... *)` comment. The comment may span lines.
fn paren_comment(lex: &mut Lexer<TokenType>) -> bool {
    skip_past(lex, "*)")
}

/// Consumes a `{ ... }` comment. The comment may span lines.
fn brace_comment(lex: &mut Lexer<TokenType>) -> bool {
    skip_past(lex, "}")
}

/// Extends the current token to the end of the terminator. When the
/// terminator is missing, consumes the rest of the input and reports
/// the token as an error.
fn skip_past(lex: &mut Lexer<TokenType>, terminator: &str) -> bool {
    match lex.remainder().find(terminator) {
        Some(end) => {
            lex.bump(end + terminator.len());
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    #[token("\n")]
    Newline,

    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    #[token("(*", paren_comment)]
    #[token("{", brace_comment)]
    #[regex(r"//[^\n]*")]
    Comment,

    // Grouping and other markers
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Period,
    #[token(":=")]
    Assignment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    #[regex(r"[0-9]+")]
    Integer,

    // Program structure
    #[token("program", ignore(case))]
    Program,
    #[token("var", ignore(case))]
    Var,
    #[token("begin", ignore(case))]
    Begin,
    #[token("end", ignore(case))]
    End,

    // Types and constants
    #[token("integer", ignore(case))]
    IntegerType,
    #[token("boolean", ignore(case))]
    BooleanType,
    #[token("true", ignore(case))]
    True,
    #[token("false", ignore(case))]
    False,

    // Statements
    #[token("if", ignore(case))]
    If,
    #[token("then", ignore(case))]
    Then,
    #[token("else", ignore(case))]
    Else,
    #[token("while", ignore(case))]
    While,
    #[token("do", ignore(case))]
    Do,
    #[token("read", ignore(case))]
    Read,
    #[token("write", ignore(case))]
    Write,

    // Expressions
    #[token("or", ignore(case))]
    Or,
    #[token("and", ignore(case))]
    And,
    #[token("not", ignore(case))]
    Not,
    #[token("=")]
    Equal,
    #[token("<>")]
    NotEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("div", ignore(case))]
    Div,
    #[token("mod", ignore(case))]
    Mod,
}

impl TokenType {
    /// Tokens that separate other tokens but have no meaning to the parser.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenType::Newline | TokenType::Whitespace | TokenType::Comment
        )
    }

    /// The name of the token type in listings.
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Newline => "NEWLINE",
            TokenType::Whitespace => "WHITESPACE",
            TokenType::Comment => "COMMENT",
            TokenType::LeftParen => "LPAREN",
            TokenType::RightParen => "RPAREN",
            TokenType::Comma => "COMMA",
            TokenType::Semicolon => "SEMICOLON",
            TokenType::Colon => "COLON",
            TokenType::Period => "PERIOD",
            TokenType::Assignment => "ASSIGN",
            TokenType::Identifier => "IDENTIFIER",
            TokenType::Integer => "NUMBER",
            TokenType::Program => "PROGRAM",
            TokenType::Var => "VAR",
            TokenType::Begin => "BEGIN",
            TokenType::End => "END",
            TokenType::IntegerType => "INTEGER",
            TokenType::BooleanType => "BOOLEAN",
            TokenType::True => "TRUE",
            TokenType::False => "FALSE",
            TokenType::If => "IF",
            TokenType::Then => "THEN",
            TokenType::Else => "ELSE",
            TokenType::While => "WHILE",
            TokenType::Do => "DO",
            TokenType::Read => "READ",
            TokenType::Write => "WRITE",
            TokenType::Or => "OR",
            TokenType::And => "AND",
            TokenType::Not => "NOT",
            TokenType::Equal => "EQUAL",
            TokenType::NotEqual => "NOT_EQUAL",
            TokenType::Less => "LESS",
            TokenType::Greater => "GREATER",
            TokenType::LessEqual => "LESS_EQUAL",
            TokenType::GreaterEqual => "GREATER_EQUAL",
            TokenType::Plus => "PLUS",
            TokenType::Minus => "MINUS",
            TokenType::Star => "TIMES",
            TokenType::Slash => "DIVIDE",
            TokenType::Div => "DIV",
            TokenType::Mod => "MOD",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(source: &str) -> Vec<TokenType> {
        TokenType::lexer(source)
            .filter_map(|tok| tok.ok())
            .filter(|tok| !tok.is_trivia())
            .collect()
    }

    #[test]
    fn lexer_when_reserved_word_any_case_then_keyword() {
        assert_eq!(
            types("PROGRAM Begin eNd"),
            vec![TokenType::Program, TokenType::Begin, TokenType::End]
        );
    }

    #[test]
    fn lexer_when_keyword_prefix_then_identifier() {
        assert_eq!(
            types("programa divide ending"),
            vec![
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Identifier
            ]
        );
    }

    #[test]
    fn lexer_when_two_character_operators_then_longest_match() {
        assert_eq!(
            types(":= <= >= <> : < >"),
            vec![
                TokenType::Assignment,
                TokenType::LessEqual,
                TokenType::GreaterEqual,
                TokenType::NotEqual,
                TokenType::Colon,
                TokenType::Less,
                TokenType::Greater
            ]
        );
    }

    #[test]
    fn lexer_when_paren_comment_then_comment() {
        let mut lex = TokenType::lexer("(* a\n b *)x");
        assert_eq!(lex.next(), Some(Ok(TokenType::Comment)));
        assert_eq!(lex.slice(), "(* a\n b *)");
        assert_eq!(lex.next(), Some(Ok(TokenType::Identifier)));
    }

    #[test]
    fn lexer_when_left_paren_then_not_comment() {
        assert_eq!(
            types("(x)"),
            vec![
                TokenType::LeftParen,
                TokenType::Identifier,
                TokenType::RightParen
            ]
        );
    }

    #[test]
    fn lexer_when_brace_comment_unterminated_then_error() {
        let mut lex = TokenType::lexer("{ never closed");
        assert_eq!(lex.next(), Some(Err(())));
        assert_eq!(lex.slice(), "{ never closed");
    }

    #[test]
    fn lexer_when_line_comment_then_stops_at_newline() {
        let mut lex = TokenType::lexer("// note\nx");
        assert_eq!(lex.next(), Some(Ok(TokenType::Comment)));
        assert_eq!(lex.next(), Some(Ok(TokenType::Newline)));
        assert_eq!(lex.next(), Some(Ok(TokenType::Identifier)));
    }

    #[test]
    fn display_when_token_then_listing_format() {
        let token = Token {
            token_type: TokenType::Program,
            span: SourceSpan::range(0, 7),
            line: 1,
            col: 1,
            text: String::from("program"),
        };
        assert_eq!(
            token.to_string(),
            "Line: 1, Column: 1 - Token: PROGRAM - Lexeme: program"
        );
    }
}
