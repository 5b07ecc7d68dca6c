//! Primary parser for PascalLite. The parser transforms tokens into the
//! abstract syntax tree.
//!
//! The grammar never sees whitespace or comments: the lexer drops them.
//!
//! Expression rules are ordered from the lowest precedence (`or`) to the
//! highest (parenthesized and atomic expressions). Every binary operator is
//! left associative and an `else` belongs to the nearest `if`.
extern crate peg;

use dsl::ast::*;
use dsl::core::{FileId, Id, SourceSpan};
use dsl::diagnostic::{Diagnostic, Label, QualifiedPosition};
use log::debug;
use pascallite_problems::Problem;
use peg::parser;
use peg::Parse;
use peg::ParseElem;
use peg::RuleResult;

use crate::token::{Token, TokenType};

/// The deepest nesting of parentheses, blocks and prefix operators the
/// parser accepts. The grammar is recursive so deeper input would exhaust
/// the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parses a PascalLite program into object form.
pub fn parse_tokens(tokens: &[Token], file_id: &FileId) -> Result<Program, Diagnostic> {
    check_nesting(tokens, file_id)?;
    pascallite_parser::program(&SliceByRef(tokens)).map_err(|e| {
        debug!("Parse failed at token index {}", e.location);
        let expected = Vec::from_iter(e.expected.tokens());
        syntax_diagnostic(tokens, file_id, e.location, expected)
    })
}

/// Rejects input nested deeper than [`MAX_NESTING_DEPTH`] at the token
/// that goes past the limit.
fn check_nesting(tokens: &[Token], file_id: &FileId) -> Result<(), Diagnostic> {
    let mut depth: usize = 0;
    let mut prefix_run: usize = 0;

    for tok in tokens {
        match tok.token_type {
            TokenType::LeftParen | TokenType::Begin => depth += 1,
            TokenType::RightParen | TokenType::End => depth = depth.saturating_sub(1),
            _ => {}
        }
        prefix_run = match tok.token_type {
            TokenType::Not | TokenType::Minus => prefix_run + 1,
            _ => 0,
        };

        if depth + prefix_run > MAX_NESTING_DEPTH {
            return Err(Diagnostic::problem(
                Problem::SyntaxError,
                Label::qualified(
                    file_id.clone(),
                    position(tok),
                    format!("Nesting is deeper than {} levels", MAX_NESTING_DEPTH),
                ),
            ));
        }
    }

    Ok(())
}

fn position(token: &Token) -> QualifiedPosition {
    QualifiedPosition::new(token.line, token.col, token.span.start)
}

/// Creates the diagnostic for the first place the tokens do not match
/// the grammar.
fn syntax_diagnostic(
    tokens: &[Token],
    file_id: &FileId,
    location: usize,
    mut expected: Vec<&str>,
) -> Diagnostic {
    // An integer literal that does not fit stops the parse right at the
    // literal, so any such literal up to the failure is the cause.
    let overflow = tokens
        .iter()
        .take(location + 1)
        .find(|tok| tok.token_type == TokenType::Integer && tok.text.parse::<i64>().is_err());
    if let Some(tok) = overflow {
        return Diagnostic::problem(
            Problem::IntegerLiteralOverflow,
            Label::qualified(
                file_id.clone(),
                position(tok),
                format!("The value {} is larger than the largest integer", tok.text),
            ),
        );
    }

    // Token matchers are not meaningful to a reader so only keep the
    // named expectations.
    expected.retain(|item| !item.starts_with('['));
    expected.sort_unstable();
    expected.dedup();
    let expected = if expected.is_empty() {
        String::new()
    } else {
        format!("Expected one of: {}. ", expected.join(", "))
    };

    match tokens.get(location) {
        Some(tok) => Diagnostic::problem(
            Problem::SyntaxError,
            Label::qualified(
                file_id.clone(),
                position(tok),
                format!("{}Found '{}'", expected, tok.text),
            ),
        ),
        None => {
            let position = match tokens.last() {
                Some(last) => QualifiedPosition::new(
                    last.line,
                    last.col + last.text.chars().count(),
                    last.span.end,
                ),
                None => QualifiedPosition::new(1, 1, 0),
            };
            Diagnostic::problem(
                Problem::UnexpectedEndOfInput,
                Label::qualified(
                    file_id.clone(),
                    position,
                    format!("{}Found end of input", expected),
                ),
            )
        }
    }
}

/// The default implementation of the parsing traits for `[T]` expects `T` to be
/// `Copy`, as in the `[u8]` or simple enum cases. This wrapper exposes the
/// elements by `&T` reference, which is `Copy`.
pub struct SliceByRef<'a, T>(pub &'a [T]);

impl<'a, T> Parse for SliceByRef<'a, T> {
    type PositionRepr = usize;
    fn start(&self) -> usize {
        0
    }

    fn is_eof(&self, pos: usize) -> bool {
        pos >= self.0.len()
    }

    fn position_repr(&self, pos: usize) -> usize {
        pos
    }
}

impl<'a, T: 'a> ParseElem<'a> for SliceByRef<'a, T> {
    type Element = &'a T;

    fn parse_elem(&'a self, pos: usize) -> RuleResult<&'a T> {
        match self.0[pos..].first() {
            Some(c) => RuleResult::Matched(pos + 1, c),
            None => RuleResult::Failed,
        }
    }
}

parser! {
  grammar pascallite_parser<'a>() for SliceByRef<'a, Token> {

    /// Helper rule to match a particular type of token.
    rule tok(ty: TokenType) -> &'input Token = quiet!{ token:[t if t.token_type == ty] { token } }

    // Named punctuation and keywords. These report what the parser
    // expected when the rule fails.
    rule semicolon() = tok(TokenType::Semicolon) {} / expected!("';'")
    rule colon() = tok(TokenType::Colon) {} / expected!("':'")
    rule comma() = tok(TokenType::Comma) {} / expected!("','")
    rule assign() = tok(TokenType::Assignment) {} / expected!("':='")
    rule left_paren() = tok(TokenType::LeftParen) {} / expected!("'('")
    rule right_paren() = tok(TokenType::RightParen) {} / expected!("')'")
    rule then_kw() = tok(TokenType::Then) {} / expected!("'then'")
    rule do_kw() = tok(TokenType::Do) {} / expected!("'do'")
    rule program_kw() -> &'input Token = t:tok(TokenType::Program) { t } / expected!("'program'")
    rule begin_kw() -> &'input Token = t:tok(TokenType::Begin) { t } / expected!("'begin'")
    rule end_kw() -> &'input Token = t:tok(TokenType::End) { t } / expected!("'end'")
    rule period() -> &'input Token = t:tok(TokenType::Period) { t } / expected!("'.'")

    rule variable() -> Id = t:tok(TokenType::Identifier) {
      Id::from(&t.text).with_position(t.span.clone())
    }
    rule identifier() -> Id = v:variable() { v } / expected!("identifier")
    rule integer() -> i64 = t:tok(TokenType::Integer) {? t.text.parse::<i64>().or(Err("integer")) }

    // Program structure
    pub rule program() -> Program = start:program_kw() name:identifier() semicolon() block:block() end:period() {
      Program {
        name,
        block,
        span: SourceSpan::join(&start.span, &end.span),
      }
    }

    rule block() -> Block = sections:var_section()* body:compound() {
      Block {
        declarations: DeclarationList {
          declarations: sections.into_iter().flatten().collect(),
        },
        body,
      }
    }

    rule var_section() -> Vec<Declaration> = tok(TokenType::Var) declarations:declaration()+ { declarations }

    rule declaration() -> Declaration = names:identifier() ++ comma() colon() type_name:type_name() semicolon() {
      let (type_name, type_span) = type_name;
      let span = match names.first() {
        Some(first) => SourceSpan::join(&first.span, &type_span),
        None => type_span,
      };
      Declaration { names, type_name, span }
    }

    rule type_name() -> (TypeName, SourceSpan)
      = t:tok(TokenType::IntegerType) { (TypeName::Integer, t.span.clone()) }
      / t:tok(TokenType::BooleanType) { (TypeName::Boolean, t.span.clone()) }
      / expected!("type")

    // Statements
    pub rule compound() -> Compound = start:begin_kw() statements:statement() ** semicolon() end:end_kw() {
      Compound {
        body: statements.into_iter().flatten().collect(),
        span: SourceSpan::join(&start.span, &end.span),
      }
    }

    /// A statement that may be empty so that `;` is allowed before `end`.
    rule statement() -> Option<StmtKind> = s:non_empty_statement()? { s }

    rule non_empty_statement() -> StmtKind
      = s:assignment() { s }
      / s:if_statement() { s }
      / s:while_statement() { s }
      / s:read_statement() { s }
      / s:write_statement() { s }
      / c:compound() { StmtKind::Compound(c) }

    rule assignment() -> StmtKind = target:variable() assign() value:expression() {
      StmtKind::Assignment(Assignment { target, value })
    }

    rule if_statement() -> StmtKind = tok(TokenType::If) condition:expression() then_kw() then_body:non_empty_statement() else_body:(tok(TokenType::Else) s:non_empty_statement() { s })? {
      StmtKind::If(If {
        condition,
        then_body: Box::new(then_body),
        else_body: else_body.map(Box::new),
      })
    }

    rule while_statement() -> StmtKind = tok(TokenType::While) condition:expression() do_kw() body:non_empty_statement() {
      StmtKind::While(While {
        condition,
        body: Box::new(body),
      })
    }

    rule read_statement() -> StmtKind = tok(TokenType::Read) left_paren() targets:identifier() ++ comma() right_paren() {
      StmtKind::Read(Read { targets })
    }

    rule write_statement() -> StmtKind = tok(TokenType::Write) left_paren() values:expression() ++ comma() right_paren() {
      StmtKind::Write(Write { values })
    }

    // Expressions
    pub rule expression() -> ExprKind = precedence!{
      // or_expression
      x:(@) tok(TokenType::Or) y:@ { ExprKind::compare(CompareOp::Or, x, y) }
      --
      // and_expression
      x:(@) tok(TokenType::And) y:@ { ExprKind::compare(CompareOp::And, x, y) }
      --
      // relational_expression
      x:(@) tok(TokenType::Equal) y:@ { ExprKind::compare(CompareOp::Eq, x, y) }
      x:(@) tok(TokenType::NotEqual) y:@ { ExprKind::compare(CompareOp::Ne, x, y) }
      x:(@) tok(TokenType::Less) y:@ { ExprKind::compare(CompareOp::Lt, x, y) }
      x:(@) tok(TokenType::Greater) y:@ { ExprKind::compare(CompareOp::Gt, x, y) }
      x:(@) tok(TokenType::LessEqual) y:@ { ExprKind::compare(CompareOp::LtEq, x, y) }
      x:(@) tok(TokenType::GreaterEqual) y:@ { ExprKind::compare(CompareOp::GtEq, x, y) }
      --
      // add_expression
      x:(@) tok(TokenType::Plus) y:@ { ExprKind::binary(Operator::Add, x, y) }
      x:(@) tok(TokenType::Minus) y:@ { ExprKind::binary(Operator::Sub, x, y) }
      --
      // multiply_expression
      x:(@) tok(TokenType::Star) y:@ { ExprKind::binary(Operator::Mul, x, y) }
      x:(@) tok(TokenType::Slash) y:@ { ExprKind::binary(Operator::Div, x, y) }
      x:(@) tok(TokenType::Div) y:@ { ExprKind::binary(Operator::IntDiv, x, y) }
      x:(@) tok(TokenType::Mod) y:@ { ExprKind::binary(Operator::Mod, x, y) }
      --
      // unary_expression
      u:unary_expression() { u }
    }

    rule unary_expression() -> ExprKind
      = tok(TokenType::Not) term:unary_expression() { ExprKind::unary(UnaryOp::Not, term) }
      / tok(TokenType::Minus) term:unary_expression() { ExprKind::unary(UnaryOp::Neg, term) }
      / p:primary_expression() { p }

    rule primary_expression() -> ExprKind
      = value:integer() { ExprKind::integer(value) }
      / tok(TokenType::True) { ExprKind::boolean(true) }
      / tok(TokenType::False) { ExprKind::boolean(false) }
      / v:variable() { ExprKind::Variable(v) }
      / tok(TokenType::LeftParen) e:expression() right_paren() { e }
      / expected!("expression")
  }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::tokenize;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize(source, &FileId::default()).0
    }

    fn expression(source: &str) -> ExprKind {
        let tokens = tokens(source);
        pascallite_parser::expression(&SliceByRef(&tokens)).unwrap()
    }

    fn statements(source: &str) -> Vec<StmtKind> {
        let tokens = tokens(source);
        pascallite_parser::compound(&SliceByRef(&tokens))
            .unwrap()
            .body
    }

    fn parse_err(source: &str) -> Diagnostic {
        let tokens = tokens(source);
        parse_tokens(&tokens, &FileId::default()).unwrap_err()
    }

    #[test]
    fn expression_when_mul_after_add_then_mul_binds_tighter() {
        assert_eq!(expression("5 + 3 * 2").to_string(), "(5 + (3 * 2))");
    }

    #[test]
    fn expression_when_parenthesized_then_grouping_wins() {
        assert_eq!(expression("(5 + 3) * 2").to_string(), "((5 + 3) * 2)");
    }

    #[test]
    fn expression_when_same_precedence_then_left_associative() {
        assert_eq!(expression("8 - 4 - 2").to_string(), "((8 - 4) - 2)");
        assert_eq!(expression("8 div 4 mod 3").to_string(), "((8 div 4) mod 3)");
    }

    #[test]
    fn expression_when_logical_and_relational_then_relational_binds_tighter() {
        assert_eq!(
            expression("a < b and c or d = e").to_string(),
            "(((a < b) and c) or (d = e))"
        );
    }

    #[test]
    fn expression_when_unary_then_binds_tightest() {
        assert_eq!(expression("-x * 2").to_string(), "(-x * 2)");
        assert_eq!(expression("not a and b").to_string(), "(not a and b)");
        assert_eq!(expression("5 - -1").to_string(), "(5 - -1)");
    }

    #[test]
    fn expression_when_boolean_constants_then_constants() {
        assert_eq!(
            expression("true <> false"),
            ExprKind::compare(
                CompareOp::Ne,
                ExprKind::boolean(true),
                ExprKind::boolean(false)
            )
        );
    }

    #[test]
    fn compound_when_trailing_semicolon_then_accepted() {
        assert_eq!(
            statements("begin x := 1; end"),
            vec![StmtKind::assignment("x", ExprKind::integer(1))]
        );
    }

    #[test]
    fn compound_when_empty_then_no_statements() {
        assert!(statements("begin end").is_empty());
    }

    #[test]
    fn compound_when_dangling_else_then_binds_to_nearest_if() {
        let expected = vec![StmtKind::if_then(
            ExprKind::variable("a"),
            StmtKind::if_then_else(
                ExprKind::variable("b"),
                StmtKind::write(vec![ExprKind::integer(1)]),
                StmtKind::write(vec![ExprKind::integer(2)]),
            ),
        )];
        assert_eq!(
            statements("begin if a then if b then write(1) else write(2) end"),
            expected
        );
    }

    #[test]
    fn compound_when_read_and_write_lists_then_all_items() {
        let expected = vec![
            StmtKind::read(&["a", "b"]),
            StmtKind::write(vec![
                ExprKind::variable("a"),
                ExprKind::binary(
                    Operator::Add,
                    ExprKind::variable("a"),
                    ExprKind::variable("b"),
                ),
            ]),
        ];
        assert_eq!(statements("begin read(a, b); write(a, a + b) end"), expected);
    }

    #[test]
    fn compound_when_while_with_nested_block_then_compound_body() {
        let expected = vec![StmtKind::while_do(
            ExprKind::compare(CompareOp::Lt, ExprKind::variable("i"), ExprKind::integer(3)),
            StmtKind::compound(vec![StmtKind::assignment(
                "i",
                ExprKind::binary(Operator::Add, ExprKind::variable("i"), ExprKind::integer(1)),
            )]),
        )];
        assert_eq!(
            statements("begin while i < 3 do begin i := i + 1 end end"),
            expected
        );
    }

    #[test]
    fn parse_tokens_when_several_var_sections_then_joined() {
        let tokens = tokens(
            "program p; var a: integer; var b, c: boolean; d: integer; begin end.",
        );
        let program = parse_tokens(&tokens, &FileId::default()).unwrap();

        let names: Vec<&str> = program
            .block
            .declarations
            .names()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(program.block.declarations.declarations.len(), 3);
    }

    #[test]
    fn parse_tokens_when_identifier_then_keeps_position() {
        let tokens = tokens("program p; begin x := 1 end.");
        let program = parse_tokens(&tokens, &FileId::default()).unwrap();

        match &program.block.body.body[0] {
            StmtKind::Assignment(assignment) => {
                assert_eq!(assignment.target.span.start, 17);
                assert_eq!(assignment.target.span.end, 18);
            }
            _ => panic!("expected assignment"),
        }
    }

    #[test]
    fn parse_tokens_when_missing_semicolon_then_syntax_error_at_token() {
        let err = parse_err("program p;\nvar x: integer\nbegin end.");

        assert_eq!(err.code, "P0010");
        assert_eq!(err.primary.line(), Some(3));
        assert_eq!(err.primary.message, "Expected one of: ';'. Found 'begin'");
    }

    #[test]
    fn parse_tokens_when_missing_assign_then_expects_assign() {
        let err = parse_err("program p; begin x = 1 end.");

        assert_eq!(err.code, "P0010");
        assert_eq!(err.primary.message, "Expected one of: ':='. Found '='");
    }

    #[test]
    fn parse_tokens_when_truncated_then_unexpected_end_of_input() {
        let err = parse_err("program p; begin x := 1");

        assert_eq!(err.code, "P0011");
        assert_eq!(err.primary.line(), Some(1));
    }

    #[test]
    fn parse_tokens_when_empty_then_unexpected_end_of_input() {
        let err = parse_err("");
        assert_eq!(err.code, "P0011");
    }

    #[test]
    fn parse_tokens_when_integer_too_large_then_overflow() {
        let err = parse_err("program p; begin x := 99999999999999999999 end.");
        assert_eq!(err.code, "P0012");
    }

    #[test]
    fn parse_tokens_when_nested_parentheses_within_limit_then_ok() {
        let nested = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        let tokens = tokens(&format!("program p; begin x := {} end.", nested));

        assert!(parse_tokens(&tokens, &FileId::default()).is_ok());
    }

    #[test]
    fn parse_tokens_when_nested_parentheses_too_deep_then_syntax_error() {
        let nested = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
        let err = parse_err(&format!("program p; begin x := {} end.", nested));

        assert_eq!(err.code, "P0010");
        assert_eq!(err.primary.message, "Nesting is deeper than 256 levels");
    }

    #[test]
    fn parse_tokens_when_nested_blocks_too_deep_then_syntax_error() {
        let nested = format!("{}{}", "begin ".repeat(1000), "end ".repeat(1000));
        let err = parse_err(&format!("program p; {}.", nested));

        assert_eq!(err.code, "P0010");
    }

    #[test]
    fn parse_tokens_when_long_prefix_chain_then_syntax_error() {
        let err = parse_err(&format!("program p; begin x := {}1 end.", "- ".repeat(1000)));

        assert_eq!(err.code, "P0010");
    }

    #[test]
    fn parse_tokens_when_text_after_period_then_syntax_error() {
        let err = parse_err("program p; begin end. x");
        assert_eq!(err.code, "P0010");
    }
}
