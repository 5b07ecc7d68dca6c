//! The compiler as individual stages (to enable testing).
use log::debug;
use pascallite_analyzer::stages::resolve_symbols;
use pascallite_analyzer::symbol_table::SymbolTable;
use pascallite_codegen::{compile_with_context, Listing, TranslationContext};
use pascallite_dsl::{ast::Program, core::FileId, diagnostic::Diagnostic};
use pascallite_parser::{options::ParseOptions, parse_program};

/// What the translation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompilerMode {
    /// Build the syntax tree.
    Ast,
    /// Emit MEPA instructions.
    #[default]
    Codegen,
}

#[derive(Debug, Clone, Default)]
pub struct CompilerOptions {
    pub mode: CompilerMode,
    /// Check declarations and uses in AST mode. Code generation always
    /// checks them.
    pub resolve_symbols: bool,
    pub parse: ParseOptions,
}

/// The output of a successful translation.
#[derive(Debug)]
pub enum Artifact {
    Ast {
        program: Program,
        /// Present when symbols were resolved.
        symbols: Option<SymbolTable>,
    },
    Listing {
        listing: Listing,
        symbols: SymbolTable,
    },
}

/// A successful translation and the diagnostics that did not stop it.
#[derive(Debug)]
pub struct Translation {
    pub artifact: Artifact,
    pub diagnostics: Vec<Diagnostic>,
}

/// Translates the source text according to the options.
///
/// Returns `Ok(Translation)` if the translation completed.
/// Returns `Err(Vec<Diagnostic>)` if it did not. The last diagnostic is
/// the one that stopped the translation and any before it were reported
/// while reading the source.
pub fn translate(
    source: &str,
    file_id: &FileId,
    options: &CompilerOptions,
) -> Result<Translation, Vec<Diagnostic>> {
    let parsed = parse_program(source, file_id, &options.parse)?;
    let mut diagnostics = parsed.diagnostics;

    let artifact = match options.mode {
        CompilerMode::Ast => {
            let symbols = if options.resolve_symbols {
                match resolve_symbols(&parsed.program) {
                    Ok(symbols) => Some(symbols),
                    Err(err) => {
                        diagnostics.push(err);
                        return Err(diagnostics);
                    }
                }
            } else {
                None
            };
            Artifact::Ast {
                program: parsed.program,
                symbols,
            }
        }
        CompilerMode::Codegen => {
            let mut ctx = TranslationContext::new();
            match compile_with_context(&parsed.program, &mut ctx) {
                Ok(listing) => Artifact::Listing {
                    listing,
                    symbols: ctx.into_symbols(),
                },
                Err(err) => {
                    diagnostics.push(err);
                    return Err(diagnostics);
                }
            }
        }
    };

    debug!(
        "Translated {} with {} diagnostics",
        file_id,
        diagnostics.len()
    );
    Ok(Translation {
        artifact,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::read_resource;

    fn options(mode: CompilerMode, resolve_symbols: bool) -> CompilerOptions {
        CompilerOptions {
            mode,
            resolve_symbols,
            parse: ParseOptions::default(),
        }
    }

    #[test]
    fn translate_when_codegen_then_listing() {
        let source = read_resource("sum.pas");
        let translation = translate(
            &source,
            &FileId::default(),
            &options(CompilerMode::Codegen, false),
        )
        .unwrap();

        match translation.artifact {
            Artifact::Listing { listing, symbols } => {
                assert_eq!(listing.lines()[1], "AMEM 3");
                assert_eq!(symbols.size(), 3);
            }
            _ => panic!("expected listing"),
        }
    }

    #[test]
    fn translate_when_ast_with_undeclared_then_ok() {
        let source = read_resource("undeclared.pas");
        let translation = translate(
            &source,
            &FileId::default(),
            &options(CompilerMode::Ast, false),
        );

        assert!(translation.is_ok());
    }

    #[test]
    fn translate_when_ast_resolving_undeclared_then_err() {
        let source = read_resource("undeclared.pas");
        let errors = translate(
            &source,
            &FileId::default(),
            &options(CompilerMode::Ast, true),
        )
        .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "P0021");
    }

    #[test]
    fn translate_when_illegal_character_and_undeclared_then_all_diagnostics() {
        let source = "program p; var a: integer; begin a := &1; b := a end.";
        let errors = translate(
            source,
            &FileId::default(),
            &options(CompilerMode::Codegen, false),
        )
        .unwrap_err();

        let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["P0001", "P0021"]);
    }

    #[test]
    fn translate_when_syntax_error_then_single_error() {
        let source = read_resource("syntax_error.pas");
        let errors = translate(
            &source,
            &FileId::default(),
            &options(CompilerMode::Codegen, false),
        )
        .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "P0010");
    }

    #[test]
    fn translate_when_illegal_character_breaks_syntax_then_lexical_and_syntax_errors() {
        let source = "program p; var x: integer; begin x := 1 & 2 end.";
        let errors = translate(
            source,
            &FileId::default(),
            &options(CompilerMode::Codegen, false),
        )
        .unwrap_err();

        let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["P0001", "P0010"]);
    }

    #[test]
    fn translate_when_unterminated_comment_then_comment_and_end_of_input_errors() {
        let source = "program p; var x: integer; (* forgot to close\nbegin x := 1 end.";
        let errors = translate(
            source,
            &FileId::default(),
            &options(CompilerMode::Ast, false),
        )
        .unwrap_err();

        let codes: Vec<&str> = errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["P0003", "P0011"]);
    }
}
