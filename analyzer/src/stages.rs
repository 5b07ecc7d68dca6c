//! Semantic stages of the compiler.
use log::debug;
use pascallite_dsl::{ast::Program, diagnostic::Diagnostic};

use crate::symbol_table::SymbolTable;
use crate::xform_resolve_symbol_table;

/// Builds the symbol table of the program.
///
/// Returns an error for the first variable that is declared twice or
/// used without a declaration.
pub fn resolve_symbols(program: &Program) -> Result<SymbolTable, Diagnostic> {
    let mut table = SymbolTable::new();
    resolve_symbols_into(program, &mut table)?;
    Ok(table)
}

/// Builds the symbol table of the program into an existing table.
///
/// The table is cleared first so that addresses always start at 0.
pub fn resolve_symbols_into(program: &Program, table: &mut SymbolTable) -> Result<(), Diagnostic> {
    table.reset();
    xform_resolve_symbol_table::apply(program, table)?;
    debug!(
        "Resolved program {} with {} variables",
        program.name,
        table.size()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::parse;
    use pascallite_dsl::ast::TypeName;
    use pascallite_dsl::core::Id;
    use pascallite_test::read_shared_resource;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("factorial.pas", 3)]
    #[case("assign.pas", 2)]
    #[case("if_else.pas", 2)]
    #[case("boolean.pas", 5)]
    #[case("comments.pas", 1)]
    fn resolve_symbols_when_valid_program_then_size_is_declared_count(
        #[case] name: &'static str,
        #[case] size: usize,
    ) {
        let program = parse(&read_shared_resource(name));
        let table = resolve_symbols(&program).unwrap();
        assert_eq!(table.size(), size);
    }

    #[rstest]
    #[case("undeclared.pas", "P0021")]
    #[case("duplicate.pas", "P0020")]
    fn resolve_symbols_when_invalid_program_then_error(
        #[case] name: &'static str,
        #[case] code: &str,
    ) {
        let program = parse(&read_shared_resource(name));
        let err = resolve_symbols(&program).unwrap_err();
        assert_eq!(err.code, code);
    }

    #[rstest]
    #[case("program p; begin x := 1 end.")]
    #[case("program p; var a: integer; begin a := x end.")]
    #[case("program p; begin read(x) end.")]
    #[case("program p; begin write(x) end.")]
    #[case("program p; var a: boolean; begin if x then a := true end.")]
    #[case("program p; var a: boolean; begin while not x do a := true end.")]
    fn resolve_symbols_when_use_of_undeclared_then_error(#[case] source: &str) {
        let program = parse(source);
        let err = resolve_symbols(&program).unwrap_err();
        assert_eq!(err.code, "P0021");
    }

    #[test]
    fn resolve_symbols_when_declared_then_addresses_in_declaration_order() {
        let program = parse("program p; var c, a: integer; var b: boolean; begin end.");
        let table = resolve_symbols(&program).unwrap();

        assert_eq!(table.resolve(&Id::from("c")).unwrap(), 0);
        assert_eq!(table.resolve(&Id::from("a")).unwrap(), 1);
        assert_eq!(table.resolve(&Id::from("b")).unwrap(), 2);
        assert_eq!(
            table.lookup(&Id::from("b")).map(|e| e.type_name),
            Some(TypeName::Boolean)
        );
    }

    #[test]
    fn resolve_symbols_into_when_reused_table_then_starts_over() {
        let program = parse("program p; var a, b: integer; begin end.");
        let mut table = SymbolTable::new();

        resolve_symbols_into(&program, &mut table).unwrap();
        resolve_symbols_into(&program, &mut table).unwrap();

        assert_eq!(table.size(), 2);
        assert_eq!(table.resolve(&Id::from("b")).unwrap(), 1);
    }

    proptest! {
        #[test]
        fn resolve_symbols_when_distinct_names_then_size_matches(count in 0usize..40) {
            let names: Vec<String> = (0..count).map(|i| format!("v{}", i)).collect();
            let source = if names.is_empty() {
                String::from("program p; begin end.")
            } else {
                format!("program p; var {}: integer; begin end.", names.join(", "))
            };
            let table = resolve_symbols(&parse(&source)).unwrap();
            prop_assert_eq!(table.size(), count);
        }
    }
}
