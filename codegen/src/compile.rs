//! Compiles a PascalLite AST into a MEPA instruction listing.
//!
//! This module walks the AST produced by the parser and emits instructions
//! in execution order.
//!
//! # Translation
//!
//! - Expressions are emitted in post order: operands first, then the
//!   operator.
//! - Assignment emits the value and then `ARMZ`.
//! - `read` emits `LEIT` and `ARMZ` for each target.
//! - `write` emits each value followed by `IMPR`.
//! - `if` and `while` use labels from the context. Labels are created when
//!   the statement is reached, so numbering follows the source order of the
//!   statements.
//!
//! All declarations are resolved before any statement is emitted, so the
//! `AMEM` operand is known when the program starts.
use log::{debug, trace};
use pascallite_analyzer::stages::resolve_symbols_into;
use pascallite_analyzer::symbol_table::SymbolTable;
use pascallite_dsl::ast::*;
use pascallite_dsl::diagnostic::Diagnostic;

use crate::emit::{Emitter, Listing};
use crate::instruction::Instruction;
use crate::label::LabelAllocator;

/// The state of one translation: the symbol table and the label
/// allocator.
///
/// A context is exclusively used by one translation at a time. Compiling
/// with a context resets it first, so reusing a context gives the same
/// output as using a new one.
#[derive(Debug, Default)]
pub struct TranslationContext {
    symbols: SymbolTable,
    labels: LabelAllocator,
}

impl TranslationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The symbols of the most recently compiled program.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Takes the symbol table out of the context.
    pub fn into_symbols(self) -> SymbolTable {
        self.symbols
    }

    pub fn reset(&mut self) {
        self.symbols.reset();
        self.labels.reset();
    }
}

/// Compiles a program into a MEPA listing.
///
/// Returns an error if a variable is declared more than once or used
/// without a declaration. No listing is produced in that case.
pub fn compile(program: &Program) -> Result<Listing, Diagnostic> {
    let mut ctx = TranslationContext::new();
    compile_with_context(program, &mut ctx)
}

/// Compiles a program using the context. The symbol table remains in the
/// context after compiling.
pub fn compile_with_context(
    program: &Program,
    ctx: &mut TranslationContext,
) -> Result<Listing, Diagnostic> {
    ctx.reset();
    resolve_symbols_into(program, &mut ctx.symbols)?;

    let mut emitter = Emitter::new();
    emitter.emit(Instruction::Inpp);
    emitter.emit(Instruction::Amem(ctx.symbols.size()));
    compile_stmts(&mut emitter, ctx, &program.block.body.body)?;
    emitter.emit(Instruction::Para);

    let listing = emitter.into_listing();
    debug!(
        "Compiled program {} into {} instructions",
        program.name,
        listing.len()
    );
    Ok(listing)
}

fn compile_stmts(
    emitter: &mut Emitter,
    ctx: &mut TranslationContext,
    stmts: &[StmtKind],
) -> Result<(), Diagnostic> {
    for stmt in stmts {
        compile_stmt(emitter, ctx, stmt)?;
    }
    Ok(())
}

fn compile_stmt(
    emitter: &mut Emitter,
    ctx: &mut TranslationContext,
    stmt: &StmtKind,
) -> Result<(), Diagnostic> {
    match stmt {
        StmtKind::Assignment(assignment) => {
            compile_expr(emitter, ctx, &assignment.value)?;
            let address = ctx.symbols.resolve(&assignment.target)?;
            emitter.emit_store_var(address);
            Ok(())
        }
        StmtKind::If(if_stmt) => compile_if(emitter, ctx, if_stmt),
        StmtKind::While(while_stmt) => compile_while(emitter, ctx, while_stmt),
        StmtKind::Read(read) => {
            for target in &read.targets {
                let address = ctx.symbols.resolve(target)?;
                emitter.emit(Instruction::Leit);
                emitter.emit_store_var(address);
            }
            Ok(())
        }
        StmtKind::Write(write) => {
            for value in &write.values {
                compile_expr(emitter, ctx, value)?;
                emitter.emit(Instruction::Impr);
            }
            Ok(())
        }
        StmtKind::Compound(compound) => compile_stmts(emitter, ctx, &compound.body),
    }
}

fn compile_if(
    emitter: &mut Emitter,
    ctx: &mut TranslationContext,
    if_stmt: &If,
) -> Result<(), Diagnostic> {
    let else_label = ctx.labels.next();
    let end_label = if_stmt.else_body.as_ref().map(|_| ctx.labels.next());
    trace!("If with labels {} {:?}", else_label, end_label);

    compile_expr(emitter, ctx, &if_stmt.condition)?;
    emitter.emit_jmp_if_not(else_label);
    compile_stmt(emitter, ctx, &if_stmt.then_body)?;

    match (&if_stmt.else_body, end_label) {
        (Some(else_body), Some(end_label)) => {
            emitter.emit_jmp(end_label);
            emitter.bind_label(else_label);
            compile_stmt(emitter, ctx, else_body)?;
            emitter.bind_label(end_label);
        }
        _ => {
            emitter.bind_label(else_label);
        }
    }

    Ok(())
}

fn compile_while(
    emitter: &mut Emitter,
    ctx: &mut TranslationContext,
    while_stmt: &While,
) -> Result<(), Diagnostic> {
    let loop_label = ctx.labels.next();
    let end_label = ctx.labels.next();
    trace!("While with labels {} {}", loop_label, end_label);

    emitter.bind_label(loop_label);
    compile_expr(emitter, ctx, &while_stmt.condition)?;
    emitter.emit_jmp_if_not(end_label);
    compile_stmt(emitter, ctx, &while_stmt.body)?;
    emitter.emit_jmp(loop_label);
    emitter.bind_label(end_label);

    Ok(())
}

fn compile_expr(
    emitter: &mut Emitter,
    ctx: &mut TranslationContext,
    expr: &ExprKind,
) -> Result<(), Diagnostic> {
    match expr {
        ExprKind::Const(ConstantKind::Integer(value)) => {
            emitter.emit_load_const(*value);
        }
        ExprKind::Const(ConstantKind::Boolean(value)) => {
            emitter.emit_load_bool(*value);
        }
        ExprKind::Variable(id) => {
            let address = ctx.symbols.resolve(id)?;
            emitter.emit_load_var(address);
        }
        ExprKind::BinaryOp(binary) => {
            compile_expr(emitter, ctx, &binary.left)?;
            compile_expr(emitter, ctx, &binary.right)?;
            emitter.emit(operator_instruction(binary.op));
        }
        ExprKind::Compare(compare) => {
            compile_expr(emitter, ctx, &compare.left)?;
            compile_expr(emitter, ctx, &compare.right)?;
            emitter.emit(compare_instruction(compare.op));
        }
        ExprKind::UnaryOp(unary) => {
            compile_expr(emitter, ctx, &unary.term)?;
            emitter.emit(unary_instruction(unary.op));
        }
    }
    Ok(())
}

fn operator_instruction(op: Operator) -> Instruction {
    match op {
        Operator::Add => Instruction::Soma,
        Operator::Sub => Instruction::Subt,
        Operator::Mul => Instruction::Mult,
        // MEPA has one division instruction for both forms.
        Operator::Div | Operator::IntDiv => Instruction::Divi,
        Operator::Mod => Instruction::Modi,
    }
}

fn compare_instruction(op: CompareOp) -> Instruction {
    match op {
        CompareOp::Or => Instruction::Disj,
        CompareOp::And => Instruction::Conj,
        CompareOp::Eq => Instruction::Cmig,
        CompareOp::Ne => Instruction::Cmdg,
        CompareOp::Lt => Instruction::Cmme,
        CompareOp::Gt => Instruction::Cmma,
        CompareOp::LtEq => Instruction::Cmeg,
        CompareOp::GtEq => Instruction::Cmag,
    }
}

fn unary_instruction(op: UnaryOp) -> Instruction {
    match op {
        UnaryOp::Neg => Instruction::Invr,
        UnaryOp::Not => Instruction::Nega,
    }
}
