//! Low-level instruction emitter.
//!
//! Provides a builder that appends instructions to the output listing.
//! Nothing reads back from the emitter while a program is compiled.
use core::fmt;

use pascallite_analyzer::symbol_table::Address;

use crate::instruction::Instruction;
use crate::label::Label;

/// Accumulates instructions in execution order.
pub struct Emitter {
    instructions: Vec<Instruction>,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter {
            instructions: Vec::new(),
        }
    }

    /// Emits an instruction that has no operand or whose operand is
    /// already known.
    pub fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Emits CRCT with the value of the constant.
    pub fn emit_load_const(&mut self, value: i64) {
        self.emit(Instruction::Crct(value));
    }

    /// Emits CRCT 1 or CRCT 0.
    pub fn emit_load_bool(&mut self, value: bool) {
        self.emit_load_const(i64::from(value));
    }

    /// Emits CRVL with a variable address.
    pub fn emit_load_var(&mut self, address: Address) {
        self.emit(Instruction::Crvl(address));
    }

    /// Emits ARMZ with a variable address.
    pub fn emit_store_var(&mut self, address: Address) {
        self.emit(Instruction::Armz(address));
    }

    /// Emits DSVS (unconditional branch).
    pub fn emit_jmp(&mut self, label: Label) {
        self.emit(Instruction::Dsvs(label));
    }

    /// Emits DSVF (branch when the top of the stack is false).
    pub fn emit_jmp_if_not(&mut self, label: Label) {
        self.emit(Instruction::Dsvf(label));
    }

    /// Places the label at the current position.
    pub fn bind_label(&mut self, label: Label) {
        self.emit(Instruction::Nada(label));
    }

    pub fn into_listing(self) -> Listing {
        Listing {
            instructions: self.instructions,
        }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

/// The instructions of a compiled program.
///
/// Displays as one instruction per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    instructions: Vec<Instruction>,
}

impl Listing {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The listing as text lines.
    pub fn lines(&self) -> Vec<String> {
        self.instructions.iter().map(|i| i.to_string()).collect()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}
