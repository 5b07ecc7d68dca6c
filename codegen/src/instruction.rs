//! The MEPA instruction set.
use core::fmt;

use pascallite_analyzer::symbol_table::Address;

use crate::label::Label;

/// One MEPA instruction. Operands are part of the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Starts the program.
    Inpp,
    /// Reserves memory for the given number of variables.
    Amem(usize),
    /// Stops the program.
    Para,
    /// Loads a constant.
    Crct(i64),
    /// Loads the value at an address.
    Crvl(Address),
    /// Stores the top of the stack at an address.
    Armz(Address),
    Soma,
    Subt,
    Mult,
    Divi,
    Modi,
    /// Less than.
    Cmme,
    /// Less than or equal.
    Cmeg,
    /// Greater than.
    Cmma,
    /// Greater than or equal.
    Cmag,
    /// Equal.
    Cmig,
    /// Not equal.
    Cmdg,
    Conj,
    Disj,
    Nega,
    /// Arithmetic negation.
    Invr,
    /// Reads a value from the input.
    Leit,
    /// Prints the top of the stack.
    Impr,
    /// Branches to the label.
    Dsvs(Label),
    /// Branches to the label when the top of the stack is false.
    Dsvf(Label),
    /// Defines the label at this point. Does nothing when executed.
    Nada(Label),
}

impl Instruction {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Inpp => "INPP",
            Instruction::Amem(_) => "AMEM",
            Instruction::Para => "PARA",
            Instruction::Crct(_) => "CRCT",
            Instruction::Crvl(_) => "CRVL",
            Instruction::Armz(_) => "ARMZ",
            Instruction::Soma => "SOMA",
            Instruction::Subt => "SUBT",
            Instruction::Mult => "MULT",
            Instruction::Divi => "DIVI",
            Instruction::Modi => "MODI",
            Instruction::Cmme => "CMME",
            Instruction::Cmeg => "CMEG",
            Instruction::Cmma => "CMMA",
            Instruction::Cmag => "CMAG",
            Instruction::Cmig => "CMIG",
            Instruction::Cmdg => "CMDG",
            Instruction::Conj => "CONJ",
            Instruction::Disj => "DISJ",
            Instruction::Nega => "NEGA",
            Instruction::Invr => "INVR",
            Instruction::Leit => "LEIT",
            Instruction::Impr => "IMPR",
            Instruction::Dsvs(_) => "DSVS",
            Instruction::Dsvf(_) => "DSVF",
            Instruction::Nada(_) => "NADA",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Amem(size) => write!(f, "{} {}", self.mnemonic(), size),
            Instruction::Crct(value) => write!(f, "{} {}", self.mnemonic(), value),
            Instruction::Crvl(address) | Instruction::Armz(address) => {
                write!(f, "{} {}", self.mnemonic(), address)
            }
            Instruction::Dsvs(label) | Instruction::Dsvf(label) => {
                write!(f, "{} {}", self.mnemonic(), label)
            }
            Instruction::Nada(label) => write!(f, "{}: {}", label, self.mnemonic()),
            _ => f.write_str(self.mnemonic()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelAllocator;

    #[test]
    fn display_when_operand_then_separated_by_space() {
        assert_eq!(Instruction::Amem(3).to_string(), "AMEM 3");
        assert_eq!(Instruction::Crct(-4).to_string(), "CRCT -4");
        assert_eq!(Instruction::Armz(0).to_string(), "ARMZ 0");
    }

    #[test]
    fn display_when_label_then_label_forms() {
        let mut labels = LabelAllocator::new();
        let label = labels.next();

        assert_eq!(Instruction::Dsvf(label).to_string(), "DSVF L1");
        assert_eq!(Instruction::Dsvs(label).to_string(), "DSVS L1");
        assert_eq!(Instruction::Nada(label).to_string(), "L1: NADA");
    }

    #[test]
    fn display_when_no_operand_then_mnemonic() {
        assert_eq!(Instruction::Inpp.to_string(), "INPP");
        assert_eq!(Instruction::Invr.to_string(), "INVR");
    }
}
