/// One recognized source symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    PointerIncrement,
    PointerDecrement,
    CellIncrement,
    CellDecrement,
    Output,
    Input,
    LoopOpen,
    LoopClose,
}

impl Instruction {
    /// Decode a character, returning `None` for anything that is not one of
    /// the eight symbols.
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '>' => Instruction::PointerIncrement,
            '<' => Instruction::PointerDecrement,
            '+' => Instruction::CellIncrement,
            '-' => Instruction::CellDecrement,
            '.' => Instruction::Output,
            ',' => Instruction::Input,
            '[' => Instruction::LoopOpen,
            ']' => Instruction::LoopClose,
            _ => return None,
        })
    }

    pub fn symbol(self) -> char {
        match self {
            Instruction::PointerIncrement => '>',
            Instruction::PointerDecrement => '<',
            Instruction::CellIncrement => '+',
            Instruction::CellDecrement => '-',
            Instruction::Output => '.',
            Instruction::Input => ',',
            Instruction::LoopOpen => '[',
            Instruction::LoopClose => ']',
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
