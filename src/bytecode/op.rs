use serde::{Deserialize, Serialize};

use crate::bytecode::ir::BlockId;

// =============================================================================
// OP - straight-line operations inside a basic block
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Allocate a zero-filled tape of `cells` bytes and point the cell
    /// pointer slot at its base. Only ever the first op of the entry block.
    AllocTape { cells: u32 },

    /// Load the pointer slot, step it by `delta` cells, store it back.
    MovePtr(i32),

    /// Load the pointer, load the cell, add `delta` modulo 256, store.
    AddCell(i8),

    /// Load the current cell and hand it to the output-byte primitive.
    Output,

    /// Call the input-byte primitive and store the result in the current cell.
    Input,
}

/// Test applied to the current cell by a conditional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cond {
    Zero,
    NonZero,
}

impl Cond {
    pub fn holds(self, cell: u8) -> bool {
        match self {
            Cond::Zero => cell == 0,
            Cond::NonZero => cell != 0,
        }
    }
}

// =============================================================================
// TERMINATOR - the single control transfer closing a block
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminator {
    /// Unconditional transfer.
    Jump(BlockId),

    /// Load the current cell; go to `taken` when `cond` holds, otherwise to
    /// `fallthrough`.
    Branch {
        cond: Cond,
        taken: BlockId,
        fallthrough: BlockId,
    },

    /// Leave the program.
    Return,
}

impl Terminator {
    /// Blocks this terminator may transfer control to.
    pub fn targets(&self) -> Vec<BlockId> {
        match *self {
            Terminator::Jump(target) => vec![target],
            Terminator::Branch {
                taken, fallthrough, ..
            } => vec![taken, fallthrough],
            Terminator::Return => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cond_holds() {
        assert!(Cond::Zero.holds(0));
        assert!(!Cond::Zero.holds(1));
        assert!(Cond::NonZero.holds(255));
        assert!(!Cond::NonZero.holds(0));
    }

    #[test]
    fn test_terminator_targets() {
        let a = BlockId(1);
        let b = BlockId(2);
        assert_eq!(Terminator::Jump(a).targets(), vec![a]);
        assert_eq!(
            Terminator::Branch {
                cond: Cond::Zero,
                taken: a,
                fallthrough: b
            }
            .targets(),
            vec![a, b]
        );
        assert!(Terminator::Return.targets().is_empty());
    }
}
