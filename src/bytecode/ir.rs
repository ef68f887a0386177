use crate::bytecode::{Op, Terminator};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name given to the single function every translation produces.
pub const ENTRY_FUNCTION: &str = "main";

/// Identity of a basic block within its function.
///
/// Ids are handed out in creation order and never reused, so they are stable
/// while blocks are rearranged in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u32);

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bb{}", self.0)
    }
}

/// A straight-line run of ops closed by one control transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: BlockId,
    pub name: String,
    pub ops: Vec<Op>,
    /// `None` only while the block is still open in the builder.
    pub terminator: Option<Terminator>,
}

impl BasicBlock {
    pub fn new(id: BlockId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ops: Vec::new(),
            terminator: None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminator.is_some()
    }
}

/// A translated program: one function made of basic blocks.
///
/// Convention: `blocks` is in layout order and `blocks[0]` is the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionGraph {
    pub name: String,
    pub blocks: Vec<BasicBlock>,
}

impl FunctionGraph {
    pub fn entry(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Layout position of every block, keyed by id.
    pub fn layout_index(&self) -> HashMap<BlockId, usize> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(pos, block)| (block.id, pos))
            .collect()
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// All control-flow edges as `(from, to)` pairs in layout order.
    pub fn edges(&self) -> Vec<(BlockId, BlockId)> {
        self.blocks
            .iter()
            .flat_map(|block| {
                block
                    .terminator
                    .iter()
                    .flat_map(|t| t.targets())
                    .map(move |to| (block.id, to))
            })
            .collect()
    }

    pub fn op_count(&self) -> usize {
        self.blocks.iter().map(|b| b.ops.len()).sum()
    }
}
