use crate::bytecode::{
    BasicBlock, BlockId, FunctionGraph, Op, Terminator, compile_error::CompileError,
};

/// Incremental construction of one `FunctionGraph`.
///
/// The builder owns every block created so far and tracks the insertion
/// block that receives appended ops. It is append-only: ops are never removed
/// and a block accepts exactly one terminator, after which it is closed.
pub struct GraphBuilder {
    name: String,

    /// Blocks indexed by `BlockId`.
    blocks: Vec<BasicBlock>,

    /// Layout order of block ids. Only affects readability of the output,
    /// every transfer names its target explicitly.
    layout: Vec<BlockId>,

    current: BlockId,
}

impl GraphBuilder {
    /// Start a function with an empty `entry` block as insertion point.
    pub fn new(name: impl Into<String>) -> Self {
        let entry = BlockId(0);
        Self {
            name: name.into(),
            blocks: vec![BasicBlock::new(entry, "entry")],
            layout: vec![entry],
            current: entry,
        }
    }

    pub fn current(&self) -> BlockId {
        self.current
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn block(&self, id: BlockId) -> Result<&BasicBlock, CompileError> {
        self.blocks
            .get(id.0 as usize)
            .ok_or_else(|| CompileError::internal(id.to_string(), "block does not exist"))
    }

    fn open_block_mut(&mut self) -> Result<&mut BasicBlock, CompileError> {
        let id = self.current;
        let block = self
            .blocks
            .get_mut(id.0 as usize)
            .ok_or_else(|| CompileError::internal(id.to_string(), "block does not exist"))?;

        if block.is_terminated() {
            return Err(CompileError::internal(
                block.name.clone(),
                "append to a block that is already terminated",
            ));
        }
        Ok(block)
    }

    fn append(&mut self, op: Op) -> Result<(), CompileError> {
        self.open_block_mut()?.ops.push(op);
        Ok(())
    }

    /// Tape prologue: allocate the zeroed tape and point the slot at it.
    pub fn alloc_tape(&mut self, cells: u32) -> Result<(), CompileError> {
        self.append(Op::AllocTape { cells })
    }

    /// `>` / `<`: step the pointer by `delta` cells.
    pub fn motion(&mut self, delta: i32) -> Result<(), CompileError> {
        self.append(Op::MovePtr(delta))
    }

    /// `+` / `-`: add `delta` to the current cell, wrapping.
    pub fn cell_update(&mut self, delta: i8) -> Result<(), CompileError> {
        self.append(Op::AddCell(delta))
    }

    pub fn output(&mut self) -> Result<(), CompileError> {
        self.append(Op::Output)
    }

    pub fn input(&mut self) -> Result<(), CompileError> {
        self.append(Op::Input)
    }

    /// Create a block placed right after the current insertion block.
    pub fn new_block(&mut self, name: impl Into<String>) -> BlockId {
        self.new_block_after(name, self.current)
    }

    /// Create a block placed right after `after` in layout order.
    pub fn new_block_after(&mut self, name: impl Into<String>, after: BlockId) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(BasicBlock::new(id, name));

        match self.layout.iter().position(|&b| b == after) {
            Some(pos) => self.layout.insert(pos + 1, id),
            None => self.layout.push(id),
        }
        id
    }

    pub fn set_insertion_point(&mut self, block: BlockId) -> Result<(), CompileError> {
        self.block(block)?;
        self.current = block;
        Ok(())
    }

    /// Close the current block. A block can only be terminated once.
    pub fn terminate(&mut self, terminator: Terminator) -> Result<(), CompileError> {
        for target in terminator.targets() {
            self.block(target)?;
        }

        let block = self.open_block_mut()?;
        block.terminator = Some(terminator);
        Ok(())
    }

    /// Hand over the finished graph, blocks in layout order.
    pub fn finish(self) -> FunctionGraph {
        let mut slots: Vec<Option<BasicBlock>> = self.blocks.into_iter().map(Some).collect();
        let blocks = self
            .layout
            .iter()
            .filter_map(|id| slots.get_mut(id.0 as usize).and_then(Option::take))
            .collect();

        FunctionGraph {
            name: self.name,
            blocks,
        }
    }
}
