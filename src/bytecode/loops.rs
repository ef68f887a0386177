use tracing::trace;

use crate::bytecode::{
    BlockId, Cond, Terminator, builder::GraphBuilder, compile_error::CompileError,
};
use crate::frontend::Span;

/// Nesting limit used when nothing else is configured.
pub const DEFAULT_MAX_LOOP_DEPTH: usize = 100;

/// Bookkeeping for one open `[`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopFrame {
    /// First block of the loop body.
    pub enter: BlockId,
    /// Block holding the code after the matching `]`.
    pub exit: BlockId,
    /// Where the `[` was found.
    pub open: Span,
}

/// Matches brackets and wires the conditional branches around loop bodies.
///
/// `[` tests the cell once before the first iteration and `]` tests it after
/// every iteration, branching back to the top of the body while it is
/// nonzero. No other zero tests are generated.
pub struct LoopResolver {
    frames: Vec<LoopFrame>,
    max_depth: usize,
    /// Per-translation counter used to name loop blocks.
    counter: usize,
}

impl LoopResolver {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
            counter: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Number of loops opened so far.
    pub fn loops_seen(&self) -> usize {
        self.counter
    }

    pub fn innermost(&self) -> Option<&LoopFrame> {
        self.frames.last()
    }

    /// Handle `[` found at `span`.
    pub fn open(&mut self, builder: &mut GraphBuilder, span: Span) -> Result<(), CompileError> {
        if self.frames.len() >= self.max_depth {
            return Err(CompileError::LoopNestingExceeded {
                span,
                max: self.max_depth,
            });
        }

        let n = self.counter;
        self.counter += 1;

        let enter = builder.new_block(format!("loop_{}_enter", n));
        let exit = builder.new_block_after(format!("loop_{}_exit", n), enter);

        builder.terminate(Terminator::Branch {
            cond: Cond::Zero,
            taken: exit,
            fallthrough: enter,
        })?;

        self.frames.push(LoopFrame {
            enter,
            exit,
            open: span,
        });
        trace!(loop_id = n, depth = self.frames.len(), offset = span.offset, "loop opened");

        builder.set_insertion_point(enter)
    }

    /// Handle `]` found at `span`.
    pub fn close(&mut self, builder: &mut GraphBuilder, span: Span) -> Result<(), CompileError> {
        let frame = self
            .frames
            .pop()
            .ok_or(CompileError::UnmatchedClose { span })?;

        builder.terminate(Terminator::Branch {
            cond: Cond::NonZero,
            taken: frame.enter,
            fallthrough: frame.exit,
        })?;
        trace!(depth = self.frames.len(), offset = span.offset, "loop closed");

        builder.set_insertion_point(frame.exit)
    }

    /// End of input: every `[` must have been closed.
    pub fn finish(&self) -> Result<(), CompileError> {
        match self.frames.last() {
            Some(frame) => Err(CompileError::UnclosedLoop { span: frame.open }),
            None => Ok(()),
        }
    }
}
