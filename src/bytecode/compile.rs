use tracing::debug;

use crate::bytecode::{
    ENTRY_FUNCTION, FunctionGraph, Terminator,
    builder::GraphBuilder,
    compile_error::CompileError,
    loops::{DEFAULT_MAX_LOOP_DEPTH, LoopResolver},
    verify::verify,
};
use crate::frontend::{Scanner, Spanned};
use crate::lang::{DEFAULT_TAPE_CELLS, Instruction};

#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Deepest allowed `[` nesting.
    pub max_loop_depth: usize,
    /// Size of the tape the generated program allocates.
    pub tape_cells: u32,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            max_loop_depth: DEFAULT_MAX_LOOP_DEPTH,
            tape_cells: DEFAULT_TAPE_CELLS,
        }
    }
}

/// Single-pass translator from source text to a `FunctionGraph`.
///
/// Holds configuration only. All translation state lives in locals of
/// `compile`, so one compiler can be shared between threads and every call is
/// independent of the others.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_config(CompilerConfig::default())
    }

    pub fn with_config(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn compile(&self, source: &str) -> Result<FunctionGraph, CompileError> {
        let mut builder = GraphBuilder::new(ENTRY_FUNCTION);
        let mut loops = LoopResolver::new(self.config.max_loop_depth);

        builder.alloc_tape(self.config.tape_cells)?;

        for Spanned { instr, span } in Scanner::new(source) {
            let step = match instr {
                Instruction::PointerIncrement => builder.motion(1),
                Instruction::PointerDecrement => builder.motion(-1),
                Instruction::CellIncrement => builder.cell_update(1),
                Instruction::CellDecrement => builder.cell_update(-1),
                Instruction::Output => builder.output(),
                Instruction::Input => builder.input(),
                Instruction::LoopOpen => loops.open(&mut builder, span),
                Instruction::LoopClose => loops.close(&mut builder, span),
            };
            step.map_err(|e| e.at(span))?;
        }

        loops.finish()?;
        builder.terminate(Terminator::Return)?;

        let graph = builder.finish();
        verify(&graph)?;

        debug!(
            blocks = graph.len(),
            ops = graph.op_count(),
            loops = loops.loops_seen(),
            "translated program"
        );

        Ok(graph)
    }
}
