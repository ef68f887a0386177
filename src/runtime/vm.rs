use tracing::debug;

use crate::bytecode::FunctionGraph;
use crate::lang::Tape;
use crate::runtime::io::ByteIo;
use crate::runtime::lower::{Code, Program, lower};
use crate::runtime::runtime_error::RuntimeError;

#[derive(Debug, Clone, Default)]
pub struct VmConfig {
    /// Abort after this many executed instructions. `None` runs to completion.
    pub max_steps: Option<u64>,
}

/// Immediate-execution backend: lowers a graph in-process and runs it against
/// a pair of byte I/O primitives.
pub struct Vm<I: ByteIo> {
    io: I,
    config: VmConfig,
    steps: u64,
}

impl<I: ByteIo> Vm<I> {
    pub fn new(io: I) -> Self {
        Self::with_config(io, VmConfig::default())
    }

    pub fn with_config(io: I, config: VmConfig) -> Self {
        Self {
            io,
            config,
            steps: 0,
        }
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    pub fn into_io(self) -> I {
        self.io
    }

    /// Instructions executed by the last run.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Lower and execute `graph`; returns the tape as the program left it.
    pub fn run(&mut self, graph: &FunctionGraph) -> Result<Tape, RuntimeError> {
        let program = lower(graph)?;
        debug!(
            function = %graph.name,
            instructions = program.code.len(),
            "lowered graph"
        );
        self.execute(&program)
    }

    pub fn execute(&mut self, program: &Program) -> Result<Tape, RuntimeError> {
        self.steps = 0;
        let mut tape = Tape::new(0);
        let code = &program.code;
        let mut ip: usize = 0;

        while ip < code.len() {
            self.check_limits()?;

            let mut next = ip + 1;
            match code[ip] {
                Code::AllocTape(cells) => tape = Tape::new(cells),
                Code::MovePtr(delta) => tape.move_ptr(delta),
                Code::AddCell(delta) => {
                    tape.add(delta).ok_or_else(|| out_of_bounds(&tape))?;
                }
                Code::Output => {
                    let value = tape.get().ok_or_else(|| out_of_bounds(&tape))?;
                    self.io.output_byte(value)?;
                }
                Code::Input => {
                    // End of input reads as 0.
                    let value = self.io.input_byte()?.unwrap_or(0);
                    tape.set(value).ok_or_else(|| out_of_bounds(&tape))?;
                }
                Code::Jump(offset) => next = jump(ip, offset, code.len())?,
                Code::JumpIfZero(offset) => {
                    if tape.get().ok_or_else(|| out_of_bounds(&tape))? == 0 {
                        next = jump(ip, offset, code.len())?;
                    }
                }
                Code::JumpIfNonZero(offset) => {
                    if tape.get().ok_or_else(|| out_of_bounds(&tape))? != 0 {
                        next = jump(ip, offset, code.len())?;
                    }
                }
                Code::Return => break,
            }
            ip = next;
        }

        debug!(steps = self.steps, "program finished");
        Ok(tape)
    }

    fn check_limits(&mut self) -> Result<(), RuntimeError> {
        self.steps += 1;

        if let Some(max) = self.config.max_steps {
            if self.steps > max {
                return Err(RuntimeError::StepLimit(max));
            }
        }
        Ok(())
    }
}

fn out_of_bounds(tape: &Tape) -> RuntimeError {
    RuntimeError::TapeOutOfBounds {
        position: tape.position(),
        cells: tape.len(),
    }
}

fn jump(ip: usize, offset: i32, len: usize) -> Result<usize, RuntimeError> {
    let target = ip as i64 + offset as i64;
    if target < 0 || target as usize >= len {
        return Err(RuntimeError::invalid(format!(
            "jump from {:04} by {:+} leaves the program",
            ip, offset
        )));
    }
    Ok(target as usize)
}
