use std::collections::HashMap;

use crate::bytecode::{BlockId, Cond, FunctionGraph, Op, Terminator};
use crate::runtime::runtime_error::RuntimeError;

// =============================================================================
// CODE - flat instruction stream executed by the VM
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    AllocTape(u32),
    MovePtr(i32),
    AddCell(i8),
    Output,
    Input,

    /// Unconditional relative jump. Offset is added to current ip.
    Jump(i32),

    /// Jump if the current cell is zero, otherwise continue.
    JumpIfZero(i32),

    /// Jump if the current cell is nonzero, otherwise continue.
    JumpIfNonZero(i32),

    Return,
}

/// A graph lowered to straight-line code with resolved jumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub code: Vec<Code>,
}

/// Flatten `graph` in layout order.
///
/// Each block becomes its ops followed by its terminator. A transfer to the
/// block laid out next becomes a plain fall-through; anything else becomes a
/// relative jump.
pub fn lower(graph: &FunctionGraph) -> Result<Program, RuntimeError> {
    let layout = graph.layout_index();
    let next_of = |pos: usize| graph.blocks.get(pos + 1).map(|b| b.id);

    // First pass: where each block starts.
    let mut starts: HashMap<BlockId, usize> = HashMap::with_capacity(graph.len());
    let mut ip = 0;
    for (pos, block) in graph.blocks.iter().enumerate() {
        starts.insert(block.id, ip);
        let terminator = block.terminator.ok_or_else(|| {
            RuntimeError::invalid(format!("block '{}' is not terminated", block.name))
        })?;
        ip += block.ops.len() + terminator_len(&terminator, next_of(pos));
    }

    // Second pass: emit.
    let mut code = Vec::with_capacity(ip);
    for (pos, block) in graph.blocks.iter().enumerate() {
        code.extend(block.ops.iter().map(lower_op));

        let next = next_of(pos);
        let offset_to = |from: usize, target: BlockId| -> Result<i32, RuntimeError> {
            if !layout.contains_key(&target) {
                return Err(RuntimeError::invalid(format!(
                    "block '{}' branches to unknown {}",
                    block.name, target
                )));
            }
            Ok(starts[&target] as i32 - from as i32)
        };

        // Termination was checked in the first pass.
        match block.terminator {
            Some(Terminator::Return) | None => code.push(Code::Return),
            Some(Terminator::Jump(target)) => {
                if Some(target) != next {
                    code.push(Code::Jump(offset_to(code.len(), target)?));
                }
            }
            Some(Terminator::Branch {
                cond,
                taken,
                fallthrough,
            }) => {
                let offset = offset_to(code.len(), taken)?;
                code.push(match cond {
                    Cond::Zero => Code::JumpIfZero(offset),
                    Cond::NonZero => Code::JumpIfNonZero(offset),
                });
                if Some(fallthrough) != next {
                    code.push(Code::Jump(offset_to(code.len(), fallthrough)?));
                }
            }
        }
    }

    Ok(Program { code })
}

fn terminator_len(terminator: &Terminator, next: Option<BlockId>) -> usize {
    match *terminator {
        Terminator::Return => 1,
        Terminator::Jump(target) => usize::from(Some(target) != next),
        Terminator::Branch { fallthrough, .. } => 1 + usize::from(Some(fallthrough) != next),
    }
}

fn lower_op(op: &Op) -> Code {
    match *op {
        Op::AllocTape { cells } => Code::AllocTape(cells),
        Op::MovePtr(delta) => Code::MovePtr(delta),
        Op::AddCell(delta) => Code::AddCell(delta),
        Op::Output => Code::Output,
        Op::Input => Code::Input,
    }
}
