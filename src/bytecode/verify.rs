use std::collections::HashSet;

use crate::bytecode::{FunctionGraph, Op, Terminator, compile_error::CompileError};

/// Structural self-check of a finished graph.
///
/// Checks the invariants the builder is supposed to guarantee:
///
/// - the function has an entry block that starts with the tape prologue
///   and no other block allocates a tape
/// - block ids are unique
/// - every block carries exactly one terminator
/// - every transfer targets a block of this function
/// - the program can return
///
/// A failure means the producer is broken (or a loaded artifact is corrupt),
/// not that the source program is wrong.
pub fn verify(graph: &FunctionGraph) -> Result<(), CompileError> {
    let entry = graph
        .entry()
        .ok_or_else(|| CompileError::internal(&graph.name, "function has no blocks"))?;

    if !matches!(entry.ops.first(), Some(Op::AllocTape { .. })) {
        return Err(CompileError::internal(
            &entry.name,
            "entry block does not start by allocating the tape",
        ));
    }

    let mut ids = HashSet::with_capacity(graph.len());
    for block in &graph.blocks {
        if !ids.insert(block.id) {
            return Err(CompileError::internal(
                &block.name,
                format!("duplicate block id {}", block.id),
            ));
        }
    }

    let mut returns = 0;
    for (pos, block) in graph.blocks.iter().enumerate() {
        let allocs = block
            .ops
            .iter()
            .filter(|op| matches!(op, Op::AllocTape { .. }))
            .count();
        let expected = if pos == 0 { 1 } else { 0 };
        if allocs != expected {
            return Err(CompileError::internal(
                &block.name,
                format!("{} tape allocations, expected {}", allocs, expected),
            ));
        }

        let terminator = block
            .terminator
            .ok_or_else(|| CompileError::internal(&block.name, "block is not terminated"))?;

        if terminator == Terminator::Return {
            returns += 1;
        }

        for target in terminator.targets() {
            if !ids.contains(&target) {
                return Err(CompileError::internal(
                    &block.name,
                    format!("branch to {} outside function '{}'", target, graph.name),
                ));
            }
        }
    }

    if returns == 0 {
        return Err(CompileError::internal(&graph.name, "no block returns"));
    }

    Ok(())
}
