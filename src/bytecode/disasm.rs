use crate::bytecode::{BasicBlock, BlockId, Cond, FunctionGraph, Op, Terminator};
use std::collections::HashMap;
use std::fmt::Write;

/// Print disassembly of a function graph
pub fn print_graph(graph: &FunctionGraph) {
    print!("{}", format_graph(graph));
}

/// Render a function graph as a labelled listing, blocks in layout order.
pub fn format_graph(graph: &FunctionGraph) -> String {
    let labels: HashMap<_, _> = graph
        .blocks
        .iter()
        .map(|b| (b.id, b.name.as_str()))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "════════════════════════════════════════");
    let _ = writeln!(out, " fn {}", graph.name);
    let _ = writeln!(out, " {} blocks, {} ops", graph.len(), graph.op_count());
    let _ = writeln!(out, "════════════════════════════════════════");

    for block in &graph.blocks {
        format_block(&mut out, block, &labels);
    }
    out
}

fn format_block(out: &mut String, block: &BasicBlock, labels: &HashMap<BlockId, &str>) {
    let _ = writeln!(out, "{}:                ; {}", block.name, block.id);

    for (i, op) in block.ops.iter().enumerate() {
        let _ = writeln!(out, "  {:04}  {}", i, format_op(op));
    }

    let label = |id: BlockId| labels.get(&id).copied().unwrap_or("<unknown>");
    let line = match block.terminator {
        Some(Terminator::Jump(target)) => format!("JUMP        → {}", label(target)),
        Some(Terminator::Branch {
            cond,
            taken,
            fallthrough,
        }) => format!(
            "{}  → {}, else → {}",
            match cond {
                Cond::Zero => "BR_ZERO   ",
                Cond::NonZero => "BR_NONZERO",
            },
            label(taken),
            label(fallthrough)
        ),
        Some(Terminator::Return) => "RETURN".to_string(),
        None => "<unterminated>".to_string(),
    };
    let _ = writeln!(out, "  ----  {}", line);
}

fn format_op(op: &Op) -> String {
    match op {
        Op::AllocTape { cells } => format!("ALLOC_TAPE  {}       ; ptr = &tape[0]", cells),
        Op::MovePtr(delta) => format!("MOVE_PTR    {:+}", delta),
        Op::AddCell(delta) => format!("ADD_CELL    {:+}", delta),
        Op::Output => "OUTPUT      ; ( cell -- )".to_string(),
        Op::Input => "INPUT       ; ( -- cell )".to_string(),
    }
}
