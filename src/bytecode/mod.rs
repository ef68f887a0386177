//! Translation from source text to a function graph, plus the graph's
//! on-disk form.

pub mod artifact;
pub mod builder;
pub mod compile;
pub mod compile_error;
pub mod disasm;
pub mod ir;
pub mod loops;
pub mod op;
pub mod verify;

pub use compile::{Compiler, CompilerConfig};
pub use compile_error::CompileError;
pub use ir::{BasicBlock, BlockId, ENTRY_FUNCTION, FunctionGraph};
pub use op::{Cond, Op, Terminator};
