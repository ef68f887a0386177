//! # bfc
//!
//! Compiler for the eight-symbol byte-tape language.
//!
//! Source text is translated in one pass into a [`FunctionGraph`] of basic
//! blocks. The graph is then either written to disk as an
//! [`Artifact`](bytecode::artifact::Artifact) or executed straight away by
//! the [`Vm`](runtime::Vm).
//!
//! ```no_run
//! use bfc::runtime::{StdIo, Vm};
//!
//! let graph = bfc::compile("++++++++[>++++++++<-]>+.").unwrap();
//! Vm::new(StdIo::new()).run(&graph).unwrap();
//! ```

pub mod bytecode;
pub mod frontend;
pub mod lang;
pub mod runtime;

pub use bytecode::{CompileError, Compiler, CompilerConfig, FunctionGraph};

/// Translate `source` with the default configuration.
pub fn compile(source: &str) -> Result<FunctionGraph, CompileError> {
    Compiler::new().compile(source)
}
