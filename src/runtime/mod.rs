//! Immediate execution of function graphs.

pub mod io;
pub mod lower;
pub mod runtime_error;
pub mod vm;

pub use io::{BufferIo, ByteIo, StdIo};
pub use runtime_error::RuntimeError;
pub use vm::{Vm, VmConfig};
