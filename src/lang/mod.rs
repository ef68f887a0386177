//! # Tape language core definitions
//!
//! The source language has eight symbols operating on a linear byte tape:
//!
//! | symbol | meaning                                  |
//! |--------|------------------------------------------|
//! | `>`    | move the cell pointer one cell right     |
//! | `<`    | move the cell pointer one cell left      |
//! | `+`    | increment the current cell (wrapping)    |
//! | `-`    | decrement the current cell (wrapping)    |
//! | `.`    | write the current cell to output         |
//! | `,`    | read one byte of input into the cell     |
//! | `[`    | skip past the matching `]` if cell is 0  |
//! | `]`    | jump back after the matching `[` if ≠ 0  |
//!
//! Every other character is a comment.

pub mod instruction;
pub mod tape;

pub use instruction::Instruction;
pub use tape::{DEFAULT_TAPE_CELLS, Tape};
