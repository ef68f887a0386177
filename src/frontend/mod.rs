pub mod scanner;

pub use scanner::{Scanner, Span, Spanned};
