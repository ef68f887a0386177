use thiserror::Error;

use crate::frontend::Span;

/// Everything that can stop a translation.
///
/// The first three variants are source errors: malformed bracket structure,
/// always reported with the position of the offending bracket. The last is a
/// builder defect and should never surface from a correct compiler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("{span}: loops nested deeper than {max} levels")]
    LoopNestingExceeded { span: Span, max: usize },

    #[error("{span}: `]` without a matching `[`")]
    UnmatchedClose { span: Span },

    #[error("{span}: `[` without a matching `]`")]
    UnclosedLoop { span: Span },

    #[error("internal error in block '{block}'{}: {reason}", at(.span))]
    InternalInvariantViolation {
        block: String,
        reason: String,
        span: Option<Span>,
    },
}

fn at(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" at {}", span),
        None => String::new(),
    }
}

impl CompileError {
    /// Create an internal compiler error
    pub fn internal(block: impl Into<String>, reason: impl Into<String>) -> Self {
        CompileError::InternalInvariantViolation {
            block: block.into(),
            reason: reason.into(),
            span: None,
        }
    }

    /// Attach the source position being translated to an internal error that
    /// does not carry one yet. Source errors already know their position.
    pub fn at(self, span: Span) -> Self {
        match self {
            CompileError::InternalInvariantViolation {
                block,
                reason,
                span: None,
            } => CompileError::InternalInvariantViolation {
                block,
                reason,
                span: Some(span),
            },
            other => other,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::LoopNestingExceeded { span, .. }
            | CompileError::UnmatchedClose { span }
            | CompileError::UnclosedLoop { span } => Some(*span),
            CompileError::InternalInvariantViolation { span, .. } => *span,
        }
    }

    /// Character offset of the error in the source, when known.
    pub fn offset(&self) -> Option<usize> {
        self.span().map(|s| s.offset)
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, CompileError::InternalInvariantViolation { .. })
    }
}
