use thiserror::Error;

/// Errors from structure parsing and layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid structure character {0:?}")]
    InvalidCharacter(char),
    #[error("unmatched ( parenthesis")]
    UnmatchedOpen,
    #[error("unmatched ) parenthesis")]
    UnmatchedClose,
    #[error("empty structure")]
    EmptyStructure,
}
