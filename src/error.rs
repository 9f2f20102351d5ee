use thiserror::Error;

/// Failures raised while converting a single document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid markdown syntax, unmatched '{delimiter}'")]
    UnmatchedDelimiter { delimiter: String },

    #[error("document contains no blocks")]
    EmptyDocument,

    #[error("no top-level '# ' heading found for the page title")]
    MissingTitle,

    #[error("malformed node: {reason}")]
    MalformedNode { reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
