use thiserror::Error;

/// Input errors surfaced to the caller. A generation attempt that simply
/// fails to produce a puzzle is not an error; `generate` reports it as
/// `Ok(None)`.
#[derive(Error, Debug)]
pub enum CrosswordError {
    #[error("category '{0}' not found in dictionary")]
    UnknownCategory(String),

    #[error("not enough words in category '{category}': {available} < {required}")]
    InsufficientWords {
        category: String,
        available: usize,
        required: usize,
    },

    #[error("failed to read dictionary file: {0}")]
    DictionaryIo(#[from] std::io::Error),

    #[error("failed to parse dictionary: {0}")]
    DictionaryFormat(#[from] serde_json::Error),
}
