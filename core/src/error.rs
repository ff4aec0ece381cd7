//! Error types surfaced by the graph builders.
//!
//! `OutOfVocabulary` and `MissingParent` are deliberately absent here: both
//! are recovered locally (the offending n-gram line is dropped and logged),
//! never propagated as an `Err`. See the ARPA ingestion call sites.

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("line {line}: malformed {section}-gram entry: {text:?}")]
    InvalidFormat {
        line: usize,
        section: u8,
        text: String,
    },

    #[error("arpa n-gram order {0} is not supported (only unigram..trigram)")]
    UnsupportedOrder(u8),

    #[error("required symbol {0:?} is missing from its table")]
    UnknownSymbol(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("fst construction failed: {0}")]
    Fst(String),
}
