use thiserror::Error;

use crate::heap::CAPACITY;

/// The only two ways building a signature can fail.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error(
        "insufficient data for a similarity signature: only {considered} sample(s) considered, need at least {}",
        CAPACITY
    )]
    InsufficientData { considered: u64 },

    #[error("I/O error while reading signature input: {0}")]
    Io(#[from] std::io::Error),
}
