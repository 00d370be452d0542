/* Types */
pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("{0}")]
    UserError(String),
    #[error("Unknown vendor: {0}")]
    UnknownVendor(String),
    #[error("Index {index} is out of range, only {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Deposit #{index} for {vendor} changed while it was being edited")]
    StaleEdit { vendor: String, index: usize },
    #[error("Record error: {0}")]
    Serde(serde_json::Error),
}

impl From<serde_json::Error> for LedgerError {
    fn from(serde_error: serde_json::Error) -> LedgerError {
        LedgerError::Serde(serde_error)
    }
}

// Checks an index against a collection length.
pub fn check_index(index: usize, len: usize) -> LedgerResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(LedgerError::IndexOutOfRange { index, len })
    }
}

pub mod breakdown;
pub mod format;
pub mod time;
