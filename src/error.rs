//! Defines the crate level error type and its conversions.

/// The errors that may occur while working with a ledger.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One of the record streams could not be fetched from the store.
    ///
    /// Callers should pass in a message naming the stream that failed and
    /// the underlying error as a string.
    #[error("could not load the ledger: {0}")]
    DataUnavailable(String),

    /// A spreadsheet row did not have the expected shape.
    ///
    /// `row_index` counts sheet rows from the top with the header as row 0,
    /// so the first data row is row 1.
    #[error("row {row_index} is malformed: {reason}")]
    MalformedRow {
        /// The index of the offending row, header row included.
        row_index: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// A spreadsheet row carried an amount that is not a usable number.
    #[error("row {row_index} has an invalid amount: \"{value}\"")]
    InvalidAmount {
        /// The index of the offending row, header row included.
        row_index: usize,
        /// The raw cell text that failed to parse or validate.
        value: String,
    },

    /// Validated import batches could not be written to the store.
    ///
    /// The batch that failed is rolled back, so the ledger is left exactly
    /// as it was before the failing insert started.
    #[error("could not save the imported records: {0}")]
    ImportPersistFailure(String),

    /// A record failed validation before it reached the store.
    #[error("invalid record: {0}")]
    ValidationFailure(String),

    /// An operation that needs an owner was called with nobody signed in.
    #[error("no session is active")]
    NoSession,

    /// The spreadsheet could not be decoded, or has no data rows.
    #[error("could not read the sheet: {0}")]
    InvalidSheet(String),

    /// A spreadsheet file could not be read from or written to disk.
    #[error("could not access the sheet file: {0}")]
    FileError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}
