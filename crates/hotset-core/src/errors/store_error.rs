/// Persistent key-value store errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("read of '{key}' failed: {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("write of '{key}' failed: {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("stored value for '{key}' is corrupt: {details}")]
    CorruptValue { key: String, details: String },
}
