use thiserror::Error;

/// Unified error type for the entire budget-tracker-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input / Business Logic ──────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Import failed: {0}")]
    Import(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Storage error ({key}): {message}")]
    Storage { key: String, message: String },

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Encrypted backups ───────────────────────────────────────────
    #[error("Invalid backup format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported backup version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — wrong password or corrupted backup")]
    Decryption,
}

impl CoreError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}
