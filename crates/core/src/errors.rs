use thiserror::Error;

/// Unified error type for the entire household-planner-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Values that merely cannot be determined yet (unknown income, pending
/// filing status, missing cost basis) are `Option::None`, not errors.
/// Variants here mean the caller asked for something impossible or the
/// household graph itself is corrupt.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Household graph invariants ──────────────────────────────────
    #[error("Person index {0} is not valid (expected 0 or 1)")]
    InvalidPersonIndex(usize),

    #[error("Inconsistent household: {0}")]
    InconsistentHousehold(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("IRS tables not available for tax year {0}")]
    TaxTableUnavailable(i32),

    // ── Storage / Profiles ──────────────────────────────────────────
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),
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
