use thiserror::Error;

/// Error taxonomy of the migration core.
///
/// Every variant is fatal for the current input: the pipeline surfaces the
/// first error encountered and produces no output bytes.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// The byte stream is not a well-formed GLB container (bad magic,
    /// version or chunk framing), or its JSON chunk is not valid JSON.
    #[error("malformed GLB container: {0}")]
    MalformedContainer(String),

    /// A legacy index or name does not resolve in the scene tables.
    #[error("dangling reference: {0}")]
    DanglingReference(String),

    /// A recognized legacy field holds a value outside the migratable set.
    /// Silent defaulting would misclassify licensing/permission semantics,
    /// so this is always a hard failure.
    #[error("unsupported legacy value at {field}: {value:?}")]
    UnsupportedLegacyValue { field: String, value: String },

    /// A JSON node was accessed with the wrong expected kind, or a required
    /// member is missing.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: String,
    },

    /// Re-serialization of the migrated document failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MigrationError>;
