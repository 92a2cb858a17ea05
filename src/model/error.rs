//! Errors raised while building cube model values.

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Error type for the cube model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A resolved table has no column with the requested name.
    #[error("Field '{field}' not found on table '{table}'")]
    FieldNotFound { table: String, field: String },
}
