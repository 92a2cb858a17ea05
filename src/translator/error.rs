//! Translation errors.

/// Result type for translation.
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Error type for cube translation.
///
/// Translation is a pure function of the cube, so none of these are worth
/// retrying without changing the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// A condition uses a comparator with no SQL operator.
    #[error("Unsupported comparator '{comparator}' in dimension {position}")]
    UnsupportedComparator { comparator: String, position: usize },
}
