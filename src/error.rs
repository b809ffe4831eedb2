/// Errors raised by catalog and library mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LibraryError {
    /// A mutation would break an invariant of the catalog entry
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was rejected
        reason: String,
    },

    /// Indexed access past the end of the catalog
    #[error("Index {index} out of range for library with {len} titles")]
    IndexOutOfRange {
        /// The requested position
        index: usize,
        /// Number of titles at the time of the access
        len: usize,
    },
}

impl LibraryError {
    /// Shorthand for a [`LibraryError::InvalidArgument`]
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument { reason: reason.into() }
    }
}
