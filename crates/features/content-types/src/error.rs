use std::borrow::Cow;

/// Boxed failure raised by a store backend or a caller-supplied transform.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A specialized [`ContentTypesError`] enum of this crate.
///
/// Unknown content types are never reported through this type: counting, fetching and
/// batched iteration treat them as empty collections.
#[sift_derive::sift_error]
pub enum ContentTypesError {
    /// The entry store failed to count or read records.
    #[error("Entry store failed{}: {source}", format_context(.context))]
    Store { source: BoxError, context: Option<Cow<'static, str>> },

    /// A batch transform rejected a page; the run is aborted.
    #[error("Batch transform failed{}: {source}", format_context(.context))]
    Transform { source: BoxError, context: Option<Cow<'static, str>> },

    /// Invalid caller input, such as a zero page size.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal content types error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ContentTypesError {
    /// Wraps a backend failure as a [`ContentTypesError::Store`].
    pub fn store(source: impl Into<BoxError>) -> Self {
        Self::Store { source: source.into(), context: None }
    }
}
