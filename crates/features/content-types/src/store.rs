//! Backend contract for reading content type entries.

use crate::error::ContentTypesError;
use sift_domain::content_type::ContentTypeUid;

/// Window of entries requested from a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// Records to skip from the start of the collection.
    pub offset: usize,
    /// Maximum number of records to return; `None` reads to the end.
    pub limit: Option<usize>,
}

impl PageRequest {
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit: Some(limit) }
    }

    /// The whole collection in one read.
    pub const fn all() -> Self {
        Self { offset: 0, limit: None }
    }
}

/// Paged read access to the records of each content type.
///
/// Stores must order records stably so that consecutive windows neither skip nor repeat
/// entries while no writer is active. A uid the store has no records for counts as zero
/// and reads as an empty window. Errors are reserved for genuine backend failures.
///
/// [`read_page`](Self::read_page) must return exactly `min(limit, remaining)` records and
/// must not cap `limit` on its own. The batch engine asks for one record more than a page
/// to learn whether another page follows, so a silently truncated window ends iteration
/// early.
pub trait EntryStore: Send + Sync {
    /// Opaque record type handed to batch transforms.
    type Record: Send;

    /// Number of records stored for `uid`.
    fn count(
        &self,
        uid: &ContentTypeUid,
    ) -> impl Future<Output = Result<u64, ContentTypesError>> + Send;

    /// Reads the records of `uid` inside the requested window.
    fn read_page(
        &self,
        uid: &ContentTypeUid,
        page: PageRequest,
    ) -> impl Future<Output = Result<Vec<Self::Record>, ContentTypesError>> + Send;
}
