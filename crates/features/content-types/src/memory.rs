use crate::error::ContentTypesError;
use crate::store::{EntryStore, PageRequest};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use serde_json::Value;
use sift_domain::content_type::ContentTypeUid;

/// In-process [`EntryStore`] keeping records per uid in insertion order.
#[derive(Debug)]
pub struct MemoryStore<R = Value> {
    collections: RwLock<FxHashMap<ContentTypeUid, Vec<R>>>,
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self { collections: RwLock::new(FxHashMap::default()) }
    }
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Self::extend`].
    #[must_use]
    pub fn with_records(
        self,
        uid: impl Into<ContentTypeUid>,
        records: impl IntoIterator<Item = R>,
    ) -> Self {
        self.extend(uid, records);
        self
    }

    /// Appends one record to the collection of `uid`.
    pub fn insert(&self, uid: impl Into<ContentTypeUid>, record: R) {
        self.collections.write().entry(uid.into()).or_default().push(record);
    }

    /// Appends records to the collection of `uid`, keeping their order.
    pub fn extend(&self, uid: impl Into<ContentTypeUid>, records: impl IntoIterator<Item = R>) {
        self.collections.write().entry(uid.into()).or_default().extend(records);
    }

    /// Drops every record of `uid`, returning how many were removed.
    pub fn clear(&self, uid: &str) -> usize {
        self.collections.write().remove(uid).map_or(0, |records| records.len())
    }
}

impl<R: Clone + Send + Sync> EntryStore for MemoryStore<R> {
    type Record = R;

    async fn count(&self, uid: &ContentTypeUid) -> Result<u64, ContentTypesError> {
        let count = self.collections.read().get(uid).map_or(0, Vec::len);
        Ok(count as u64)
    }

    async fn read_page(
        &self,
        uid: &ContentTypeUid,
        page: PageRequest,
    ) -> Result<Vec<R>, ContentTypesError> {
        let collections = self.collections.read();
        let Some(records) = collections.get(uid) else {
            return Ok(Vec::new());
        };

        let window = records.iter().skip(page.offset);
        Ok(match page.limit {
            Some(limit) => window.take(limit).cloned().collect(),
            None => window.cloned().collect(),
        })
    }
}
