use crate::error::ContentTypesError;
use crate::registry::ContentTypeRegistry;
use crate::store::{EntryStore, PageRequest};
use fxhash::FxHashMap;
use sift_database::{CollectionName, Database, Value};
use sift_domain::content_type::ContentTypeUid;
use tracing::debug;

/// [`EntryStore`] reading content type entries from `SurrealDB` tables.
///
/// Each registered uid maps to the table named by its descriptor's collection. Records
/// are ordered by their record id, which keeps consecutive windows stable.
#[derive(Debug, Clone)]
pub struct SurrealStore {
    db: Database,
    collections: FxHashMap<ContentTypeUid, CollectionName>,
}

impl SurrealStore {
    /// Maps every content type of `registry` to its table.
    ///
    /// # Errors
    /// Returns [`ContentTypesError::Validation`] when a collection name is not a valid
    /// table identifier.
    pub fn new(db: Database, registry: &impl ContentTypeRegistry) -> Result<Self, ContentTypesError> {
        let collections = registry
            .content_types()
            .into_iter()
            .map(|descriptor| {
                CollectionName::try_from(descriptor.collection_name())
                    .map(|collection| (descriptor.uid.clone(), collection))
                    .map_err(|e| ContentTypesError::Validation {
                        message: e.to_string().into(),
                        context: Some(descriptor.uid.to_string().into()),
                    })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { db, collections })
    }

    pub const fn database(&self) -> &Database {
        &self.db
    }

    fn collection(&self, uid: &ContentTypeUid) -> Option<&CollectionName> {
        let collection = self.collections.get(uid);
        if collection.is_none() {
            debug!(%uid, "No collection mapped for content type");
        }
        collection
    }
}

impl EntryStore for SurrealStore {
    type Record = Value;

    async fn count(&self, uid: &ContentTypeUid) -> Result<u64, ContentTypesError> {
        let Some(collection) = self.collection(uid) else {
            return Ok(0);
        };
        self.db.count_records(collection).await.map_err(ContentTypesError::store)
    }

    async fn read_page(
        &self,
        uid: &ContentTypeUid,
        page: PageRequest,
    ) -> Result<Vec<Value>, ContentTypesError> {
        let Some(collection) = self.collection(uid) else {
            return Ok(Vec::new());
        };
        self.db
            .select_records(collection, page.offset, page.limit)
            .await
            .map_err(ContentTypesError::store)
    }
}
