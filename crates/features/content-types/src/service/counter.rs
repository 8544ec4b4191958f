use super::ContentTypes;
use crate::error::ContentTypesError;
use crate::registry::ContentTypeRegistry;
use crate::store::EntryStore;
use tracing::{debug, instrument};

impl<G: ContentTypeRegistry, S: EntryStore> ContentTypes<G, S> {
    /// Number of stored entries of `uid`; zero for an unknown content type.
    ///
    /// # Errors
    /// Returns [`ContentTypesError::Store`] when the store fails to count.
    #[instrument(skip(self))]
    pub async fn count(&self, uid: &str) -> Result<u64, ContentTypesError> {
        let Some(uid) = self.known(uid, "count") else {
            return Ok(0);
        };
        self.store().count(&uid).await
    }

    /// Sum of [`Self::count`] over `uids`. Unknown uids add nothing; a store failure
    /// aborts the sum.
    ///
    /// # Errors
    /// Returns [`ContentTypesError::Store`] when the store fails to count.
    pub async fn total_count<I>(&self, uids: I) -> Result<u64, ContentTypesError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut total = 0_u64;
        for uid in uids {
            total = total.saturating_add(self.count(uid.as_ref()).await?);
        }
        debug!(total, "Counted entries");
        Ok(total)
    }
}
