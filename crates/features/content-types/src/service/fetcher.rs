use super::ContentTypes;
use crate::error::ContentTypesError;
use crate::registry::ContentTypeRegistry;
use crate::store::{EntryStore, PageRequest};
use tracing::instrument;

impl<G: ContentTypeRegistry, S: EntryStore> ContentTypes<G, S> {
    /// Every entry of `uid` in one unpaged read. Meant for small collections; large
    /// ones go through [`Self::action_in_batches`].
    ///
    /// Unknown content types yield an empty vector.
    ///
    /// # Errors
    /// Returns [`ContentTypesError::Store`] when the read fails.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self, uid: &str) -> Result<Vec<S::Record>, ContentTypesError> {
        self.fetch(uid, PageRequest::all()).await
    }

    /// Entries of `uid` in the window `[offset, offset + limit)`.
    ///
    /// # Errors
    /// Returns [`ContentTypesError::Store`] when the read fails.
    #[instrument(skip(self))]
    pub async fn fetch_page(
        &self,
        uid: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<S::Record>, ContentTypesError> {
        self.fetch(uid, PageRequest::new(offset, limit)).await
    }

    async fn fetch(&self, uid: &str, page: PageRequest) -> Result<Vec<S::Record>, ContentTypesError> {
        let Some(uid) = self.known(uid, "fetch") else {
            return Ok(Vec::new());
        };
        self.store().read_page(&uid, page).await
    }
}
