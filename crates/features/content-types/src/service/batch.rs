use super::ContentTypes;
use crate::error::{BoxError, ContentTypesError};
use crate::registry::ContentTypeRegistry;
use crate::store::{EntryStore, PageRequest};
use sift_domain::constants::DEFAULT_PAGE_SIZE;
use sift_domain::content_type::ContentTypeUid;
use std::convert::Infallible;
use std::future::ready;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

/// Knobs of one batched iteration run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    page_size: usize,
    cancel: Option<watch::Receiver<bool>>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self { page_size: DEFAULT_PAGE_SIZE, cancel: None }
    }
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of entries handed to one transform call. Must be positive.
    #[must_use]
    pub const fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Stops the run once `cancel` reads `true`. The flag is checked before every store
    /// read; a cancelled run returns what it collected so far.
    #[must_use]
    pub fn cancel_on(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub const fn get_page_size(&self) -> usize {
        self.page_size
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|cancel| *cancel.borrow())
    }
}

/// One page of entries handed to a batch transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<R> {
    pub uid: ContentTypeUid,
    /// Position of the first entry within the collection.
    pub offset: usize,
    pub entries: Vec<R>,
}

/// Outcome of a batched run, telling a completed run apart from a cancelled one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batched<T> {
    pub output: Vec<T>,
    /// `true` when the cancel flag stopped the run before the last page was read.
    pub cancelled: bool,
}

impl<G: ContentTypeRegistry, S: EntryStore> ContentTypes<G, S> {
    /// Runs `transform` over every entry of `uid`, one page at a time, and flattens the
    /// derived values into a single vector.
    ///
    /// Each transform call may yield any number of values: a `Vec` per entry, an
    /// `Option` for a single value or nothing, `[]` to drop a page. Pages are processed
    /// strictly in order and the next page is read only after the previous transform
    /// completed. A collection of `N` entries costs `ceil(N / page_size)` store reads,
    /// and one read when it is empty. Unknown content types yield an empty vector
    /// without touching the store.
    ///
    /// # Errors
    /// * [`ContentTypesError::Validation`] for a zero page size.
    /// * [`ContentTypesError::Store`] when a read fails.
    /// * [`ContentTypesError::Transform`] when `transform` fails; the run stops there.
    pub async fn action_in_batches<F, Fut, I, E>(
        &self,
        uid: &str,
        options: BatchOptions,
        transform: F,
    ) -> Result<Vec<I::Item>, ContentTypesError>
    where
        F: FnMut(Batch<S::Record>) -> Fut,
        Fut: Future<Output = Result<I, E>>,
        I: IntoIterator,
        E: Into<BoxError>,
    {
        Ok(self.run_batches(uid, options, transform).await?.output)
    }

    /// [`Self::action_in_batches`], also reporting whether cancellation cut the run short.
    /// A flag raised after the last page was read does not count as a cancellation.
    ///
    /// # Errors
    /// Same as [`Self::action_in_batches`].
    #[instrument(skip(self, options, transform), fields(page_size = options.page_size))]
    pub async fn run_batches<F, Fut, I, E>(
        &self,
        uid: &str,
        options: BatchOptions,
        mut transform: F,
    ) -> Result<Batched<I::Item>, ContentTypesError>
    where
        F: FnMut(Batch<S::Record>) -> Fut,
        Fut: Future<Output = Result<I, E>>,
        I: IntoIterator,
        E: Into<BoxError>,
    {
        let page_size = options.page_size;
        if page_size == 0 {
            return Err(ContentTypesError::Validation {
                message: "Page size must be positive".into(),
                context: Some(uid.to_owned().into()),
            });
        }
        let Some(uid) = self.known(uid, "batch") else {
            return Ok(Batched { output: Vec::new(), cancelled: false });
        };

        let mut output = Vec::new();
        let mut offset = 0;
        let mut reads = 0_usize;

        loop {
            if options.is_cancelled() {
                info!(offset, collected = output.len(), "Batch run cancelled");
                return Ok(Batched { output, cancelled: true });
            }

            // One extra record tells whether another page follows.
            let request = PageRequest::new(offset, page_size.saturating_add(1));
            let mut entries = self.store().read_page(&uid, request).await?;
            reads += 1;

            let has_more = entries.len() > page_size;
            entries.truncate(page_size);
            debug!(offset, entries = entries.len(), has_more, "Read batch");

            if !entries.is_empty() {
                let batch = Batch { uid: uid.clone(), offset, entries };
                let derived = transform(batch).await.map_err(|source| {
                    ContentTypesError::Transform {
                        source: source.into(),
                        context: Some(format!("{uid} at offset {offset}").into()),
                    }
                })?;
                output.extend(derived);
            }

            if !has_more {
                break;
            }
            offset += page_size;
        }

        info!(reads, collected = output.len(), "Batch run finished");
        Ok(Batched { output, cancelled: false })
    }

    /// Synchronous, infallible flavour of [`Self::action_in_batches`].
    ///
    /// # Errors
    /// * [`ContentTypesError::Validation`] for a zero page size.
    /// * [`ContentTypesError::Store`] when a read fails.
    pub async fn map_in_batches<F, I>(
        &self,
        uid: &str,
        options: BatchOptions,
        mut transform: F,
    ) -> Result<Vec<I::Item>, ContentTypesError>
    where
        F: FnMut(Batch<S::Record>) -> I,
        I: IntoIterator,
    {
        self.action_in_batches(uid, options, |batch| ready(Ok::<_, Infallible>(transform(batch))))
            .await
    }
}
