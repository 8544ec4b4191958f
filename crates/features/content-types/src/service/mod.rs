//! Caller-facing operations over a registry and an entry store.

mod batch;
mod counter;
mod fetcher;

pub use batch::{Batch, BatchOptions, Batched};

use crate::registry::{ContentTypeRegistry, RegistryResolver};
use crate::store::EntryStore;
use sift_domain::content_type::ContentTypeUid;
use std::sync::Arc;
use tracing::debug;

/// Content type service: resolution, counting, fetching and batched iteration.
///
/// Cloning is cheap and clones share the same registry and store.
#[derive(Debug)]
pub struct ContentTypes<G, S> {
    inner: Arc<ContentTypesInner<G, S>>,
}

#[derive(Debug)]
struct ContentTypesInner<G, S> {
    resolver: RegistryResolver<G>,
    store: S,
}

impl<G, S> Clone for ContentTypes<G, S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<G: ContentTypeRegistry, S: EntryStore> ContentTypes<G, S> {
    pub fn new(registry: G, store: S) -> Self {
        Self { inner: Arc::new(ContentTypesInner { resolver: RegistryResolver::new(registry), store }) }
    }

    pub fn resolver(&self) -> &RegistryResolver<G> {
        &self.inner.resolver
    }

    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// Resolves `uid` against the registry, logging the fail-soft miss.
    fn known(&self, uid: &str, operation: &'static str) -> Option<ContentTypeUid> {
        let resolved = self.inner.resolver.resolve(uid);
        if resolved.is_none() {
            debug!(uid, operation, "Unknown content type treated as empty");
        }
        resolved
    }
}
