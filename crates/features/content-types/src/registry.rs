//! Content type registry and the resolver built on top of it.

use fxhash::FxHashMap;
use sift_domain::content_type::{ContentTypeDescriptor, ContentTypeUid};
use std::sync::Arc;
use tracing::warn;

/// Source of the content types a host exposes.
///
/// Implementations return a stable snapshot: the same descriptors in the same order for
/// as long as an operation runs.
pub trait ContentTypeRegistry: Send + Sync {
    /// Every known descriptor, across all namespaces, in enumeration order.
    fn content_types(&self) -> Vec<ContentTypeDescriptor>;

    /// Finds the descriptor registered under `uid`.
    fn find(&self, uid: &str) -> Option<ContentTypeDescriptor> {
        self.content_types().into_iter().find(|descriptor| descriptor.uid.as_str() == uid)
    }
}

impl<T: ContentTypeRegistry + ?Sized> ContentTypeRegistry for Arc<T> {
    fn content_types(&self) -> Vec<ContentTypeDescriptor> {
        (**self).content_types()
    }

    fn find(&self, uid: &str) -> Option<ContentTypeDescriptor> {
        (**self).find(uid)
    }
}

/// Fixed registry snapshot, typically loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    descriptors: Arc<[ContentTypeDescriptor]>,
    index: Arc<FxHashMap<ContentTypeUid, usize>>,
}

impl StaticRegistry {
    /// Builds the snapshot. A uid registered twice keeps its first descriptor.
    pub fn new(descriptors: impl IntoIterator<Item = ContentTypeDescriptor>) -> Self {
        let mut kept = Vec::new();
        let mut index = FxHashMap::default();

        for descriptor in descriptors {
            if index.contains_key(&descriptor.uid) {
                warn!(uid = %descriptor.uid, name = %descriptor.name, "Duplicate content type ignored");
                continue;
            }
            index.insert(descriptor.uid.clone(), kept.len());
            kept.push(descriptor);
        }

        Self { descriptors: kept.into(), index: Arc::new(index) }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl ContentTypeRegistry for StaticRegistry {
    fn content_types(&self) -> Vec<ContentTypeDescriptor> {
        self.descriptors.to_vec()
    }

    fn find(&self, uid: &str) -> Option<ContentTypeDescriptor> {
        self.index.get(uid).and_then(|&position| self.descriptors.get(position)).cloned()
    }
}

/// Maps between public short names and content type uids.
#[derive(Debug, Clone)]
pub struct RegistryResolver<G> {
    registry: G,
}

impl<G: ContentTypeRegistry> RegistryResolver<G> {
    pub const fn new(registry: G) -> Self {
        Self { registry }
    }

    pub const fn registry(&self) -> &G {
        &self.registry
    }

    /// Every known uid, in registry enumeration order.
    pub fn list_identifiers(&self) -> Vec<ContentTypeUid> {
        self.registry.content_types().into_iter().map(|descriptor| descriptor.uid).collect()
    }

    /// The short name of every descriptor, aligned with [`Self::list_identifiers`].
    ///
    /// Names shared by several namespaces are listed once per descriptor.
    pub fn list_public_names(&self) -> Vec<String> {
        self.registry.content_types().into_iter().map(|descriptor| descriptor.name).collect()
    }

    /// Returns the registered uid when `uid` is known, `None` otherwise.
    pub fn resolve(&self, uid: &str) -> Option<ContentTypeUid> {
        self.registry.find(uid).map(|descriptor| descriptor.uid)
    }

    /// Resolves either a uid or a short name. Uids take precedence; for a short name the
    /// first descriptor in enumeration order wins.
    pub fn lookup(&self, name_or_uid: &str) -> Option<ContentTypeUid> {
        self.resolve(name_or_uid).or_else(|| {
            self.registry
                .content_types()
                .into_iter()
                .find(|descriptor| descriptor.name == name_or_uid)
                .map(|descriptor| descriptor.uid)
        })
    }

    /// Short public name of a known uid.
    pub fn public_name(&self, uid: &str) -> Option<String> {
        self.registry.find(uid).map(|descriptor| descriptor.name)
    }

    /// Storage collection backing a known uid.
    pub fn collection_name(&self, uid: &str) -> Option<String> {
        self.registry.find(uid).map(|descriptor| descriptor.collection_name().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> StaticRegistry {
        StaticRegistry::new([
            ContentTypeDescriptor::new("api::about.about", "about"),
            ContentTypeDescriptor::new("api::restaurant.restaurant", "restaurant"),
            ContentTypeDescriptor::new("plugin::upload.file", "file").with_collection("files"),
            ContentTypeDescriptor::new("plugin::archive.restaurant", "restaurant"),
        ])
    }

    #[test]
    fn resolves_known_uids_only() {
        let resolver = RegistryResolver::new(registry());

        assert_eq!(
            resolver.resolve("api::about.about"),
            Some(ContentTypeUid::from("api::about.about"))
        );
        assert_eq!(resolver.resolve("about"), None);
        assert_eq!(resolver.resolve("api::test.test"), None);
    }

    #[test]
    fn names_and_identifiers_line_up() {
        let resolver = RegistryResolver::new(registry());
        let uids = resolver.list_identifiers();
        let names = resolver.list_public_names();

        assert_eq!(uids.len(), names.len());
        assert_eq!(names, ["about", "restaurant", "file", "restaurant"]);
        for (uid, name) in uids.iter().zip(&names) {
            assert_eq!(resolver.public_name(uid.as_str()).as_deref(), Some(name.as_str()));
        }
    }

    #[test]
    fn lookup_prefers_uids_then_first_name() {
        let resolver = RegistryResolver::new(registry());

        assert_eq!(
            resolver.lookup("restaurant"),
            Some(ContentTypeUid::from("api::restaurant.restaurant"))
        );
        assert_eq!(
            resolver.lookup("plugin::archive.restaurant"),
            Some(ContentTypeUid::from("plugin::archive.restaurant"))
        );
        assert_eq!(resolver.lookup("missing"), None);
    }

    #[test]
    fn collection_defaults_to_public_name() {
        let resolver = RegistryResolver::new(registry());

        assert_eq!(resolver.collection_name("api::about.about").as_deref(), Some("about"));
        assert_eq!(resolver.collection_name("plugin::upload.file").as_deref(), Some("files"));
        assert_eq!(resolver.collection_name("api::test.test"), None);
    }

    #[test]
    fn duplicate_uids_keep_the_first_descriptor() {
        let registry = StaticRegistry::new([
            ContentTypeDescriptor::new("api::movie.movie", "movie"),
            ContentTypeDescriptor::new("api::movie.movie", "film"),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("api::movie.movie").map(|d| d.name).as_deref(), Some("movie"));
    }

    #[test]
    fn shared_registries_resolve_through_arc() {
        let resolver = RegistryResolver::new(Arc::new(registry()));
        assert!(resolver.resolve("plugin::upload.file").is_some());
    }
}
