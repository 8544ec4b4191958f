use crate::constants::UID_NAMESPACE_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Globally unique content type identifier, e.g. `api::restaurant.restaurant`.
///
/// Cloning is cheap: the identifier is shared behind an `Arc<str>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentTypeUid(Arc<str>);

impl ContentTypeUid {
    pub fn new(uid: impl Into<Arc<str>>) -> Self {
        Self(uid.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace part of the uid (`api`, `plugin`, ...), if the uid carries one.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once(UID_NAMESPACE_SEPARATOR).map(|(namespace, _)| namespace)
    }
}

impl AsRef<str> for ContentTypeUid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContentTypeUid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentTypeUid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContentTypeUid {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ContentTypeUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry record of one content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeDescriptor {
    pub uid: ContentTypeUid,
    /// Short public name (`restaurant`).
    pub name: String,
    /// Storage collection holding the records; defaults to [`Self::name`].
    #[serde(default)]
    pub collection: Option<String>,
}

impl ContentTypeDescriptor {
    pub fn new(uid: impl Into<ContentTypeUid>, name: impl Into<String>) -> Self {
        Self { uid: uid.into(), name: name.into(), collection: None }
    }

    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    #[must_use]
    pub fn collection_name(&self) -> &str {
        self.collection.as_deref().unwrap_or(&self.name)
    }
}
