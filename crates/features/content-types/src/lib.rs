//! Content types feature slice.
//!
//! Resolves content types against a host registry, counts and fetches their entries,
//! and streams large collections through caller transforms in bounded pages.
//!
//! ```rust
//! use serde_json::json;
//! use sift_content_types::{BatchOptions, ContentTypes, MemoryStore, StaticRegistry};
//! use sift_domain::content_type::ContentTypeDescriptor;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), sift_content_types::ContentTypesError> {
//! let registry = StaticRegistry::new([ContentTypeDescriptor::new("api::movie.movie", "movie")]);
//! let store = MemoryStore::new().with_records("api::movie.movie", [json!({ "id": 1 })]);
//! let content_types = ContentTypes::new(registry, store);
//!
//! let ids = content_types
//!     .map_in_batches("api::movie.movie", BatchOptions::new(), |batch| {
//!         batch.entries.into_iter().map(|entry| entry["id"].clone()).collect::<Vec<_>>()
//!     })
//!     .await?;
//! assert_eq!(ids, [json!(1)]);
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod registry;
mod service;
mod store;
#[cfg(feature = "surrealdb")]
mod surreal;

pub use crate::error::{BoxError, ContentTypesError, ContentTypesErrorExt};
pub use crate::memory::MemoryStore;
pub use crate::registry::{ContentTypeRegistry, RegistryResolver, StaticRegistry};
pub use crate::service::{Batch, BatchOptions, Batched, ContentTypes};
pub use crate::store::{EntryStore, PageRequest};
#[cfg(feature = "surrealdb")]
pub use crate::surreal::SurrealStore;
