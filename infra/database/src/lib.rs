//! # Database Infrastructure
//!
//! This crate provides a unified interface for initializing [SurrealDB](https://surrealdb.com)
//! connections and reading content collections from them.
//!
//! ## Key Features
//! - **Engine Agnostic**: Supports `mem://`, `rocksdb://`, `ws://`, and `http://` via the `any` engine.
//! - **Resilient Connectivity**: Built-in retry logic for health checks during engine startup.
//! - **Collection Reads**: Counting and offset/limit windows over a validated table name,
//!   with a stable `id` ordering between windows.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sift_database::{CollectionName, Database, DatabaseError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), DatabaseError> {
//!     let db = Database::builder()
//!         .url("mem://")
//!         .session("sift", "content")
//!         .init()
//!         .await?;
//!
//!     let movies = CollectionName::try_from("movie")?;
//!     let total = db.count_records(&movies).await?;
//!     let first_page = db.select_records(&movies, 0, Some(100)).await?;
//!     assert_eq!(first_page.len() as u64, total.min(100));
//!
//!     Ok(())
//! }
//! ```

mod collection;
mod error;

pub use crate::collection::CollectionName;
pub use crate::error::{DatabaseError, DatabaseErrorExt};
pub use surrealdb::types::Value;

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::{Any, connect};
use surrealdb::opt::auth::Root;
use tracing::{debug, info, instrument, warn};

/// Health check attempts before giving up on a freshly started engine.
const HEALTH_CHECK_ATTEMPTS: u32 = 3;

/// Inner state of the [`Database`] wrapper.
#[derive(Debug)]
pub struct DatabaseInner {
    instance: Surreal<Any>,
    ns: String,
    db: String,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        info!(ns = %self.ns, db = %self.db, "SurrealDB session handle dropped");
    }
}

/// `SurrealDB` client wrapper that provides thread-safety and contextual error handling.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    /// Creates a new [`DatabaseBuilder`].
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// Counts the records stored in `collection`.
    ///
    /// A collection that was never written to counts as zero.
    ///
    /// # Errors
    /// Returns [`DatabaseError::Surreal`] if the query fails and
    /// [`DatabaseError::Internal`] if the engine reports a negative count.
    #[instrument(skip_all, fields(collection = %collection))]
    pub async fn count_records(&self, collection: &CollectionName) -> Result<u64, DatabaseError> {
        let counts = self
            .inner
            .instance
            .query(format!("SELECT VALUE count() FROM {collection} GROUP ALL"))
            .await
            .context(format!("Counting records of {collection}"))?
            .take::<Vec<i64>>(0)
            .context(format!("Parsing record count of {collection}"))?;

        let count = counts.first().copied().unwrap_or_default();
        u64::try_from(count).map_err(|_| DatabaseError::Internal {
            message: format!("Negative record count {count}").into(),
            context: Some(collection.to_string().into()),
        })
    }

    /// Reads the records of `collection` ordered by `id`, skipping `start` records and
    /// returning at most `limit` of them (all remaining ones when `limit` is `None`).
    ///
    /// # Errors
    /// Returns [`DatabaseError::Surreal`] if the query fails and
    /// [`DatabaseError::Validation`] if the window does not fit the engine's integer range.
    #[instrument(skip_all, fields(collection = %collection, start, limit = ?limit))]
    pub async fn select_records(
        &self,
        collection: &CollectionName,
        start: usize,
        limit: Option<usize>,
    ) -> Result<Vec<Value>, DatabaseError> {
        let start = to_query_int(start, "start")?;

        let mut response = match limit {
            Some(limit) => {
                let limit = to_query_int(limit, "limit")?;
                self.inner
                    .instance
                    .query(format!(
                        "SELECT * FROM {collection} ORDER BY id LIMIT $limit START $start"
                    ))
                    .bind(("limit", limit))
                    .bind(("start", start))
                    .await
            },
            None => {
                self.inner
                    .instance
                    .query(format!("SELECT * FROM {collection} ORDER BY id START $start"))
                    .bind(("start", start))
                    .await
            },
        }
        .context(format!("Selecting records of {collection}"))?;

        let records = response
            .take::<Vec<Value>>(0)
            .context(format!("Parsing records of {collection}"))?;

        debug!(start, returned = records.len(), "Selected collection window");
        Ok(records)
    }
}

fn to_query_int(value: usize, field: &'static str) -> Result<i64, DatabaseError> {
    i64::try_from(value).map_err(|_| DatabaseError::Validation {
        message: format!("{field} {value} exceeds the supported range").into(),
        context: None,
    })
}

impl Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.inner.instance
    }
}

/// A fluent builder for configuring and establishing a `SurrealDB` connection.
///
/// This builder ensures that fundamental parameters like the connection URL,
/// namespace, and database name are provided upfront.
#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    ns: Option<String>,
    db: Option<String>,
    auth: Option<(String, String)>,
}

impl DatabaseBuilder {
    /// Creates a new [`DatabaseBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the connection URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the namespace and database name.
    pub fn session(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.ns = Some(namespace.into());
        self.db = Some(database.into());
        self
    }

    /// Add root credentials to the connection.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    /// Consumes the builder and attempts to establish a connection to the database.
    ///
    /// # Process
    /// 1. **Validation**: Ensures URL, Namespace, and Database name are provided.
    /// 2. **Engine Initialization**: Connects to the underlying `SurrealDB` engine (Any).
    /// 3. **Resilience**: Performs up to 3 health checks. If a check fails, it retries with
    ///    exponential backoff (starting at 500ms).
    /// 4. **Authentication**: If credentials were provided via [`auth`](Self::auth), signs in as a Root user.
    /// 5. **Session Activation**: Sets the namespace and database for the connection.
    ///
    /// # Errors
    /// * [`DatabaseError::Validation`] if required parameters are missing.
    /// * [`DatabaseError::Connection`] if the engine fails to start or remains unhealthy.
    /// * [`DatabaseError::Auth`] if the provided credentials are rejected.
    /// * [`DatabaseError::Surreal`] if the session activation (`use_ns`/`use_db`) fails.
    #[instrument(skip(self), fields(url = self.url, ns = self.ns, db = self.db))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = self.url.ok_or(DatabaseError::Validation {
            message: "URL is required".into(),
            context: None,
        })?;
        let ns = self.ns.ok_or(DatabaseError::Validation {
            message: "Namespace is required".into(),
            context: None,
        })?;
        let db = self.db.ok_or(DatabaseError::Validation {
            message: "Database is required".into(),
            context: None,
        })?;

        let instance = connect(&url).await.map_err(|e| DatabaseError::Connection {
            message: e.to_string().into(),
            context: Some("Initializing engine".into()),
        })?;

        let mut delay = Duration::from_millis(500);
        for attempt in 1..=HEALTH_CHECK_ATTEMPTS {
            if instance.health().await.is_ok() {
                break;
            }
            if attempt == HEALTH_CHECK_ATTEMPTS {
                return Err(DatabaseError::Connection {
                    message: "Unhealthy after retries".into(),
                    context: Some(url.into()),
                });
            }
            warn!(attempt, ?delay, "Database not ready, retrying...");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        if let Some((username, password)) = self.auth {
            instance.signin(Root { username, password }).await.map_err(|e| {
                DatabaseError::Auth { message: e.to_string().into(), context: Some(url.into()) }
            })?;
        }

        instance.use_ns(&ns).use_db(&db).await.context("Activating session")?;

        let version =
            instance.version().await.map_or_else(|_| "unknown".to_owned(), |v| v.to_string());
        info!(namespace = %ns, database = %db, %version, "SurrealDB connection established");

        Ok(Database { inner: Arc::new(DatabaseInner { instance, ns, db }) })
    }
}
