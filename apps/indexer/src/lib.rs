//! # Sift Indexer
//!
//! Wires configuration, logging and the `SurrealDB` entry store into the content types
//! service, and drives the `sift` command line.
//!
//! ## Example
//! ```no_run
//! use sift_indexer::Indexer;
//! use sift_kernel::domain::config::SiftConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let indexer = Indexer::builder().config(SiftConfig::default()).build().await?;
//!     let total = indexer.count(&[]).await?.total;
//!     println!("{total} entries");
//!     Ok(())
//! }
//! ```

pub mod cli;

use anyhow::{Context, Result};
use sift_content_types::{BatchOptions, ContentTypes, StaticRegistry, SurrealStore};
use sift_database::Database;
use sift_kernel::domain::config::{LoggerSettings, SiftConfig};
use sift_kernel::domain::constants::API_NAMESPACE;
use sift_kernel::domain::content_type::ContentTypeUid;
use sift_logger::{LevelFilter, LogFormat, Logger};
use std::convert::Infallible;
use std::future::ready;
use std::str::FromStr;
use tokio::sync::watch;
use tracing::{info, warn};

/// Initializes the global logger from configuration.
///
/// # Errors
/// Returns an error for an unknown level or format, an invalid filter, or when a global
/// subscriber is already installed.
pub fn init_logger(name: &str, settings: &LoggerSettings) -> Result<Logger> {
    let level = LevelFilter::from_str(&settings.level)
        .with_context(|| format!("Invalid log level '{}'", settings.level))?;
    let format = LogFormat::from_str(&settings.format)?;

    let mut builder = Logger::builder().name(name).level(level).format(format);
    if let Some(filter) = &settings.filter {
        builder = builder.env_filter(filter);
    }

    let logger = match &settings.directory {
        Some(directory) => builder.path(directory).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

/// A fluent builder for the [`Indexer`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct IndexerBuilder {
    cfg: SiftConfig,
}

impl IndexerBuilder {
    /// Set up the indexer's configuration.
    pub fn config(mut self, cfg: SiftConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.cfg.batch.page_size = page_size;
        self
    }

    async fn init_database(&self) -> Result<Database> {
        let db_cfg = &self.cfg.database;
        let mut builder =
            Database::builder().url(&db_cfg.url).session(&db_cfg.namespace, &db_cfg.database);

        if let Some(creds) = &db_cfg.credentials {
            builder = builder.auth(&creds.username, &creds.password);
        }

        builder.init().await.context("Failed to establish database connection")
    }

    /// Connects the database and maps the configured content types onto its tables.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable or a collection name is invalid.
    pub async fn build(self) -> Result<Indexer> {
        let db = self.init_database().await?;
        let registry = StaticRegistry::new(self.cfg.content_types.iter().cloned());
        let store = SurrealStore::new(db, &registry).context("Invalid content type collection")?;

        info!(content_types = registry.len(), "Indexer initialized");

        Ok(Indexer { content_types: ContentTypes::new(registry, store), cfg: self.cfg })
    }
}

/// Registered content type as shown by `sift list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedContentType {
    pub uid: ContentTypeUid,
    pub name: String,
}

/// Entry counts as reported by `sift count`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountReport {
    /// Per requested name or uid; `None` when it resolves to no content type.
    pub per_type: Vec<(String, Option<u64>)>,
    pub total: u64,
}

impl CountReport {
    /// Adds one requested entry. The total saturates like
    /// [`ContentTypes::total_count`].
    pub fn record(&mut self, label: impl Into<String>, count: Option<u64>) {
        self.total = self.total.saturating_add(count.unwrap_or_default());
        self.per_type.push((label.into(), count));
    }
}

/// Outcome of one dry-run indexing pass over a content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub uid: ContentTypeUid,
    pub batches: usize,
    pub documents: usize,
    pub cancelled: bool,
}

/// Content type operations over the configured database.
#[derive(Debug, Clone)]
pub struct Indexer {
    cfg: SiftConfig,
    content_types: ContentTypes<StaticRegistry, SurrealStore>,
}

impl Indexer {
    pub fn builder() -> IndexerBuilder {
        IndexerBuilder::default()
    }

    pub const fn content_types(&self) -> &ContentTypes<StaticRegistry, SurrealStore> {
        &self.content_types
    }

    pub fn database(&self) -> &Database {
        self.content_types.store().database()
    }

    /// Registered content types, optionally restricted to the `api` namespace.
    pub fn list(&self, api_only: bool) -> Vec<ListedContentType> {
        let resolver = self.content_types.resolver();
        resolver
            .list_identifiers()
            .into_iter()
            .zip(resolver.list_public_names())
            .filter(|(uid, _)| !api_only || uid.namespace() == Some(API_NAMESPACE))
            .map(|(uid, name)| ListedContentType { uid, name })
            .collect()
    }

    /// Counts the entries of the requested content types, or of all of them.
    ///
    /// # Errors
    /// Returns an error when the store fails to count.
    pub async fn count(&self, requested: &[String]) -> Result<CountReport> {
        let mut report = CountReport::default();

        for (label, uid) in self.targets(requested) {
            let count = match uid {
                Some(uid) => Some(self.content_types.count(uid.as_str()).await?),
                None => None,
            };
            report.record(label, count);
        }

        Ok(report)
    }

    /// Streams every requested content type through the batch engine and reports how
    /// many documents an indexing pass would push.
    ///
    /// Setting `cancel` to `true` stops at the next page boundary.
    ///
    /// # Errors
    /// Returns an error when the store fails to read.
    pub async fn sync(
        &self,
        requested: &[String],
        cancel: watch::Receiver<bool>,
    ) -> Result<Vec<SyncReport>> {
        let mut reports = Vec::new();

        for (label, uid) in self.targets(requested) {
            let Some(uid) = uid else {
                warn!(content_type = %label, "Skipping unknown content type");
                continue;
            };

            let options =
                BatchOptions::new().page_size(self.cfg.batch.page_size).cancel_on(cancel.clone());
            let run = self
                .content_types
                .run_batches(uid.as_str(), options, |batch| {
                    let documents = batch.entries.len();
                    info!(uid = %batch.uid, offset = batch.offset, documents, "Indexed batch");
                    ready(Ok::<_, Infallible>(Some(documents)))
                })
                .await
                .with_context(|| format!("Indexing {uid}"))?;

            let report = SyncReport {
                batches: run.output.len(),
                documents: run.output.iter().sum(),
                cancelled: run.cancelled,
                uid,
            };
            info!(
                uid = %report.uid,
                batches = report.batches,
                documents = report.documents,
                "Content type synced"
            );
            let cancelled = report.cancelled;
            reports.push(report);

            if cancelled {
                warn!("Sync cancelled, remaining content types skipped");
                break;
            }
        }

        Ok(reports)
    }

    /// Resolves requested names or uids; an empty request selects every content type.
    fn targets(&self, requested: &[String]) -> Vec<(String, Option<ContentTypeUid>)> {
        let resolver = self.content_types.resolver();
        if requested.is_empty() {
            return resolver
                .list_identifiers()
                .into_iter()
                .map(|uid| (uid.to_string(), Some(uid)))
                .collect();
        }
        requested.iter().map(|label| (label.clone(), resolver.lookup(label))).collect()
    }
}
