use crate::constants::DEFAULT_PAGE_SIZE;
use crate::content_type::ContentTypeDescriptor;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared across the workspace.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiftConfigInner {
    pub database: DatabaseConfig,
    pub batch: BatchConfig,
    pub logger: LoggerSettings,
    /// Registry snapshot: every content type the host exposes.
    pub content_types: Vec<ContentTypeDescriptor>,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct SiftConfig {
    #[serde(flatten, default)]
    inner: Arc<SiftConfigInner>,
}

impl Deref for SiftConfig {
    type Target = SiftConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SiftConfig {
    fn deref_mut(&mut self) -> &mut SiftConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// `SurrealDB` connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<DatabaseCredentials>,
}

/// `SurrealDB` root credentials (optional when using unauthenticated engines like mem://).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

/// Batched iteration knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub page_size: usize,
}

/// Logging output settings, applied by the binaries.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub level: String,
    /// `compact` or `json`.
    pub format: String,
    /// Directory for rolling log files; console only when absent.
    pub directory: Option<PathBuf>,
    pub filter: Option<String>,
}

// --- Default ---

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mem://".to_owned(),
            namespace: "sift".to_owned(),
            database: "content".to_owned(),
            credentials: None,
        }
    }
}

impl Default for DatabaseCredentials {
    fn default() -> Self {
        Self { username: "root".to_owned(), password: "root".to_owned() }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { page_size: DEFAULT_PAGE_SIZE }
    }
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self { level: "info".to_owned(), format: "compact".to_owned(), directory: None, filter: None }
    }
}
