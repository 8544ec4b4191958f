use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable prefix for overrides (`SIFT__BATCH__PAGE_SIZE=200`).
pub const ENV_PREFIX: &str = "SIFT";

/// Base file name probed when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sift";

/// Custom error type for config loading.
#[sift_derive::sift_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layering:
/// 1. **Base File**: `path`, or `sift` in the working directory. The extension may be omitted;
///    `toml`, `yaml` and `json` variants are probed.
/// 2. **Environment Overrides**: variables prefixed with `SIFT__`, nested with double
///    underscores (`SIFT__DATABASE__URL` maps to `database.url`).
///
/// # Errors
/// This function will return an error if:
/// * The specified (or default) configuration file cannot be found.
/// * The content of the file does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use sift_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     page_size: usize,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, None)
}

/// Same as [`load_config`], with the environment layer read from `vars` instead of the
/// process environment. Keys keep their `SIFT__` prefix.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T, K, V>(
    path: Option<impl AsRef<Path>>,
    vars: impl IntoIterator<Item = (K, V)>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    K: Into<String>,
    V: Into<String>,
{
    let vars: Map<String, String> = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
    load_layered(path, Some(vars))
}

fn load_layered<T>(
    path: Option<impl AsRef<Path>>,
    vars: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .convert_case(config::Case::Snake)
                .source(vars),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
