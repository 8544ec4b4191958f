//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports the domain models and owns config loading.
//!
//! ## Config loading
//! ```rust,no_run
//! use sift_kernel::config::load_config;
//! use sift_kernel::domain::config::SiftConfig;
//!
//! let cfg: SiftConfig = load_config(Some("sift")).unwrap();
//! ```
pub mod config;

pub use sift_domain as domain;
