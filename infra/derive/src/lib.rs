#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the infrastructure and feature crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! sift-derive = { path = "../infra/derive" }
//! thiserror = "2"
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// A high-level attribute macro for defining crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `#[source]` field,
///   enabling the use of the `?` operator for upstream errors. When several variants wrap the
///   same source type, only the first one receives the conversion; construct the others explicitly.
/// * **Internal Fallback**: Provides `From<&str>` and `From<String>` implementations
///   if an `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`).
/// 4. Tuple or unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use sift_derive::sift_error;
/// use std::borrow::Cow;
///
/// #[sift_error]
/// pub enum StoreError {
///     #[error("Query failed{}: {source}", format_context(.context))]
///     Query {
///         #[source]
///         source: surrealdb::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// async fn count(db: &Surreal<Any>) -> Result<Vec<i64>, StoreError> {
///     db.query("SELECT VALUE count() FROM movie GROUP ALL")
///         .await
///         .context("Counting movies")?
///         .take(0)
///         .context("Reading count")
/// }
/// ```
#[proc_macro_attribute]
pub fn sift_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
