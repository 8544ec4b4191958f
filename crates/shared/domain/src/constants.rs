/// Records per store round trip when the caller does not choose a page size.
pub const DEFAULT_PAGE_SIZE: usize = 500;

/// Separates the namespace from the rest of a content type uid (`api::movie.movie`).
pub const UID_NAMESPACE_SEPARATOR: &str = "::";

/// Namespace of application-defined content types; plugins use their own.
pub const API_NAMESPACE: &str = "api";
