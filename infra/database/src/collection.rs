use crate::error::DatabaseError;
use std::fmt;

/// A validated table name that is safe to splice into `SurrealQL`.
///
/// Names are lowercased and may only contain ASCII alphanumerics and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionName(String);

impl TryFrom<String> for CollectionName {
    type Error = DatabaseError;

    fn try_from(value: String) -> Result<Self, DatabaseError> {
        Self::try_from(value.as_str())
    }
}

impl TryFrom<&str> for CollectionName {
    type Error = DatabaseError;

    fn try_from(value: &str) -> Result<Self, DatabaseError> {
        let name = value.to_lowercase();

        if name.is_empty() {
            return Err(DatabaseError::Validation {
                message: "EMPTY".into(),
                context: Some("Collection name cannot be empty".into()),
            });
        }

        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DatabaseError::Validation {
                message: name.into(),
                context: Some("Collection name contains illegal characters".into()),
            });
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_normalized_and_escaped() {
        let name = CollectionName::try_from("Restaurants").unwrap();
        assert_eq!(name.as_ref(), "restaurants");
        assert_eq!(name.to_string(), "`restaurants`");
    }

    #[test]
    fn injection_attempts_are_rejected() {
        for bad in ["", "movie; REMOVE TABLE user", "api::movie.movie", "a-b"] {
            assert!(
                matches!(CollectionName::try_from(bad), Err(DatabaseError::Validation { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
