//! Core error types.

use thiserror::Error;

/// Ordering and filtering errors.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument was empty or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A path segment does not name a field on the entity reached so far.
    #[error("field '{segment}' not found on entity '{entity}'")]
    FieldNotFound {
        /// The unmatched segment.
        segment: String,
        /// Name of the entity that was searched.
        entity: String,
    },

    /// The key type has no natural ordering.
    #[error("unsupported key type: {type_name} has no natural ordering")]
    UnsupportedKeyType {
        /// Description of the offending type.
        type_name: String,
    },

    /// Two non-null keys of different classes were compared.
    #[error("cannot compare {left} key with {right} key")]
    MismatchedKeys {
        /// Class of the left-hand key.
        left: String,
        /// Class of the right-hand key.
        right: String,
    },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub(crate) fn unsupported(type_name: impl Into<String>) -> Self {
        Error::UnsupportedKeyType {
            type_name: type_name.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
