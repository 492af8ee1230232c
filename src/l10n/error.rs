//! Errors of the locale registry and snippet lookups.

use thiserror::Error;

/// Errors raised by the locale registry and snippet lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum L10nError {
    /// A locale with the same name is already registered.
    #[error("Locale '{0}' is already registered")]
    AlreadyRegistered(String),

    /// No locale with that exact name is registered.
    #[error("Locale '{0}' not found")]
    NotFound(String),

    /// The key is absent or maps to an empty variant list.
    #[error("No translation for key '{key}'")]
    NoTranslation {
        /// Key that was looked up.
        key: String,
    },
}

/// Coarse classification of [`L10nError`], for callers that render
/// different user-facing messages per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`L10nError::AlreadyRegistered`].
    AlreadyRegistered,
    /// Unknown locale; see [`L10nError::NotFound`].
    NotFound,
    /// Missing text; see [`L10nError::NoTranslation`].
    NoTranslation,
}

impl L10nError {
    /// Shorthand for [`L10nError::NoTranslation`].
    pub(crate) fn no_translation(key: impl Into<String>) -> Self {
        Self::NoTranslation { key: key.into() }
    }

    /// Category of the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyRegistered(_) => ErrorKind::AlreadyRegistered,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NoTranslation { .. } => ErrorKind::NoTranslation,
        }
    }
}
