//! Errors of the model and skill builders.

use thiserror::Error;

use crate::l10n::L10nError;

/// Errors raised while configuring or building a skill.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The builder was already built and cannot be configured again.
    #[error("Builder is already built; configuration is closed")]
    InvalidState,

    /// A slot exists but the skill declares no types at all.
    #[error("Slot '{slot}' of intent '{intent}' needs a type, but the skill declares no types")]
    NoTypesDefined {
        /// Intent owning the slot.
        intent: String,
        /// Offending slot.
        slot: String,
    },

    /// A slot names a type the skill does not declare.
    #[error("Slot '{slot}' of intent '{intent}' uses undeclared type '{type_name}'")]
    UndeclaredType {
        /// Intent owning the slot.
        intent: String,
        /// Offending slot.
        slot: String,
        /// Type the slot refers to.
        type_name: String,
    },

    /// No intent with that name was added.
    #[error("Intent '{0}' is not part of the model")]
    UnknownIntent(String),

    /// No type with that name was added.
    #[error("Type '{0}' is not part of the model")]
    UnknownType(String),

    /// The intent has no slot with that name.
    #[error("Intent '{intent}' has no slot '{slot}'")]
    UnknownSlot {
        /// Intent that was searched.
        intent: String,
        /// Missing slot.
        slot: String,
    },

    /// Locale resolution or a required translation failed.
    #[error(transparent)]
    Locale(#[from] L10nError),
}
