//! voice-skill-kit
//!
//! Localized snippet registry and builders that turn it into the
//! interaction models and manifest of a voice-assistant skill.

pub mod builder;
pub mod config;
pub mod export;
pub mod l10n;
pub mod model;

mod test_utils;

pub use builder::{
    BuildError,
    ModelBuilder,
    SkillBuilder,
};
pub use l10n::{
    Locale,
    LocaleRegistry,
    Translate,
};
