//! Builders for interaction models and the skill manifest.
//!
//! Builders hold structure only. Every text they emit (invocation names,
//! samples, type values, prompt wording, store listing) is read from the
//! [`LocaleRegistry`](crate::l10n::LocaleRegistry) they were created with.

mod error;
mod intent;
mod model_builder;
mod prompt;
mod skill_builder;
mod type_builder;

pub use error::BuildError;
pub use intent::{
    BUILTIN_PREFIX,
    IntentBuilder,
    SlotBuilder,
};
pub use model_builder::{
    BuilderState,
    ModelBuilder,
};
pub use prompt::PromptKind;
pub use skill_builder::{
    BUILTIN_INTENTS,
    MANIFEST_VERSION,
    SkillBuilder,
};
pub use type_builder::TypeBuilder;

/// Pushes `item` and returns a handle to it.
#[allow(clippy::indexing_slicing)]
fn push_last<T>(items: &mut Vec<T>, item: T) -> &mut T {
    items.push(item);
    let last = items.len() - 1;
    &mut items[last]
}
