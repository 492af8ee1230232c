//! Serializable documents produced by the builders.

mod interaction;
mod manifest;

pub use interaction::{
    DelegationStrategy,
    Dialog,
    DialogIntent,
    DialogSlot,
    IntentPrompts,
    InteractionModel,
    LanguageModel,
    Model,
    ModelIntent,
    ModelSlot,
    ModelType,
    Prompt,
    SlotPrompts,
    SlotValidation,
    TypeValue,
    TypeValueName,
    ValidationRule,
    Variation,
    VariationType,
};
pub use manifest::{
    Apis,
    CustomApi,
    Endpoint,
    LocaleInfo,
    Manifest,
    Permission,
    PrivacyAndCompliance,
    PrivacyFlags,
    PrivacyLocale,
    PublishingInformation,
    Skill,
};
