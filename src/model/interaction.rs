//! Interaction-model document, one per locale.
//!
//! Every list is always serialized (possibly as `[]`); optional scalars
//! are omitted when unset so no field is ever emitted as `null`.

use serde::{
    Deserialize,
    Serialize,
};

/// Root of `models/<locale>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// The model itself.
    pub interaction_model: InteractionModel,
}

/// Language model plus the optional dialog model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionModel {
    /// Invocation, intents and types.
    pub language_model: LanguageModel,
    /// Present when some intent takes part in a dialog or a delegation
    /// strategy is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog: Option<Dialog>,
    /// Prompts referenced from `dialog`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prompts: Vec<Prompt>,
}

/// What users can say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageModel {
    /// Phrase that opens the skill.
    pub invocation_name: String,
    /// Intents in insertion order.
    pub intents: Vec<ModelIntent>,
    /// Custom slot types in insertion order.
    pub types: Vec<ModelType>,
}

/// One intent of the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIntent {
    /// Intent name.
    pub name: String,
    /// Slots in insertion order.
    pub slots: Vec<ModelSlot>,
    /// Sample utterances.
    pub samples: Vec<String>,
}

/// One slot of an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSlot {
    /// Slot name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Sample utterances that fill only this slot.
    pub samples: Vec<String>,
}

/// Custom slot type with its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelType {
    /// Type name.
    pub name: String,
    /// Enumerated values.
    pub values: Vec<TypeValue>,
}

/// One value of a custom type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeValue {
    /// Stable identifier for entity resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Canonical value and synonyms.
    pub name: TypeValueName,
}

/// Canonical spelling of a value and its synonyms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeValueName {
    /// Canonical value.
    pub value: String,
    /// Alternative spellings.
    pub synonyms: Vec<String>,
}

/// Who drives the dialog once an intent needs slot elicitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DelegationStrategy {
    /// The platform elicits, confirms and validates on its own.
    Always,
    /// The skill decides per request.
    SkillResponse,
}

/// Dialog model: which slots are elicited, confirmed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialog {
    /// Model-wide strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegation_strategy: Option<DelegationStrategy>,
    /// Intents that take part in the dialog.
    pub intents: Vec<DialogIntent>,
}

/// Dialog settings of one intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogIntent {
    /// Intent name.
    pub name: String,
    /// Overrides the model-wide strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegation_strategy: Option<DelegationStrategy>,
    /// Whether the intent is confirmed before fulfilment.
    pub confirmation_required: bool,
    /// Prompt ids of the intent.
    pub prompts: IntentPrompts,
    /// Every slot of the intent.
    pub slots: Vec<DialogSlot>,
}

/// Prompt ids of an intent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentPrompts {
    /// Intent confirmation prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
}

/// Dialog settings of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogSlot {
    /// Slot name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether the slot is asked for when missing.
    pub elicitation_required: bool,
    /// Whether the slot value is confirmed.
    pub confirmation_required: bool,
    /// Prompt ids of the slot.
    pub prompts: SlotPrompts,
    /// Checks applied to the slot value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<SlotValidation>,
}

/// Prompt ids of a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPrompts {
    /// Elicitation prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elicitation: Option<String>,
    /// Slot confirmation prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
}

/// Slot validation rules that can be checked against the slot's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationRule {
    /// The value resolved to an entity of the slot type.
    HasEntityResolutionMatch,
    /// The value is one of the listed values.
    IsInSet,
    /// The value is none of the listed values.
    IsNotInSet,
}

impl ValidationRule {
    /// Name on the wire and in prompt ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HasEntityResolutionMatch => "hasEntityResolutionMatch",
            Self::IsInSet => "isInSet",
            Self::IsNotInSet => "isNotInSet",
        }
    }

    /// Rules that compare against an explicit value set.
    #[must_use]
    pub const fn uses_values(self) -> bool {
        matches!(self, Self::IsInSet | Self::IsNotInSet)
    }
}

/// One validation of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotValidation {
    /// Rule applied.
    #[serde(rename = "type")]
    pub rule: ValidationRule,
    /// Prompt id used when the rule fails.
    pub prompt: String,
    /// Value set of `isInSet` / `isNotInSet`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

/// A prompt and the texts it may be spoken as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Id referenced from the dialog model.
    pub id: String,
    /// Interchangeable texts.
    pub variations: Vec<Variation>,
}

/// Markup of a variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariationType {
    /// Plain text.
    PlainText,
    /// SSML wrapped in `<speak>`.
    #[serde(rename = "SSML")]
    Ssml,
}

/// One text of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    /// Markup of `value`.
    #[serde(rename = "type")]
    pub kind: VariationType,
    /// Text to speak.
    pub value: String,
}
