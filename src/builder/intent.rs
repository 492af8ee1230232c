//! Intent and slot builders.

use crate::l10n::{
    LocaleRegistry,
    keys,
};
use crate::model::{
    DelegationStrategy,
    ValidationRule,
};

use super::error::BuildError;

/// Prefix of the platform's built-in intents.
pub const BUILTIN_PREFIX: &str = "AMAZON.";

/// Accumulates one intent: its slots and dialog settings. Sample
/// utterances are written straight into the shared locale registry.
#[derive(Debug, Clone)]
pub struct IntentBuilder {
    /// Registry the samples are written to.
    registry: LocaleRegistry,
    /// Intent name, e.g. `AWSStatusIntent`.
    name: String,
    /// Slots in insertion order.
    slots: Vec<SlotBuilder>,
    /// Set by an intent confirmation prompt.
    confirmation_required: bool,
    /// Per-intent override of the model's delegation strategy.
    delegation_strategy: Option<DelegationStrategy>,
}

impl IntentBuilder {
    /// Creates an intent without slots.
    pub(crate) fn new(registry: LocaleRegistry, name: impl Into<String>) -> Self {
        Self {
            registry,
            name: name.into(),
            slots: Vec::new(),
            confirmation_required: false,
            delegation_strategy: None,
        }
    }

    /// Intent name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is one of the platform's `AMAZON.*` intents.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.name.starts_with(BUILTIN_PREFIX)
    }

    /// Stores the sample utterances under `<intent>_samples` in `locale`.
    pub fn with_locale_samples<I, S>(&mut self, locale: &str, samples: I) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.resolve(locale)?.set(keys::samples(&self.name), samples);
        Ok(self)
    }

    /// Appends a slot. Names are not de-duplicated.
    pub fn add_slot(&mut self, name: impl Into<String>) -> &mut SlotBuilder {
        let slot = SlotBuilder::new(self.registry.clone(), name);
        super::push_last(&mut self.slots, slot)
    }

    /// First slot with that name.
    pub fn slot_mut(&mut self, name: &str) -> Result<&mut SlotBuilder, BuildError> {
        let intent = &self.name;
        self.slots.iter_mut().find(|slot| slot.name == name).ok_or_else(|| BuildError::UnknownSlot {
            intent: intent.clone(),
            slot: name.to_string(),
        })
    }

    /// Overrides the model's delegation strategy for this intent.
    pub const fn with_delegation_strategy(&mut self, strategy: DelegationStrategy) -> &mut Self {
        self.delegation_strategy = Some(strategy);
        self
    }

    /// Slots in insertion order.
    #[must_use]
    pub fn slots(&self) -> &[SlotBuilder] {
        &self.slots
    }

    /// First slot with that name.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&SlotBuilder> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    /// Whether the whole intent is confirmed before fulfilment.
    #[must_use]
    pub const fn confirmation_required(&self) -> bool {
        self.confirmation_required
    }

    /// Delegation strategy set on this intent, if any.
    #[must_use]
    pub const fn delegation_strategy(&self) -> Option<DelegationStrategy> {
        self.delegation_strategy
    }

    /// Whether the intent takes part in the dialog model.
    #[must_use]
    pub fn has_dialog(&self) -> bool {
        self.confirmation_required
            || self.delegation_strategy.is_some()
            || self.slots.iter().any(SlotBuilder::has_dialog)
    }

    /// Marks the intent as needing confirmation.
    pub(crate) const fn require_confirmation(&mut self) {
        self.confirmation_required = true;
    }
}

/// Accumulates one slot of an intent.
#[derive(Debug, Clone)]
pub struct SlotBuilder {
    /// Registry the samples are written to.
    registry: LocaleRegistry,
    /// Slot name, e.g. `Region`.
    name: String,
    /// Declared type; empty until set.
    type_name: String,
    /// Set by an elicitation prompt.
    elicitation_required: bool,
    /// Set by a slot confirmation prompt.
    confirmation_required: bool,
    /// Validation rules, each at most once.
    validations: Vec<ValidationRule>,
}

impl SlotBuilder {
    /// Creates an untyped slot.
    fn new(registry: LocaleRegistry, name: impl Into<String>) -> Self {
        Self {
            registry,
            name: name.into(),
            type_name: String::new(),
            elicitation_required: false,
            confirmation_required: false,
            validations: Vec::new(),
        }
    }

    /// Sets the slot's type.
    pub fn with_type(&mut self, type_name: impl Into<String>) -> &mut Self {
        self.type_name = type_name.into();
        self
    }

    /// Stores the slot's sample utterances under `<slot>_samples` in `locale`.
    pub fn with_locale_samples<I, S>(&mut self, locale: &str, samples: I) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.resolve(locale)?.set(keys::samples(&self.name), samples);
        Ok(self)
    }

    /// Slot name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type; empty until [`SlotBuilder::with_type`] is called.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Whether the dialog asks for the slot when it is missing.
    #[must_use]
    pub const fn elicitation_required(&self) -> bool {
        self.elicitation_required
    }

    /// Whether the dialog confirms the slot value.
    #[must_use]
    pub const fn confirmation_required(&self) -> bool {
        self.confirmation_required
    }

    /// Validation rules in registration order.
    #[must_use]
    pub fn validations(&self) -> &[ValidationRule] {
        &self.validations
    }

    /// Whether the slot takes part in the dialog model.
    #[must_use]
    pub fn has_dialog(&self) -> bool {
        self.elicitation_required || self.confirmation_required || !self.validations.is_empty()
    }

    /// Marks the slot as required.
    pub(crate) const fn require_elicitation(&mut self) {
        self.elicitation_required = true;
    }

    /// Marks the slot value as needing confirmation.
    pub(crate) const fn require_confirmation(&mut self) {
        self.confirmation_required = true;
    }

    /// Adds `rule` once; returns false if it was already present.
    pub(crate) fn add_validation(&mut self, rule: ValidationRule) -> bool {
        if self.validations.contains(&rule) {
            return false;
        }
        self.validations.push(rule);
        true
    }
}
