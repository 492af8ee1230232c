//! Model builder and per-locale rendering.

use std::collections::BTreeMap;

use crate::l10n::{
    L10nError,
    Locale,
    LocaleRegistry,
    Translate,
    keys,
};
use crate::model::{
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
    Prompt,
    SlotPrompts,
    SlotValidation,
    ValidationRule,
};

use super::error::BuildError;
use super::intent::{
    IntentBuilder,
    SlotBuilder,
};
use super::prompt::{
    PromptKind,
    render_prompt,
};
use super::type_builder::TypeBuilder;

/// Lifecycle of a builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuilderState {
    /// Nothing configured yet.
    #[default]
    Empty,
    /// At least one configuration call succeeded.
    Configured,
    /// Built; configuration is closed.
    Built,
}

/// Accumulates locales, intents, types and prompts, and renders one
/// interaction model per locale.
///
/// All texts are read from the locale registry handed to
/// [`ModelBuilder::new`]; the builder only keeps structure.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    /// Source of every rendered text.
    registry: LocaleRegistry,
    /// Locale names in the order they were added, without duplicates.
    locales: Vec<String>,
    /// Intents in insertion order.
    intents: Vec<IntentBuilder>,
    /// Custom types in insertion order.
    types: Vec<TypeBuilder>,
    /// Registered prompts, unique by id.
    prompts: Vec<PromptKind>,
    /// Model-wide dialog delegation.
    delegation_strategy: Option<DelegationStrategy>,
    /// Lifecycle state.
    state: BuilderState,
}

impl ModelBuilder {
    /// Creates an empty builder reading its texts from `registry`.
    #[must_use]
    pub const fn new(registry: LocaleRegistry) -> Self {
        Self {
            registry,
            locales: Vec::new(),
            intents: Vec::new(),
            types: Vec::new(),
            prompts: Vec::new(),
            delegation_strategy: None,
            state: BuilderState::Empty,
        }
    }

    /// Registry the builder reads from and writes to.
    #[must_use]
    pub const fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> BuilderState {
        self.state
    }

    /// Adds `name` to the model and stores its invocation phrase under
    /// [`keys::INVOCATION`] in the registry's locale.
    ///
    /// The locale data lives in the shared registry, not in the builder:
    ///
    /// - every builder on the same registry sees the same invocation
    ///   phrase, so a later `add_locale` for the same name from another
    ///   builder overwrites it for both
    /// - a locale the registry does not know yet is registered, and if the
    ///   registry was empty it becomes the registry's default locale
    pub fn add_locale(&mut self, name: &str, invocation: &str) -> Result<&mut Self, BuildError> {
        self.configure()?;

        let locale = match self.registry.resolve(name) {
            Ok(locale) => locale,
            Err(L10nError::NotFound(_)) => self.registry.register(Locale::new(name), &[])?,
            Err(e) => return Err(e.into()),
        };
        locale.set(keys::INVOCATION, [invocation]);

        if !self.locales.iter().any(|known| known == name) {
            self.locales.push(name.to_string());
        }
        Ok(self)
    }

    /// Sets the model-wide dialog delegation strategy.
    pub fn with_delegation_strategy(&mut self, strategy: DelegationStrategy) -> Result<&mut Self, BuildError> {
        self.configure()?;
        self.delegation_strategy = Some(strategy);
        Ok(self)
    }

    /// Appends an intent. Names are not de-duplicated.
    pub fn add_intent(&mut self, name: &str) -> Result<&mut IntentBuilder, BuildError> {
        self.configure()?;
        Ok(self.push_intent(name))
    }

    /// Appends an intent without touching the lifecycle state.
    pub(crate) fn push_intent(&mut self, name: &str) -> &mut IntentBuilder {
        let intent = IntentBuilder::new(self.registry.clone(), name);
        super::push_last(&mut self.intents, intent)
    }

    /// First intent with that name.
    pub fn intent_mut(&mut self, name: &str) -> Result<&mut IntentBuilder, BuildError> {
        self.configure()?;
        self.intents
            .iter_mut()
            .find(|intent| intent.name() == name)
            .ok_or_else(|| BuildError::UnknownIntent(name.to_string()))
    }

    /// Appends a custom slot type. Names are not de-duplicated.
    pub fn add_type(&mut self, name: &str) -> Result<&mut TypeBuilder, BuildError> {
        self.configure()?;
        let ty = TypeBuilder::new(self.registry.clone(), name.to_string());
        Ok(super::push_last(&mut self.types, ty))
    }

    /// First type with that name.
    pub fn type_mut(&mut self, name: &str) -> Result<&mut TypeBuilder, BuildError> {
        self.configure()?;
        self.types
            .iter_mut()
            .find(|ty| ty.name() == name)
            .ok_or_else(|| BuildError::UnknownType(name.to_string()))
    }

    /// Marks the slot as required and asks for it with the
    /// `<intent>_<slot>_elicit` prompt.
    pub fn add_elicitation_prompt(&mut self, intent: &str, slot: &str) -> Result<&mut Self, BuildError> {
        self.intent_mut(intent)?.slot_mut(slot)?.require_elicitation();
        self.push_prompt(PromptKind::Elicitation { intent: intent.to_string(), slot: slot.to_string() });
        Ok(self)
    }

    /// Requires confirmation of the slot value with the
    /// `<intent>_<slot>_confirm` prompt.
    pub fn add_confirmation_prompt(&mut self, intent: &str, slot: &str) -> Result<&mut Self, BuildError> {
        self.intent_mut(intent)?.slot_mut(slot)?.require_confirmation();
        self.push_prompt(PromptKind::SlotConfirmation { intent: intent.to_string(), slot: slot.to_string() });
        Ok(self)
    }

    /// Requires confirmation of the whole intent with the
    /// `<intent>_confirm` prompt.
    pub fn add_intent_confirmation_prompt(&mut self, intent: &str) -> Result<&mut Self, BuildError> {
        self.intent_mut(intent)?.require_confirmation();
        self.push_prompt(PromptKind::IntentConfirmation { intent: intent.to_string() });
        Ok(self)
    }

    /// Validates the slot with `rule`; the prompt wording comes from
    /// `<type>_<rule>_validation` of the slot's type.
    pub fn add_validation_prompt(
        &mut self,
        intent: &str,
        slot: &str,
        rule: ValidationRule,
    ) -> Result<&mut Self, BuildError> {
        self.intent_mut(intent)?.slot_mut(slot)?.add_validation(rule);
        self.push_prompt(PromptKind::Validation { intent: intent.to_string(), slot: slot.to_string(), rule });
        Ok(self)
    }

    /// Added locale names in insertion order.
    #[must_use]
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Intents in insertion order.
    #[must_use]
    pub fn intents(&self) -> &[IntentBuilder] {
        &self.intents
    }

    /// Custom types in insertion order.
    #[must_use]
    pub fn types(&self) -> &[TypeBuilder] {
        &self.types
    }

    /// Registered prompts in registration order.
    #[must_use]
    pub fn prompts(&self) -> &[PromptKind] {
        &self.prompts
    }

    /// Renders one model per added locale, keyed by locale name.
    ///
    /// Succeeds once; later calls, and later configuration, fail with
    /// [`BuildError::InvalidState`]. A failed build leaves the builder
    /// open for corrections.
    pub fn build(&mut self) -> Result<BTreeMap<String, Model>, BuildError> {
        if self.state == BuilderState::Built {
            return Err(BuildError::InvalidState);
        }

        let mut models = BTreeMap::new();
        for name in &self.locales {
            let locale = self.registry.resolve(name)?;
            models.insert(name.clone(), self.render(&locale)?);
        }

        self.state = BuilderState::Built;
        tracing::debug!("Built {} interaction model(s)", models.len());
        Ok(models)
    }

    /// Moves to `Configured`; fails once built.
    fn configure(&mut self) -> Result<(), BuildError> {
        match self.state {
            BuilderState::Built => Err(BuildError::InvalidState),
            BuilderState::Empty | BuilderState::Configured => {
                self.state = BuilderState::Configured;
                Ok(())
            }
        }
    }

    /// Registers `kind` unless a prompt with the same id exists.
    fn push_prompt(&mut self, kind: PromptKind) {
        if !self.prompts.contains(&kind) {
            self.prompts.push(kind);
        }
    }

    /// Type of the slot, empty when the intent or slot is unknown.
    fn slot_type(&self, intent: &str, slot: &str) -> &str {
        self.intents
            .iter()
            .find(|candidate| candidate.name() == intent)
            .and_then(|candidate| candidate.slot(slot))
            .map_or("", SlotBuilder::type_name)
    }

    /// Values of the named type in `locale`.
    fn type_values(&self, type_name: &str, locale: &Locale) -> Vec<String> {
        self.types.iter().find(|ty| ty.name() == type_name).map(|ty| ty.values_in(locale)).unwrap_or_default()
    }

    /// Renders the model of one locale.
    fn render(&self, locale: &Locale) -> Result<Model, BuildError> {
        let invocation_name = locale.try_first(keys::INVOCATION, &[])?;

        let intents = self.intents.iter().map(|intent| render_intent(intent, locale)).collect();
        let types = self.types.iter().map(|ty| ty.render(locale)).collect();

        let dialog = self.render_dialog(locale);
        let prompts = self
            .prompts
            .iter()
            .map(|kind| self.prompt_for(kind, locale))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Model {
            interaction_model: InteractionModel {
                language_model: LanguageModel { invocation_name, intents, types },
                dialog,
                prompts,
            },
        })
    }

    /// Renders one registered prompt.
    fn prompt_for(&self, kind: &PromptKind, locale: &Locale) -> Result<Prompt, L10nError> {
        let slot_type = match kind {
            PromptKind::Validation { intent, slot, .. } => self.slot_type(intent, slot),
            _ => "",
        };
        render_prompt(kind.id(), &kind.base_key(slot_type), locale)
    }

    /// Dialog section; `None` when no intent takes part and no delegation
    /// strategy is set.
    fn render_dialog(&self, locale: &Locale) -> Option<Dialog> {
        let intents: Vec<DialogIntent> = self
            .intents
            .iter()
            .filter(|intent| intent.has_dialog())
            .map(|intent| self.render_dialog_intent(intent, locale))
            .collect();

        if intents.is_empty() && self.delegation_strategy.is_none() {
            return None;
        }
        Some(Dialog { delegation_strategy: self.delegation_strategy, intents })
    }

    /// Dialog entry of one intent with its prompt references.
    fn render_dialog_intent(&self, intent: &IntentBuilder, locale: &Locale) -> DialogIntent {
        let name = intent.name();
        let confirmation = intent
            .confirmation_required()
            .then(|| PromptKind::IntentConfirmation { intent: name.to_string() }.id());

        let slots = intent
            .slots()
            .iter()
            .map(|slot| {
                let elicitation = slot
                    .elicitation_required()
                    .then(|| PromptKind::Elicitation { intent: name.to_string(), slot: slot.name().to_string() }.id());
                let confirmation = slot.confirmation_required().then(|| {
                    PromptKind::SlotConfirmation { intent: name.to_string(), slot: slot.name().to_string() }.id()
                });
                let validations = slot
                    .validations()
                    .iter()
                    .map(|&rule| SlotValidation {
                        rule,
                        prompt: PromptKind::Validation {
                            intent: name.to_string(),
                            slot: slot.name().to_string(),
                            rule,
                        }
                        .id(),
                        values: if rule.uses_values() {
                            self.type_values(slot.type_name(), locale)
                        } else {
                            Vec::new()
                        },
                    })
                    .collect();

                DialogSlot {
                    name: slot.name().to_string(),
                    type_name: slot.type_name().to_string(),
                    elicitation_required: slot.elicitation_required(),
                    confirmation_required: slot.confirmation_required(),
                    prompts: SlotPrompts { elicitation, confirmation },
                    validations,
                }
            })
            .collect();

        DialogIntent {
            name: name.to_string(),
            delegation_strategy: intent.delegation_strategy(),
            confirmation_required: intent.confirmation_required(),
            prompts: IntentPrompts { confirmation },
            slots,
        }
    }
}

/// Language-model entry of one intent. Missing samples render as `[]`.
fn render_intent(intent: &IntentBuilder, locale: &Locale) -> ModelIntent {
    let samples = match locale.get_all(&keys::samples(intent.name()), &[]) {
        Ok(samples) => samples,
        Err(_) => {
            if !intent.is_builtin() {
                tracing::warn!("Intent '{}' has no samples in locale '{}'", intent.name(), locale.name());
            }
            Vec::new()
        }
    };

    let slots = intent
        .slots()
        .iter()
        .map(|slot| ModelSlot {
            name: slot.name().to_string(),
            type_name: slot.type_name().to_string(),
            samples: locale.get_all(&keys::samples(slot.name()), &[]).unwrap_or_default(),
        })
        .collect();

    ModelIntent { name: intent.name().to_string(), slots, samples }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::model::VariationType;

    #[fixture]
    fn builder() -> ModelBuilder {
        crate::test_utils::init_tracing();
        ModelBuilder::new(LocaleRegistry::new())
    }

    #[rstest]
    fn add_locale_registers_and_seeds_invocation(mut builder: ModelBuilder) {
        builder.add_locale("en-US", "aws status").unwrap();

        let en = builder.registry().resolve("en-US").unwrap();
        assert_that!(en.get_first(keys::INVOCATION, &[]), eq("aws status"));
        assert_that!(builder.locales(), elements_are![eq("en-US")]);
        assert_that!(builder.state(), eq(BuilderState::Configured));
    }

    #[rstest]
    fn add_locale_reuses_registered_locale(mut builder: ModelBuilder) {
        let registered = builder.registry().register(Locale::new("de-DE"), &[]).unwrap();
        registered.set("greeting", ["Hallo"]);

        builder.add_locale("de-DE", "aws status").unwrap().add_locale("de-DE", "aws zustand").unwrap();

        assert_that!(registered.get_first(keys::INVOCATION, &[]), eq("aws zustand"));
        assert_that!(registered.get_first("greeting", &[]), eq("Hallo"));
        assert_that!(builder.locales().len(), eq(1));
    }

    #[rstest]
    fn builders_on_one_registry_share_locale_data() {
        let registry = LocaleRegistry::new();
        let mut first = ModelBuilder::new(registry.clone());
        let mut second = ModelBuilder::new(registry.clone());

        first.add_locale("en-US", "alpha").unwrap();
        assert_that!(registry.default_locale().map(|l| l.name().to_string()), some(eq("en-US")));
        second.add_locale("en-US", "beta").unwrap();

        let models = first.build().unwrap();
        let model = models.get("en-US").unwrap();
        assert_that!(model.interaction_model.language_model.invocation_name, eq("beta"));
        assert_that!(registry.len(), eq(1));
    }

    #[rstest]
    fn renders_language_model_per_locale(mut builder: ModelBuilder) {
        builder.add_locale("en-US", "aws status").unwrap();
        builder
            .add_intent("AWSStatusIntent")
            .unwrap()
            .with_locale_samples("en-US", ["how is A.W.S. in {Region}"])
            .unwrap()
            .add_slot("Region")
            .with_type("RegionType");
        builder.add_type("RegionType").unwrap().with_locale_values("en-US", ["Frankfurt"]).unwrap();

        let models = builder.build().unwrap();

        assert_eq!(
            serde_json::to_value(&models["en-US"]).unwrap(),
            json!({
                "interactionModel": {
                    "languageModel": {
                        "invocationName": "aws status",
                        "intents": [{
                            "name": "AWSStatusIntent",
                            "slots": [{ "name": "Region", "type": "RegionType", "samples": [] }],
                            "samples": ["how is A.W.S. in {Region}"]
                        }],
                        "types": [{
                            "name": "RegionType",
                            "values": [{ "name": { "value": "Frankfurt", "synonyms": [] } }]
                        }]
                    }
                }
            })
        );
    }

    #[rstest]
    fn intent_without_samples_renders_empty_list(mut builder: ModelBuilder) {
        builder.add_locale("en-US", "aws status").unwrap();
        builder.add_intent("AMAZON.HelpIntent").unwrap();
        builder.add_intent("StatusIntent").unwrap();

        let models = builder.build().unwrap();

        let intents = &models["en-US"].interaction_model.language_model.intents;
        assert_that!(intents.len(), eq(2));
        assert_that!(intents.iter().all(|intent| intent.samples.is_empty()), eq(true));
    }

    #[rstest]
    fn one_model_per_locale(mut builder: ModelBuilder) {
        builder.add_locale("en-US", "aws status").unwrap().add_locale("de-DE", "aws zustand").unwrap();

        let models = builder.build().unwrap();

        assert_that!(
            models.keys().map(String::as_str).collect::<Vec<_>>(),
            elements_are![eq(&"de-DE"), eq(&"en-US")]
        );
        assert_that!(models["de-DE"].interaction_model.language_model.invocation_name, eq("aws zustand"));
    }

    #[rstest]
    fn build_is_terminal(mut builder: ModelBuilder) {
        builder.add_locale("en-US", "aws status").unwrap();
        builder.build().unwrap();

        assert_that!(builder.state(), eq(BuilderState::Built));
        assert_that!(builder.build(), err(eq(&BuildError::InvalidState)));
        assert_that!(builder.add_intent("LateIntent").map(|_| ()), err(eq(&BuildError::InvalidState)));
        assert_that!(builder.add_locale("de-DE", "x").map(|_| ()), err(eq(&BuildError::InvalidState)));
    }

    #[rstest]
    fn dialog_absent_without_prompts(mut builder: ModelBuilder) {
        builder.add_locale("en-US", "aws status").unwrap();
        builder.add_intent("AWSStatusIntent").unwrap().add_slot("Region").with_type("RegionType");

        let models = builder.build().unwrap();

        assert_that!(models["en-US"].interaction_model.dialog, none());
        assert_that!(models["en-US"].interaction_model.prompts, is_empty());
    }

    #[rstest]
    fn elicitation_prompt_renders_dialog_and_prompt(mut builder: ModelBuilder) {
        builder.add_locale("en-US", "aws status").unwrap();
        builder.add_intent("AWSStatusIntent").unwrap().add_slot("Region").with_type("RegionType");
        builder
            .registry()
            .resolve("en-US")
            .unwrap()
            .set("AWSStatusIntent_Region_elicit_text", ["Which region?", "For which region?"]);
        builder.add_elicitation_prompt("AWSStatusIntent", "Region").unwrap();
        builder.add_elicitation_prompt("AWSStatusIntent", "Region").unwrap();

        let models = builder.build().unwrap();
        let model = &models["en-US"].interaction_model;

        let dialog = model.dialog.as_ref().unwrap();
        assert_that!(dialog.intents.len(), eq(1));
        let slot = &dialog.intents[0].slots[0];
        assert_that!(slot.elicitation_required, eq(true));
        assert_that!(slot.prompts.elicitation.as_deref(), some(eq("Elicit.Intent-AWSStatusIntent.IntentSlot-Region")));

        assert_that!(model.prompts.len(), eq(1));
        assert_that!(model.prompts[0].id, eq("Elicit.Intent-AWSStatusIntent.IntentSlot-Region"));
        assert_that!(
            model.prompts[0].variations.iter().map(|v| v.kind).collect::<Vec<_>>(),
            elements_are![eq(&VariationType::PlainText), eq(&VariationType::PlainText)]
        );
    }

    #[rstest]
    fn validation_prompt_carries_type_values(mut builder: ModelBuilder) {
        builder.add_locale("en-US", "aws status").unwrap();
        builder.add_intent("AWSStatusIntent").unwrap().add_slot("Region").with_type("RegionType");
        builder.add_type("RegionType").unwrap().with_locale_values("en-US", ["Frankfurt", "Ireland"]).unwrap();
        builder
            .registry()
            .resolve("en-US")
            .unwrap()
            .set("RegionType_isInSet_validation_ssml", ["I only know Frankfurt and Ireland."]);
        builder.add_validation_prompt("AWSStatusIntent", "Region", ValidationRule::IsInSet).unwrap();

        let models = builder.build().unwrap();
        let model = &models["en-US"].interaction_model;

        let validations = &model.dialog.as_ref().unwrap().intents[0].slots[0].validations;
        assert_eq!(
            validations,
            &vec![SlotValidation {
                rule: ValidationRule::IsInSet,
                prompt: "Slot.Validation.Intent-AWSStatusIntent.IntentSlot-Region.isInSet".to_string(),
                values: vec!["Frankfurt".to_string(), "Ireland".to_string()],
            }]
        );
        assert_that!(
            model.prompts[0].variations[0].value,
            eq("<speak>I only know Frankfurt and Ireland.</speak>")
        );
    }

    #[rstest]
    fn intent_confirmation_and_delegation(mut builder: ModelBuilder) {
        builder.add_locale("en-US", "pizza").unwrap();
        builder.add_intent("OrderIntent").unwrap().with_delegation_strategy(DelegationStrategy::SkillResponse);
        builder.registry().resolve("en-US").unwrap().set("OrderIntent_confirm_text", ["Shall I order?"]);
        builder.add_intent_confirmation_prompt("OrderIntent").unwrap();
        builder.with_delegation_strategy(DelegationStrategy::Always).unwrap();

        let models = builder.build().unwrap();
        let dialog = models["en-US"].interaction_model.dialog.clone().unwrap();

        assert_that!(dialog.delegation_strategy, some(eq(DelegationStrategy::Always)));
        assert_that!(dialog.intents[0].delegation_strategy, some(eq(DelegationStrategy::SkillResponse)));
        assert_that!(dialog.intents[0].confirmation_required, eq(true));
        assert_that!(dialog.intents[0].prompts.confirmation.as_deref(), some(eq("Confirm.Intent-OrderIntent")));
    }

    #[rstest]
    fn prompt_without_text_fails_build(mut builder: ModelBuilder) {
        builder.add_locale("en-US", "pizza").unwrap();
        builder.add_intent("OrderIntent").unwrap();
        builder.add_intent_confirmation_prompt("OrderIntent").unwrap();

        let result = builder.build();

        assert_that!(
            result,
            err(eq(&BuildError::Locale(L10nError::NoTranslation { key: "OrderIntent_confirm_text".to_string() })))
        );
        assert_that!(builder.state(), eq(BuilderState::Configured));
    }

    #[rstest]
    #[case::intent("MissingIntent", "Region", BuildError::UnknownIntent("MissingIntent".to_string()))]
    #[case::slot(
        "AWSStatusIntent",
        "Date",
        BuildError::UnknownSlot { intent: "AWSStatusIntent".to_string(), slot: "Date".to_string() }
    )]
    fn prompts_need_known_targets(
        mut builder: ModelBuilder,
        #[case] intent: &str,
        #[case] slot: &str,
        #[case] expected: BuildError,
    ) {
        builder.add_intent("AWSStatusIntent").unwrap().add_slot("Region");

        let result = builder.add_elicitation_prompt(intent, slot).map(|_| ());

        assert_that!(result, err(eq(&expected)));
    }

    #[rstest]
    fn builders_share_the_registry(mut builder: ModelBuilder) {
        let handle = builder.registry().clone();
        builder.add_locale("en-US", "aws status").unwrap();

        assert_that!(handle.contains("en-US"), eq(true));
        assert_that!(handle.same_registry(builder.registry()), eq(true));
    }
}
