//! Dialog prompts and their variations.

use crate::l10n::{
    L10nError,
    Translate,
    keys,
};
use crate::model::{
    Prompt,
    ValidationRule,
    Variation,
    VariationType,
};

/// What a prompt is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// Asks for a missing slot value.
    Elicitation {
        /// Intent owning the slot.
        intent: String,
        /// Elicited slot.
        slot: String,
    },
    /// Confirms a slot value.
    SlotConfirmation {
        /// Intent owning the slot.
        intent: String,
        /// Confirmed slot.
        slot: String,
    },
    /// Confirms the whole intent.
    IntentConfirmation {
        /// Confirmed intent.
        intent: String,
    },
    /// Re-prompts after a slot value broke `rule`.
    Validation {
        /// Intent owning the slot.
        intent: String,
        /// Validated slot.
        slot: String,
        /// Rule the value broke.
        rule: ValidationRule,
    },
}

impl PromptKind {
    /// Identifier referenced from the dialog section.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Elicitation { intent, slot } => format!("Elicit.Intent-{intent}.IntentSlot-{slot}"),
            Self::SlotConfirmation { intent, slot } => format!("Confirm.Intent-{intent}.IntentSlot-{slot}"),
            Self::IntentConfirmation { intent } => format!("Confirm.Intent-{intent}"),
            Self::Validation { intent, slot, rule } => {
                format!("Slot.Validation.Intent-{intent}.IntentSlot-{slot}.{}", rule.as_str())
            }
        }
    }

    /// Base snippet key. Validation prompts are keyed by the slot's type
    /// so all slots of a type share their wording.
    #[must_use]
    pub fn base_key(&self, slot_type: &str) -> String {
        match self {
            Self::Elicitation { intent, slot } => keys::elicitation(intent, slot),
            Self::SlotConfirmation { intent, slot } => keys::slot_confirmation(intent, slot),
            Self::IntentConfirmation { intent } => keys::intent_confirmation(intent),
            Self::Validation { rule, .. } => keys::validation(slot_type, rule.as_str()),
        }
    }
}

/// Collects the `<base>_text` and `<base>_ssml` variations of a prompt.
///
/// SSML variations are wrapped in `<speak>` unless they already are.
pub(crate) fn render_prompt(id: String, base: &str, locale: &impl Translate) -> Result<Prompt, L10nError> {
    let text_key = keys::text(base);
    let plain = locale.get_all(&text_key, &[]).unwrap_or_default();
    let ssml = locale.get_all(&keys::ssml(base), &[]).unwrap_or_default();

    if plain.is_empty() && ssml.is_empty() {
        return Err(L10nError::no_translation(text_key));
    }

    let variations = plain
        .into_iter()
        .map(|value| Variation { kind: VariationType::PlainText, value })
        .chain(ssml.into_iter().map(|value| Variation { kind: VariationType::Ssml, value: wrap_speak(value) }))
        .collect();

    Ok(Prompt { id, variations })
}

/// Wraps `value` in `<speak>` unless it already starts with it.
fn wrap_speak(value: String) -> String {
    if value.trim_start().starts_with("<speak>") { value } else { format!("<speak>{value}</speak>") }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::l10n::Snippets;

    fn elicit_region() -> PromptKind {
        PromptKind::Elicitation { intent: "AWSStatusIntent".to_string(), slot: "Region".to_string() }
    }

    #[rstest]
    #[case(elicit_region(), "Elicit.Intent-AWSStatusIntent.IntentSlot-Region")]
    #[case(PromptKind::IntentConfirmation { intent: "OrderIntent".to_string() }, "Confirm.Intent-OrderIntent")]
    #[case(
        PromptKind::Validation {
            intent: "AWSStatusIntent".to_string(),
            slot: "Region".to_string(),
            rule: ValidationRule::IsInSet,
        },
        "Slot.Validation.Intent-AWSStatusIntent.IntentSlot-Region.isInSet"
    )]
    fn prompt_ids(#[case] kind: PromptKind, #[case] expected: &str) {
        assert_that!(kind.id(), eq(expected));
    }

    #[rstest]
    fn validation_key_uses_slot_type() {
        let kind = PromptKind::Validation {
            intent: "AWSStatusIntent".to_string(),
            slot: "Region".to_string(),
            rule: ValidationRule::IsNotInSet,
        };

        assert_that!(kind.base_key("RegionType"), eq("RegionType_isNotInSet_validation"));
        assert_that!(elicit_region().base_key("RegionType"), eq("AWSStatusIntent_Region_elicit"));
    }

    #[rstest]
    fn renders_text_then_ssml() {
        let snippets: Snippets = [
            ("AWSStatusIntent_Region_elicit_text", vec!["Which region?"]),
            (
                "AWSStatusIntent_Region_elicit_ssml",
                vec!["Which <emphasis>region</emphasis>?", "<speak>Region, please.</speak>"],
            ),
        ]
        .into_iter()
        .collect();

        let prompt = render_prompt("Elicit.1".to_string(), "AWSStatusIntent_Region_elicit", &snippets).unwrap();

        assert_eq!(
            prompt.variations,
            vec![
                Variation { kind: VariationType::PlainText, value: "Which region?".to_string() },
                Variation {
                    kind: VariationType::Ssml,
                    value: "<speak>Which <emphasis>region</emphasis>?</speak>".to_string(),
                },
                Variation { kind: VariationType::Ssml, value: "<speak>Region, please.</speak>".to_string() },
            ]
        );
    }

    #[rstest]
    fn missing_variations_are_no_translation() {
        let result = render_prompt("Confirm.1".to_string(), "OrderIntent_confirm", &Snippets::new());

        assert_that!(result, err(eq(&L10nError::no_translation("OrderIntent_confirm_text"))));
    }
}
