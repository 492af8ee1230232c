//! Reserved snippet keys and key derivation.
//!
//! Keys share one namespace per locale. Intent, slot and type texts are
//! addressed by concatenating their names with a fixed suffix.

/// Invocation phrase seeded by `ModelBuilder::add_locale`.
pub const INVOCATION: &str = "skill_invocation";

/// Store listing name. Required by the manifest.
pub const SKILL_NAME: &str = "skill_name";
/// One-sentence store summary. Required by the manifest.
pub const SKILL_SUMMARY: &str = "skill_summary";
/// Full store description. Required by the manifest.
pub const SKILL_DESCRIPTION: &str = "skill_description";
/// Example phrases shown in the store.
pub const SKILL_EXAMPLE_PHRASES: &str = "skill_example_phrases";
/// Store search keywords.
pub const SKILL_KEYWORDS: &str = "skill_keywords";
/// 108x108 icon.
pub const SKILL_SMALL_ICON_URI: &str = "skill_small_icon_uri";
/// 512x512 icon.
pub const SKILL_LARGE_ICON_URI: &str = "skill_large_icon_uri";
/// Link to the privacy policy.
pub const SKILL_PRIVACY_POLICY_URL: &str = "skill_privacy_policy_url";
/// Link to the terms of use.
pub const SKILL_TERMS_OF_USE_URL: &str = "skill_terms_of_use_url";

/// Suffix of sample utterance keys.
pub const SAMPLES_SUFFIX: &str = "_samples";
/// Suffix of custom type value keys.
pub const VALUES_SUFFIX: &str = "_values";
/// Suffix of synonym keys.
pub const SYNONYMS_SUFFIX: &str = "_synonyms";
/// Suffix of plain-text prompt variations.
pub const TEXT_SUFFIX: &str = "_text";
/// Suffix of SSML prompt variations.
pub const SSML_SUFFIX: &str = "_ssml";

/// Sample utterances of an intent or slot.
#[must_use]
pub fn samples(name: &str) -> String {
    format!("{name}{SAMPLES_SUFFIX}")
}

/// Enumerated values of a custom type.
#[must_use]
pub fn values(type_name: &str) -> String {
    format!("{type_name}{VALUES_SUFFIX}")
}

/// Synonyms of one value of a custom type.
#[must_use]
pub fn synonyms(type_name: &str, value: &str) -> String {
    format!("{type_name}_{value}{SYNONYMS_SUFFIX}")
}

/// Base key of the prompt asking for a missing slot value.
#[must_use]
pub fn elicitation(intent: &str, slot: &str) -> String {
    format!("{intent}_{slot}_elicit")
}

/// Base key of the prompt confirming a slot value.
#[must_use]
pub fn slot_confirmation(intent: &str, slot: &str) -> String {
    format!("{intent}_{slot}_confirm")
}

/// Base key of the prompt confirming a whole intent.
#[must_use]
pub fn intent_confirmation(intent: &str) -> String {
    format!("{intent}_confirm")
}

/// Base key of the prompt shown when a value of `type_name` breaks `rule`.
#[must_use]
pub fn validation(type_name: &str, rule: &str) -> String {
    format!("{type_name}_{rule}_validation")
}

/// Plain-text variations of a prompt.
#[must_use]
pub fn text(base: &str) -> String {
    format!("{base}{TEXT_SUFFIX}")
}

/// SSML variations of a prompt.
#[must_use]
pub fn ssml(base: &str) -> String {
    format!("{base}{SSML_SUFFIX}")
}
