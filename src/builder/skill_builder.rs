//! Skill builder: manifest settings on top of the model builder.

use std::collections::{
    BTreeMap,
    HashSet,
};

use crate::config::SkillSettings;
use crate::l10n::{
    L10nError,
    Locale,
    LocaleRegistry,
    Translate,
    keys,
};
use crate::model::{
    Apis,
    CustomApi,
    Endpoint,
    LocaleInfo,
    Manifest,
    Model,
    Permission,
    PrivacyAndCompliance,
    PrivacyFlags,
    PrivacyLocale,
    PublishingInformation,
    Skill,
};

use super::error::BuildError;
use super::intent::IntentBuilder;
use super::model_builder::{
    BuilderState,
    ModelBuilder,
};
use super::type_builder::TypeBuilder;

/// Manifest schema version written by default.
pub const MANIFEST_VERSION: &str = "1.0";

/// Intents every skill must handle.
pub const BUILTIN_INTENTS: [&str; 3] = ["AMAZON.HelpIntent", "AMAZON.CancelIntent", "AMAZON.StopIntent"];

/// Top-level builder: manifest settings plus the wrapped [`ModelBuilder`].
#[derive(Debug, Clone)]
pub struct SkillBuilder {
    /// Source of the store listing texts.
    registry: LocaleRegistry,
    /// `manifestVersion` of the manifest.
    manifest_version: String,
    /// Store category.
    category: String,
    /// ISO country codes the skill is distributed to.
    distribution_countries: Vec<String>,
    /// Whether the skill is available in every country.
    is_available_worldwide: bool,
    /// Notes for the certification team.
    testing_instructions: String,
    /// Backend receiving the requests.
    endpoint: Endpoint,
    /// Privacy and compliance answers.
    privacy: PrivacyFlags,
    /// Requested permission scopes, unique.
    permissions: Vec<String>,
    /// Interaction model of the skill.
    model: ModelBuilder,
    /// Lifecycle of the manifest part.
    state: BuilderState,
}

impl SkillBuilder {
    /// Creates a builder whose model already contains [`BUILTIN_INTENTS`].
    #[must_use]
    pub fn new(registry: LocaleRegistry) -> Self {
        let mut model = ModelBuilder::new(registry.clone());
        for name in BUILTIN_INTENTS {
            model.push_intent(name);
        }

        Self {
            registry,
            manifest_version: MANIFEST_VERSION.to_string(),
            category: String::new(),
            distribution_countries: Vec::new(),
            is_available_worldwide: false,
            testing_instructions: String::new(),
            endpoint: Endpoint::default(),
            privacy: PrivacyFlags::default(),
            permissions: Vec::new(),
            model,
            state: BuilderState::Empty,
        }
    }

    /// Creates a builder preconfigured from validated settings.
    pub fn from_settings(registry: LocaleRegistry, settings: &SkillSettings) -> Result<Self, BuildError> {
        let mut builder = Self::new(registry);
        builder.manifest_version.clone_from(&settings.manifest_version);
        builder.category.clone_from(&settings.category);
        builder.distribution_countries.clone_from(&settings.distribution_countries);
        builder.is_available_worldwide = settings.is_available_worldwide;
        builder.testing_instructions.clone_from(&settings.testing_instructions);
        builder.endpoint = settings.endpoint.clone();
        builder.privacy = settings.privacy;
        builder.permissions.clone_from(&settings.permissions);
        if let Some(strategy) = settings.delegation_strategy {
            builder.model.with_delegation_strategy(strategy)?;
        }
        tracing::debug!("Skill builder configured from settings: {:?}", settings);
        Ok(builder)
    }

    /// Registry the builder reads from and writes to.
    #[must_use]
    pub const fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// Lifecycle state of the manifest part.
    #[must_use]
    pub const fn state(&self) -> BuilderState {
        self.state
    }

    /// Sets the store category, e.g. `ORGANIZERS_AND_ASSISTANTS`.
    pub fn with_category(&mut self, category: impl Into<String>) -> Result<&mut Self, BuildError> {
        self.configure()?;
        self.category = category.into();
        Ok(self)
    }

    /// Replaces the distribution countries.
    pub fn with_countries<I, S>(&mut self, countries: I) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configure()?;
        self.distribution_countries = countries.into_iter().map(Into::into).collect();
        Ok(self)
    }

    /// Sets whether the skill is available in every country.
    pub fn with_worldwide_availability(&mut self, worldwide: bool) -> Result<&mut Self, BuildError> {
        self.configure()?;
        self.is_available_worldwide = worldwide;
        Ok(self)
    }

    /// Sets the backend endpoint.
    pub fn with_endpoint(&mut self, endpoint: Endpoint) -> Result<&mut Self, BuildError> {
        self.configure()?;
        self.endpoint = endpoint;
        Ok(self)
    }

    /// Sets the privacy and compliance answers.
    pub fn with_privacy(&mut self, privacy: PrivacyFlags) -> Result<&mut Self, BuildError> {
        self.configure()?;
        self.privacy = privacy;
        Ok(self)
    }

    /// Sets the notes for the certification team.
    pub fn with_testing_instructions(&mut self, instructions: impl Into<String>) -> Result<&mut Self, BuildError> {
        self.configure()?;
        self.testing_instructions = instructions.into();
        Ok(self)
    }

    /// Requests a permission scope once.
    pub fn with_permission(&mut self, name: impl Into<String>) -> Result<&mut Self, BuildError> {
        self.configure()?;
        let name = name.into();
        if !self.permissions.contains(&name) {
            self.permissions.push(name);
        }
        Ok(self)
    }

    /// See [`ModelBuilder::add_locale`].
    pub fn add_locale(&mut self, name: &str, invocation: &str) -> Result<&mut Self, BuildError> {
        self.configure()?;
        self.model.add_locale(name, invocation)?;
        Ok(self)
    }

    /// Appends an intent. Names are not de-duplicated.
    pub fn add_intent(&mut self, name: &str) -> Result<&mut IntentBuilder, BuildError> {
        self.configure()?;
        self.model.add_intent(name)
    }

    /// Appends a custom slot type. Names are not de-duplicated.
    pub fn add_type(&mut self, name: &str) -> Result<&mut TypeBuilder, BuildError> {
        self.configure()?;
        self.model.add_type(name)
    }

    /// Direct access to the wrapped model builder, e.g. for prompts.
    pub fn model_mut(&mut self) -> Result<&mut ModelBuilder, BuildError> {
        self.configure()?;
        Ok(&mut self.model)
    }

    /// The wrapped model builder.
    #[must_use]
    pub const fn model(&self) -> &ModelBuilder {
        &self.model
    }

    /// Checks that every slot refers to a declared type.
    ///
    /// # Errors
    /// - [`BuildError::NoTypesDefined`] when a slot exists but no type does
    /// - [`BuildError::UndeclaredType`] when a slot's type is not declared
    pub fn validate_types(&self) -> Result<(), BuildError> {
        let declared: HashSet<&str> = self.model.types().iter().map(TypeBuilder::name).collect();

        for intent in self.model.intents() {
            for slot in intent.slots() {
                if declared.is_empty() {
                    return Err(BuildError::NoTypesDefined {
                        intent: intent.name().to_string(),
                        slot: slot.name().to_string(),
                    });
                }
                if !declared.contains(slot.type_name()) {
                    return Err(BuildError::UndeclaredType {
                        intent: intent.name().to_string(),
                        slot: slot.name().to_string(),
                        type_name: slot.type_name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Renders the manifest. Closes skill-level configuration on success.
    pub fn build(&mut self) -> Result<Skill, BuildError> {
        if self.state == BuilderState::Built {
            return Err(BuildError::InvalidState);
        }
        self.validate_types()?;

        let mut locales = BTreeMap::new();
        let mut privacy_locales = BTreeMap::new();
        for name in self.model.locales() {
            let locale = self.registry.resolve(name)?;
            locales.insert(name.clone(), locale_info(&locale)?);
            privacy_locales.insert(name.clone(), privacy_locale(&locale));
        }

        let skill = Skill {
            manifest: Manifest {
                manifest_version: self.manifest_version.clone(),
                publishing_information: PublishingInformation {
                    locales,
                    is_available_worldwide: self.is_available_worldwide,
                    distribution_countries: self.distribution_countries.clone(),
                    testing_instructions: self.testing_instructions.clone(),
                    category: self.category.clone(),
                },
                apis: Apis { custom: CustomApi { endpoint: self.endpoint.clone() } },
                permissions: self.permissions.iter().map(|name| Permission { name: name.clone() }).collect(),
                privacy_and_compliance: PrivacyAndCompliance { flags: self.privacy, locales: privacy_locales },
            },
        };

        self.state = BuilderState::Built;
        tracing::debug!("Built skill manifest for {} locale(s)", skill.manifest.publishing_information.locales.len());
        Ok(skill)
    }

    /// Validates types, then renders one interaction model per locale.
    pub fn build_models(&mut self) -> Result<BTreeMap<String, Model>, BuildError> {
        self.validate_types()?;
        self.model.build()
    }

    /// Moves to `Configured`; fails once the manifest is built.
    fn configure(&mut self) -> Result<(), BuildError> {
        match self.state {
            BuilderState::Built => Err(BuildError::InvalidState),
            BuilderState::Empty | BuilderState::Configured => {
                self.state = BuilderState::Configured;
                Ok(())
            }
        }
    }
}

/// Store listing of one locale. Name, summary and description are
/// required.
fn locale_info(locale: &Locale) -> Result<LocaleInfo, L10nError> {
    Ok(LocaleInfo {
        name: locale.try_first(keys::SKILL_NAME, &[])?,
        summary: locale.try_first(keys::SKILL_SUMMARY, &[])?,
        description: locale.try_first(keys::SKILL_DESCRIPTION, &[])?,
        example_phrases: locale.get_all(keys::SKILL_EXAMPLE_PHRASES, &[]).unwrap_or_default(),
        keywords: locale.get_all(keys::SKILL_KEYWORDS, &[]).unwrap_or_default(),
        small_icon_uri: locale.try_first(keys::SKILL_SMALL_ICON_URI, &[]).ok(),
        large_icon_uri: locale.try_first(keys::SKILL_LARGE_ICON_URI, &[]).ok(),
    })
}

/// Privacy policy and terms of use links of one locale.
fn privacy_locale(locale: &Locale) -> PrivacyLocale {
    PrivacyLocale {
        privacy_policy_url: locale.try_first(keys::SKILL_PRIVACY_POLICY_URL, &[]).ok(),
        terms_of_use_url: locale.try_first(keys::SKILL_TERMS_OF_USE_URL, &[]).ok(),
    }
}
