//! Settings schema and its validation errors.

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::builder::MANIFEST_VERSION;
use crate::model::{
    DelegationStrategy,
    Endpoint,
    PrivacyFlags,
};

/// One invalid settings field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "distributionCountries[0]")
    pub field_path: String,
    /// What is wrong and how to fix it.
    pub message: String,
}

impl ValidationError {
    /// Creates an error for `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Errors of loading or updating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Every field that failed validation.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The settings file could not be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The settings file is not valid JSON for [`SkillSettings`].
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Project-level skill settings (`.voice-skill.json`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillSettings {
    /// `manifestVersion` of the generated manifest.
    pub manifest_version: String,

    /// Store category, e.g. `ORGANIZERS_AND_ASSISTANTS`.
    pub category: String,

    /// ISO 3166-1 alpha-2 codes.
    ///
    /// Mutually exclusive with `is_available_worldwide`.
    pub distribution_countries: Vec<String>,
    /// Publish to every country.
    pub is_available_worldwide: bool,

    /// Backend receiving the requests; a Lambda ARN or an HTTPS URL.
    pub endpoint: Endpoint,
    /// Privacy and compliance answers.
    pub privacy: PrivacyFlags,
    /// Requested permission scopes.
    pub permissions: Vec<String>,
    /// Notes for the certification team.
    pub testing_instructions: String,

    /// Dialog delegation for the whole model. Unset means no dialog-level
    /// strategy is emitted.
    pub delegation_strategy: Option<DelegationStrategy>,

    /// Directory the skill package is written to, relative to the project root.
    pub output_dir: String,
}

impl SkillSettings {
    /// Checks every field and reports all problems at once.
    ///
    /// # Errors
    /// - Required field is empty
    /// - Invalid country code
    /// - Endpoint is neither a Lambda ARN nor an HTTPS URL
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.manifest_version.is_empty() {
            errors.push(ValidationError::new(
                "manifestVersion",
                format!("The manifest version cannot be empty. Example: \"{MANIFEST_VERSION}\""),
            ));
        }

        if self.category.is_empty() {
            errors.push(ValidationError::new(
                "category",
                "The category cannot be empty. Example: \"ORGANIZERS_AND_ASSISTANTS\"",
            ));
        }

        for (index, country) in self.distribution_countries.iter().enumerate() {
            if !is_country_code(country) {
                errors.push(ValidationError::new(
                    format!("distributionCountries[{index}]"),
                    format!("Invalid country code '{country}'. Use two upper-case letters, e.g. \"US\""),
                ));
            }
        }

        if self.is_available_worldwide && !self.distribution_countries.is_empty() {
            errors.push(ValidationError::new(
                "isAvailableWorldwide/distributionCountries",
                "Cannot specify 'distributionCountries' for a skill available worldwide. Please use only one",
            ));
        }

        let uri = &self.endpoint.uri;
        if uri.is_empty() {
            errors.push(ValidationError::new(
                "endpoint.uri",
                "The endpoint cannot be empty. Specify a Lambda ARN or an HTTPS URL",
            ));
        } else if !uri.starts_with("arn:") && !uri.starts_with("https://") {
            errors.push(ValidationError::new(
                "endpoint.uri",
                format!("Invalid endpoint '{uri}'. Expected a Lambda ARN (\"arn:...\") or an HTTPS URL"),
            ));
        }

        if self.output_dir.is_empty() {
            errors.push(ValidationError::new(
                "outputDir",
                "The output directory cannot be empty. Example: \"skill-package\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Two upper-case ASCII letters.
fn is_country_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}

impl Default for SkillSettings {
    fn default() -> Self {
        Self {
            manifest_version: MANIFEST_VERSION.to_string(),
            category: "ORGANIZERS_AND_ASSISTANTS".to_string(),
            distribution_countries: Vec::new(),
            is_available_worldwide: true,
            endpoint: Endpoint {
                uri: "arn:aws:lambda:us-east-1:000000000000:function:skill".to_string(),
                ssl_certificate_type: None,
            },
            privacy: PrivacyFlags::default(),
            permissions: Vec::new(),
            testing_instructions: String::new(),
            delegation_strategy: None,
            output_dir: "skill-package".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = SkillSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"category": "GAMES", "privacy": {"containsAds": true}}"#;

        let settings: SkillSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.category, eq("GAMES"));
        assert_that!(settings.manifest_version, eq("1.0"));
        assert_that!(settings.privacy.contains_ads, eq(true));
        assert_that!(settings.privacy.is_child_directed, eq(false));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: SkillSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings, eq(&SkillSettings::default()));
    }

    #[rstest]
    fn deserialize_delegation_strategy() {
        let json = r#"{"delegationStrategy": "SKILL_RESPONSE"}"#;

        let settings: SkillSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.delegation_strategy, some(eq(DelegationStrategy::SkillResponse)));
    }

    #[rstest]
    fn validate_invalid_category_empty() {
        let settings = SkillSettings { category: String::new(), ..SkillSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("category")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    #[case("us")]
    #[case("USA")]
    #[case("U1")]
    fn validate_invalid_country_code(#[case] code: &str) {
        let settings = SkillSettings {
            is_available_worldwide: false,
            distribution_countries: vec!["DE".to_string(), code.to_string()],
            ..SkillSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("distributionCountries[1]")),
                field!(ValidationError.message, contains_substring(code))
            ]])
        );
    }

    #[rstest]
    fn validate_worldwide_with_countries() {
        let settings =
            SkillSettings { distribution_countries: vec!["US".to_string()], ..SkillSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(
                ValidationError.field_path,
                eq("isAvailableWorldwide/distributionCountries")
            )])
        );
    }

    #[rstest]
    #[case("", "cannot be empty")]
    #[case("http://example.com/skill", "Invalid endpoint")]
    fn validate_invalid_endpoint(#[case] uri: &str, #[case] message: &str) {
        let settings = SkillSettings {
            endpoint: Endpoint { uri: uri.to_string(), ssl_certificate_type: None },
            ..SkillSettings::default()
        };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("endpoint.uri")),
                field!(ValidationError.message, contains_substring(message))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = SkillSettings {
            manifest_version: String::new(),
            category: String::new(),
            ..SkillSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let error_message = format!("{}", ConfigError::ValidationErrors(errors));

        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. manifestVersion"));
        assert_that!(error_message, contains_substring("2. category"));
    }
}
