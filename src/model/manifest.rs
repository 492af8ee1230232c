//! Skill manifest document (`skill.json`).

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};

/// Root of `skill.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// The manifest itself.
    pub manifest: Manifest,
}

/// Store listing, endpoint, permissions and compliance answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Schema version, e.g. `1.0`.
    pub manifest_version: String,
    /// Store listing.
    pub publishing_information: PublishingInformation,
    /// Interfaces the skill implements.
    pub apis: Apis,
    /// Requested permission scopes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<Permission>,
    /// Privacy and compliance answers.
    pub privacy_and_compliance: PrivacyAndCompliance,
}

/// Where and how the skill is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingInformation {
    /// Listing texts by locale name.
    pub locales: BTreeMap<String, LocaleInfo>,
    /// Publish to every country.
    pub is_available_worldwide: bool,
    /// ISO country codes when not worldwide.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub distribution_countries: Vec<String>,
    /// Notes for the certification team.
    pub testing_instructions: String,
    /// Store category.
    pub category: String,
}

/// Store listing texts of one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    /// Skill name.
    pub name: String,
    /// One-sentence summary.
    pub summary: String,
    /// Full description.
    pub description: String,
    /// Example phrases.
    pub example_phrases: Vec<String>,
    /// Search keywords.
    pub keywords: Vec<String>,
    /// 108x108 icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_icon_uri: Option<String>,
    /// 512x512 icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_icon_uri: Option<String>,
}

/// Interfaces the skill implements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apis {
    /// The custom voice interface.
    pub custom: CustomApi,
}

/// Custom interface settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomApi {
    /// Backend receiving the requests.
    pub endpoint: Endpoint,
}

/// Backend receiving the requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Lambda ARN or HTTPS URL.
    pub uri: String,
    /// Certificate kind of an HTTPS endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_certificate_type: Option<String>,
}

/// One requested permission scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Scope name.
    pub name: String,
}

/// Yes/no answers of the privacy and compliance form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacyFlags {
    /// Offers in-skill purchases.
    pub allows_purchases: bool,
    /// Collects personal information.
    pub uses_personal_info: bool,
    /// Directed at children.
    pub is_child_directed: bool,
    /// May be exported to every country.
    pub is_export_compliant: bool,
    /// Plays advertisements.
    pub contains_ads: bool,
}

/// Privacy answers plus per-locale links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyAndCompliance {
    /// Yes/no answers.
    #[serde(flatten)]
    pub flags: PrivacyFlags,
    /// Links by locale name.
    pub locales: BTreeMap<String, PrivacyLocale>,
}

/// Privacy links of one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyLocale {
    /// Privacy policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_policy_url: Option<String>,
    /// Terms of use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_of_use_url: Option<String>,
}
