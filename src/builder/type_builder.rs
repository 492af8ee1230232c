//! Custom slot types.

use crate::l10n::{
    LocaleRegistry,
    Translate,
    keys,
};
use crate::model::{
    ModelType,
    TypeValue,
    TypeValueName,
};

use super::error::BuildError;

/// Accumulates one custom slot type. Values and synonyms live in the
/// shared locale registry.
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    /// Registry the values are written to.
    registry: LocaleRegistry,
    /// Type name, e.g. `RegionType`.
    name: String,
}

impl TypeBuilder {
    /// Creates a type without values.
    pub(crate) const fn new(registry: LocaleRegistry, name: String) -> Self {
        Self { registry, name }
    }

    /// Type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores the enumerated values under `<type>_values` in `locale`.
    pub fn with_locale_values<I, S>(&mut self, locale: &str, values: I) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.resolve(locale)?.set(keys::values(&self.name), values);
        Ok(self)
    }

    /// Stores synonyms of one value under `<type>_<value>_synonyms`.
    pub fn with_locale_synonyms<I, S>(
        &mut self,
        locale: &str,
        value: &str,
        synonyms: I,
    ) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry.resolve(locale)?.set(keys::synonyms(&self.name, value), synonyms);
        Ok(self)
    }

    /// Values of this type in `locale`; empty when none were stored.
    pub(crate) fn values_in(&self, locale: &impl Translate) -> Vec<String> {
        locale.get_all(&keys::values(&self.name), &[]).unwrap_or_else(|_| {
            tracing::warn!("Type '{}' has no values", self.name);
            Vec::new()
        })
    }

    /// Language-model entry with each value's synonyms.
    pub(crate) fn render(&self, locale: &impl Translate) -> ModelType {
        let values = self
            .values_in(locale)
            .into_iter()
            .map(|value| {
                let synonyms =
                    locale.get_all(&keys::synonyms(&self.name, &value), &[]).unwrap_or_default();
                TypeValue { id: None, name: TypeValueName { value, synonyms } }
            })
            .collect();

        ModelType { name: self.name.clone(), values }
    }
}
