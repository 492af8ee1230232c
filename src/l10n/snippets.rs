//! Key → text-variant store and the shared lookup contract.

use std::collections::BTreeMap;
use std::fmt::Display;

use super::error::L10nError;
use super::format::format_template;
use super::picker::{
    ProcessPicker,
    VariantPicker,
    select_variant,
};

/// Lookup contract shared by [`Snippets`], [`super::Locale`] and
/// [`super::FallbackLocale`].
///
/// Implementors only provide [`Translate::variants`]; formatting and
/// selection are layered on top of it.
pub trait Translate {
    /// Returns the raw (unformatted) variants for `key`.
    ///
    /// Fails with [`L10nError::NoTranslation`] when the key is absent or
    /// its variant list is empty.
    fn variants(&self, key: &str) -> Result<Vec<String>, L10nError>;

    /// First variant, formatted.
    fn try_first(&self, key: &str, args: &[&dyn Display]) -> Result<String, L10nError> {
        let variants = self.variants(key)?;
        variants
            .first()
            .map(|template| format_template(template, args))
            .ok_or_else(|| L10nError::no_translation(key))
    }

    /// First variant, formatted, or `""` when there is no translation.
    ///
    /// Never use this where an empty translation must be told apart from a
    /// missing one; use [`Translate::try_first`] instead.
    fn get_first(&self, key: &str, args: &[&dyn Display]) -> String {
        self.try_first(key, args).unwrap_or_default()
    }

    /// Alias of [`Translate::get_first`].
    fn get(&self, key: &str, args: &[&dyn Display]) -> String {
        self.get_first(key, args)
    }

    /// One variant chosen by the process-wide random source, formatted.
    fn get_any(&self, key: &str, args: &[&dyn Display]) -> Result<String, L10nError> {
        self.get_any_with(key, args, &ProcessPicker)
    }

    /// One variant chosen by `picker`, formatted. A single variant is
    /// returned without consulting the picker.
    fn get_any_with(
        &self,
        key: &str,
        args: &[&dyn Display],
        picker: &dyn VariantPicker,
    ) -> Result<String, L10nError> {
        let variants = self.variants(key)?;
        let draw = if variants.len() == 1 { 0 } else { picker.pick(variants.len()) };
        select_variant(&variants, draw)
            .map(|template| format_template(template, args))
            .ok_or_else(|| L10nError::no_translation(key))
    }

    /// Every variant, each formatted with the same `args`.
    fn get_all(&self, key: &str, args: &[&dyn Display]) -> Result<Vec<String>, L10nError> {
        let variants = self.variants(key)?;
        Ok(variants.iter().map(|template| format_template(template, args)).collect())
    }
}

/// Ordered mapping from key to interchangeable text variants.
///
/// An empty variant list may be stored; lookups treat it exactly like an
/// absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippets {
    /// Variants by key.
    entries: BTreeMap<String, Vec<String>>,
}

impl Snippets {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the variants for `key`.
    pub fn set<I, S>(&mut self, key: impl Into<String>, variants: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.insert(key.into(), variants.into_iter().map(Into::into).collect());
    }

    /// Raw stored list, including an empty one.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Whether `key` is stored, even with an empty variant list.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stored keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translate for Snippets {
    fn variants(&self, key: &str) -> Result<Vec<String>, L10nError> {
        match self.entries.get(key) {
            Some(variants) if !variants.is_empty() => Ok(variants.clone()),
            _ => Err(L10nError::no_translation(key)),
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for Snippets
where
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut snippets = Self::new();
        for (key, variants) in iter {
            snippets.set(key, variants);
        }
        snippets
    }
}
