//! Named locales and the explicit fallback decorator.

use std::collections::HashSet;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
    RwLockReadGuard,
};

use super::error::L10nError;
use super::snippets::{
    Snippets,
    Translate,
};

/// A named language/region variant with its own snippets.
///
/// Name and fallback are fixed at construction. Snippets stay writable
/// through [`Locale::set`], also after the locale has been registered.
///
/// Lookups never consult the fallback; wrap the locale in a
/// [`FallbackLocale`] for that.
#[derive(Debug)]
pub struct Locale {
    /// Exact name, e.g. `en-US`.
    name: String,
    /// Own snippets, writable after registration.
    snippets: RwLock<Snippets>,
    /// Locale consulted by [`FallbackLocale`] after this one.
    fallback: Option<Arc<Locale>>,
}

impl Locale {
    /// Creates a locale without snippets or fallback.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), snippets: RwLock::new(Snippets::new()), fallback: None }
    }

    /// Replaces the snippets.
    #[must_use]
    pub fn with_snippets(self, snippets: Snippets) -> Self {
        Self { snippets: RwLock::new(snippets), ..self }
    }

    /// Sets the locale that follows this one in a fallback chain.
    #[must_use]
    pub fn with_fallback(self, fallback: Arc<Self>) -> Self {
        Self { fallback: Some(fallback), ..self }
    }

    /// Locale name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Next locale of the fallback chain.
    #[must_use]
    pub const fn fallback(&self) -> Option<&Arc<Self>> {
        self.fallback.as_ref()
    }

    /// Overwrites the variants stored for `key`.
    pub fn set<I, S>(&self, key: impl Into<String>, variants: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.snippets.write().unwrap_or_else(PoisonError::into_inner).set(key, variants);
    }

    /// Whether `key` is stored, even with an empty variant list.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Copy of the current snippets.
    #[must_use]
    pub fn snippets(&self) -> Snippets {
        self.read().clone()
    }

    /// Read access, recovering from a poisoned lock.
    fn read(&self) -> RwLockReadGuard<'_, Snippets> {
        self.snippets.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Translate for Locale {
    fn variants(&self, key: &str) -> Result<Vec<String>, L10nError> {
        self.read().variants(key)
    }
}

/// Tries each locale of a chain in order and returns the first translation
/// found. Only [`L10nError::NoTranslation`] moves on to the next locale.
///
/// A locale name appears at most once in the chain, so cyclic or repeated
/// fallback pointers terminate.
#[derive(Debug, Clone)]
pub struct FallbackLocale {
    /// Locale tried first.
    primary: Arc<Locale>,
    /// Locales tried next, in order.
    rest: Vec<Arc<Locale>>,
}

impl FallbackLocale {
    /// Chain of `primary` alone.
    #[must_use]
    pub const fn new(primary: Arc<Locale>) -> Self {
        Self { primary, rest: Vec::new() }
    }

    /// Builds the chain from `locale` by following its fallback pointers.
    #[must_use]
    pub fn from_locale(locale: Arc<Locale>) -> Self {
        let mut next = locale.fallback().cloned();
        let mut chain = Self::new(locale);
        while let Some(current) = next {
            if chain.contains(current.name()) {
                tracing::warn!("Fallback cycle detected at locale '{}'", current.name());
                break;
            }
            next = current.fallback().cloned();
            chain.rest.push(current);
        }
        chain
    }

    /// Appends `secondary` unless a locale with its name is already chained.
    #[must_use]
    pub fn or(mut self, secondary: Arc<Locale>) -> Self {
        if !self.contains(secondary.name()) {
            self.rest.push(secondary);
        }
        self
    }

    /// Locale tried first.
    #[must_use]
    pub const fn primary(&self) -> &Arc<Locale> {
        &self.primary
    }

    /// Locale names in lookup order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.locales().map(|locale| locale.name())
    }

    /// Locales in lookup order.
    fn locales(&self) -> impl Iterator<Item = &Arc<Locale>> {
        std::iter::once(&self.primary).chain(&self.rest)
    }

    /// Whether a locale named `name` is chained.
    fn contains(&self, name: &str) -> bool {
        let seen: HashSet<&str> = self.names().collect();
        seen.contains(name)
    }
}

impl Translate for FallbackLocale {
    fn variants(&self, key: &str) -> Result<Vec<String>, L10nError> {
        for locale in self.locales() {
            match locale.variants(key) {
                Ok(variants) => return Ok(variants),
                Err(L10nError::NoTranslation { .. }) => {
                    tracing::trace!("No '{}' in locale '{}', trying next", key, locale.name());
                }
                Err(other) => return Err(other),
            }
        }
        Err(L10nError::no_translation(key))
    }
}
