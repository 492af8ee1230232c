//! Locale registry and the re-initialisable process default.

use std::collections::BTreeMap;
use std::sync::{
    Arc,
    LazyLock,
    PoisonError,
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
};

use super::error::L10nError;
use super::locale::{
    FallbackLocale,
    Locale,
};

/// Named effects applied by [`LocaleRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOption {
    /// Make the locale the default even if another one already is.
    AsDefault,
}

/// Catalogue shared by all handles of one registry.
#[derive(Debug, Default)]
struct RegistryState {
    /// Registered locales by exact name.
    locales: BTreeMap<String, Arc<Locale>>,
    /// Name of the default locale.
    default: Option<String>,
}

/// Mapping from locale name to [`Locale`] with one default locale.
///
/// The registry is a cheap handle: clones share the same catalogue, so it
/// can be handed to every component that resolves locales. Mutation goes
/// through an internal read-mostly lock.
#[derive(Debug, Clone, Default)]
pub struct LocaleRegistry {
    /// Shared catalogue.
    state: Arc<RwLock<RegistryState>>,
}

impl LocaleRegistry {
    /// Creates an empty, independent registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `locale` under its name.
    ///
    /// The first locale registered into an empty registry becomes the
    /// default unless another one is registered with
    /// [`RegisterOption::AsDefault`] later.
    pub fn register(
        &self,
        locale: impl Into<Arc<Locale>>,
        options: &[RegisterOption],
    ) -> Result<Arc<Locale>, L10nError> {
        let locale = locale.into();
        let name = locale.name().to_string();
        let mut state = self.write();

        if state.locales.contains_key(&name) {
            return Err(L10nError::AlreadyRegistered(name));
        }

        let as_default = options.contains(&RegisterOption::AsDefault);
        if as_default || state.default.is_none() {
            state.default = Some(name.clone());
        }
        tracing::debug!("Registered locale '{}' (default: {:?})", name, state.default);
        state.locales.insert(name, Arc::clone(&locale));

        Ok(locale)
    }

    /// Exact-name lookup; `"en"` does not resolve `"en-US"`.
    pub fn resolve(&self, name: &str) -> Result<Arc<Locale>, L10nError> {
        self.read()
            .locales
            .get(name)
            .cloned()
            .ok_or_else(|| L10nError::NotFound(name.to_string()))
    }

    /// Resolves `name` and wraps it into its fallback chain, ending with the
    /// current default locale.
    pub fn resolve_with_fallback(&self, name: &str) -> Result<FallbackLocale, L10nError> {
        let chain = FallbackLocale::from_locale(self.resolve(name)?);
        Ok(match self.default_locale() {
            Some(default) => chain.or(default),
            None => chain,
        })
    }

    /// Makes the registered locale `name` the default.
    pub fn set_default(&self, name: &str) -> Result<(), L10nError> {
        let mut state = self.write();
        if !state.locales.contains_key(name) {
            return Err(L10nError::NotFound(name.to_string()));
        }
        tracing::debug!("Default locale set to '{}'", name);
        state.default = Some(name.to_string());
        Ok(())
    }

    /// The current default locale, `None` on an empty registry.
    #[must_use]
    pub fn default_locale(&self) -> Option<Arc<Locale>> {
        let state = self.read();
        state.default.as_ref().and_then(|name| state.locales.get(name)).cloned()
    }

    /// Whether a locale named `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.read().locales.contains_key(name)
    }

    /// Number of registered locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().locales.len()
    }

    /// Whether no locale is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().locales.is_empty()
    }

    /// Registered names in ascending order.
    #[must_use]
    pub fn locale_names(&self) -> Vec<String> {
        self.read().locales.keys().cloned().collect()
    }

    /// Returns true if both handles share the same catalogue.
    #[must_use]
    pub fn same_registry(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Read access, recovering from a poisoned lock.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access, recovering from a poisoned lock.
    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Process default registry, replaceable through [`reset_global`].
static GLOBAL_REGISTRY: LazyLock<RwLock<LocaleRegistry>> = LazyLock::new(Default::default);

/// Handle to the process default registry.
#[must_use]
pub fn global() -> LocaleRegistry {
    GLOBAL_REGISTRY.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Replaces the process default registry with an empty one and returns it.
///
/// Handles obtained before the reset keep pointing at the old catalogue.
pub fn reset_global() -> LocaleRegistry {
    let fresh = LocaleRegistry::new();
    *GLOBAL_REGISTRY.write().unwrap_or_else(PoisonError::into_inner) = fresh.clone();
    tracing::debug!("Process default locale registry reset");
    fresh
}

/// [`LocaleRegistry::register`] on the process default registry.
pub fn register(
    locale: impl Into<Arc<Locale>>,
    options: &[RegisterOption],
) -> Result<Arc<Locale>, L10nError> {
    global().register(locale, options)
}

/// [`LocaleRegistry::resolve`] on the process default registry.
pub fn resolve(name: &str) -> Result<Arc<Locale>, L10nError> {
    global().resolve(name)
}

/// [`LocaleRegistry::set_default`] on the process default registry.
pub fn set_default(name: &str) -> Result<(), L10nError> {
    global().set_default(name)
}

/// [`LocaleRegistry::default_locale`] on the process default registry.
#[must_use]
pub fn default_locale() -> Option<Arc<Locale>> {
    global().default_locale()
}
