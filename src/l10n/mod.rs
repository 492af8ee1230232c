//! Localized text snippets: store, locales, registry and resolution.
//!
//! ```
//! use voice_skill_kit::l10n::{FixedPicker, Locale, LocaleRegistry, Translate};
//!
//! let registry = LocaleRegistry::new();
//! let de = registry.register(Locale::new("de-DE"), &[])?;
//! de.set("greeting", ["Hallo!", "Guten Tag!"]);
//!
//! let locale = registry.resolve("de-DE")?;
//! assert_eq!(locale.get_any_with("greeting", &[], &FixedPicker(1))?, "Guten Tag!");
//! # Ok::<(), voice_skill_kit::l10n::L10nError>(())
//! ```

mod error;
mod format;
pub mod keys;
mod locale;
mod picker;
mod registry;
mod snippets;

pub use error::{
    ErrorKind,
    L10nError,
};
pub use format::format_template;
pub use locale::{
    FallbackLocale,
    Locale,
};
pub use picker::{
    FixedPicker,
    ProcessPicker,
    VariantPicker,
    select_variant,
};
pub use registry::{
    LocaleRegistry,
    RegisterOption,
    default_locale,
    global,
    register,
    reset_global,
    resolve,
    set_default,
};
pub use snippets::{
    Snippets,
    Translate,
};
