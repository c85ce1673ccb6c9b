//! Locale catalogs for the shell.
//!
//! # Design
//! - Each catalog is a JSON tree embedded at build time; keys are dotted paths.
//! - Missing keys resolve against English, then the caller's literal.
//! - Arabic is flagged right-to-left in its catalog `meta` block.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// Languages the shell ships catalogs for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// Arabic.
    Ar,
    /// English.
    En,
    /// Spanish.
    Es,
    /// French.
    Fr,
    /// Portuguese.
    Pt,
}

impl LocaleCode {
    /// Every shipped locale, in selector order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [Self::Ar, Self::En, Self::Es, Self::Fr, Self::Pt]
    }

    /// Primary language subtag, also the catalog file stem.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Pt => "pt",
        }
    }

    /// Name of the language written in that language.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ar => "العربية",
            Self::En => "English",
            Self::Es => "Español",
            Self::Fr => "Français",
            Self::Pt => "Português",
        }
    }

    /// Match a browser tag such as `pt-BR` or `es_MX` by its primary subtag.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        let base = lowered.split(['-', '_']).next().unwrap_or_default();
        Self::all()
            .iter()
            .copied()
            .find(|locale| locale.code() == base)
    }
}

/// Locale used when neither the store nor the browser picks one.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// Parsed catalog for one locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
    rtl: bool,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Parse the embedded catalog for `locale`.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let raw = catalog_source(locale);
        let tree: Value = serde_json::from_str(raw).unwrap_or(Value::Null);
        let rtl = tree
            .get("meta")
            .and_then(|meta| meta.get("rtl"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Self { locale, tree, rtl }
    }

    /// Text at `path`, else the English text, else `default`.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        lookup(&self.tree, path)
            .or_else(|| lookup(&ENGLISH.tree, path))
            .unwrap_or_else(|| default.to_string())
    }

    /// Whether the catalog declares right-to-left layout.
    #[must_use]
    pub const fn rtl(&self) -> bool {
        self.rtl
    }

    /// Value for the document `dir` attribute.
    #[must_use]
    pub const fn direction(&self) -> &'static str {
        if self.rtl { "rtl" } else { "ltr" }
    }
}

static ENGLISH: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::En));

fn lookup(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str().map(ToString::to_string)
}

const fn catalog_source(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::Ar => include_str!("../../i18n/ar.json"),
        LocaleCode::En => include_str!("../../i18n/en.json"),
        LocaleCode::Es => include_str!("../../i18n/es.json"),
        LocaleCode::Fr => include_str!("../../i18n/fr.json"),
        LocaleCode::Pt => include_str!("../../i18n/pt.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_falls_back_to_default() {
        let bundle = TranslationBundle::new(LocaleCode::Fr);
        assert_eq!(bundle.text("nonexistent.key", "fallback"), "fallback");
    }

    #[test]
    fn missing_translation_falls_back_to_english() {
        let bundle = TranslationBundle::new(LocaleCode::Pt);
        assert_eq!(bundle.text("update.reload", "x"), "Reload");
    }

    #[test]
    fn rtl_flag_respects_meta() {
        assert!(TranslationBundle::new(LocaleCode::Ar).rtl());
        assert_eq!(TranslationBundle::new(LocaleCode::Ar).direction(), "rtl");
        assert!(!TranslationBundle::new(LocaleCode::En).rtl());
    }

    #[test]
    fn bundles_load_all_locales() {
        for locale in LocaleCode::all() {
            let bundle = TranslationBundle::new(locale);
            assert_eq!(bundle.locale, locale);
            assert!(!bundle.text("nav.explore", "Explore").is_empty());
        }
    }

    #[test]
    fn lang_tags_map_to_primary_subtag() {
        assert_eq!(LocaleCode::from_lang_tag("pt-BR"), Some(LocaleCode::Pt));
        assert_eq!(LocaleCode::from_lang_tag("es_MX"), Some(LocaleCode::Es));
        assert_eq!(LocaleCode::from_lang_tag("EN"), Some(LocaleCode::En));
        assert_eq!(LocaleCode::from_lang_tag("sw-KE"), None);
    }
}
