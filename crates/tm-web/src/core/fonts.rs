//! Web font request description.
//!
//! The DOM loader lives in `app::fonts`; this module only decides what to ask for.

/// Google Fonts CSS endpoint.
pub const GOOGLE_FONTS_API: &str = "https://fonts.googleapis.com/css";

/// Families requested on every page load.
pub const DEFAULT_FAMILIES: [&str; 3] = [
    "Barlow Condensed:400,500,600,700",
    "Archivo:400,500,600,700",
    "sans-serif",
];

/// Fonts to load from Google Fonts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontRequest {
    families: Vec<String>,
}

impl Default for FontRequest {
    fn default() -> Self {
        Self::new(DEFAULT_FAMILIES)
    }
}

impl FontRequest {
    /// Request the given `Family:weights` specs.
    pub fn new<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            families: families.into_iter().map(Into::into).collect(),
        }
    }

    /// Requested family specs in order.
    #[must_use]
    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// Stylesheet URL: spaces become `+`, families are joined with `|`.
    #[must_use]
    pub fn stylesheet_url(&self) -> String {
        let families = self
            .families
            .iter()
            .map(|family| family.replace(' ', "+"))
            .collect::<Vec<_>>()
            .join("|");
        format!("{GOOGLE_FONTS_API}?family={families}")
    }
}

/// Loading state mirrored as a class on the document element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStatus {
    /// Stylesheet requested.
    Loading,
    /// Stylesheet loaded.
    Active,
    /// Stylesheet failed; system fallbacks are in use.
    Inactive,
}

impl FontStatus {
    /// Class applied to `<html>`.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Loading => "wf-loading",
            Self::Active => "wf-active",
            Self::Inactive => "wf-inactive",
        }
    }

    /// All status classes, for clearing stale ones.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Loading, Self::Active, Self::Inactive]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_uses_fixed_family_list() {
        assert_eq!(
            FontRequest::default().families(),
            &[
                "Barlow Condensed:400,500,600,700".to_string(),
                "Archivo:400,500,600,700".to_string(),
                "sans-serif".to_string(),
            ]
        );
    }

    #[test]
    fn stylesheet_url_encodes_spaces_and_joins_families() {
        assert_eq!(
            FontRequest::default().stylesheet_url(),
            "https://fonts.googleapis.com/css?family=Barlow+Condensed:400,500,600,700|Archivo:400,500,600,700|sans-serif"
        );
    }

    #[test]
    fn status_classes_are_distinct() {
        let classes = FontStatus::all().map(FontStatus::class);
        assert_eq!(classes, ["wf-loading", "wf-active", "wf-inactive"]);
    }
}
