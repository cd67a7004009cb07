//! Supported site locales.
//!
//! The set of locales is closed: the content service, the routing layer and
//! the sitemap all agree on these four codes. `ru` is the site default and
//! the fallback target for locale resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported blog locale. Wire format is the two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogLocale {
    Ru,
    En,
    Kz,
    Zh,
}

impl BlogLocale {
    /// The site default locale. Every stored article is expected to carry a
    /// translation for it (enforced at write time).
    pub const DEFAULT: BlogLocale = BlogLocale::Ru;

    /// All supported locales, default first. Iteration order is stable so
    /// sitemap output stays deterministic between builds.
    pub const ALL: [BlogLocale; 4] = [
        BlogLocale::Ru,
        BlogLocale::En,
        BlogLocale::Kz,
        BlogLocale::Zh,
    ];

    /// The two-letter code used on the wire and in URLs.
    pub fn code(&self) -> &'static str {
        match self {
            BlogLocale::Ru => "ru",
            BlogLocale::En => "en",
            BlogLocale::Kz => "kz",
            BlogLocale::Zh => "zh",
        }
    }

    /// Parse a locale code. Returns `None` for anything outside the
    /// supported set; callers decide whether that is a 404 or a fallback.
    pub fn from_code(code: &str) -> Option<BlogLocale> {
        match code {
            "ru" => Some(BlogLocale::Ru),
            "en" => Some(BlogLocale::En),
            "kz" => Some(BlogLocale::Kz),
            "zh" => Some(BlogLocale::Zh),
            _ => None,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl Default for BlogLocale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for BlogLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_is_ru() {
        assert_eq!(BlogLocale::default(), BlogLocale::Ru);
        assert!(BlogLocale::Ru.is_default());
        assert!(!BlogLocale::En.is_default());
    }

    #[test]
    fn test_code_round_trip() {
        for locale in BlogLocale::ALL {
            assert_eq!(BlogLocale::from_code(locale.code()), Some(locale));
        }
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        assert_eq!(BlogLocale::from_code("de"), None);
        assert_eq!(BlogLocale::from_code(""), None);
        assert_eq!(BlogLocale::from_code("RU"), None);
    }

    #[test]
    fn test_all_starts_with_default() {
        assert_eq!(BlogLocale::ALL[0], BlogLocale::DEFAULT);
        assert_eq!(BlogLocale::ALL.len(), 4);
    }

    #[test]
    fn test_serde_wire_codes() {
        let json = serde_json::to_string(&BlogLocale::Kz).expect("serialize");
        assert_eq!(json, "\"kz\"");

        let locale: BlogLocale = serde_json::from_str("\"zh\"").expect("deserialize");
        assert_eq!(locale, BlogLocale::Zh);
    }

    #[test]
    fn test_display_matches_code() {
        assert_eq!(BlogLocale::En.to_string(), "en");
    }
}
