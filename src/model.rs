//! Article aggregate, per-locale translations, categories and pagination.
//!
//! Field names mirror the content service wire format (snake_case). The
//! service is the source of truth for identity (`id`, `slug`) and lifecycle
//! timestamps; this crate only validates what it sends and interprets what
//! it receives.

use crate::content::{block_ids_unique, ContentBlock};
use crate::locale::BlogLocale;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// One locale's bundle of article text. A translation counts as "present"
/// only when its title is non-empty after trimming; an empty record is the
/// same as no record for resolution purposes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArticleTranslation {
    pub title: String,
    pub lead: String,
    pub content: Vec<ContentBlock>,
    pub meta_title: String,
    pub meta_description: String,
}

impl ArticleTranslation {
    pub fn is_present(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Partial mapping from locale to translation. BTreeMap keeps locale
/// iteration deterministic for sitemap alternates and request bodies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleTranslations(pub BTreeMap<BlogLocale, ArticleTranslation>);

impl ArticleTranslations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locale: BlogLocale) -> Option<&ArticleTranslation> {
        self.0.get(&locale)
    }

    pub fn insert(&mut self, locale: BlogLocale, translation: ArticleTranslation) {
        self.0.insert(locale, translation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlogLocale, &ArticleTranslation)> {
        self.0.iter().map(|(locale, translation)| (*locale, translation))
    }

    /// Locales that actually have displayable content, in stable order.
    pub fn present_locales(&self) -> Vec<BlogLocale> {
        BlogLocale::ALL
            .into_iter()
            .filter(|locale| matches!(self.get(*locale), Some(t) if t.is_present()))
            .collect()
    }

    /// Select the translation to display for `requested`: the requested
    /// locale if present, else the default locale, else nothing. Write-time
    /// validation guarantees a default translation exists, but resolution
    /// never assumes it.
    pub fn resolve(&self, requested: BlogLocale) -> Option<&ArticleTranslation> {
        self.get(requested)
            .filter(|t| t.is_present())
            .or_else(|| self.get(BlogLocale::DEFAULT).filter(|t| t.is_present()))
    }

    /// An article is displayable at all only if resolution can succeed for
    /// some locale, i.e. the default translation is present.
    pub fn is_displayable(&self) -> bool {
        self.resolve(BlogLocale::DEFAULT).is_some()
    }

    /// Overlay `partial` onto this mapping. Locales present in the partial
    /// replace the stored record wholesale; locales absent from the partial
    /// are left untouched. This is the merge the service applies on update.
    pub fn merge(&mut self, partial: ArticleTranslations) {
        for (locale, translation) in partial.0 {
            self.0.insert(locale, translation);
        }
    }
}

impl FromIterator<(BlogLocale, ArticleTranslation)> for ArticleTranslations {
    fn from_iter<I: IntoIterator<Item = (BlogLocale, ArticleTranslation)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Published,
}

/// Full article aggregate as returned by the content service.
///
/// `published_at` records the *first* transition to published and is never
/// cleared when an article is reverted to draft. Visibility must always be
/// derived from `status`, not from `published_at` presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub slug: String,
    pub category_id: Option<i64>,
    /// Media path (e.g. `/blog/cover.jpg`), never a resolved URL.
    pub cover_image: Option<String>,
    pub status: ArticleStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub translations: ArticleTranslations,
}

impl Article {
    /// Whether the article belongs in public listings and sitemaps.
    pub fn is_public(&self) -> bool {
        self.status == ArticleStatus::Published
    }

    /// Lifecycle invariant: published implies a publication timestamp.
    pub fn published_at_consistent(&self) -> bool {
        self.status != ArticleStatus::Published || self.published_at.is_some()
    }
}

/// Locale-resolved flat projection for list rendering. Produced server-side;
/// the client never reassembles it from the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleListItem {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub lead: String,
    pub cover_image: Option<String>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Blog category. `slug` is the stable external identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogCategory {
    pub id: i64,
    pub slug: String,
    pub name: String,
}

/// Pagination envelope for listings. `page` is 1-based; a page beyond
/// `total_pages` carries an empty item set, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationInfo {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as u64)
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// One page of a listing response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticlePage {
    pub articles: Vec<ArticleListItem>,
    pub pagination: PaginationInfo,
}

/// Payload for creating an article. The server assigns `id` and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArticle {
    pub slug: String,
    pub category_id: Option<i64>,
    pub cover_image: Option<String>,
    pub status: ArticleStatus,
    pub translations: ArticleTranslations,
}

/// Partial update payload. `None` fields are omitted from the request body,
/// so the server leaves them unchanged; translations carry only the locales
/// being written and the server merges them over the stored mapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArticleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<ArticleTranslations>,
}

fn slug_pattern() -> &'static Regex {
    static SLUG_RE: OnceLock<Regex> = OnceLock::new();
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"))
}

/// Whether a string is usable as an external identity: lowercase
/// alphanumerics and single hyphens, no leading/trailing hyphen.
pub fn is_valid_slug(slug: &str) -> bool {
    slug_pattern().is_match(slug)
}

impl NewArticle {
    /// Write-time validation. The default-locale translation must be present
    /// (resolution fallback depends on it), the slug must be URL-safe, and
    /// block ids must be unique within each body.
    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_slug(&self.slug) {
            return Err(format!("invalid slug: {:?}", self.slug));
        }
        match self.translations.get(BlogLocale::DEFAULT) {
            Some(t) if t.is_present() => {}
            _ => {
                return Err(format!(
                    "missing {} translation: default-locale title is required",
                    BlogLocale::DEFAULT
                ))
            }
        }
        validate_translation_bodies(&self.translations)
    }
}

impl ArticleUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(translations) = &self.translations {
            validate_translation_bodies(translations)?;
        }
        Ok(())
    }
}

fn validate_translation_bodies(translations: &ArticleTranslations) -> Result<(), String> {
    for (locale, translation) in translations.iter() {
        if !block_ids_unique(&translation.content) {
            return Err(format!("duplicate content block id in {} body", locale));
        }
    }
    Ok(())
}
