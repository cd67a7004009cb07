//! Crawl-index (sitemap) generation.
//!
//! Enumerates every publicly reachable URL: the static brochure pages for
//! each locale, plus one entry per (published slug, locale) pair from the
//! content service. Enumeration failure is never fatal to the site build;
//! the builder logs a warning and falls back to the static pages alone.

use crate::client::ContentClient;
use crate::locale::BlogLocale;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Static site routes, relative to the locale prefix. Empty string is the
/// home page.
pub const STATIC_ROUTES: [&str; 5] = ["", "about", "services", "projects", "blog"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

/// Locale-alternate link (`xhtml:link rel="alternate"`).
#[derive(Debug, Clone, PartialEq)]
pub struct AlternateLink {
    pub hreflang: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    /// Omitted from the XML when unknown; never faked.
    pub last_modified: Option<DateTime<Utc>>,
    pub change_frequency: ChangeFrequency,
    pub priority: f64,
    pub alternates: Vec<AlternateLink>,
}

fn locale_url(site_base: &str, locale: BlogLocale, route: &str) -> String {
    if route.is_empty() {
        format!("{}/{}", site_base, locale.code())
    } else {
        format!("{}/{}/{}", site_base, locale.code(), route)
    }
}

fn alternates_for(site_base: &str, route: &str) -> Vec<AlternateLink> {
    BlogLocale::ALL
        .into_iter()
        .map(|locale| AlternateLink {
            hreflang: locale.code().to_string(),
            href: locale_url(site_base, locale, route),
        })
        .collect()
}

/// Site policy: the default locale ranks higher than its overlays.
fn priority_for(locale: BlogLocale, default_priority: f64) -> f64 {
    if locale.is_default() {
        default_priority
    } else {
        default_priority - 0.2
    }
}

/// Entries for the static brochure pages, one per (route, locale).
pub fn static_entries(site_base: &str) -> Vec<SitemapEntry> {
    let mut entries = Vec::with_capacity(STATIC_ROUTES.len() * BlogLocale::ALL.len());
    for route in STATIC_ROUTES {
        let base_priority = if route.is_empty() { 1.0 } else { 0.8 };
        let alternates = alternates_for(site_base, route);
        for locale in BlogLocale::ALL {
            entries.push(SitemapEntry {
                url: locale_url(site_base, locale, route),
                last_modified: None,
                change_frequency: ChangeFrequency::Weekly,
                priority: priority_for(locale, base_priority),
                alternates: alternates.clone(),
            });
        }
    }
    entries
}

/// Entries for published articles, one per (slug, locale).
pub fn article_entries(site_base: &str, slugs: &[String]) -> Vec<SitemapEntry> {
    let mut entries = Vec::with_capacity(slugs.len() * BlogLocale::ALL.len());
    for slug in slugs {
        let route = format!("blog/{}", slug);
        let alternates = alternates_for(site_base, &route);
        for locale in BlogLocale::ALL {
            entries.push(SitemapEntry {
                url: locale_url(site_base, locale, &route),
                last_modified: None,
                change_frequency: ChangeFrequency::Monthly,
                priority: priority_for(locale, 0.7),
                alternates: alternates.clone(),
            });
        }
    }
    entries
}

/// Build the full crawl index. When slug enumeration fails the result is the
/// static entry set, not an error; the site build must not abort over a
/// content-service hiccup.
pub async fn build_sitemap(client: &ContentClient, site_base: &str) -> Vec<SitemapEntry> {
    let mut entries = static_entries(site_base);

    match client.all_slugs().await {
        Ok(slugs) => {
            info!("enumerated {} published slugs", slugs.len());
            entries.extend(article_entries(site_base, &slugs));
        }
        Err(err) => {
            warn!(
                "slug enumeration failed, emitting static pages only: {}",
                err
            );
        }
    }

    entries
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize entries as a sitemap.org urlset with xhtml locale alternates.
pub fn write_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(entries.len() * 256);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
         xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        if let Some(last_modified) = entry.last_modified {
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                last_modified.format("%Y-%m-%d")
            ));
        }
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        for alternate in &entry.alternates {
            xml.push_str(&format!(
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
                escape_xml(&alternate.hreflang),
                escape_xml(&alternate.href)
            ));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
