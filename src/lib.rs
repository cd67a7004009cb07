//! Typed content model and API client for the agency blog content service.
//!
//! The site itself (rendering, routing, media CDN) lives elsewhere; this
//! crate owns the data shapes (articles, per-locale translations, content
//! blocks), the HTTP client with its error taxonomy, and the sitemap
//! crawl-index builder the site build invokes.

pub mod booking;
pub mod client;
pub mod config;
pub mod content;
pub mod locale;
pub mod model;
pub mod render;
pub mod retry;
pub mod sitemap;
