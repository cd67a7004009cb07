//! Preview binary - fetches one article and prints its body as plain text,
//! so editors can check content without a browser.
//!
//! Usage:
//!   cargo run --bin preview -- <slug>            # default locale
//!   cargo run --bin preview -- <slug> <locale>   # e.g. `launch-post en`
//!
//! Required environment variables:
//! - CONTENT_API_URL
//! - SITE_BASE_URL

use anyhow::{bail, Context, Result};
use blog_content_client::client::ContentClient;
use blog_content_client::config::Config;
use blog_content_client::locale::BlogLocale;
use blog_content_client::render::{render_blocks, TextRenderer};
use blog_content_client::retry::{with_retry_if, RetryConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blog_content_client=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let slug = args.next().context("usage: preview <slug> [locale]")?;
    let locale = match args.next() {
        Some(code) => match BlogLocale::from_code(&code) {
            Some(locale) => locale,
            None => bail!("unsupported locale: {:?}", code),
        },
        None => BlogLocale::DEFAULT,
    };

    let config = Config::from_env()?;
    let client = ContentClient::new(&config)?;

    info!("Fetching {:?} ({})", slug, locale);
    let article = with_retry_if(
        &RetryConfig::api_call(),
        "article fetch",
        || client.get_article_by_slug(&slug, locale),
        |err| err.is_retryable(),
    )
    .await
    .with_context(|| format!("failed to fetch article {:?}", slug))?;

    let translation = match article.translations.resolve(locale) {
        Some(translation) => translation,
        None => bail!("article {:?} has no displayable translation", slug),
    };

    println!("# {}", translation.title);
    println!();
    println!("{}", translation.lead);
    println!();
    for line in render_blocks(&TextRenderer, &translation.content) {
        println!("{}", line);
        println!();
    }

    if !article.is_public() {
        println!("[draft - not publicly visible]");
    }

    Ok(())
}
