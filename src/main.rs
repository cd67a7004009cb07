use anyhow::{Context, Result};
use blog_content_client::client::ContentClient;
use blog_content_client::config::Config;
use blog_content_client::retry::{with_retry_if, RetryConfig};
use blog_content_client::sitemap;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in CI where the variables come preset)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blog_content_client=info".parse()?),
        )
        .init();

    info!("Starting sitemap build");

    let config = Config::from_env()?;
    let client = ContentClient::new(&config)?;

    // Default output path keeps the site build's invocation short.
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sitemap.xml".to_string());

    // Retry transient failures before giving up on article entries; the
    // sitemap must still ship (static pages only) when the content service
    // stays down.
    let entries = match with_retry_if(
        &RetryConfig::crawl_index(),
        "slug enumeration",
        || client.all_slugs(),
        |err| err.is_retryable(),
    )
    .await
    {
        Ok(slugs) => {
            info!("Enumerated {} published slugs", slugs.len());
            let mut entries = sitemap::static_entries(&config.site_base_url);
            entries.extend(sitemap::article_entries(&config.site_base_url, &slugs));
            entries
        }
        Err(err) => {
            warn!(
                "Slug enumeration failed ({}), emitting static pages only",
                err
            );
            sitemap::static_entries(&config.site_base_url)
        }
    };

    info!("Built {} sitemap entries", entries.len());

    let xml = sitemap::write_xml(&entries);
    std::fs::write(&output_path, xml)
        .with_context(|| format!("failed to write {}", output_path))?;

    info!("Sitemap written to {}", output_path);
    Ok(())
}
