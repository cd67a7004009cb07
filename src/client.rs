//! Typed client for the content service HTTP API.
//!
//! Every operation returns `Result<T, ApiError>`: expected failures
//! (not-found, bad input, transport, 5xx) are values the page-rendering
//! boundary must handle, never panics. The client holds no session or cache
//! state; calls are independent and may run concurrently. Retries and backoff
//! are caller policy (see [`crate::retry`]), not built in; dropping a call's
//! future cancels the in-flight request.

use crate::booking::{BookingReceipt, BookingRequest};
use crate::config::Config;
use crate::locale::BlogLocale;
use crate::model::{Article, ArticlePage, ArticleUpdate, BlogCategory, NewArticle};
use anyhow::Context;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Server-enforced ceiling on listing page size, mirrored client-side so bad
/// params fail fast with [`ApiError::Validation`] instead of a silent clamp.
pub const MAX_PAGE_LIMIT: u32 = 100;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure taxonomy surfaced to every caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad caller input (local check or 4xx). Never retried automatically.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing slug or id. Terminal; render a 404.
    #[error("not found")]
    NotFound,

    /// Transport failure. Retrying is the caller's choice.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Opaque service failure: a 5xx, an unexpected status, or a success
    /// body that does not match the contract.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// Whether a retry could plausibly succeed. Validation and not-found are
    /// terminal; transport and service failures may be transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Server { .. })
    }
}

/// Query parameters for [`ContentClient::list_articles`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListArticlesParams {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    /// Category slug filter.
    pub category: Option<String>,
    pub locale: BlogLocale,
}

impl Default for ListArticlesParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 12,
            category: None,
            locale: BlogLocale::DEFAULT,
        }
    }
}

impl ListArticlesParams {
    fn validate(&self) -> ApiResult<()> {
        if self.page < 1 {
            return Err(ApiError::Validation("page must be >= 1".to_string()));
        }
        if self.limit < 1 || self.limit > MAX_PAGE_LIMIT {
            return Err(ApiError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_LIMIT
            )));
        }
        Ok(())
    }
}

// Error body the service sends with 4xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
    admin_token: Option<String>,
}

impl ContentClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.content_api_url.clone(),
            admin_token: config.admin_api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the admin bearer token when configured. Without it the service
    /// rejects the write; that rejection surfaces through the normal taxonomy.
    fn with_admin_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.admin_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Public listing of published articles, locale-resolved server-side.
    /// A page beyond the last one returns an empty set with intact totals.
    pub async fn list_articles(&self, params: &ListArticlesParams) -> ApiResult<ArticlePage> {
        params.validate()?;

        let mut request = self.http.get(self.url("/api/articles")).query(&[
            ("page", params.page.to_string()),
            ("limit", params.limit.to_string()),
            ("locale", params.locale.code().to_string()),
        ]);
        if let Some(category) = &params.category {
            request = request.query(&[("category", category.as_str())]);
        }

        let response = request.send().await.map_err(ApiError::Network)?;
        decode_response(response).await
    }

    /// Fetch one article by its external identity. Missing or draft-only
    /// slugs surface as [`ApiError::NotFound`].
    pub async fn get_article_by_slug(&self, slug: &str, locale: BlogLocale) -> ApiResult<Article> {
        let response = self
            .http
            .get(self.url(&format!("/api/articles/{}", slug)))
            .query(&[("locale", locale.code())])
            .send()
            .await
            .map_err(ApiError::Network)?;
        decode_response(response).await
    }

    pub async fn list_categories(&self) -> ApiResult<Vec<BlogCategory>> {
        let response = self
            .http
            .get(self.url("/api/categories"))
            .send()
            .await
            .map_err(ApiError::Network)?;
        decode_response(response).await
    }

    /// Every published slug, for crawl-index generation. Draft slugs never
    /// appear here.
    pub async fn all_slugs(&self) -> ApiResult<Vec<String>> {
        let response = self
            .http
            .get(self.url("/api/articles/slugs"))
            .send()
            .await
            .map_err(ApiError::Network)?;
        decode_response(response).await
    }

    /// Admin: create an article. Validated locally first so a payload the
    /// server would reject never goes over the wire.
    pub async fn create_article(&self, input: &NewArticle) -> ApiResult<Article> {
        input.validate().map_err(ApiError::Validation)?;

        let request = self.http.post(self.url("/api/admin/articles")).json(input);
        let response = self
            .with_admin_auth(request)
            .send()
            .await
            .map_err(ApiError::Network)?;
        decode_response(response).await
    }

    /// Admin: partial update. Only fields present in the patch reach the
    /// wire; translations carry only the locales being written, so stored
    /// locales outside the patch survive unchanged (merge, not replace).
    pub async fn update_article(&self, id: i64, patch: &ArticleUpdate) -> ApiResult<Article> {
        patch.validate().map_err(ApiError::Validation)?;

        let request = self
            .http
            .patch(self.url(&format!("/api/admin/articles/{}", id)))
            .json(patch);
        let response = self
            .with_admin_auth(request)
            .send()
            .await
            .map_err(ApiError::Network)?;
        decode_response(response).await
    }

    /// Fetch both halves of the blog index page at once: the requested
    /// article page and the category list. The two reads are independent, so
    /// they run concurrently and the first failure wins.
    pub async fn blog_index(
        &self,
        params: &ListArticlesParams,
    ) -> ApiResult<(ArticlePage, Vec<BlogCategory>)> {
        futures::future::try_join(self.list_articles(params), self.list_categories()).await
    }

    /// Submit a meeting-booking lead form.
    pub async fn submit_booking(&self, booking: &BookingRequest) -> ApiResult<BookingReceipt> {
        booking.validate().map_err(ApiError::Validation)?;

        let response = self
            .http
            .post(self.url("/api/bookings"))
            .json(booking)
            .send()
            .await
            .map_err(ApiError::Network)?;
        decode_response(response).await
    }
}

/// Normalize a response into the error taxonomy: 404 is `NotFound`, 400/422
/// is `Validation` (with the service message when decodable), 5xx and
/// anything else unexpected is `Server`. A success body that fails to decode
/// is also `Server`: the service broke its contract.
async fn decode_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if status.is_success() {
        return response.json::<T>().await.map_err(|err| ApiError::Server {
            status: status.as_u16(),
            message: format!("invalid response body: {}", err),
        });
    }

    match status {
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "invalid request".to_string());
            Err(ApiError::Validation(message))
        }
        other => Err(ApiError::Server {
            status: other.as_u16(),
            message: other
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        }),
    }
}
