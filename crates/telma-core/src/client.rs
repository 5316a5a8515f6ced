//! HTTP client for the remote recipe API.
//!
//! Every request names its [`Endpoint`] explicitly; the client holds no
//! mutable target. Request URLs are assembled with [`QueryCodec`] from the
//! credentials, the access type and the caller's filters.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::feed::RecipeSource;
use crate::{
    Error, FilterSet, QueryCodec, RecipeDetail, RecipeLookup, Result, SavedRecipeRecord,
    SearchPage,
};

/// Default recipe search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.edamam.com/api/recipes/v2";

/// Default access type sent as `type=`.
pub const DEFAULT_ACCESS_TYPE: &str = "public";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the recipe API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Search endpoint; single recipes live at `<base_url>/<id>`.
    pub base_url: String,
    /// Application id credential.
    pub app_id: String,
    /// Application key credential.
    pub app_key: String,
    /// Access type (`public`).
    pub kind: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Settings for the default endpoint with the given credentials.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id: app_id.into(),
            app_key: app_key.into(),
            kind: DEFAULT_ACCESS_TYPE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(Error::Config(
                "missing API app_id; set TELMA_APP_ID or [api].app_id in config.toml".into(),
            ));
        }
        if self.app_key.trim().is_empty() {
            return Err(Error::Config(
                "missing API app_key; set TELMA_APP_KEY or [api].app_key in config.toml".into(),
            ));
        }
        parse_http_url(&self.base_url)?;
        Ok(())
    }
}

/// API target for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Recipe search.
    Search,
    /// Single recipe lookup by id.
    Recipe(&'a str),
}

/// Check that `id` is safe to place in a URL path.
pub fn validate_recipe_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidRecipeId(id.to_string()))
    }
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("'{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidUrl(format!(
            "'{raw}': unsupported scheme '{other}'"
        ))),
    }
}

/// URL without its query string, safe to log.
fn redacted(url: &str) -> String {
    url.split_once('?')
        .map_or_else(|| url.to_string(), |(base, _)| base.to_string())
}

/// Client for recipe search and lookup.
#[derive(Debug, Clone)]
pub struct RecipeClient {
    client: Client,
    config: ApiConfig,
}

impl RecipeClient {
    /// Build a client; fails before any request if credentials are missing.
    pub fn new(config: ApiConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("telma/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client, config })
    }

    /// Connection settings in use.
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Full request URL for `endpoint` with `filters` appended after the
    /// credential parameters.
    pub fn request_url(&self, endpoint: Endpoint<'_>, filters: &FilterSet) -> Result<String> {
        let base = self.config.base_url.trim_end_matches('/');
        let target = match endpoint {
            Endpoint::Search => base.to_string(),
            Endpoint::Recipe(id) => {
                validate_recipe_id(id)?;
                format!("{base}/{id}")
            },
        };

        let mut params = FilterSet::from_pairs([
            ("app_id", self.config.app_id.as_str()),
            ("app_key", self.config.app_key.as_str()),
            ("type", self.config.kind.as_str()),
        ]);
        params.extend(filters.iter().cloned());
        Ok(format!("{target}?{}", QueryCodec::encode(&params)))
    }

    /// First page of results for `filters`, restricted to card fields.
    pub async fn search(&self, filters: &FilterSet) -> Result<SearchPage> {
        let url = self.request_url(Endpoint::Search, &filters.clone().with_card_fields())?;
        let page: SearchPage = self.get_json(&url).await?;
        info!(
            "search returned {} recipes (more: {})",
            page.hits.len(),
            page.next_cursor().is_some()
        );
        Ok(page)
    }

    /// Page addressed by a next-page URL returned by an earlier response.
    pub async fn follow(&self, cursor: &str) -> Result<SearchPage> {
        let url = parse_http_url(cursor)?;
        self.get_json(url.as_str()).await
    }

    /// Card fields of one recipe, shaped for the saved-recipes store.
    pub async fn recipe_card(&self, id: &str) -> Result<SavedRecipeRecord> {
        let url = self.request_url(Endpoint::Recipe(id), &FilterSet::new().with_card_fields())?;
        self.get_json(&url).await
    }

    /// Full payload of one recipe.
    pub async fn recipe_detail(&self, id: &str) -> Result<RecipeDetail> {
        let url = self.request_url(Endpoint::Recipe(id), &FilterSet::new())?;
        let lookup: RecipeLookup = self.get_json(&url).await?;
        Ok(lookup.recipe)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let shown = redacted(url);
        debug!("GET {shown}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(&shown, e))?;
        let status = response.status();

        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound(format!("Nothing found at '{shown}'")));
            }

            match response.error_for_status() {
                Ok(_) => unreachable!("Status should be an error"),
                Err(err) => return Err(Error::Network(err.without_url())),
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&shown, e))?;
        debug!("{status} from {shown} ({} bytes)", body.len());
        Ok(serde_json::from_str(&body)?)
    }

    fn transport_error(&self, shown: &str, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(format!(
                "request to '{shown}' did not complete within {}s",
                self.config.timeout.as_secs_f64()
            ))
        } else {
            Error::Network(err.without_url())
        }
    }
}

#[async_trait]
impl RecipeSource for RecipeClient {
    async fn search(&self, filters: &FilterSet) -> Result<SearchPage> {
        Self::search(self, filters).await
    }

    async fn follow(&self, cursor: &str) -> Result<SearchPage> {
        Self::follow(self, cursor).await
    }
}
