use serde_json::Value;
use thiserror::Error;

/// Base of the public JMA endpoints.
pub const DEFAULT_BASE_URL: &str = "https://www.jma.go.jp/bosai";

/// Anything that goes wrong between issuing the GET and holding a decoded
/// JSON value. Callers outside the `net`/`actions` boundary never see this
/// type; they get an absent value and a stderr diagnostic instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {url} was not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Thin client over the two JMA endpoints. One shared `reqwest::Client`,
/// client defaults throughout: no retries, no timeout overrides.
#[derive(Debug, Clone)]
pub struct JmaClient {
    client: reqwest::Client,
    base_url: String,
}

impl JmaClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn area_url(&self) -> String {
        format!("{}/common/const/area.json", self.base_url)
    }

    /// No validation of the code's format: a bogus code goes to the server
    /// as-is and whatever comes back surfaces as a `FetchError`.
    pub fn forecast_url(&self, area_code: &str) -> String {
        format!("{}/forecast/data/forecast/{area_code}.json", self.base_url)
    }

    /// GET `url`, require a 2xx status, decode the body as UTF-8 JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    pub async fn fetch_area_hierarchy(&self) -> Result<Value, FetchError> {
        self.fetch_json(&self.area_url()).await
    }

    pub async fn fetch_forecast(&self, area_code: &str) -> Result<Value, FetchError> {
        self.fetch_json(&self.forecast_url(area_code)).await
    }
}

impl Default for JmaClient {
    fn default() -> Self {
        Self::new()
    }
}
