use anyhow::Context;
use reqwest::{Client, IntoUrl, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Thin JSON client for the Estate API
pub struct ApiClient {
    http: Client,
    base_url: String,
}

/// Status and decoded body of one API call
#[derive(Debug)]
pub struct ApiReply {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiReply {
    /// Server-provided `error` message, falling back to the status text
    pub fn error_message(&self) -> String {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.status.to_string())
    }

    /// Turn a non-2xx reply into an error carrying the server's message
    pub fn into_success(self) -> anyhow::Result<Value> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            anyhow::bail!("{} ({})", self.error_message(), self.status.as_u16())
        }
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment
    pub fn segments_url(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = Url::parse(&self.base_url).with_context(|| format!("invalid server URL {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("server URL {} cannot take a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get(&self, path: &str, bearer: Option<&str>) -> anyhow::Result<ApiReply> {
        self.fetch(self.url(path), path, bearer).await
    }

    /// GET a resource addressed by path segments, such as a slug taken from user input
    pub async fn get_segments(&self, segments: &[&str], bearer: Option<&str>) -> anyhow::Result<ApiReply> {
        let url = self.segments_url(segments)?;
        let path = url.path().to_string();
        self.fetch(url, &path, bearer).await
    }

    async fn fetch(&self, url: impl IntoUrl, path: &str, bearer: Option<&str>) -> anyhow::Result<ApiReply> {
        let mut request = self.http.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        Self::reply(request.send().await.with_context(|| format!("GET {} failed", path))?).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: Option<&B>) -> anyhow::Result<ApiReply> {
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::reply(request.send().await.with_context(|| format!("POST {} failed", path))?).await
    }

    async fn reply(response: reqwest::Response) -> anyhow::Result<ApiReply> {
        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Ok(ApiReply { status, body })
    }
}
