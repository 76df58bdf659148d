use anyhow::{anyhow, bail};
use reqwest::{Method, Response};
use serde_json::{json, Value};

/// Minimal HTTP client for the restaurant API.
///
/// Every call unwraps the `data` envelope; non-2xx responses become an error
/// carrying the server's `message`.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<Value> {
        self.send(Method::GET, path, None).await
    }

    pub async fn get_with_query(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<Value> {
        let response = self.http.get(self.url(path)).query(query).send().await?;
        unwrap_data(response).await
    }

    pub async fn post(&self, path: &str, data: Value) -> anyhow::Result<Value> {
        self.send(Method::POST, path, Some(data)).await
    }

    pub async fn put(&self, path: &str, data: Value) -> anyhow::Result<Value> {
        self.send(Method::PUT, path, Some(data)).await
    }

    pub async fn delete(&self, path: &str) -> anyhow::Result<Value> {
        self.send(Method::DELETE, path, None).await
    }

    async fn send(&self, method: Method, path: &str, data: Option<Value>) -> anyhow::Result<Value> {
        tracing::debug!("{} {}", method, self.url(path));

        let mut request = self.http.request(method, self.url(path));
        if let Some(data) = data {
            request = request.json(&json!({ "data": data }));
        }
        let response = request.send().await?;
        unwrap_data(response).await
    }
}

async fn unwrap_data(response: Response) -> anyhow::Result<Value> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .map_err(|e| anyhow!("unreadable response ({}): {}", status, e))?;

    if !status.is_success() {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed");
        bail!("{} ({})", message, status.as_u16());
    }

    Ok(body.get("data").cloned().unwrap_or(Value::Null))
}
