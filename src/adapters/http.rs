use crate::utils::error::{CliError, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub async fn post_json<B, R>(client: &Client, service: &str, url: &str, body: &B) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    tracing::debug!("📡 {}: POST {}", service, url);
    send(service, client.post(url).json(body)).await
}

pub async fn get_json<R: DeserializeOwned>(client: &Client, service: &str, url: &str) -> Result<R> {
    tracing::debug!("📡 {}: GET {}", service, url);
    send(service, client.get(url)).await
}

async fn send<R: DeserializeOwned>(service: &str, request: RequestBuilder) -> Result<R> {
    let response = request.send().await?;
    let status = response.status();
    tracing::debug!("📡 {}: response status {}", service, status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CliError::service(
            service,
            format!("HTTP {}: {}", status, body.trim()),
        ));
    }

    Ok(response.json().await?)
}

/// Joins a base URL and a path without doubling or dropping the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
