use crate::error::ApiError;
use anyhow::Result;
use hyper::client::HttpConnector;
use hyper::{Body, Client, Request};
use hyper_tls::HttpsConnector;
use serde::de::DeserializeOwned;

pub type HttpsClient = Client<HttpsConnector<HttpConnector>>;

pub const USER_AGENT: &str = concat!("room-temperature/", env!("CARGO_PKG_VERSION"));

pub fn https_client() -> HttpsClient {
    let https = HttpsConnector::new();
    Client::builder().build::<_, hyper::Body>(https)
}

/// Sends `req`, rejects non-2xx responses, and decodes the body as JSON.
pub async fn fetch_json<T: DeserializeOwned>(
    https_client: &HttpsClient,
    req: Request<Body>,
) -> Result<T> {
    let endpoint = format!("{} {}", req.method(), req.uri().path());
    tracing::debug!(%endpoint, uri = %req.uri(), "sending request");

    let resp = https_client.request(req).await?;
    let status = resp.status();
    let body = hyper::body::to_bytes(resp.into_body()).await?;

    if !status.is_success() {
        return Err(ApiError::Status {
            endpoint,
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
        .into());
    }

    let decoded =
        serde_json::from_slice(&body).map_err(|source| ApiError::Decode { endpoint, source })?;
    Ok(decoded)
}
