pub mod api;

use crate::http::{self, HttpsClient};
use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::RateLimiter;
use hyper::{Body, Method, Request};
use serde::{Serialize, Serializer};
use std::fmt;
use url::form_urlencoded;
use url::Url;

/// Paces outgoing classification requests.
pub type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    /// A label the classifier returned that we don't know; shown as-is.
    Other(String),
}

impl Sentiment {
    pub fn from_label(label: &str) -> Self {
        match label {
            "pos" => Sentiment::Positive,
            "neg" => Sentiment::Negative,
            "neutral" => Sentiment::Neutral,
            other => Sentiment::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Other(label) => write!(f, "{label}"),
        }
    }
}

impl Serialize for Sentiment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub probability: Option<api::Probability>,
}

impl From<api::SentimentResponse> for Classification {
    fn from(resp: api::SentimentResponse) -> Self {
        let sentiment = Sentiment::from_label(&resp.label);
        if let Sentiment::Other(label) = &sentiment {
            tracing::warn!(label = label.as_str(), "unrecognized sentiment label");
        }
        Self {
            sentiment,
            probability: resp.probability,
        }
    }
}

#[async_trait]
pub trait Classifier {
    async fn classify(&self, text: &str) -> Result<Classification>;
}

#[derive(Debug, Clone)]
pub struct SentimentClient {
    https_client: HttpsClient,
    endpoint: Url,
    api_key: String,
    language: String,
}

impl SentimentClient {
    pub fn new(endpoint: &Url, api_key: &str, language: &str) -> Self {
        Self {
            https_client: http::https_client(),
            endpoint: endpoint.clone(),
            api_key: api_key.to_string(),
            language: language.to_string(),
        }
    }

    pub fn form_body(&self, text: &str) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("language", &self.language)
            .append_pair("text", text)
            .finish()
    }
}

#[async_trait]
impl Classifier for SentimentClient {
    async fn classify(&self, text: &str) -> Result<Classification> {
        let req = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.as_str())
            .header("User-Agent", http::USER_AGENT)
            .header("X-Mashape-Key", &self.api_key)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .body(Body::from(self.form_body(text)))?;

        let resp: api::SentimentResponse = http::fetch_json(&self.https_client, req)
            .await
            .context("Sentiment request failed")?;
        Ok(resp.into())
    }
}

/// One request per text, in order. Each request waits on `limiter` first.
pub async fn classify_all<C: Classifier + ?Sized>(
    classifier: &C,
    texts: &[String],
    limiter: &DirectLimiter,
) -> Result<Vec<Classification>> {
    let mut classifications = Vec::with_capacity(texts.len());
    for (i, text) in texts.iter().enumerate() {
        limiter.until_ready().await;
        let classification = classifier
            .classify(text)
            .await
            .with_context(|| format!("Failed to classify tweet #{}", i + 1))?;
        classifications.push(classification);
    }
    Ok(classifications)
}
