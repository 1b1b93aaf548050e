use anyhow::{anyhow, Context, Result};
use nonzero_ext::nonzero;
use std::env;
use std::num::NonZeroU32;
use url::Url;

pub const DEFAULT_TWITTER_API_BASE: &str = "https://api.twitter.com";
pub const DEFAULT_SENTIMENT_API_ENDPOINT: &str = "http://text-processing.com/api/sentiment/";
pub const DEFAULT_SENTIMENT_LANGUAGE: &str = "english";

#[derive(Clone, Debug)]
pub struct Config {
    pub twitter_consumer_key: String,
    pub twitter_consumer_secret: String,
    pub twitter_api_base: Url,
    pub sentiment_api_key: String,
    pub sentiment_api_endpoint: Url,
    pub sentiment_language: String,
    pub sentiment_requests_per_second: NonZeroU32,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(anyhow!("Missing environment variable `{key}`"))
        };

        let twitter_api_base = lookup("TWITTER_API_BASE")
            .unwrap_or(DEFAULT_TWITTER_API_BASE.to_string());
        let sentiment_api_endpoint = lookup("SENTIMENT_API_ENDPOINT")
            .unwrap_or(DEFAULT_SENTIMENT_API_ENDPOINT.to_string());

        let sentiment_requests_per_second = match lookup("SENTIMENT_REQUESTS_PER_SECOND") {
            Some(value) => value
                .parse::<NonZeroU32>()
                .with_context(|| format!("Invalid SENTIMENT_REQUESTS_PER_SECOND `{value}`"))?,
            None => nonzero!(2u32),
        };

        Ok(Self {
            twitter_consumer_key: required("TWITTER_CONSUMER_KEY")?,
            twitter_consumer_secret: required("TWITTER_CONSUMER_SECRET")?,
            twitter_api_base: Url::parse(&twitter_api_base)
                .with_context(|| format!("Invalid TWITTER_API_BASE `{twitter_api_base}`"))?,
            sentiment_api_key: required("SENTIMENT_API_KEY")?,
            sentiment_api_endpoint: Url::parse(&sentiment_api_endpoint).with_context(|| {
                format!("Invalid SENTIMENT_API_ENDPOINT `{sentiment_api_endpoint}`")
            })?,
            sentiment_language: lookup("SENTIMENT_LANGUAGE")
                .unwrap_or(DEFAULT_SENTIMENT_LANGUAGE.to_string()),
            sentiment_requests_per_second,
        })
    }
}
