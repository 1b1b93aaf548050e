pub mod api;

use crate::error::ApiError;
use crate::http::{self, HttpsClient};
use anyhow::{Context, Result};
use hyper::{Body, Method, Request};
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{AccessToken, AuthUrl, ClientId, ClientSecret, TokenResponse, TokenUrl};
use url::Url;

pub const QUERY_FILTERS: &str = "-filter:retweets -filter:replies";

/// Excludes retweets and replies from a search.
pub fn modify_query(query: &str) -> String {
    format!("{query} {QUERY_FILTERS}")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub count: u32,
    pub lang: String,
    /// "extended" returns the full text of long tweets instead of the first 140 chars.
    pub tweet_mode: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            count: 10,
            lang: "en".to_string(),
            tweet_mode: "extended".to_string(),
        }
    }
}

impl SearchParams {
    pub fn url_suffix(&self) -> String {
        format!(
            "&count={}&lang={}&tweet_mode={}",
            self.count, self.lang, self.tweet_mode
        )
    }
}

pub fn full_texts(statuses: &[api::Status]) -> Vec<String> {
    statuses
        .iter()
        .map(|status| status.full_text.clone())
        .collect()
}

#[derive(Debug, Clone)]
pub struct TwitterClient {
    https_client: HttpsClient,
    consumer_key: String,
    consumer_secret: String,
    api_base: Url,
    search_params: SearchParams,
    bearer_token: Option<AccessToken>,
}

impl TwitterClient {
    pub fn new(consumer_key: &str, consumer_secret: &str, api_base: &Url) -> Self {
        Self {
            https_client: http::https_client(),
            consumer_key: consumer_key.to_string(),
            consumer_secret: consumer_secret.to_string(),
            api_base: api_base.clone(),
            search_params: SearchParams::default(),
            bearer_token: None,
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.bearer_token.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base.as_str().trim_end_matches('/'))
    }

    /// Application-only auth: trades the consumer key and secret for a bearer token.
    pub async fn authorize(&mut self) -> Result<()> {
        let oauth_client = BasicClient::new(
            ClientId::new(self.consumer_key.clone()),
            Some(ClientSecret::new(self.consumer_secret.clone())),
            // NB: required by the builder, never visited by the client-credentials grant
            AuthUrl::new(self.endpoint("/oauth/authorize"))?,
            Some(TokenUrl::new(self.endpoint("/oauth2/token"))?),
        );

        let token_result = oauth_client
            .exchange_client_credentials()
            .request_async(async_http_client)
            .await
            .context("Failed to obtain bearer token")?;

        tracing::info!("obtained bearer token");
        self.bearer_token = Some(token_result.access_token().clone());
        Ok(())
    }

    pub fn search_url(&self, query: &str) -> String {
        let modified_query = modify_query(query);
        let encoded_query = urlencoding::encode(&modified_query);
        format!(
            "{}?q={encoded_query}{}",
            self.endpoint("/1.1/search/tweets.json"),
            self.search_params.url_suffix()
        )
    }

    pub async fn search(&self, query: &str) -> Result<Vec<api::Status>> {
        let bearer_token = self
            .bearer_token
            .as_ref()
            .ok_or(ApiError::Unauthorized("search"))?;

        let req = Request::builder()
            .method(Method::GET)
            .uri(self.search_url(query))
            .header("User-Agent", http::USER_AGENT)
            .header("Authorization", format!("Bearer {}", bearer_token.secret()))
            .body(Body::empty())?;

        let resp: api::SearchResponse = http::fetch_json(&self.https_client, req)
            .await
            .with_context(|| format!("Search for `{query}` failed"))?;

        tracing::info!(query, count = resp.statuses.len(), "search returned");
        Ok(resp.statuses)
    }
}
