pub mod config;
pub mod error;
pub mod http;
pub mod national_parks;
pub mod report;
pub mod sentiment_client;
pub mod temperature;
pub mod twitter_client;
