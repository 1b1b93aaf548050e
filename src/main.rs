use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::terminal;
use governor::{Quota, RateLimiter};
use room_temperature::config::Config;
use room_temperature::national_parks;
use room_temperature::report::{self, Layout};
use room_temperature::sentiment_client::SentimentClient;
use room_temperature::temperature;
use room_temperature::twitter_client::TwitterClient;
use std::io::{stdout, IsTerminal};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search recent tweets and label each one Positive, Negative or Neutral
    Search {
        query: String,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List the national parks, or show one of them
    Parks {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn layout() -> Layout {
    let is_terminal = stdout().is_terminal();
    let width = match terminal::size() {
        Ok((cols, _)) if is_terminal => cols,
        _ => report::DEFAULT_WIDTH,
    };
    Layout {
        width,
        color: is_terminal,
    }
}

async fn search(query: &str, format: Format) -> Result<()> {
    let config = Config::from_env()?;

    let mut twitter_client = TwitterClient::new(
        &config.twitter_consumer_key,
        &config.twitter_consumer_secret,
        &config.twitter_api_base,
    );
    twitter_client.authorize().await?;

    let sentiment_client = SentimentClient::new(
        &config.sentiment_api_endpoint,
        &config.sentiment_api_key,
        &config.sentiment_language,
    );
    let limiter = RateLimiter::direct(Quota::per_second(config.sentiment_requests_per_second));

    let reading =
        temperature::take_temperature(&twitter_client, &sentiment_client, &limiter, query).await?;

    let mut stdout = stdout().lock();
    match format {
        Format::Text => report::write_reading(&mut stdout, &reading, layout())?,
        Format::Json => report::write_reading_json(&mut stdout, &reading)?,
    }
    Ok(())
}

fn parks(name: Option<&str>, format: Format) -> Result<()> {
    let mut stdout = stdout().lock();
    match (name, format) {
        (None, Format::Text) => {
            report::write_park_names(&mut stdout, &national_parks::park_names())?
        }
        (None, Format::Json) => report::write_json(&mut stdout, national_parks::NATIONAL_PARKS)?,
        (Some(name), format) => {
            let park = national_parks::find_park(name).ok_or(anyhow!(
                "Unknown park `{name}`, expected one of: {}",
                national_parks::park_names().join(", ")
            ))?;
            match format {
                Format::Text => report::write_park(&mut stdout, park, layout())?,
                Format::Json => report::write_json(&mut stdout, park)?,
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Search { query, format } => search(&query, format).await,
        Command::Parks { name, format } => parks(name.as_deref(), format),
    }
}
