use crate::sentiment_client::{self, Classification, Classifier, DirectLimiter, Sentiment};
use crate::twitter_client::{self, api, TwitterClient};
use anyhow::Result;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Serialize)]
pub struct ClassifiedTweet {
    pub tweet: api::Status,
    pub classification: Classification,
}

/// Everything one search turned up, in the order the search returned it.
#[derive(Clone, Debug, Serialize)]
pub struct Reading {
    pub query: String,
    pub tweets: Vec<ClassifiedTweet>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub other: usize,
}

impl Reading {
    pub fn new(
        query: &str,
        statuses: Vec<api::Status>,
        classifications: Vec<Classification>,
    ) -> Self {
        let tweets = statuses
            .into_iter()
            .zip(classifications)
            .map(|(tweet, classification)| ClassifiedTweet {
                tweet,
                classification,
            })
            .collect();
        Self {
            query: query.to_string(),
            tweets,
        }
    }

    fn counts(&self) -> HashMap<&Sentiment, usize> {
        self.tweets
            .iter()
            .map(|classified| &classified.classification.sentiment)
            .counts()
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for (sentiment, n) in self.counts() {
            match sentiment {
                Sentiment::Positive => tally.positive += n,
                Sentiment::Negative => tally.negative += n,
                Sentiment::Neutral => tally.neutral += n,
                Sentiment::Other(_) => tally.other += n,
            }
        }
        tally
    }

    /// The most common sentiment, or `None` if the reading is empty or tied at the top.
    ///
    /// Buckets are those of `tally`, so unrecognized labels compete as one `other` group;
    /// when that group leads, there is no dominant sentiment.
    pub fn dominant(&self) -> Option<Sentiment> {
        let tally = self.tally();
        let buckets = [
            (Some(Sentiment::Positive), tally.positive),
            (Some(Sentiment::Negative), tally.negative),
            (Some(Sentiment::Neutral), tally.neutral),
            (None, tally.other),
        ];
        let max = buckets.iter().map(|(_, n)| *n).max()?;
        if max == 0 {
            return None;
        }
        match buckets.into_iter().filter(|(_, n)| *n == max).exactly_one() {
            Ok((sentiment, _)) => sentiment,
            Err(_) => None,
        }
    }
}

/// A reading together with its tally, as written out by `--format json`.
#[derive(Serialize)]
pub struct ReadingSummary<'a> {
    #[serde(flatten)]
    pub reading: &'a Reading,
    pub tally: Tally,
    pub dominant: Option<Sentiment>,
}

impl<'a> From<&'a Reading> for ReadingSummary<'a> {
    fn from(reading: &'a Reading) -> Self {
        Self {
            reading,
            tally: reading.tally(),
            dominant: reading.dominant(),
        }
    }
}

pub async fn take_temperature<C: Classifier + ?Sized>(
    twitter_client: &TwitterClient,
    classifier: &C,
    limiter: &DirectLimiter,
    query: &str,
) -> Result<Reading> {
    let statuses = twitter_client.search(query).await?;
    let texts = twitter_client::full_texts(&statuses);
    let classifications = sentiment_client::classify_all(classifier, &texts, limiter).await?;
    Ok(Reading::new(query, statuses, classifications))
}
