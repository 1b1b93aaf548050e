use serde::{Deserialize, Serialize};

/// Body returned by the text-processing.com sentiment endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SentimentResponse {
    pub label: String,
    pub probability: Option<Probability>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Probability {
    pub pos: f64,
    pub neg: f64,
    pub neutral: f64,
}
