use thiserror::Error;

/// Failures talking to the Twitter or sentiment endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: call `authorize` before {0}")]
    Unauthorized(&'static str),

    #[error("{endpoint} responded with {status}: {body}")]
    Status {
        endpoint: String,
        status: hyper::StatusCode,
        body: String,
    },

    #[error("Malformed response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}
