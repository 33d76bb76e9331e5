//! Error taxonomy for remote API access.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 403. The session is not (or no longer) authorized; callers
    /// decide whether to bounce the player to a login flow.
    #[error("access to {url} was refused")]
    Forbidden { url: String },

    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} could not be completed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {url} was not the expected shape")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A collection the client depends on came back empty (no world, no
    /// user, …).
    #[error("the API returned no {what}")]
    Missing { what: &'static str },
}
