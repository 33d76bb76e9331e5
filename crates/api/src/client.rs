//! Fetch-by-URL capability over the game-state REST API.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ApiError;

/// The client's effectful primitive: fetch or post a JSON resource by URL.
///
/// UI modules hold this as a shared trait object; tests substitute an
/// in-memory implementation.
pub trait ApiClient {
    fn get_json(&self, url: &str) -> Result<Value, ApiError>;
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, ApiError>;
    /// Root of the API, used to form collection URLs.
    fn base_url(&self) -> &str;
}

/// Typed fetch on top of [`ApiClient`].
pub fn get<T: DeserializeOwned>(api: &dyn ApiClient, url: &str) -> Result<T, ApiError> {
    let value = api.get_json(url)?;
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        url: url.to_owned(),
        source,
    })
}

/// Typed post on top of [`ApiClient`].
pub fn post<T: DeserializeOwned>(
    api: &dyn ApiClient,
    url: &str,
    body: &Value,
) -> Result<T, ApiError> {
    let value = api.post_json(url, body)?;
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        url: url.to_owned(),
        source,
    })
}

/// URL of a collection endpoint under the API root, optionally asking the
/// server to embed related resources `depth` levels deep.
pub fn collection_url(api: &dyn ApiClient, name: &str, depth: Option<u8>) -> String {
    match depth {
        Some(depth) => format!("{}/{}?depth={}", api.base_url(), name, depth),
        None => format!("{}/{}", api.base_url(), name),
    }
}

/// Detail URL with an embedding depth.
pub fn with_depth(url: &str, depth: u8) -> String {
    format!("{}?depth={}", url, depth)
}

/// URL of a resource action (`move_to` on a movable, `build` on a
/// blueprint, `colonize` on a celestial).
pub fn action_url(resource_url: &str, action: &str) -> String {
    let slash = if resource_url.ends_with('/') { "" } else { "/" };
    format!("{}{}{}/", resource_url, slash, action)
}

/// Blocking HTTP implementation. Requests are chained strictly
/// sequentially, one resource hop at a time.
pub struct HttpApi {
    base: String,
    http: reqwest::blocking::Client,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.to_owned(),
                source,
            })?;
        Ok(Self {
            base: base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    fn decode(url: &str, response: reqwest::blocking::Response) -> Result<Value, ApiError> {
        let status = response.status();
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ApiError::Forbidden {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }
        let text = response.text().map_err(|source| ApiError::Transport {
            url: url.to_owned(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ApiError::Decode {
            url: url.to_owned(),
            source,
        })
    }
}

impl ApiClient for HttpApi {
    fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        log::debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.to_owned(),
                source,
            })?;
        Self::decode(url, response)
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        log::debug!("POST {}", url);
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.to_owned(),
                source,
            })?;
        Self::decode(url, response)
    }

    fn base_url(&self) -> &str {
        &self.base
    }
}
