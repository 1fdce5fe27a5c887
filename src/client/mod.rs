//! Cache Client
//!
//! An HTTP client exposing the same operations as [`Cache`](crate::cache::Cache)
//! against a remote server.
//!
//! ```rust,no_run
//! use memory_cache::client::CacheClient;
//! use chrono::Duration;
//!
//! # async fn example() -> Result<(), memory_cache::client::Error> {
//! let client = CacheClient::new("127.0.0.1:8080")?;
//! client.set("key", "value", Duration::hours(1)).await?;
//! let value = client.get("key").await?;
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::Error;

use std::time::Duration as StdDuration;

use chrono::Duration;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::cache::Value;
use crate::models::{ErrorResponse, KeysResponse, SetRequest, ValueResponse};

const REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(10);
const IDLE_TIMEOUT: StdDuration = StdDuration::from_secs(30);
const MAX_IDLE_PER_HOST: usize = 10;

/// Remote cache client. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct CacheClient {
    base_url: Url,
    http: Client,
}

impl CacheClient {
    /// Creates a client for the server listening on `server_addr` (`host:port`).
    pub fn new(server_addr: &str) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{}", server_addr))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", server_addr, e)))?;
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_idle_timeout(IDLE_TIMEOUT)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .build()?;

        Ok(Self {
            base_url,
            http,
        })
    }

    /// Stores `value` under `key` for `ttl`.
    pub async fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
        ttl: Duration,
    ) -> Result<(), Error> {
        let req = SetRequest {
            key: key.into(),
            value: serde_json::to_value(value.into())?,
            ttl: ttl.into(),
        };

        let response = self
            .http
            .post(self.url(&["set"])?)
            .json(&req)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<Value, Error> {
        self.value(self.url(&["get", key])?).await
    }

    pub async fn get_list_elem(&self, key: &str, index: i64) -> Result<Value, Error> {
        self.value(self.url(&["getListElem", key, &index.to_string()])?)
            .await
    }

    pub async fn get_map_elem_value(&self, key: &str, map_key: &str) -> Result<Value, Error> {
        self.value(self.url(&["getMapElemValue", key, map_key])?)
            .await
    }

    pub async fn remove(&self, key: &str) -> Result<(), Error> {
        let response = self
            .http
            .delete(self.url(&["remove", key])?)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn keys(&self) -> Result<Vec<String>, Error> {
        let resp: KeysResponse = self.fetch(self.url(&["keys"])?).await?;
        Ok(resp.keys)
    }

    /// Builds an endpoint URL. Each segment is percent-encoded, so keys may
    /// contain `/`, `?`, `#` or spaces.
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn value(&self, url: Url) -> Result<Value, Error> {
        let resp: ValueResponse = self.fetch(url).await?;
        Ok(resp.value)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        let response = self.http.get(url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Turns a non-success response into an [`Error`], preferring the typed cache error.
async fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => match err.cache_error() {
            Some(cache_error) => Err(Error::Cache(cache_error)),
            None => Err(Error::Status {
                status,
                message: err.error,
            }),
        },
        Err(_) => Err(Error::Status {
            status,
            message: body,
        }),
    }
}
