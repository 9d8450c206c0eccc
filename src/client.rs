//! Thin HTTP client bound to one environment profile
//!
//! Every request carries the profile's default headers. Responses are read
//! fully into memory so steps can log the raw body and decode it afterwards.

use std::time::{Duration, Instant};

use actix_web::web::Bytes;
use awc::Client;
use awc::error::{PayloadError, SendRequestError};
use awc::http::StatusCode;
use awc::http::header::{HeaderName, HeaderValue};
use futures_util::Stream;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{ConfigError, Profile};
use crate::error::{SuiteError, SuiteResult};

/// Response bodies larger than this are rejected
const BODY_LIMIT: usize = 2 * 1024 * 1024;

pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

/// Status and full body of a completed request
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: Bytes,
}

impl ApiClient {
    pub fn new(profile: &Profile, timeout: Duration) -> SuiteResult<Self> {
        let mut builder = Client::builder().timeout(timeout);

        for (name, value) in &profile.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ConfigError::ValidationError(format!("invalid header name `{name}`: {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ConfigError::ValidationError(format!("invalid value for header `{name}`: {e}"))
            })?;

            builder = builder.add_default_header((name, value));
        }

        Ok(Self {
            client: builder.finish(),
            base_url: profile.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str) -> SuiteResult<ApiResponse> {
        let url = self.url(path);
        let start = Instant::now();

        ::tracing::debug!(%url, "GET");

        let response = self.client.get(&url).send().await;

        self.read(url, response, start).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> SuiteResult<ApiResponse> {
        let url = self.url(path);
        let start = Instant::now();

        ::tracing::debug!(%url, "POST");

        let response = self.client.post(&url).send_json(body).await;

        self.read(url, response, start).await
    }

    async fn read<S>(
        &self,
        url: String,
        response: Result<awc::ClientResponse<S>, SendRequestError>,
        start: Instant,
    ) -> SuiteResult<ApiResponse>
    where
        S: Stream<Item = Result<Bytes, PayloadError>> + Unpin,
    {
        let mut response = response.map_err(|e| match e {
            SendRequestError::Timeout => {
                SuiteError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
            }
            e => SuiteError::Transport {
                url: url.clone(),
                message: e.to_string(),
            },
        })?;

        let status = response.status();
        let body = response
            .body()
            .limit(BODY_LIMIT)
            .await
            .map_err(|e| SuiteError::Payload {
                url: url.clone(),
                message: e.to_string(),
            })?;

        ::tracing::debug!(%url, status = status.as_u16(), elapsed = ?start.elapsed(), "response received");

        Ok(ApiResponse { url, status, body })
    }
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> SuiteResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Fail with [`SuiteError::Status`] unless the status is 2xx
    pub fn ensure_success(self) -> SuiteResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SuiteError::Status {
                url: self.url.clone(),
                status: self.status.as_u16(),
                body: self.text(),
            })
        }
    }
}
