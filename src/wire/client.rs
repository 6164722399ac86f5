use std::{
    fmt::Display,
    sync::Arc,
    time::{Duration, Instant},
};

use async_std::future::timeout;
use http_client::{
    http_types::{StatusCode, Url},
    Body, HttpClient, Request,
};

use super::ssl::{RetrieveRequest, RetrieveResult, STATUS_SUCCESS};
use crate::error::{CertbunError, CertbunResult};

pub struct PorkbunClient {
    http: Arc<dyn HttpClient>,
    base_url: Url,
    timeout: Duration,
}

impl PorkbunClient {
    pub fn new<U>(http: impl Into<Arc<dyn HttpClient>>, base_url: U) -> CertbunResult<Self>
    where
        U: TryInto<Url>,
        U::Error: Display,
    {
        let url = base_url
            .try_into()
            .map_err(|err| CertbunError::InvalidBaseUrl(err.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(CertbunError::InvalidBaseUrl(
                "cannot be a base URL".to_string(),
            ));
        }
        Ok(Self {
            http: http.into(),
            base_url: url,
            timeout: crate::DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Bounds the whole exchange, body included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Retrieves the certificate bundle for `domain` in a single attempt.
    pub async fn retrieve_ssl(
        &self,
        api_key: &str,
        secret_api_key: &str,
        domain: &str,
    ) -> CertbunResult<RetrieveResult> {
        let url = self.domain_url(domain);
        tracing::debug!(%url, "requesting ssl bundle");

        let mut req = Request::post(url);
        let body = Body::from_json(&RetrieveRequest {
            api_key,
            secret_api_key,
        })
        .map_err(CertbunError::Encode)?;
        req.set_body(body);

        let deadline = Instant::now() + self.timeout;
        let mut resp = timeout(self.timeout, self.http.send(req))
            .await
            .unwrap_or_else(|_| Err(self.timed_out()))
            .map_err(CertbunError::Transport)?;

        let status = u16::from(resp.status());
        let remaining = deadline.saturating_duration_since(Instant::now());
        let body = timeout(remaining, resp.body_bytes())
            .await
            .unwrap_or_else(|_| Err(self.timed_out()));
        tracing::debug!(status, "received response");

        // Error statuses win over a failed body read.
        if status > 299 {
            let body = body.unwrap_or_default();
            return Err(CertbunError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        let body = body.map_err(CertbunError::ReadBody)?;

        let result: RetrieveResult =
            serde_json::from_slice(&body).map_err(CertbunError::Decode)?;
        if result.status != STATUS_SUCCESS {
            tracing::warn!(status = %result.status, "api reported non-success status");
        }
        Ok(result)
    }

    fn timed_out(&self) -> http_client::Error {
        http_client::Error::from_str(
            StatusCode::RequestTimeout,
            format!("request timed out after {:?}", self.timeout),
        )
    }

    fn domain_url(&self, domain: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(domain);
        }
        url
    }
}
