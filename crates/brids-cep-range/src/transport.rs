//! HTTP access to the Correios site.
//!
//! The range source talks to the network only through [`Transport`], so the
//! protocol can be driven against scripted pages in tests.

use crate::error::{RangeError, Result};
use brids_core::CorreiosConfig;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// Encoding of the Correios pages, used when the response names none.
pub const DEFAULT_CHARSET: &str = "iso-8859-1";

/// Blocking request primitives used by the range source.
pub trait Transport {
    /// GET `url` and return the response body.
    fn get(&mut self, url: &str) -> Result<String>;

    /// POST `form` as `application/x-www-form-urlencoded` and return the body.
    fn post_form(&mut self, url: &str, form: &[(&str, String)]) -> Result<String>;

    /// Release the underlying connection resources.
    ///
    /// Later requests fail with [`RangeError::ClientClosed`].
    fn close(&mut self) {}
}

/// [`Transport`] over a blocking `reqwest` client.
///
/// The client is dropped on [`close`](Transport::close) or when the
/// transport itself is dropped.
pub struct HttpTransport {
    client: Option<Client>,
}

impl HttpTransport {
    /// Build a client presenting `user_agent`, with the given request timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| RangeError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client: Some(client),
        })
    }

    /// Build a client from the `[correios]` configuration section.
    pub fn from_config(config: &CorreiosConfig) -> Result<Self> {
        Self::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }

    fn client(&self) -> Result<&Client> {
        self.client.as_ref().ok_or(RangeError::ClientClosed)
    }

    fn read_body(url: &str, response: reqwest::Result<Response>) -> Result<String> {
        let response = response.map_err(|e| RangeError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RangeError::Status {
                url: url.to_string(),
                http_status: status.as_u16(),
            });
        }

        response
            .text_with_charset(DEFAULT_CHARSET)
            .map_err(|e| RangeError::Request {
                url: url.to_string(),
                reason: format!("failed to read body: {e}"),
            })
    }
}

impl Transport for HttpTransport {
    fn get(&mut self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self.client()?.get(url).send();
        Self::read_body(url, response)
    }

    fn post_form(&mut self, url: &str, form: &[(&str, String)]) -> Result<String> {
        tracing::debug!("POST {} {:?}", url, form);
        let response = self.client()?.post(url).form(form).send();
        Self::read_body(url, response)
    }

    fn close(&mut self) {
        if self.client.take().is_some() {
            tracing::debug!("HTTP client closed");
        }
    }
}
