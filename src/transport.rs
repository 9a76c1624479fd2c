//! HTTP transport for the contact form endpoint.
//!
//! The [`Transport`] trait is the seam between the submission flow and the
//! network. The production implementation, [`HttpTransport`], is built on
//! `reqwest`, which compiles to the browser's `fetch` on wasm32 and to hyper
//! natively, so the page and the `folio probe` command share one code path.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use reqwest::header::ACCEPT;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("network unavailable: {0}")]
    Network(String),
}

/// Raw endpoint reply: status code and undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormResponse {
    pub status: u16,
    pub body: String,
}

impl FormResponse {
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// POSTs a field set to a form endpoint.
pub trait Transport {
    fn post_form<'a>(
        &'a self,
        endpoint: &'a str,
        fields: &'a [(String, String)],
    ) -> LocalBoxFuture<'a, Result<FormResponse, TransportError>>;
}

/// `reqwest`-backed transport sending urlencoded fields with
/// `Accept: application/json`.
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    fn post_form<'a>(
        &'a self,
        endpoint: &'a str,
        fields: &'a [(String, String)],
    ) -> LocalBoxFuture<'a, Result<FormResponse, TransportError>> {
        async move {
            let response = self
                .client
                .post(endpoint)
                .header(ACCEPT, "application/json")
                .form(fields)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            tracing::debug!(status, bytes = body.len(), "form endpoint replied");
            Ok(FormResponse { status, body })
        }
        .boxed_local()
    }
}
