use crate::domain::ports::{ApiRequest, Method, RawResponse, ResponseBody, Transport};
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Talks to the platform over HTTPS with `reqwest`.
///
/// Paths in [`ApiRequest`] are appended to the configured base URL, so a base
/// with a path prefix (a proxy, a mock server) works as expected.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        let base = self.base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.url_for(&request.path)?;
        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };

        let mut builder = builder
            .header(AUTHORIZATION, request.credential.authorization())
            .header(USER_AGENT, concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(form) = request.form {
            builder = builder.header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(form);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        tracing::debug!(method = %request.method, path = %request.path, status, "platform request");

        Ok(RawResponse {
            status,
            body: Box::new(HttpBody(response)),
        })
    }
}

struct HttpBody(reqwest::Response);

#[async_trait]
impl ResponseBody for HttpBody {
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, TransportError> {
        Ok(self.0.bytes().await?.to_vec())
    }
}
