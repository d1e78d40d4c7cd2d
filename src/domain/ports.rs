use super::reader::Reader;
use crate::error::TransportError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
        })
    }
}

/// Which secret authenticates a request.
///
/// The primary API is reached with the account's API key; the RPC session
/// endpoint only accepts the PST token issued for the device.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    ApiKey(String),
    SessionBearer(String),
}

impl Credential {
    /// Value of the `Authorization` header for this credential.
    pub fn authorization(&self) -> String {
        match self {
            Credential::ApiKey(secret) | Credential::SessionBearer(secret) => {
                format!("Bearer {secret}")
            }
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Credential::SessionBearer(_) => f.write_str("SessionBearer(<redacted>)"),
        }
    }
}

/// A request relative to the platform's base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub credential: Credential,
    /// `application/x-www-form-urlencoded` body, if any.
    pub form: Option<String>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>, credential: Credential) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            credential,
            form: None,
        }
    }

    pub fn post(path: impl Into<String>, credential: Credential) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            credential,
            form: None,
        }
    }

    pub fn with_form<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in pairs {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
        self.form = Some(serializer.finish());
        self
    }
}

/// A response body still held open by the transport.
///
/// Reading consumes the body; dropping it unread releases it. Either way it
/// is released exactly once.
#[async_trait]
pub trait ResponseBody: Send {
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, TransportError>;
}

pub struct RawResponse {
    pub status: u16,
    pub body: Box<dyn ResponseBody>,
}

impl fmt::Debug for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Sends authenticated requests to the payments platform.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn perform(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        (**self).perform(request).await
    }
}

/// What the card collector needs to drive the reader.
#[derive(Debug, Clone, Copy)]
pub struct CollectionRequest<'a> {
    pub reader: &'a Reader,
    pub rpc_session_token: &'a str,
    pub payment_intent_id: &'a str,
    pub amount: u64,
    pub currency: &'a str,
}

/// The out-of-band step where the reader hardware collects the card and
/// attaches the payment method to the intent.
#[async_trait]
pub trait CardCollector: Send + Sync {
    async fn collect(&self, request: CollectionRequest<'_>) -> Result<(), String>;
}

pub type TransportBox = Box<dyn Transport>;
pub type CardCollectorBox = Box<dyn CardCollector>;
