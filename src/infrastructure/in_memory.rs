use crate::domain::ports::{ApiRequest, Method, RawResponse, ResponseBody, Transport};
use crate::error::TransportError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// A request as the in-memory platform saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: String,
    pub form: Option<String>,
}

impl RecordedRequest {
    /// Decoded form body, in the order it was sent.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        self.form
            .as_deref()
            .map(|form| {
                url::form_urlencoded::parse(form.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

enum Scripted {
    Reply { status: u16, body: Vec<u8> },
    Fail(String),
}

/// A scripted stand-in for the payments platform.
///
/// Replies are handed out in the order they were queued, one per request.
/// Every body it issues counts its own release, so callers can check that
/// nothing is leaked on success or failure paths.
#[derive(Default)]
pub struct InMemoryTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RecordedRequest>>,
    issued: AtomicUsize,
    released: Arc<AtomicUsize>,
}

impl InMemoryTransport {
    /// Creates a platform with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply with the given status and JSON body.
    pub async fn respond(&self, status: u16, body: &str) {
        self.script.lock().await.push_back(Scripted::Reply {
            status,
            body: body.as_bytes().to_vec(),
        });
    }

    /// Queues a transport failure: the request never reaches the platform.
    pub async fn fail(&self, reason: &str) {
        self.script
            .lock()
            .await
            .push_back(Scripted::Fail(reason.to_string()));
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of response bodies handed out.
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }

    /// Number of response bodies released so far.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn perform(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().await.push(RecordedRequest {
            method: request.method,
            path: request.path.clone(),
            authorization: request.credential.authorization(),
            form: request.form.clone(),
        });

        let next = self.script.lock().await.pop_front();
        match next {
            Some(Scripted::Reply { status, body }) => {
                self.issued.fetch_add(1, Ordering::SeqCst);
                Ok(RawResponse {
                    status,
                    body: Box::new(InMemoryBody {
                        bytes: body,
                        released: self.released.clone(),
                    }),
                })
            }
            Some(Scripted::Fail(reason)) => Err(TransportError::Unavailable(reason)),
            None => Err(TransportError::Unavailable(format!(
                "no reply queued for {} {}",
                request.method, request.path
            ))),
        }
    }
}

struct InMemoryBody {
    bytes: Vec<u8>,
    released: Arc<AtomicUsize>,
}

#[async_trait]
impl ResponseBody for InMemoryBody {
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, TransportError> {
        let mut body = self;
        Ok(std::mem::take(&mut body.bytes))
    }
}

impl Drop for InMemoryBody {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
