use std::fmt;
use thiserror::Error;

/// The remote calls this crate knows how to make.
///
/// Carried by every [`TerminalError`] so a caller can tell which step of the
/// session failed without parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListReaders,
    RegisterReader,
    StartRpcSession,
    GetConnectionToken,
    CreatePaymentIntent,
    CapturePaymentIntent,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListReaders => "list readers",
            Operation::RegisterReader => "register reader",
            Operation::StartRpcSession => "start RPC session",
            Operation::GetConnectionToken => "get connection token",
            Operation::CreatePaymentIntent => "create payment intent",
            Operation::CapturePaymentIntent => "capture payment intent",
        };
        f.write_str(name)
    }
}

/// Failures of the HTTP adapter itself: nothing was received from the platform.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("platform unreachable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("{operation}: transport error")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },
    #[error("{operation}: unexpected HTTP status {status}")]
    UnexpectedStatus { operation: Operation, status: u16 },
    #[error("{operation}: could not decode response")]
    DecodeFailed {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
    #[error("capture failed")]
    CaptureFailed {
        #[source]
        cause: Option<Box<TerminalError>>,
    },
    #[error("{operation}: session context has no {field}")]
    MissingContext {
        operation: Operation,
        field: &'static str,
    },
    #[error("no reader available{}", with_id(.wanted))]
    NoReaderAvailable { wanted: Option<String> },
    #[error("card collection failed: {0}")]
    CollectionFailed(String),
}

fn with_id(wanted: &Option<String>) -> String {
    wanted
        .as_ref()
        .map(|id| format!(" with id {id}"))
        .unwrap_or_default()
}

impl TerminalError {
    /// The operation the error originated from, if it came from a remote call.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            TerminalError::Transport { operation, .. }
            | TerminalError::UnexpectedStatus { operation, .. }
            | TerminalError::DecodeFailed { operation, .. }
            | TerminalError::MissingContext { operation, .. } => Some(*operation),
            TerminalError::CaptureFailed { .. } => Some(Operation::CapturePaymentIntent),
            TerminalError::NoReaderAvailable { .. } | TerminalError::CollectionFailed(_) => None,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount must be a positive number of minor currency units")]
    InvalidAmount,
    #[error("currency must be a three-letter ISO code, got {0:?}")]
    InvalidCurrency(String),
}

pub type Result<T> = std::result::Result<T, TerminalError>;
