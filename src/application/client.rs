use crate::domain::ports::{ApiRequest, RawResponse, TransportBox};
use crate::error::{Operation, Result, TerminalError};
use serde::de::DeserializeOwned;

/// Entry point for the Terminal API calls.
///
/// `TerminalClient` owns the transport and nothing else: every operation takes
/// the session context by reference and returns its result as a fresh value.
/// The operations themselves live in the `readers`, `tokens` and
/// `payment_intents` modules.
pub struct TerminalClient {
    transport: TransportBox,
}

impl TerminalClient {
    pub fn new(transport: TransportBox) -> Self {
        Self { transport }
    }

    /// Sends the request and accepts only HTTP 200.
    ///
    /// On any other status the body is dropped before returning.
    pub(crate) async fn send(
        &self,
        operation: Operation,
        request: ApiRequest,
    ) -> Result<RawResponse> {
        let response = self
            .transport
            .perform(request)
            .await
            .map_err(|source| TerminalError::Transport { operation, source })?;

        if response.status != 200 {
            return Err(TerminalError::UnexpectedStatus {
                operation,
                status: response.status,
            });
        }

        Ok(response)
    }

    /// Sends the request and decodes the JSON body into `T`.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: ApiRequest,
    ) -> Result<T> {
        let response = self.send(operation, request).await?;
        let bytes = response
            .body
            .read_all()
            .await
            .map_err(|source| TerminalError::Transport { operation, source })?;

        serde_json::from_slice(&bytes)
            .map_err(|source| TerminalError::DecodeFailed { operation, source })
    }
}
