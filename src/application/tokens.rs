use super::client::TerminalClient;
use crate::domain::context::SessionContext;
use crate::domain::ports::{ApiRequest, Credential};
use crate::domain::token::{ConnectionToken, RpcSession};
use crate::error::{Operation, Result, TerminalError};

pub const CONNECTION_TOKENS_PATH: &str = "/v1/terminal/connection_tokens";
pub const RPC_SESSION_PATH: &str = "/v1/terminal/connection_tokens/generate_pos_rpc_session";

impl TerminalClient {
    /// Opens an RPC session for the device described in the context.
    ///
    /// Authenticates with the context's PST token, never the API key.
    pub async fn start_new_rpc_session(&self, ctx: &SessionContext) -> Result<String> {
        let operation = Operation::StartRpcSession;
        let pst_token = ctx.pst_token().ok_or(TerminalError::MissingContext {
            operation,
            field: "PST token",
        })?;

        let credential = Credential::SessionBearer(pst_token.to_string());
        let request = ApiRequest::post(RPC_SESSION_PATH, credential)
            .with_form(ctx.device_info().form_fields());
        let session: RpcSession = self.execute(operation, request).await?;
        Ok(session.sdk_rpc_session_token)
    }

    /// Requests a connection token for a new reader session and returns its secret.
    pub async fn get_new_connection_token(&self, ctx: &SessionContext) -> Result<String> {
        let credential = Credential::ApiKey(ctx.api_key().to_string());
        let request = ApiRequest::post(CONNECTION_TOKENS_PATH, credential);
        let token: ConnectionToken = self.execute(Operation::GetConnectionToken, request).await?;
        Ok(token.secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::{Amount, Currency};
    use crate::domain::device::{AppModel, DeviceInfo, HardwareModel, PosInfo};
    use crate::infrastructure::in_memory::InMemoryTransport;
    use std::sync::Arc;

    fn device() -> DeviceInfo {
        DeviceInfo {
            device_class: "POS".into(),
            device_uuid: "0b1c".into(),
            host_os_version: "linux".into(),
            hardware_model: HardwareModel {
                pos_info: PosInfo {
                    description: "front desk".into(),
                },
            },
            app_model: AppModel {
                app_id: "terminal-session".into(),
                app_version: "0.1.0".into(),
            },
        }
    }

    fn setup() -> (Arc<InMemoryTransport>, TerminalClient, SessionContext) {
        let transport = Arc::new(InMemoryTransport::new());
        let client = TerminalClient::new(Box::new(transport.clone()));
        let ctx = SessionContext::new(
            "sk_test_key",
            device(),
            Amount::new(100).unwrap(),
            Currency::new("usd").unwrap(),
        );
        (transport, client, ctx)
    }

    #[tokio::test]
    async fn test_rpc_session_uses_pst_token_not_api_key() {
        let (transport, client, ctx) = setup();
        transport
            .respond(200, r#"{"sdk_rpc_session_token":"rpc_abc","expires_at":1700000000}"#)
            .await;

        let token = client
            .start_new_rpc_session(&ctx.with_pst_token("pst_test_xyz"))
            .await
            .unwrap();
        assert_eq!(token, "rpc_abc");

        let requests = transport.requests().await;
        let request = &requests[0];
        assert_eq!(request.path, RPC_SESSION_PATH);
        assert_eq!(request.authorization, "Bearer pst_test_xyz");
        assert!(!request.authorization.contains("sk_test_key"));

        let form = request.form_pairs();
        assert_eq!(form.len(), 6);
        assert!(form.contains(&(
            "pos_device_info[hardware_model][pos_info][description]".to_string(),
            "front desk".to_string()
        )));
        assert!(form.contains(&(
            "pos_device_info[app_model][app_id]".to_string(),
            "terminal-session".to_string()
        )));
    }

    #[tokio::test]
    async fn test_rpc_session_without_pst_token_sends_nothing() {
        let (transport, client, ctx) = setup();

        let err = client.start_new_rpc_session(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            TerminalError::MissingContext {
                operation: Operation::StartRpcSession,
                ..
            }
        ));
        assert!(transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_connection_token_uses_api_key_and_empty_body() {
        let (transport, client, ctx) = setup();
        transport
            .respond(200, r#"{"object":"terminal.connection_token","secret":"pst_test_1"}"#)
            .await;

        let secret = client.get_new_connection_token(&ctx).await.unwrap();
        assert_eq!(secret, "pst_test_1");

        let requests = transport.requests().await;
        let request = &requests[0];
        assert_eq!(request.path, CONNECTION_TOKENS_PATH);
        assert_eq!(request.authorization, "Bearer sk_test_key");
        assert_eq!(request.form, None);
    }

    #[tokio::test]
    async fn test_connection_token_transport_failure() {
        let (transport, client, ctx) = setup();
        transport.fail("connection reset").await;

        let err = client.get_new_connection_token(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            TerminalError::Transport {
                operation: Operation::GetConnectionToken,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_failure() {
        let (transport, client, ctx) = setup();
        transport.respond(200, "<html>maintenance</html>").await;

        let err = client.get_new_connection_token(&ctx).await.unwrap_err();
        assert!(matches!(err, TerminalError::DecodeFailed { .. }));
        assert_eq!(transport.released(), 1);
    }
}
