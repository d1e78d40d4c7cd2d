use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RpcSession {
    pub sdk_rpc_session_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ConnectionToken {
    pub secret: String,
}
