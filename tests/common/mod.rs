use std::sync::Arc;
use terminal_session::application::client::TerminalClient;
use terminal_session::domain::context::{Amount, Currency, SessionContext};
use terminal_session::domain::device::{AppModel, DeviceInfo, HardwareModel, PosInfo};
use terminal_session::infrastructure::in_memory::InMemoryTransport;

pub const API_KEY: &str = "sk_test_integration";
pub const PST_TOKEN: &str = "pst_test_integration";

pub fn device_info() -> DeviceInfo {
    DeviceInfo {
        device_class: "POS".into(),
        device_uuid: "6f1c8a52-0d3e-4d6b-9c0a-1b2c3d4e5f60".into(),
        host_os_version: "linux".into(),
        hardware_model: HardwareModel {
            pos_info: PosInfo {
                description: "integration till".into(),
            },
        },
        app_model: AppModel {
            app_id: "terminal-session-tests".into(),
            app_version: "0.0.1".into(),
        },
    }
}

pub fn context(amount: u64, currency: &str) -> SessionContext {
    SessionContext::new(
        API_KEY,
        device_info(),
        Amount::new(amount).unwrap(),
        Currency::new(currency).unwrap(),
    )
}

pub fn client() -> (Arc<InMemoryTransport>, TerminalClient) {
    let transport = Arc::new(InMemoryTransport::new());
    let client = TerminalClient::new(Box::new(transport.clone()));
    (transport, client)
}
