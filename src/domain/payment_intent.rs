use serde::Deserialize;

/// Card-present methods are attached by the reader after the intent exists,
/// so intents are always created for manual capture.
pub const PAYMENT_METHOD_TYPE: &str = "card_present";
pub const CAPTURE_METHOD: &str = "manual";
pub const DESCRIPTION: &str = "Terminal quickstart test payment";

#[derive(Debug, Deserialize)]
pub struct CreatedPaymentIntent {
    pub id: String,
}
