use super::client::TerminalClient;
use crate::domain::context::SessionContext;
use crate::domain::payment_intent::{
    CAPTURE_METHOD, CreatedPaymentIntent, DESCRIPTION, PAYMENT_METHOD_TYPE,
};
use crate::domain::ports::{ApiRequest, Credential};
use crate::error::{Operation, Result, TerminalError};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

pub const PAYMENT_INTENTS_PATH: &str = "/v1/payment_intents";

/// Bytes escaped when an id is placed in a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

impl TerminalClient {
    /// Creates a card-present payment intent for the context's amount and
    /// currency, to be captured manually once the reader attaches a card.
    pub async fn create_payment_intent(&self, ctx: &SessionContext) -> Result<String> {
        let amount = ctx.amount().to_string();
        let credential = Credential::ApiKey(ctx.api_key().to_string());
        let request = ApiRequest::post(PAYMENT_INTENTS_PATH, credential).with_form([
            ("amount", amount.as_str()),
            ("currency", ctx.currency().as_str()),
            ("payment_method_types[]", PAYMENT_METHOD_TYPE),
            ("capture_method", CAPTURE_METHOD),
            ("description", DESCRIPTION),
        ]);
        let intent: CreatedPaymentIntent =
            self.execute(Operation::CreatePaymentIntent, request).await?;
        Ok(intent.id)
    }

    /// Captures the payment intent named in the context.
    ///
    /// Every failure surfaces as [`TerminalError::CaptureFailed`]; the
    /// underlying error, if any, is kept as its source.
    pub async fn capture_payment_intent(&self, ctx: &SessionContext) -> Result<()> {
        let operation = Operation::CapturePaymentIntent;
        let Some(id) = ctx.payment_intent_id() else {
            return Err(TerminalError::CaptureFailed {
                cause: Some(Box::new(TerminalError::MissingContext {
                    operation,
                    field: "payment intent id",
                })),
            });
        };

        let path = format!(
            "{PAYMENT_INTENTS_PATH}/{}/capture",
            utf8_percent_encode(id, PATH_SEGMENT)
        );
        let request = ApiRequest::post(path, Credential::ApiKey(ctx.api_key().to_string()));

        match self.send(operation, request).await {
            Ok(response) => {
                drop(response);
                Ok(())
            }
            Err(cause) => Err(TerminalError::CaptureFailed {
                cause: Some(Box::new(cause)),
            }),
        }
    }
}
