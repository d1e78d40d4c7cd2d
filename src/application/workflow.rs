use super::client::TerminalClient;
use crate::domain::context::{Amount, Currency, SessionContext};
use crate::domain::ports::{CardCollector, CollectionRequest};
use crate::domain::reader::Reader;
use crate::error::{Result, TerminalError};

/// How the checkout picks the reader to charge on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReaderSelection {
    #[default]
    FirstOnline,
    Id(String),
}

impl ReaderSelection {
    fn pick(&self, readers: Vec<Reader>) -> Result<Reader> {
        match self {
            ReaderSelection::FirstOnline => readers
                .into_iter()
                .find(Reader::is_online)
                .ok_or(TerminalError::NoReaderAvailable { wanted: None }),
            ReaderSelection::Id(id) => {
                let reader = readers
                    .into_iter()
                    .find(|reader| &reader.id == id)
                    .ok_or_else(|| TerminalError::NoReaderAvailable {
                        wanted: Some(id.clone()),
                    })?;
                if !reader.is_online() {
                    tracing::warn!(
                        reader = %reader.id,
                        status = ?reader.status,
                        "selected reader is not online"
                    );
                }
                Ok(reader)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub reader: Reader,
    pub payment_intent_id: String,
    pub amount: Amount,
    pub currency: Currency,
}

/// Runs one complete card-present payment.
///
/// Discovery, tokens, intent creation and capture go through the
/// [`TerminalClient`]; collecting the card is handed to the [`CardCollector`].
/// The context is threaded forward by value: each step's output is folded
/// into a new context for the next step.
pub struct CheckoutWorkflow<'a> {
    client: &'a TerminalClient,
    collector: &'a dyn CardCollector,
}

impl<'a> CheckoutWorkflow<'a> {
    pub fn new(client: &'a TerminalClient, collector: &'a dyn CardCollector) -> Self {
        Self { client, collector }
    }

    pub async fn run(
        &self,
        ctx: &SessionContext,
        selection: &ReaderSelection,
    ) -> Result<CheckoutReceipt> {
        let readers = self.client.discover_readers(ctx).await?;
        let reader = selection.pick(readers)?;
        tracing::info!(reader = %reader.id, "using reader");

        let connection_secret = self.client.get_new_connection_token(ctx).await?;
        let ctx = ctx.with_pst_token(connection_secret);

        let rpc_session_token = self.client.start_new_rpc_session(&ctx).await?;
        tracing::info!("RPC session started");

        let payment_intent_id = self.client.create_payment_intent(&ctx).await?;
        let ctx = ctx.with_payment_intent_id(payment_intent_id.clone());
        tracing::info!(
            payment_intent = %payment_intent_id,
            amount = %ctx.amount(),
            currency = %ctx.currency(),
            "payment intent created"
        );

        self.collector
            .collect(CollectionRequest {
                reader: &reader,
                rpc_session_token: &rpc_session_token,
                payment_intent_id: &payment_intent_id,
                amount: ctx.amount().value(),
                currency: ctx.currency().as_str(),
            })
            .await
            .map_err(TerminalError::CollectionFailed)?;

        self.client.capture_payment_intent(&ctx).await?;
        tracing::info!(payment_intent = %payment_intent_id, "payment captured");

        Ok(CheckoutReceipt {
            reader,
            payment_intent_id,
            amount: ctx.amount(),
            currency: ctx.currency().clone(),
        })
    }
}
