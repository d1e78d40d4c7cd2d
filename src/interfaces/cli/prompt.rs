use crate::domain::ports::{CardCollector, CollectionRequest};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Asks the operator to present a card on the reader and waits for Enter.
///
/// Driving the reader itself happens outside this process; the prompt only
/// marks the point where the payment method gets attached to the intent.
pub struct PromptCollector;

#[async_trait]
impl CardCollector for PromptCollector {
    async fn collect(&self, request: CollectionRequest<'_>) -> Result<(), String> {
        eprintln!(
            "Present a card on reader {} for {} {} (payment intent {}), then press Enter.",
            request.reader.id,
            request.amount,
            request.currency.to_uppercase(),
            request.payment_intent_id
        );

        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await
            .map_err(|e| e.to_string())?;
        if read == 0 {
            return Err("input closed before the card was presented".to_string());
        }
        Ok(())
    }
}

/// Assumes the card has already been collected; used with `--no-prompt`.
pub struct AssumeCollected;

#[async_trait]
impl CardCollector for AssumeCollected {
    async fn collect(&self, request: CollectionRequest<'_>) -> Result<(), String> {
        tracing::debug!(
            reader = %request.reader.id,
            payment_intent = %request.payment_intent_id,
            "skipping card prompt"
        );
        Ok(())
    }
}
