use super::client::TerminalClient;
use crate::domain::context::SessionContext;
use crate::domain::ports::{ApiRequest, Credential};
use crate::domain::reader::{Reader, ReaderList, RegisteredReader};
use crate::error::{Operation, Result};
use std::collections::HashSet;

pub const READERS_PATH: &str = "/v1/terminal/readers";
pub const PAGE_LIMIT: usize = 100;

impl TerminalClient {
    /// Lists every reader registered to the account.
    ///
    /// Pages are followed with `starting_after` until `has_more` is false.
    /// Order is preserved and a reader id seen on an earlier page is skipped,
    /// so the returned ids are pairwise distinct. A page that adds nothing new
    /// ends the walk even if the platform still reports `has_more`.
    pub async fn discover_readers(&self, ctx: &SessionContext) -> Result<Vec<Reader>> {
        let mut readers = Vec::new();
        let mut seen = HashSet::new();
        let mut starting_after: Option<String> = None;

        loop {
            let path = match &starting_after {
                Some(last) => format!(
                    "{READERS_PATH}?limit={PAGE_LIMIT}&starting_after={}",
                    url::form_urlencoded::byte_serialize(last.as_bytes()).collect::<String>()
                ),
                None => format!("{READERS_PATH}?limit={PAGE_LIMIT}"),
            };
            let request = ApiRequest::get(path, Credential::ApiKey(ctx.api_key().to_string()));
            let page: ReaderList = self.execute(Operation::ListReaders, request).await?;

            let last_id = page.data.last().map(|reader| reader.id.clone());
            let before = readers.len();
            for reader in page.data {
                if seen.insert(reader.id.clone()) {
                    readers.push(reader);
                } else {
                    tracing::warn!(reader = %reader.id, "duplicate reader in listing, skipping");
                }
            }

            if !page.has_more || readers.len() == before {
                break;
            }
            starting_after = last_id;
        }

        tracing::debug!(count = readers.len(), "discovered readers");
        Ok(readers)
    }

    /// Registers a reader by the code shown on its screen and returns its IP address.
    pub async fn register_reader(
        &self,
        registration_code: &str,
        ctx: &SessionContext,
    ) -> Result<String> {
        let credential = Credential::ApiKey(ctx.api_key().to_string());
        let request = ApiRequest::post(READERS_PATH, credential)
            .with_form([("registration_code", registration_code)]);
        let registered: RegisteredReader =
            self.execute(Operation::RegisterReader, request).await?;
        Ok(registered.ip_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::{Amount, Currency};
    use crate::domain::device::DeviceInfo;
    use crate::error::TerminalError;
    use crate::infrastructure::in_memory::InMemoryTransport;
    use std::sync::Arc;

    fn setup() -> (Arc<InMemoryTransport>, TerminalClient, SessionContext) {
        let transport = Arc::new(InMemoryTransport::new());
        let client = TerminalClient::new(Box::new(transport.clone()));
        let ctx = SessionContext::new(
            "sk_test_key",
            DeviceInfo::default(),
            Amount::new(100).unwrap(),
            Currency::new("usd").unwrap(),
        );
        (transport, client, ctx)
    }

    #[tokio::test]
    async fn test_single_page_keeps_order() {
        let (transport, client, ctx) = setup();
        transport
            .respond(
                200,
                r#"{"object":"list","has_more":false,"data":[{"id":"tmr_1"},{"id":"tmr_2"}]}"#,
            )
            .await;

        let readers = client.discover_readers(&ctx).await.unwrap();
        let ids: Vec<_> = readers.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["tmr_1", "tmr_2"]);

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/v1/terminal/readers?limit=100");
        assert_eq!(requests[0].authorization, "Bearer sk_test_key");
    }

    #[tokio::test]
    async fn test_follows_pages_with_starting_after() {
        let (transport, client, ctx) = setup();
        transport
            .respond(200, r#"{"has_more":true,"data":[{"id":"tmr_1"},{"id":"tmr_2"}]}"#)
            .await;
        transport
            .respond(200, r#"{"has_more":false,"data":[{"id":"tmr_3"}]}"#)
            .await;

        let readers = client.discover_readers(&ctx).await.unwrap();
        assert_eq!(readers.len(), 3);
        assert_eq!(readers[2].id, "tmr_3");

        let requests = transport.requests().await;
        assert_eq!(
            requests[1].path,
            "/v1/terminal/readers?limit=100&starting_after=tmr_2"
        );
        assert_eq!(transport.released(), 2);
    }

    #[tokio::test]
    async fn test_duplicates_are_dropped_and_stalled_paging_stops() {
        let (transport, client, ctx) = setup();
        transport
            .respond(200, r#"{"has_more":true,"data":[{"id":"tmr_1"},{"id":"tmr_1"}]}"#)
            .await;
        // The platform keeps answering with the same page.
        transport
            .respond(200, r#"{"has_more":true,"data":[{"id":"tmr_1"}]}"#)
            .await;

        let readers = client.discover_readers(&ctx).await.unwrap();
        assert_eq!(readers.len(), 1);
        assert_eq!(transport.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_non_200_is_an_error_not_an_empty_list() {
        let (transport, client, ctx) = setup();
        transport.respond(401, r#"{"error":{"type":"invalid_request_error"}}"#).await;

        let err = client.discover_readers(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            TerminalError::UnexpectedStatus {
                operation: Operation::ListReaders,
                status: 401
            }
        ));
        assert_eq!(transport.released(), 1);
    }

    #[tokio::test]
    async fn test_register_reader_posts_code() {
        let (transport, client, ctx) = setup();
        transport.respond(200, r#"{"id":"tmr_9","ip_address":"10.0.0.7"}"#).await;

        let ip = client.register_reader("simulated-wpe", &ctx).await.unwrap();
        assert_eq!(ip, "10.0.0.7");

        let requests = transport.requests().await;
        assert_eq!(requests[0].path, READERS_PATH);
        assert_eq!(
            requests[0].form_pairs(),
            vec![("registration_code".to_string(), "simulated-wpe".to_string())]
        );
    }

    #[tokio::test]
    async fn test_register_reader_without_ip_is_decode_failure() {
        let (transport, client, ctx) = setup();
        transport.respond(200, r#"{"id":"tmr_9"}"#).await;

        let err = client.register_reader("code", &ctx).await.unwrap_err();
        assert!(matches!(err, TerminalError::DecodeFailed { .. }));
    }
}
