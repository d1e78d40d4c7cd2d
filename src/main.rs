use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::io;
use std::time::Duration;
use terminal_session::application::client::TerminalClient;
use terminal_session::application::workflow::{CheckoutWorkflow, ReaderSelection};
use terminal_session::domain::ports::CardCollectorBox;
use terminal_session::infrastructure::http::HttpTransport;
use terminal_session::interfaces::cli::output::{ReaderTable, write_receipt};
use terminal_session::interfaces::cli::prompt::{AssumeCollected, PromptCollector};
use terminal_session::interfaces::cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; credentials may come from the environment.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = cli.session_context();

    let timeout = Duration::from_secs(cli.timeout_secs);
    let transport = HttpTransport::new(cli.api_base.clone(), timeout).into_diagnostic()?;
    let client = TerminalClient::new(Box::new(transport));

    let stdout = io::stdout();
    match cli.command {
        Command::Readers => {
            let readers = client.discover_readers(&ctx).await.into_diagnostic()?;
            ReaderTable::new(stdout.lock())
                .write_readers(&readers)
                .into_diagnostic()?;
        }
        Command::Register { registration_code } => {
            let ip_address = client
                .register_reader(&registration_code, &ctx)
                .await
                .into_diagnostic()?;
            println!("registered reader at {ip_address}");
        }
        Command::Session => {
            let secret = client.get_new_connection_token(&ctx).await.into_diagnostic()?;
            let ctx = ctx.with_pst_token(secret.clone());
            let session_token = client.start_new_rpc_session(&ctx).await.into_diagnostic()?;
            println!("connection_token\t{secret}");
            println!("rpc_session_token\t{session_token}");
        }
        Command::CreateIntent(_) => {
            let id = client.create_payment_intent(&ctx).await.into_diagnostic()?;
            println!("{id}");
        }
        Command::Capture { payment_intent_id } => {
            client.capture_payment_intent(&ctx).await.into_diagnostic()?;
            println!("captured {payment_intent_id}");
        }
        Command::Checkout { reader, no_prompt, .. } => {
            let collector: CardCollectorBox = if no_prompt {
                Box::new(AssumeCollected)
            } else {
                Box::new(PromptCollector)
            };
            let selection = reader.map(ReaderSelection::Id).unwrap_or_default();
            let receipt = CheckoutWorkflow::new(&client, collector.as_ref())
                .run(&ctx, &selection)
                .await
                .into_diagnostic()?;
            write_receipt(stdout.lock(), &receipt).into_diagnostic()?;
        }
    }

    Ok(())
}
