//! Command-line surface: argument parsing, output rendering and the
//! interactive card-collection prompt.

pub mod output;
pub mod prompt;

use crate::domain::context::{Amount, Currency, SessionContext};
use crate::domain::device::{AppModel, DeviceInfo, HardwareModel, PosInfo};
use crate::error::ValidationError;
use crate::infrastructure::http::DEFAULT_API_BASE;
use clap::{Args, Parser, Subcommand};
use url::Url;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Drive a card-present payment through a Terminal reader",
    long_about = None
)]
pub struct Cli {
    /// Secret API key for the account
    #[arg(long, env = "TERMINAL_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the payments platform API
    #[arg(long, env = "TERMINAL_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: Url,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(flatten)]
    pub device: DeviceArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the readers registered to the account
    Readers,
    /// Register a reader using the code shown on its screen
    Register {
        registration_code: String,
    },
    /// Issue a connection token and open an RPC session with it
    Session,
    /// Create a manual-capture, card-present payment intent
    CreateIntent(ChargeArgs),
    /// Capture a payment intent once the reader has attached a card
    Capture {
        payment_intent_id: String,
    },
    /// Run the full flow: pick a reader, open a session, charge, capture
    Checkout {
        #[command(flatten)]
        charge: ChargeArgs,

        /// Reader to charge on; defaults to the first online reader
        #[arg(long)]
        reader: Option<String>,

        /// Do not wait for confirmation that the card was presented
        #[arg(long)]
        no_prompt: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ChargeArgs {
    /// Amount in minor currency units, e.g. 1099 for 10.99
    #[arg(long, value_parser = parse_amount)]
    pub amount: Amount,

    /// Three-letter ISO currency code
    #[arg(long, default_value = "usd", value_parser = parse_currency)]
    pub currency: Currency,
}

#[derive(Args, Debug, Clone)]
pub struct DeviceArgs {
    #[arg(long, default_value = "POS", global = true)]
    pub device_class: String,

    /// Stable identifier of this POS host; random per run when omitted
    #[arg(long, global = true)]
    pub device_uuid: Option<String>,

    #[arg(long, default_value = std::env::consts::OS, global = true)]
    pub host_os_version: String,

    #[arg(long, default_value = "Terminal quickstart", global = true)]
    pub pos_description: String,

    #[arg(long, default_value = env!("CARGO_PKG_NAME"), global = true)]
    pub app_id: String,

    #[arg(long, default_value = env!("CARGO_PKG_VERSION"), global = true)]
    pub app_version: String,
}

impl DeviceArgs {
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            device_class: self.device_class.clone(),
            device_uuid: self
                .device_uuid
                .clone()
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            host_os_version: self.host_os_version.clone(),
            hardware_model: HardwareModel {
                pos_info: PosInfo {
                    description: self.pos_description.clone(),
                },
            },
            app_model: AppModel {
                app_id: self.app_id.clone(),
                app_version: self.app_version.clone(),
            },
        }
    }
}

impl Cli {
    /// Builds the session context for this invocation.
    ///
    /// Commands that do not charge anything still need a context; they get a
    /// nominal single-unit USD amount that no request reads.
    pub fn session_context(&self) -> SessionContext {
        let (amount, currency) = match &self.command {
            Command::CreateIntent(charge) | Command::Checkout { charge, .. } => {
                (charge.amount, charge.currency.clone())
            }
            _ => (Amount::MIN, Currency::usd()),
        };
        let ctx = SessionContext::new(
            self.api_key.clone(),
            self.device.device_info(),
            amount,
            currency,
        );
        match &self.command {
            Command::Capture { payment_intent_id } => {
                ctx.with_payment_intent_id(payment_intent_id.clone())
            }
            _ => ctx,
        }
    }
}

fn parse_amount(s: &str) -> Result<Amount, String> {
    let value: u64 = s.parse().map_err(|_| ValidationError::InvalidAmount.to_string())?;
    Amount::new(value).map_err(|e| e.to_string())
}

fn parse_currency(s: &str) -> Result<Currency, String> {
    Currency::new(s).map_err(|e| e.to_string())
}
