//! Application layer: the Terminal API operations and the checkout workflow.
//!
//! [`client::TerminalClient`] owns the transport. Each remote call is a method
//! on it, grouped by the component it belongs to (reader directory, token
//! issuer, payment intent orchestrator). Calls are strictly sequential and
//! never retried; a failure is returned to the caller as soon as it happens.

pub mod client;
pub mod payment_intents;
pub mod readers;
pub mod tokens;
pub mod workflow;
