//! Platform-facing data model and the ports the application layer drives.

pub mod context;
pub mod device;
pub mod payment_intent;
pub mod ports;
pub mod reader;
pub mod token;
