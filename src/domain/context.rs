use super::device::DeviceInfo;
use crate::error::ValidationError;
use std::fmt;

/// A positive charge amount in minor currency units (cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(u64);

impl Amount {
    pub const MIN: Self = Self(1);

    pub fn new(minor_units: u64) -> Result<Self, ValidationError> {
        if minor_units > 0 {
            Ok(Self(minor_units))
        } else {
            Err(ValidationError::InvalidAmount)
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Amount {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISO 4217 currency code, stored lower case as the platform expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_lowercase()))
        } else {
            Err(ValidationError::InvalidCurrency(code.to_string()))
        }
    }

    pub fn usd() -> Self {
        Self("usd".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a single terminal session needs to talk to the platform.
///
/// The context is never mutated. Values produced along the way (the PST token,
/// the payment intent id) are folded in with the `with_*` methods, which
/// return a new context and leave the original untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionContext {
    api_key: String,
    device_info: DeviceInfo,
    pst_token: Option<String>,
    amount: Amount,
    currency: Currency,
    payment_intent_id: Option<String>,
}

impl SessionContext {
    pub fn new(
        api_key: impl Into<String>,
        device_info: DeviceInfo,
        amount: Amount,
        currency: Currency,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            device_info,
            pst_token: None,
            amount,
            currency,
            payment_intent_id: None,
        }
    }

    pub fn with_pst_token(&self, token: impl Into<String>) -> Self {
        Self {
            pst_token: Some(token.into()),
            ..self.clone()
        }
    }

    pub fn with_payment_intent_id(&self, id: impl Into<String>) -> Self {
        Self {
            payment_intent_id: Some(id.into()),
            ..self.clone()
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    pub fn pst_token(&self) -> Option<&str> {
        self.pst_token.as_deref()
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn payment_intent_id(&self) -> Option<&str> {
        self.payment_intent_id.as_deref()
    }
}

// Credentials stay out of logs and panic messages.
impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("api_key", &"<redacted>")
            .field("device_info", &self.device_info)
            .field("pst_token", &self.pst_token.as_ref().map(|_| "<redacted>"))
            .field("amount", &self.amount)
            .field("currency", &self.currency)
            .field("payment_intent_id", &self.payment_intent_id)
            .finish()
    }
}
