use serde::Deserialize;
use std::collections::BTreeMap;

/// Free-form key/value pairs attached to a reader. Not interpreted here.
pub type Metadata = BTreeMap<String, String>;

/// A card reader registered to the account, as returned by the platform.
///
/// Only `id` is required; the platform leaves several fields `null` for
/// readers that have never connected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reader {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub object: String,
    #[serde(default, rename = "device_software_version")]
    pub device_sw_version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_type: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub livemode: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

impl Reader {
    pub fn is_online(&self) -> bool {
        self.status.as_deref() == Some("online")
    }
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of the readers collection.
#[derive(Debug, Deserialize)]
pub struct ReaderList {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub object: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_more: bool,
    pub data: Vec<Reader>,
}

#[derive(Debug, Deserialize)]
pub struct RegisteredReader {
    pub ip_address: String,
}
