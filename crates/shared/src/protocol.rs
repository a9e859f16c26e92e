use serde::{Deserialize, Serialize};

use crate::domain::SlotIndex;

/// One data-slot entry in the console's stored roster, as reported by the
/// device's roster query. Only `slot` and `valid` are always present; an
/// invalid slot carries no other meaningful fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub slot: SlotIndex,
    pub valid: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub species_id: Option<u16>,
    #[serde(default)]
    pub gen: Option<u8>,
    #[serde(default)]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
}

/// Form-encoded body of the transfer-start command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeStartRequest {
    pub slot: SlotIndex,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeStartResponse {
    pub message: String,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
