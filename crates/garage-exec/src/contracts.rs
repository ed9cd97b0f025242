use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use garage_core::protocol::HostRequest;

/// One outbound request as written to a JSON-lines log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundRecord {
    pub seq: u64,
    pub ts_ms: i64,
    pub name: String,
    pub body: Value,
}

impl OutboundRecord {
    pub fn new(seq: u64, request: &HostRequest) -> Self {
        Self {
            seq,
            ts_ms: chrono::Utc::now().timestamp_millis(),
            name: request.name().to_string(),
            body: request.body(),
        }
    }
}
