use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use triage_types::SCHEMA_VERSION;

/// One persisted cache entry. The payload is always a whole dataset value;
/// partial patching happens upstream in the reducers, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub schema_version: u32,
    pub payload: serde_json::Value,
    pub last_updated: DateTime<Utc>,
}

impl CacheRecord {
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            payload,
            last_updated: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_round_trip() {
        let record = CacheRecord::new(serde_json::json!({"text": "hi", "complete": true}));
        let raw = serde_json::to_string(&record).unwrap();
        let back: CacheRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.schema_version, SCHEMA_VERSION);
    }
}
