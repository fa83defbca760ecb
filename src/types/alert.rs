//! Alert records persisted by the alert store

use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout for stored alerts
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Alert about to be appended; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAlert {
    pub disaster_type: String,
    pub location: String,
    pub timestamp: String,
}

impl NewAlert {
    pub fn new(
        disaster_type: impl Into<String>,
        location: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            disaster_type: disaster_type.into(),
            location: location.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Attach the store-assigned id
    pub fn with_id(self, id: i64) -> AlertRecord {
        AlertRecord {
            id,
            disaster_type: self.disaster_type,
            location: self.location,
            timestamp: self.timestamp,
        }
    }
}

/// A stored alert row. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: i64,
    pub disaster_type: String,
    pub location: String,
    pub timestamp: String,
}

impl fmt::Display for AlertRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, '{}', '{}', '{}')",
            self.id, self.disaster_type, self.location, self.timestamp
        )
    }
}
