//! Per-call context handed to tools.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifies a single tool invocation from the agent host.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Unique id for this call, used to correlate log lines.
    pub call_id: Uuid,
    /// When the call was received.
    pub received_at: DateTime<Utc>,
}

impl CallContext {
    pub fn new() -> Self {
        Self {
            call_id: Uuid::new_v4(),
            received_at: Utc::now(),
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}
