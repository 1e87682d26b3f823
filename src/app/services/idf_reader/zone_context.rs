//! Zone context tracking
//!
//! The reader owns exactly one `ZoneContext`. Records never share it: each
//! one receives an owned snapshot of the zone in effect when it was emitted.

use crate::app::models::ZoneId;
use tracing::debug;

/// Most recently declared zone
#[derive(Debug, Clone, Default)]
pub struct ZoneContext {
    current: Option<ZoneId>,
}

impl ZoneContext {
    /// Create a context with no zone declared yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `zone` the current zone; it applies to the object declaring it
    pub fn enter(&mut self, zone: &str) {
        debug!("Entering zone context: {}", zone);
        self.current = Some(zone.to_string());
    }

    /// Current zone, if any
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Owned copy of the current zone for attaching to a record
    pub fn snapshot(&self) -> Option<ZoneId> {
        self.current.clone()
    }
}
