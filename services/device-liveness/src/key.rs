//! Composite identity of a monitored device stream

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies the device serving one system type in one area.
///
/// An area and system type pair is assumed to map to at most one active
/// device, so the pair itself is the address. The two parts are kept as
/// separate fields; they are never joined into a single string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceKey {
    pub area_id: String,
    pub system_type: String,
}

impl DeviceKey {
    pub fn new(area_id: impl Into<String>, system_type: impl Into<String>) -> Self {
        Self {
            area_id: area_id.into(),
            system_type: system_type.into(),
        }
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.area_id, self.system_type)
    }
}
