//! Point ledger tag

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag attached to a point ledger entry
///
/// The ledger is open-ended: any tag other than [`PointType::REPORT_RECEIVED`]
/// is a positive signal (event attended, post created, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointType(String);

impl PointType {
    /// Sentinel tag recorded against a user each time they are reported
    pub const REPORT_RECEIVED: &'static str = "report_received";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn report_received() -> Self {
        Self(Self::REPORT_RECEIVED.to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_report(&self) -> bool {
        self.0 == Self::REPORT_RECEIVED
    }
}

impl fmt::Display for PointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for PointType {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}
