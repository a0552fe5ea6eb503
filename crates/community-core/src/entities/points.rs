//! Point ledger entries and their derived counters

use std::collections::HashMap;

use crate::value_objects::{PointType, Snowflake};

/// Immutable ledger event attributed to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointLedgerEntry {
    pub user_id: Snowflake,
    pub point_type: PointType,
}

impl PointLedgerEntry {
    pub fn new(user_id: Snowflake, point_type: impl Into<PointType>) -> Self {
        Self {
            user_id,
            point_type: point_type.into(),
        }
    }

    pub fn report_received(user_id: Snowflake) -> Self {
        Self::new(user_id, PointType::report_received())
    }
}

/// Per-user counters derived from the ledger, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointCounts {
    pub user_id: Snowflake,
    /// Entries with any tag other than `report_received`
    pub points_count: i64,
    /// Entries tagged `report_received`
    pub report_count: i64,
}

impl PointCounts {
    pub fn zero(user_id: Snowflake) -> Self {
        Self {
            user_id,
            points_count: 0,
            report_count: 0,
        }
    }

    pub fn record(&mut self, point_type: &PointType) {
        if point_type.is_report() {
            self.report_count += 1;
        } else {
            self.points_count += 1;
        }
    }

    /// Partition raw entries per user
    ///
    /// Stores that can group server-side should do so instead; this is the
    /// reference semantics they must match.
    pub fn tally<'a, I>(entries: I) -> HashMap<Snowflake, PointCounts>
    where
        I: IntoIterator<Item = &'a PointLedgerEntry>,
    {
        let mut counts: HashMap<Snowflake, PointCounts> = HashMap::new();
        for entry in entries {
            counts
                .entry(entry.user_id)
                .or_insert_with(|| PointCounts::zero(entry.user_id))
                .record(&entry.point_type);
        }
        counts
    }
}
