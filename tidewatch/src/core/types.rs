//! Shared deterministic types for the cleanup widget.
//!
//! These types define the persisted state shape. Field names serialize in
//! camelCase so stored values stay compatible with the browser widget.

use serde::{Deserialize, Serialize};

/// Points awarded for each join action.
pub const POINTS_PER_JOIN: u32 = 10;
/// Inclusive range of trash (in pounds) credited per join action.
pub const TRASH_PER_JOIN: std::ops::RangeInclusive<u32> = 5..=24;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A scheduled cleanup site. Static reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cleanup {
    pub id: u32,
    pub name: String,
    pub location: Location,
    pub date: String,
    pub time: String,
    pub organizer: String,
    pub description: String,
}

/// One member of the user's cleanup crew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    /// Name of the cleanup the member joined.
    pub cleanup: String,
    /// Local date of the join, formatted `M/D/YYYY`.
    pub joined: String,
}

/// Gamification counters.
///
/// Counters are optional because a shallow merge of an older stored shape can
/// leave any of them absent. Absent counters are omitted on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanups_joined: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trash_collected: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_earned: Option<u32>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            cleanups_joined: Some(0),
            trash_collected: Some(0),
            points_earned: Some(0),
        }
    }
}

/// Full in-memory record for a session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    pub user_location: Option<Location>,
    /// Insertion order is join order.
    pub crew: Vec<CrewMember>,
    pub cleanups: Vec<Cleanup>,
    pub user_stats: UserStats,
}

/// Result of a single join action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinReceipt {
    pub cleanup: String,
    /// Crew name drawn for this join.
    pub crew_name: String,
    /// False when the drawn name was already on the crew.
    pub crew_added: bool,
    pub trash_added: u32,
    pub stats: UserStats,
}
