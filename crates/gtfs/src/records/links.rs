use chrono::Duration;
use serde::Serialize;
use utility::serde::gtfs_time;

use super::stops::StopId;

/// One `links.txt` row, a feed extension describing fixed legs between
/// stations that are not train services (walks, underground transfers).
/// Populated from reference data supplied by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    /// "WALK", "TUBE" or similar.
    pub mode: String,

    pub from_stop_id: StopId,

    pub to_stop_id: StopId,

    /// Seconds.
    pub duration: u32,

    /// First time of day the link is usable.
    #[serde(serialize_with = "gtfs_time::serialize")]
    pub start_time: Duration,

    /// Last time of day the link is usable.
    #[serde(serialize_with = "gtfs_time::serialize")]
    pub end_time: Duration,
}
