use serde::Serialize;

use super::feed_id;
use super::routes::RouteId;

feed_id! {
    /// Train UID plus operating window, `{tuid}_{from}_{to}`.
    TripId
}

/// One `trips.txt` row: a concrete calling pattern over one service
/// calendar. `original_trip_id` is a non-standard column carrying the
/// source train UID so consumers can fold STP variants back together.
/// See <https://gtfs.org/schedule/reference/#tripstxt>
#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    pub route_id: RouteId,

    pub service_id: String,

    #[serde(rename = "trip_id")]
    pub id: TripId,

    /// Destination as shown to riders, where known.
    #[serde(rename = "trip_headsign")]
    pub headsign: Option<String>,

    /// The retail service id, the public-facing train label.
    #[serde(rename = "trip_short_name")]
    pub short_name: Option<String>,

    pub shape_id: Option<String>,

    pub original_trip_id: String,
}
