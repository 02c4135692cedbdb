use model::StationStop;
use serde::Serialize;

use super::feed_id;

feed_id! {
    /// ATCO code of a station, the id the rest of the feed references.
    StopId
}

/// One `stops.txt` row. `platform_code` is a non-standard column with the
/// platform text from the station reference data, where known.
/// See <https://gtfs.org/schedule/reference/#stopstxt>
#[derive(Debug, Clone, Serialize)]
pub struct Stop {
    #[serde(rename = "stop_id")]
    pub id: StopId,

    /// The public three-letter CRS code, where the location has one.
    #[serde(rename = "stop_code")]
    pub code: Option<String>,

    #[serde(rename = "stop_name")]
    pub name: String,

    #[serde(rename = "stop_lat")]
    pub latitude: Option<f64>,

    #[serde(rename = "stop_lon")]
    pub longitude: Option<f64>,

    pub platform_code: Option<String>,
}

impl From<&StationStop> for Stop {
    fn from(station: &StationStop) -> Self {
        Stop {
            id: StopId::new(station.atco_code.clone()),
            code: station.crs_code.clone(),
            name: station.name.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            platform_code: station.platform.clone(),
        }
    }
}
