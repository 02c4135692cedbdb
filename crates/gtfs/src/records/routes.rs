use model::RouteType;
use serde::Serialize;
use serde_repr::Serialize_repr;

use super::agency::AgencyId;
use super::feed_id;

/// The transportation modes this feed emits.
/// See <https://gtfs.org/schedule/reference/#routestxt>
#[derive(Serialize_repr, PartialEq, Debug, Clone, Copy)]
#[repr(u8)]
pub enum RouteTypeCode {
    SubwayOrMetro = 1,
    Rail = 2,
    Bus = 3,
    Ferry = 4,
}

impl From<RouteType> for RouteTypeCode {
    fn from(kind: RouteType) -> Self {
        match kind {
            RouteType::Subway => RouteTypeCode::SubwayOrMetro,
            RouteType::Rail => RouteTypeCode::Rail,
            RouteType::Bus | RouteType::ReplacementBus => RouteTypeCode::Bus,
            RouteType::Ferry => RouteTypeCode::Ferry,
        }
    }
}

feed_id! {
    /// Sequential route number, suffixed `_BUS` for replacement buses.
    RouteId
}

/// One `routes.txt` row. A route groups the trips of one operator brand
/// and mode; names and colours come from the operator branding table.
/// See <https://gtfs.org/schedule/reference/#routestxt>
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    #[serde(rename = "route_id")]
    pub id: RouteId,

    pub agency_id: AgencyId,

    /// Brand short name, e.g. "SWR" or "Overground".
    #[serde(rename = "route_short_name")]
    pub short_name: String,

    #[serde(rename = "route_long_name")]
    pub long_name: Option<String>,

    #[serde(rename = "route_type")]
    pub kind: RouteTypeCode,

    #[serde(rename = "route_color")]
    pub color: Option<String>,

    #[serde(rename = "route_text_color")]
    pub text_color: Option<String>,
}
