use chrono::Duration;
use model::{DropOffType, PickupType, StopTime};
use serde::Serialize;
use serde_repr::Serialize_repr;
use utility::serde::gtfs_time;

use super::stops::StopId;
use super::trips::TripId;

/// See <https://gtfs.org/schedule/reference/#stop_timestxt>
#[derive(Serialize_repr, PartialEq, Debug, Clone, Copy, Default)]
#[repr(u8)]
pub enum PickupMethod {
    #[default]
    RegularlyScheduled = 0,
    NotAvailable = 1,
    MustPhoneAgency = 2,
    MustCoordinateWithDriver = 3,
}

impl From<PickupType> for PickupMethod {
    fn from(kind: PickupType) -> Self {
        match kind {
            PickupType::Regular => PickupMethod::RegularlyScheduled,
            PickupType::NotAvailable => PickupMethod::NotAvailable,
            PickupType::Phone => PickupMethod::MustPhoneAgency,
            PickupType::Coordinated => PickupMethod::MustCoordinateWithDriver,
        }
    }
}

/// See <https://gtfs.org/schedule/reference/#stop_timestxt>
#[derive(Serialize_repr, PartialEq, Debug, Clone, Copy, Default)]
#[repr(u8)]
pub enum DropOffMethod {
    #[default]
    RegularlyScheduled = 0,
    NotAvailable = 1,
    MustPhoneAgency = 2,
    MustCoordinateWithDriver = 3,
}

impl From<DropOffType> for DropOffMethod {
    fn from(kind: DropOffType) -> Self {
        match kind {
            DropOffType::Regular => DropOffMethod::RegularlyScheduled,
            DropOffType::NotAvailable => DropOffMethod::NotAvailable,
            DropOffType::Phone => DropOffMethod::MustPhoneAgency,
            DropOffType::Coordinated => DropOffMethod::MustCoordinateWithDriver,
        }
    }
}

/// One `stop_times.txt` row. Times past midnight keep counting within the
/// service day, so hours of 24 and above are expected on late services.
/// See <https://gtfs.org/schedule/reference/#stop_timestxt>
#[derive(Debug, Clone, Serialize)]
pub struct StopTimeRow {
    pub trip_id: TripId,

    #[serde(serialize_with = "gtfs_time::serialize_option")]
    pub arrival_time: Option<Duration>,

    #[serde(serialize_with = "gtfs_time::serialize_option")]
    pub departure_time: Option<Duration>,

    /// ATCO code of the calling point.
    pub stop_id: StopId,

    pub stop_sequence: u32,

    pub stop_headsign: Option<String>,

    pub pickup_type: PickupMethod,

    pub drop_off_type: DropOffMethod,

    /// 1 when the times are exact, 0 when approximate.
    pub timepoint: u8,
}

impl StopTimeRow {
    pub fn from_call(trip_id: &str, call: &StopTime) -> Self {
        StopTimeRow {
            trip_id: TripId::new(trip_id),
            arrival_time: call.arrival_time,
            departure_time: call.departure_time,
            stop_id: StopId::new(call.atco_code.clone()),
            stop_sequence: call.stop_sequence,
            stop_headsign: call.headsign.clone(),
            pickup_type: call.pickup_type.into(),
            drop_off_type: call.drop_off_type.into(),
            timepoint: u8::from(call.timepoint),
        }
    }
}
