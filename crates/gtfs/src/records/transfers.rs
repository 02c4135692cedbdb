use serde::Serialize;
use serde_repr::Serialize_repr;

use super::stops::StopId;

/// See <https://gtfs.org/schedule/reference/#transferstxt>
#[derive(Serialize_repr, PartialEq, Debug, Clone, Copy)]
#[repr(u8)]
pub enum TransferType {
    Recommended = 0,
    Timed = 1,
    MinimumTime = 2,
    NotPossible = 3,
}

/// One `transfers.txt` row. Station interchange times become same-stop
/// minimum-time transfers.
/// See <https://gtfs.org/schedule/reference/#transferstxt>
#[derive(Debug, Clone, Serialize)]
pub struct Transfer {
    pub from_stop_id: StopId,
    pub to_stop_id: StopId,
    pub transfer_type: TransferType,
    /// Seconds.
    pub min_transfer_time: Option<u32>,
}

impl Transfer {
    pub fn interchange(atco: &str, minutes: u32) -> Self {
        Transfer {
            from_stop_id: StopId::new(atco),
            to_stop_id: StopId::new(atco),
            transfer_type: TransferType::MinimumTime,
            min_transfer_time: Some(minutes * 60),
        }
    }
}
