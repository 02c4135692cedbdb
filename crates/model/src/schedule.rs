use chrono::Duration;

use crate::calendar::ScheduleCalendar;
use crate::record::{OverlayRecord, RecordId, Stp};

/// Mode of a service as derived from its CIF train category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
    Rail,
    Bus,
    ReplacementBus,
    Subway,
    Ferry,
}

impl RouteType {
    /// Train categories not listed map to [`RouteType::Rail`].
    pub fn from_train_category(category: &str) -> Self {
        match category {
            "OO" | "XX" | "XZ" | "XC" => RouteType::Rail,
            "BR" => RouteType::ReplacementBus,
            "BS" => RouteType::Bus,
            "OL" => RouteType::Subway,
            "SS" => RouteType::Ferry,
            _ => RouteType::Rail,
        }
    }

    /// The numeric `route_type` code GTFS uses.
    pub fn gtfs_code(self) -> u8 {
        match self {
            RouteType::Subway => 1,
            RouteType::Rail => 2,
            RouteType::Bus | RouteType::ReplacementBus => 3,
            RouteType::Ferry => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickupType {
    #[default]
    Regular,
    NotAvailable,
    Phone,
    Coordinated,
}

impl PickupType {
    pub fn code(self) -> u8 {
        match self {
            PickupType::Regular => 0,
            PickupType::NotAvailable => 1,
            PickupType::Phone => 2,
            PickupType::Coordinated => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropOffType {
    #[default]
    Regular,
    NotAvailable,
    Phone,
    Coordinated,
}

impl DropOffType {
    pub fn code(self) -> u8 {
        match self {
            DropOffType::Regular => 0,
            DropOffType::NotAvailable => 1,
            DropOffType::Phone => 2,
            DropOffType::Coordinated => 3,
        }
    }
}

/// One public calling point of a schedule. Times count from the start of
/// the service day and stay above 24 hours once a trip has rolled past
/// midnight; `None` times mark calls the public timetable does not
/// advertise.
#[derive(Debug, Clone, PartialEq)]
pub struct StopTime {
    pub arrival_time: Option<Duration>,
    pub departure_time: Option<Duration>,
    pub atco_code: String,
    pub crs_code: String,
    pub tiploc_code: String,
    pub stop_sequence: u32,
    pub headsign: Option<String>,
    pub pickup_type: PickupType,
    pub drop_off_type: DropOffType,
    pub timepoint: bool,
}

/// One STP variant of a train service: the calling pattern plus the
/// calendar it operates on.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub id: RecordId,
    pub tuid: String,
    pub stp: Stp,
    pub calendar: ScheduleCalendar,
    pub stops: Vec<StopTime>,
    pub rsid: Option<String>,
    pub route_type: RouteType,
    pub operator: Option<String>,
    pub first_class: bool,
    pub reservable: bool,
}

impl Schedule {
    /// The GTFS trip id: train UID plus the operating window, so distinct
    /// calendar variants of one train become distinct trips.
    pub fn trip_id(&self) -> String {
        format!(
            "{}_{}_{}",
            self.tuid,
            self.calendar.runs_from.format("%Y%m%d"),
            self.calendar.runs_to.format("%Y%m%d")
        )
    }

    pub fn origin(&self) -> Option<&StopTime> {
        self.stops.first()
    }

    pub fn destination(&self) -> Option<&StopTime> {
        self.stops.last()
    }

    /// Index of the first call at the given TIPLOC.
    pub fn stop_at(&self, tiploc: &str) -> Option<usize> {
        self.stops.iter().position(|stop| stop.tiploc_code == tiploc)
    }

    /// Calls strictly before the given index.
    pub fn before(&self, index: usize) -> &[StopTime] {
        &self.stops[..index]
    }

    /// Calls strictly after the given index.
    pub fn after(&self, index: usize) -> &[StopTime] {
        &self.stops[index + 1..]
    }

    /// Whether any call is advertised to the public.
    pub fn has_public_call(&self) -> bool {
        self.stops
            .iter()
            .any(|stop| stop.arrival_time.is_some() || stop.departure_time.is_some())
    }
}

impl OverlayRecord for Schedule {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn tuid(&self) -> &str {
        &self.tuid
    }

    fn stp(&self) -> Stp {
        self.stp
    }

    fn calendar(&self) -> &ScheduleCalendar {
        &self.calendar
    }

    fn with_calendar(&self, calendar: ScheduleCalendar, id: RecordId) -> Self {
        Schedule {
            id,
            calendar,
            ..self.clone()
        }
    }
}
