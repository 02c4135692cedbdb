use crate::calendar::ScheduleCalendar;
use crate::record::{OverlayRecord, RecordId, Stp};

/// Which service day of the base train the associated train's calling
/// pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub enum DateIndicator {
    #[serde(rename = "S")]
    Same,
    #[serde(rename = "N")]
    Next,
    #[serde(rename = "P")]
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationType {
    Split,
    Join,
    NA,
}

impl From<&str> for AssociationType {
    /// CIF association categories: `VV` divides, `JJ` joins, anything
    /// else (next-working links and the like) carries no merge semantics.
    fn from(category: &str) -> Self {
        match category {
            "VV" => AssociationType::Split,
            "JJ" => AssociationType::Join,
            _ => AssociationType::NA,
        }
    }
}

/// Declares that two trains split or join at a TIPLOC, possibly across
/// the service-day boundary. Associations are themselves STP records and
/// go through the same overlay resolution as schedules.
#[derive(Debug, Clone)]
pub struct Association {
    pub id: RecordId,
    pub base_tuid: String,
    pub assoc_tuid: String,
    /// Grouping key for overlay resolution; both member UIDs joined, so
    /// variants of the same pairing overlay each other.
    pub tuid: String,
    /// TIPLOC of the junction call.
    pub location: String,
    pub date_indicator: DateIndicator,
    pub kind: AssociationType,
    pub stp: Stp,
    pub calendar: ScheduleCalendar,
}

impl Association {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RecordId,
        base_tuid: String,
        assoc_tuid: String,
        location: String,
        date_indicator: DateIndicator,
        kind: AssociationType,
        stp: Stp,
        calendar: ScheduleCalendar,
    ) -> Self {
        let tuid = format!("{}_{}_", base_tuid, assoc_tuid);
        Self {
            id,
            base_tuid,
            assoc_tuid,
            tuid,
            location,
            date_indicator,
            kind,
            stp,
            calendar,
        }
    }
}

impl OverlayRecord for Association {
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
        Association {
            id,
            calendar,
            ..self.clone()
        }
    }
}
