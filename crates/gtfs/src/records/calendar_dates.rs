use chrono::NaiveDate;
use model::ScheduleCalendar;
use serde::Serialize;
use serde_repr::Serialize_repr;
use utility::serde::gtfs_date;

/// See <https://gtfs.org/schedule/reference/#calendar_datestxt>
#[derive(Serialize_repr, PartialEq, Debug, Clone, Copy)]
#[repr(u8)]
pub enum ExceptionType {
    ServiceAdded = 1,
    ServiceRemoved = 2,
}

/// One `calendar_dates.txt` row. This feed only ever removes days: the
/// overlay resolution has already folded every STP variant into its own
/// service, so additions never arise.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDate {
    pub service_id: String,
    #[serde(serialize_with = "gtfs_date::serialize")]
    pub date: NaiveDate,
    pub exception_type: ExceptionType,
}

impl CalendarDate {
    /// One removal row per excluded date of the calendar.
    pub fn removals(service_id: &str, calendar: &ScheduleCalendar) -> Vec<CalendarDate> {
        calendar
            .excluded
            .iter()
            .map(|date| CalendarDate {
                service_id: service_id.to_owned(),
                date: *date,
                exception_type: ExceptionType::ServiceRemoved,
            })
            .collect()
    }
}
