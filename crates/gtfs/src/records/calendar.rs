use chrono::NaiveDate;
use model::ScheduleCalendar;
use serde::Serialize;
use serde_repr::Serialize_repr;
use utility::serde::gtfs_date;

/// Whether the service operates on a weekday within the date range.
/// See <https://gtfs.org/schedule/reference/#calendartxt>
#[derive(Serialize_repr, PartialEq, Debug, Clone, Copy)]
#[repr(u8)]
pub enum ServiceAvailability {
    Unavailable = 0,
    Available = 1,
}

impl ServiceAvailability {
    pub fn from_bool(available: bool) -> Self {
        if available {
            Self::Available
        } else {
            Self::Unavailable
        }
    }
}

/// One `calendar.txt` row: a weekly pattern bounded by start and end
/// service days. Date exceptions go to `calendar_dates.txt`.
/// See <https://gtfs.org/schedule/reference/#calendartxt>
#[derive(Debug, Clone, Serialize)]
pub struct CalendarRow {
    pub service_id: String,
    pub monday: ServiceAvailability,
    pub tuesday: ServiceAvailability,
    pub wednesday: ServiceAvailability,
    pub thursday: ServiceAvailability,
    pub friday: ServiceAvailability,
    pub saturday: ServiceAvailability,
    pub sunday: ServiceAvailability,
    #[serde(serialize_with = "gtfs_date::serialize")]
    pub start_date: NaiveDate,
    #[serde(serialize_with = "gtfs_date::serialize")]
    pub end_date: NaiveDate,
}

impl CalendarRow {
    pub fn from_calendar(service_id: &str, calendar: &ScheduleCalendar) -> Self {
        let day = |index| ServiceAvailability::from_bool(calendar.days.runs_on_weekday(index));
        CalendarRow {
            service_id: service_id.to_owned(),
            sunday: day(0),
            monday: day(1),
            tuesday: day(2),
            wednesday: day(3),
            thursday: day(4),
            friday: day(5),
            saturday: day(6),
            start_date: calendar.runs_from,
            end_date: calendar.runs_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use model::DayMask;

    use super::*;

    #[test]
    fn weekday_columns_follow_the_mask() {
        let calendar = ScheduleCalendar::new(
            NaiveDate::from_ymd_opt(2017, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2017, 1, 31).unwrap(),
            DayMask::MONDAY | DayMask::SATURDAY,
        );
        let row = CalendarRow::from_calendar("1", &calendar);
        assert_eq!(row.monday, ServiceAvailability::Available);
        assert_eq!(row.tuesday, ServiceAvailability::Unavailable);
        assert_eq!(row.saturday, ServiceAvailability::Available);
        assert_eq!(row.sunday, ServiceAvailability::Unavailable);
    }
}
