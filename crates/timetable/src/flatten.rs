use indexmap::IndexMap;
use log::debug;
use model::Schedule;

use crate::error::TimetableError;

/// Flattens the TUID index into one schedule per trip id, in index
/// order. Schedules with no advertised call never reach the feed; two
/// schedules claiming the same trip id mean the upstream resolution
/// failed and the build stops.
pub fn flatten(index: IndexMap<String, Vec<Schedule>>) -> Result<Vec<Schedule>, TimetableError> {
    let mut by_trip: IndexMap<String, Schedule> = IndexMap::new();

    for (_, schedules) in index {
        for schedule in schedules {
            if !schedule.has_public_call() {
                debug!("dropping {} with no public call", schedule.trip_id());
                continue;
            }
            let trip_id = schedule.trip_id();
            if by_trip.insert(trip_id.clone(), schedule).is_some() {
                return Err(TimetableError::DuplicateTripId(trip_id));
            }
        }
    }

    Ok(by_trip.into_values().collect())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use model::{
        DayMask, DropOffType, PickupType, RouteType, ScheduleCalendar, StopTime, Stp,
    };

    use super::*;

    fn schedule(id: u64, tuid: &str, public: bool) -> Schedule {
        Schedule {
            id,
            tuid: tuid.to_owned(),
            stp: Stp::Permanent,
            calendar: ScheduleCalendar::new(
                NaiveDate::from_ymd_opt(2017, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2017, 3, 31).unwrap(),
                DayMask::all(),
            ),
            stops: vec![StopTime {
                arrival_time: None,
                departure_time: public.then(|| Duration::hours(10)),
                atco_code: "9100WATRLMN".to_owned(),
                crs_code: "WAT".to_owned(),
                tiploc_code: "WATRLMN".to_owned(),
                stop_sequence: 1,
                headsign: None,
                pickup_type: PickupType::Regular,
                drop_off_type: DropOffType::Regular,
                timepoint: true,
            }],
            rsid: None,
            route_type: RouteType::Rail,
            operator: None,
            first_class: false,
            reservable: false,
        }
    }

    #[test]
    fn schedules_without_public_calls_are_skipped() {
        let mut index: IndexMap<String, Vec<Schedule>> = IndexMap::new();
        index.insert(
            "C10000".to_owned(),
            vec![schedule(1, "C10000", true), schedule(2, "C20000", false)],
        );
        let trips = flatten(index).unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].tuid, "C10000");
    }

    #[test]
    fn duplicate_trip_ids_are_fatal() {
        let mut index: IndexMap<String, Vec<Schedule>> = IndexMap::new();
        index.insert(
            "C10000".to_owned(),
            vec![schedule(1, "C10000", true), schedule(2, "C10000", true)],
        );
        assert!(matches!(
            flatten(index),
            Err(TimetableError::DuplicateTripId(_))
        ));
    }
}
