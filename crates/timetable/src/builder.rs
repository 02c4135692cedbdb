use std::fmt::Display;

use chrono::Duration;
use itertools::Itertools;
use log::info;
use model::{
    Association, DayMask, DropOffType, IdGenerator, PickupType, RecordId, RouteType, Schedule,
    ScheduleCalendar, StopTime, Stp,
};

use crate::config::PipelineConfig;
use crate::error::TimetableError;
use crate::rows::{AssociationRow, ScheduleRow};

/// How many rows between progress messages.
const PROGRESS_STEP: usize = 100_000;

pub struct FoldedSchedules {
    pub schedules: Vec<Schedule>,
    /// Seeded past the highest row id seen, for every downstream cloner.
    pub ids: IdGenerator,
}

/// Folds the ordered stop-time row stream into schedules, one pass. A row
/// with a new schedule id closes the previous schedule; a failed row
/// aborts the fold so no partial schedules escape.
pub fn fold_schedules<E: Display>(
    rows: impl IntoIterator<Item = Result<ScheduleRow, E>>,
    config: &PipelineConfig,
) -> Result<FoldedSchedules, TimetableError> {
    let mut schedules = Vec::new();
    let mut current: Option<PendingSchedule> = None;
    let mut max_id: RecordId = 0;
    let mut row_count = 0usize;

    for row in rows {
        let row = row.map_err(|error| TimetableError::RowSource(error.to_string()))?;
        row_count += 1;
        if row_count % PROGRESS_STEP == 0 {
            info!("folded {} stop-time rows", row_count);
        }
        max_id = max_id.max(row.id);

        match current.as_mut() {
            Some(pending) if pending.id == row.id => pending.push_row(row, config)?,
            _ => {
                if let Some(done) = current.take() {
                    schedules.push(done.finish());
                }
                let mut pending = PendingSchedule::start(&row)?;
                pending.push_row(row, config)?;
                current = Some(pending);
            }
        }
    }
    if let Some(done) = current.take() {
        schedules.push(done.finish());
    }

    info!(
        "assembled {} schedules from {} stop-time rows",
        schedules.len(),
        row_count
    );
    Ok(FoldedSchedules {
        schedules,
        ids: IdGenerator::starting_after(max_id),
    })
}

/// Maps association rows one to one; the overlay resolver handles their
/// STP variants afterwards.
pub fn fold_associations<E: Display>(
    rows: impl IntoIterator<Item = Result<AssociationRow, E>>,
) -> Result<Vec<Association>, TimetableError> {
    rows.into_iter()
        .map(|row| {
            let row = row.map_err(|error| TimetableError::RowSource(error.to_string()))?;
            let calendar = ScheduleCalendar::new(
                row.start_date,
                row.end_date,
                DayMask::from_day_flags(
                    row.sunday != 0,
                    row.monday != 0,
                    row.tuesday != 0,
                    row.wednesday != 0,
                    row.thursday != 0,
                    row.friday != 0,
                    row.saturday != 0,
                ),
            );
            Ok(Association::new(
                row.id,
                row.base_uid,
                row.assoc_uid,
                row.assoc_location,
                row.date_indicator,
                row.assoc_cat,
                row.stp_indicator,
                calendar,
            ))
        })
        .collect()
}

/// A schedule being accumulated from its contiguous rows.
struct PendingSchedule {
    id: RecordId,
    tuid: String,
    stp: Stp,
    calendar: ScheduleCalendar,
    rsid: Option<String>,
    route_type: RouteType,
    operator: Option<String>,
    first_class: bool,
    reservable: bool,
    /// Hour of the first public time of the schedule; every later time
    /// earlier than this has rolled past midnight.
    departure_hour: i64,
    stops: Vec<StopTime>,
}

impl PendingSchedule {
    fn start(row: &ScheduleRow) -> Result<Self, TimetableError> {
        let departure_hour = match non_empty(&row.public_arrival_time)
            .or_else(|| non_empty(&row.public_departure_time))
        {
            Some(text) => parse_hour(text, &row.train_uid)?,
            None => 4,
        };

        let calendar = ScheduleCalendar::new(
            row.runs_from,
            row.runs_to,
            DayMask::from_day_flags(
                row.sunday != 0,
                row.monday != 0,
                row.tuesday != 0,
                row.wednesday != 0,
                row.thursday != 0,
                row.friday != 0,
                row.saturday != 0,
            ),
        );

        let route_type = row
            .train_category
            .as_deref()
            .map(RouteType::from_train_category)
            .unwrap_or(RouteType::Rail);

        Ok(PendingSchedule {
            id: row.id,
            tuid: row.train_uid.clone(),
            stp: row.stp_indicator,
            calendar,
            rsid: row.retail_train_id.clone(),
            route_type,
            operator: row.atoc_code.clone(),
            first_class: route_type == RouteType::Rail && row.train_class.as_deref() != Some("S"),
            reservable: row.reservations.is_some(),
            departure_hour,
            stops: Vec::new(),
        })
    }

    fn push_row(&mut self, row: ScheduleRow, config: &PipelineConfig) -> Result<(), TimetableError> {
        // A cancellation is represented by its STP entry alone.
        if self.stp == Stp::Cancellation {
            return Ok(());
        }

        let has_public = non_empty(&row.public_arrival_time).is_some()
            || non_empty(&row.public_departure_time).is_some();
        let (arrival_text, departure_text) = if has_public {
            (
                non_empty(&row.public_arrival_time),
                non_empty(&row.public_departure_time),
            )
        } else if config.use_scheduled_when_no_public {
            (
                non_empty(&row.scheduled_arrival_time),
                non_empty(&row.scheduled_departure_time),
            )
        } else {
            (None, None)
        };

        let mut arrival = arrival_text
            .map(|text| self.normalise(text))
            .transpose()?;
        let mut departure = departure_text
            .map(|text| self.normalise(text))
            .transpose()?;

        let codes = activity_codes(row.activity.as_deref().unwrap_or(""));
        let has_code = |wanted: &str| codes.iter().any(|code| code == wanted);
        let not_advertised = has_code("N ");

        let mut pickup_type =
            if (has_code("T ") || has_code("TB") || has_code("U ")) && !not_advertised {
                PickupType::Regular
            } else {
                PickupType::NotAvailable
            };
        let mut drop_off_type =
            if (has_code("T ") || has_code("TF") || has_code("D ")) && !not_advertised {
                DropOffType::Regular
            } else {
                DropOffType::NotAvailable
            };
        if has_code("R ") {
            pickup_type = PickupType::Coordinated;
            drop_off_type = DropOffType::Coordinated;
        }
        if not_advertised {
            arrival = None;
            departure = None;
        }

        let stop = StopTime {
            arrival_time: arrival,
            departure_time: departure,
            atco_code: row.atco_code,
            crs_code: row.crs_code,
            tiploc_code: row.tiploc_code,
            stop_sequence: 0,
            headsign: None,
            pickup_type,
            drop_off_type,
            timepoint: true,
        };

        // A repeated call at the same station (usually a platform change
        // in the source data) replaces the previous one, but only when
        // the replacement still serves passengers.
        if let Some(last) = self.stops.last_mut() {
            if last.crs_code == stop.crs_code {
                if stop.pickup_type == PickupType::Regular
                    || stop.drop_off_type == DropOffType::Regular
                {
                    *last = stop;
                }
                return Ok(());
            }
        }

        self.stops.push(stop);
        Ok(())
    }

    fn normalise(&self, text: &str) -> Result<Duration, TimetableError> {
        let time = parse_time(text, &self.tuid)?;
        if self.departure_hour >= 4 && time.num_hours() < self.departure_hour {
            Ok(time + Duration::hours(24))
        } else {
            Ok(time)
        }
    }

    fn finish(mut self) -> Schedule {
        for (index, stop) in self.stops.iter_mut().enumerate() {
            stop.stop_sequence = index as u32 + 1;
        }
        Schedule {
            id: self.id,
            tuid: self.tuid,
            stp: self.stp,
            calendar: self.calendar,
            stops: self.stops,
            rsid: self.rsid,
            route_type: self.route_type,
            operator: self.operator,
            first_class: self.first_class,
            reservable: self.reservable,
        }
    }
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|text| !text.is_empty())
}

/// The CIF activity field is a run of two-character codes; a trailing
/// code may arrive stripped of its padding.
fn activity_codes(activity: &str) -> Vec<String> {
    activity
        .chars()
        .chunks(2)
        .into_iter()
        .map(|chunk| format!("{:<2}", chunk.collect::<String>()))
        .collect()
}

fn parse_time(text: &str, tuid: &str) -> Result<Duration, TimetableError> {
    let malformed = || TimetableError::MalformedTime {
        text: text.to_owned(),
        tuid: tuid.to_owned(),
    };

    let parts: Vec<&str> = text.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [hours, minutes] => (*hours, *minutes, "00"),
        [hours, minutes, seconds] => (*hours, *minutes, *seconds),
        _ => return Err(malformed()),
    };
    if hours.len() != 2 {
        return Err(malformed());
    }

    let hours: i64 = hours.parse().map_err(|_| malformed())?;
    let minutes: i64 = minutes.parse().map_err(|_| malformed())?;
    let seconds: i64 = seconds.parse().map_err(|_| malformed())?;
    Ok(Duration::hours(hours) + Duration::minutes(minutes) + Duration::seconds(seconds))
}

fn parse_hour(text: &str, tuid: &str) -> Result<i64, TimetableError> {
    text.get(..2)
        .and_then(|hour| hour.parse().ok())
        .ok_or_else(|| TimetableError::MalformedTime {
            text: text.to_owned(),
            tuid: tuid.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn row(id: RecordId, stop_id: u32, crs: &str, arrival: &str, departure: &str) -> ScheduleRow {
        ScheduleRow {
            id,
            train_uid: format!("C1{:04}", id),
            retail_train_id: None,
            runs_from: NaiveDate::from_ymd_opt(2017, 1, 2).unwrap(),
            runs_to: NaiveDate::from_ymd_opt(2017, 3, 31).unwrap(),
            monday: 1,
            tuesday: 1,
            wednesday: 1,
            thursday: 1,
            friday: 1,
            saturday: 0,
            sunday: 0,
            atco_code: format!("9100{}", crs),
            tiploc_code: format!("{}TPL", crs),
            crs_code: crs.to_owned(),
            stp_indicator: Stp::Permanent,
            public_arrival_time: Some(arrival.to_owned()).filter(|t| !t.is_empty()),
            public_departure_time: Some(departure.to_owned()).filter(|t| !t.is_empty()),
            scheduled_arrival_time: None,
            scheduled_departure_time: None,
            train_category: Some("OO".to_owned()),
            atoc_code: Some("SW".to_owned()),
            platform: None,
            activity: Some("T ".to_owned()),
            train_class: None,
            reservations: None,
            stop_id,
        }
    }

    fn fold(rows: Vec<ScheduleRow>) -> Vec<Schedule> {
        fold_schedules(
            rows.into_iter().map(Ok::<_, TimetableError>),
            &PipelineConfig::default(),
        )
        .unwrap()
        .schedules
    }

    #[test]
    fn times_roll_over_past_midnight() {
        let schedules = fold(vec![
            row(1, 1, "WAT", "", "23:30"),
            row(1, 2, "CLJ", "00:30", "00:32"),
        ]);
        let stops = &schedules[0].stops;
        assert_eq!(stops[0].departure_time, Some(Duration::hours(23) + Duration::minutes(30)));
        assert_eq!(stops[1].arrival_time, Some(Duration::hours(24) + Duration::minutes(30)));
        assert_eq!(stops[1].departure_time, Some(Duration::hours(24) + Duration::minutes(32)));
    }

    #[test]
    fn early_morning_schedules_do_not_roll_over() {
        let schedules = fold(vec![
            row(1, 1, "WAT", "", "00:30"),
            row(1, 2, "CLJ", "00:45", "00:46"),
        ]);
        assert_eq!(
            schedules[0].stops[1].arrival_time,
            Some(Duration::minutes(45))
        );
    }

    #[test]
    fn schedules_split_on_id_change_and_sequence_from_one() {
        let schedules = fold(vec![
            row(1, 1, "WAT", "", "10:00"),
            row(1, 2, "CLJ", "10:07", "10:08"),
            row(2, 1, "WAT", "", "11:00"),
        ]);
        assert_eq!(schedules.len(), 2);
        assert_eq!(
            schedules[0].stops.iter().map(|s| s.stop_sequence).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(schedules[1].stops[0].stop_sequence, 1);
    }

    #[test]
    fn activity_codes_drive_pickup_and_drop_off() {
        let mut setting_down = row(1, 2, "CLJ", "10:07", "10:08");
        setting_down.activity = Some("D ".to_owned());
        let mut request = row(1, 3, "WIM", "10:20", "10:21");
        request.activity = Some("R ".to_owned());
        let mut not_advertised = row(1, 4, "SUR", "10:30", "10:31");
        not_advertised.activity = Some("N ".to_owned());

        let schedules = fold(vec![
            row(1, 1, "WAT", "", "10:00"),
            setting_down,
            request,
            not_advertised,
        ]);
        let stops = &schedules[0].stops;
        assert_eq!(stops[1].pickup_type, PickupType::NotAvailable);
        assert_eq!(stops[1].drop_off_type, DropOffType::Regular);
        assert_eq!(stops[2].pickup_type, PickupType::Coordinated);
        assert_eq!(stops[2].drop_off_type, DropOffType::Coordinated);
        assert_eq!(stops[3].arrival_time, None);
        assert_eq!(stops[3].departure_time, None);
    }

    #[test]
    fn repeated_station_rows_replace_only_when_public() {
        let mut better = row(1, 2, "WAT", "10:05", "10:06");
        better.activity = Some("T ".to_owned());
        let schedules = fold(vec![row(1, 1, "WAT", "", "10:00"), better]);
        assert_eq!(schedules[0].stops.len(), 1);
        assert_eq!(
            schedules[0].stops[0].arrival_time,
            Some(Duration::hours(10) + Duration::minutes(5))
        );

        let mut worse = row(2, 2, "WAT", "10:05", "10:06");
        worse.activity = Some("A ".to_owned());
        let schedules = fold(vec![row(2, 1, "WAT", "", "10:00"), worse]);
        assert_eq!(schedules[0].stops.len(), 1);
        assert_eq!(schedules[0].stops[0].arrival_time, None);
    }

    #[test]
    fn cancellations_carry_no_stops() {
        let mut cancelled = row(1, 1, "WAT", "", "10:00");
        cancelled.stp_indicator = Stp::Cancellation;
        let schedules = fold(vec![cancelled]);
        assert_eq!(schedules[0].stp, Stp::Cancellation);
        assert!(schedules[0].stops.is_empty());
    }

    #[test]
    fn scheduled_time_fallback_is_opt_in() {
        let mut no_public = row(1, 1, "WAT", "", "");
        no_public.scheduled_departure_time = Some("10:00:00".to_owned());

        let schedules = fold(vec![no_public.clone()]);
        assert_eq!(schedules[0].stops[0].departure_time, None);

        let config = PipelineConfig {
            use_scheduled_when_no_public: true,
        };
        let schedules = fold_schedules(vec![Ok::<_, TimetableError>(no_public)], &config)
            .unwrap()
            .schedules;
        assert_eq!(
            schedules[0].stops[0].departure_time,
            Some(Duration::hours(10))
        );
    }

    #[test]
    fn malformed_times_are_fatal() {
        let bad = row(1, 1, "WAT", "", "1x:30");
        let result = fold_schedules(
            vec![Ok::<_, TimetableError>(bad)],
            &PipelineConfig::default(),
        );
        assert!(matches!(
            result,
            Err(TimetableError::MalformedTime { .. })
        ));
    }

    #[test]
    fn id_generator_starts_past_the_largest_row_id() {
        let mut folded = fold_schedules(
            vec![
                Ok::<_, TimetableError>(row(9, 1, "WAT", "", "10:00")),
                Ok(row(12, 1, "WAT", "", "11:00")),
            ],
            &PipelineConfig::default(),
        )
        .unwrap();
        assert_eq!(folded.ids.next_id(), 13);
    }
}
