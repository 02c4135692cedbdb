//! End-to-end assembly over a small hand-built extract: a permanent
//! schedule with an overlay, a split association, and a service that
//! rolls past midnight.

use std::collections::HashSet;

use chrono::NaiveDate;
use gtfs::MemorySink;
use model::{AssociationType, DateIndicator, StationStop, StopDirectory, Stp};
use timetable::rows::{AssociationRow, ScheduleRow};
use timetable::{assemble_feed, FeedExtras, PipelineConfig, TimetableError};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn station(crs: &str, name: &str, latitude: f64, longitude: f64) -> StationStop {
    StationStop {
        atco_code: format!("9100{}", crs),
        crs_code: Some(crs.to_owned()),
        tiploc_code: format!("{}TPL", crs),
        name: name.to_owned(),
        latitude: Some(latitude),
        longitude: Some(longitude),
        platform: None,
        interchange_minutes: Some(6),
    }
}

fn directory() -> StopDirectory {
    StopDirectory::new([
        station("WAT", "London Waterloo", 51.5031, -0.1132),
        station("CLJ", "Clapham Junction", 51.4645, -0.1705),
        station("SUR", "Surbiton", 51.3925, -0.3045),
        station("WIM", "Wimbledon", 51.4214, -0.2064),
    ])
}

#[allow(clippy::too_many_arguments)]
fn row(
    id: u64,
    uid: &str,
    stp: Stp,
    from: NaiveDate,
    to: NaiveDate,
    stop_id: u32,
    crs: &str,
    arrival: &str,
    departure: &str,
) -> ScheduleRow {
    ScheduleRow {
        id,
        train_uid: uid.to_owned(),
        retail_train_id: Some(format!("SW{}00", uid)),
        runs_from: from,
        runs_to: to,
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
        stp_indicator: stp,
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

fn schedule_rows() -> Vec<ScheduleRow> {
    let from = date(2017, 1, 2);
    let to = date(2017, 3, 31);
    let overlay_from = date(2017, 2, 6);
    let overlay_to = date(2017, 2, 10);

    vec![
        // permanent records first, the order the source stream guarantees
        row(1, "C10000", Stp::Permanent, from, to, 1, "WAT", "", "10:00"),
        row(1, "C10000", Stp::Permanent, from, to, 2, "CLJ", "10:07", "10:08"),
        row(1, "C10000", Stp::Permanent, from, to, 3, "SUR", "10:30", ""),
        row(2, "B20000", Stp::Permanent, from, to, 1, "WAT", "", "10:00"),
        row(2, "B20000", Stp::Permanent, from, to, 2, "CLJ", "10:10", "10:12"),
        row(2, "B20000", Stp::Permanent, from, to, 3, "SUR", "10:30", ""),
        row(3, "A30000", Stp::Permanent, from, to, 1, "CLJ", "10:11", "10:15"),
        row(3, "A30000", Stp::Permanent, from, to, 2, "WIM", "10:25", ""),
        row(4, "C40000", Stp::Permanent, from, to, 1, "WAT", "23:55", "00:05"),
        row(4, "C40000", Stp::Permanent, from, to, 2, "SUR", "00:20", ""),
        row(5, "C10000", Stp::Overlay, overlay_from, overlay_to, 1, "WAT", "", "10:05"),
        row(5, "C10000", Stp::Overlay, overlay_from, overlay_to, 2, "CLJ", "10:12", "10:13"),
        row(5, "C10000", Stp::Overlay, overlay_from, overlay_to, 3, "SUR", "10:35", ""),
    ]
}

fn association_rows() -> Vec<AssociationRow> {
    vec![AssociationRow {
        id: 1,
        base_uid: "B20000".to_owned(),
        assoc_uid: "A30000".to_owned(),
        start_date: date(2017, 1, 2),
        end_date: date(2017, 3, 31),
        monday: 1,
        tuesday: 1,
        wednesday: 1,
        thursday: 1,
        friday: 1,
        saturday: 0,
        sunday: 0,
        assoc_location: "CLJTPL".to_owned(),
        date_indicator: DateIndicator::Same,
        assoc_cat: AssociationType::Split,
        stp_indicator: Stp::Permanent,
    }]
}

#[test]
fn assembles_a_feed_from_raw_rows() {
    let mut sink = MemorySink::default();
    let directory = directory();

    let summary = assemble_feed(
        schedule_rows().into_iter().map(Ok::<_, TimetableError>),
        association_rows().into_iter().map(Ok::<_, TimetableError>),
        &directory,
        &PipelineConfig::default(),
        &FeedExtras::default(),
        &mut sink,
    )
    .unwrap();

    // C10000 base + overlay, B20000, the merged B20000_A30000, C40000
    // and its late night duplicate; the stand-alone A30000 merged away
    assert_eq!(summary.trips, 6);

    let trip_ids: HashSet<String> = sink
        .trips
        .iter()
        .map(|trip| trip.id.as_str().to_owned())
        .collect();
    assert_eq!(trip_ids.len(), 6, "trip ids must be unique");
    assert!(trip_ids.contains("B20000_A30000_20170102_20170331"));
    assert!(!sink
        .trips
        .iter()
        .any(|trip| trip.original_trip_id == "A30000"));

    // the overlay carved its week out of the permanent calendar
    assert_eq!(summary.services, 4);
    let removed: Vec<_> = sink
        .calendar_dates
        .iter()
        .map(|exception| exception.date)
        .collect();
    assert_eq!(removed.len(), 5);
    assert!(removed.contains(&date(2017, 2, 8)));

    // every trip is the same operator brand and mode, so one route
    assert_eq!(summary.routes, 1);
    assert_eq!(sink.routes[0].short_name, "SWR");
    assert_eq!(
        sink.routes[0].long_name.as_deref(),
        Some("South Western Railway")
    );
    assert_eq!(sink.routes[0].color.as_deref(), Some("#24398c"));

    // three distinct calling patterns
    assert_eq!(summary.shapes, 3);

    // the late night copy starts a day earlier with times under 24h
    let late_copies: Vec<_> = sink
        .trips
        .iter()
        .filter(|trip| trip.original_trip_id == "C40000")
        .collect();
    assert_eq!(late_copies.len(), 2);
    assert!(trip_ids.contains("C40000_20170102_20170331"));
    assert!(trip_ids.contains("C40000_20170101_20170330"));

    assert_eq!(summary.agencies, 1);
    assert_eq!(sink.agencies[0].name, "South Western Railway");

    // every station in the reference data is a stop with an interchange
    assert_eq!(sink.stops.len(), 4);
    assert_eq!(sink.transfers.len(), 4);
    assert_eq!(sink.feed_info.len(), 1);

    // stop sequences are 1-based and contiguous per trip
    for trip in &sink.trips {
        let mut sequences: Vec<u32> = sink
            .stop_times
            .iter()
            .filter(|stop_time| stop_time.trip_id == trip.id)
            .map(|stop_time| stop_time.stop_sequence)
            .collect();
        sequences.sort_unstable();
        let expected: Vec<u32> = (1..=sequences.len() as u32).collect();
        assert_eq!(sequences, expected, "trip {}", trip.id);
    }
}

#[test]
fn a_failing_row_stream_aborts_the_build() {
    let mut sink = MemorySink::default();
    let directory = directory();

    let rows: Vec<Result<ScheduleRow, TimetableError>> = vec![Err(
        TimetableError::RowSource("connection reset".to_owned()),
    )];
    let result = assemble_feed(
        rows,
        Vec::<Result<AssociationRow, TimetableError>>::new(),
        &directory,
        &PipelineConfig::default(),
        &FeedExtras::default(),
        &mut sink,
    );

    assert!(matches!(result, Err(TimetableError::RowSource(_))));
    assert!(sink.trips.is_empty());
}
