use gtfs::records::agency::Agency;
use gtfs::records::calendar::CalendarRow;
use gtfs::records::calendar_dates::CalendarDate;
use gtfs::records::feed_info::FeedInfo;
use gtfs::records::links::Link;
use gtfs::records::routes::RouteId;
use gtfs::records::shapes::ShapePoint;
use gtfs::records::stop_times::StopTimeRow;
use gtfs::records::stops::Stop;
use gtfs::records::transfers::Transfer;
use gtfs::records::trips::{Trip, TripId};
use gtfs::RowSink;
use indexmap::{IndexMap, IndexSet};
use log::info;
use model::{Schedule, StopDirectory};

use crate::error::TimetableError;
use crate::grouping::{RouteGrouper, ShapeIndex};
use crate::operators;

/// Rows the caller supplies ready-made: fixed links between stations and
/// the feed's publisher header.
#[derive(Debug, Default)]
pub struct FeedExtras {
    pub links: Vec<Link>,
    pub feed_info: FeedInfo,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FeedSummary {
    pub agencies: usize,
    pub stops: usize,
    pub transfers: usize,
    pub services: usize,
    pub routes: usize,
    pub trips: usize,
    pub stop_times: usize,
    pub shapes: usize,
}

/// Walks the final schedules and pushes every GTFS table into the sink.
/// Calendars are deduplicated by identity, so schedules with the same
/// operating pattern share one service id.
pub fn write_feed<S: RowSink>(
    schedules: &[Schedule],
    directory: &StopDirectory,
    extras: &FeedExtras,
    sink: &mut S,
) -> Result<FeedSummary, TimetableError> {
    let mut summary = FeedSummary::default();

    info!("writing agencies");
    let mut seen_operators: IndexSet<String> = IndexSet::new();
    for schedule in schedules {
        let code = schedule.operator.clone().unwrap_or_else(|| "ZZ".to_owned());
        if seen_operators.insert(code.clone()) {
            let name = match operators::branding(&code) {
                Some(operator) => operator.long_name.unwrap_or(operator.short_name),
                None => code.as_str(),
            };
            sink.push_agency(Agency::operator(&code, name))?;
            summary.agencies += 1;
        }
    }

    info!("writing {} stops", directory.len());
    for station in directory.iter() {
        sink.push_stop(Stop::from(station))?;
        summary.stops += 1;
        if let Some(minutes) = station.interchange_minutes {
            sink.push_transfer(Transfer::interchange(&station.atco_code, minutes))?;
            summary.transfers += 1;
        }
    }

    info!("writing {} trips", schedules.len());
    let mut services: IndexMap<String, String> = IndexMap::new();
    let mut routes = RouteGrouper::new();
    let mut shapes = ShapeIndex::new();

    for schedule in schedules {
        let trip_id = schedule.trip_id();

        let calendar_identity = schedule.calendar.id();
        let service_id = match services.get(&calendar_identity) {
            Some(service_id) => service_id.clone(),
            None => {
                let service_id = (services.len() + 1).to_string();
                services.insert(calendar_identity, service_id.clone());
                sink.push_calendar(CalendarRow::from_calendar(&service_id, &schedule.calendar))?;
                for removal in CalendarDate::removals(&service_id, &schedule.calendar) {
                    sink.push_calendar_date(removal)?;
                }
                summary.services += 1;
                service_id
            }
        };

        let (route_id, new_route) = routes.assign(schedule);
        if let Some(route) = new_route {
            sink.push_route(route)?;
            summary.routes += 1;
        }

        let (shape_id, new_shape) = shapes.assign(schedule);
        if new_shape {
            let mut sequence = 0;
            for stop in &schedule.stops {
                // stations without reference coordinates leave a gap
                let Some((latitude, longitude)) = directory.coordinates(&stop.atco_code) else {
                    continue;
                };
                sink.push_shape_point(ShapePoint {
                    shape_id: shape_id.clone(),
                    latitude,
                    longitude,
                    sequence,
                })?;
                sequence += 1;
            }
            summary.shapes += 1;
        }

        let headsign = schedule
            .destination()
            .and_then(|stop| directory.by_atco(&stop.atco_code))
            .map(|station| station.name.clone());
        sink.push_trip(Trip {
            route_id: RouteId::new(route_id),
            service_id,
            id: TripId::new(trip_id.clone()),
            headsign,
            short_name: schedule.rsid.clone(),
            shape_id: Some(shape_id),
            original_trip_id: schedule.tuid.clone(),
        })?;
        summary.trips += 1;

        for stop in &schedule.stops {
            sink.push_stop_time(StopTimeRow::from_call(&trip_id, stop))?;
            summary.stop_times += 1;
        }
    }

    for link in &extras.links {
        sink.push_link(link.clone())?;
    }
    sink.push_feed_info(extras.feed_info.clone())?;

    info!(
        "feed written: {} agencies, {} routes, {} services, {} trips, {} stop times, {} shapes",
        summary.agencies, summary.routes, summary.services, summary.trips, summary.stop_times,
        summary.shapes
    );
    Ok(summary)
}
