use chrono::Duration;
use log::info;
use model::{IdGenerator, Schedule};

/// A schedule whose first departure was pushed past midnight by the
/// rollover normalisation belongs to the previous service day's
/// timetable. Emitting a second copy a day earlier, with the times
/// brought back under 24 hours, makes the service visible on both
/// calendar days it touches.
pub fn duplicate_late_night(mut schedules: Vec<Schedule>, ids: &mut IdGenerator) -> Vec<Schedule> {
    let mut duplicates = Vec::new();

    for schedule in &schedules {
        let Some(departure) = schedule.origin().and_then(|stop| stop.departure_time) else {
            continue;
        };
        if departure.num_hours() < 24 {
            continue;
        }

        let mut duplicate = schedule.clone();
        duplicate.id = ids.next_id();
        duplicate.calendar = schedule.calendar.shift_backward();
        for stop in &mut duplicate.stops {
            stop.arrival_time = stop.arrival_time.map(|time| time - Duration::hours(24));
            stop.departure_time = stop.departure_time.map(|time| time - Duration::hours(24));
        }
        duplicates.push(duplicate);
    }

    if !duplicates.is_empty() {
        info!("duplicated {} late night schedules", duplicates.len());
    }
    schedules.extend(duplicates);
    schedules
}
