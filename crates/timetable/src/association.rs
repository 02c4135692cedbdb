use chrono::Duration;
use indexmap::IndexMap;
use log::warn;
use model::{
    Association, AssociationType, DateIndicator, DropOffType, IdGenerator, Overlap, OverlayRecord,
    PickupType, Schedule, ScheduleCalendar, StopTime,
};

/// Applies resolved associations to the resolved schedule index: every
/// split or join becomes a merged through schedule, and the days that
/// merged are excluded from the stand-alone associated schedule.
pub fn apply_associations(
    mut schedules: IndexMap<String, Vec<Schedule>>,
    associations: IndexMap<String, Vec<Association>>,
    ids: &mut IdGenerator,
) -> IndexMap<String, Vec<Schedule>> {
    for (_, group) in associations {
        for association in group {
            if association.kind == AssociationType::NA {
                continue;
            }
            apply_one(&mut schedules, &association, ids);
        }
    }
    schedules
}

fn apply_one(
    schedules: &mut IndexMap<String, Vec<Schedule>>,
    association: &Association,
    ids: &mut IdGenerator,
) {
    // The associated train's calling pattern may belong to the day after
    // or before the base train's service day.
    let assoc_calendar = match association.date_indicator {
        DateIndicator::Same => association.calendar.clone(),
        DateIndicator::Next => association.calendar.shift_forward(),
        DateIndicator::Previous => association.calendar.shift_backward(),
    };

    let bases: Vec<Schedule> = schedules
        .get(&association.base_tuid)
        .cloned()
        .unwrap_or_default();
    let assoc_schedules: Vec<Schedule> = match schedules.get_mut(&association.assoc_tuid) {
        Some(list) => std::mem::take(list),
        None => return,
    };

    let mut remaining = Vec::with_capacity(assoc_schedules.len());
    let mut merged_out: Vec<Schedule> = Vec::new();

    for assoc_schedule in assoc_schedules {
        if assoc_schedule.calendar.overlap(&assoc_calendar) == Overlap::None {
            remaining.push(assoc_schedule);
            continue;
        }

        let mut applied = false;
        for base in &bases {
            if base.calendar.overlap(&assoc_calendar) == Overlap::None {
                continue;
            }
            match merge_schedules(base, &assoc_schedule, association, &assoc_calendar, ids) {
                MergeOutcome::Merged(merged) => {
                    merged_out.push(merged);
                    applied = true;
                }
                MergeOutcome::CalendarCollapsed => {
                    applied = true;
                }
                MergeOutcome::JunctionMissing => {}
            }
        }

        if applied {
            // Carve the merged days out of the stand-alone schedule; it
            // may disappear entirely.
            if let Some(calendar) = assoc_schedule.calendar.add_exclude_days(&assoc_calendar) {
                let id = ids.next_id();
                remaining.push(assoc_schedule.with_calendar(calendar, id));
            }
        } else {
            remaining.push(assoc_schedule);
        }
    }

    if let Some(list) = schedules.get_mut(&association.assoc_tuid) {
        *list = remaining;
    }
    for merged in merged_out {
        schedules
            .entry(merged.tuid.clone())
            .or_default()
            .push(merged);
    }
}

enum MergeOutcome {
    Merged(Schedule),
    /// The association and schedule calendars have no common day once
    /// intersected; nothing to emit, but the association still applied.
    CalendarCollapsed,
    /// Corrupt feed data: the junction TIPLOC is not a calling point of
    /// both schedules. The associated schedule is left untouched.
    JunctionMissing,
}

fn merge_schedules(
    base: &Schedule,
    assoc: &Schedule,
    association: &Association,
    assoc_calendar: &ScheduleCalendar,
    ids: &mut IdGenerator,
) -> MergeOutcome {
    let (Some(base_index), Some(assoc_index)) = (
        base.stop_at(&association.location),
        assoc.stop_at(&association.location),
    ) else {
        warn!(
            "association {} of {} and {} has no junction call at {}",
            association.id, base.tuid, assoc.tuid, association.location
        );
        return MergeOutcome::JunctionMissing;
    };

    // For a split the base train runs first and the associated train
    // carries on; for a join the associated train runs first.
    let (tuid, first_part, arriving, departing, second_part) = match association.kind {
        AssociationType::Split => (
            format!("{}_{}", base.tuid, assoc.tuid),
            base.before(base_index),
            &base.stops[base_index],
            &assoc.stops[assoc_index],
            assoc.after(assoc_index),
        ),
        AssociationType::Join => (
            format!("{}_{}", assoc.tuid, base.tuid),
            assoc.before(assoc_index),
            &assoc.stops[assoc_index],
            &base.stops[base_index],
            base.after(base_index),
        ),
        AssociationType::NA => return MergeOutcome::JunctionMissing,
    };

    let merge_calendar_base = if association.date_indicator == DateIndicator::Previous {
        assoc_calendar.clone()
    } else {
        association.calendar.clone()
    };
    let Some(calendar) = merge_calendar_base.intersect(&assoc.calendar) else {
        return MergeOutcome::CalendarCollapsed;
    };

    let mut arrival_time = arriving.arrival_time;
    let mut departure_time = departing.departure_time;
    if let (Some(arrival), Some(departure)) = (arrival_time, departure_time) {
        if arrival > departure {
            if association.date_indicator == DateIndicator::Next {
                departure_time = Some(departure + Duration::hours(24));
            } else {
                arrival_time = departing.arrival_time;
            }
        }
    }

    let merge_stop = StopTime {
        arrival_time,
        departure_time,
        atco_code: arriving.atco_code.clone(),
        crs_code: arriving.crs_code.clone(),
        tiploc_code: arriving.tiploc_code.clone(),
        stop_sequence: 0,
        headsign: None,
        pickup_type: if association.kind == AssociationType::Join {
            PickupType::NotAvailable
        } else {
            departing.pickup_type
        },
        drop_off_type: if association.kind == AssociationType::Split {
            DropOffType::NotAvailable
        } else {
            arriving.drop_off_type
        },
        timepoint: true,
    };

    // The second portion of a next-day split (and of a previous-day
    // join) runs on the calendar day after the schedule's service day.
    let advance_tail = matches!(
        (association.kind, association.date_indicator),
        (AssociationType::Split, DateIndicator::Next)
            | (AssociationType::Join, DateIndicator::Previous)
    );

    let mut stops: Vec<StopTime> = Vec::with_capacity(first_part.len() + second_part.len() + 1);
    stops.extend(first_part.iter().cloned());
    stops.push(merge_stop);
    stops.extend(second_part.iter().cloned().map(|mut stop| {
        if advance_tail {
            stop.arrival_time = stop.arrival_time.map(|time| time + Duration::hours(24));
            stop.departure_time = stop.departure_time.map(|time| time + Duration::hours(24));
        }
        stop
    }));
    for (index, stop) in stops.iter_mut().enumerate() {
        stop.stop_sequence = index as u32 + 1;
    }

    MergeOutcome::Merged(Schedule {
        id: ids.next_id(),
        tuid,
        stp: assoc.stp,
        calendar,
        stops,
        rsid: assoc.rsid.clone(),
        route_type: assoc.route_type,
        operator: assoc.operator.clone(),
        first_class: assoc.first_class,
        reservable: assoc.reservable,
    })
}
