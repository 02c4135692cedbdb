mod rules;
mod via;

pub use rules::{HeadsignTemplate, TopologyRule, TOPOLOGY_RULES};
pub use via::{ViaEntry, VIA_TEXT};

use model::{Schedule, StopDirectory, StopTime};

/// Sets `stop_headsign` on every call of the schedule.
///
/// Two layers run per stop: the operator topology rules pick a false
/// destination or a distinguishing via place from the remaining calling
/// points, then the via-text table refines the wording from the actual
/// routing. A rule whose stations cannot be resolved is skipped and the
/// next one gets its turn.
pub fn infer_headsigns(schedule: &mut Schedule, directory: &StopDirectory) {
    let operator = schedule.operator.clone().unwrap_or_default();
    let computed: Vec<Option<String>> = (0..schedule.stops.len())
        .map(|index| headsign_at(&schedule.stops, &operator, directory, index))
        .collect();
    for (stop, headsign) in schedule.stops.iter_mut().zip(computed) {
        stop.headsign = headsign;
    }
}

/// The calling points still ahead of one stop; what rule patterns see.
pub struct CallingPoints<'a> {
    stops: &'a [StopTime],
    from: usize,
}

impl<'a> CallingPoints<'a> {
    pub fn new(stops: &'a [StopTime], from: usize) -> Self {
        Self { stops, from }
    }

    /// Index of the next call at `crs` strictly after the current stop.
    pub fn find_calling_index(&self, crs: &str) -> Option<usize> {
        self.stops
            .iter()
            .enumerate()
            .skip(self.from + 1)
            .find(|(_, stop)| stop.crs_code == crs)
            .map(|(index, _)| index)
    }

    pub fn calls_at(&self, crs: &str) -> bool {
        self.find_calling_index(crs).is_some()
    }

    /// Both stations are still ahead and `first` comes up before `second`.
    pub fn calls_in_order(&self, first: &str, second: &str) -> bool {
        match (self.find_calling_index(first), self.find_calling_index(second)) {
            (Some(first), Some(second)) => first < second,
            _ => false,
        }
    }

    pub fn terminates_at(&self, crs: &str) -> bool {
        self.stops
            .last()
            .is_some_and(|stop| stop.crs_code == crs)
    }
}

struct RuleMatch {
    headsign: String,
    /// Index and display name of the advertised terminus, when it is
    /// earlier than the real one.
    false_destination: Option<(usize, &'static str)>,
}

fn headsign_at(
    stops: &[StopTime],
    operator: &str,
    directory: &StopDirectory,
    index: usize,
) -> Option<String> {
    let destination = stops.last()?;
    let points = CallingPoints::new(stops, index);

    let mut rule_match: Option<RuleMatch> = None;
    for rule in TOPOLOGY_RULES {
        if !rule.operator.is_empty() && rule.operator != operator {
            continue;
        }
        if !(rule.pattern)(&points) {
            continue;
        }
        if let Some(matched) = resolve_template(&rule.template, &points, destination, directory) {
            rule_match = Some(matched);
            break;
        }
    }

    let (bound, false_name, target_tiploc) = match &rule_match {
        Some(RuleMatch {
            false_destination: Some((false_index, name)),
            ..
        }) => (*false_index, Some(*name), stops[*false_index].tiploc_code.as_str()),
        _ => (stops.len() - 1, None, destination.tiploc_code.as_str()),
    };

    if let Some(entry) = via::select(stops, index, bound, target_tiploc) {
        let display = match false_name {
            Some(name) => Some(name.to_owned()),
            None => directory
                .name_by_crs(&destination.crs_code)
                .map(str::to_owned),
        };
        if let Some(display) = display {
            return Some(format!("{} ({})", display, entry.text));
        }
    }

    rule_match.map(|matched| matched.headsign)
}

fn resolve_template(
    template: &HeadsignTemplate,
    points: &CallingPoints,
    destination: &StopTime,
    directory: &StopDirectory,
) -> Option<RuleMatch> {
    match template {
        HeadsignTemplate::FalseDestination { crs, name } => {
            let index = points.find_calling_index(crs)?;
            Some(RuleMatch {
                headsign: (*name).to_owned(),
                false_destination: Some((index, *name)),
            })
        }
        HeadsignTemplate::Via { place } => {
            let destination_name = directory.name_by_crs(&destination.crs_code)?;
            Some(RuleMatch {
                headsign: format!("{} (via {})", destination_name, place),
                false_destination: None,
            })
        }
        HeadsignTemplate::FalseDestinationVia { crs, name, place } => {
            let index = points.find_calling_index(crs)?;
            Some(RuleMatch {
                headsign: format!("{} (via {})", name, place),
                false_destination: Some((index, *name)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use model::{DropOffType, PickupType, StationStop};

    use super::*;

    fn stop(crs: &str, tiploc: &str) -> StopTime {
        StopTime {
            arrival_time: Some(Duration::hours(10)),
            departure_time: Some(Duration::hours(10) + Duration::minutes(1)),
            atco_code: format!("9100{}", tiploc),
            crs_code: crs.to_owned(),
            tiploc_code: tiploc.to_owned(),
            stop_sequence: 0,
            headsign: None,
            pickup_type: PickupType::Regular,
            drop_off_type: DropOffType::Regular,
            timepoint: true,
        }
    }

    fn station(crs: &str, tiploc: &str, name: &str) -> StationStop {
        StationStop {
            atco_code: format!("9100{}", tiploc),
            crs_code: Some(crs.to_owned()),
            tiploc_code: tiploc.to_owned(),
            name: name.to_owned(),
            latitude: None,
            longitude: None,
            platform: None,
            interchange_minutes: None,
        }
    }

    fn directory() -> StopDirectory {
        StopDirectory::new([
            station("CHX", "CHRX", "London Charing Cross"),
            station("DFD", "DARTFD", "Dartford"),
            station("BXH", "BXLYHTH", "Bexleyheath"),
            station("GRV", "GRVSEND", "Gravesend"),
            station("WAT", "WATRLMN", "London Waterloo"),
            station("TWI", "TWCKNHM", "Twickenham"),
            station("KNG", "KGSTON", "Kingston"),
            station("LVC", "LVPLCH", "Liverpool Central"),
            station("WKI", "WKIRBY", "West Kirby"),
            station("MRF", "MOORFLD", "Moorfields"),
        ])
    }

    #[test]
    fn a_false_destination_with_via_place_is_applied() {
        let stops = vec![
            stop("CHX", "CHRX"),
            stop("BXH", "BXLYHTH"),
            stop("DFD", "DARTFD"),
            stop("GRV", "GRVSEND"),
        ];
        let headsign = headsign_at(&stops, "SE", &directory(), 0);
        assert_eq!(headsign.as_deref(), Some("Dartford (via Bexleyheath)"));
    }

    #[test]
    fn rules_stop_matching_once_the_marker_is_passed() {
        let stops = vec![
            stop("CHX", "CHRX"),
            stop("BXH", "BXLYHTH"),
            stop("DFD", "DARTFD"),
            stop("GRV", "GRVSEND"),
        ];
        // at Dartford itself nothing distinguishes the route any more
        assert_eq!(headsign_at(&stops, "SE", &directory(), 2), None);
    }

    #[test]
    fn rules_are_scoped_to_their_operator() {
        let stops = vec![
            stop("CHX", "CHRX"),
            stop("BXH", "BXLYHTH"),
            stop("DFD", "DARTFD"),
            stop("GRV", "GRVSEND"),
        ];
        assert_eq!(headsign_at(&stops, "SW", &directory(), 0), None);
    }

    #[test]
    fn the_wirral_loop_advertises_liverpool_central() {
        let stops = vec![
            stop("WKI", "WKIRBY"),
            stop("MRF", "MOORFLD"),
            stop("LVC", "LVPLCH"),
            stop("MRF", "MOORFLD"),
            stop("WKI", "WKIRBY"),
        ];
        let headsign = headsign_at(&stops, "ME", &directory(), 0);
        assert_eq!(headsign.as_deref(), Some("Liverpool Central"));
        // past the loop the rule no longer applies
        assert_eq!(headsign_at(&stops, "ME", &directory(), 3), None);
    }

    #[test]
    fn the_via_table_refines_the_destination_wording() {
        let stops = vec![
            stop("WAT", "WATRLMN"),
            stop("TWI", "TWCKNHM"),
            stop("KNG", "KGSTON"),
            stop("WAT", "WATRLMN"),
        ];
        let headsign = headsign_at(&stops, "SW", &directory(), 0);
        assert_eq!(headsign.as_deref(), Some("Kingston (via Richmond)"));
    }
}
