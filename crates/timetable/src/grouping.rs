use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use gtfs::records::agency::AgencyId;
use gtfs::records::routes::{Route, RouteId};
use gtfs::records::Color;
use indexmap::IndexMap;
use model::{RouteType, Schedule};

use crate::operators;

/// The rider-facing identity of one schedule's route: the operator table
/// entry after the brand splits.
#[derive(Debug, Clone)]
pub struct Branding {
    pub short_name: String,
    pub long_name: Option<String>,
    pub colour: Option<String>,
    pub text_colour: Option<String>,
}

/// Resolves the operator table for one schedule. The brand splits look
/// at the schedule's actual calling points: West Midlands Trains and
/// Greater Anglia split on marker stations, the Overground and
/// Merseyrail resolve to a named line. Unknown operators fall back to
/// the retail id prefix or the train UID, uncoloured.
pub fn branding_for(schedule: &Schedule) -> Branding {
    let Some(operator) = schedule.operator.as_deref().and_then(operators::branding) else {
        let short_name = schedule
            .rsid
            .as_deref()
            .map(|rsid| rsid.chars().take(6).collect())
            .unwrap_or_else(|| schedule.tuid.clone());
        return Branding {
            short_name,
            long_name: None,
            colour: None,
            text_colour: None,
        };
    };

    let mut short_name = operator.short_name.to_owned();
    let mut long_name = operator.long_name.map(str::to_owned);
    let colour = operator.colour.map(str::to_owned);

    match operator.code {
        // One franchise, two brands: London Northwestern for services
        // touching the Euston side, West Midlands Railway for the rest.
        "LM" => {
            short_name = if calls_any(schedule, operators::LNR_STATIONS) {
                "LNR"
            } else {
                "WMR"
            }
            .to_owned();
        }
        "LE" => {
            let airport_run = operators::STANSTED_EXPRESS_STATIONS
                .iter()
                .all(|crs| calls_at(schedule, crs));
            if airport_run {
                short_name = "Stansted Express".to_owned();
            }
        }
        "LO" => {
            if let Some((line, _)) = operators::OVERGROUND_LINES
                .iter()
                .find(|(_, markers)| calls_any(schedule, markers))
            {
                long_name = Some((*line).to_owned());
            }
        }
        "ME" => {
            if let Some((line, _)) = operators::MERSEYRAIL_LINES
                .iter()
                .find(|(_, markers)| calls_any(schedule, markers))
            {
                long_name = Some((*line).to_owned());
            }
        }
        _ => {}
    }

    let text_colour = colour
        .as_deref()
        .and_then(Color::from_hex)
        .map(|colour| colour.text_color().to_owned());

    Branding {
        short_name,
        long_name,
        colour,
        text_colour,
    }
}

fn calls_at(schedule: &Schedule, crs: &str) -> bool {
    schedule.stops.iter().any(|stop| stop.crs_code == crs)
}

fn calls_any(schedule: &Schedule, markers: &[&str]) -> bool {
    markers.iter().any(|crs| calls_at(schedule, crs))
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct RouteKey {
    agency: String,
    route_type: RouteType,
    short_name: String,
    long_name: Option<String>,
    colour: Option<String>,
    text_colour: Option<String>,
}

/// Assigns one route id per distinct branding tuple; the first schedule
/// to produce a tuple owns the id.
#[derive(Debug, Default)]
pub struct RouteGrouper {
    index: IndexMap<RouteKey, String>,
}

impl RouteGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// The schedule's route id, plus the `routes.txt` record when this
    /// branding tuple has not been seen before.
    pub fn assign(&mut self, schedule: &Schedule) -> (String, Option<Route>) {
        let branding = branding_for(schedule);
        let agency = schedule
            .operator
            .clone()
            .unwrap_or_else(|| "ZZ".to_owned());
        let key = RouteKey {
            agency: agency.clone(),
            route_type: schedule.route_type,
            short_name: branding.short_name.clone(),
            long_name: branding.long_name.clone(),
            colour: branding.colour.clone(),
            text_colour: branding.text_colour.clone(),
        };

        if let Some(id) = self.index.get(&key) {
            return (id.clone(), None);
        }

        let mut id = (self.index.len() + 1).to_string();
        if schedule.route_type == RouteType::ReplacementBus {
            id.push_str("_BUS");
        }
        self.index.insert(key, id.clone());

        let record = Route {
            id: RouteId::new(id.clone()),
            agency_id: AgencyId::new(agency),
            short_name: branding.short_name,
            long_name: branding.long_name,
            kind: schedule.route_type.into(),
            color: branding.colour,
            text_color: branding.text_colour,
        };
        (id, Some(record))
    }
}

/// Assigns one shape id per distinct stop-id sequence.
#[derive(Debug, Default)]
pub struct ShapeIndex {
    shapes: IndexMap<Vec<String>, String>,
}

impl ShapeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The schedule's shape id; `true` when the sequence is new and its
    /// points still need emitting.
    pub fn assign(&mut self, schedule: &Schedule) -> (String, bool) {
        let key: Vec<String> = schedule
            .stops
            .iter()
            .map(|stop| stop.atco_code.clone())
            .collect();
        if let Some(id) = self.shapes.get(&key) {
            return (id.clone(), false);
        }
        let id = shape_hash(&key);
        self.shapes.insert(key, id.clone());
        (id, true)
    }
}

fn shape_hash(stop_ids: &[String]) -> String {
    let mut hasher = DefaultHasher::new();
    stop_ids.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
