//! Assembles the UK national rail timetable, as surfaced by the source
//! database, into a GTFS dataset: schedule rows fold into STP variants,
//! overlays and cancellations collapse into non-overlapping calendars,
//! split/join associations become through trains, and the result is
//! grouped into routes and shapes and pushed into a row sink.

pub mod association;
pub mod builder;
pub mod config;
pub mod error;
pub mod flatten;
pub mod grouping;
pub mod headsign;
pub mod late_night;
pub mod operators;
pub mod output;
pub mod overlay;
pub mod rows;

pub use config::PipelineConfig;
pub use error::TimetableError;
pub use output::{FeedExtras, FeedSummary};

use std::fmt::Display;

use gtfs::RowSink;
use model::StopDirectory;

use rows::{AssociationRow, ScheduleRow};

/// Runs the whole assembly over the two ordered row streams and writes
/// the feed into `sink`. A failed source row aborts before anything is
/// emitted.
pub fn assemble_feed<S, E1, E2>(
    schedule_rows: impl IntoIterator<Item = Result<ScheduleRow, E1>>,
    association_rows: impl IntoIterator<Item = Result<AssociationRow, E2>>,
    directory: &StopDirectory,
    config: &PipelineConfig,
    extras: &FeedExtras,
    sink: &mut S,
) -> Result<FeedSummary, TimetableError>
where
    S: RowSink,
    E1: Display,
    E2: Display,
{
    let folded = builder::fold_schedules(schedule_rows, config)?;
    let associations = builder::fold_associations(association_rows)?;
    let mut ids = folded.ids;

    let schedule_index = overlay::resolve(folded.schedules);
    let association_index = overlay::resolve(associations);
    let merged = association::apply_associations(schedule_index, association_index, &mut ids);

    let mut schedules = flatten::flatten(merged)?;
    for schedule in &mut schedules {
        headsign::infer_headsigns(schedule, directory);
    }
    let schedules = late_night::duplicate_late_night(schedules, &mut ids);

    output::write_feed(&schedules, directory, extras, sink)
}
