use std::env;
use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::process;

use gtfs::CsvSink;
use model::{StationStop, StopDirectory};
use timetable::{assemble_feed, FeedExtras, PipelineConfig};

/// Feeds CSV extracts of the timetable tables through the assembly and
/// writes a GTFS directory. The extracts must carry the column order of
/// the source queries; see the row types in `timetable::rows`.
fn main() {
    env_logger::init();
    if let Err(error) = run() {
        eprintln!("dtd2gtfs: {}", error);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let [_, schedules, associations, stations, output] = args.as_slice() else {
        eprintln!("usage: dtd2gtfs <schedules.csv> <associations.csv> <stations.csv> <output-dir>");
        process::exit(2);
    };

    let stations: Vec<StationStop> = csv::Reader::from_reader(File::open(stations)?)
        .into_deserialize()
        .collect::<Result<_, _>>()?;
    let directory = StopDirectory::new(stations);

    let mut schedule_reader = csv::Reader::from_reader(File::open(schedules)?);
    let mut association_reader = csv::Reader::from_reader(File::open(associations)?);
    let mut sink = CsvSink::create(Path::new(output))?;

    let summary = assemble_feed(
        schedule_reader.deserialize(),
        association_reader.deserialize(),
        &directory,
        &PipelineConfig::default(),
        &FeedExtras::default(),
        &mut sink,
    )?;
    sink.finish()?;

    println!(
        "wrote {} trips on {} routes ({} services, {} shapes) to {}",
        summary.trips, summary.routes, summary.services, summary.shapes, output
    );
    Ok(())
}
