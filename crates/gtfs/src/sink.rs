use std::fs::File;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::records::agency::Agency;
use crate::records::calendar::CalendarRow;
use crate::records::calendar_dates::CalendarDate;
use crate::records::feed_info::FeedInfo;
use crate::records::links::Link;
use crate::records::routes::Route;
use crate::records::shapes::ShapePoint;
use crate::records::stop_times::StopTimeRow;
use crate::records::stops::Stop;
use crate::records::transfers::Transfer;
use crate::records::trips::Trip;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to create output file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write output row: {0}")]
    Csv(#[from] csv::Error),
}

/// Where the assembled feed goes. The pipeline owns the records, not the
/// serialization: implementations may write CSV files, collect rows in
/// memory or push into a database.
pub trait RowSink {
    fn push_agency(&mut self, row: Agency) -> Result<(), SinkError>;
    fn push_stop(&mut self, row: Stop) -> Result<(), SinkError>;
    fn push_transfer(&mut self, row: Transfer) -> Result<(), SinkError>;
    fn push_calendar(&mut self, row: CalendarRow) -> Result<(), SinkError>;
    fn push_calendar_date(&mut self, row: CalendarDate) -> Result<(), SinkError>;
    fn push_route(&mut self, row: Route) -> Result<(), SinkError>;
    fn push_trip(&mut self, row: Trip) -> Result<(), SinkError>;
    fn push_stop_time(&mut self, row: StopTimeRow) -> Result<(), SinkError>;
    fn push_shape_point(&mut self, row: ShapePoint) -> Result<(), SinkError>;
    fn push_link(&mut self, row: Link) -> Result<(), SinkError>;
    fn push_feed_info(&mut self, row: FeedInfo) -> Result<(), SinkError>;
}

/// Collects every pushed row. Used by tests and by callers that want the
/// feed as values rather than files.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub agencies: Vec<Agency>,
    pub stops: Vec<Stop>,
    pub transfers: Vec<Transfer>,
    pub calendars: Vec<CalendarRow>,
    pub calendar_dates: Vec<CalendarDate>,
    pub routes: Vec<Route>,
    pub trips: Vec<Trip>,
    pub stop_times: Vec<StopTimeRow>,
    pub shape_points: Vec<ShapePoint>,
    pub links: Vec<Link>,
    pub feed_info: Vec<FeedInfo>,
}

impl RowSink for MemorySink {
    fn push_agency(&mut self, row: Agency) -> Result<(), SinkError> {
        self.agencies.push(row);
        Ok(())
    }

    fn push_stop(&mut self, row: Stop) -> Result<(), SinkError> {
        self.stops.push(row);
        Ok(())
    }

    fn push_transfer(&mut self, row: Transfer) -> Result<(), SinkError> {
        self.transfers.push(row);
        Ok(())
    }

    fn push_calendar(&mut self, row: CalendarRow) -> Result<(), SinkError> {
        self.calendars.push(row);
        Ok(())
    }

    fn push_calendar_date(&mut self, row: CalendarDate) -> Result<(), SinkError> {
        self.calendar_dates.push(row);
        Ok(())
    }

    fn push_route(&mut self, row: Route) -> Result<(), SinkError> {
        self.routes.push(row);
        Ok(())
    }

    fn push_trip(&mut self, row: Trip) -> Result<(), SinkError> {
        self.trips.push(row);
        Ok(())
    }

    fn push_stop_time(&mut self, row: StopTimeRow) -> Result<(), SinkError> {
        self.stop_times.push(row);
        Ok(())
    }

    fn push_shape_point(&mut self, row: ShapePoint) -> Result<(), SinkError> {
        self.shape_points.push(row);
        Ok(())
    }

    fn push_link(&mut self, row: Link) -> Result<(), SinkError> {
        self.links.push(row);
        Ok(())
    }

    fn push_feed_info(&mut self, row: FeedInfo) -> Result<(), SinkError> {
        self.feed_info.push(row);
        Ok(())
    }
}

/// Writes one CSV file per GTFS table into a directory. Headers come from
/// the record definitions on the first row of each file.
pub struct CsvSink {
    agency: csv::Writer<File>,
    stops: csv::Writer<File>,
    transfers: csv::Writer<File>,
    calendar: csv::Writer<File>,
    calendar_dates: csv::Writer<File>,
    routes: csv::Writer<File>,
    trips: csv::Writer<File>,
    stop_times: csv::Writer<File>,
    shapes: csv::Writer<File>,
    links: csv::Writer<File>,
    feed_info: csv::Writer<File>,
}

impl CsvSink {
    pub fn create(directory: &Path) -> Result<Self, SinkError> {
        std::fs::create_dir_all(directory)?;
        let writer = |name: &str| -> Result<csv::Writer<File>, SinkError> {
            Ok(csv::Writer::from_writer(File::create(directory.join(name))?))
        };
        Ok(CsvSink {
            agency: writer("agency.txt")?,
            stops: writer("stops.txt")?,
            transfers: writer("transfers.txt")?,
            calendar: writer("calendar.txt")?,
            calendar_dates: writer("calendar_dates.txt")?,
            routes: writer("routes.txt")?,
            trips: writer("trips.txt")?,
            stop_times: writer("stop_times.txt")?,
            shapes: writer("shapes.txt")?,
            links: writer("links.txt")?,
            feed_info: writer("feed_info.txt")?,
        })
    }

    pub fn finish(mut self) -> Result<(), SinkError> {
        self.agency.flush()?;
        self.stops.flush()?;
        self.transfers.flush()?;
        self.calendar.flush()?;
        self.calendar_dates.flush()?;
        self.routes.flush()?;
        self.trips.flush()?;
        self.stop_times.flush()?;
        self.shapes.flush()?;
        self.links.flush()?;
        self.feed_info.flush()?;
        Ok(())
    }
}

impl RowSink for CsvSink {
    fn push_agency(&mut self, row: Agency) -> Result<(), SinkError> {
        Ok(self.agency.serialize(row)?)
    }

    fn push_stop(&mut self, row: Stop) -> Result<(), SinkError> {
        Ok(self.stops.serialize(row)?)
    }

    fn push_transfer(&mut self, row: Transfer) -> Result<(), SinkError> {
        Ok(self.transfers.serialize(row)?)
    }

    fn push_calendar(&mut self, row: CalendarRow) -> Result<(), SinkError> {
        Ok(self.calendar.serialize(row)?)
    }

    fn push_calendar_date(&mut self, row: CalendarDate) -> Result<(), SinkError> {
        Ok(self.calendar_dates.serialize(row)?)
    }

    fn push_route(&mut self, row: Route) -> Result<(), SinkError> {
        Ok(self.routes.serialize(row)?)
    }

    fn push_trip(&mut self, row: Trip) -> Result<(), SinkError> {
        Ok(self.trips.serialize(row)?)
    }

    fn push_stop_time(&mut self, row: StopTimeRow) -> Result<(), SinkError> {
        Ok(self.stop_times.serialize(row)?)
    }

    fn push_shape_point(&mut self, row: ShapePoint) -> Result<(), SinkError> {
        Ok(self.shapes.serialize(row)?)
    }

    fn push_link(&mut self, row: Link) -> Result<(), SinkError> {
        Ok(self.links.serialize(row)?)
    }

    fn push_feed_info(&mut self, row: FeedInfo) -> Result<(), SinkError> {
        Ok(self.feed_info.serialize(row)?)
    }
}
