pub mod association;
pub mod calendar;
pub mod record;
pub mod schedule;
pub mod stops;

pub use association::{Association, AssociationType, DateIndicator};
pub use calendar::{DayMask, Overlap, ScheduleCalendar};
pub use record::{IdGenerator, OverlayRecord, RecordId, Stp};
pub use schedule::{DropOffType, PickupType, RouteType, Schedule, StopTime};
pub use stops::{StationStop, StopDirectory};
