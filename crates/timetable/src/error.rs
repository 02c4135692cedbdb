use gtfs::SinkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    /// The source row stream failed; nothing partial is emitted.
    #[error("schedule row source failed: {0}")]
    RowSource(String),

    /// A time field that is not `HH:MM:SS` (or `HH:MM`) text. The feed is
    /// machine-generated, so this means the extract is corrupt and no
    /// repair is attempted.
    #[error("malformed time {text:?} in schedule {tuid}")]
    MalformedTime { text: String, tuid: String },

    /// Two flattened schedules produced the same trip id, which would
    /// silently drop one of them from the feed.
    #[error("duplicate trip id {0}")]
    DuplicateTripId(String),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
