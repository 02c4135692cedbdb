use serde::Deserialize;

use crate::calendar::ScheduleCalendar;

/// Row id from the source timetable database.
pub type RecordId = u64;

/// Short-Term Planning indicator of a schedule or association variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Stp {
    #[serde(rename = "P")]
    Permanent,
    #[serde(rename = "O")]
    Overlay,
    #[serde(rename = "N")]
    New,
    #[serde(rename = "C")]
    Cancellation,
}

/// The capability the overlay resolver needs: schedules and associations
/// both arrive as STP variants keyed by a train UID and carry an operating
/// calendar that overlays can carve days out of.
pub trait OverlayRecord: Clone {
    fn record_id(&self) -> RecordId;

    /// The key under which STP variants of the same service are grouped.
    fn tuid(&self) -> &str;

    fn stp(&self) -> Stp;

    fn calendar(&self) -> &ScheduleCalendar;

    /// A copy of this record with a replacement calendar and id; every
    /// other field is preserved.
    fn with_calendar(&self, calendar: ScheduleCalendar, id: RecordId) -> Self;
}

/// Hands out record ids above everything seen in the source data, so
/// cloned schedules never collide with database rows.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: RecordId,
}

impl IdGenerator {
    pub fn starting_after(max_seen: RecordId) -> Self {
        Self { next: max_seen + 1 }
    }

    pub fn next_id(&mut self) -> RecordId {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Iterator for IdGenerator {
    type Item = RecordId;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_generator_counts_up_from_the_maximum() {
        let mut generator = IdGenerator::starting_after(41);
        assert_eq!(generator.next_id(), 42);
        assert_eq!(generator.next(), Some(43));
    }
}
