use indexmap::IndexMap;
use model::{Overlap, OverlayRecord, Stp};

/// Collapses the STP variants of each TUID into records whose calendars
/// never overlap. Expects the input ordered permanent-first, the order
/// the source stream guarantees.
///
/// Overlays, new schedules and cancellations all carve their operating
/// days out of every record already indexed under the same TUID;
/// cancellations are never indexed themselves.
pub fn resolve<R: OverlayRecord>(records: impl IntoIterator<Item = R>) -> IndexMap<String, Vec<R>> {
    let mut index: IndexMap<String, Vec<R>> = IndexMap::new();

    for record in records {
        if record.stp() != Stp::Permanent {
            if let Some(bases) = index.get_mut(record.tuid()) {
                let kept = bases
                    .drain(..)
                    .filter_map(|base| apply_overlay(base, &record))
                    .collect();
                *bases = kept;
            }
        }
        if record.stp() != Stp::Cancellation {
            index
                .entry(record.tuid().to_owned())
                .or_default()
                .push(record);
        }
    }

    index
}

/// `None` when the overlay swallows the base entirely.
fn apply_overlay<R: OverlayRecord>(base: R, overlay: &R) -> Option<R> {
    if base.calendar().overlap(overlay.calendar()) == Overlap::None {
        return Some(base);
    }
    let calendar = base.calendar().add_exclude_days(overlay.calendar())?;
    let id = base.record_id();
    Some(base.with_calendar(calendar, id))
}
