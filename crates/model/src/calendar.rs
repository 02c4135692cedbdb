use std::collections::BTreeSet;

use bitflags::bitflags;
use chrono::{Datelike, Duration, NaiveDate};

bitflags! {
    /// The seven operating-day bits of a schedule, index 0 = Sunday through
    /// index 6 = Saturday, stored MSB-first so that the printed form reads
    /// Sunday..Saturday left to right.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DayMask: u8 {
        const SUNDAY = 0b100_0000;
        const MONDAY = 0b010_0000;
        const TUESDAY = 0b001_0000;
        const WEDNESDAY = 0b000_1000;
        const THURSDAY = 0b000_0100;
        const FRIDAY = 0b000_0010;
        const SATURDAY = 0b000_0001;
    }
}

impl DayMask {
    #[allow(clippy::too_many_arguments)]
    pub fn from_day_flags(
        sunday: bool,
        monday: bool,
        tuesday: bool,
        wednesday: bool,
        thursday: bool,
        friday: bool,
        saturday: bool,
    ) -> Self {
        let mut mask = DayMask::empty();
        mask.set(DayMask::SUNDAY, sunday);
        mask.set(DayMask::MONDAY, monday);
        mask.set(DayMask::TUESDAY, tuesday);
        mask.set(DayMask::WEDNESDAY, wednesday);
        mask.set(DayMask::THURSDAY, thursday);
        mask.set(DayMask::FRIDAY, friday);
        mask.set(DayMask::SATURDAY, saturday);
        mask
    }

    /// Whether the mask has the bit for the given weekday index,
    /// 0 = Sunday through 6 = Saturday.
    pub fn runs_on_weekday(&self, index: u32) -> bool {
        self.bits() & (DayMask::SUNDAY.bits() >> index) != 0
    }

    pub fn runs_on(&self, date: NaiveDate) -> bool {
        self.runs_on_weekday(date.weekday().num_days_from_sunday())
    }

    /// Rotate every operating day one weekday later
    /// (Sunday→Monday, …, Saturday→Sunday).
    pub fn rotate_forward(self) -> Self {
        let bits = self.bits();
        DayMask::from_bits_truncate((bits >> 1) | ((bits & 1) << 6))
    }

    /// Rotate every operating day one weekday earlier; inverse of
    /// [`DayMask::rotate_forward`].
    pub fn rotate_backward(self) -> Self {
        let bits = self.bits();
        DayMask::from_bits_truncate(((bits << 1) & 0b111_1111) | (bits >> 6))
    }

    /// The seven bits as a Sunday-first 0/1 string.
    pub fn binary(&self) -> String {
        (0..7)
            .map(|index| if self.runs_on_weekday(index) { '1' } else { '0' })
            .collect()
    }
}

/// The result of checking two calendars against each other. There is no
/// "contained" case to distinguish: an overlay only ever needs to know
/// whether any shared operating day exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    None,
    Short,
}

/// The operating-day window of one schedule variant: an inclusive date
/// range, the weekday mask and the dates inside the range on which the
/// schedule does not run.
///
/// Weekdays the mask switches off need no exclusion dates; the excluded
/// set only ever holds dates the mask would otherwise allow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCalendar {
    pub runs_from: NaiveDate,
    pub runs_to: NaiveDate,
    pub days: DayMask,
    pub excluded: BTreeSet<NaiveDate>,
}

impl ScheduleCalendar {
    pub fn new(runs_from: NaiveDate, runs_to: NaiveDate, days: DayMask) -> Self {
        Self {
            runs_from,
            runs_to,
            days,
            excluded: BTreeSet::new(),
        }
    }

    pub fn with_excluded(
        runs_from: NaiveDate,
        runs_to: NaiveDate,
        days: DayMask,
        excluded: BTreeSet<NaiveDate>,
    ) -> Self {
        Self {
            runs_from,
            runs_to,
            days,
            excluded,
        }
    }

    /// Every calendar day both calendars operate on: inside both ranges, on
    /// a weekday both masks allow, and excluded by neither side.
    pub fn shared_days<'a>(
        &'a self,
        other: &'a ScheduleCalendar,
    ) -> impl Iterator<Item = NaiveDate> + 'a {
        let start = self.runs_from.max(other.runs_from);
        let end = self.runs_to.min(other.runs_to);
        let both = self.days & other.days;
        start
            .iter_days()
            .take_while(move |day| *day <= end)
            .filter(move |day| {
                both.runs_on(*day)
                    && !self.excluded.contains(day)
                    && !other.excluded.contains(day)
            })
    }

    /// Cheap mask test first, then the day generator.
    pub fn overlap(&self, other: &ScheduleCalendar) -> Overlap {
        if (self.days & other.days).is_empty() {
            return Overlap::None;
        }
        if self.shared_days(other).next().is_some() {
            Overlap::Short
        } else {
            Overlap::None
        }
    }

    /// A copy of this calendar with every day shared with `other` added to
    /// the exclusion set. `None` when no operating day is left.
    pub fn add_exclude_days(&self, other: &ScheduleCalendar) -> Option<ScheduleCalendar> {
        let mut excluded = self.excluded.clone();
        excluded.extend(self.shared_days(other));
        self.clone_with(self.runs_from, self.runs_to, DayMask::empty(), excluded)
    }

    /// Rebuild the calendar over `[start, end]` with the `remove` bits
    /// switched off and the given exclusion set. The bounds are tightened
    /// past leading and trailing non-operating or excluded days, and
    /// exclusions outside the tightened range are dropped. `None` when
    /// nothing operates any more.
    pub fn clone_with(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        remove: DayMask,
        excluded: BTreeSet<NaiveDate>,
    ) -> Option<ScheduleCalendar> {
        let days = self.days & !remove;
        if days.is_empty() {
            return None;
        }

        let mut runs_from = start;
        while runs_from <= end && (!days.runs_on(runs_from) || excluded.contains(&runs_from)) {
            runs_from = runs_from.succ_opt()?;
        }
        if runs_from > end {
            return None;
        }

        let mut runs_to = end;
        while runs_to > runs_from && (!days.runs_on(runs_to) || excluded.contains(&runs_to)) {
            runs_to = runs_to.pred_opt()?;
        }

        let excluded = excluded
            .into_iter()
            .filter(|day| *day >= runs_from && *day <= runs_to)
            .collect();

        Some(ScheduleCalendar {
            runs_from,
            runs_to,
            days,
            excluded,
        })
    }

    /// Range intersection, mask intersection and exclusion union with
    /// `other`. `None` when the calendars have no common operating day.
    pub fn intersect(&self, other: &ScheduleCalendar) -> Option<ScheduleCalendar> {
        let start = self.runs_from.max(other.runs_from);
        let end = self.runs_to.min(other.runs_to);
        if start > end {
            return None;
        }
        let mut excluded = self.excluded.clone();
        excluded.extend(other.excluded.iter().copied());
        self.clone_with(start, end, !other.days, excluded)
    }

    /// The same operating pattern one day later: both bounds and every
    /// exclusion move forward, the mask rotates.
    pub fn shift_forward(&self) -> ScheduleCalendar {
        ScheduleCalendar {
            runs_from: self.runs_from + Duration::days(1),
            runs_to: self.runs_to + Duration::days(1),
            days: self.days.rotate_forward(),
            excluded: self
                .excluded
                .iter()
                .map(|day| *day + Duration::days(1))
                .collect(),
        }
    }

    /// Inverse of [`ScheduleCalendar::shift_forward`].
    pub fn shift_backward(&self) -> ScheduleCalendar {
        ScheduleCalendar {
            runs_from: self.runs_from - Duration::days(1),
            runs_to: self.runs_to - Duration::days(1),
            days: self.days.rotate_backward(),
            excluded: self
                .excluded
                .iter()
                .map(|day| *day - Duration::days(1))
                .collect(),
        }
    }

    /// Structural identity: bounds, mask bits and the sorted exclusion
    /// dates. Calendars with equal ids produce identical GTFS service
    /// entries and may share one service id.
    pub fn id(&self) -> String {
        let excluded: String = self
            .excluded
            .iter()
            .map(|day| day.format("%Y%m%d").to_string())
            .collect();
        format!(
            "{}{}{}{}",
            self.runs_from.format("%Y%m%d"),
            self.runs_to.format("%Y%m%d"),
            self.days.binary(),
            excluded
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn all_days(from: NaiveDate, to: NaiveDate) -> ScheduleCalendar {
        ScheduleCalendar::new(from, to, DayMask::all())
    }

    #[test]
    fn overlapping_ranges_with_shared_days_are_short() {
        let a = all_days(date(2017, 1, 1), date(2017, 1, 31));
        let b = all_days(date(2016, 12, 5), date(2017, 1, 9));
        assert_eq!(a.overlap(&b), Overlap::Short);

        let c = all_days(date(2017, 2, 5), date(2017, 2, 7));
        assert_eq!(a.overlap(&c), Overlap::None);
    }

    #[test]
    fn disjoint_masks_never_overlap() {
        let weekdays = DayMask::MONDAY
            | DayMask::TUESDAY
            | DayMask::WEDNESDAY
            | DayMask::THURSDAY
            | DayMask::FRIDAY;
        let weekend = DayMask::SATURDAY | DayMask::SUNDAY;
        let a = ScheduleCalendar::new(date(2017, 1, 1), date(2017, 1, 31), weekdays);
        let b = ScheduleCalendar::new(date(2017, 1, 1), date(2017, 1, 31), weekend);
        assert_eq!(a.overlap(&b), Overlap::None);
        assert_eq!(b.overlap(&a), Overlap::None);
    }

    #[test]
    fn exclusions_dominate_the_mask() {
        let mut a = all_days(date(2017, 1, 2), date(2017, 1, 4));
        a.excluded.extend([date(2017, 1, 2), date(2017, 1, 3), date(2017, 1, 4)]);
        let b = all_days(date(2017, 1, 2), date(2017, 1, 4));
        assert_eq!(a.overlap(&b), Overlap::None);
    }

    #[test]
    fn add_exclude_days_tightens_the_range() {
        let calendar = all_days(date(2017, 1, 5), date(2017, 1, 31));

        let calendar = calendar
            .add_exclude_days(&all_days(date(2017, 1, 1), date(2017, 1, 7)))
            .unwrap();
        assert_eq!(calendar.runs_from, date(2017, 1, 8));

        let calendar = calendar
            .add_exclude_days(&all_days(date(2017, 1, 30), date(2017, 2, 7)))
            .unwrap();
        assert_eq!(calendar.runs_from, date(2017, 1, 8));
        assert_eq!(calendar.runs_to, date(2017, 1, 29));
        assert!(calendar.excluded.is_empty());
    }

    #[test]
    fn add_exclude_days_can_empty_the_schedule() {
        let sundays = ScheduleCalendar::new(date(2017, 1, 1), date(2017, 1, 15), DayMask::SUNDAY);

        let first_week =
            ScheduleCalendar::new(date(2017, 1, 1), date(2017, 1, 7), DayMask::SUNDAY);
        let remaining = sundays.add_exclude_days(&first_week).unwrap();
        assert_eq!(remaining.runs_from, date(2017, 1, 8));
        assert_eq!(remaining.runs_to, date(2017, 1, 15));

        let rest = ScheduleCalendar::new(date(2017, 1, 8), date(2017, 1, 15), DayMask::SUNDAY);
        assert_eq!(remaining.add_exclude_days(&rest), None);
    }

    #[test]
    fn shift_forward_moves_days_and_rotates_the_mask() {
        let mut calendar = ScheduleCalendar::new(
            date(2017, 7, 3),
            date(2017, 7, 14),
            DayMask::MONDAY | DayMask::SATURDAY,
        );
        calendar.excluded.insert(date(2017, 7, 10));

        let shifted = calendar.shift_forward();
        assert_eq!(shifted.runs_from, date(2017, 7, 4));
        assert_eq!(shifted.runs_to, date(2017, 7, 15));
        assert_eq!(shifted.days, DayMask::SUNDAY | DayMask::TUESDAY);
        assert!(shifted.excluded.contains(&date(2017, 7, 11)));
    }

    #[test]
    fn shifts_are_inverses() {
        let mut calendar = ScheduleCalendar::new(
            date(2017, 7, 3),
            date(2017, 7, 14),
            DayMask::SUNDAY | DayMask::WEDNESDAY,
        );
        calendar.excluded.insert(date(2017, 7, 9));

        assert_eq!(calendar.shift_forward().shift_backward(), calendar);
        assert_eq!(calendar.shift_backward().shift_forward(), calendar);
    }

    #[test]
    fn clone_with_drops_out_of_range_exclusions() {
        let calendar = all_days(date(2017, 1, 1), date(2017, 1, 31));
        let excluded: BTreeSet<_> = [date(2016, 12, 25), date(2017, 1, 10)].into();
        let cloned = calendar
            .clone_with(date(2017, 1, 2), date(2017, 1, 20), DayMask::empty(), excluded)
            .unwrap();
        assert_eq!(cloned.excluded.len(), 1);
        assert!(cloned.excluded.contains(&date(2017, 1, 10)));
    }

    #[test]
    fn intersect_takes_the_common_window() {
        let a = all_days(date(2017, 1, 1), date(2017, 1, 20));
        let weekdays_only = ScheduleCalendar::new(
            date(2017, 1, 10),
            date(2017, 1, 31),
            DayMask::all() & !DayMask::SATURDAY & !DayMask::SUNDAY,
        );
        let common = a.intersect(&weekdays_only).unwrap();
        assert_eq!(common.runs_from, date(2017, 1, 10));
        assert_eq!(common.runs_to, date(2017, 1, 20));
        assert!(!common.days.contains(DayMask::SATURDAY));
    }

    #[test]
    fn binary_days_reads_sunday_first() {
        let mask = DayMask::MONDAY | DayMask::SATURDAY;
        assert_eq!(mask.binary(), "0100001");
    }
}
