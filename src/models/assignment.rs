//! Date-range shift assignments and weekday masks.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Identifier of a date-range assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(pub u64);

impl std::fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 7-bit set of weekdays, bit 0 = Monday through bit 6 = Sunday.
///
/// # Example
///
/// ```
/// use attendance_engine::models::WeekdayMask;
/// use chrono::Weekday;
///
/// let weekend = WeekdayMask::from_weekdays(&[Weekday::Sat, Weekday::Sun]);
/// assert!(weekend.contains(Weekday::Sun));
/// assert!(!weekend.intersects(WeekdayMask::MON_FRI));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Weekday>", from = "Vec<Weekday>")]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    /// No days.
    pub const EMPTY: WeekdayMask = WeekdayMask(0);
    /// Monday to Friday, the default for new assignments.
    pub const MON_FRI: WeekdayMask = WeekdayMask(0b001_1111);
    /// Saturday and Sunday.
    pub const WEEKEND: WeekdayMask = WeekdayMask(0b110_0000);
    /// Every day of the week.
    pub const ALL: WeekdayMask = WeekdayMask(0b111_1111);

    /// Builds a mask from raw bits; bits above the seventh are dropped.
    pub fn from_bits(bits: u8) -> Self {
        WeekdayMask(bits & Self::ALL.0)
    }

    /// Builds a mask from a list of weekdays.
    pub fn from_weekdays(days: &[Weekday]) -> Self {
        days.iter().fold(Self::EMPTY, |mask, day| mask.with(*day))
    }

    /// Raw bits.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns a copy with `day` added.
    pub fn with(self, day: Weekday) -> Self {
        WeekdayMask(self.0 | Self::bit(day))
    }

    /// True if `day` is in the mask.
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// True if the masks share at least one day.
    pub fn intersects(self, other: WeekdayMask) -> bool {
        self.0 & other.0 != 0
    }

    /// True if no day is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The set days, Monday first.
    pub fn weekdays(self) -> Vec<Weekday> {
        (0..7u8)
            .filter(|i| self.0 & (1 << i) != 0)
            .filter_map(|i| Weekday::try_from(i).ok())
            .collect()
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }
}

impl Default for WeekdayMask {
    fn default() -> Self {
        Self::MON_FRI
    }
}

impl From<Vec<Weekday>> for WeekdayMask {
    fn from(days: Vec<Weekday>) -> Self {
        Self::from_weekdays(&days)
    }
}

impl From<WeekdayMask> for Vec<Weekday> {
    fn from(mask: WeekdayMask) -> Self {
        mask.weekdays()
    }
}

/// Assigns a catalog shift to one employee over a date interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRangeAssignment {
    /// Primary key, issued by the assignment book.
    pub id: AssignmentId,
    /// The employee the shift is assigned to.
    pub employee: EmployeeId,
    /// Code of the assigned shift.
    pub shift_code: String,
    /// First day of the assignment (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the assignment (inclusive); `None` is open-ended.
    pub end_date: Option<NaiveDate>,
    /// Weekdays the assignment applies on.
    pub weekdays: WeekdayMask,
    /// Free-text note.
    #[serde(default)]
    pub note: String,
    /// Inactive assignments are ignored by resolution and overlap checks.
    pub active: bool,
}

impl DateRangeAssignment {
    /// True if `date` falls within `[start_date, end_date]`, open end unbounded.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }

    /// True if the assignment is active, covers `date` and applies on its weekday.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.active && self.covers(date) && self.weekdays.contains(date.weekday())
    }

    /// True if the two date intervals share at least one day.
    pub fn dates_intersect(&self, other: &DateRangeAssignment) -> bool {
        let starts_before_other_ends = other.end_date.is_none_or(|end| self.start_date <= end);
        let other_starts_before_self_ends =
            self.end_date.is_none_or(|end| other.start_date <= end);
        starts_before_other_ends && other_starts_before_self_ends
    }

    /// Short description used in conflict messages.
    pub fn describe(&self) -> String {
        let end = self
            .end_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "open".to_string());
        let days: Vec<String> = self.weekdays.weekdays().iter().map(|d| d.to_string()).collect();
        format!(
            "{} {}..{} [{}]",
            self.shift_code,
            self.start_date,
            end,
            days.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn assignment(start: &str, end: Option<&str>, weekdays: WeekdayMask) -> DateRangeAssignment {
        DateRangeAssignment {
            id: AssignmentId(1),
            employee: EmployeeId(1),
            shift_code: "A".to_string(),
            start_date: make_date(start),
            end_date: end.map(make_date),
            weekdays,
            note: String::new(),
            active: true,
        }
    }

    #[test]
    fn test_mask_from_weekdays() {
        let mask = WeekdayMask::from_weekdays(&[Weekday::Mon, Weekday::Wed]);
        assert_eq!(mask.bits(), 0b000_0101);
        assert_eq!(mask.weekdays(), vec![Weekday::Mon, Weekday::Wed]);
    }

    #[test]
    fn test_mask_from_bits_drops_high_bit() {
        assert_eq!(WeekdayMask::from_bits(0xFF), WeekdayMask::ALL);
    }

    #[test]
    fn test_mon_fri_and_weekend_are_disjoint() {
        assert!(!WeekdayMask::MON_FRI.intersects(WeekdayMask::WEEKEND));
        assert!(WeekdayMask::MON_FRI.intersects(WeekdayMask::ALL));
        assert!(WeekdayMask::EMPTY.is_empty());
    }

    #[test]
    fn test_mask_serializes_as_weekday_list() {
        let json = serde_json::to_string(&WeekdayMask::WEEKEND).unwrap();
        assert_eq!(json, r#"["Sat","Sun"]"#);
        let back: WeekdayMask = serde_json::from_str(r#"["Monday","tue"]"#).unwrap();
        assert_eq!(back, WeekdayMask::from_weekdays(&[Weekday::Mon, Weekday::Tue]));
    }

    #[test]
    fn test_covers_open_ended() {
        let a = assignment("2026-01-05", None, WeekdayMask::ALL);
        assert!(!a.covers(make_date("2026-01-04")));
        assert!(a.covers(make_date("2026-01-05")));
        assert!(a.covers(make_date("2030-12-31")));
    }

    #[test]
    fn test_applies_on_checks_weekday_and_active() {
        // 2026-01-17 is a Saturday
        let mut a = assignment("2026-01-01", Some("2026-01-31"), WeekdayMask::MON_FRI);
        assert!(a.applies_on(make_date("2026-01-16")));
        assert!(!a.applies_on(make_date("2026-01-17")));
        a.active = false;
        assert!(!a.applies_on(make_date("2026-01-16")));
    }

    #[test]
    fn test_dates_intersect_bounded_and_open() {
        let jan_1_10 = assignment("2026-01-01", Some("2026-01-10"), WeekdayMask::ALL);
        let jan_5_20 = assignment("2026-01-05", Some("2026-01-20"), WeekdayMask::ALL);
        let jan_11_on = assignment("2026-01-11", None, WeekdayMask::ALL);
        let jan_10_on = assignment("2026-01-10", None, WeekdayMask::ALL);

        assert!(jan_1_10.dates_intersect(&jan_5_20));
        assert!(!jan_1_10.dates_intersect(&jan_11_on));
        assert!(jan_1_10.dates_intersect(&jan_10_on));
        assert!(jan_11_on.dates_intersect(&jan_10_on));
    }

    #[test]
    fn test_describe() {
        let a = assignment("2026-01-01", None, WeekdayMask::WEEKEND);
        assert_eq!(a.describe(), "A 2026-01-01..open [Sat,Sun]");
    }
}
