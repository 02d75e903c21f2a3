use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Upper bound for hours allocated to one subject on one day.
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

/// Hours of study planned for one subject on one day.
///
/// Always within `0.0..=24.0`; out-of-range input is clamped the way the
/// hours input widget clamps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct StudyHours(f64);

impl StudyHours {
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, MAX_HOURS_PER_DAY))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

/// Planned hours per subject, keyed by calendar date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    days: BTreeMap<NaiveDate, BTreeMap<String, StudyHours>>,
}

impl Schedule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_persisted(days: BTreeMap<NaiveDate, BTreeMap<String, StudyHours>>) -> Self {
        Self { days }
    }

    #[must_use]
    pub fn days(&self) -> &BTreeMap<NaiveDate, BTreeMap<String, StudyHours>> {
        &self.days
    }

    /// Allocations for one date, if the date has an entry.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&BTreeMap<String, StudyHours>> {
        self.days.get(&date)
    }

    /// Hours for one subject on one date, zero when nothing is planned.
    #[must_use]
    pub fn hours(&self, date: NaiveDate, subject: &str) -> StudyHours {
        self.day(date)
            .and_then(|day| day.get(subject))
            .copied()
            .unwrap_or_default()
    }

    /// Sum of all allocations on one date.
    #[must_use]
    pub fn total_hours(&self, date: NaiveDate) -> f64 {
        self.day(date)
            .map(|day| day.values().map(|h| h.value()).sum())
            .unwrap_or(0.0)
    }

    /// Returns true when the stored value actually changed.
    pub(crate) fn set(&mut self, date: NaiveDate, subject: String, hours: StudyHours) -> bool {
        let day = self.days.entry(date).or_default();
        if day.get(&subject) == Some(&hours) {
            return false;
        }
        day.insert(subject, hours);
        true
    }

    pub(crate) fn clear_day(&mut self, date: NaiveDate) -> bool {
        self.days.remove(&date).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
