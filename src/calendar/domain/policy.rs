use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};
use chrono::{Datelike, NaiveDate, Weekday};
use crate::calendar::domain::CalendarPolicy;

// Saturdays and Sundays are closed.
#[derive(Debug, Default)]
pub(crate) struct WeekendPolicy;

impl CalendarPolicy for WeekendPolicy {
    fn is_non_lending_day(&self, day: NaiveDate) -> bool {
        matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
    }

    fn name(&self) -> &'static str {
        "Weekend"
    }
}

// AnniversaryPolicy keeps its closed days in memory only; nothing is persisted.
#[derive(Debug, Default)]
pub(crate) struct AnniversaryPolicy {
    days: RwLock<BTreeSet<NaiveDate>>,
}

impl AnniversaryPolicy {
    pub(crate) fn with_days(days: &[NaiveDate]) -> Self {
        Self {
            days: RwLock::new(days.iter().copied().collect()),
        }
    }

    // returns false if the day was already closed
    pub(crate) fn add_holiday(&self, day: NaiveDate) -> bool {
        self.days.write().unwrap_or_else(PoisonError::into_inner).insert(day)
    }

    // returns false if the day was not closed
    pub(crate) fn remove_holiday(&self, day: NaiveDate) -> bool {
        self.days.write().unwrap_or_else(PoisonError::into_inner).remove(&day)
    }

    pub(crate) fn holidays(&self) -> Vec<NaiveDate> {
        self.days.read().unwrap_or_else(PoisonError::into_inner).iter().copied().collect()
    }
}

impl CalendarPolicy for AnniversaryPolicy {
    fn is_non_lending_day(&self, day: NaiveDate) -> bool {
        self.days.read().unwrap_or_else(PoisonError::into_inner).contains(&day)
    }

    fn name(&self) -> &'static str {
        "Anniversary"
    }
}

// CompositePolicy closes a day when any of its policies does.
pub(crate) struct CompositePolicy {
    policies: Vec<Arc<dyn CalendarPolicy>>,
}

impl CompositePolicy {
    pub(crate) fn new(policies: Vec<Arc<dyn CalendarPolicy>>) -> Self {
        Self { policies }
    }
}

impl CalendarPolicy for CompositePolicy {
    fn is_non_lending_day(&self, day: NaiveDate) -> bool {
        self.policies.iter().any(|p| p.is_non_lending_day(day))
    }

    fn name(&self) -> &'static str {
        "Composite"
    }
}
