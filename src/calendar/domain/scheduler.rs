use std::sync::Arc;
use chrono::NaiveDate;
use crate::calendar::domain::CalendarPolicy;
use crate::core::library::{LibraryError, LibraryResult};

// DueDateScheduler counts lending days forward from a start day, skipping the days the
// calendar policy closes.
#[derive(Clone)]
pub(crate) struct DueDateScheduler {
    policy: Arc<dyn CalendarPolicy>,
    max_consecutive_closed_days: u32,
}

impl DueDateScheduler {
    pub(crate) fn new(policy: Arc<dyn CalendarPolicy>, max_consecutive_closed_days: u32) -> Self {
        Self {
            policy,
            max_consecutive_closed_days,
        }
    }

    pub(crate) fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub(crate) fn is_non_lending_day(&self, day: NaiveDate) -> bool {
        self.policy.is_non_lending_day(day)
    }

    // The start day itself is never counted. Zero lending days yields the start day.
    pub(crate) fn compute_due_date(&self, start: NaiveDate, lending_days: u32) -> LibraryResult<NaiveDate> {
        let mut day = start;
        let mut consumed = 0;
        let mut closed_run = 0;
        while consumed < lending_days {
            day = day.succ_opt().ok_or_else(|| {
                LibraryError::schedule_unreachable(format!("ran past the last representable day from {}", start).as_str())
            })?;
            if self.policy.is_non_lending_day(day) {
                closed_run += 1;
                if closed_run > self.max_consecutive_closed_days {
                    return Err(LibraryError::schedule_unreachable(
                        format!("no lending day within {} days after {} under {} calendar",
                                self.max_consecutive_closed_days, start, self.policy.name()).as_str()));
                }
            } else {
                consumed += 1;
                closed_run = 0;
            }
        }
        Ok(day)
    }
}
