use std::fmt;
use std::sync::Arc;
use chrono::NaiveDate;
use tracing::info;
use crate::calendar::domain::CalendarPolicy;
use crate::calendar::domain::custom::CustomPolicy;
use crate::calendar::domain::policy::AnniversaryPolicy;
use crate::core::library::{LibraryError, LibraryResult};

// The holiday set a calendar lets callers edit, if any.
pub(crate) enum EditableHolidays {
    Fixed,
    Custom(Arc<CustomPolicy>),
    Anniversary(Arc<AnniversaryPolicy>),
}

// LendingCalendar is the single calendar a process lends by. It is built once per process
// and shared by reference, so holiday edits made through it are seen by every scheduler
// built from it.
pub(crate) struct LendingCalendar {
    policy: Arc<dyn CalendarPolicy>,
    holidays: EditableHolidays,
}

impl LendingCalendar {
    pub(crate) fn new(policy: Arc<dyn CalendarPolicy>, holidays: EditableHolidays) -> Self {
        Self {
            policy,
            holidays,
        }
    }

    pub(crate) fn policy(&self) -> Arc<dyn CalendarPolicy> {
        self.policy.clone()
    }

    fn read_only(&self) -> LibraryError {
        LibraryError::validation(format!("{} calendar has no editable holidays", self.policy.name()).as_str(),
                                 Some("ReadOnlyCalendar".to_string()))
    }

    pub(crate) async fn add_holiday(&self, day: NaiveDate, description: &str) -> LibraryResult<()> {
        match &self.holidays {
            EditableHolidays::Custom(custom) => custom.add_holiday(day, description).await,
            EditableHolidays::Anniversary(anniversary) => {
                if !anniversary.add_holiday(day) {
                    return Err(LibraryError::duplicate_key(format!("{} is already a holiday", day).as_str()));
                }
                info!(%day, "added anniversary");
                Ok(())
            }
            EditableHolidays::Fixed => Err(self.read_only()),
        }
    }

    pub(crate) async fn remove_holiday(&self, day: NaiveDate) -> LibraryResult<()> {
        match &self.holidays {
            EditableHolidays::Custom(custom) => custom.remove_holiday(day).await,
            EditableHolidays::Anniversary(anniversary) => {
                if !anniversary.remove_holiday(day) {
                    return Err(LibraryError::not_found(format!("{} is not a holiday", day).as_str()));
                }
                info!(%day, "removed anniversary");
                Ok(())
            }
            EditableHolidays::Fixed => Err(self.read_only()),
        }
    }

    // the editable holidays only; weekends are not listed
    pub(crate) fn holidays(&self) -> Vec<NaiveDate> {
        match &self.holidays {
            EditableHolidays::Custom(custom) => custom.holidays(),
            EditableHolidays::Anniversary(anniversary) => anniversary.holidays(),
            EditableHolidays::Fixed => vec![],
        }
    }
}

impl fmt::Debug for LendingCalendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LendingCalendar({})", self.policy.name())
    }
}
