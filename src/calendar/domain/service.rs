use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;
use crate::calendar::domain::lending::LendingCalendar;
use crate::calendar::domain::HolidayService;
use crate::calendar::domain::scheduler::DueDateScheduler;
use crate::calendar::dto::HolidayDto;
use crate::core::library::LibraryResult;

pub(crate) struct HolidayServiceImpl {
    calendar: Arc<LendingCalendar>,
    scheduler: DueDateScheduler,
}

impl HolidayServiceImpl {
    pub(crate) fn new(calendar: Arc<LendingCalendar>, scheduler: DueDateScheduler) -> Self {
        Self {
            calendar,
            scheduler,
        }
    }
}

#[async_trait]
impl HolidayService for HolidayServiceImpl {
    async fn add_holiday(&self, holiday: &HolidayDto) -> LibraryResult<HolidayDto> {
        self.calendar.add_holiday(holiday.holiday_date, holiday.description.as_str()).await?;
        Ok(holiday.clone())
    }

    async fn remove_holiday(&self, day: NaiveDate) -> LibraryResult<()> {
        self.calendar.remove_holiday(day).await
    }

    async fn is_non_lending_day(&self, day: NaiveDate) -> LibraryResult<bool> {
        // answers for the configured calendar, not just the editable dates
        Ok(self.scheduler.is_non_lending_day(day))
    }

    async fn list_holidays(&self) -> LibraryResult<Vec<NaiveDate>> {
        Ok(self.calendar.holidays())
    }

    async fn compute_due_date(&self, start: NaiveDate, lending_days: u32) -> LibraryResult<NaiveDate> {
        let due = self.scheduler.compute_due_date(start, lending_days)?;
        debug!(%start, %due, lending_days, calendar = self.scheduler.policy_name(), "computed due date");
        Ok(due)
    }
}
