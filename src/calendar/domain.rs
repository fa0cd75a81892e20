pub mod custom;
pub mod lending;
pub mod model;
pub mod policy;
pub mod scheduler;
pub mod service;

use async_trait::async_trait;
use chrono::NaiveDate;
use crate::calendar::dto::HolidayDto;
use crate::core::library::LibraryResult;

// CalendarPolicy decides whether a day is closed for lending. Policies are consulted
// synchronously by the scheduler, so any persisted state must be cached up front.
pub(crate) trait CalendarPolicy: Sync + Send {
    fn is_non_lending_day(&self, day: NaiveDate) -> bool;

    fn name(&self) -> &'static str;
}

#[async_trait]
pub(crate) trait HolidayService: Sync + Send {
    async fn add_holiday(&self, holiday: &HolidayDto) -> LibraryResult<HolidayDto>;
    async fn remove_holiday(&self, day: NaiveDate) -> LibraryResult<()>;
    async fn is_non_lending_day(&self, day: NaiveDate) -> LibraryResult<bool>;
    async fn list_holidays(&self) -> LibraryResult<Vec<NaiveDate>>;
    async fn compute_due_date(&self, start: NaiveDate, lending_days: u32) -> LibraryResult<NaiveDate>;
}
