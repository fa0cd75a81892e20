pub mod ddb_holiday_repository;
pub mod memory_holiday_repository;

use async_trait::async_trait;
use chrono::NaiveDate;
use crate::calendar::domain::model::HolidayEntity;
use crate::core::library::LibraryResult;

#[async_trait]
pub(crate) trait HolidayRepository: Sync + Send {
    async fn find_all(&self) -> LibraryResult<Vec<HolidayEntity>>;

    // fails with DuplicateKey when the date is already a holiday
    async fn create(&self, entity: &HolidayEntity) -> LibraryResult<usize>;

    // returns the number of removed rows, zero when the date was not a holiday
    async fn delete(&self, holiday_date: NaiveDate) -> LibraryResult<usize>;
}
