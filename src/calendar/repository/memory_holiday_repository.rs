use std::collections::btree_map::Entry;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use crate::calendar::domain::model::HolidayEntity;
use crate::calendar::repository::HolidayRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::memory::MemoryDatabase;

#[derive(Debug)]
pub struct MemoryHolidayRepository {
    db: Arc<MemoryDatabase>,
}

impl MemoryHolidayRepository {
    pub(crate) fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HolidayRepository for MemoryHolidayRepository {
    async fn find_all(&self) -> LibraryResult<Vec<HolidayEntity>> {
        Ok(self.db.holidays.lock().await.values().cloned().collect())
    }

    async fn create(&self, entity: &HolidayEntity) -> LibraryResult<usize> {
        match self.db.holidays.lock().await.entry(entity.holiday_date) {
            Entry::Occupied(_) => {
                Err(LibraryError::duplicate_key(format!("holiday {} already exists", entity.holiday_date).as_str()))
            }
            Entry::Vacant(slot) => {
                slot.insert(entity.clone());
                Ok(1)
            }
        }
    }

    async fn delete(&self, holiday_date: NaiveDate) -> LibraryResult<usize> {
        Ok(self.db.holidays.lock().await.remove(&holiday_date).map(|_| 1).unwrap_or(0))
    }
}
