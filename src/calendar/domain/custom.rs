use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock};
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{info, warn};
use crate::calendar::domain::CalendarPolicy;
use crate::calendar::domain::model::HolidayEntity;
use crate::calendar::repository::HolidayRepository;
use crate::core::library::{LibraryError, LibraryResult};

// CustomPolicy closes the days persisted in the holiday store. The store is read once into
// the cache; afterwards the cache only changes through this instance, and only after the store
// confirmed the write. Changes made to the store by anyone else need a reload.
pub(crate) struct CustomPolicy {
    holiday_repository: Box<dyn HolidayRepository>,
    cache: RwLock<BTreeSet<NaiveDate>>,
    // serializes store-then-cache updates
    writer: Mutex<()>,
}

impl CustomPolicy {
    pub(crate) fn new(holiday_repository: Box<dyn HolidayRepository>) -> Self {
        Self {
            holiday_repository,
            cache: RwLock::new(BTreeSet::new()),
            writer: Mutex::new(()),
        }
    }

    // replaces the cache with the persisted holidays
    pub(crate) async fn reload(&self) -> LibraryResult<usize> {
        let _guard = self.writer.lock().await;
        let holidays = self.holiday_repository.find_all().await.map_err(|err| {
            LibraryError::policy_load(format!("failed to load custom holidays due to {}", err).as_str())
        })?;
        let days: BTreeSet<NaiveDate> = holidays.iter().map(|h| h.holiday_date).collect();
        let size = days.len();
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = days;
        info!(holidays = size, "loaded custom calendar");
        Ok(size)
    }

    pub(crate) async fn add_holiday(&self, day: NaiveDate, description: &str) -> LibraryResult<()> {
        let _guard = self.writer.lock().await;
        if let Err(err) = self.holiday_repository.create(&HolidayEntity::new(day, description)).await {
            warn!(%day, "failed to add holiday {}", err);
            return Err(err);
        }
        self.cache.write().unwrap_or_else(PoisonError::into_inner).insert(day);
        Ok(())
    }

    pub(crate) async fn remove_holiday(&self, day: NaiveDate) -> LibraryResult<()> {
        let _guard = self.writer.lock().await;
        let removed = match self.holiday_repository.delete(day).await {
            Ok(removed) => removed,
            Err(err) => {
                warn!(%day, "failed to remove holiday {}", err);
                return Err(err);
            }
        };
        if removed == 0 {
            return Err(LibraryError::not_found(format!("{} is not a holiday", day).as_str()));
        }
        self.cache.write().unwrap_or_else(PoisonError::into_inner).remove(&day);
        Ok(())
    }

    pub(crate) fn holidays(&self) -> Vec<NaiveDate> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).iter().copied().collect()
    }
}

impl CalendarPolicy for CustomPolicy {
    fn is_non_lending_day(&self, day: NaiveDate) -> bool {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).contains(&day)
    }

    fn name(&self) -> &'static str {
        "Custom"
    }
}
