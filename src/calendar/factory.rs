use std::sync::Arc;
use tracing::warn;
use crate::calendar::domain::{CalendarPolicy, HolidayService};
use crate::calendar::domain::custom::CustomPolicy;
use crate::calendar::domain::lending::{EditableHolidays, LendingCalendar};
use crate::calendar::domain::policy::{AnniversaryPolicy, CompositePolicy, WeekendPolicy};
use crate::calendar::domain::scheduler::DueDateScheduler;
use crate::calendar::domain::service::HolidayServiceImpl;
use crate::calendar::repository::HolidayRepository;
use crate::calendar::repository::ddb_holiday_repository::DDBHolidayRepository;
use crate::calendar::repository::memory_holiday_repository::MemoryHolidayRepository;
use crate::core::domain::Configuration;
use crate::core::library::CalendarKind;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_lending_tables};

pub(crate) async fn create_holiday_repository(store: &RepositoryStore) -> Box<dyn HolidayRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBHolidayRepository::new(client, "holidays"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            create_lending_tables(&client).await;
            Box::new(DDBHolidayRepository::new(client, "holidays"))
        }
        RepositoryStore::InMemory(db) => {
            Box::new(MemoryHolidayRepository::new(db.clone()))
        }
    }
}

// An unreadable holiday store does not stop lending: the custom calendar starts out empty.
pub(crate) async fn create_custom_policy(store: &RepositoryStore) -> Arc<CustomPolicy> {
    let policy = CustomPolicy::new(create_holiday_repository(store).await);
    if let Err(err) = policy.reload().await {
        warn!("continuing with an empty custom calendar {}", err);
    }
    Arc::new(policy)
}

// Builds the calendar a process lends by. Build it once and share it, so every scheduler
// and holiday service sees the same editable holidays.
pub(crate) async fn create_lending_calendar(config: &Configuration, store: &RepositoryStore) -> Arc<LendingCalendar> {
    let weekend: Arc<dyn CalendarPolicy> = Arc::new(WeekendPolicy);
    let calendar = match config.calendar {
        CalendarKind::Weekend => LendingCalendar::new(weekend, EditableHolidays::Fixed),
        CalendarKind::Custom => {
            let custom = create_custom_policy(store).await;
            LendingCalendar::new(custom.clone(), EditableHolidays::Custom(custom))
        }
        CalendarKind::WeekendAndCustom => {
            let custom = create_custom_policy(store).await;
            let custom_days: Arc<dyn CalendarPolicy> = custom.clone();
            let policy = CompositePolicy::new(vec![weekend, custom_days]);
            LendingCalendar::new(Arc::new(policy), EditableHolidays::Custom(custom))
        }
        CalendarKind::Anniversary => {
            let anniversary = Arc::new(AnniversaryPolicy::with_days(&config.anniversaries));
            LendingCalendar::new(anniversary.clone(), EditableHolidays::Anniversary(anniversary))
        }
        CalendarKind::WeekendAndAnniversary => {
            let anniversary = Arc::new(AnniversaryPolicy::with_days(&config.anniversaries));
            let anniversary_days: Arc<dyn CalendarPolicy> = anniversary.clone();
            let policy = CompositePolicy::new(vec![weekend, anniversary_days]);
            LendingCalendar::new(Arc::new(policy), EditableHolidays::Anniversary(anniversary))
        }
    };
    Arc::new(calendar)
}

pub(crate) fn create_due_date_scheduler(config: &Configuration, calendar: &LendingCalendar) -> DueDateScheduler {
    DueDateScheduler::new(calendar.policy(), config.max_consecutive_closed_days)
}

pub(crate) fn create_holiday_service(config: &Configuration, calendar: Arc<LendingCalendar>) -> Box<dyn HolidayService> {
    let scheduler = create_due_date_scheduler(config, &calendar);
    Box::new(HolidayServiceImpl::new(calendar, scheduler))
}
