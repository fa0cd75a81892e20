use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::calendar::domain::HolidayService;
use crate::core::command::{Command, CommandError};
use crate::utils::date::{format_day, parse_day};

// DueDateCommand previews the due date a loan starting on a given day would get.
pub(crate) struct DueDateCommand {
    holiday_service: Box<dyn HolidayService>,
}

impl DueDateCommand {
    pub(crate) fn new(holiday_service: Box<dyn HolidayService>) -> Self {
        Self {
            holiday_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DueDateCommandRequest {
    pub(crate) start_date: String,
    pub(crate) lending_days: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct DueDateCommandResponse {
    pub start_date: String,
    pub due_date: String,
}

#[async_trait]
impl Command<DueDateCommandRequest, DueDateCommandResponse> for DueDateCommand {
    async fn execute(&self, req: DueDateCommandRequest) -> Result<DueDateCommandResponse, CommandError> {
        let start = parse_day(req.start_date.as_str())?;
        let due = self.holiday_service.compute_due_date(start, req.lending_days).await?;
        Ok(DueDateCommandResponse {
            start_date: format_day(start),
            due_date: format_day(due),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::calendar::command::due_date_cmd::{DueDateCommand, DueDateCommandRequest};
    use crate::calendar::command::list_holidays_cmd::{ListHolidaysCommand, ListHolidaysCommandRequest};
    use crate::calendar::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::CalendarKind;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_due_date() {
        let config = Configuration::new("test").with_calendar(CalendarKind::Weekend);
        let calendar = factory::create_lending_calendar(&config, &RepositoryStore::in_memory()).await;
        let cmd = DueDateCommand::new(factory::create_holiday_service(&config, calendar));
        let res = cmd.execute(DueDateCommandRequest { start_date: "2025-08-29".to_string(), lending_days: 1 })
            .await.expect("should compute due date");
        assert_eq!("2025-09-01", res.due_date.as_str());
    }

    #[tokio::test]
    async fn test_should_run_list_holidays() {
        let config = Configuration::new("test");
        let calendar = factory::create_lending_calendar(&config, &RepositoryStore::in_memory()).await;
        let cmd = ListHolidaysCommand::new(factory::create_holiday_service(&config, calendar));
        let res = cmd.execute(ListHolidaysCommandRequest::default()).await.expect("should list holidays");
        assert!(res.holidays.is_empty());
    }
}
