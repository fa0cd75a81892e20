use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::calendar::domain::HolidayService;
use crate::core::command::{Command, CommandError};

pub(crate) struct ListHolidaysCommand {
    holiday_service: Box<dyn HolidayService>,
}

impl ListHolidaysCommand {
    pub(crate) fn new(holiday_service: Box<dyn HolidayService>) -> Self {
        Self {
            holiday_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListHolidaysCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct ListHolidaysCommandResponse {
    pub holidays: Vec<NaiveDate>,
}

#[async_trait]
impl Command<ListHolidaysCommandRequest, ListHolidaysCommandResponse> for ListHolidaysCommand {
    async fn execute(&self, _req: ListHolidaysCommandRequest) -> Result<ListHolidaysCommandResponse, CommandError> {
        self.holiday_service.list_holidays().await.map_err(CommandError::from)
            .map(|holidays| ListHolidaysCommandResponse { holidays })
    }
}
