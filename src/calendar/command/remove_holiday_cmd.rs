use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::calendar::domain::HolidayService;
use crate::core::command::{Command, CommandError};
use crate::utils::date::parse_day;

pub(crate) struct RemoveHolidayCommand {
    holiday_service: Box<dyn HolidayService>,
}

impl RemoveHolidayCommand {
    pub(crate) fn new(holiday_service: Box<dyn HolidayService>) -> Self {
        Self {
            holiday_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveHolidayCommandRequest {
    pub(crate) holiday_date: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveHolidayCommandResponse {
    pub holiday_date: String,
}

#[async_trait]
impl Command<RemoveHolidayCommandRequest, RemoveHolidayCommandResponse> for RemoveHolidayCommand {
    async fn execute(&self, req: RemoveHolidayCommandRequest) -> Result<RemoveHolidayCommandResponse, CommandError> {
        let day = parse_day(req.holiday_date.as_str())?;
        self.holiday_service.remove_holiday(day).await.map_err(CommandError::from)
            .map(|_| RemoveHolidayCommandResponse { holiday_date: req.holiday_date })
    }
}
