use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::calendar::domain::HolidayService;
use crate::calendar::dto::HolidayDto;
use crate::core::command::{Command, CommandError};
use crate::utils::date::parse_day;

pub(crate) struct AddHolidayCommand {
    holiday_service: Box<dyn HolidayService>,
}

impl AddHolidayCommand {
    pub(crate) fn new(holiday_service: Box<dyn HolidayService>) -> Self {
        Self {
            holiday_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddHolidayCommandRequest {
    pub(crate) holiday_date: String,
    pub(crate) description: Option<String>,
}

impl AddHolidayCommandRequest {
    pub fn new(holiday_date: &str, description: &str) -> Self {
        Self {
            holiday_date: holiday_date.to_string(),
            description: Some(description.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddHolidayCommandResponse {
    pub holiday: HolidayDto,
}

impl AddHolidayCommandResponse {
    pub fn new(holiday: HolidayDto) -> Self {
        Self {
            holiday,
        }
    }
}

#[async_trait]
impl Command<AddHolidayCommandRequest, AddHolidayCommandResponse> for AddHolidayCommand {
    async fn execute(&self, req: AddHolidayCommandRequest) -> Result<AddHolidayCommandResponse, CommandError> {
        let day = parse_day(req.holiday_date.as_str())?;
        let holiday = HolidayDto::new(day, req.description.as_deref().unwrap_or(""));
        self.holiday_service.add_holiday(&holiday).await.map_err(CommandError::from).map(AddHolidayCommandResponse::new)
    }
}
