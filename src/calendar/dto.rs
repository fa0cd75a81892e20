use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::calendar::domain::model::HolidayEntity;

// HolidayDto is a data transfer object for Holiday service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct HolidayDto {
    pub holiday_date: NaiveDate,
    pub description: String,
}

impl HolidayDto {
    pub fn new(holiday_date: NaiveDate, description: &str) -> Self {
        Self {
            holiday_date,
            description: description.to_string(),
        }
    }
}

impl From<&HolidayEntity> for HolidayDto {
    fn from(other: &HolidayEntity) -> Self {
        Self {
            holiday_date: other.holiday_date,
            description: other.description.to_string(),
        }
    }
}

impl From<&HolidayDto> for HolidayEntity {
    fn from(other: &HolidayDto) -> Self {
        HolidayEntity::new(other.holiday_date, other.description.as_str())
    }
}
