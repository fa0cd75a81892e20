use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::date::serializer;

// HolidayEntity is a persisted non-lending day of the custom calendar.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct HolidayEntity {
    pub holiday_date: NaiveDate,
    pub description: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

impl HolidayEntity {
    pub fn new(holiday_date: NaiveDate, description: &str) -> Self {
        Self {
            holiday_date,
            description: description.to_string(),
            created_at: Utc::now().naive_utc(),
        }
    }
}
