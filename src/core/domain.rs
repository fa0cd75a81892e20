use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::core::library::CalendarKind;

// Configuration abstracts lending options for a library branch
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub branch_id: String,
    pub loan_days: u32,
    pub extension_days: u32,
    pub max_extensions: u32,
    pub max_consecutive_closed_days: u32,
    pub calendar: CalendarKind,
    pub anniversaries: Vec<NaiveDate>,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            loan_days: 7,
            extension_days: 7,
            max_extensions: 1,
            max_consecutive_closed_days: 366,
            calendar: CalendarKind::WeekendAndCustom,
            anniversaries: vec![],
        }
    }

    pub fn with_calendar(mut self, calendar: CalendarKind) -> Self {
        self.calendar = calendar;
        self
    }
}
