pub mod add_holiday_cmd;
pub mod due_date_cmd;
pub mod list_holidays_cmd;
pub mod remove_holiday_cmd;
