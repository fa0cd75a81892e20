use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::library::LoanStatus;
use crate::utils::date::serializer;

// LoanEntity abstracts one copy of a book lent to a member. A loan is active until it
// carries a return date; once returned it never changes again.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LoanEntity {
    pub loan_id: i64,
    pub version: i64,
    pub branch_id: String,
    pub book_id: i64,
    pub member_id: i64,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub extension_count: u32,
    pub loan_status: LoanStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl LoanEntity {
    pub fn new(branch_id: &str, book_id: i64, member_id: i64, borrow_date: NaiveDate, due_date: NaiveDate) -> Self {
        Self {
            loan_id: 0,
            version: 0,
            branch_id: branch_id.to_string(),
            book_id,
            member_id,
            borrow_date,
            due_date,
            return_date: None,
            extension_count: 0,
            loan_status: LoanStatus::Active,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }
}
