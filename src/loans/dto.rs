use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::core::library::LoanStatus;
use crate::loans::domain::model::LoanEntity;

// LoanDto is a data transfer object for the loan ledger
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct LoanDto {
    pub loan_id: i64,
    pub branch_id: String,
    pub book_id: i64,
    pub member_id: i64,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub extension_count: u32,
    pub loan_status: LoanStatus,
}

impl LoanDto {
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }
}

impl From<&LoanEntity> for LoanDto {
    fn from(other: &LoanEntity) -> Self {
        Self {
            loan_id: other.loan_id,
            branch_id: other.branch_id.to_string(),
            book_id: other.book_id,
            member_id: other.member_id,
            borrow_date: other.borrow_date,
            due_date: other.due_date,
            return_date: other.return_date,
            extension_count: other.extension_count,
            loan_status: other.loan_status,
        }
    }
}
