pub mod ledger;
pub mod model;

use async_trait::async_trait;
use chrono::NaiveDate;
use crate::core::library::LibraryResult;
use crate::loans::dto::LoanDto;

// LoanLedger moves each loan through none -> active -> returned and keeps the book stock
// in step with the active loans.
#[async_trait]
pub(crate) trait LoanLedger: Sync + Send {
    async fn borrow(&self, book_id: i64, member_id: i64) -> LibraryResult<LoanDto>;
    async fn return_loan(&self, loan_id: i64) -> LibraryResult<LoanDto>;
    async fn extend_due_date(&self, loan_id: i64, days_to_extend: u32) -> LibraryResult<LoanDto>;
    async fn find_loan_by_id(&self, loan_id: i64) -> LibraryResult<LoanDto>;
    async fn find_active_loans_by_member(&self, member_id: i64) -> LibraryResult<Vec<LoanDto>>;
    // active loans past their due date as of the given day, or today when none is given
    async fn query_overdue(&self, as_of: Option<NaiveDate>) -> LibraryResult<Vec<LoanDto>>;
}
