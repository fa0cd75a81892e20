pub mod ddb_loan_repository;
pub mod memory_loan_repository;

use async_trait::async_trait;
use chrono::NaiveDate;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;

#[async_trait]
pub(crate) trait LoanRepository: Repository<LoanEntity> {
    // sets the return date only while the loan is still active; false when it was not
    async fn mark_returned(&self, loan_id: i64, return_date: NaiveDate) -> LibraryResult<bool>;

    // moves the due date only if the loan is active and its extension count is still the
    // expected one; false when another caller got there first
    async fn extend_due_date(&self, loan_id: i64, due_date: NaiveDate, expected_extension_count: u32) -> LibraryResult<bool>;

    async fn find_active_by_book(&self, book_id: i64) -> LibraryResult<Vec<LoanEntity>>;

    async fn find_active_by_member(&self, member_id: i64) -> LibraryResult<Vec<LoanEntity>>;

    // active loans due strictly before the given day
    async fn query_overdue(&self, today: NaiveDate) -> LibraryResult<Vec<LoanEntity>>;
}
