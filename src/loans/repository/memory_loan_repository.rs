use std::sync::Arc;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use crate::core::library::{LibraryError, LibraryResult, LoanStatus};
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;
use crate::loans::repository::LoanRepository;
use crate::utils::memory::MemoryDatabase;

#[derive(Debug)]
pub(crate) struct MemoryLoanRepository {
    db: Arc<MemoryDatabase>,
}

impl MemoryLoanRepository {
    pub(crate) fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }

    async fn find_active<F>(&self, predicate: F) -> LibraryResult<Vec<LoanEntity>>
        where F: Fn(&LoanEntity) -> bool {
        Ok(self.db.loans.lock().await.values()
            .filter(|l| l.loan_status == LoanStatus::Active && predicate(l))
            .cloned().collect())
    }
}

#[async_trait]
impl Repository<LoanEntity> for MemoryLoanRepository {
    async fn create(&self, entity: &LoanEntity) -> LibraryResult<i64> {
        let id = self.db.next_id("loans").await;
        let mut loan = entity.clone();
        loan.loan_id = id;
        self.db.loans.lock().await.insert(id, loan);
        Ok(id)
    }

    async fn get(&self, id: i64) -> LibraryResult<LoanEntity> {
        self.db.loans.lock().await.get(&id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("loan not found for {}", id).as_str()))
    }
}

#[async_trait]
impl LoanRepository for MemoryLoanRepository {
    async fn mark_returned(&self, loan_id: i64, return_date: NaiveDate) -> LibraryResult<bool> {
        let mut loans = self.db.loans.lock().await;
        match loans.get_mut(&loan_id) {
            Some(loan) if loan.loan_status == LoanStatus::Active => {
                loan.return_date = Some(return_date);
                loan.loan_status = LoanStatus::Returned;
                loan.version += 1;
                loan.updated_at = Utc::now().naive_utc();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn extend_due_date(&self, loan_id: i64, due_date: NaiveDate, expected_extension_count: u32) -> LibraryResult<bool> {
        let mut loans = self.db.loans.lock().await;
        match loans.get_mut(&loan_id) {
            Some(loan) if loan.loan_status == LoanStatus::Active && loan.extension_count == expected_extension_count => {
                loan.due_date = due_date;
                loan.extension_count += 1;
                loan.version += 1;
                loan.updated_at = Utc::now().naive_utc();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_active_by_book(&self, book_id: i64) -> LibraryResult<Vec<LoanEntity>> {
        self.find_active(|l| l.book_id == book_id).await
    }

    async fn find_active_by_member(&self, member_id: i64) -> LibraryResult<Vec<LoanEntity>> {
        self.find_active(|l| l.member_id == member_id).await
    }

    async fn query_overdue(&self, today: NaiveDate) -> LibraryResult<Vec<LoanEntity>> {
        self.find_active(|l| l.due_date < today).await
    }
}
