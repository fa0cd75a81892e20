use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{error, info, warn};
use crate::books::domain::StockReservation;
use crate::calendar::domain::scheduler::DueDateScheduler;
use crate::core::clock::Clock;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult, LoanStatus};
use crate::loans::domain::LoanLedger;
use crate::loans::domain::model::LoanEntity;
use crate::loans::dto::LoanDto;
use crate::loans::repository::LoanRepository;
use crate::members::domain::MemberService;

pub(crate) struct LoanLedgerImpl {
    branch_id: String,
    loan_days: u32,
    max_extensions: u32,
    member_service: Box<dyn MemberService>,
    stock_reservation: Box<dyn StockReservation>,
    loan_repository: Box<dyn LoanRepository>,
    scheduler: DueDateScheduler,
    clock: Arc<dyn Clock>,
}

impl LoanLedgerImpl {
    pub(crate) fn new(config: &Configuration,
                      member_service: Box<dyn MemberService>,
                      stock_reservation: Box<dyn StockReservation>,
                      loan_repository: Box<dyn LoanRepository>,
                      scheduler: DueDateScheduler,
                      clock: Arc<dyn Clock>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            loan_days: config.loan_days,
            max_extensions: config.max_extensions,
            member_service,
            stock_reservation,
            loan_repository,
            scheduler,
            clock,
        }
    }

    // Puts back a copy taken for a borrow that could not be completed. There is no
    // transaction spanning books and loans, so a failure here leaves the stock short by one.
    async fn release_reserved_copy(&self, book_id: i64, cause: &LibraryError) {
        match self.stock_reservation.increment(book_id).await {
            Ok(_) => warn!(book_id, "released reserved copy after failed borrow {}", cause),
            Err(err) => error!(book_id, "stock is short by one copy, failed to release it after {} due to {}", cause, err),
        }
    }

    // Takes back the copy put on the shelf by a return that did not go through.
    async fn retake_returned_copy(&self, book_id: i64, loan_id: i64) {
        if let Err(err) = self.stock_reservation.try_decrement(book_id).await {
            error!(book_id, loan_id, "stock is over by one copy, failed to undo return due to {}", err);
        }
    }
}

#[async_trait]
impl LoanLedger for LoanLedgerImpl {
    async fn borrow(&self, book_id: i64, member_id: i64) -> LibraryResult<LoanDto> {
        let _ = self.member_service.find_member_by_id(member_id).await?;
        self.stock_reservation.try_decrement(book_id).await?;

        let today = self.clock.today();
        let due_date = match self.scheduler.compute_due_date(today, self.loan_days) {
            Ok(due_date) => due_date,
            Err(err) => {
                self.release_reserved_copy(book_id, &err).await;
                return Err(err);
            }
        };
        let mut loan = LoanEntity::new(self.branch_id.as_str(), book_id, member_id, today, due_date);
        match self.loan_repository.create(&loan).await {
            Ok(loan_id) => {
                loan.loan_id = loan_id;
                info!(loan_id, book_id, member_id, %due_date, "borrowed book");
                Ok(LoanDto::from(&loan))
            }
            Err(err) => {
                self.release_reserved_copy(book_id, &err).await;
                Err(err)
            }
        }
    }

    async fn return_loan(&self, loan_id: i64) -> LibraryResult<LoanDto> {
        let mut loan = self.loan_repository.get(loan_id).await?;
        if !loan.is_active() {
            return Err(LibraryError::already_returned(format!("loan {} was already returned", loan_id).as_str()));
        }
        // a book removed from the catalog takes no copies back, the loan is still closed
        let restocked = match self.stock_reservation.increment(loan.book_id).await {
            Ok(_) => true,
            Err(LibraryError::NotFound { .. }) => {
                warn!(loan_id, book_id = loan.book_id, "closing loan of a book no longer in the catalog");
                false
            }
            Err(err) => return Err(err),
        };

        let today = self.clock.today();
        match self.loan_repository.mark_returned(loan_id, today).await {
            Ok(true) => {
                loan.return_date = Some(today);
                loan.loan_status = LoanStatus::Returned;
                info!(loan_id, book_id = loan.book_id, "returned book");
                Ok(LoanDto::from(&loan))
            }
            Ok(false) => {
                // another caller returned the loan between the read and the write
                if restocked {
                    self.retake_returned_copy(loan.book_id, loan_id).await;
                }
                Err(LibraryError::already_returned(format!("loan {} was already returned", loan_id).as_str()))
            }
            Err(err) => {
                if restocked {
                    self.retake_returned_copy(loan.book_id, loan_id).await;
                }
                Err(err)
            }
        }
    }

    async fn extend_due_date(&self, loan_id: i64, days_to_extend: u32) -> LibraryResult<LoanDto> {
        if days_to_extend == 0 {
            return Err(LibraryError::validation("days to extend must be positive", Some("400".to_string())));
        }
        let mut loan = self.loan_repository.get(loan_id).await?;
        if !loan.is_active() {
            return Err(LibraryError::already_returned(format!("loan {} was already returned", loan_id).as_str()));
        }
        if loan.extension_count >= self.max_extensions {
            return Err(LibraryError::already_extended(format!("loan {} was already extended {} times",
                                                              loan_id, loan.extension_count).as_str()));
        }
        let due_date = self.scheduler.compute_due_date(loan.due_date, days_to_extend)?;
        if !self.loan_repository.extend_due_date(loan_id, due_date, loan.extension_count).await? {
            let current = self.loan_repository.get(loan_id).await?;
            return if current.is_active() {
                Err(LibraryError::already_extended(format!("loan {} was extended concurrently", loan_id).as_str()))
            } else {
                Err(LibraryError::already_returned(format!("loan {} was returned concurrently", loan_id).as_str()))
            };
        }
        info!(loan_id, from = %loan.due_date, to = %due_date, "extended loan");
        loan.due_date = due_date;
        loan.extension_count += 1;
        Ok(LoanDto::from(&loan))
    }

    async fn find_loan_by_id(&self, loan_id: i64) -> LibraryResult<LoanDto> {
        self.loan_repository.get(loan_id).await.map(|l| LoanDto::from(&l))
    }

    async fn find_active_loans_by_member(&self, member_id: i64) -> LibraryResult<Vec<LoanDto>> {
        let res = self.loan_repository.find_active_by_member(member_id).await?;
        Ok(res.iter().map(LoanDto::from).collect())
    }

    async fn query_overdue(&self, as_of: Option<NaiveDate>) -> LibraryResult<Vec<LoanDto>> {
        let today = as_of.unwrap_or_else(|| self.clock.today());
        let res = self.loan_repository.query_overdue(today).await?;
        Ok(res.iter().map(LoanDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use crate::books::domain::model::BookEntity;
    use crate::books::factory::{create_book_repository, create_stock_reservation};
    use crate::books::repository::BookRepository;
    use crate::calendar::factory::{create_due_date_scheduler, create_lending_calendar};
    use crate::core::clock::FixedClock;
    use crate::core::domain::Configuration;
    use crate::core::library::{CalendarKind, LibraryError, LibraryResult, LoanStatus};
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::loans::domain::LoanLedger;
    use crate::loans::domain::ledger::LoanLedgerImpl;
    use crate::loans::domain::model::LoanEntity;
    use crate::loans::factory::create_loan_ledger_with_clock;
    use crate::loans::repository::LoanRepository;
    use crate::members::domain::model::MemberEntity;
    use crate::members::factory::{create_member_repository, create_member_service};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn add_book(store: &RepositoryStore, stock: i64) -> i64 {
        let books = create_book_repository(store).await;
        books.create(&BookEntity::new("Dune", "Herbert", "978-0441013593", "Ace", stock)).await.expect("should add book")
    }

    async fn book_stock(store: &RepositoryStore, book_id: i64) -> i64 {
        create_book_repository(store).await.get(book_id).await.expect("should get book").stock
    }

    async fn add_member(store: &RepositoryStore, name: &str) -> i64 {
        let members = create_member_repository(store).await;
        members.create(&MemberEntity::new(name, "010-0000-0000")).await.expect("should add member")
    }

    async fn ledger_on(store: &RepositoryStore, config: &Configuration, today: NaiveDate) -> Box<dyn LoanLedger> {
        let calendar = create_lending_calendar(config, store).await;
        create_loan_ledger_with_clock(config, store, &calendar, Arc::new(FixedClock::new(today))).await
    }

    #[tokio::test]
    async fn test_should_borrow_until_out_of_stock() {
        let store = RepositoryStore::in_memory();
        let config = Configuration::new("test");
        let ledger = ledger_on(&store, &config, day(2025, 9, 1)).await;
        let book_id = add_book(&store, 3).await;
        let member_id = add_member(&store, "Kim").await;

        let mut loans = vec![];
        for expected in [2, 1, 0] {
            let loan = ledger.borrow(book_id, member_id).await.expect("should borrow");
            assert!(loan.is_active());
            assert_eq!(day(2025, 9, 1), loan.borrow_date);
            assert_eq!(day(2025, 9, 10), loan.due_date);
            assert_eq!(expected, book_stock(&store, book_id).await);
            loans.push(loan);
        }
        assert!(matches!(ledger.borrow(book_id, member_id).await, Err(LibraryError::OutOfStock { .. })));
        assert_eq!(0, book_stock(&store, book_id).await);
        assert_eq!(3, ledger.find_active_loans_by_member(member_id).await.expect("should find loans").len());

        ledger.return_loan(loans[0].loan_id).await.expect("should return");
        assert_eq!(1, book_stock(&store, book_id).await);
    }

    #[tokio::test]
    async fn test_should_restore_stock_after_return() {
        let store = RepositoryStore::in_memory();
        let ledger = ledger_on(&store, &Configuration::new("test"), day(2025, 9, 1)).await;
        let book_id = add_book(&store, 2).await;
        let member_id = add_member(&store, "Kim").await;

        let loan = ledger.borrow(book_id, member_id).await.expect("should borrow");
        assert_eq!(1, book_stock(&store, book_id).await);
        let returned = ledger.return_loan(loan.loan_id).await.expect("should return");
        assert_eq!(Some(day(2025, 9, 1)), returned.return_date);
        assert_eq!(LoanStatus::Returned, returned.loan_status);
        assert_eq!(2, book_stock(&store, book_id).await);

        let loaded = ledger.find_loan_by_id(loan.loan_id).await.expect("should find loan");
        assert!(!loaded.is_active());
        assert!(ledger.find_active_loans_by_member(member_id).await.expect("should find loans").is_empty());
    }

    #[tokio::test]
    async fn test_should_not_return_twice() {
        let store = RepositoryStore::in_memory();
        let ledger = ledger_on(&store, &Configuration::new("test"), day(2025, 9, 1)).await;
        let book_id = add_book(&store, 1).await;
        let member_id = add_member(&store, "Kim").await;

        let loan = ledger.borrow(book_id, member_id).await.expect("should borrow");
        ledger.return_loan(loan.loan_id).await.expect("should return");
        assert!(matches!(ledger.return_loan(loan.loan_id).await, Err(LibraryError::AlreadyReturned { .. })));
        assert_eq!(1, book_stock(&store, book_id).await);
        assert!(matches!(ledger.return_loan(999).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_unknown_member_and_book() {
        let store = RepositoryStore::in_memory();
        let ledger = ledger_on(&store, &Configuration::new("test"), day(2025, 9, 1)).await;
        let book_id = add_book(&store, 1).await;
        let member_id = add_member(&store, "Kim").await;

        assert!(matches!(ledger.borrow(book_id, 999).await, Err(LibraryError::NotFound { .. })));
        assert_eq!(1, book_stock(&store, book_id).await);
        assert!(matches!(ledger.borrow(999, member_id).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_extend_only_once() {
        let store = RepositoryStore::in_memory();
        let ledger = ledger_on(&store, &Configuration::new("test"), day(2025, 9, 1)).await;
        let book_id = add_book(&store, 1).await;
        let member_id = add_member(&store, "Kim").await;

        let loan = ledger.borrow(book_id, member_id).await.expect("should borrow");
        assert!(matches!(ledger.extend_due_date(loan.loan_id, 0).await, Err(LibraryError::Validation { .. })));
        let extended = ledger.extend_due_date(loan.loan_id, 7).await.expect("should extend");
        assert_eq!(day(2025, 9, 19), extended.due_date);
        assert_eq!(1, extended.extension_count);
        assert!(matches!(ledger.extend_due_date(loan.loan_id, 7).await, Err(LibraryError::AlreadyExtended { .. })));
        assert_eq!(day(2025, 9, 19), ledger.find_loan_by_id(loan.loan_id).await.expect("should find loan").due_date);

        ledger.return_loan(loan.loan_id).await.expect("should return");
        assert!(matches!(ledger.extend_due_date(loan.loan_id, 7).await, Err(LibraryError::AlreadyReturned { .. })));
        assert!(matches!(ledger.extend_due_date(999, 7).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_query_overdue_loans() {
        let store = RepositoryStore::in_memory();
        let ledger = ledger_on(&store, &Configuration::new("test"), day(2025, 9, 1)).await;
        let book_id = add_book(&store, 2).await;
        let member_id = add_member(&store, "Kim").await;

        let first = ledger.borrow(book_id, member_id).await.expect("should borrow");
        let second = ledger.borrow(book_id, member_id).await.expect("should borrow");
        ledger.return_loan(second.loan_id).await.expect("should return");

        assert!(ledger.query_overdue(None).await.expect("should query").is_empty());
        assert!(ledger.query_overdue(Some(day(2025, 9, 10))).await.expect("should query").is_empty());
        let overdue = ledger.query_overdue(Some(day(2025, 9, 11))).await.expect("should query");
        assert_eq!(vec![first.loan_id], overdue.iter().map(|l| l.loan_id).collect::<Vec<i64>>());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_lend_last_copy_once() {
        let store = RepositoryStore::in_memory();
        let ledger: Arc<dyn LoanLedger> = Arc::from(ledger_on(&store, &Configuration::new("test"), day(2025, 9, 1)).await);
        let book_id = add_book(&store, 1).await;
        let member_id = add_member(&store, "Kim").await;

        let mut handles = vec![];
        for _ in 0..10 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move { ledger.borrow(book_id, member_id).await }));
        }
        let mut borrowed = 0;
        for handle in handles {
            match handle.await.expect("should join") {
                Ok(_) => borrowed += 1,
                Err(err) => assert!(matches!(err, LibraryError::OutOfStock { .. })),
            }
        }
        assert_eq!(1, borrowed);
        assert_eq!(0, book_stock(&store, book_id).await);
    }

    #[tokio::test]
    async fn test_should_release_copy_when_schedule_unreachable() {
        let store = RepositoryStore::in_memory();
        let mut config = Configuration::new("test").with_calendar(CalendarKind::Weekend);
        config.max_consecutive_closed_days = 1;
        let ledger = ledger_on(&store, &config, day(2025, 8, 29)).await; // Friday
        let book_id = add_book(&store, 1).await;
        let member_id = add_member(&store, "Kim").await;

        assert!(matches!(ledger.borrow(book_id, member_id).await, Err(LibraryError::ScheduleUnreachable { .. })));
        assert_eq!(1, book_stock(&store, book_id).await);
    }

    struct BrokenLoanRepository;

    #[async_trait]
    impl Repository<LoanEntity> for BrokenLoanRepository {
        async fn create(&self, _entity: &LoanEntity) -> LibraryResult<i64> {
            Err(LibraryError::database("loans table is unavailable", None, true))
        }

        async fn get(&self, id: i64) -> LibraryResult<LoanEntity> {
            Err(LibraryError::not_found(format!("loan not found for {}", id).as_str()))
        }
    }

    #[async_trait]
    impl LoanRepository for BrokenLoanRepository {
        async fn mark_returned(&self, _loan_id: i64, _return_date: NaiveDate) -> LibraryResult<bool> {
            Ok(false)
        }

        async fn extend_due_date(&self, _loan_id: i64, _due_date: NaiveDate, _expected: u32) -> LibraryResult<bool> {
            Ok(false)
        }

        async fn find_active_by_book(&self, _book_id: i64) -> LibraryResult<Vec<LoanEntity>> {
            Ok(vec![])
        }

        async fn find_active_by_member(&self, _member_id: i64) -> LibraryResult<Vec<LoanEntity>> {
            Ok(vec![])
        }

        async fn query_overdue(&self, _today: NaiveDate) -> LibraryResult<Vec<LoanEntity>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_should_release_copy_when_loan_insert_fails() {
        let store = RepositoryStore::in_memory();
        let config = Configuration::new("test");
        let ledger = LoanLedgerImpl::new(
            &config,
            create_member_service(&config, &store).await,
            create_stock_reservation(&store).await,
            Box::new(BrokenLoanRepository),
            create_due_date_scheduler(&config, &*create_lending_calendar(&config, &store).await),
            Arc::new(FixedClock::new(day(2025, 9, 1))));
        let book_id = add_book(&store, 1).await;
        let member_id = add_member(&store, "Kim").await;

        assert!(matches!(ledger.borrow(book_id, member_id).await, Err(LibraryError::Database { .. })));
        assert_eq!(1, book_stock(&store, book_id).await);
    }

    // Hands out an active loan on every read but loses the write that closes it, as when
    // another return lands between the read and the conditional update.
    struct RacedLoanRepository {
        book_id: i64,
        store_fails: bool,
    }

    #[async_trait]
    impl Repository<LoanEntity> for RacedLoanRepository {
        async fn create(&self, _entity: &LoanEntity) -> LibraryResult<i64> {
            Ok(1)
        }

        async fn get(&self, id: i64) -> LibraryResult<LoanEntity> {
            let mut loan = LoanEntity::new("test", self.book_id, 1, day(2025, 9, 1), day(2025, 9, 10));
            loan.loan_id = id;
            Ok(loan)
        }
    }

    #[async_trait]
    impl LoanRepository for RacedLoanRepository {
        async fn mark_returned(&self, _loan_id: i64, _return_date: NaiveDate) -> LibraryResult<bool> {
            if self.store_fails {
                Err(LibraryError::database("loans table is unavailable", None, true))
            } else {
                Ok(false)
            }
        }

        async fn extend_due_date(&self, _loan_id: i64, _due_date: NaiveDate, _expected: u32) -> LibraryResult<bool> {
            Ok(false)
        }

        async fn find_active_by_book(&self, _book_id: i64) -> LibraryResult<Vec<LoanEntity>> {
            Ok(vec![])
        }

        async fn find_active_by_member(&self, _member_id: i64) -> LibraryResult<Vec<LoanEntity>> {
            Ok(vec![])
        }

        async fn query_overdue(&self, _today: NaiveDate) -> LibraryResult<Vec<LoanEntity>> {
            Ok(vec![])
        }
    }

    async fn raced_ledger(store: &RepositoryStore, book_id: i64, store_fails: bool) -> LoanLedgerImpl {
        let config = Configuration::new("test");
        LoanLedgerImpl::new(
            &config,
            create_member_service(&config, store).await,
            create_stock_reservation(store).await,
            Box::new(RacedLoanRepository { book_id, store_fails }),
            create_due_date_scheduler(&config, &*create_lending_calendar(&config, store).await),
            Arc::new(FixedClock::new(day(2025, 9, 5))))
    }

    #[tokio::test]
    async fn test_should_take_copy_back_when_return_loses_race() {
        let store = RepositoryStore::in_memory();
        let book_id = add_book(&store, 1).await;
        let ledger = raced_ledger(&store, book_id, false).await;

        assert!(matches!(ledger.return_loan(7).await, Err(LibraryError::AlreadyReturned { .. })));
        assert_eq!(1, book_stock(&store, book_id).await);
    }

    #[tokio::test]
    async fn test_should_take_copy_back_when_return_write_fails() {
        let store = RepositoryStore::in_memory();
        let book_id = add_book(&store, 1).await;
        let ledger = raced_ledger(&store, book_id, true).await;

        assert!(matches!(ledger.return_loan(7).await, Err(LibraryError::Database { .. })));
        assert_eq!(1, book_stock(&store, book_id).await);
    }

    #[tokio::test]
    async fn test_should_close_loan_of_removed_book() {
        let store = RepositoryStore::in_memory();
        let ledger = ledger_on(&store, &Configuration::new("test"), day(2025, 9, 1)).await;
        let book_id = add_book(&store, 1).await;
        let member_id = add_member(&store, "Kim").await;
        let loan = ledger.borrow(book_id, member_id).await.expect("should borrow");

        // the book went away while the loan was out
        create_book_repository(&store).await.delete(book_id, 0).await.expect("should delete book");

        let returned = ledger.return_loan(loan.loan_id).await.expect("should return");
        assert_eq!(LoanStatus::Returned, returned.loan_status);
        assert!(ledger.find_active_loans_by_member(member_id).await.expect("should find loans").is_empty());
        assert!(matches!(ledger.return_loan(loan.loan_id).await, Err(LibraryError::AlreadyReturned { .. })));
    }
}
