use std::sync::Arc;
use crate::books::factory::create_stock_reservation;
use crate::calendar::domain::lending::LendingCalendar;
use crate::calendar::factory::create_due_date_scheduler;
use crate::core::clock::{Clock, SystemClock};
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::loans::domain::LoanLedger;
use crate::loans::domain::ledger::LoanLedgerImpl;
use crate::loans::repository::ddb_loan_repository::DDBLoanRepository;
use crate::loans::repository::LoanRepository;
use crate::loans::repository::memory_loan_repository::MemoryLoanRepository;
use crate::members::factory::create_member_service;
use crate::utils::ddb::{build_db_client, create_lending_tables};

pub(crate) async fn create_loan_repository(store: &RepositoryStore) -> Box<dyn LoanRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBLoanRepository::new(client, "loans", "loans_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            create_lending_tables(&client).await;
            Box::new(DDBLoanRepository::new(client, "loans", "loans_ndx"))
        }
        RepositoryStore::InMemory(db) => {
            Box::new(MemoryLoanRepository::new(db.clone()))
        }
    }
}

pub(crate) async fn create_loan_ledger(config: &Configuration,
                                       store: &RepositoryStore,
                                       calendar: &LendingCalendar) -> Box<dyn LoanLedger> {
    create_loan_ledger_with_clock(config, store, calendar, Arc::new(SystemClock)).await
}

pub(crate) async fn create_loan_ledger_with_clock(config: &Configuration,
                                                  store: &RepositoryStore,
                                                  calendar: &LendingCalendar,
                                                  clock: Arc<dyn Clock>) -> Box<dyn LoanLedger> {
    let member_service = create_member_service(config, store).await;
    let stock_reservation = create_stock_reservation(store).await;
    let loan_repository = create_loan_repository(store).await;
    let scheduler = create_due_date_scheduler(config, calendar);
    Box::new(LoanLedgerImpl::new(config, member_service, stock_reservation, loan_repository, scheduler, clock))
}
