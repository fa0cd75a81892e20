use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::loans::factory::create_loan_repository;
use crate::members::domain::MemberService;
use crate::members::domain::service::MemberServiceImpl;
use crate::members::repository::ddb_member_repository::DDBMemberRepository;
use crate::members::repository::MemberRepository;
use crate::members::repository::memory_member_repository::MemoryMemberRepository;
use crate::utils::ddb::{build_db_client, create_lending_tables};

pub(crate) async fn create_member_repository(store: &RepositoryStore) -> Box<dyn MemberRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBMemberRepository::new(client, "members"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            create_lending_tables(&client).await;
            Box::new(DDBMemberRepository::new(client, "members"))
        }
        RepositoryStore::InMemory(db) => {
            Box::new(MemoryMemberRepository::new(db.clone()))
        }
    }
}

pub(crate) async fn create_member_service(config: &Configuration, store: &RepositoryStore) -> Box<dyn MemberService> {
    let member_repo = create_member_repository(store).await;
    let loan_repo = create_loan_repository(store).await;
    Box::new(MemberServiceImpl::new(config, member_repo, loan_repo))
}
