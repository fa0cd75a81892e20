use crate::books::factory::create_book_repository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::loans::factory::create_loan_repository;

pub(crate) async fn create_catalog_service(config: &Configuration, store: &RepositoryStore) -> Box<dyn CatalogService> {
    let book_repo = create_book_repository(store).await;
    let loan_repo = create_loan_repository(store).await;
    Box::new(CatalogServiceImpl::new(config, book_repo, loan_repo))
}
