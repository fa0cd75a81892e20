use crate::books::domain::reservation::StockReservationImpl;
use crate::books::domain::StockReservation;
use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_lending_tables};

pub(crate) async fn create_book_repository(store: &RepositoryStore) -> Box<dyn BookRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBookRepository::new(client, "books"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            create_lending_tables(&client).await;
            Box::new(DDBBookRepository::new(client, "books"))
        }
        RepositoryStore::InMemory(db) => {
            Box::new(MemoryBookRepository::new(db.clone()))
        }
    }
}

pub(crate) async fn create_stock_reservation(store: &RepositoryStore) -> Box<dyn StockReservation> {
    Box::new(StockReservationImpl::new(create_book_repository(store).await))
}
