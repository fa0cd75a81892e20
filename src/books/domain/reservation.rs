use async_trait::async_trait;
use tracing::debug;
use crate::books::domain::StockReservation;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) struct StockReservationImpl {
    book_repository: Box<dyn BookRepository>,
}

impl StockReservationImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[async_trait]
impl StockReservation for StockReservationImpl {
    async fn try_decrement(&self, book_id: i64) -> LibraryResult<()> {
        let book = self.book_repository.get(book_id).await?;
        if book.stock <= 0 {
            return Err(LibraryError::out_of_stock(format!("book {} has no copies left", book_id).as_str()));
        }
        // the read above only gives a better error; the conditional write decides
        if self.book_repository.decrement_stock_if_available(book_id).await? {
            debug!(book_id, "reserved one copy");
            Ok(())
        } else {
            Err(LibraryError::out_of_stock(format!("book {} ran out of copies", book_id).as_str()))
        }
    }

    async fn increment(&self, book_id: i64) -> LibraryResult<()> {
        self.book_repository.increment_stock(book_id).await?;
        debug!(book_id, "released one copy");
        Ok(())
    }
}
