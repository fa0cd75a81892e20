pub mod model;
pub mod reservation;

use async_trait::async_trait;
use crate::core::library::LibraryResult;

// StockReservation is the only way lending moves a book's stock.
#[async_trait]
pub(crate) trait StockReservation: Sync + Send {
    // takes one copy off the shelf, failing with OutOfStock when none is left
    async fn try_decrement(&self, book_id: i64) -> LibraryResult<()>;

    // puts one copy back on the shelf
    async fn increment(&self, book_id: i64) -> LibraryResult<()>;
}
