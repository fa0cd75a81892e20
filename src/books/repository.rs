pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;

#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    // updates descriptive fields only, guarded by the entity version; stock is left untouched
    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize>;

    // deletes only while the stock still equals expected_stock, so a borrow or return that
    // moved the stock after the caller read it fails the delete with a version conflict
    async fn delete(&self, id: i64, expected_stock: i64) -> LibraryResult<usize>;

    async fn list(&self) -> LibraryResult<Vec<BookEntity>>;

    // case-insensitive substring match on the title
    async fn search_by_title(&self, keyword: &str) -> LibraryResult<Vec<BookEntity>>;

    // single conditional write: stock -= 1 where book_id = id and stock > 0.
    // Returns false when the condition did not hold.
    async fn decrement_stock_if_available(&self, id: i64) -> LibraryResult<bool>;

    async fn increment_stock(&self, id: i64) -> LibraryResult<()>;
}

pub(crate) fn title_matches(title: &str, keyword: &str) -> bool {
    title.to_lowercase().contains(keyword.trim().to_lowercase().as_str())
}
