use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use crate::books::domain::model::BookEntity;
use crate::books::repository::{BookRepository, title_matches};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::memory::MemoryDatabase;

#[derive(Debug)]
pub struct MemoryBookRepository {
    db: Arc<MemoryDatabase>,
}

impl MemoryBookRepository {
    pub(crate) fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<i64> {
        let id = self.db.next_id("books").await;
        let mut book = entity.clone();
        book.book_id = id;
        self.db.books.lock().await.insert(id, book);
        Ok(id)
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        self.db.books.lock().await.get(&id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.db.books.lock().await;
        let book = books.get_mut(&entity.book_id)
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", entity.book_id).as_str()))?;
        if book.version != entity.version {
            return Err(LibraryError::runtime(format!("book {} was updated concurrently, version {} is stale",
                                                     entity.book_id, entity.version).as_str(), Some("VersionConflict".to_string())));
        }
        book.version += 1;
        book.title = entity.title.to_string();
        book.author = entity.author.to_string();
        book.isbn = entity.isbn.to_string();
        book.publisher = entity.publisher.to_string();
        book.updated_at = Utc::now().naive_utc();
        Ok(1)
    }

    async fn delete(&self, id: i64, expected_stock: i64) -> LibraryResult<usize> {
        let mut books = self.db.books.lock().await;
        let book = books.get(&id)
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))?;
        if book.stock != expected_stock {
            return Err(LibraryError::runtime(format!("book {} stock changed to {} while being removed",
                                                     id, book.stock).as_str(), Some("VersionConflict".to_string())));
        }
        books.remove(&id);
        Ok(1)
    }

    async fn list(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.db.books.lock().await.values().cloned().collect())
    }

    async fn search_by_title(&self, keyword: &str) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.db.books.lock().await.values()
            .filter(|b| title_matches(b.title.as_str(), keyword))
            .cloned().collect())
    }

    async fn decrement_stock_if_available(&self, id: i64) -> LibraryResult<bool> {
        let mut books = self.db.books.lock().await;
        match books.get_mut(&id) {
            Some(book) if book.stock > 0 => {
                book.stock -= 1;
                book.updated_at = Utc::now().naive_utc();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn increment_stock(&self, id: i64) -> LibraryResult<()> {
        let mut books = self.db.books.lock().await;
        let book = books.get_mut(&id)
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))?;
        book.stock += 1;
        book.updated_at = Utc::now().naive_utc();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::core::library::LibraryError;
    use crate::core::repository::Repository;
    use crate::utils::memory::MemoryDatabase;

    fn new_repo() -> MemoryBookRepository {
        MemoryBookRepository::new(Arc::new(MemoryDatabase::default()))
    }

    #[tokio::test]
    async fn test_should_create_get_books() {
        let books_repo = new_repo();
        let first = books_repo.create(&BookEntity::new("first", "a", "i", "p", 1)).await.expect("should create book");
        let second = books_repo.create(&BookEntity::new("second", "a", "i", "p", 1)).await.expect("should create book");
        assert_eq!(1, first);
        assert_eq!(2, second);
        let loaded = books_repo.get(second).await.expect("should return book");
        assert_eq!("second", loaded.title.as_str());
        assert!(matches!(books_repo.get(99).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_update_books_with_version() {
        let books_repo = new_repo();
        let mut book = BookEntity::new("title", "a", "i", "p", 4);
        book.book_id = books_repo.create(&book).await.expect("should create book");
        book.title = "new title".to_string();
        book.stock = 100;
        books_repo.update(&book).await.expect("should update book");

        let loaded = books_repo.get(book.book_id).await.expect("should return book");
        assert_eq!("new title", loaded.title.as_str());
        assert_eq!(4, loaded.stock);
        assert_eq!(1, loaded.version);
        assert!(matches!(books_repo.update(&book).await, Err(LibraryError::Runtime { .. })));
    }

    #[tokio::test]
    async fn test_should_decrement_only_available_stock() {
        let books_repo = new_repo();
        let id = books_repo.create(&BookEntity::new("title", "a", "i", "p", 1)).await.expect("should create book");
        assert!(books_repo.decrement_stock_if_available(id).await.expect("should decrement"));
        assert!(!books_repo.decrement_stock_if_available(id).await.expect("should not decrement"));
        assert!(!books_repo.decrement_stock_if_available(42).await.expect("should not decrement"));
        assert_eq!(0, books_repo.get(id).await.expect("should return book").stock);
        books_repo.increment_stock(id).await.expect("should increment");
        assert_eq!(1, books_repo.get(id).await.expect("should return book").stock);
        assert!(matches!(books_repo.increment_stock(42).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_search_and_delete_books() {
        let books_repo = new_repo();
        let id = books_repo.create(&BookEntity::new("The Rust Book", "a", "i", "p", 1)).await.expect("should create book");
        let _ = books_repo.create(&BookEntity::new("Dune", "a", "i", "p", 1)).await.expect("should create book");
        let res = books_repo.search_by_title("rUsT").await.expect("should search");
        assert_eq!(1, res.len());
        assert_eq!(2, books_repo.list().await.expect("should list").len());
        assert_eq!(1, books_repo.delete(id, 1).await.expect("should delete"));
        assert!(matches!(books_repo.delete(id, 1).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_not_delete_book_when_stock_moved() {
        let books_repo = new_repo();
        let id = books_repo.create(&BookEntity::new("Dune", "a", "i", "p", 2)).await.expect("should create book");
        // a borrow took a copy after the stock was read
        assert!(books_repo.decrement_stock_if_available(id).await.expect("should decrement"));
        assert!(matches!(books_repo.delete(id, 2).await,
            Err(LibraryError::Runtime { reason_code: Some(ref code), .. }) if code == "VersionConflict"));
        assert_eq!(1, books_repo.get(id).await.expect("should keep book").stock);
        assert_eq!(1, books_repo.delete(id, 1).await.expect("should delete"));
    }
}
