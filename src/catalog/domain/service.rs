use async_trait::async_trait;
use tracing::info;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::loans::repository::LoanRepository;

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
    loan_repository: Box<dyn LoanRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(_config: &Configuration, book_repository: Box<dyn BookRepository>,
                      loan_repository: Box<dyn LoanRepository>) -> Self {
        Self {
            book_repository,
            loan_repository,
        }
    }
}

fn validate_book(book: &BookDto) -> LibraryResult<()> {
    if book.title.trim().is_empty() {
        return Err(LibraryError::validation("book title must not be empty", Some("400".to_string())));
    }
    if book.stock < 0 {
        return Err(LibraryError::validation(format!("stock {} must not be negative", book.stock).as_str(),
                                            Some("400".to_string())));
    }
    Ok(())
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        validate_book(book)?;
        let id = self.book_repository.create(&BookEntity::from(book)).await?;
        info!(book_id = id, stock = book.stock, "added book");
        self.find_book_by_id(id).await
    }

    async fn remove_book(&self, id: i64) -> LibraryResult<()> {
        let book = self.book_repository.get(id).await?;
        let active = self.loan_repository.find_active_by_book(id).await?;
        if !active.is_empty() {
            return Err(LibraryError::validation(
                format!("book {} still has {} active loans", id, active.len()).as_str(), Some("ActiveLoans".to_string())));
        }
        // a borrow that took a copy after the read moves the stock and fails the delete
        self.book_repository.delete(id, book.stock).await?;
        info!(book_id = id, "removed book");
        Ok(())
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        validate_book(book)?;
        self.book_repository.update(&BookEntity::from(book)).await?;
        self.find_book_by_id(book.book_id).await
    }

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let res = self.book_repository.list().await?;
        Ok(res.iter().map(BookDto::from).collect())
    }

    async fn search_books_by_title(&self, keyword: &str) -> LibraryResult<Vec<BookDto>> {
        let res = self.book_repository.search_by_title(keyword).await?;
        Ok(res.iter().map(BookDto::from).collect())
    }
}
