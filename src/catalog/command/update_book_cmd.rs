use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError, require_positive_id};

// UpdateBookCommand overwrites the descriptive fields that are present in the request.
// A version, when given, must match the stored one.
pub(crate) struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct UpdateBookCommandRequest {
    pub book_id: i64,
    pub version: Option<i64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
}

impl UpdateBookCommandRequest {
    fn apply(self, mut book: BookDto) -> BookDto {
        if let Some(version) = self.version {
            book.version = version;
        }
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(isbn) = self.isbn {
            book.isbn = isbn;
        }
        if let Some(publisher) = self.publisher {
            book.publisher = publisher;
        }
        book
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let id = require_positive_id("book_id", req.book_id)?;
        let current = self.catalog_service.find_book_by_id(id).await?;
        let book = req.apply(current);
        self.catalog_service.update_book(&book).await
            .map_err(CommandError::from).map(|book| UpdateBookCommandResponse { book })
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
    use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
    use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_book_commands() {
        let store = RepositoryStore::in_memory();
        let config = Configuration::new("test");
        let added = AddBookCommand::new(factory::create_catalog_service(&config, &store).await)
            .execute(AddBookCommandRequest::new("Norwegian Wood", "Murakami", "978-0375704024", "Vintage", 2))
            .await.expect("should add book");
        let id = added.book.book_id;

        let update_cmd = UpdateBookCommand::new(factory::create_catalog_service(&config, &store).await);
        let updated = update_cmd.execute(UpdateBookCommandRequest {
            book_id: id,
            publisher: Some("Vintage International".to_string()),
            ..Default::default()
        }).await.expect("should update book");
        assert_eq!("Vintage International", updated.book.publisher.as_str());
        assert_eq!("Norwegian Wood", updated.book.title.as_str());
        assert_eq!(2, updated.book.stock);
        let stale = update_cmd.execute(UpdateBookCommandRequest {
            book_id: id,
            version: Some(added.book.version),
            title: Some("Wood".to_string()),
            ..Default::default()
        }).await;
        assert!(matches!(stale, Err(CommandError::Conflict { .. })));

        let get_cmd = GetBookCommand::new(factory::create_catalog_service(&config, &store).await);
        assert_eq!(updated.book, get_cmd.execute(GetBookCommandRequest { book_id: id }).await.expect("should get book").book);
        assert!(matches!(get_cmd.execute(GetBookCommandRequest { book_id: -1 }).await, Err(CommandError::Validation { .. })));

        let list_cmd = ListBooksCommand::new(factory::create_catalog_service(&config, &store).await);
        assert_eq!(1, list_cmd.execute(ListBooksCommandRequest::default()).await.expect("should list").books.len());
        assert_eq!(1, list_cmd.execute(ListBooksCommandRequest { title: Some("norwegian".to_string()) })
            .await.expect("should search").books.len());
        assert!(list_cmd.execute(ListBooksCommandRequest { title: Some("kafka".to_string()) })
            .await.expect("should search").books.is_empty());

        let remove_cmd = RemoveBookCommand::new(factory::create_catalog_service(&config, &store).await);
        remove_cmd.execute(RemoveBookCommandRequest { book_id: id }).await.expect("should remove book");
        assert!(matches!(get_cmd.execute(GetBookCommandRequest { book_id: id }).await, Err(CommandError::NotFound { .. })));
    }
}
