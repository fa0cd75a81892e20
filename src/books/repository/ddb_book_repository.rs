use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::books::domain::model::BookEntity;
use crate::books::repository::{BookRepository, title_matches};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{delete_condition_failed, next_sequence, number_value, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, put_condition_failed, string_date, update_condition_failed};

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    // reads every page of the table
    async fn scan_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut books = vec![];
        let mut exclusive_start_key = None;
        loop {
            let res = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await.map_err(LibraryError::from)?;
            if let Some(items) = res.items() {
                books.extend(items.iter().map(map_to_book));
            }
            match res.last_evaluated_key() {
                Some(key) => exclusive_start_key = Some(key.clone()),
                None => break,
            }
        }
        books.sort_by_key(|b| b.book_id);
        Ok(books)
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        let mut book = entity.clone();
        book.book_id = next_sequence(&self.client, table_name).await?;
        let val = serde_json::to_value(&book)?;
        match self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(book_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await {
            Ok(_) => Ok(book.book_id),
            Err(err) if put_condition_failed(&err) => {
                Err(LibraryError::duplicate_key(format!("book {} already exists", book.book_id).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .get_item()
            .table_name(table_name)
            .key("book_id", number_value(id))
            .consistent_read(true)
            .send()
            .await.map_err(LibraryError::from)?;
        match res.item() {
            Some(map) => Ok(map_to_book(map)),
            None => Err(LibraryError::not_found(format!("book not found for {}", id).as_str())),
        }
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        let res = self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", number_value(entity.book_id))
            .update_expression("SET #version = :version, #title = :title, #author = :author, isbn = :isbn, publisher = :publisher, updated_at = :updated_at")
            .expression_attribute_names("#version", "version")
            .expression_attribute_names("#title", "title")
            .expression_attribute_names("#author", "author")
            .expression_attribute_values(":old_version", number_value(entity.version))
            .expression_attribute_values(":version", number_value(entity.version + 1))
            .expression_attribute_values(":title", AttributeValue::S(entity.title.to_string()))
            .expression_attribute_values(":author", AttributeValue::S(entity.author.to_string()))
            .expression_attribute_values(":isbn", AttributeValue::S(entity.isbn.to_string()))
            .expression_attribute_values(":publisher", AttributeValue::S(entity.publisher.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(#version) AND #version = :old_version")
            .send()
            .await;
        match res {
            Ok(_) => Ok(1),
            Err(err) if update_condition_failed(&err) => {
                // either the book is gone or someone else updated it first
                let _ = self.get(entity.book_id).await?;
                Err(LibraryError::runtime(format!("book {} was updated concurrently, version {} is stale",
                                                  entity.book_id, entity.version).as_str(), Some("VersionConflict".to_string())))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn delete(&self, id: i64, expected_stock: i64) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        match self.client.delete_item()
            .table_name(table_name)
            .key("book_id", number_value(id))
            .condition_expression("attribute_exists(book_id) AND #stock = :stock")
            .expression_attribute_names("#stock", "stock")
            .expression_attribute_values(":stock", number_value(expected_stock))
            .send()
            .await {
            Ok(_) => Ok(1),
            Err(err) if delete_condition_failed(&err) => {
                // missing and moved stock fail the same condition; the read tells them apart
                let book = self.get(id).await?;
                Err(LibraryError::runtime(format!("book {} stock changed to {} while being removed",
                                                  id, book.stock).as_str(), Some("VersionConflict".to_string())))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn list(&self) -> LibraryResult<Vec<BookEntity>> {
        self.scan_all().await
    }

    // DynamoDB contains() is case-sensitive so the keyword is matched after the scan.
    async fn search_by_title(&self, keyword: &str) -> LibraryResult<Vec<BookEntity>> {
        let books = self.scan_all().await?;
        Ok(books.into_iter().filter(|b| title_matches(b.title.as_str(), keyword)).collect())
    }

    async fn decrement_stock_if_available(&self, id: i64) -> LibraryResult<bool> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", number_value(id))
            .update_expression("SET #stock = #stock - :one, updated_at = :updated_at")
            .expression_attribute_names("#stock", "stock")
            .expression_attribute_values(":one", number_value(1))
            .expression_attribute_values(":zero", number_value(0))
            .expression_attribute_values(":updated_at", string_date(Utc::now().naive_utc()))
            .condition_expression("attribute_exists(book_id) AND #stock > :zero")
            .send()
            .await;
        match res {
            Ok(_) => Ok(true),
            Err(err) if update_condition_failed(&err) => Ok(false),
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn increment_stock(&self, id: i64) -> LibraryResult<()> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .update_item()
            .table_name(table_name)
            .key("book_id", number_value(id))
            .update_expression("SET #stock = #stock + :one, updated_at = :updated_at")
            .expression_attribute_names("#stock", "stock")
            .expression_attribute_values(":one", number_value(1))
            .expression_attribute_values(":updated_at", string_date(Utc::now().naive_utc()))
            .condition_expression("attribute_exists(book_id)")
            .send()
            .await;
        match res {
            Ok(_) => Ok(()),
            Err(err) if update_condition_failed(&err) => {
                Err(LibraryError::not_found(format!("book not found for {}", id).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        book_id: parse_number_attribute("book_id", map),
        version: parse_number_attribute("version", map),
        title: parse_string_attribute("title", map).unwrap_or(String::from("")),
        author: parse_string_attribute("author", map).unwrap_or(String::from("")),
        isbn: parse_string_attribute("isbn", map).unwrap_or(String::from("")),
        publisher: parse_string_attribute("publisher", map).unwrap_or(String::from("")),
        stock: parse_number_attribute("stock", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;

    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::ddb_book_repository::DDBBookRepository;
    use crate::core::library::LibraryError;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_lending_tables, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(&RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "books").await;
                create_lending_tables(&client).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires dynamodb-local on localhost:8000"]
    async fn test_should_create_get_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books");
        let book = BookEntity::new("test book", "author", "isbn", "publisher", 1);
        let id = books_repo.create(&book).await.expect("should create book");
        assert!(id > 0);

        let loaded = books_repo.get(id).await.expect("should return book");
        assert_eq!(book.title, loaded.title);
        assert_eq!(1, loaded.stock);
    }

    #[tokio::test]
    #[ignore = "requires dynamodb-local on localhost:8000"]
    async fn test_should_create_update_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books");
        let mut book = BookEntity::new("test book", "author", "isbn", "publisher", 1);
        book.book_id = books_repo.create(&book).await.expect("should create book");

        book.title = "new title".to_string();
        let size = books_repo.update(&book).await.expect("should update book");
        assert_eq!(1, size);

        let loaded = books_repo.get(book.book_id).await.expect("should return book");
        assert_eq!(book.title, loaded.title);
        assert_eq!(1, loaded.version);

        // stale version
        assert!(books_repo.update(&book).await.is_err());
    }

    #[tokio::test]
    #[ignore = "requires dynamodb-local on localhost:8000"]
    async fn test_should_decrement_stock_until_empty() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books");
        let book = BookEntity::new("stock book", "author", "isbn", "publisher", 2);
        let id = books_repo.create(&book).await.expect("should create book");

        assert!(books_repo.decrement_stock_if_available(id).await.expect("should decrement"));
        assert!(books_repo.decrement_stock_if_available(id).await.expect("should decrement"));
        assert!(!books_repo.decrement_stock_if_available(id).await.expect("should not decrement"));
        assert_eq!(0, books_repo.get(id).await.expect("should return book").stock);

        books_repo.increment_stock(id).await.expect("should increment");
        assert_eq!(1, books_repo.get(id).await.expect("should return book").stock);
        assert!(matches!(books_repo.increment_stock(i64::MAX).await, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "requires dynamodb-local on localhost:8000"]
    async fn test_should_search_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books");
        for i in 0..5 {
            let book = BookEntity::new(format!("Rust Patterns {}", i).as_str(), "author", "isbn", "publisher", 1);
            let _ = books_repo.create(&book).await.expect("should create book");
        }
        let res = books_repo.search_by_title("rust patterns").await.expect("should search books");
        assert!(res.len() >= 5);
    }

    #[tokio::test]
    #[ignore = "requires dynamodb-local on localhost:8000"]
    async fn test_should_create_delete_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books");
        let book = BookEntity::new("test book", "author", "isbn", "publisher", 1);
        let id = books_repo.create(&book).await.expect("should create book");

        assert!(books_repo.decrement_stock_if_available(id).await.expect("should decrement"));
        assert!(matches!(books_repo.delete(id, 1).await, Err(LibraryError::Runtime { .. })));

        let deleted = books_repo.delete(id, 0).await.expect("should delete book");
        assert_eq!(1, deleted);

        let loaded = books_repo.get(id).await;
        assert!(loaded.is_err());
        assert!(matches!(books_repo.delete(id, 0).await, Err(LibraryError::NotFound { .. })));
    }
}
