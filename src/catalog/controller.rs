use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::Instrument;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, request_span, ServerError};

async fn build_service(state: &AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(&state.config, &state.store).await
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateBookBody {
    version: Option<i64>,
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    publisher: Option<String>,
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddBookCommandResponse>, ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(&state).await;
    let res = AddBookCommand::new(svc).execute(req).instrument(request_span("add_book")).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<i64>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let svc = build_service(&state).await;
    let res = GetBookCommand::new(svc).execute(GetBookCommandRequest { book_id })
        .instrument(request_span("find_book_by_id")).await?;
    Ok(Json(res))
}

pub(crate) async fn list_books(
    State(state): State<AppState>,
    Query(req): Query<ListBooksCommandRequest>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let svc = build_service(&state).await;
    let res = ListBooksCommand::new(svc).execute(req).instrument(request_span("list_books")).await?;
    Ok(Json(res))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    json: Json<Value>) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    let body: UpdateBookBody = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let req = UpdateBookCommandRequest {
        book_id,
        version: body.version,
        title: body.title,
        author: body.author,
        isbn: body.isbn,
        publisher: body.publisher,
    };
    let svc = build_service(&state).await;
    let res = UpdateBookCommand::new(svc).execute(req).instrument(request_span("update_book")).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let svc = build_service(&state).await;
    let res = RemoveBookCommand::new(svc).execute(RemoveBookCommandRequest { book_id })
        .instrument(request_span("remove_book")).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::response::Json;
    use serde_json::json;
    use crate::catalog::command::list_books_cmd::ListBooksCommandRequest;
    use crate::catalog::controller::{add_book, find_book_by_id, list_books, remove_book, update_book};
    use crate::core::controller::AppState;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_handle_book_requests() {
        let state = AppState::new("test", RepositoryStore::in_memory()).await;
        let added = add_book(State(state.clone()), Json(json!({
            "title": "Kafka on the Shore", "author": "Murakami", "isbn": "978-1400079278", "publisher": "Vintage", "stock": 2
        }))).await.expect("should add book");
        let id = added.0.book.book_id;

        let updated = update_book(State(state.clone()), Path(id), Json(json!({"author": "Haruki Murakami"})))
            .await.expect("should update book");
        assert_eq!("Haruki Murakami", updated.0.book.author.as_str());

        let found = list_books(State(state.clone()), Query(ListBooksCommandRequest { title: Some("shore".to_string()) }))
            .await.expect("should search books");
        assert_eq!(1, found.0.books.len());

        let _ = remove_book(State(state.clone()), Path(id)).await.expect("should remove book");
        let err = find_book_by_id(State(state.clone()), Path(id)).await.expect_err("should not find book");
        assert_eq!(StatusCode::NOT_FOUND, err.0);
        let err = add_book(State(state), Json(json!({"title": "no stock"}))).await.expect_err("should reject body");
        assert_eq!(StatusCode::BAD_REQUEST, err.0);
    }
}
