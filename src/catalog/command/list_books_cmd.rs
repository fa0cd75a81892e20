use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

// ListBooksCommand lists the catalog, narrowed to matching titles when a keyword is given.
pub(crate) struct ListBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl ListBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct ListBooksCommandRequest {
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListBooksCommandResponse {
    pub books: Vec<BookDto>,
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        let res = match req.title.as_deref().map(str::trim) {
            Some(keyword) if !keyword.is_empty() => self.catalog_service.search_books_by_title(keyword).await,
            _ => self.catalog_service.list_books().await,
        };
        res.map_err(CommandError::from).map(|books| ListBooksCommandResponse { books })
    }
}
