use axum::http::StatusCode;
use tracing::{info_span, Span, warn};
use std::sync::Arc;
use uuid::Uuid;
use crate::calendar::domain::lending::LendingCalendar;
use crate::calendar::factory::create_lending_calendar;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RepositoryStore,
    pub(crate) calendar: Arc<LendingCalendar>,
}

impl AppState {
    // the lending calendar is built here once and shared by every request of the process
    pub async fn new(branch: &str, store: RepositoryStore) -> AppState {
        let config = Configuration::new(branch);
        let calendar = create_lending_calendar(&config, &store).await;
        AppState {
            config,
            store,
            calendar,
        }
    }
}

pub(crate) type ServerError = (StatusCode, String);

// every handled request gets its own id so that the log lines of one request can be correlated
pub(crate) fn request_span(operation: &'static str) -> Span {
    info_span!("request", operation, request_id = %Uuid::new_v4())
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Access { .. } => StatusCode::BAD_REQUEST,
            CommandError::Conflict { .. } => StatusCode::CONFLICT,
            CommandError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::DuplicateKey { .. } => StatusCode::CONFLICT,
            CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
            CommandError::Runtime { retryable: true, .. } => StatusCode::SERVICE_UNAVAILABLE,
            CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::Serialization { .. } => StatusCode::BAD_REQUEST,
            CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
        };
        if status.is_server_error() {
            warn!(status = status.as_u16(), "command failed {:?}", err);
        }
        (status, format!("{:?}", err))
    }
}
