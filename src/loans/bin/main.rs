include!("../../lib.rs");
use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use crate::utils::logs::setup_tracing;
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::loans::controller::{borrow_book, extend_loan, find_loan_by_id, find_member_loans, query_overdue, return_book};

// See https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        AppState::new("dev", RepositoryStore::LocalDynamoDB).await
    } else {
        AppState::new("prod", RepositoryStore::DynamoDB).await
    };

    let app = Router::new()
        .route("/loans", post(borrow_book))
        .route("/loans/overdue", get(query_overdue))
        .route("/loans/:id", get(find_loan_by_id))
        .route("/loans/:id/return", post(return_book))
        .route("/loans/:id/extend", post(extend_loan))
        .route("/members/:id/loans", get(find_member_loans))
        .with_state(state);

    run(app).await
}
