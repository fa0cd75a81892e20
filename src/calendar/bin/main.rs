include!("../../lib.rs");
use axum::{
    routing::{delete, post},
    Router,
};
use lambda_http::{run, Error};
use crate::utils::logs::setup_tracing;
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::calendar::controller::{add_holiday, compute_due_date, list_holidays, remove_holiday};

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
        .route("/calendar/holidays", post(add_holiday).get(list_holidays))
        .route("/calendar/holidays/:date", delete(remove_holiday))
        .route("/calendar/due-date", post(compute_due_date))
        .with_state(state);

    run(app).await
}
