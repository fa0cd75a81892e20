include!("../../lib.rs");
use axum::{
    routing::{get, post, put},
    Router,
};
use lambda_http::{run, Error};
use crate::utils::logs::setup_tracing;
use crate::core::controller::AppState;
use crate::core::repository::RepositoryStore;
use crate::members::controller::{add_member, find_member_by_id, list_members, remove_member, update_phone_number};

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
        .route("/members", post(add_member).get(list_members))
        .route("/members/:id",
               get(find_member_by_id).delete(remove_member))
        .route("/members/:id/phone", put(update_phone_number))
        .with_state(state);

    run(app).await
}
