use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;
use tracing::Instrument;
use crate::calendar::command::add_holiday_cmd::{AddHolidayCommand, AddHolidayCommandRequest, AddHolidayCommandResponse};
use crate::calendar::command::due_date_cmd::{DueDateCommand, DueDateCommandRequest, DueDateCommandResponse};
use crate::calendar::command::list_holidays_cmd::{ListHolidaysCommand, ListHolidaysCommandRequest, ListHolidaysCommandResponse};
use crate::calendar::command::remove_holiday_cmd::{RemoveHolidayCommand, RemoveHolidayCommandRequest, RemoveHolidayCommandResponse};
use crate::calendar::domain::HolidayService;
use crate::calendar::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, request_span, ServerError};

fn build_service(state: &AppState) -> Box<dyn HolidayService> {
    factory::create_holiday_service(&state.config, state.calendar.clone())
}

pub(crate) async fn add_holiday(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddHolidayCommandResponse>, ServerError> {
    let req: AddHolidayCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(&state);
    let res = AddHolidayCommand::new(svc).execute(req).instrument(request_span("add_holiday")).await?;
    Ok(Json(res))
}

pub(crate) async fn list_holidays(
    State(state): State<AppState>) -> Result<Json<ListHolidaysCommandResponse>, ServerError> {
    let svc = build_service(&state);
    let res = ListHolidaysCommand::new(svc).execute(ListHolidaysCommandRequest::default())
        .instrument(request_span("list_holidays")).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_holiday(
    State(state): State<AppState>,
    Path(holiday_date): Path<String>) -> Result<Json<RemoveHolidayCommandResponse>, ServerError> {
    let req = RemoveHolidayCommandRequest { holiday_date };
    let svc = build_service(&state);
    let res = RemoveHolidayCommand::new(svc).execute(req).instrument(request_span("remove_holiday")).await?;
    Ok(Json(res))
}

pub(crate) async fn compute_due_date(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<DueDateCommandResponse>, ServerError> {
    let req: DueDateCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(&state);
    let res = DueDateCommand::new(svc).execute(req).instrument(request_span("compute_due_date")).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::Json;
    use serde_json::json;
    use crate::calendar::controller::{add_holiday, compute_due_date, list_holidays, remove_holiday};
    use crate::core::controller::AppState;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_handle_holiday_requests() {
        let state = AppState::new("test", RepositoryStore::in_memory()).await;
        let _ = add_holiday(State(state.clone()), Json(json!({"holiday_date": "2025-09-01", "description": "closed"})))
            .await.expect("should add holiday");
        let res = list_holidays(State(state.clone())).await.expect("should list holidays");
        assert_eq!(1, res.0.holidays.len());

        let res = compute_due_date(State(state.clone()), Json(json!({"start_date": "2025-08-29", "lending_days": 1})))
            .await.expect("should compute due date");
        assert_eq!("2025-09-02", res.0.due_date.as_str());

        let _ = remove_holiday(State(state.clone()), Path("2025-09-01".to_string())).await.expect("should remove holiday");
        let err = remove_holiday(State(state.clone()), Path("2025-09-01".to_string())).await.expect_err("should not find holiday");
        assert_eq!(StatusCode::NOT_FOUND, err.0);
        let err = add_holiday(State(state), Json(json!({"holiday_date": "tomorrow"}))).await.expect_err("should reject date");
        assert_eq!(StatusCode::BAD_REQUEST, err.0);
    }
}
