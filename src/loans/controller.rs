use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::Instrument;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, request_span, ServerError};
use crate::loans::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest, BorrowBookCommandResponse};
use crate::loans::command::extend_loan_cmd::{ExtendLoanCommand, ExtendLoanCommandRequest, ExtendLoanCommandResponse};
use crate::loans::command::get_loan_cmd::{GetLoanCommand, GetLoanCommandRequest, GetLoanCommandResponse};
use crate::loans::command::member_loans_cmd::{MemberLoansCommand, MemberLoansCommandRequest, MemberLoansCommandResponse};
use crate::loans::command::overdue_loans_cmd::{OverdueLoansCommand, OverdueLoansCommandRequest, OverdueLoansCommandResponse};
use crate::loans::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest, ReturnBookCommandResponse};
use crate::loans::domain::LoanLedger;
use crate::loans::factory;

async fn build_ledger(state: &AppState) -> Box<dyn LoanLedger> {
    factory::create_loan_ledger(&state.config, &state.store, &state.calendar).await
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct ExtendBody {
    days_to_extend: Option<u32>,
}

pub(crate) async fn borrow_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<BorrowBookCommandResponse>, ServerError> {
    let req: BorrowBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let ledger = build_ledger(&state).await;
    let res = BorrowBookCommand::new(ledger).execute(req).instrument(request_span("borrow_book")).await?;
    Ok(Json(res))
}

pub(crate) async fn return_book(
    State(state): State<AppState>,
    Path(loan_id): Path<i64>) -> Result<Json<ReturnBookCommandResponse>, ServerError> {
    let ledger = build_ledger(&state).await;
    let res = ReturnBookCommand::new(ledger).execute(ReturnBookCommandRequest { loan_id })
        .instrument(request_span("return_book")).await?;
    Ok(Json(res))
}

pub(crate) async fn extend_loan(
    State(state): State<AppState>,
    Path(loan_id): Path<i64>,
    json: Option<Json<Value>>) -> Result<Json<ExtendLoanCommandResponse>, ServerError> {
    let body: ExtendBody = match json {
        Some(json) => serde_json::from_value(json.0).map_err(json_to_server_error)?,
        None => ExtendBody::default(),
    };
    let req = ExtendLoanCommandRequest { loan_id, days_to_extend: body.days_to_extend };
    let ledger = build_ledger(&state).await;
    let res = ExtendLoanCommand::new(ledger, state.config.extension_days).execute(req)
        .instrument(request_span("extend_loan")).await?;
    Ok(Json(res))
}

pub(crate) async fn find_loan_by_id(
    State(state): State<AppState>,
    Path(loan_id): Path<i64>) -> Result<Json<GetLoanCommandResponse>, ServerError> {
    let ledger = build_ledger(&state).await;
    let res = GetLoanCommand::new(ledger).execute(GetLoanCommandRequest { loan_id })
        .instrument(request_span("find_loan_by_id")).await?;
    Ok(Json(res))
}

pub(crate) async fn find_member_loans(
    State(state): State<AppState>,
    Path(member_id): Path<i64>) -> Result<Json<MemberLoansCommandResponse>, ServerError> {
    let ledger = build_ledger(&state).await;
    let res = MemberLoansCommand::new(ledger).execute(MemberLoansCommandRequest { member_id })
        .instrument(request_span("find_member_loans")).await?;
    Ok(Json(res))
}

pub(crate) async fn query_overdue(
    State(state): State<AppState>,
    Query(req): Query<OverdueLoansCommandRequest>) -> Result<Json<OverdueLoansCommandResponse>, ServerError> {
    let ledger = build_ledger(&state).await;
    let res = OverdueLoansCommand::new(ledger).execute(req).instrument(request_span("query_overdue")).await?;
    Ok(Json(res))
}
