use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::Instrument;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, request_span, ServerError};
use crate::members::command::add_member_cmd::{AddMemberCommand, AddMemberCommandRequest, AddMemberCommandResponse};
use crate::members::command::get_member_cmd::{GetMemberCommand, GetMemberCommandRequest, GetMemberCommandResponse};
use crate::members::command::list_members_cmd::{ListMembersCommand, ListMembersCommandRequest, ListMembersCommandResponse};
use crate::members::command::remove_member_cmd::{RemoveMemberCommand, RemoveMemberCommandRequest, RemoveMemberCommandResponse};
use crate::members::command::update_member_cmd::{UpdateMemberCommand, UpdateMemberCommandRequest, UpdateMemberCommandResponse};
use crate::members::domain::MemberService;
use crate::members::factory;

async fn build_service(state: &AppState) -> Box<dyn MemberService> {
    factory::create_member_service(&state.config, &state.store).await
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhoneNumberBody {
    phone_number: String,
}

pub(crate) async fn add_member(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddMemberCommandResponse>, ServerError> {
    let req: AddMemberCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(&state).await;
    let res = AddMemberCommand::new(svc).execute(req).instrument(request_span("add_member")).await?;
    Ok(Json(res))
}

pub(crate) async fn list_members(
    State(state): State<AppState>) -> Result<Json<ListMembersCommandResponse>, ServerError> {
    let svc = build_service(&state).await;
    let res = ListMembersCommand::new(svc).execute(ListMembersCommandRequest::default())
        .instrument(request_span("list_members")).await?;
    Ok(Json(res))
}

pub(crate) async fn find_member_by_id(
    State(state): State<AppState>,
    Path(member_id): Path<i64>) -> Result<Json<GetMemberCommandResponse>, ServerError> {
    let svc = build_service(&state).await;
    let res = GetMemberCommand::new(svc).execute(GetMemberCommandRequest { member_id })
        .instrument(request_span("find_member_by_id")).await?;
    Ok(Json(res))
}

pub(crate) async fn update_phone_number(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
    json: Json<Value>) -> Result<Json<UpdateMemberCommandResponse>, ServerError> {
    let body: PhoneNumberBody = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let req = UpdateMemberCommandRequest { member_id, phone_number: body.phone_number };
    let svc = build_service(&state).await;
    let res = UpdateMemberCommand::new(svc).execute(req).instrument(request_span("update_phone_number")).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_member(
    State(state): State<AppState>,
    Path(member_id): Path<i64>) -> Result<Json<RemoveMemberCommandResponse>, ServerError> {
    let svc = build_service(&state).await;
    let res = RemoveMemberCommand::new(svc).execute(RemoveMemberCommandRequest { member_id })
        .instrument(request_span("remove_member")).await?;
    Ok(Json(res))
}
