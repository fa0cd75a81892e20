use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError, require_positive_id};
use crate::members::domain::MemberService;
use crate::members::dto::MemberDto;

// UpdateMemberCommand changes the phone number, the only member detail that may change.
pub(crate) struct UpdateMemberCommand {
    member_service: Box<dyn MemberService>,
}

impl UpdateMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>) -> Self {
        Self {
            member_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateMemberCommandRequest {
    pub member_id: i64,
    pub phone_number: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateMemberCommandResponse {
    pub member: MemberDto,
}

#[async_trait]
impl Command<UpdateMemberCommandRequest, UpdateMemberCommandResponse> for UpdateMemberCommand {
    async fn execute(&self, req: UpdateMemberCommandRequest) -> Result<UpdateMemberCommandResponse, CommandError> {
        let id = require_positive_id("member_id", req.member_id)?;
        self.member_service.update_phone_number(id, req.phone_number.as_str()).await.map_err(CommandError::from)
            .map(|member| UpdateMemberCommandResponse { member })
    }
}
