use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError, require_positive_id};
use crate::members::domain::MemberService;
use crate::members::dto::MemberDto;

pub(crate) struct GetMemberCommand {
    member_service: Box<dyn MemberService>,
}

impl GetMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>) -> Self {
        Self {
            member_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetMemberCommandRequest {
    pub member_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetMemberCommandResponse {
    pub member: MemberDto,
}

#[async_trait]
impl Command<GetMemberCommandRequest, GetMemberCommandResponse> for GetMemberCommand {
    async fn execute(&self, req: GetMemberCommandRequest) -> Result<GetMemberCommandResponse, CommandError> {
        let id = require_positive_id("member_id", req.member_id)?;
        self.member_service.find_member_by_id(id).await.map_err(CommandError::from)
            .map(|member| GetMemberCommandResponse { member })
    }
}
