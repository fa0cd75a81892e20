use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::members::domain::MemberService;
use crate::members::dto::MemberDto;

pub(crate) struct ListMembersCommand {
    member_service: Box<dyn MemberService>,
}

impl ListMembersCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>) -> Self {
        Self {
            member_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListMembersCommandRequest {}

#[derive(Debug, Serialize)]
pub(crate) struct ListMembersCommandResponse {
    pub members: Vec<MemberDto>,
}

#[async_trait]
impl Command<ListMembersCommandRequest, ListMembersCommandResponse> for ListMembersCommand {
    async fn execute(&self, _req: ListMembersCommandRequest) -> Result<ListMembersCommandResponse, CommandError> {
        self.member_service.list_members().await.map_err(CommandError::from)
            .map(|members| ListMembersCommandResponse { members })
    }
}
