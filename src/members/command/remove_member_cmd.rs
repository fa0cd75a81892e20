use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError, require_positive_id};
use crate::members::domain::MemberService;

pub(crate) struct RemoveMemberCommand {
    member_service: Box<dyn MemberService>,
}

impl RemoveMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>) -> Self {
        Self {
            member_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveMemberCommandRequest {
    pub member_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveMemberCommandResponse {
    pub member_id: i64,
}

#[async_trait]
impl Command<RemoveMemberCommandRequest, RemoveMemberCommandResponse> for RemoveMemberCommand {
    async fn execute(&self, req: RemoveMemberCommandRequest) -> Result<RemoveMemberCommandResponse, CommandError> {
        let id = require_positive_id("member_id", req.member_id)?;
        self.member_service.remove_member(id).await.map_err(CommandError::from)
            .map(|_| RemoveMemberCommandResponse { member_id: id })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::members::command::add_member_cmd::{AddMemberCommand, AddMemberCommandRequest};
    use crate::members::command::get_member_cmd::{GetMemberCommand, GetMemberCommandRequest};
    use crate::members::command::list_members_cmd::{ListMembersCommand, ListMembersCommandRequest};
    use crate::members::command::remove_member_cmd::{RemoveMemberCommand, RemoveMemberCommandRequest};
    use crate::members::command::update_member_cmd::{UpdateMemberCommand, UpdateMemberCommandRequest};
    use crate::members::factory;

    #[tokio::test]
    async fn test_should_run_member_commands() {
        let store = RepositoryStore::in_memory();
        let config = Configuration::new("test");
        let added = AddMemberCommand::new(factory::create_member_service(&config, &store).await)
            .execute(AddMemberCommandRequest::new("Jung", "010-1"))
            .await.expect("should add member");
        let id = added.member.member_id;

        let updated = UpdateMemberCommand::new(factory::create_member_service(&config, &store).await)
            .execute(UpdateMemberCommandRequest { member_id: id, phone_number: "010-2".to_string() })
            .await.expect("should update member");
        assert_eq!("010-2", updated.member.phone_number.as_str());

        let get_cmd = GetMemberCommand::new(factory::create_member_service(&config, &store).await);
        let loaded = get_cmd.execute(GetMemberCommandRequest { member_id: id }).await.expect("should get member");
        assert_eq!("Jung", loaded.member.name.as_str());
        assert!(matches!(get_cmd.execute(GetMemberCommandRequest { member_id: 0 }).await, Err(CommandError::Validation { .. })));

        let listed = ListMembersCommand::new(factory::create_member_service(&config, &store).await)
            .execute(ListMembersCommandRequest::default()).await.expect("should list members");
        assert_eq!(1, listed.members.len());

        let remove_cmd = RemoveMemberCommand::new(factory::create_member_service(&config, &store).await);
        remove_cmd.execute(RemoveMemberCommandRequest { member_id: id }).await.expect("should remove member");
        assert!(matches!(remove_cmd.execute(RemoveMemberCommandRequest { member_id: id }).await, Err(CommandError::NotFound { .. })));
    }
}
