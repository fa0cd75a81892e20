use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::members::domain::MemberService;
use crate::members::dto::MemberDto;

pub(crate) struct AddMemberCommand {
    member_service: Box<dyn MemberService>,
}

impl AddMemberCommand {
    pub(crate) fn new(member_service: Box<dyn MemberService>) -> Self {
        Self {
            member_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddMemberCommandRequest {
    pub name: String,
    pub phone_number: String,
}

impl AddMemberCommandRequest {
    pub fn new(name: &str, phone_number: &str) -> Self {
        Self {
            name: name.to_string(),
            phone_number: phone_number.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddMemberCommandResponse {
    pub member: MemberDto,
}

#[async_trait]
impl Command<AddMemberCommandRequest, AddMemberCommandResponse> for AddMemberCommand {
    async fn execute(&self, req: AddMemberCommandRequest) -> Result<AddMemberCommandResponse, CommandError> {
        let member = MemberDto::new(req.name.as_str(), req.phone_number.as_str());
        self.member_service.add_member(&member).await.map_err(CommandError::from)
            .map(|member| AddMemberCommandResponse { member })
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::members::command::add_member_cmd::{AddMemberCommand, AddMemberCommandRequest};
    use crate::members::factory;

    lazy_static! {
        static ref SUT_CMD : AsyncOnce<AddMemberCommand> = AsyncOnce::new(async {
                let svc = factory::create_member_service(&Configuration::new("test"), &RepositoryStore::in_memory()).await;
                AddMemberCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_add_member() {
        let cmd = SUT_CMD.get().await;
        let res = cmd.execute(AddMemberCommandRequest::new("Choi", "010-9999-8888")).await.expect("should add member");
        assert!(res.member.member_id > 0);
        assert!(matches!(cmd.execute(AddMemberCommandRequest::new(" ", "010")).await, Err(CommandError::Validation { .. })));
    }
}
