use async_trait::async_trait;
use tracing::info;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::loans::repository::LoanRepository;
use crate::members::domain::MemberService;
use crate::members::domain::model::MemberEntity;
use crate::members::dto::MemberDto;
use crate::members::repository::MemberRepository;

pub(crate) struct MemberServiceImpl {
    member_repository: Box<dyn MemberRepository>,
    loan_repository: Box<dyn LoanRepository>,
}

impl MemberServiceImpl {
    pub(crate) fn new(_config: &Configuration, member_repository: Box<dyn MemberRepository>,
                      loan_repository: Box<dyn LoanRepository>) -> Self {
        MemberServiceImpl {
            member_repository,
            loan_repository,
        }
    }
}

#[async_trait]
impl MemberService for MemberServiceImpl {
    async fn add_member(&self, member: &MemberDto) -> LibraryResult<MemberDto> {
        if member.name.trim().is_empty() {
            return Err(LibraryError::validation("member name must not be empty", Some("400".to_string())));
        }
        let id = self.member_repository.create(&MemberEntity::from(member)).await?;
        self.find_member_by_id(id).await
    }

    async fn remove_member(&self, id: i64) -> LibraryResult<()> {
        let _ = self.member_repository.get(id).await?;
        let active = self.loan_repository.find_active_by_member(id).await?;
        if !active.is_empty() {
            return Err(LibraryError::validation(
                format!("member {} still has {} active loans", id, active.len()).as_str(), Some("ActiveLoans".to_string())));
        }
        self.member_repository.delete(id).await?;
        info!(member_id = id, "removed member");
        Ok(())
    }

    async fn update_phone_number(&self, id: i64, phone_number: &str) -> LibraryResult<MemberDto> {
        if phone_number.trim().is_empty() {
            return Err(LibraryError::validation("phone number must not be empty", Some("400".to_string())));
        }
        let mut member = self.member_repository.get(id).await?;
        member.phone_number = phone_number.trim().to_string();
        self.member_repository.update(&member).await?;
        self.find_member_by_id(id).await
    }

    async fn find_member_by_id(&self, id: i64) -> LibraryResult<MemberDto> {
        self.member_repository.get(id).await.map(|m| MemberDto::from(&m))
    }

    async fn list_members(&self) -> LibraryResult<Vec<MemberDto>> {
        let res = self.member_repository.list().await?;
        Ok(res.iter().map(MemberDto::from).collect())
    }
}
