pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::members::dto::MemberDto;

#[async_trait]
pub(crate) trait MemberService: Sync + Send {
    async fn add_member(&self, member: &MemberDto) -> LibraryResult<MemberDto>;
    async fn remove_member(&self, id: i64) -> LibraryResult<()>;
    async fn update_phone_number(&self, id: i64, phone_number: &str) -> LibraryResult<MemberDto>;
    async fn find_member_by_id(&self, id: i64) -> LibraryResult<MemberDto>;
    async fn list_members(&self) -> LibraryResult<Vec<MemberDto>>;
}
