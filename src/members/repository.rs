pub mod ddb_member_repository;
pub mod memory_member_repository;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;

#[async_trait]
pub(crate) trait MemberRepository: Repository<MemberEntity> {
    async fn update(&self, entity: &MemberEntity) -> LibraryResult<usize>;

    async fn delete(&self, id: i64) -> LibraryResult<usize>;

    async fn list(&self) -> LibraryResult<Vec<MemberEntity>>;
}
