use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;
use crate::utils::memory::MemoryDatabase;

#[derive(Debug)]
pub(crate) struct MemoryMemberRepository {
    db: Arc<MemoryDatabase>,
}

impl MemoryMemberRepository {
    pub(crate) fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository<MemberEntity> for MemoryMemberRepository {
    async fn create(&self, entity: &MemberEntity) -> LibraryResult<i64> {
        let id = self.db.next_id("members").await;
        let mut member = entity.clone();
        member.member_id = id;
        self.db.members.lock().await.insert(id, member);
        Ok(id)
    }

    async fn get(&self, id: i64) -> LibraryResult<MemberEntity> {
        self.db.members.lock().await.get(&id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("member not found for {}", id).as_str()))
    }
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn update(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        let mut members = self.db.members.lock().await;
        let member = members.get_mut(&entity.member_id)
            .ok_or_else(|| LibraryError::not_found(format!("member not found for {}", entity.member_id).as_str()))?;
        if member.version != entity.version {
            return Err(LibraryError::runtime(format!("member {} was updated concurrently, version {} is stale",
                                                     entity.member_id, entity.version).as_str(), Some("VersionConflict".to_string())));
        }
        member.version += 1;
        member.name = entity.name.to_string();
        member.phone_number = entity.phone_number.to_string();
        member.updated_at = Utc::now().naive_utc();
        Ok(1)
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        self.db.members.lock().await.remove(&id).map(|_| 1)
            .ok_or_else(|| LibraryError::not_found(format!("member not found for {}", id).as_str()))
    }

    async fn list(&self) -> LibraryResult<Vec<MemberEntity>> {
        Ok(self.db.members.lock().await.values().cloned().collect())
    }
}
