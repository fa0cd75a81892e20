use std::sync::Arc;
use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::utils::memory::MemoryDatabase;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity and return the identifier assigned by the store
    async fn create(&self, entity: &Entity) -> LibraryResult<i64>;

    // get an entity
    async fn get(&self, id: i64) -> LibraryResult<Entity>;
}

#[derive(Debug, Clone)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory(Arc<MemoryDatabase>),
}

impl RepositoryStore {
    pub fn in_memory() -> RepositoryStore {
        RepositoryStore::InMemory(Arc::new(MemoryDatabase::default()))
    }

    pub fn is_dynamodb(&self) -> bool {
        !matches!(self, RepositoryStore::InMemory(_))
    }
}
