use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::RequestResult;
use crate::models::ItemRequest;

/// Repository trait for ItemRequest persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Create a new item request
    async fn create(&self, request: ItemRequest) -> RequestResult<ItemRequest>;

    /// Get a request by ID
    async fn get_by_id(&self, id: Uuid) -> RequestResult<Option<ItemRequest>>;

    /// A user's own requests, newest first
    async fn find_by_requestor(&self, requestor_id: Uuid) -> RequestResult<Vec<ItemRequest>>;

    /// Everyone else's requests, newest first
    async fn find_others(&self, requestor_id: Uuid) -> RequestResult<Vec<ItemRequest>>;
}

/// In-memory implementation of RequestRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryRequestRepository {
    requests: Arc<RwLock<HashMap<Uuid, ItemRequest>>>,
}

impl InMemoryRequestRepository {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn newest_first(mut requests: Vec<ItemRequest>) -> Vec<ItemRequest> {
    requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    requests
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn create(&self, request: ItemRequest) -> RequestResult<ItemRequest> {
        let mut requests = self.requests.write().await;
        requests.insert(request.id, request.clone());

        tracing::info!(request_id = %request.id, requestor_id = %request.requestor_id, "Created item request");
        Ok(request)
    }

    async fn get_by_id(&self, id: Uuid) -> RequestResult<Option<ItemRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.get(&id).cloned())
    }

    async fn find_by_requestor(&self, requestor_id: Uuid) -> RequestResult<Vec<ItemRequest>> {
        let requests = self.requests.read().await;

        Ok(newest_first(
            requests
                .values()
                .filter(|r| r.requestor_id == requestor_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_others(&self, requestor_id: Uuid) -> RequestResult<Vec<ItemRequest>> {
        let requests = self.requests.read().await;

        Ok(newest_first(
            requests
                .values()
                .filter(|r| r.requestor_id != requestor_id)
                .cloned()
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_own_and_other_requests_are_disjoint() {
        let repo = InMemoryRequestRepository::new();
        let me = Uuid::now_v7();
        let them = Uuid::now_v7();

        repo.create(ItemRequest::new("need a drill".to_string(), me))
            .await
            .unwrap();
        repo.create(ItemRequest::new("need a saw".to_string(), them))
            .await
            .unwrap();

        let mine = repo.find_by_requestor(me).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].description, "need a drill");

        let others = repo.find_others(me).await.unwrap();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].description, "need a saw");
    }

    #[tokio::test]
    async fn test_requests_sorted_newest_first() {
        let repo = InMemoryRequestRepository::new();
        let me = Uuid::now_v7();

        let first = repo
            .create(ItemRequest::new("first".to_string(), me))
            .await
            .unwrap();
        let second = repo
            .create(ItemRequest::new("second".to_string(), me))
            .await
            .unwrap();
        assert!(second.created_at >= first.created_at);

        let mine = repo.find_by_requestor(me).await.unwrap();
        assert_eq!(mine[0].id, second.id);
        assert_eq!(mine[1].id, first.id);
    }
}
