use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use domain_items::repository::ItemRepository;
use domain_users::repository::UserRepository;

use crate::error::{RequestError, RequestResult};
use crate::models::{AnswerItem, CreateRequest, ItemRequest, RequestResponse};
use crate::repository::RequestRepository;

/// Service layer for ItemRequest business logic.
///
/// Items answering a request are fetched through the items domain in
/// one query per request set and grouped in memory.
pub struct RequestService {
    requests: Arc<dyn RequestRepository>,
    items: Arc<dyn ItemRepository>,
    users: Arc<dyn UserRepository>,
}

impl RequestService {
    pub fn new(
        requests: Arc<dyn RequestRepository>,
        items: Arc<dyn ItemRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            requests,
            items,
            users,
        }
    }

    async fn ensure_user_exists(&self, user_id: Uuid) -> RequestResult<()> {
        self.users
            .get_by_id(user_id)
            .await
            .map_err(|e| RequestError::Database(e.to_string()))?
            .ok_or(RequestError::UserNotFound(user_id))?;
        Ok(())
    }

    async fn with_items(&self, requests: Vec<ItemRequest>) -> RequestResult<Vec<RequestResponse>> {
        let request_ids: Vec<Uuid> = requests.iter().map(|r| r.id).collect();

        let mut items_by_request: HashMap<Uuid, Vec<AnswerItem>> = HashMap::new();
        let answers = self
            .items
            .find_by_request_ids(&request_ids)
            .await
            .map_err(|e| RequestError::Database(e.to_string()))?;
        for item in answers {
            if let Some(request_id) = item.request_id {
                items_by_request
                    .entry(request_id)
                    .or_default()
                    .push(item.into());
            }
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let items = items_by_request.remove(&request.id).unwrap_or_default();
                RequestResponse::from_request(request, items)
            })
            .collect())
    }

    /// Create a new item request
    #[instrument(skip(self, input), fields(requestor_id = %requestor_id))]
    pub async fn create_request(
        &self,
        requestor_id: Uuid,
        input: CreateRequest,
    ) -> RequestResult<RequestResponse> {
        input
            .validate()
            .map_err(|e| RequestError::Validation(e.to_string()))?;

        self.ensure_user_exists(requestor_id).await?;

        let request = ItemRequest::new(input.description, requestor_id);
        let created = self.requests.create(request).await?;

        Ok(RequestResponse::from_request(created, Vec::new()))
    }

    /// The caller's own requests, newest first, with answering items
    #[instrument(skip(self), fields(requestor_id = %requestor_id))]
    pub async fn list_own(&self, requestor_id: Uuid) -> RequestResult<Vec<RequestResponse>> {
        self.ensure_user_exists(requestor_id).await?;

        let requests = self.requests.find_by_requestor(requestor_id).await?;
        self.with_items(requests).await
    }

    /// Other users' requests, newest first, paginated
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_others(
        &self,
        user_id: Uuid,
        from: usize,
        size: usize,
    ) -> RequestResult<Vec<RequestResponse>> {
        if size == 0 {
            return Err(RequestError::Validation(
                "size must be positive".to_string(),
            ));
        }
        self.ensure_user_exists(user_id).await?;

        let requests: Vec<ItemRequest> = self
            .requests
            .find_others(user_id)
            .await?
            .into_iter()
            .skip(from)
            .take(size)
            .collect();

        self.with_items(requests).await
    }

    /// A single request with its answering items, visible to any user
    #[instrument(skip(self), fields(request_id = %request_id, user_id = %user_id))]
    pub async fn get_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> RequestResult<RequestResponse> {
        self.ensure_user_exists(user_id).await?;

        let request = self
            .requests
            .get_by_id(request_id)
            .await?
            .ok_or(RequestError::NotFound(request_id))?;

        let mut responses = self.with_items(vec![request]).await?;
        Ok(responses.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRequestRepository;
    use domain_items::repository::InMemoryItemRepository;
    use domain_items::Item;
    use domain_users::repository::InMemoryUserRepository;
    use domain_users::User;

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        items: Arc<InMemoryItemRepository>,
        service: RequestService,
    }

    impl Fixture {
        fn new() -> Self {
            let users = Arc::new(InMemoryUserRepository::new());
            let items = Arc::new(InMemoryItemRepository::new());
            let service = RequestService::new(
                Arc::new(InMemoryRequestRepository::new()),
                items.clone(),
                users.clone(),
            );
            Self {
                users,
                items,
                service,
            }
        }

        async fn user(&self, email: &str) -> User {
            self.users
                .create(User::new(email.to_string(), "Someone".to_string()))
                .await
                .unwrap()
        }
    }

    fn input(description: &str) -> CreateRequest {
        CreateRequest {
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn create_requires_existing_user() {
        let fixture = Fixture::new();

        let result = fixture
            .service
            .create_request(Uuid::now_v7(), input("need a drill"))
            .await;

        assert!(matches!(result, Err(RequestError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn own_requests_include_answering_items() {
        let fixture = Fixture::new();
        let requestor = fixture.user("requestor@example.com").await;
        let owner = fixture.user("owner@example.com").await;

        let request = fixture
            .service
            .create_request(requestor.id, input("need a drill"))
            .await
            .unwrap();

        fixture
            .items
            .create(Item::new(
                "Drill".to_string(),
                "Answering the call".to_string(),
                true,
                owner.id,
                Some(request.id),
            ))
            .await
            .unwrap();

        let own = fixture.service.list_own(requestor.id).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].items.len(), 1);
        assert_eq!(own[0].items[0].name, "Drill");
    }

    #[tokio::test]
    async fn list_others_excludes_own_requests() {
        let fixture = Fixture::new();
        let me = fixture.user("me@example.com").await;
        let them = fixture.user("them@example.com").await;

        fixture
            .service
            .create_request(me.id, input("mine"))
            .await
            .unwrap();
        fixture
            .service
            .create_request(them.id, input("theirs"))
            .await
            .unwrap();

        let others = fixture.service.list_others(me.id, 0, 20).await.unwrap();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].description, "theirs");
    }

    #[tokio::test]
    async fn get_missing_request_is_not_found() {
        let fixture = Fixture::new();
        let user = fixture.user("user@example.com").await;

        let result = fixture.service.get_request(user.id, Uuid::now_v7()).await;
        assert!(matches!(result, Err(RequestError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_others_rejects_zero_size() {
        let fixture = Fixture::new();
        let user = fixture.user("user@example.com").await;

        let result = fixture.service.list_others(user.id, 0, 0).await;
        assert!(matches!(result, Err(RequestError::Validation(_))));
    }
}
