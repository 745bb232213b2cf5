//! Profile and account operations for the authenticated user.

use std::sync::Arc;

use async_trait::async_trait;

use clickdelivery_core::models::{
    MeSummary, MessageResponse, PasswordChangeRequest, ProfilePatch, UserProfile,
};
use clickdelivery_core::ApiResult;
use clickdelivery_mock::MockBackend;

use crate::fetch::HttpContext;

#[async_trait]
trait UsersBackend: Send + Sync {
    async fn get_me(&self) -> ApiResult<MeSummary>;
    async fn get_profile(&self) -> ApiResult<UserProfile>;
    async fn update_profile(&self, patch: ProfilePatch) -> ApiResult<UserProfile>;
    async fn change_password(&self, request: PasswordChangeRequest) -> ApiResult<MessageResponse>;
}

struct HttpUsersBackend {
    context: HttpContext,
}

#[async_trait]
impl UsersBackend for HttpUsersBackend {
    async fn get_me(&self) -> ApiResult<MeSummary> {
        self.context.get("/me/summary").execute().await
    }

    async fn get_profile(&self) -> ApiResult<UserProfile> {
        self.context.get("/users/me").execute().await
    }

    async fn update_profile(&self, patch: ProfilePatch) -> ApiResult<UserProfile> {
        self.context.put("/users/me").json(&patch)?.execute().await
    }

    async fn change_password(&self, request: PasswordChangeRequest) -> ApiResult<MessageResponse> {
        self.context
            .put("/users/me/password")
            .json(&request)?
            .execute()
            .await
    }
}

struct MockUsersBackend {
    backend: Arc<MockBackend>,
}

#[async_trait]
impl UsersBackend for MockUsersBackend {
    async fn get_me(&self) -> ApiResult<MeSummary> {
        self.backend.users().get_me().await
    }

    async fn get_profile(&self) -> ApiResult<UserProfile> {
        self.backend.users().get_profile().await
    }

    async fn update_profile(&self, patch: ProfilePatch) -> ApiResult<UserProfile> {
        self.backend.users().update_profile(patch).await
    }

    async fn change_password(&self, request: PasswordChangeRequest) -> ApiResult<MessageResponse> {
        self.backend.users().change_password(request).await
    }
}

/// Facade over the selected user backend.
pub struct UsersApi {
    backend: Arc<dyn UsersBackend>,
}

impl UsersApi {
    pub(crate) fn http(context: HttpContext) -> Self {
        Self {
            backend: Arc::new(HttpUsersBackend { context }),
        }
    }

    pub(crate) fn mock(backend: Arc<MockBackend>) -> Self {
        Self {
            backend: Arc::new(MockUsersBackend { backend }),
        }
    }

    /// Dashboard summary: the user plus their activity stats.
    pub async fn get_me(&self) -> ApiResult<MeSummary> {
        self.backend.get_me().await
    }

    pub async fn get_profile(&self) -> ApiResult<UserProfile> {
        self.backend.get_profile().await
    }

    pub async fn update_profile(&self, patch: ProfilePatch) -> ApiResult<UserProfile> {
        self.backend.update_profile(patch).await
    }

    pub async fn change_password(
        &self,
        request: PasswordChangeRequest,
    ) -> ApiResult<MessageResponse> {
        self.backend.change_password(request).await
    }
}
