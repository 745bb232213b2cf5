//! Authentication operations, backed by either the BFF or the mock
//! backend. Login stores the issued token and user id in the session;
//! logout clears the session either way.

use std::sync::Arc;

use async_trait::async_trait;

use clickdelivery_core::models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use clickdelivery_core::{ApiResult, SessionStore};
use clickdelivery_mock::MockBackend;

use crate::fetch::HttpContext;

#[async_trait]
trait AuthBackend: Send + Sync {
    async fn login(&self, credentials: LoginRequest) -> ApiResult<LoginResponse>;
    async fn register(&self, data: RegisterRequest) -> ApiResult<MessageResponse>;
    fn logout(&self);
    fn is_authenticated(&self) -> bool;
}

struct HttpAuthBackend {
    context: HttpContext,
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, credentials: LoginRequest) -> ApiResult<LoginResponse> {
        let response: LoginResponse = self
            .context
            .post("/users/login")
            .json(&credentials)?
            .execute()
            .await?;
        self.context.session.set_auth_token(&response.token);
        if let Some(refresh_token) = &response.refresh_token {
            self.context.session.set_refresh_token(refresh_token);
        }
        self.context.session.set_current_user_id(&response.user.id);
        Ok(response)
    }

    async fn register(&self, data: RegisterRequest) -> ApiResult<MessageResponse> {
        self.context
            .post("/users/register")
            .json(&data)?
            .execute()
            .await
    }

    fn logout(&self) {
        self.context.session.clear_session();
    }

    fn is_authenticated(&self) -> bool {
        self.context.session.is_authenticated()
    }
}

struct MockAuthBackend {
    backend: Arc<MockBackend>,
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn login(&self, credentials: LoginRequest) -> ApiResult<LoginResponse> {
        self.backend.auth().login(credentials).await
    }

    async fn register(&self, data: RegisterRequest) -> ApiResult<MessageResponse> {
        self.backend.auth().register(data).await
    }

    fn logout(&self) {
        self.backend.auth().logout();
    }

    fn is_authenticated(&self) -> bool {
        self.backend.auth().is_authenticated()
    }
}

/// Facade over the selected auth backend.
pub struct AuthApi {
    backend: Arc<dyn AuthBackend>,
    session: Arc<SessionStore>,
}

impl AuthApi {
    pub(crate) fn http(context: HttpContext) -> Self {
        let session = context.session.clone();
        Self {
            backend: Arc::new(HttpAuthBackend { context }),
            session,
        }
    }

    pub(crate) fn mock(backend: Arc<MockBackend>, session: Arc<SessionStore>) -> Self {
        Self {
            backend: Arc::new(MockAuthBackend { backend }),
            session,
        }
    }

    pub async fn login(&self, credentials: LoginRequest) -> ApiResult<LoginResponse> {
        self.backend.login(credentials).await
    }

    pub async fn register(&self, data: RegisterRequest) -> ApiResult<MessageResponse> {
        self.backend.register(data).await
    }

    pub fn logout(&self) {
        self.backend.logout();
    }

    pub fn is_authenticated(&self) -> bool {
        self.backend.is_authenticated()
    }

    /// Token currently stored in the session, if any.
    pub fn auth_token(&self) -> Option<String> {
        self.session.auth_token()
    }
}
