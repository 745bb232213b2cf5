//! Notification operations for the current user.

use std::sync::Arc;

use async_trait::async_trait;

use clickdelivery_core::models::Notification;
use clickdelivery_core::ApiResult;
use clickdelivery_mock::MockBackend;

use crate::fetch::HttpContext;

#[async_trait]
trait NotificationsBackend: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<Notification>>;
    async fn mark_as_read(&self, id: &str) -> ApiResult<Notification>;
    async fn mark_all_as_read(&self) -> ApiResult<()>;
}

struct HttpNotificationsBackend {
    context: HttpContext,
}

#[async_trait]
impl NotificationsBackend for HttpNotificationsBackend {
    async fn list(&self) -> ApiResult<Vec<Notification>> {
        self.context.get("/notifications").execute().await
    }

    async fn mark_as_read(&self, id: &str) -> ApiResult<Notification> {
        self.context
            .patch(&format!("/notifications/{id}/read"))
            .execute()
            .await
    }

    async fn mark_all_as_read(&self) -> ApiResult<()> {
        self.context
            .post("/notifications/read-all")
            .execute_unit()
            .await
    }
}

struct MockNotificationsBackend {
    backend: Arc<MockBackend>,
}

#[async_trait]
impl NotificationsBackend for MockNotificationsBackend {
    async fn list(&self) -> ApiResult<Vec<Notification>> {
        self.backend.notifications().get_notifications().await
    }

    async fn mark_as_read(&self, id: &str) -> ApiResult<Notification> {
        self.backend.notifications().mark_as_read(id).await
    }

    async fn mark_all_as_read(&self) -> ApiResult<()> {
        self.backend.notifications().mark_all_as_read().await?;
        Ok(())
    }
}

/// Facade over the selected notification backend.
pub struct NotificationsApi {
    backend: Arc<dyn NotificationsBackend>,
}

impl NotificationsApi {
    pub(crate) fn http(context: HttpContext) -> Self {
        Self {
            backend: Arc::new(HttpNotificationsBackend { context }),
        }
    }

    pub(crate) fn mock(backend: Arc<MockBackend>) -> Self {
        Self {
            backend: Arc::new(MockNotificationsBackend { backend }),
        }
    }

    /// Current user's notifications, newest first.
    pub async fn get_notifications(&self) -> ApiResult<Vec<Notification>> {
        self.backend.list().await
    }

    pub async fn mark_as_read(&self, id: &str) -> ApiResult<Notification> {
        self.backend.mark_as_read(id).await
    }

    pub async fn mark_all_as_read(&self) -> ApiResult<()> {
        self.backend.mark_all_as_read().await
    }

    pub async fn unread_count(&self) -> ApiResult<usize> {
        Ok(self
            .get_notifications()
            .await?
            .iter()
            .filter(|n| !n.read)
            .count())
    }
}
