//! Mock notification service. Scoped to the logged-in mock user.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use clickdelivery_core::models::Notification;
use clickdelivery_core::{ApiError, ApiResult, SessionStore};

use crate::services::simulate_delay;
use crate::store::Store;

#[derive(Clone)]
pub struct MockNotificationService {
    notifications: Arc<Store<Notification>>,
    session: Arc<SessionStore>,
}

impl MockNotificationService {
    pub fn new(notifications: Arc<Store<Notification>>, session: Arc<SessionStore>) -> Self {
        Self {
            notifications,
            session,
        }
    }

    fn current_user_id(&self) -> ApiResult<String> {
        self.session
            .current_user_id()
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))
    }

    /// Current user's notifications, newest first.
    pub async fn get_notifications(&self) -> ApiResult<Vec<Notification>> {
        simulate_delay().await;
        let user_id = self.current_user_id()?;
        let mut notifications = self.notifications.get_all();
        notifications.retain(|n| n.user_id == user_id);
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    pub async fn unread_count(&self) -> ApiResult<usize> {
        Ok(self
            .get_notifications()
            .await?
            .iter()
            .filter(|n| !n.read)
            .count())
    }

    pub async fn create_notification(
        &self,
        user_id: &str,
        title: &str,
        message: &str,
        notification_type: &str,
    ) -> ApiResult<Notification> {
        simulate_delay().await;
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            notification_type: notification_type.to_string(),
            read: false,
            created_at: Utc::now(),
        };
        self.notifications
            .set(&notification.id, notification.clone());
        Ok(notification)
    }

    pub async fn mark_as_read(&self, id: &str) -> ApiResult<Notification> {
        simulate_delay().await;
        self.notifications
            .update(id, |n| n.read = true)
            .ok_or_else(|| ApiError::not_found("Notification not found"))
    }

    /// Marks every notification of the current user as read.
    pub async fn mark_all_as_read(&self) -> ApiResult<usize> {
        simulate_delay().await;
        let user_id = self.current_user_id()?;
        let mut marked = 0;
        for notification in self.notifications.get_all() {
            if notification.user_id == user_id && !notification.read {
                self.notifications.update(&notification.id, |n| n.read = true);
                marked += 1;
            }
        }
        Ok(marked)
    }

    pub fn delete_notification(&self, id: &str) -> bool {
        self.notifications.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MockNotificationService {
        let session = Arc::new(SessionStore::new());
        session.set_current_user_id("courier-1");
        MockNotificationService::new(Arc::new(Store::new("notifications", None)), session)
    }

    #[tokio::test]
    async fn listing_is_scoped_and_newest_first() {
        let svc = service();
        let first = svc
            .create_notification("courier-1", "Order ready", "Pick up order #1", "order")
            .await
            .unwrap();
        let second = svc
            .create_notification("courier-1", "New delivery", "Delivery assigned", "delivery")
            .await
            .unwrap();
        svc.create_notification("customer-1", "Promo", "Free fries", "promo")
            .await
            .unwrap();

        let list = svc.get_notifications().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, second.id);
        assert_eq!(list[1].id, first.id);
    }

    #[tokio::test]
    async fn unread_count_drops_as_notifications_are_read() {
        let svc = service();
        let n = svc
            .create_notification("courier-1", "a", "b", "system")
            .await
            .unwrap();
        svc.create_notification("courier-1", "c", "d", "system")
            .await
            .unwrap();
        assert_eq!(svc.unread_count().await.unwrap(), 2);

        svc.mark_as_read(&n.id).await.unwrap();
        assert_eq!(svc.unread_count().await.unwrap(), 1);

        let marked = svc.mark_all_as_read().await.unwrap();
        assert_eq!(marked, 1);
        assert_eq!(svc.unread_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn requires_a_logged_in_user() {
        let svc = MockNotificationService::new(
            Arc::new(Store::new("notifications", None)),
            Arc::new(SessionStore::new()),
        );
        let err = svc.get_notifications().await.unwrap_err();
        assert!(err.is_unauthorized());
    }
}
