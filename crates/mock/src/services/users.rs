//! Mock user/profile service. Account data lives with the auth
//! service; this layer adds the profile extras and admin listing.

use std::sync::Arc;

use clickdelivery_core::models::{
    Address, MeSummary, MessageResponse, PaginatedResponse, PasswordChangeRequest, Preferences,
    ProfilePatch, RegisterRequest, User, UserPatch, UserProfile, UserStats,
};
use clickdelivery_core::{ApiError, ApiResult};

use crate::paginate::paginate;
use crate::services::auth::MockAuthService;
use crate::services::simulate_delay;
use crate::store::Store;

/// Address and preferences kept alongside the account record.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct ProfileExtras {
    pub address: Address,
    pub preferences: Preferences,
}

impl Default for ProfileExtras {
    fn default() -> Self {
        Self {
            address: Address {
                street: "123 Test St".into(),
                city: "Test City".into(),
                state: "TS".into(),
                zip_code: "12345".into(),
            },
            preferences: Preferences {
                language: "en".into(),
                notifications: true,
            },
        }
    }
}

#[derive(Clone)]
pub struct MockUserService {
    auth: MockAuthService,
    profiles: Arc<Store<ProfileExtras>>,
}

impl MockUserService {
    pub fn new(auth: MockAuthService, profiles: Arc<Store<ProfileExtras>>) -> Self {
        Self { auth, profiles }
    }

    fn require_current_user(&self) -> ApiResult<User> {
        self.auth
            .current_user()
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))
    }

    /// Dashboard summary for the logged-in user.
    pub async fn get_me(&self) -> ApiResult<MeSummary> {
        simulate_delay().await;
        let user = self.require_current_user()?;
        Ok(MeSummary {
            user,
            stats: Some(UserStats::default()),
        })
    }

    pub async fn get_profile(&self) -> ApiResult<UserProfile> {
        simulate_delay().await;
        let user = self.require_current_user()?;
        let extras = self.profiles.get(&user.id).unwrap_or_default();
        Ok(UserProfile {
            user,
            address: extras.address,
            preferences: extras.preferences,
        })
    }

    pub async fn update_profile(&self, patch: ProfilePatch) -> ApiResult<UserProfile> {
        simulate_delay().await;
        let user = self.require_current_user()?;

        let account_patch = UserPatch {
            name: patch.name,
            phone: patch.phone,
            ..UserPatch::default()
        };
        let user = self
            .auth
            .update_user(&user.id, account_patch)
            .ok_or_else(|| ApiError::update_failed("Failed to update profile"))?;

        let mut extras = self.profiles.get(&user.id).unwrap_or_default();
        if let Some(address) = patch.address {
            extras.address = address;
        }
        if let Some(preferences) = patch.preferences {
            extras.preferences = preferences;
        }
        self.profiles.set(&user.id, extras.clone());

        Ok(UserProfile {
            user,
            address: extras.address,
            preferences: extras.preferences,
        })
    }

    /// Always succeeds for the logged-in mock user; the stored
    /// password is not actually rotated.
    pub async fn change_password(
        &self,
        _request: PasswordChangeRequest,
    ) -> ApiResult<MessageResponse> {
        simulate_delay().await;
        self.require_current_user()?;
        Ok(MessageResponse {
            message: "Password changed successfully".into(),
        })
    }

    pub async fn get_users(
        &self,
        page: Option<usize>,
        page_size: Option<usize>,
    ) -> ApiResult<PaginatedResponse<User>> {
        simulate_delay().await;
        let mut users = self.auth.get_all_users();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(paginate(&users, page, page_size))
    }

    pub async fn get_user_by_id(&self, id: &str) -> ApiResult<User> {
        simulate_delay().await;
        self.auth
            .get_user_by_id(id)
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    pub async fn create_user(
        &self,
        data: RegisterRequest,
        roles: Option<Vec<String>>,
    ) -> ApiResult<User> {
        simulate_delay().await;
        Ok(self.auth.create_user(data, roles))
    }

    pub async fn update_user(&self, id: &str, patch: UserPatch) -> ApiResult<User> {
        simulate_delay().await;
        self.auth
            .update_user(id, patch)
            .ok_or_else(|| ApiError::not_found("User not found"))
    }

    pub async fn delete_user(&self, id: &str) -> ApiResult<()> {
        simulate_delay().await;
        if self.auth.delete_user(id) {
            self.profiles.delete(id);
            Ok(())
        } else {
            Err(ApiError::not_found("User not found"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickdelivery_core::models::LoginRequest;
    use clickdelivery_core::SessionStore;

    async fn logged_in_service() -> MockUserService {
        let session = Arc::new(SessionStore::new());
        let auth = MockAuthService::new(Arc::new(Store::new("users", None)), session);
        auth.login(LoginRequest {
            email: "customer@example.com".into(),
            password: "customer123".into(),
        })
        .await
        .unwrap();
        MockUserService::new(auth, Arc::new(Store::new("profiles", None)))
    }

    #[tokio::test]
    async fn me_requires_authentication() {
        let svc = MockUserService::new(
            MockAuthService::new(Arc::new(Store::new("users", None)), Arc::new(SessionStore::new())),
            Arc::new(Store::new("profiles", None)),
        );
        assert!(svc.get_me().await.unwrap_err().is_unauthorized());
        assert!(svc.get_profile().await.unwrap_err().is_unauthorized());
    }

    #[tokio::test]
    async fn me_carries_zeroed_stats() {
        let svc = logged_in_service().await;
        let me = svc.get_me().await.unwrap();
        assert_eq!(me.user.email, "customer@example.com");
        assert_eq!(me.stats, Some(UserStats::default()));
    }

    #[tokio::test]
    async fn profile_starts_from_defaults_and_merges_patches() {
        let svc = logged_in_service().await;
        let profile = svc.get_profile().await.unwrap();
        assert_eq!(profile.preferences.language, "en");

        let updated = svc
            .update_profile(ProfilePatch {
                name: Some("New Name".into()),
                preferences: Some(Preferences {
                    language: "pt".into(),
                    notifications: false,
                }),
                ..ProfilePatch::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.user.name, "New Name");
        assert_eq!(updated.preferences.language, "pt");
        // Address untouched by a patch that omits it.
        assert_eq!(updated.address.city, "Test City");
    }

    #[tokio::test]
    async fn change_password_is_simulated() {
        let svc = logged_in_service().await;
        let response = svc
            .change_password(PasswordChangeRequest {
                current_password: "customer123".into(),
                new_password: "newpass456".into(),
            })
            .await
            .unwrap();
        assert_eq!(response.message, "Password changed successfully");
    }

    #[tokio::test]
    async fn admin_listing_paginates_seeded_users() {
        let svc = logged_in_service().await;
        let page = svc.get_users(Some(1), Some(3)).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.data.len(), 3);
        assert_eq!(page.total_pages, 2);
    }
}
