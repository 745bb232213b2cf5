//! Mock authentication service.
//!
//! Keeps a seeded user collection with passwords and issues real,
//! unsigned-in-spirit JWTs (signed with a fixed throwaway secret) so
//! token-inspection code behaves exactly as against the live BFF.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clickdelivery_core::models::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, SessionUser, User, UserPatch,
};
use clickdelivery_core::{ApiError, ApiResult, SessionStore};

use crate::seed::default_users;
use crate::services::simulate_auth_delay;
use crate::store::Store;

/// Signing secret for mock tokens. Worthless on purpose.
const MOCK_TOKEN_SECRET: &[u8] = b"internal-mode";
const MOCK_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// A user as persisted by the mock backend, password included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(flatten)]
    pub user: User,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct MockClaims {
    sub: String,
    email: String,
    roles: Vec<String>,
    iat: i64,
    exp: i64,
}

#[derive(Clone)]
pub struct MockAuthService {
    users: Arc<Store<StoredUser>>,
    session: Arc<SessionStore>,
}

impl MockAuthService {
    pub fn new(users: Arc<Store<StoredUser>>, session: Arc<SessionStore>) -> Self {
        if users.is_empty() {
            for (user, password) in default_users() {
                let id = user.id.clone();
                users.set(&id, StoredUser { user, password });
            }
        }
        Self { users, session }
    }

    fn issue_token(&self, user: &User) -> String {
        let now = Utc::now().timestamp();
        let claims = MockClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
            iat: now,
            exp: now + MOCK_TOKEN_TTL_SECS,
        };
        // Encoding with a static secret cannot fail for these claims.
        encode(&Header::default(), &claims, &EncodingKey::from_secret(MOCK_TOKEN_SECRET))
            .unwrap_or_default()
    }

    pub async fn register(&self, data: RegisterRequest) -> ApiResult<MessageResponse> {
        simulate_auth_delay().await;

        let exists = self.users.get_all().iter().any(|u| u.user.email == data.email);
        if exists {
            return Err(ApiError::user_exists("User with this email already exists"));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: data.email,
            name: format!("{} {}", data.first_name, data.last_name),
            phone: None,
            roles: vec![data.role.unwrap_or_else(|| "customer".to_string())],
            created_at: now,
            updated_at: now,
        };
        let id = user.id.clone();
        self.users.set(&id, StoredUser { user, password: data.password });

        Ok(MessageResponse {
            message: "User registered successfully".to_string(),
        })
    }

    pub async fn login(&self, credentials: LoginRequest) -> ApiResult<LoginResponse> {
        simulate_auth_delay().await;

        let found = self
            .users
            .get_all()
            .into_iter()
            .find(|u| u.user.email == credentials.email && u.password == credentials.password);
        let Some(stored) = found else {
            return Err(ApiError::invalid_credentials("Invalid email or password"));
        };

        let token = self.issue_token(&stored.user);
        self.session.set_auth_token(&token);
        self.session.set_current_user_id(&stored.user.id);

        Ok(LoginResponse {
            token,
            refresh_token: None,
            user: SessionUser {
                id: stored.user.id,
                email: stored.user.email,
                name: stored.user.name,
                roles: stored.user.roles,
            },
        })
    }

    /// Client-side only: drops the session markers.
    pub fn logout(&self) {
        self.session.clear_session();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The logged-in user, without the password field.
    pub fn current_user(&self) -> Option<User> {
        let user_id = self.session.current_user_id()?;
        self.users.get(&user_id).map(|stored| stored.user)
    }

    pub fn get_all_users(&self) -> Vec<User> {
        self.users.get_all().into_iter().map(|stored| stored.user).collect()
    }

    pub fn get_user_by_id(&self, id: &str) -> Option<User> {
        self.users.get(id).map(|stored| stored.user)
    }

    /// Admin-side creation with explicit roles.
    pub fn create_user(&self, data: RegisterRequest, roles: Option<Vec<String>>) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: data.email,
            name: format!("{} {}", data.first_name, data.last_name),
            phone: None,
            roles: roles.unwrap_or_else(|| vec!["customer".to_string()]),
            created_at: now,
            updated_at: now,
        };
        let id = user.id.clone();
        self.users.set(&id, StoredUser { user: user.clone(), password: data.password });
        user
    }

    /// Merges a patch; the id and password always survive.
    pub fn update_user(&self, id: &str, patch: UserPatch) -> Option<User> {
        self.users
            .update(id, |stored| {
                if let Some(name) = patch.name {
                    stored.user.name = name;
                }
                if let Some(email) = patch.email {
                    stored.user.email = email;
                }
                if let Some(phone) = patch.phone {
                    stored.user.phone = Some(phone);
                }
                if let Some(roles) = patch.roles {
                    stored.user.roles = roles;
                }
                stored.user.updated_at = Utc::now();
            })
            .map(|stored| stored.user)
    }

    pub fn delete_user(&self, id: &str) -> bool {
        self.users.delete(id)
    }
}
