//! Route authorization decisions.
//!
//! Pure functions mapping authentication state to a navigation
//! decision. The loading state is checked strictly before either auth
//! branch so an in-flight identity resolution never flashes a wrong
//! redirect. These decisions shape navigation only; the backend
//! enforces authorization independently.

use serde_json::Value;

use crate::get_user_roles;

/// Snapshot of the identity resolution at decision time.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Identity resolution still in flight.
    Loading,
    Unauthenticated,
    /// Resolved, with the user's claims object.
    Authenticated(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    /// Render a loading state; make no authorization decision yet.
    ShowLoading,
    /// Redirect to `/login`, preserving the attempted path for return.
    RedirectToLogin { from: String },
    /// Redirect to a safe default.
    Redirect(String),
    /// Render the protected content.
    Allow,
}

/// Authentication gate for any protected route.
pub fn protected_route(state: &AuthState, attempted_path: &str) -> RouteDecision {
    match state {
        AuthState::Loading => RouteDecision::ShowLoading,
        AuthState::Unauthenticated => RouteDecision::RedirectToLogin {
            from: attempted_path.to_string(),
        },
        AuthState::Authenticated(_) => RouteDecision::Allow,
    }
}

/// Role gate for a route restricted to `required_roles`.
///
/// An authenticated user with no normalized roles is treated as a
/// `customer` rather than denied; once a role set exists, any
/// intersection with the required set grants access.
pub fn role_guard(state: &AuthState, required_roles: &[&str]) -> RouteDecision {
    let claims = match state {
        AuthState::Loading => return RouteDecision::ShowLoading,
        AuthState::Unauthenticated => {
            return RouteDecision::RedirectToLogin {
                from: "/".to_string(),
            }
        }
        AuthState::Authenticated(claims) => claims,
    };

    let mut roles = get_user_roles(Some(claims));
    if roles.is_empty() {
        roles.push("customer".to_string());
    }

    let has_access = roles.iter().any(|role| required_roles.contains(&role.as_str()));
    if has_access {
        RouteDecision::Allow
    } else {
        RouteDecision::Redirect("/".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loading_defers_everything() {
        assert_eq!(
            protected_route(&AuthState::Loading, "/customer/orders"),
            RouteDecision::ShowLoading
        );
        assert_eq!(role_guard(&AuthState::Loading, &["admin"]), RouteDecision::ShowLoading);
    }

    #[test]
    fn loading_wins_even_over_required_roles_mismatch() {
        // The ordering requirement: no redirect may fire while loading.
        let decision = role_guard(&AuthState::Loading, &["admin"]);
        assert!(!matches!(decision, RouteDecision::Redirect(_)));
        assert!(!matches!(decision, RouteDecision::RedirectToLogin { .. }));
    }

    #[test]
    fn unauthenticated_redirects_to_login_with_origin() {
        assert_eq!(
            protected_route(&AuthState::Unauthenticated, "/owner/vehicles"),
            RouteDecision::RedirectToLogin {
                from: "/owner/vehicles".to_string()
            }
        );
    }

    #[test]
    fn matching_role_is_allowed() {
        let state = AuthState::Authenticated(json!({ "roles": ["courier"] }));
        assert_eq!(role_guard(&state, &["courier", "admin"]), RouteDecision::Allow);
    }

    #[test]
    fn mismatched_role_redirects_home() {
        let state = AuthState::Authenticated(json!({ "roles": ["customer"] }));
        assert_eq!(
            role_guard(&state, &["admin"]),
            RouteDecision::Redirect("/".to_string())
        );
    }

    #[test]
    fn roleless_user_falls_back_to_customer() {
        let state = AuthState::Authenticated(json!({ "email": "user@example.com" }));
        assert_eq!(role_guard(&state, &["customer"]), RouteDecision::Allow);
        assert_eq!(
            role_guard(&state, &["admin"]),
            RouteDecision::Redirect("/".to_string())
        );
    }

    #[test]
    fn namespaced_claims_grant_access() {
        let state = AuthState::Authenticated(json!({
            "https://schemas.example.com/roles": ["Owner"]
        }));
        assert_eq!(role_guard(&state, &["owner"]), RouteDecision::Allow);
    }
}
