//! Role resolution and routing policy for ClickDelivery
//!
//! Identity providers deliver role information in more than one shape:
//! a plain `roles` array, or arrays under namespaced claim keys such as
//! `https://schemas.example.com/roles`. Every claim-shape assumption
//! lives in this crate so a provider change touches one place.

pub mod guards;
pub mod jwt;

use serde_json::Value;

/// Supported roles in priority order, highest first.
pub const SUPPORTED_ROLES: [&str; 5] = ["admin", "owner", "restaurant", "courier", "customer"];

/// Landing path when no role matches.
pub const DEFAULT_DASHBOARD_PATH: &str = "/customer/dashboard";

/// Extracts the normalized role list from a user/claims object.
///
/// Collects `roles` when it is an array of strings, plus every other
/// key whose name contains `"roles"` and whose value is an array of
/// strings. The result is lowercased and deduplicated, preserving
/// first-seen order. Never fails; a missing user yields an empty list.
pub fn get_user_roles(user: Option<&Value>) -> Vec<String> {
    collect_roles(user, None)
}

/// Like [`get_user_roles`], but with a manually forced role prepended.
///
/// Only compiled under the `role-override` feature; production builds
/// have no override path at all.
#[cfg(feature = "role-override")]
pub fn get_user_roles_with_override(user: Option<&Value>, override_role: Option<&str>) -> Vec<String> {
    collect_roles(user, override_role)
}

fn collect_roles(user: Option<&Value>, override_role: Option<&str>) -> Vec<String> {
    let mut collected: Vec<String> = Vec::new();

    if let Some(role) = override_role {
        collected.push(role.to_string());
    }

    if let Some(Value::Object(claims)) = user {
        if let Some(roles) = claims.get("roles").and_then(string_array) {
            collected.extend(roles);
        }
        for (key, value) in claims {
            if key == "roles" || !key.contains("roles") {
                continue;
            }
            if let Some(roles) = string_array(value) {
                collected.extend(roles);
            }
        }
    }

    let mut normalized: Vec<String> = Vec::new();
    for role in collected {
        let role = role.to_lowercase();
        if !normalized.contains(&role) {
            normalized.push(role);
        }
    }
    normalized
}

/// Returns the values of `value` when it is an array of strings only.
fn string_array(value: &Value) -> Option<Vec<String>> {
    let array = value.as_array()?;
    array
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Picks the landing dashboard for a user's highest-priority role.
///
/// Priority: admin > owner > restaurant > courier > customer, falling
/// back to the customer dashboard. Deterministic and total.
pub fn get_primary_dashboard_path(user: Option<&Value>) -> String {
    primary_dashboard_for_roles(&get_user_roles(user))
}

/// Same policy applied to an already-normalized role list.
pub fn primary_dashboard_for_roles(roles: &[String]) -> String {
    for role in SUPPORTED_ROLES {
        if roles.iter().any(|r| r == role) {
            return format!("/{role}/dashboard");
        }
    }
    DEFAULT_DASHBOARD_PATH.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_user_has_no_roles() {
        assert!(get_user_roles(None).is_empty());
        assert!(get_user_roles(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn reads_direct_roles_array() {
        let user = json!({ "roles": ["Customer", "courier"] });
        assert_eq!(get_user_roles(Some(&user)), vec!["customer", "courier"]);
    }

    #[test]
    fn reads_namespaced_roles_claims() {
        let user = json!({
            "email": "user@example.com",
            "https://schemas.example.com/roles": ["Owner"],
            "app_roles": ["courier"]
        });
        let roles = get_user_roles(Some(&user));
        assert!(roles.contains(&"owner".to_string()));
        assert!(roles.contains(&"courier".to_string()));
    }

    #[test]
    fn deduplicates_and_lowercases() {
        let user = json!({
            "roles": ["ADMIN", "admin", "Admin"],
            "https://schemas.example.com/roles": ["admin"]
        });
        assert_eq!(get_user_roles(Some(&user)), vec!["admin"]);
    }

    #[test]
    fn ignores_non_string_arrays_and_non_arrays() {
        let user = json!({
            "roles": "customer",
            "more_roles": [1, 2, 3],
            "mixed_roles": ["courier", 5]
        });
        assert!(get_user_roles(Some(&user)).is_empty());
    }

    #[test]
    fn admin_wins_regardless_of_other_roles() {
        let user = json!({ "roles": ["customer", "courier", "admin", "owner"] });
        assert_eq!(get_primary_dashboard_path(Some(&user)), "/admin/dashboard");
    }

    #[test]
    fn priority_order_is_respected() {
        let user = json!({ "roles": ["courier", "owner"] });
        assert_eq!(get_primary_dashboard_path(Some(&user)), "/owner/dashboard");

        let user = json!({ "roles": ["customer", "restaurant"] });
        assert_eq!(get_primary_dashboard_path(Some(&user)), "/restaurant/dashboard");
    }

    #[test]
    fn defaults_to_customer_dashboard() {
        assert_eq!(get_primary_dashboard_path(None), "/customer/dashboard");
        let user = json!({ "roles": ["unknown-role"] });
        assert_eq!(get_primary_dashboard_path(Some(&user)), "/customer/dashboard");
    }

    #[cfg(feature = "role-override")]
    #[test]
    fn override_role_comes_first() {
        let user = json!({ "roles": ["customer"] });
        let roles = get_user_roles_with_override(Some(&user), Some("Admin"));
        assert_eq!(roles, vec!["admin", "customer"]);
    }
}
