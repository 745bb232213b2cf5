//! Claim inspection for access tokens.
//!
//! The client only reads claims for navigation decisions; it does not
//! verify signatures. Authorization is enforced server-side.

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedToken {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    pub exp: i64,
    pub iat: i64,
}

/// Decodes a token's claims without verifying the signature.
/// Returns `None` for anything that is not a well-formed JWT.
pub fn decode_token(token: &str) -> Option<DecodedToken> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    decode::<DecodedToken>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}

/// A malformed token counts as expired.
pub fn is_token_expired(token: &str) -> bool {
    match decode_token(token) {
        Some(decoded) => decoded.exp < Utc::now().timestamp(),
        None => true,
    }
}

pub fn roles_from_token(token: &str) -> Vec<String> {
    decode_token(token)
        .and_then(|decoded| decoded.roles)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(exp: i64) -> String {
        use jsonwebtoken::{encode, EncodingKey, Header};
        let claims = DecodedToken {
            sub: "customer-1".to_string(),
            email: Some("customer@example.com".to_string()),
            name: None,
            roles: Some(vec!["customer".to_string()]),
            permissions: None,
            exp,
            iat: Utc::now().timestamp(),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap()
    }

    #[test]
    fn decodes_claims_without_verification() {
        let token = make_token(Utc::now().timestamp() + 3600);
        let decoded = decode_token(&token).unwrap();
        assert_eq!(decoded.sub, "customer-1");
        assert_eq!(decoded.roles, Some(vec!["customer".to_string()]));
    }

    #[test]
    fn expiry_check() {
        let live = make_token(Utc::now().timestamp() + 3600);
        assert!(!is_token_expired(&live));

        let stale = make_token(Utc::now().timestamp() - 60);
        assert!(is_token_expired(&stale));
    }

    #[test]
    fn garbage_is_expired_and_undecodable() {
        assert!(decode_token("not-a-jwt").is_none());
        assert!(is_token_expired("not-a-jwt"));
        assert!(roles_from_token("not-a-jwt").is_empty());
    }
}
