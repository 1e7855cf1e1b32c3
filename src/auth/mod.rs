//! Session and role context.
//!
//! Authentication itself is external: tokens are minted by the identity
//! provider and this service only consumes them. A decoded token yields a
//! [`Session`] value that is threaded explicitly into every domain-service
//! call; the services perform the role and company checks themselves rather
//! than relying on route visibility.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::AppState;

/// Role names carried in token claims
pub mod roles {
    /// Curates the global catalog (categories, types, products, templates)
    pub const ADMIN: &str = "admin";
    /// Manages a single company's catalog (import, pricing, activation)
    pub const OPERATOR: &str = "operator";
}

/// JWT claims accepted from the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Company the operator belongs to; absent for pure admins
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated identity plus coarse role flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
    pub company_id: Option<String>,
    pub roles: Vec<String>,
}

impl Session {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(roles::ADMIN)
    }

    pub fn is_operator(&self) -> bool {
        self.has_role(roles::OPERATOR)
    }

    /// Any catalog-facing role; reads require at least this.
    pub fn require_staff(&self) -> Result<(), ServiceError> {
        if self.is_admin() || self.is_operator() {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(
                "This operation requires an admin or operator role".to_string(),
            ))
        }
    }

    pub fn require_admin(&self) -> Result<(), ServiceError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(
                "This operation requires the admin role".to_string(),
            ))
        }
    }

    /// Operators may only touch their own company's rows; admins pass.
    pub fn require_company_access(&self, company_id: &str) -> Result<(), ServiceError> {
        if self.is_admin() {
            return Ok(());
        }
        if self.is_operator() && self.company_id.as_deref() == Some(company_id) {
            return Ok(());
        }
        Err(ServiceError::Forbidden(format!(
            "No access to company '{}'",
            company_id
        )))
    }
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Session {
            user_id: claims.sub,
            email: claims.email,
            company_id: claims.company_id,
            roles: claims.roles,
        }
    }
}

/// Validates inbound bearer tokens and (for tests and tooling) mints them.
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Session, ServiceError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| ServiceError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(data.claims.into())
    }

    pub fn issue_token(&self, session: &Session, ttl: Duration) -> Result<String, ServiceError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: session.user_id.clone(),
            email: session.email.clone(),
            company_id: session.company_id.clone(),
            roles: session.roles.clone(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| ServiceError::InternalError(format!("Failed to issue token: {}", e)))
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_service: &Arc<AuthService> = &state.auth;

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ServiceError::Unauthorized("Missing Authorization header".to_string())
            })?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ServiceError::Unauthorized("Expected a bearer token".to_string()))?
            .trim();

        auth_service.validate_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator() -> Session {
        Session {
            user_id: "user-1".to_string(),
            email: None,
            company_id: Some("company-1".to_string()),
            roles: vec![roles::OPERATOR.to_string()],
        }
    }

    #[test]
    fn token_round_trip() {
        let auth = AuthService::new("test-secret");
        let token = auth
            .issue_token(&operator(), Duration::from_secs(60))
            .unwrap();
        let session = auth.validate_token(&token).unwrap();
        assert_eq!(session.user_id, "user-1");
        assert!(session.is_operator());
        assert!(!session.is_admin());
    }

    #[test]
    fn company_access_scoped_to_own_company() {
        let session = operator();
        assert!(session.require_company_access("company-1").is_ok());
        assert!(session.require_company_access("company-2").is_err());
    }

    #[test]
    fn admin_passes_company_access() {
        let session = Session {
            user_id: "admin-1".to_string(),
            email: None,
            company_id: None,
            roles: vec![roles::ADMIN.to_string()],
        };
        assert!(session.require_company_access("anything").is_ok());
        assert!(session.require_admin().is_ok());
    }
}
