// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Principal resolution.
//!
//! The `SecurityContext` trait is the seam between the dispatcher and
//! whatever authentication mechanism fronts it. The production
//! implementation resolves an HS256 bearer token; tests substitute fakes.

use crate::config::Config;
use crate::core::errors::PlatformError;
use crate::security::principal::Principal;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Resolves the authenticated caller for the current request.
pub trait SecurityContext: Send + Sync {
    /// Returns the current principal, or `PlatformError::Unauthenticated`
    /// when none is resolvable.
    fn authenticated_user(&self) -> Result<Principal, PlatformError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    #[serde(default)]
    permissions: Vec<String>,
}

/// Request-scoped security context backed by a signed bearer token.
///
/// Constructed per request with the raw `Authorization` value handed over by
/// the transport layer. Verification covers signature, expiry, and, when the
/// deployment configures one, the expected audience.
pub struct JwtSecurityContext {
    secret: Option<String>,
    expected_audience: Option<Vec<String>>,
    bearer: Option<String>,
}

impl JwtSecurityContext {
    pub fn new(
        secret: Option<String>,
        expected_audience: Option<Vec<String>>,
        bearer: Option<&str>,
    ) -> Self {
        Self {
            secret,
            expected_audience,
            bearer: bearer.map(str::to_string),
        }
    }

    pub fn from_config(config: &Config, bearer: Option<&str>) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            config.expected_audience.clone(),
            bearer,
        )
    }
}

impl SecurityContext for JwtSecurityContext {
    fn authenticated_user(&self) -> Result<Principal, PlatformError> {
        let secret = self.secret.as_deref().ok_or_else(|| {
            PlatformError::Unauthenticated("no token verification key configured".to_string())
        })?;
        let bearer = self
            .bearer
            .as_deref()
            .ok_or_else(|| PlatformError::Unauthenticated("missing bearer token".to_string()))?;
        let token = bearer.strip_prefix("Bearer ").unwrap_or(bearer);

        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(expected) = &self.expected_audience {
            validation.set_audience(expected);
        }

        let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .map_err(|e| PlatformError::Unauthenticated(format!("invalid token: {}", e)))?;

        Ok(Principal::new(data.claims.sub, data.claims.permissions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "test-secret";

    fn token_with(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> usize {
        (crate::utils::time::now() as usize) + 3600
    }

    #[test]
    fn valid_token_yields_principal_with_permissions() {
        let token = token_with(json!({
            "sub": "mifos",
            "exp": future_exp(),
            "permissions": ["READ_SAVINGSACCOUNT"],
        }));
        let ctx = JwtSecurityContext::new(Some(SECRET.to_string()), None, Some(&token));
        let principal = ctx.authenticated_user().unwrap();
        assert_eq!(principal.username(), "mifos");
        assert!(principal.has_permission("READ_SAVINGSACCOUNT"));
    }

    #[test]
    fn bearer_prefix_is_accepted() {
        let token = token_with(json!({"sub": "mifos", "exp": future_exp()}));
        let header = format!("Bearer {}", token);
        let ctx = JwtSecurityContext::new(Some(SECRET.to_string()), None, Some(&header));
        assert!(ctx.authenticated_user().is_ok());
    }

    #[test]
    fn missing_token_is_unauthenticated() {
        let ctx = JwtSecurityContext::new(Some(SECRET.to_string()), None, None);
        assert!(matches!(
            ctx.authenticated_user(),
            Err(PlatformError::Unauthenticated(_))
        ));
    }

    #[test]
    fn missing_secret_is_unauthenticated() {
        let ctx = JwtSecurityContext::new(None, None, Some("whatever"));
        assert!(matches!(
            ctx.authenticated_user(),
            Err(PlatformError::Unauthenticated(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = token_with(json!({"sub": "mifos", "exp": 1000}));
        let ctx = JwtSecurityContext::new(Some(SECRET.to_string()), None, Some(&token));
        assert!(matches!(
            ctx.authenticated_user(),
            Err(PlatformError::Unauthenticated(_))
        ));
    }

    #[test]
    fn audience_mismatch_is_rejected() {
        let token = token_with(json!({
            "sub": "mifos",
            "exp": future_exp(),
            "aud": "other-deployment",
        }));
        let ctx = JwtSecurityContext::new(
            Some(SECRET.to_string()),
            Some(vec!["ledger-gate".to_string()]),
            Some(&token),
        );
        assert!(ctx.authenticated_user().is_err());

        let token = token_with(json!({
            "sub": "mifos",
            "exp": future_exp(),
            "aud": "ledger-gate",
        }));
        let ctx = JwtSecurityContext::new(
            Some(SECRET.to_string()),
            Some(vec!["ledger-gate".to_string()]),
            Some(&token),
        );
        assert!(ctx.authenticated_user().is_ok());
    }

    #[test]
    fn wrong_signature_is_rejected() {
        let token = encode(
            &Header::default(),
            &json!({"sub": "mifos", "exp": future_exp()}),
            &EncodingKey::from_secret(b"other-secret"),
        )
        .unwrap();
        let ctx = JwtSecurityContext::new(Some(SECRET.to_string()), None, Some(&token));
        assert!(matches!(
            ctx.authenticated_user(),
            Err(PlatformError::Unauthenticated(_))
        ));
    }
}
