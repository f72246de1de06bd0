//! # mb-auth-jwt
//!
//! Argon2 + HS256 bearer-token implementation of `AuthProvider`.
//! Token verification produces the `Principal` the core trusts; the core
//! itself never touches signatures or hashes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mb_core::{AppError, AuthProvider, Principal, Result, Role, User};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    username: String,
    role: Role,
    iat: i64,
    exp: i64,
}

pub struct JwtAuthProvider {
    encoding: EncodingKey,
    decoding: DecodingKey,
    token_ttl: Duration,
}

impl JwtAuthProvider {
    pub fn new(secret: &str, token_ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: Duration::seconds(token_ttl_secs),
        }
    }
}

impl AuthProvider for JwtAuthProvider {
    fn hash_password(&self, raw: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| AppError::Transport(format!("password hashing failed: {err}")))
    }

    fn verify_password(&self, raw: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default().verify_password(raw.as_bytes(), &parsed).is_ok()
    }

    fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| AppError::Transport(format!("token signing failed: {err}")))
    }

    fn verify_token(&self, token: &str) -> Result<Principal> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AppError::Unauthorized("invalid or expired token".to_string()))?;
        let id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("malformed token subject".to_string()))?;
        Ok(Principal {
            id,
            username: data.claims.username,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> JwtAuthProvider {
        JwtAuthProvider::new("dev-secret", 3600)
    }

    fn user() -> User {
        User::new(
            "funkyshrimp".into(),
            "shrimp@example.com".into(),
            "unused".into(),
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn password_roundtrip() {
        let auth = provider();
        let hash = auth.hash_password("sAucisse6!").unwrap();
        assert!(auth.verify_password("sAucisse6!", &hash));
        assert!(!auth.verify_password("wrong", &hash));
        assert!(!auth.verify_password("sAucisse6!", "not-a-hash"));
    }

    #[test]
    fn token_roundtrip_carries_principal() {
        let auth = provider();
        let user = user();
        let token = auth.issue_token(&user).unwrap();
        let principal = auth.verify_token(&token).unwrap();
        assert_eq!(principal.id, user.id);
        assert_eq!(principal.username, "funkyshrimp");
        assert_eq!(principal.role, Role::User);
    }

    #[test]
    fn foreign_token_is_rejected() {
        let auth = provider();
        let other = JwtAuthProvider::new("another-secret", 3600);
        let token = other.issue_token(&user()).unwrap();
        let err = auth.verify_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(matches!(
            auth.verify_token("garbage").unwrap_err(),
            AppError::Unauthorized(_)
        ));
    }
}
