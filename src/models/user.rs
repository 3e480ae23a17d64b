//! JWT claims for authenticated users
//!
//! Borrowers are referenced by id only (loan rows join the `users` table
//! for display names); the principal itself lives in the token.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    /// The "can mark returned" grant
    pub can_mark_returned: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Require the "can mark returned" grant.
    ///
    /// Author/book/copy mutations, the all-borrowed listing and loan renewal
    /// all share this single coarse permission.
    pub fn require_mark_returned(&self) -> Result<(), AppError> {
        if self.can_mark_returned {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "The 'can mark returned' permission is required".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(can_mark_returned: bool) -> UserClaims {
        UserClaims {
            sub: "testuser".to_string(),
            user_id: 1,
            can_mark_returned,
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: chrono::Utc::now().timestamp(),
        }
    }

    #[test]
    fn test_require_mark_returned() {
        assert!(claims(true).require_mark_returned().is_ok());
        assert!(claims(false).require_mark_returned().is_err());
    }

    #[test]
    fn test_token_round_trip() {
        let claims = claims(true);
        let token = claims.create_token("test-secret").unwrap();
        let parsed = UserClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(parsed.user_id, 1);
        assert!(parsed.can_mark_returned);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let token = claims(true).create_token("test-secret").unwrap();
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }
}
