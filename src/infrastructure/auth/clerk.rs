use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::StatusCode;

use crate::entities::session::{ProviderUser, SessionClaims, SessionIdentity};
use crate::errors::{AppError, AuthError};
use crate::repositories::identity::IdentityProvider;
use crate::settings::AppConfig;

const SESSION_ALGORITHM: Algorithm = Algorithm::RS256;

/// Clerk-backed identity provider: session JWTs are verified against the
/// instance's public key; user records are fetched from the backend API with
/// the secret key.
#[derive(Clone)]
pub struct ClerkClient {
    http: reqwest::Client,
    api_url: String,
    secret_key: String,
    decoding_key: DecodingKey,
}

impl ClerkClient {
    pub fn new(config: &AppConfig) -> Result<Self, AuthError> {
        let decoding_key = DecodingKey::from_rsa_pem(config.clerk_jwt_public_key.as_bytes())
            .map_err(|_| AuthError::InvalidVerificationKey)?;

        Ok(ClerkClient {
            http: reqwest::Client::new(),
            api_url: config.clerk_api_url.trim_end_matches('/').to_string(),
            secret_key: config.clerk_secret_key.clone(),
            decoding_key,
        })
    }
}

#[async_trait]
impl IdentityProvider for ClerkClient {
    fn verify_session(&self, token: &str) -> Result<SessionIdentity, AuthError> {
        let mut validation = Validation::new(SESSION_ALGORITHM);
        validation.validate_exp = true;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(AuthError::from)?;

        Ok(SessionIdentity {
            clerk_id: data.claims.sub,
        })
    }

    async fn fetch_user(&self, clerk_id: &str) -> Result<ProviderUser, AppError> {
        let url = format!("{}/users/{}", self.api_url, clerk_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Identity provider request failed: {}", e)))?;

        match response.status() {
            // A session whose user no longer exists at the provider cannot act.
            StatusCode::NOT_FOUND => Err(AppError::UnauthorizedAccess),
            status if status.is_success() => response
                .json::<ProviderUser>()
                .await
                .map_err(|e| AppError::InternalError(format!("Identity provider response malformed: {}", e))),
            status => Err(AppError::InternalError(format!(
                "Identity provider returned {}",
                status
            ))),
        }
    }
}
