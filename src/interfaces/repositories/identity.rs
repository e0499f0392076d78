use async_trait::async_trait;

use crate::{
    entities::session::{ProviderUser, SessionIdentity},
    errors::{AppError, AuthError},
};

/// The external identity provider: session-token verification plus user
/// lookup over its backend API. Behind a trait so use cases can be exercised
/// without the real service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn verify_session(&self, token: &str) -> Result<SessionIdentity, AuthError>;
    async fn fetch_user(&self, clerk_id: &str) -> Result<ProviderUser, AppError>;
}
