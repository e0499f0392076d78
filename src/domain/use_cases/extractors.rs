use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{entities::session::SessionIdentity, errors::AuthError};

/// Extractor for the authenticated session, ensuring the caller passed the
/// session middleware. Returns 401 otherwise.
/// Usage: add `session: AuthSession` as a parameter to your handler function.
#[derive(Debug)]
pub struct AuthSession(pub SessionIdentity);

impl FromRequest for AuthSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<SessionIdentity>() {
            Some(identity) => ready(Ok(AuthSession(identity.clone()))),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn extracts_identity_inserted_by_middleware() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(SessionIdentity {
            clerk_id: "user_123".to_string(),
        });

        let session = AuthSession::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(session.0.clerk_id, "user_123");
    }

    #[actix_web::test]
    async fn rejects_requests_without_a_session() {
        let req = TestRequest::default().to_http_request();
        assert!(AuthSession::from_request(&req, &mut Payload::None).await.is_err());
    }
}
