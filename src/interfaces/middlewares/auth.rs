use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{
    rc::Rc,
    task::{Context, Poll},
};

use crate::{errors::AuthError, repositories::identity::IdentityProvider, AppState};

/// Gate in front of every non-public route: a Bearer session token must
/// verify against the identity provider, and the resulting identity is made
/// available to handlers through request extensions.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let path = req.path();
            let method = req.method().as_str();

            if is_public_route(path, method) {
                return service.call(req).await;
            }

            let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
                tracing::error!("AppState missing in middleware");
                AuthError::MissingIdentityService
            })?;

            let token = extract_token(&req).ok_or_else(|| {
                tracing::warn!("Missing or malformed Authorization header");
                AuthError::MissingCredentials
            })?;

            let identity = match state.identity.verify_session(&token) {
                Ok(identity) => identity,
                Err(AuthError::TokenExpired) => {
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::Unauthorized().json(serde_json::json!({
                            "error": "Session expired"
                        })),
                    ));
                }
                Err(_) => {
                    tracing::warn!("Session token failed verification");
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::Unauthorized().json(serde_json::json!({
                            "error": "Missing or invalid credentials"
                        })),
                    ));
                }
            };

            req.extensions_mut().insert(identity);
            service.call(req).await
        })
    }
}

/// Marketing-page data is readable by anyone; only comment submission and the
/// profile editor require a session.
fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    match (path, method) {
        ("/", "GET") | ("/health", "GET") | ("/api/comments", "GET") => true,
        _ => method == "GET" && path.starts_with("/api/projects"),
    }
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_paths_are_public() {
        assert!(is_public_route("/", "GET"));
        assert!(is_public_route("/health", "GET"));
        assert!(is_public_route("/api/projects", "GET"));
        assert!(is_public_route("/api/projects/some-slug", "GET"));
        assert!(is_public_route("/api/comments", "GET"));
        assert!(is_public_route("/api/profile", "OPTIONS"));
    }

    #[test]
    fn mutations_and_profile_require_a_session() {
        assert!(!is_public_route("/api/comments", "POST"));
        assert!(!is_public_route("/api/profile", "GET"));
        assert!(!is_public_route("/api/profile", "POST"));
    }
}
