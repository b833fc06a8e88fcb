/// JWT Authentication Middleware
///
/// Validates the bearer token from the Authorization header, checks it
/// against the user's current token version, and injects the claims into
/// request extensions for the route handlers. Rejections are answered here
/// as regular responses so outer middleware still decorates them.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;
use std::sync::Arc;

use crate::auth::{verify_token, Claims};
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};
use crate::store::UserStore;

/// Auth gate for protected routes
pub struct JwtMiddleware {
    jwt_config: JwtSettings,
    users: Arc<dyn UserStore>,
}

impl JwtMiddleware {
    pub fn new(jwt_config: JwtSettings, users: Arc<dyn UserStore>) -> Self {
        Self { jwt_config, users }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtMiddlewareService {
            service: Rc::new(service),
            jwt_config: self.jwt_config.clone(),
            users: self.users.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    jwt_config: JwtSettings,
    users: Arc<dyn UserStore>,
}

/// Token following the `Bearer ` prefix, if the header has that shape.
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let users = self.users.clone();
        let token = bearer_token(&req);
        let claims = token
            .as_deref()
            .map(|token| verify_token(token, &self.jwt_config));

        Box::pin(async move {
            let authenticated = authenticate(claims, users.as_ref(), req.path()).await;
            match authenticated {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}

/// Outcome of token verification checked against the user's current token version.
async fn authenticate(
    claims: Option<Result<Claims, AuthError>>,
    users: &dyn UserStore,
    path: &str,
) -> Result<Claims, AppError> {
    let claims = match claims {
        None => {
            tracing::warn!(path = %path, "Missing or malformed Authorization header");
            return Err(AppError::Auth(AuthError::MissingToken));
        }
        Some(Err(e)) => return Err(AppError::Auth(e)),
        Some(Ok(claims)) => claims,
    };

    let user_id = claims.user_id()?;
    match users.find_by_id(user_id).await? {
        Some(user) if user.token_version == claims.ver => {}
        Some(_) => {
            tracing::info!(user_id = %user_id, "Rejected token from before logout-all");
            return Err(AppError::Auth(AuthError::InvalidToken));
        }
        None => {
            tracing::warn!(user_id = %user_id, "Token subject no longer exists");
            return Err(AppError::Auth(AuthError::InvalidToken));
        }
    }

    tracing::debug!(user_id = %user_id, "JWT validated successfully");
    Ok(claims)
}
