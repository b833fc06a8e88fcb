/// Authentication Routes
///
/// Registration, login, current-user lookup and logout-everywhere.

use actix_web::{web, HttpResponse};

use crate::auth::{hash_password, issue_token, verify_password, Claims};
use crate::configuration::{JwtSettings, PasswordSettings};
use crate::error::{AppError, AuthError, ValidationError};
use crate::models::NewUser;
use crate::schema::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::store::UserStore;
use crate::validators::{parse_email, parse_name, parse_password, required};

/// POST /api/auth/register
///
/// # Validation
/// - Email must match the email pattern and not already be registered
/// - Password must satisfy the composed strength rule
/// - Name is optional
///
/// # Errors
/// - 400: Validation errors
/// - 409: Email already registered
pub async fn register(
    form: web::Json<RegisterRequest>,
    users: web::Data<dyn UserStore>,
    password_config: web::Data<PasswordSettings>,
) -> Result<HttpResponse, AppError> {
    let name = parse_name(form.name.as_deref())?;
    let email = parse_email(form.email.as_deref())?;
    let password = parse_password(form.password.as_deref())?;
    let password_hash = hash_password(&password, password_config.hash_cost)?;

    let user = users
        .insert(NewUser {
            name,
            email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "User registered successfully");

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// POST /api/auth/login
///
/// # Errors
/// - 400: Missing email or password
/// - 401: Unknown email or wrong password (same message for both, so
///   accounts cannot be enumerated)
pub async fn login(
    form: web::Json<LoginRequest>,
    users: web::Data<dyn UserStore>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let email = required("email", form.email.as_deref())?.to_lowercase();
    let password = match form.password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ValidationError::MissingField("password").into()),
    };

    let user = users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::Auth(AuthError::InvalidCredentials));
    }

    let token = issue_token(&user, jwt_config.get_ref())?;

    tracing::info!(user_id = %user.id, "User logged in successfully");

    Ok(HttpResponse::Ok().json(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: jwt_config.access_token_expiry,
    }))
}

/// GET /api/auth/me
///
/// **Requires a valid token**; claims are injected by the auth gate.
pub async fn get_current_user(
    claims: web::ReqData<Claims>,
    users: web::Data<dyn UserStore>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidToken))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// POST /api/auth/logout-all
///
/// Bumps the caller's token version so every token issued so far, including
/// the one used for this request, stops working.
pub async fn logout_all(
    claims: web::ReqData<Claims>,
    users: web::Data<dyn UserStore>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;
    let version = users.bump_token_version(user_id).await?;

    tracing::info!(user_id = %user_id, token_version = version, "All sessions revoked");

    Ok(HttpResponse::NoContent().finish())
}
