use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{issue_token, AdminUser, SessionUser};
use crate::auth::store;
use crate::documents::validation::{email, max_len, min_len, required, FieldResult};
use crate::errors::AppError;
use crate::models::user::PublicUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: PublicUser,
    pub is_admin: bool,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_registration(req: &RegisterRequest) -> FieldResult {
    required("name", &req.name, "Name")?;
    min_len("name", &req.name, 2, "Name")?;
    max_len("name", req.name.trim(), 50, "Name")?;
    email("email", &req.email)?;
    required("password", &req.password, "Password")?;
    min_len("password", &req.password, 8, "Password")?;
    max_len("password", &req.password, 100, "Password")?;
    Ok(())
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    validate_registration(&req)?;

    let email = normalize_email(&req.email);
    let password_hash = hash_password(&req.password)?;

    let user = store::insert_user(&state.db, req.name.trim(), &email, &password_hash)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::Conflict("An account with this email already exists".to_string()))?;

    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = normalize_email(&req.email);
    let user = store::find_user_by_email(&state.db, &email)
        .await
        .map_err(AppError::Internal)?;

    let user = match user {
        Some(u) if verify_password(&req.password, &u.password_hash) => u,
        _ => {
            warn!("Failed login attempt");
            return Err(AppError::Unauthorized);
        }
    };

    let session = SessionUser {
        id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
    };
    let token = issue_token(
        &session,
        &state.config.session_secret,
        state.config.session_ttl_hours,
    )?;

    info!("User {} signed in", user.id);
    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/v1/auth/session
pub async fn handle_session(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<SessionResponse>, AppError> {
    // The account may have been removed after the token was issued.
    let user = store::find_user_by_id(&state.db, session.id)
        .await
        .map_err(AppError::Internal)?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(SessionResponse {
        is_admin: state.config.is_admin(&user.email),
        user: user.into(),
    }))
}

/// GET /api/v1/admin/users
pub async fn handle_list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let users = store::list_users(&state.db)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}
