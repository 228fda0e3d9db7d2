//! Account endpoints: signup, login, profile and account removal.

use api_types::{
    Message,
    user::{Login, LoginResponse, ProfileUpdate, Signup, User},
};
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{ServerError, identity::Identity, server::ServerState};

pub(crate) fn to_api_user(user: engine::User) -> User {
    User {
        id: user.id,
        name: user.name,
        email: user.email,
        currency: user.currency.to_string(),
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub async fn signup(
    State(state): State<ServerState>,
    payload: Result<Json<Signup>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ServerError> {
    let Json(payload) = payload?;

    let user = state
        .engine
        .signup(engine::Signup {
            name: payload.name.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            password: payload.password.unwrap_or_default(),
            currency: payload.currency,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(to_api_user(user))))
}

pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<Login>, JsonRejection>,
) -> Result<Json<LoginResponse>, ServerError> {
    let Json(payload) = payload?;

    let user = state
        .engine
        .login(
            payload.email.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
        .await?;
    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: user.id,
        user: to_api_user(user),
    }))
}

pub async fn profile(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<Json<User>, ServerError> {
    let user = state.engine.profile(identity.user_id).await?;
    Ok(Json(to_api_user(user)))
}

pub async fn update_profile(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<User>, ServerError> {
    let Json(payload) = payload?;

    let user = state
        .engine
        .update_profile(
            identity.user_id,
            engine::ProfileUpdate {
                email: payload.email,
                currency: payload.currency,
            },
        )
        .await?;

    Ok(Json(to_api_user(user)))
}

pub async fn delete_account(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_user(identity.user_id).await?;
    Ok(Json(Message::new("Account deleted successfully")))
}
