//! Sign-up and verification code handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};

use crate::api::AppState;
use crate::config::{MSG_CODE_RESENT, MSG_REGISTERED, MSG_REGISTRATION_FAILED};
use crate::domain::{ResendVerification, SignUp};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, Created};

/// Create sign-up routes
pub fn sign_up_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/resend-verification", post(resend_verification))
}

/// Malformed bodies are server-side failures for these routes.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload.map(|Json(body)| body).map_err(|e| AppError::Unexpected {
        message: MSG_REGISTRATION_FAILED,
        detail: e.body_text(),
    })
}

/// Register a new user or refresh an unverified one
#[utoipa::path(
    post,
    path = "/api/sign-up",
    tag = "Registration",
    request_body = SignUp,
    responses(
        (status = 201, description = "User registered, verification email sent", body = ApiResponse),
        (status = 400, description = "Username or email already taken", body = ApiResponse),
        (status = 500, description = "Email dispatch or internal failure", body = ApiResponse)
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUp>, JsonRejection>,
) -> AppResult<Created> {
    let request = parse_body(payload)?;

    state
        .registration_service
        .register(request)
        .await
        .and_then(|outcome| outcome.into_result())
        .map_err(|e| e.masked(MSG_REGISTRATION_FAILED))?;

    Ok(Created(MSG_REGISTERED.to_string()))
}

/// Send a fresh verification code to an unverified user
#[utoipa::path(
    post,
    path = "/api/resend-verification",
    tag = "Registration",
    request_body = ResendVerification,
    responses(
        (status = 200, description = "Verification email sent", body = ApiResponse),
        (status = 400, description = "User is already verified", body = ApiResponse),
        (status = 404, description = "No user with this email", body = ApiResponse),
        (status = 500, description = "Email dispatch or internal failure", body = ApiResponse)
    )
)]
pub async fn resend_verification(
    State(state): State<AppState>,
    payload: Result<Json<ResendVerification>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse>)> {
    let request = parse_body(payload)?;

    state
        .registration_service
        .resend_verification(&request.email)
        .await
        .and_then(|outcome| outcome.into_result())
        .map_err(|e| e.masked(MSG_REGISTRATION_FAILED))?;

    Ok((StatusCode::OK, Json(ApiResponse::success(MSG_CODE_RESENT))))
}
