use axum::{
    body::Body,
    extract::{FromRequest, FromRequestParts, Path, Query, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
    Json,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use serde::de::DeserializeOwned;
use tracing::debug;

use shared_models::auth::Session;
use shared_models::error::AppError;

use crate::jwt::validate_token;
use crate::state::AppState;

/// Builds the request's [`Session`] and stores it in the extensions.
///
/// A bearer token, when present, must validate. Without one the request
/// runs as the anonymous front-desk session unless auth is required.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let session = if request.headers().contains_key(AUTHORIZATION) {
        let bearer = request
            .headers()
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))?;

        validate_token(bearer.token(), &state.config.jwt_secret).map_err(AppError::Auth)?
    } else if state.config.auth_required {
        return Err(AppError::Auth("Missing authorization header".to_string()));
    } else {
        Session::anonymous()
    };

    debug!("Request session: {} ({})", session.user_id, session.role);
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// `Json<T>` whose rejections are reported as 400 with the usual error body.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

/// `Path<T>` with JSON error bodies.
pub struct PathParams<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(PathParams(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

/// `Query<T>` with JSON error bodies.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(QueryParams(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}
