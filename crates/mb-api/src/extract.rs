//! Bearer-token extractor. Every protected handler takes a `CurrentUser`
//! argument; the token is verified by the injected `AuthProvider` and the
//! resulting `Principal` is trusted from there on.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};

use mb_core::{AppError, Principal};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(principal_from_request(req).map(CurrentUser))
    }
}

fn principal_from_request(req: &HttpRequest) -> Result<Principal, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Transport("application state not configured".to_string()))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("malformed authorization header".to_string()))?;

    Ok(state.auth.verify_token(token)?)
}
