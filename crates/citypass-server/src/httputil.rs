//! Response envelope and request decoding shared by every handler
//!
//! All endpoints answer with the same envelope:
//! `{ status_code, messages, process_time, data }`, where `process_time` is
//! the elapsed request time in seconds and `status_code` repeats either 200
//! or the application error code from [`AppError::codes`].

use std::time::Instant;

use axum::async_trait;
use axum::extract::{Form, FromRequest, Request};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use citypass_core::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<T: Serialize> {
    status_code: u32,
    messages: Vec<String>,
    process_time: f64,
    data: T,
}

/// Success envelope, always HTTP 200.
pub fn ok<T: Serialize>(started: Instant, messages: &[&str], data: T) -> Response {
    let body = Envelope {
        status_code: 200,
        messages: messages.iter().map(|m| m.to_string()).collect(),
        process_time: started.elapsed().as_secs_f64(),
        data,
    };
    Json(body).into_response()
}

/// Error envelope; HTTP status and the embedded code come from the error's
/// code table, the message from its display text.
pub fn error(started: Instant, err: AppError) -> Response {
    let codes = err.codes();
    let body = Envelope {
        status_code: codes.status,
        messages: vec![err.to_string()],
        process_time: started.elapsed().as_secs_f64(),
        data: serde_json::Value::Null,
    };
    let http = StatusCode::from_u16(codes.http).unwrap_or(StatusCode::BAD_REQUEST);
    (http, Json(body)).into_response()
}

/// Decode-failure envelope. `data` carries an empty instance of the expected
/// request shape so callers can see the field names they should have sent.
fn decode_error<T: Serialize + Default>(started: Instant) -> Response {
    let err = AppError::Decode;
    let codes = err.codes();
    let body = Envelope {
        status_code: codes.status,
        messages: vec![err.to_string()],
        process_time: started.elapsed().as_secs_f64(),
        data: T::default(),
    };
    let http = StatusCode::from_u16(codes.http).unwrap_or(StatusCode::BAD_REQUEST);
    (http, Json(body)).into_response()
}

/// Checks the static access token on protected routes. The header must be
/// `Authorization: Bearer <token>` with an exact token match.
pub fn require_access_token(
    headers: &axum::http::HeaderMap,
    access_token: &str,
) -> Result<(), AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidAuthToken)?;

    if token != access_token {
        return Err(AppError::InvalidAuthToken);
    }
    Ok(())
}

/// Request-body extractor accepting either JSON or a url-encoded form,
/// switched on the Content-Type header. Anything else, or a body that fails
/// to decode, is rejected with the decode-error envelope.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Serialize + Default + Send + 'static,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let started = Instant::now();

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if content_type.contains("application/json") {
            return match Json::<T>::from_request(req, state).await {
                Ok(Json(value)) => Ok(Self(value)),
                Err(_) => Err(decode_error::<T>(started)),
            };
        }

        if content_type.contains("application/x-www-form-urlencoded") {
            return match Form::<T>::from_request(req, state).await {
                Ok(Form(value)) => Ok(Self(value)),
                Err(_) => Err(decode_error::<T>(started)),
            };
        }

        Err(decode_error::<T>(started))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn access_token_must_match_exactly() {
        let headers = headers_with_auth("Bearer AccessToken");
        assert!(require_access_token(&headers, "AccessToken").is_ok());

        let headers = headers_with_auth("Bearer wrong");
        assert_eq!(
            require_access_token(&headers, "AccessToken").unwrap_err(),
            AppError::InvalidAuthToken
        );
    }

    #[test]
    fn access_token_requires_the_bearer_scheme() {
        let headers = headers_with_auth("AccessToken");
        assert_eq!(
            require_access_token(&headers, "AccessToken").unwrap_err(),
            AppError::InvalidAuthToken
        );

        assert_eq!(
            require_access_token(&HeaderMap::new(), "AccessToken").unwrap_err(),
            AppError::InvalidAuthToken
        );
    }
}
