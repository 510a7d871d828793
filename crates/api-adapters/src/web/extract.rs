use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Request body accepted either as JSON or as an urlencoded form, chosen by
/// `Content-Type`. Browsers posting the board's HTML forms send the latter.
///
/// A missing or blank body deserializes as if every field were absent, so
/// `#[serde(default)]` fields reach the handler empty. Only a body that is
/// present and malformed is rejected.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_ascii_lowercase);

        if content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
        {
            let Form(body) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            return Ok(Self(body));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        if bytes.trim_ascii().is_empty() {
            return empty_body().map(Self);
        }

        match content_type.as_deref() {
            Some(value) if value.starts_with("application/json") => {
                let Json(body) = Json::<T>::from_bytes(&bytes)
                    .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
                Ok(Self(body))
            }
            Some(value) => Err(ApiError::BadRequest(format!(
                "unsupported content type `{value}`"
            ))),
            None => Err(ApiError::BadRequest(
                "request body needs a `Content-Type` of application/json or \
                 application/x-www-form-urlencoded"
                    .to_string(),
            )),
        }
    }
}

fn empty_body<T: DeserializeOwned>() -> Result<T, ApiError> {
    serde_json::from_value(serde_json::Value::Object(serde_json::Map::new()))
        .map_err(|err| ApiError::BadRequest(err.to_string()))
}
