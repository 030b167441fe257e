use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;

use crate::ServiceError;

/// `Json<T>` whose rejection is a [`ServiceError::BadRequest`], so malformed
/// bodies get the same structured error payload as every other failure.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ServiceError::BadRequest(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Login {
        username: String,
    }

    fn request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_json() {
        let JsonBody(login) = JsonBody::<Login>::from_request(request(r#"{"username":"admin"}"#), &())
            .await
            .unwrap();
        assert_eq!(login.username, "admin");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let err = JsonBody::<Login>::from_request(request("{not json"), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
