// ABOUTME: Caller credential extraction for API requests
// ABOUTME: Reads the Authorization header so it can be forwarded to the lending API per request

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use lendflow_core::Credential;

use crate::error::AppError;

/// The caller's `Authorization` header, if one was sent
#[derive(Debug, Clone)]
pub struct CallerCredential(pub Option<Credential>);

impl CallerCredential {
    /// Require a credential, rejecting the request with 401 otherwise
    pub fn require(self) -> Result<Credential, AppError> {
        self.0.ok_or(AppError::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for CallerCredential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(Credential::new);

        Ok(Self(credential))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> CallerCredential {
        let (mut parts, _) = request.into_parts();
        CallerCredential::from_request_parts(&mut parts, &())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_header_forwarded_verbatim() {
        let request = Request::builder()
            .header("Authorization", "Bearer abc.def")
            .body(())
            .unwrap();

        let credential = extract(request).await.require().unwrap();
        assert_eq!(credential.header_value(), "Bearer abc.def");
    }

    #[tokio::test]
    async fn test_missing_or_blank_header() {
        let missing = extract(Request::builder().body(()).unwrap()).await;
        assert!(matches!(missing.require(), Err(AppError::Unauthorized)));

        let blank = extract(
            Request::builder()
                .header("Authorization", "  ")
                .body(())
                .unwrap(),
        )
        .await;
        assert!(blank.0.is_none());
    }
}
