use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::Redirect;

use crate::config::AuthConfig;

/// Student name forwarded by the sign-on proxy.
///
/// Requests without the header are redirected to the configured fallback page
/// before the handler runs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AuthenticatedStudent(String);

impl AuthenticatedStudent {
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedStudent
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AuthConfig::from_ref(state);
        let student = parts
            .headers
            .get(config.header())
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());
        match student {
            Some(student) => Ok(Self(student.to_string())),
            None => {
                tracing::debug!(uri = %parts.uri, "request without identity, redirecting");
                Err(Redirect::to(config.fallback()))
            }
        }
    }
}
