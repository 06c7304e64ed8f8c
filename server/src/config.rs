use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderName;
use error_stack::{Report, ResultExt};
use vodca::References;

use kernel::KernelError;

static BIND_ADDRESS: &str = "BIND_ADDRESS";
static AUTH_HEADER: &str = "AUTH_HEADER";
static AUTH_FALLBACK_URL: &str = "AUTH_FALLBACK_URL";
static LOG_DIR: &str = "LOG_DIR";
static RUST_LOG: &str = "RUST_LOG";

/// Settings read from the environment (or a `.env` file) at startup.
#[derive(Debug, Clone, References)]
pub struct AppConfig {
    bind: SocketAddr,
    log_dir: PathBuf,
    log_filter: String,
    auth: AuthConfig,
}

/// Where the sign-on proxy puts the student name, and where to send
/// requests that arrive without one.
#[derive(Debug, Clone, References)]
pub struct AuthConfig {
    header: HeaderName,
    fallback: String,
}

impl AuthConfig {
    pub fn new(
        header: impl AsRef<str>,
        fallback: impl Into<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let header = header.as_ref();
        let header = HeaderName::try_from(header)
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("`{header}` is not a valid header name"))?;
        let fallback = fallback.into();
        if fallback.trim().is_empty() {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("`{AUTH_FALLBACK_URL}` must not be empty")));
        }
        Ok(Self { header, fallback })
    }
}

impl AppConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        let bind = var_or(BIND_ADDRESS, "0.0.0.0:8080");
        let bind = bind
            .parse::<SocketAddr>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("`{BIND_ADDRESS}` is not a socket address: {bind}"))?;
        let auth = AuthConfig::new(
            var_or(AUTH_HEADER, "x-forwarded-user"),
            var_or(AUTH_FALLBACK_URL, "/about"),
        )?;
        Ok(Self {
            bind,
            log_dir: PathBuf::from(var_or(LOG_DIR, "./logs/")),
            log_filter: var_or(
                RUST_LOG,
                "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info",
            ),
            auth,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    dotenvy::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod test {
    use crate::config::AuthConfig;

    #[test]
    fn header_names_are_validated() {
        assert!(AuthConfig::new("x-forwarded-user", "/about").is_ok());
        assert!(AuthConfig::new("not a header", "/about").is_err());
        assert!(AuthConfig::new("x-forwarded-user", " ").is_err());
    }

    #[test]
    fn header_names_are_case_insensitive() {
        let config = AuthConfig::new("X-Forwarded-User", "/about").expect("valid header");
        assert_eq!(config.header().as_str(), "x-forwarded-user");
    }
}
