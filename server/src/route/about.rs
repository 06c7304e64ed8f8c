use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AboutResponse {
    name: &'static str,
    version: &'static str,
    description: &'static str,
}

pub trait AboutRouter {
    fn route_about(self) -> Self;
}

impl<S> AboutRouter for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn route_about(self) -> Self {
        self.route(
            "/about",
            get(|| async {
                Json(AboutResponse {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                    description: "Tracks who registered, borrowed and returned library books",
                })
            }),
        )
    }
}
