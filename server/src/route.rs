use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;

use crate::handler::AppModule;

pub use self::{about::AboutRouter, activity::ActivityRouter, book::BookRouter};

mod about;
mod activity;
mod book;

pub fn app<DB>(module: AppModule<DB>) -> Router
where
    DB: DependOnBookQuery + DependOnBookModifier,
{
    Router::new()
        .route_book()
        .route_activity()
        .route_about()
        .layer(TraceLayer::new_for_http())
        // TODO: restrict allowed origins to the renderer's host
        .layer(CorsLayer::new())
        .with_state(module)
}
