use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;

use application::service::{ActivityService, StudentActivityService};
use kernel::interface::query::DependOnBookQuery;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;

use self::{request::*, response::*};

mod request;
mod response;

pub trait ActivityRouter {
    fn route_activity(self) -> Self;
}

impl<DB> ActivityRouter for Router<AppModule<DB>>
where
    DB: DependOnBookQuery,
{
    fn route_activity(self) -> Self {
        self.route(
            "/activity",
            get(|State(module): State<AppModule<DB>>| async move {
                Controller::new(Transformer, Presenter)
                    .intake(ActivityRequest::All)
                    .handle(|filter| async move { module.database().get_activity(filter).await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/titles/:title/activity",
            get(
                |State(module): State<AppModule<DB>>, Path(title): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(ActivityRequest::Title(title))
                        .handle(|filter| async move { module.database().get_activity(filter).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/authors/:author/activity",
            get(
                |State(module): State<AppModule<DB>>, Path(author): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(ActivityRequest::Author(author))
                        .handle(|filter| async move { module.database().get_activity(filter).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/students/:student/activity",
            get(
                |State(module): State<AppModule<DB>>, Path(student): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(StudentActivityRequest::new(student))
                        .handle(|dto| async move {
                            module.database().get_student_activity(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
