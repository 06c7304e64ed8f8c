use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{
    CreateBookService, GetBookService, LendBookService, ReturnBookService, SearchBookService,
};
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::identity::AuthenticatedStudent;

use self::{request::*, response::*};

mod request;
mod response;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<DB> BookRouter for Router<AppModule<DB>>
where
    DB: DependOnBookQuery + DependOnBookModifier,
{
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(|State(module): State<AppModule<DB>>| async move {
                Controller::new(Transformer, Presenter)
                    .intake(ListRequest::All)
                    .handle(|filter| async move { module.database().find_books(filter).await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<DB>>,
                 student: AuthenticatedStudent,
                 Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake((student, req))
                        .handle(|dto| async move { module.database().create_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id",
            get(
                |State(module): State<AppModule<DB>>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move { module.database().get_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(BookResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
        .route(
            "/books/:id/loans",
            post(
                |State(module): State<AppModule<DB>>,
                 student: AuthenticatedStudent,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(LendRequest::new(id, student))
                        .handle(|dto| async move { module.database().create_loan(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            // Anyone signed in may return a book, and every active loan is closed.
            .delete(
                |State(module): State<AppModule<DB>>,
                 _: AuthenticatedStudent,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(ReturnRequest::new(id))
                        .handle(|dto| async move { module.database().return_loan(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/titles/:title/books",
            get(
                |State(module): State<AppModule<DB>>, Path(title): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(ListRequest::Title(title))
                        .handle(|filter| async move { module.database().find_books(filter).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/authors/:author/books",
            get(
                |State(module): State<AppModule<DB>>, Path(author): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(ListRequest::Author(author))
                        .handle(|filter| async move { module.database().find_books(filter).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/students/:student/books",
            get(
                |State(module): State<AppModule<DB>>, Path(student): Path<String>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(ListRequest::Student(student))
                        .handle(|filter| async move { module.database().find_books(filter).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
