use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{BookDto, LoanDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: Uuid,
    title: String,
    author: String,
    student: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    loans: Vec<LoanResponse>,
    is_available: bool,
    loan_status: &'static str,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            student: value.student,
            created_at: value.created_at,
            loans: value.loans.into_iter().map(LoanResponse::from).collect(),
            is_available: value.is_available,
            loan_status: value.loan_status,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    student: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    returned_at: Option<OffsetDateTime>,
    is_active: bool,
}

impl From<LoanDto> for LoanResponse {
    fn from(value: LoanDto) -> Self {
        Self {
            student: value.student,
            created_at: value.created_at,
            returned_at: value.returned_at,
            is_active: value.is_active,
        }
    }
}

#[derive(Debug)]
pub struct CreatedResponse(BookResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<BookDto> for Presenter {
    type To = BookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        BookResponse::from(input)
    }
}

impl Exhaust<Option<BookDto>> for Presenter {
    type To = Option<BookResponse>;
    fn emit(&self, input: Option<BookDto>) -> Self::To {
        input.map(BookResponse::from)
    }
}

impl Exhaust<Vec<BookDto>> for Presenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        Json(input.into_iter().map(BookResponse::from).collect())
    }
}

pub struct CreatedPresenter;

impl Exhaust<BookDto> for CreatedPresenter {
    type To = CreatedResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        CreatedResponse(BookResponse::from(input))
    }
}
