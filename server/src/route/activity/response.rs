use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{ActivityDto, BookSummaryDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    kind: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    student: Option<String>,
    book: ActivityBookResponse,
}

#[derive(Debug, Serialize)]
pub struct ActivityBookResponse {
    id: Uuid,
    title: String,
    author: String,
    student: String,
    is_available: bool,
    loan_status: &'static str,
}

impl From<ActivityDto> for ActivityResponse {
    fn from(value: ActivityDto) -> Self {
        Self {
            kind: value.kind.tag(),
            at: value.at,
            student: value.student,
            book: ActivityBookResponse::from(value.book),
        }
    }
}

impl From<BookSummaryDto> for ActivityBookResponse {
    fn from(value: BookSummaryDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            student: value.student,
            is_available: value.is_available,
            loan_status: value.loan_status,
        }
    }
}

pub struct Presenter;

impl Exhaust<Vec<ActivityDto>> for Presenter {
    type To = Json<Vec<ActivityResponse>>;
    fn emit(&self, input: Vec<ActivityDto>) -> Self::To {
        Json(input.into_iter().map(ActivityResponse::from).collect())
    }
}
