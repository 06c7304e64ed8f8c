use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::activity::{Activity, BookView};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ActivityKind {
    BookAdded,
    LoanStarted,
    LoanReturned,
}

impl ActivityKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ActivityKind::BookAdded => "book_added",
            ActivityKind::LoanStarted => "loan_started",
            ActivityKind::LoanReturned => "loan_returned",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ActivityDto {
    pub kind: ActivityKind,
    pub at: OffsetDateTime,
    pub student: Option<String>,
    pub book: BookSummaryDto,
}

impl From<Activity<'_>> for ActivityDto {
    fn from(value: Activity<'_>) -> Self {
        let kind = match value {
            Activity::BookAdded { .. } => ActivityKind::BookAdded,
            Activity::LoanStarted { .. } => ActivityKind::LoanStarted,
            Activity::LoanReturned { .. } => ActivityKind::LoanReturned,
        };
        Self {
            kind,
            at: *value.at(),
            student: value.student().map(|student| student.clone().into()),
            book: BookSummaryDto::from(*value.book()),
        }
    }
}

/// Book fields shown next to an activity entry, without the loan history.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookSummaryDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub student: String,
    pub is_available: bool,
    pub loan_status: &'static str,
}

impl From<BookView<'_>> for BookSummaryDto {
    fn from(value: BookView<'_>) -> Self {
        let book = value.book();
        Self {
            id: book.id().clone().into(),
            title: book.title().clone().into(),
            author: book.author().clone().into(),
            student: book.student().clone().into(),
            is_available: value.is_available(),
            loan_status: value.status().tag(),
        }
    }
}

pub struct GetStudentActivityDto {
    pub student: String,
}
