use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructBook, DestructLoan, Loan};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub student: String,
    pub created_at: OffsetDateTime,
    pub loans: Vec<LoanDto>,
    pub is_available: bool,
    pub loan_status: &'static str,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let status = value.status();
        let DestructBook {
            id,
            title,
            author,
            student,
            created_at,
            loans,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            student: student.into(),
            created_at: created_at.into(),
            loans: loans.into_iter().map(LoanDto::from).collect(),
            is_available: status.is_available(),
            loan_status: status.tag(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LoanDto {
    pub student: String,
    pub created_at: OffsetDateTime,
    pub returned_at: Option<OffsetDateTime>,
    pub is_active: bool,
}

impl From<Loan> for LoanDto {
    fn from(value: Loan) -> Self {
        let is_active = value.is_active();
        let DestructLoan {
            student,
            created_at,
            returned_at,
        } = value.into_destruct();
        Self {
            student: student.into(),
            created_at: created_at.into(),
            returned_at: returned_at.map(OffsetDateTime::from),
            is_active,
        }
    }
}

pub struct GetBookDto {
    pub id: Uuid,
}

pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub student: String,
}

pub struct CreateLoanDto {
    pub book_id: Uuid,
    pub student: String,
}

pub struct ReturnLoanDto {
    pub book_id: Uuid,
}

/// Which books a listing or feed is built from. Matching is exact.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BookFilter {
    All,
    Title(String),
    Author(String),
    Student(String),
}
