use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{BookFilter, CreateBookDto, CreateLoanDto, GetBookDto, ReturnLoanDto};

use crate::controller::Intake;
use crate::identity::AuthenticatedStudent;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    title: String,
    author: String,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct LendRequest {
    id: Uuid,
    student: AuthenticatedStudent,
}

impl LendRequest {
    pub fn new(id: Uuid, student: AuthenticatedStudent) -> Self {
        Self { id, student }
    }
}

#[derive(Debug)]
pub struct ReturnRequest {
    id: Uuid,
}

impl ReturnRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub enum ListRequest {
    All,
    Title(String),
    Author(String),
    Student(String),
}

pub struct Transformer;

impl Intake<(AuthenticatedStudent, CreateRequest)> for Transformer {
    type To = CreateBookDto;
    fn emit(&self, input: (AuthenticatedStudent, CreateRequest)) -> Self::To {
        let (student, input) = input;
        CreateBookDto {
            title: input.title,
            author: input.author,
            student: student.into_inner(),
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetBookDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<LendRequest> for Transformer {
    type To = CreateLoanDto;
    fn emit(&self, input: LendRequest) -> Self::To {
        CreateLoanDto {
            book_id: input.id,
            student: input.student.into_inner(),
        }
    }
}

impl Intake<ReturnRequest> for Transformer {
    type To = ReturnLoanDto;
    fn emit(&self, input: ReturnRequest) -> Self::To {
        ReturnLoanDto { book_id: input.id }
    }
}

impl Intake<ListRequest> for Transformer {
    type To = BookFilter;
    fn emit(&self, input: ListRequest) -> Self::To {
        match input {
            ListRequest::All => BookFilter::All,
            ListRequest::Title(title) => BookFilter::Title(title),
            ListRequest::Author(author) => BookFilter::Author(author),
            ListRequest::Student(student) => BookFilter::Student(student),
        }
    }
}
