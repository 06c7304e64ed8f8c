use application::transfer::{BookFilter, GetStudentActivityDto};

use crate::controller::Intake;

#[derive(Debug)]
pub enum ActivityRequest {
    All,
    Title(String),
    Author(String),
}

#[derive(Debug)]
pub struct StudentActivityRequest {
    student: String,
}

impl StudentActivityRequest {
    pub fn new(student: String) -> Self {
        Self { student }
    }
}

pub struct Transformer;

impl Intake<ActivityRequest> for Transformer {
    type To = BookFilter;
    fn emit(&self, input: ActivityRequest) -> Self::To {
        match input {
            ActivityRequest::All => BookFilter::All,
            ActivityRequest::Title(title) => BookFilter::Title(title),
            ActivityRequest::Author(author) => BookFilter::Author(author),
        }
    }
}

impl Intake<StudentActivityRequest> for Transformer {
    type To = GetStudentActivityDto;
    fn emit(&self, input: StudentActivityRequest) -> Self::To {
        GetStudentActivityDto {
            student: input.student,
        }
    }
}
