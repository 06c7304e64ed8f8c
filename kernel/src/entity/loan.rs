mod returned_at;

pub use self::returned_at::*;
use crate::entity::common::CreatedAt;
use crate::entity::StudentName;
use destructure::Destructure;
use time::OffsetDateTime;
use vodca::References;

/// One borrowing period of a book. Active until `returned_at` is set.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Loan {
    student: StudentName,
    created_at: CreatedAt<Loan>,
    returned_at: Option<ReturnedAt>,
}

impl Loan {
    pub fn new(
        student: StudentName,
        created_at: CreatedAt<Loan>,
        returned_at: Option<ReturnedAt>,
    ) -> Self {
        Self {
            student,
            created_at,
            returned_at,
        }
    }

    pub(crate) fn open(student: StudentName, at: OffsetDateTime) -> Self {
        Self::new(student, CreatedAt::new(at), None)
    }

    pub fn is_active(&self) -> bool {
        self.returned_at.is_none()
    }

    /// Marks the loan returned. A loan never ends before it started, and a
    /// return that is already recorded is kept.
    pub(crate) fn close(&mut self, at: OffsetDateTime) {
        if self.returned_at.is_some() {
            return;
        }
        let started = *self.created_at.as_ref();
        self.returned_at = Some(ReturnedAt::new(at.max(started)));
    }
}
