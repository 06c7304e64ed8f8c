mod author;
mod id;
mod status;
mod title;

pub use self::{author::*, id::*, status::*, title::*};
use crate::entity::common::CreatedAt;
use crate::entity::{Loan, StudentName};
use destructure::Destructure;
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    student: StudentName,
    created_at: CreatedAt<Book>,
    loans: Vec<Loan>,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        student: StudentName,
        created_at: CreatedAt<Book>,
        loans: Vec<Loan>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            student,
            created_at,
            loans,
        }
    }

    /// Registers a fresh book without any loan history.
    pub fn create(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        student: StudentName,
        at: OffsetDateTime,
    ) -> Self {
        Self::new(id, title, author, student, CreatedAt::new(at), Vec::new())
    }

    pub fn is_on_loan(&self) -> bool {
        self.loans.iter().any(Loan::is_active)
    }

    pub fn status(&self) -> LoanStatus {
        if self.is_on_loan() {
            LoanStatus::OnLoan
        } else {
            LoanStatus::Available
        }
    }

    /// Appends an active loan. Nothing stops a second active loan on the same book.
    pub fn lend(&mut self, student: StudentName, at: OffsetDateTime) {
        self.loans.push(Loan::open(student, at));
    }

    /// Closes every active loan and returns how many were closed.
    pub fn close_loans(&mut self, at: OffsetDateTime) -> usize {
        let mut closed = 0;
        for loan in self.loans.iter_mut().filter(|loan| loan.is_active()) {
            loan.close(at);
            closed += 1;
        }
        closed
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use crate::entity::{
        Book, BookAuthor, BookId, BookTitle, LoanStatus, ReturnedAt, StudentName,
    };

    fn dune(at: OffsetDateTime) -> Book {
        Book::create(
            BookId::new(Uuid::new_v4()),
            BookTitle::new("Dune"),
            BookAuthor::new("Herbert"),
            StudentName::new("alice"),
            at,
        )
    }

    #[test]
    fn created_book_is_available() {
        let book = dune(OffsetDateTime::UNIX_EPOCH);
        assert!(book.loans().is_empty());
        assert!(!book.is_on_loan());
        assert_eq!(book.status(), LoanStatus::Available);
    }

    #[test]
    fn lending_puts_book_on_loan() {
        let start = OffsetDateTime::UNIX_EPOCH;
        let mut book = dune(start);
        book.lend(StudentName::new("bob"), start + Duration::hours(1));

        assert!(book.is_on_loan());
        assert_eq!(book.status(), LoanStatus::OnLoan);
        assert_eq!(book.loans()[0].student(), &StudentName::new("bob"));
    }

    #[test]
    fn close_loans_closes_every_active_loan() {
        let start = OffsetDateTime::UNIX_EPOCH;
        let mut book = dune(start);
        book.lend(StudentName::new("bob"), start + Duration::hours(1));
        book.lend(StudentName::new("carol"), start + Duration::hours(2));

        let closed = book.close_loans(start + Duration::hours(3));

        assert_eq!(closed, 2);
        assert!(!book.is_on_loan());
        assert!(book.loans().iter().all(|loan| loan.returned_at().is_some()));
    }

    #[test]
    fn close_loans_leaves_returned_loans_alone() {
        let start = OffsetDateTime::UNIX_EPOCH;
        let first_return = start + Duration::hours(2);
        let mut book = dune(start);
        book.lend(StudentName::new("bob"), start + Duration::hours(1));
        book.close_loans(first_return);

        let snapshot = book.clone();
        assert_eq!(book.close_loans(start + Duration::hours(5)), 0);
        assert_eq!(book, snapshot);
        assert_eq!(
            book.loans()[0].returned_at(),
            &Some(ReturnedAt::new(first_return))
        );
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(BookTitle::try_new("").is_err());
        assert!(BookAuthor::try_new("   ").is_err());
        assert!(StudentName::try_new("\t").is_err());
        assert!(BookTitle::try_new("Dune").is_ok());
    }
}
