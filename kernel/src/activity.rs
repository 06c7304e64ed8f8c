//! Activity feed derived from books and their loans.
//!
//! Nothing here is stored: every call rebuilds the feed from the books it is
//! given and orders it latest first.

use time::OffsetDateTime;

use crate::entity::{Book, Loan, LoanStatus, StudentName};

/// Read-only pairing of a book with its availability at projection time.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BookView<'a> {
    book: &'a Book,
    status: LoanStatus,
}

impl<'a> BookView<'a> {
    pub fn new(book: &'a Book) -> Self {
        Self {
            book,
            status: book.status(),
        }
    }

    pub fn book(&self) -> &'a Book {
        self.book
    }

    pub fn status(&self) -> LoanStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Activity<'a> {
    BookAdded {
        at: &'a OffsetDateTime,
        book: BookView<'a>,
    },
    LoanStarted {
        at: &'a OffsetDateTime,
        student: &'a StudentName,
        book: BookView<'a>,
    },
    LoanReturned {
        at: &'a OffsetDateTime,
        student: &'a StudentName,
        book: BookView<'a>,
    },
}

impl<'a> Activity<'a> {
    pub fn at(&self) -> &'a OffsetDateTime {
        match self {
            Activity::BookAdded { at, .. }
            | Activity::LoanStarted { at, .. }
            | Activity::LoanReturned { at, .. } => *at,
        }
    }

    pub fn book(&self) -> &BookView<'a> {
        match self {
            Activity::BookAdded { book, .. }
            | Activity::LoanStarted { book, .. }
            | Activity::LoanReturned { book, .. } => book,
        }
    }

    pub fn student(&self) -> Option<&'a StudentName> {
        match self {
            Activity::BookAdded { .. } => None,
            Activity::LoanStarted { student, .. } | Activity::LoanReturned { student, .. } => {
                Some(*student)
            }
        }
    }
}

/// Flattens books into one feed of additions, loan starts and loan returns.
pub fn events_from_books(books: &[Book]) -> Vec<Activity<'_>> {
    let mut events = Vec::new();
    for book in books {
        let view = BookView::new(book);
        events.push(Activity::BookAdded {
            at: book.created_at().as_ref(),
            book: view,
        });
        for loan in book.loans() {
            push_loan(&mut events, loan, view);
        }
    }
    latest_first(&mut events);
    events
}

/// Loan starts and returns made by `student`. Book additions are left out.
pub fn events_for_student<'a>(books: &'a [Book], student: &StudentName) -> Vec<Activity<'a>> {
    let mut events = Vec::new();
    for book in books {
        let view = BookView::new(book);
        book.loans()
            .iter()
            .filter(|loan| loan.student() == student)
            .for_each(|loan| push_loan(&mut events, loan, view));
    }
    latest_first(&mut events);
    events
}

fn push_loan<'a>(events: &mut Vec<Activity<'a>>, loan: &'a Loan, book: BookView<'a>) {
    events.push(Activity::LoanStarted {
        at: loan.created_at().as_ref(),
        student: loan.student(),
        book,
    });
    if let Some(returned) = loan.returned_at() {
        events.push(Activity::LoanReturned {
            at: returned.as_ref(),
            student: loan.student(),
            book,
        });
    }
}

// `sort_by` is stable, so equal timestamps keep the order they were pushed in.
fn latest_first(events: &mut [Activity<'_>]) {
    events.sort_by(|a, b| b.at().cmp(a.at()));
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use crate::activity::{events_for_student, events_from_books, Activity};
    use crate::entity::{Book, BookAuthor, BookId, BookTitle, LoanStatus, StudentName};

    fn hours(n: i64) -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH + Duration::hours(n)
    }

    fn book(title: &str, student: &str, at: OffsetDateTime) -> Book {
        Book::create(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(title),
            BookAuthor::new("Herbert"),
            StudentName::new(student),
            at,
        )
    }

    fn assert_latest_first(events: &[Activity<'_>]) {
        assert!(events.windows(2).all(|pair| pair[0].at() >= pair[1].at()));
    }

    #[test]
    fn fresh_book_yields_single_addition() {
        let dune = book("Dune", "alice", hours(0));
        let books = vec![dune];
        let events = events_from_books(&books);

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Activity::BookAdded { .. }));
        assert!(!books[0].is_on_loan());
        assert!(events[0].book().is_available());
    }

    #[test]
    fn active_loan_comes_before_addition() {
        let mut dune = book("Dune", "alice", hours(0));
        dune.lend(StudentName::new("bob"), hours(1));
        let books = vec![dune];
        let events = events_from_books(&books);

        assert!(books[0].is_on_loan());
        assert_eq!(events.len(), 2);
        match &events[0] {
            Activity::LoanStarted { at, student, book } => {
                assert_eq!(*at, &hours(1));
                assert_eq!(*student, &StudentName::new("bob"));
                assert_eq!(book.status(), LoanStatus::OnLoan);
            }
            other => panic!("unexpected first event: {other:?}"),
        }
        assert!(matches!(events[1], Activity::BookAdded { .. }));
    }

    #[test]
    fn returned_loan_is_listed_first() {
        let mut dune = book("Dune", "alice", hours(0));
        dune.lend(StudentName::new("bob"), hours(1));
        dune.close_loans(hours(2));
        let books = vec![dune];
        let events = events_from_books(&books);

        assert!(!books[0].is_on_loan());
        assert_eq!(events.len(), 3);
        match &events[0] {
            Activity::LoanReturned { at, student, .. } => {
                assert_eq!(*at, &hours(2));
                assert_eq!(*student, &StudentName::new("bob"));
            }
            other => panic!("unexpected first event: {other:?}"),
        }
        assert!(matches!(events[1], Activity::LoanStarted { .. }));
        assert!(matches!(events[2], Activity::BookAdded { .. }));
    }

    #[test]
    fn event_count_matches_loans_and_returns() {
        let mut dune = book("Dune", "alice", hours(0));
        dune.lend(StudentName::new("bob"), hours(1));
        dune.close_loans(hours(2));
        dune.lend(StudentName::new("carol"), hours(3));
        dune.close_loans(hours(4));
        dune.lend(StudentName::new("dave"), hours(5));
        let books = vec![dune];

        // 1 addition + 3 loans + 2 returns
        assert_eq!(events_from_books(&books).len(), 6);
    }

    #[test]
    fn feed_spans_books_latest_first() {
        let mut dune = book("Dune", "alice", hours(0));
        dune.lend(StudentName::new("bob"), hours(5));
        let mut emma = book("Emma", "carol", hours(3));
        emma.lend(StudentName::new("dave"), hours(4));
        emma.close_loans(hours(7));
        let books = vec![dune, emma];
        let events = events_from_books(&books);

        assert_eq!(events.len(), 5);
        assert_latest_first(&events);
        let times = events.iter().map(|e| *e.at()).collect::<Vec<_>>();
        assert_eq!(times, vec![hours(7), hours(5), hours(4), hours(3), hours(0)]);
    }

    #[test]
    fn equal_timestamps_keep_accumulation_order() {
        let first = book("Dune", "alice", hours(1));
        let second = book("Emma", "alice", hours(1));
        let books = vec![first, second];
        let events = events_from_books(&books);

        assert_eq!(events[0].book().book().title(), &BookTitle::new("Dune"));
        assert_eq!(events[1].book().book().title(), &BookTitle::new("Emma"));
    }

    #[test]
    fn addition_stays_ahead_of_loan_at_same_instant() {
        let mut dune = book("Dune", "alice", hours(1));
        dune.lend(StudentName::new("bob"), hours(1));
        let books = vec![dune];
        let events = events_from_books(&books);

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Activity::BookAdded { .. }));
        assert!(matches!(events[1], Activity::LoanStarted { .. }));
    }

    #[test]
    fn on_loan_matches_unreturned_start() {
        let mut dune = book("Dune", "alice", hours(0));
        dune.lend(StudentName::new("bob"), hours(1));
        dune.close_loans(hours(2));
        dune.lend(StudentName::new("carol"), hours(3));
        let books = vec![dune];
        let events = events_from_books(&books);

        let started = events
            .iter()
            .filter(|e| matches!(e, Activity::LoanStarted { .. }))
            .count();
        let returned = events
            .iter()
            .filter(|e| matches!(e, Activity::LoanReturned { .. }))
            .count();
        assert_eq!(books[0].is_on_loan(), started > returned);
    }

    #[test]
    fn student_feed_only_holds_that_student() {
        let mut dune = book("Dune", "alice", hours(0));
        dune.lend(StudentName::new("bob"), hours(1));
        dune.close_loans(hours(2));
        let mut emma = book("Emma", "carol", hours(3));
        emma.lend(StudentName::new("carol"), hours(4));
        let books = vec![dune, emma];

        let bob = StudentName::new("bob");
        let events = events_for_student(&books, &bob);

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.student() == Some(&bob)));
        assert!(matches!(events[0], Activity::LoanReturned { .. }));
        assert!(matches!(events[1], Activity::LoanStarted { .. }));
    }

    #[test]
    fn student_feed_ignores_other_loans() {
        let shelf = |other: &str| {
            let mut dune = book("Dune", "alice", hours(0));
            dune.lend(StudentName::new("bob"), hours(1));
            dune.close_loans(hours(2));
            dune.lend(StudentName::new(other), hours(3));
            vec![dune]
        };
        let bob = StudentName::new("bob");
        let with_carol = shelf("carol");
        let with_dave = shelf("dave");

        fn summarize(events: Vec<Activity<'_>>) -> Vec<(OffsetDateTime, Option<StudentName>)> {
            events
                .iter()
                .map(|e| (*e.at(), e.student().cloned()))
                .collect()
        }
        assert_eq!(
            summarize(events_for_student(&with_carol, &bob)),
            summarize(events_for_student(&with_dave, &bob))
        );
        assert!(events_for_student(&with_carol, &StudentName::new("Bob")).is_empty());
    }
}
