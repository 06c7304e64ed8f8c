mod activity;
mod book;
mod loan;

pub use self::{activity::*, book::*, loan::*};

use kernel::interface::query::BookQuery;
use kernel::prelude::entity::{Book, BookAuthor, BookTitle, StudentName};
use kernel::KernelError;

use crate::transfer::BookFilter;

async fn select_books<Q: BookQuery>(
    query: &Q,
    con: &mut Q::Transaction,
    filter: &BookFilter,
) -> error_stack::Result<Vec<Book>, KernelError> {
    match filter {
        BookFilter::All => query.find_all(con).await,
        BookFilter::Title(title) => {
            query
                .find_by_title(con, &BookTitle::new(title.as_str()))
                .await
        }
        BookFilter::Author(author) => {
            query
                .find_by_author(con, &BookAuthor::new(author.as_str()))
                .await
        }
        BookFilter::Student(student) => {
            query
                .find_by_student(con, &StudentName::new(student.as_str()))
                .await
        }
    }
}
