use crate::database::{BookStore, DependOnBookStore, Transaction};
use crate::entity::{Book, BookAuthor, BookId, BookTitle, StudentName};
use crate::KernelError;

/// Read side of the book store. Every listing is ordered newest first.
#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Transaction: Transaction;

    async fn find_all(&self, con: &mut Self::Transaction)
        -> error_stack::Result<Vec<Book>, KernelError>;

    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    async fn find_by_title(
        &self,
        con: &mut Self::Transaction,
        title: &BookTitle,
    ) -> error_stack::Result<Vec<Book>, KernelError>;

    async fn find_by_author(
        &self,
        con: &mut Self::Transaction,
        author: &BookAuthor,
    ) -> error_stack::Result<Vec<Book>, KernelError>;

    async fn find_by_student(
        &self,
        con: &mut Self::Transaction,
        student: &StudentName,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnBookStore {
    type BookQuery: BookQuery<
        Transaction = <Self::BookStore as BookStore>::Transaction,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}
