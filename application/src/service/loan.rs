use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::database::{BookStore, DependOnBookStore, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{BookId, StudentName};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateLoanDto, ReturnLoanDto};

#[async_trait::async_trait]
pub trait LendBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    /// Starts a loan for `dto.student`. A book that is already on loan can be
    /// lent again.
    async fn create_loan(&self, dto: CreateLoanDto) -> error_stack::Result<BookDto, KernelError> {
        let student = StudentName::try_new(dto.student)?;
        let id = BookId::new(dto.book_id);

        let mut connection = self.book_store().begin().await?;
        let mut book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("No book with id {}", dto.book_id))
            })?;

        book.lend(student, OffsetDateTime::now_utc());
        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;
        tracing::info!(book = %dto.book_id, "loan created");

        Ok(BookDto::from(book))
    }
}

impl<T> LendBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait ReturnBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    /// Closes every active loan of the book. Nothing is written when the book
    /// has no active loan.
    async fn return_loan(&self, dto: ReturnLoanDto) -> error_stack::Result<BookDto, KernelError> {
        let id = BookId::new(dto.book_id);

        let mut connection = self.book_store().begin().await?;
        let mut book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("No book with id {}", dto.book_id))
            })?;

        let closed = book.close_loans(OffsetDateTime::now_utc());
        if closed == 0 {
            tracing::debug!(book = %dto.book_id, "no active loan to return");
            connection.roll_back().await?;
            return Ok(BookDto::from(book));
        }

        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;
        tracing::info!(book = %dto.book_id, closed, "loans returned");

        Ok(BookDto::from(book))
    }
}

impl<T> ReturnBookService for T where T: DependOnBookQuery + DependOnBookModifier {}
