use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::database::{BookStore, DependOnBookStore, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookAuthor, BookId, BookTitle, StudentName};
use kernel::KernelError;

use crate::service::select_books;
use crate::transfer::{BookDto, BookFilter, CreateBookDto, GetBookDto};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.book_store().begin().await?;
        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;
        Ok(book.map(BookDto::from))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

/// Book listings, newest first.
#[async_trait::async_trait]
pub trait SearchBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        self.find_books(BookFilter::All).await
    }

    async fn find_books_by_title(
        &self,
        title: String,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        self.find_books(BookFilter::Title(title)).await
    }

    async fn find_books_by_author(
        &self,
        author: String,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        self.find_books(BookFilter::Author(author)).await
    }

    async fn find_books_by_student(
        &self,
        student: String,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        self.find_books(BookFilter::Student(student)).await
    }

    async fn find_books(
        &self,
        filter: BookFilter,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.book_store().begin().await?;
        let books = select_books(self.book_query(), &mut connection, &filter).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> SearchBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let title = BookTitle::try_new(dto.title)?;
        let author = BookAuthor::try_new(dto.author)?;
        let student = StudentName::try_new(dto.student)?;

        let uuid = Uuid::new_v4();
        let book = Book::create(
            BookId::new(uuid),
            title,
            author,
            student,
            OffsetDateTime::now_utc(),
        );

        let mut connection = self.book_store().begin().await?;
        self.book_modifier().create(&mut connection, &book).await?;
        connection.commit().await?;
        tracing::info!(book = %uuid, "book registered");

        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}
