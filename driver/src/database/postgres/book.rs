use error_stack::Report;
use serde::{Deserialize, Serialize};
use sqlx::{types, PgConnection};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookId, BookTitle, CreatedAt, Loan, ReturnedAt, StudentName,
};
use kernel::KernelError;

use crate::database::postgres::{PostgresConnection, PostgresDatabase};
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_by_title(
        &self,
        con: &mut PostgresConnection,
        title: &BookTitle,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_title(con, title).await
    }

    async fn find_by_author(
        &self,
        con: &mut PostgresConnection,
        author: &BookAuthor,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_author(con, author).await
    }

    async fn find_by_student(
        &self,
        con: &mut PostgresConnection,
        student: &StudentName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_student(con, student).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    student: String,
    created_at: OffsetDateTime,
    loans: types::Json<Vec<LoanRow>>,
}

/// Element of the `loans` JSON document embedded in each book row.
#[derive(Debug, Serialize, Deserialize)]
struct LoanRow {
    student: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    returned_at: Option<OffsetDateTime>,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            StudentName::new(value.student),
            CreatedAt::new(value.created_at),
            value.loans.0.into_iter().map(Loan::from).collect(),
        )
    }
}

impl From<LoanRow> for Loan {
    fn from(value: LoanRow) -> Self {
        Loan::new(
            StudentName::new(value.student),
            CreatedAt::new(value.created_at),
            value.returned_at.map(ReturnedAt::new),
        )
    }
}

impl From<&Loan> for LoanRow {
    fn from(value: &Loan) -> Self {
        Self {
            student: value.student().clone().into(),
            created_at: value.created_at().clone().into(),
            returned_at: value.returned_at().clone().map(OffsetDateTime::from),
        }
    }
}

fn loans_document(book: &Book) -> types::Json<Vec<LoanRow>> {
    types::Json(book.loans().iter().map(LoanRow::from).collect())
}

struct PgBookInternal;

impl PgBookInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, student, created_at, loans
            FROM books
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, student, created_at, loans
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn find_by_title(
        con: &mut PgConnection,
        title: &BookTitle,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, student, created_at, loans
            FROM books
            WHERE title = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(title.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_author(
        con: &mut PgConnection,
        author: &BookAuthor,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, student, created_at, loans
            FROM books
            WHERE author = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(author.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_student(
        con: &mut PgConnection,
        student: &StudentName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, student, created_at, loans
            FROM books
            WHERE student = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(student.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (id, title, author, student, created_at, loans)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.student().as_ref())
        .bind(book.created_at().as_ref())
        .bind(loans_document(book))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE books
            SET title = $2, author = $3, student = $4, loans = $5
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.student().as_ref())
        .bind(loans_document(book))
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            let id: &Uuid = book.id().as_ref();
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("No book stored with id {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::{BookStore, Transaction};
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{Book, BookAuthor, BookId, BookTitle, StudentName};
    use kernel::KernelError;

    use crate::database::postgres::book::PostgresBookRepository;
    use crate::database::postgres::PostgresDatabase;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn stores_and_updates_books() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.begin().await?;
        let id = BookId::new(Uuid::new_v4());
        let created = OffsetDateTime::now_utc();
        let title = BookTitle::new(format!("Dune {}", Uuid::new_v4()));

        let mut book = Book::create(
            id.clone(),
            title.clone(),
            BookAuthor::new("Herbert"),
            StudentName::new("alice"),
            created,
        );
        PostgresBookRepository.create(&mut con, &book).await?;

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book.clone()));

        book.lend(StudentName::new("bob"), created + Duration::hours(1));
        book.close_loans(created + Duration::hours(2));
        book.lend(StudentName::new("carol"), created + Duration::hours(3));
        PostgresBookRepository.update(&mut con, &book).await?;

        let found = PostgresBookRepository
            .find_by_title(&mut con, &title)
            .await?;
        assert_eq!(found, vec![book.clone()]);
        assert!(found[0].is_on_loan());

        con.roll_back().await?;
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn update_unknown_book() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.begin().await?;
        let book = Book::create(
            BookId::new(Uuid::new_v4()),
            BookTitle::new("Emma"),
            BookAuthor::new("Austen"),
            StudentName::new("alice"),
            OffsetDateTime::UNIX_EPOCH,
        );

        let error = PostgresBookRepository
            .update(&mut con, &book)
            .await
            .expect_err("book was never stored");
        assert!(matches!(error.current_context(), KernelError::NotFound));
        con.roll_back().await?;
        Ok(())
    }
}
