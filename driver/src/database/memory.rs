use std::collections::HashMap;
use std::sync::Arc;

use error_stack::Report;
use tokio::sync::RwLock;
use uuid::Uuid;

use kernel::interface::database::{BookStore, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookAuthor, BookId, BookTitle, StudentName};
use kernel::KernelError;

type Shelf = HashMap<BookId, Book>;

/// Book store kept in process memory.
///
/// Clones share the same shelf. Writes made through a transaction are staged
/// and only reach the shelf on commit.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    shelf: Arc<RwLock<Shelf>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.shelf.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.shelf.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl BookStore for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn begin(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        Ok(InMemoryTransaction {
            shelf: Arc::clone(&self.shelf),
            staged: Shelf::new(),
        })
    }
}

pub struct InMemoryTransaction {
    shelf: Arc<RwLock<Shelf>>,
    staged: Shelf,
}

impl InMemoryTransaction {
    async fn contains(&self, id: &BookId) -> bool {
        self.staged.contains_key(id) || self.shelf.read().await.contains_key(id)
    }

    async fn select<F>(&self, predicate: F) -> Vec<Book>
    where
        F: Fn(&Book) -> bool,
    {
        let shelf = self.shelf.read().await;
        let mut books = shelf
            .iter()
            .filter(|(id, _)| !self.staged.contains_key(*id))
            .map(|(_, book)| book)
            .chain(self.staged.values())
            .filter(|book| predicate(*book))
            .cloned()
            .collect::<Vec<_>>();
        newest_first(&mut books);
        books
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let mut shelf = self.shelf.write().await;
        shelf.extend(self.staged);
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

fn newest_first(books: &mut [Book]) {
    books.sort_by(|a, b| {
        let created = b.created_at().as_ref().cmp(a.created_at().as_ref());
        let id = AsRef::<Uuid>::as_ref(b.id()).cmp(a.id().as_ref());
        created.then(id)
    });
}

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.select(|_| true).await)
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        if let Some(book) = con.staged.get(id) {
            return Ok(Some(book.clone()));
        }
        Ok(con.shelf.read().await.get(id).cloned())
    }

    async fn find_by_title(
        &self,
        con: &mut InMemoryTransaction,
        title: &BookTitle,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.select(|book| book.title() == title).await)
    }

    async fn find_by_author(
        &self,
        con: &mut InMemoryTransaction,
        author: &BookAuthor,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.select(|book| book.author() == author).await)
    }

    async fn find_by_student(
        &self,
        con: &mut InMemoryTransaction,
        student: &StudentName,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.select(|book| book.student() == student).await)
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        if con.contains(book.id()).await {
            let id: &Uuid = book.id().as_ref();
            return Err(Report::new(KernelError::Store)
                .attach_printable(format!("Book {id} is already stored")));
        }
        con.staged.insert(book.id().clone(), book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        if !con.contains(book.id()).await {
            let id: &Uuid = book.id().as_ref();
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("No book stored with id {id}")));
        }
        con.staged.insert(book.id().clone(), book.clone());
        Ok(())
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
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

    use crate::database::memory::{InMemoryBookRepository, InMemoryDatabase};

    fn book(title: &str, author: &str, student: &str, hour: i64) -> Book {
        Book::create(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(title),
            BookAuthor::new(author),
            StudentName::new(student),
            OffsetDateTime::UNIX_EPOCH + Duration::hours(hour),
        )
    }

    #[tokio::test]
    async fn committed_books_are_listed_newest_first() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let older = book("Dune", "Herbert", "alice", 1);
        let newer = book("Emma", "Austen", "bob", 2);

        let mut con = db.begin().await?;
        InMemoryBookRepository.create(&mut con, &older).await?;
        InMemoryBookRepository.create(&mut con, &newer).await?;
        con.commit().await?;

        let mut con = db.begin().await?;
        let all = InMemoryBookRepository.find_all(&mut con).await?;
        assert_eq!(all, vec![newer.clone(), older.clone()]);

        let by_author = InMemoryBookRepository
            .find_by_author(&mut con, &BookAuthor::new("Herbert"))
            .await?;
        assert_eq!(by_author, vec![older]);

        let by_student = InMemoryBookRepository
            .find_by_student(&mut con, &StudentName::new("bob"))
            .await?;
        assert_eq!(by_student, vec![newer]);
        Ok(())
    }

    #[tokio::test]
    async fn rolled_back_writes_are_discarded() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let dune = book("Dune", "Herbert", "alice", 0);

        let mut con = db.begin().await?;
        InMemoryBookRepository.create(&mut con, &dune).await?;
        let staged = InMemoryBookRepository.find_by_id(&mut con, dune.id()).await?;
        assert_eq!(staged, Some(dune.clone()));
        con.roll_back().await?;

        assert!(db.is_empty().await);
        let mut con = db.begin().await?;
        let found = InMemoryBookRepository.find_by_id(&mut con, dune.id()).await?;
        assert!(found.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_loans() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut dune = book("Dune", "Herbert", "alice", 0);

        let mut con = db.begin().await?;
        InMemoryBookRepository.create(&mut con, &dune).await?;
        con.commit().await?;

        dune.lend(StudentName::new("bob"), OffsetDateTime::UNIX_EPOCH + Duration::hours(1));
        let mut con = db.begin().await?;
        InMemoryBookRepository.update(&mut con, &dune).await?;
        let listed = InMemoryBookRepository
            .find_by_title(&mut con, &BookTitle::new("Dune"))
            .await?;
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_on_loan());
        con.commit().await?;

        assert_eq!(db.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_book_is_not_found() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.begin().await?;

        let error = InMemoryBookRepository
            .update(&mut con, &book("Dune", "Herbert", "alice", 0))
            .await
            .expect_err("book was never stored");
        assert!(matches!(error.current_context(), KernelError::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let dune = book("Dune", "Herbert", "alice", 0);
        let mut con = db.begin().await?;
        InMemoryBookRepository.create(&mut con, &dune).await?;

        let error = InMemoryBookRepository
            .create(&mut con, &dune)
            .await
            .expect_err("id already staged");
        assert!(matches!(error.current_context(), KernelError::Store));
        Ok(())
    }
}
