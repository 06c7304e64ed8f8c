use crate::database::{BookStore, DependOnBookStore, Transaction};
use crate::entity::Book;
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;
    /// Rewrites the stored book, loans included.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnBookStore {
    type BookModifier: BookModifier<
        Transaction = <Self::BookStore as BookStore>::Transaction,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}
