//! Store seam shared by the book query and modifier traits.
//!
//! A request begins one [`Transaction`] on the [`BookStore`] and hands it to
//! every query and write it makes.

use crate::KernelError;

/// Book store handle, built once at startup and shared by every request.
#[async_trait::async_trait]
pub trait BookStore: 'static + Sync + Send {
    type Transaction: Transaction;

    /// Reads run against the transaction's snapshot; writes stay staged until commit.
    async fn begin(&self) -> error_stack::Result<Self::Transaction, KernelError>;
}

pub trait DependOnBookStore: 'static + Sync + Send {
    type BookStore: BookStore;
    fn book_store(&self) -> &Self::BookStore;
}

impl<T> DependOnBookStore for T
where
    T: BookStore,
{
    type BookStore = T;
    fn book_store(&self) -> &Self::BookStore {
        self
    }
}

/// Writes become visible to other requests only after `commit`.
/// Dropping a transaction without committing discards its writes.
#[async_trait::async_trait]
pub trait Transaction: 'static + Sync + Send {
    async fn commit(self) -> error_stack::Result<(), KernelError>;
    async fn roll_back(self) -> error_stack::Result<(), KernelError>;
}
