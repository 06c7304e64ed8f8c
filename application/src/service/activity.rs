use kernel::interface::database::{BookStore, DependOnBookStore};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::prelude::activity::{events_for_student, events_from_books};
use kernel::prelude::entity::StudentName;
use kernel::KernelError;

use crate::service::select_books;
use crate::transfer::{ActivityDto, BookFilter, GetStudentActivityDto};

/// Feed of additions, loans and returns over the books picked by a filter.
#[async_trait::async_trait]
pub trait ActivityService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_activity(
        &self,
        filter: BookFilter,
    ) -> error_stack::Result<Vec<ActivityDto>, KernelError> {
        let mut connection = self.book_store().begin().await?;
        let books = select_books(self.book_query(), &mut connection, &filter).await?;
        let activity = events_from_books(&books)
            .into_iter()
            .map(ActivityDto::from)
            .collect::<Vec<_>>();
        tracing::debug!(events = activity.len(), ?filter, "activity projected");
        Ok(activity)
    }
}

impl<T> ActivityService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait StudentActivityService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_student_activity(
        &self,
        dto: GetStudentActivityDto,
    ) -> error_stack::Result<Vec<ActivityDto>, KernelError> {
        let student = StudentName::new(dto.student);
        let mut connection = self.book_store().begin().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        Ok(events_for_student(&books, &student)
            .into_iter()
            .map(ActivityDto::from)
            .collect())
    }
}

impl<T> StudentActivityService for T where T: DependOnBookQuery {}
