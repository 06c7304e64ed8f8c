use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::marker::PhantomData;

use time::{Duration, OffsetDateTime};

/// Drops sub-microsecond digits, the finest precision a `TIMESTAMPTZ` column keeps.
pub(crate) fn truncate_to_micros(time: OffsetDateTime) -> OffsetDateTime {
    time - Duration::nanoseconds(i64::from(time.nanosecond() % 1_000))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CreatedAt<T>(OffsetDateTime, PhantomData<T>);

impl<T> CreatedAt<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(truncate_to_micros(time.into()), PhantomData)
    }
}

impl<T> AsRef<OffsetDateTime> for CreatedAt<T> {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl<T> From<CreatedAt<T>> for OffsetDateTime {
    fn from(value: CreatedAt<T>) -> Self {
        value.0
    }
}

impl<T> Serialize for CreatedAt<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        time::serde::rfc3339::serialize(&self.0, serializer)
    }
}

impl<'de, T> Deserialize<'de> for CreatedAt<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        time::serde::rfc3339::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};

    use crate::entity::{Book, CreatedAt, ReturnedAt};

    #[test]
    fn timestamps_keep_microseconds() {
        let at = OffsetDateTime::UNIX_EPOCH + Duration::nanoseconds(1_123_456_789);

        let created = CreatedAt::<Book>::new(at);
        assert_eq!(created.as_ref().nanosecond(), 123_456_000);
        assert_eq!(
            ReturnedAt::new(at),
            ReturnedAt::new(OffsetDateTime::UNIX_EPOCH + Duration::nanoseconds(1_123_456_000))
        );
    }

    #[test]
    fn now_round_trips_through_truncation() {
        let now = CreatedAt::<Book>::new(OffsetDateTime::now_utc());
        let again = CreatedAt::<Book>::new(*now.as_ref());
        assert_eq!(now, again);
        assert_eq!(now.as_ref().nanosecond() % 1_000, 0);
    }
}
