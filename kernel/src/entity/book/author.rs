use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::common::filled;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookAuthor(String);

impl BookAuthor {
    pub fn new(author: impl Into<String>) -> Self {
        Self(author.into())
    }

    pub fn try_new(author: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        filled(author.into(), "author").map(Self)
    }
}
