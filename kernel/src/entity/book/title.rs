use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::common::filled;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn try_new(title: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        filled(title.into(), "title").map(Self)
    }
}
