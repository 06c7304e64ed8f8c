use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::common::filled;
use crate::KernelError;

/// Identifies whoever registered a book or borrowed it.
///
/// The value comes from the identity provider and is compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct StudentName(String);

impl StudentName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn try_new(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        filled(name.into(), "student").map(Self)
    }
}
