mod book;
mod common;
mod loan;
mod student;

pub use self::{book::*, common::*, loan::*, student::*};
