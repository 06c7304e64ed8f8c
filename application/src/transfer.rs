mod activity;
mod book;

pub use self::{activity::*, book::*};
