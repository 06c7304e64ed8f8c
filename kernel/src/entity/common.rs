mod text;
mod time;

pub(crate) use self::text::*;
pub(crate) use self::time::truncate_to_micros;
pub use self::time::*;
