//! Readers and writers: the only way in or out of a shared bag.

mod access;
mod dispatch;
mod reader;
mod writer;

pub use access::TypedAccess;
pub use reader::Reader;
pub use writer::Writer;
