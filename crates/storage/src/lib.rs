#![forbid(unsafe_code)]

mod entry;
pub mod queue;
mod store;

pub use store::Store;
