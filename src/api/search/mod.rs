mod query;
mod types;

pub use query::{search, search_concatenated};
