// Service exports
pub mod recall;
pub mod store;

pub use recall::{RecallError, RecallKey, RecallStore};
pub use store::{DirectoryStore, StoreError};
