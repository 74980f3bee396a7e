//! Upload storage

pub mod store;

pub use store::{StoredFile, UploadStore};
