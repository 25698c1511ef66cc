#![forbid(unsafe_code)]

pub mod file;
pub mod repository;

pub use file::FileBlobStore;
pub use repository::{
    MemoryBlobStore, ProgressBlobStore, StorageError, decode_table, encode_table,
};
