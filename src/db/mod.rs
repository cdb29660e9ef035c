pub mod blobs;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod repository;
pub mod stats;

pub use repository::Repository;
