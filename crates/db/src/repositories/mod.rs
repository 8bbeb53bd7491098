//! Table-level data access. Each repository is a zero-sized struct whose
//! associated functions take the pool explicitly.

pub mod category_repo;
pub mod record_repo;

pub use category_repo::CategoryRepo;
pub use record_repo::RecordRepo;
