pub mod repository;
pub mod sqlite;

pub use repository::SaveRepository;
pub use sqlite::{SaveDb, SaveDbError};
