//! Database repositories for data access layer
//
// Record store trait and its implementations
pub mod memory;
pub mod video;

pub use memory::InMemoryVideoRepository;
pub use video::{PgVideoRepository, VideoStore};
