//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits in [`crate::ports`]: the
//! layout-backed ground-truth cave and the knowledge repositories.

pub mod cave;
pub mod in_memory_repository;
pub mod msgpack_repository;

pub use cave::Cave;
pub use in_memory_repository::InMemoryRepository;
pub use msgpack_repository::MsgPackRepository;
