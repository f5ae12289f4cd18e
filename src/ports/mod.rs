//! Domain ports (hexagonal architecture)
//!
//! Traits at the boundary between the exploring agent and the outside
//! world. Implementations live in [`crate::adapters`] and
//! [`crate::pipeline`].

pub mod observer;
pub mod repository;
pub mod world;

pub use observer::Observer;
pub use repository::KnowledgeRepository;
pub use world::World;
