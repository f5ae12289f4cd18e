//! Application layer with dependency injection container.
//!
//! ```text
//!   App (container)
//!    ├── owns   KnowledgeRepository  (MsgPackRepository | InMemoryRepository)
//!    ├── owns   default seed
//!    └── makes  AgentController<Cave>, one per session
//! ```
//!
//! # Usage
//!
//! ```
//! use wumpus::app::{App, SessionConfig};
//! use wumpus::world::{CaveLayout, Position};
//!
//! let app = App::new();
//! let layout = CaveLayout::new(Position::new(2, 0), Position::new(1, 2));
//! let mut session = app.create_session(&layout, SessionConfig::new().with_seed(1))?;
//! let result = session.decide_next_move();
//! assert!(result.success);
//! # Ok::<(), wumpus::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::SessionConfig;
pub use container::{App, AppBuilder};
