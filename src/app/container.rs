//! Dependency injection container for the wumpus application.
//!
//! The container owns infrastructure dependencies (the knowledge repository
//! and the default seed) and creates explicit sessions. Nothing is global:
//! every session is its own [`AgentController`].

use std::{path::Path, sync::Arc};

use super::config::SessionConfig;
use crate::{
    Result,
    adapters::{Cave, MsgPackRepository},
    agent::AgentController,
    knowledge::BeliefGrid,
    navigation::NavigationPolicy,
    ports::KnowledgeRepository,
    world::CaveLayout,
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use wumpus::app::{App, SessionConfig};
/// use wumpus::world::{CaveLayout, Position};
///
/// let app = App::new();
/// let layout = CaveLayout::new(Position::new(2, 0), Position::new(1, 2));
///
/// let session = app.create_session(&layout, SessionConfig::new().with_seed(42))?;
/// assert_eq!(session.moves_made(), 0);
/// # Ok::<(), wumpus::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use wumpus::app::App;
/// use wumpus::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    knowledge_repository: Arc<dyn KnowledgeRepository + Send + Sync>,
    /// Default policy seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults: `MsgPackRepository` and
    /// no default seed.
    pub fn new() -> Self {
        Self {
            knowledge_repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the knowledge repository.
    pub fn knowledge_repository(&self) -> Arc<dyn KnowledgeRepository + Send + Sync> {
        Arc::clone(&self.knowledge_repository)
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    /// Start a new session on `layout`.
    ///
    /// The config's seed wins over the app default; with neither, the
    /// policy is seeded from entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout, after overrides, fails validation.
    pub fn create_session(
        &self,
        layout: &CaveLayout,
        config: SessionConfig,
    ) -> Result<AgentController<Cave>> {
        let layout = config.apply(layout);
        let (start, max_moves) = (layout.start, layout.max_moves);
        let cave = Cave::new(layout)?;

        let seed = config.seed.or(self.default_seed);
        let policy = match seed {
            Some(seed) => NavigationPolicy::seeded(seed),
            None => NavigationPolicy::from_entropy(),
        };

        tracing::debug!(%start, max_moves, ?seed, "creating session");
        AgentController::new(cave, start, max_moves, policy)
    }

    /// Persist a knowledge base through the configured repository.
    ///
    /// ```no_run
    /// use wumpus::app::{App, SessionConfig};
    /// use wumpus::world::{CaveLayout, Position};
    /// use std::path::Path;
    ///
    /// let app = App::new();
    /// let layout = CaveLayout::new(Position::new(2, 0), Position::new(1, 2));
    /// let mut session = app.create_session(&layout, SessionConfig::new())?;
    /// session.decide_next_move();
    ///
    /// app.save_knowledge(session.beliefs(), Path::new("kb.msgpack"))?;
    /// # Ok::<(), wumpus::Error>(())
    /// ```
    pub fn save_knowledge(&self, beliefs: &BeliefGrid, path: &Path) -> Result<()> {
        self.knowledge_repository.save(beliefs, path)
    }

    /// Load a knowledge base through the configured repository.
    pub fn load_knowledge(&self, path: &Path) -> Result<BeliefGrid> {
        self.knowledge_repository.load(path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
///
/// ```
/// use wumpus::app::AppBuilder;
/// use wumpus::adapters::InMemoryRepository;
///
/// let app = AppBuilder::new()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
#[derive(Default)]
pub struct AppBuilder {
    knowledge_repository: Option<Arc<dyn KnowledgeRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom knowledge repository.
    pub fn with_repository<R: KnowledgeRepository + Send + Sync + 'static>(
        mut self,
        repo: R,
    ) -> Self {
        self.knowledge_repository = Some(Arc::new(repo));
        self
    }

    /// Set a default seed for every session created by this app.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app. Without a repository, `MsgPackRepository` is used.
    pub fn build(self) -> App {
        App {
            knowledge_repository: self
                .knowledge_repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}
