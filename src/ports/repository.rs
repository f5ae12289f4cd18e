//! Repository port for knowledge base persistence.

use std::path::Path;

use crate::{Result, knowledge::BeliefGrid};

/// Port for persisting and loading an agent's knowledge base.
///
/// Implementations must return only grids that pass
/// [`BeliefGrid::validate`].
///
/// # Examples
///
/// ```no_run
/// use wumpus::knowledge::BeliefGrid;
/// use wumpus::ports::KnowledgeRepository;
/// use std::path::Path;
///
/// fn checkpoint<R: KnowledgeRepository>(
///     repo: &R,
///     beliefs: &BeliefGrid,
///     path: &Path,
/// ) -> wumpus::Result<()> {
///     repo.save(beliefs, path)
/// }
/// ```
pub trait KnowledgeRepository {
    /// Save a knowledge base.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization
    /// fails.
    fn save(&self, beliefs: &BeliefGrid, path: &Path) -> Result<()>;

    /// Load a knowledge base.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored at `path`, the data cannot be
    /// decoded, or the decoded grid violates its invariants.
    fn load(&self, path: &Path) -> Result<BeliefGrid>;
}
