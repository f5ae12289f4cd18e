//! In-memory knowledge repository for testing.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, knowledge::BeliefGrid, ports::KnowledgeRepository};

/// Knowledge repository backed by a shared map instead of the file system.
///
/// Entries are stored encoded, exactly as the file adapter would write them,
/// so a load exercises the same decode and validation path. Clones share
/// storage.
///
/// # Examples
///
/// ```
/// use wumpus::adapters::InMemoryRepository;
/// use wumpus::knowledge::BeliefGrid;
/// use wumpus::ports::KnowledgeRepository;
/// use wumpus::world::Position;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let beliefs = BeliefGrid::new(4, Position::new(0, 0))?;
///
/// repo.save(&beliefs, Path::new("session-1"))?;
/// assert_eq!(repo.load(Path::new("session-1"))?, beliefs);
/// # Ok::<(), wumpus::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of stored knowledge bases.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn clear(&self) {
        self.storage().clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&key(path))
    }

    /// Store raw bytes under a key, bypassing encoding.
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        self.storage().insert(key(path), bytes);
    }
}

fn key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl KnowledgeRepository for InMemoryRepository {
    fn save(&self, beliefs: &BeliefGrid, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec_named(beliefs).map_err(|e| Error::SerializationContext {
            operation: "serialize knowledge base for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<BeliefGrid> {
        let storage = self.storage();
        let bytes = storage.get(&key(path)).ok_or_else(|| Error::Io {
            operation: format!("load knowledge base from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        let beliefs: BeliefGrid =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize knowledge base from in-memory storage".to_string(),
                message: e.to_string(),
            })?;

        beliefs.validate()?;
        Ok(beliefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{PerceptSet, Position};

    fn explored() -> BeliefGrid {
        let mut beliefs = BeliefGrid::new(4, Position::new(0, 0)).unwrap();
        beliefs
            .update_percepts(Position::new(0, 0), PerceptSet::new())
            .unwrap();
        beliefs.update_probabilities();
        beliefs
    }

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let path = Path::new("kb");

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        repo.save(&explored(), path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));
        assert_eq!(repo.load(path).unwrap(), explored());
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = InMemoryRepository::new();
        assert!(repo.load(Path::new("nonexistent")).is_err());
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();

        repo1.save(&explored(), Path::new("shared")).unwrap();
        assert!(repo2.contains(Path::new("shared")));

        repo2.clear();
        assert_eq!(repo1.count(), 0);
    }

    #[test]
    fn test_corrupt_entry_fails_validation() {
        let repo = InMemoryRepository::new();
        let mut tampered = explored();
        // Serialize, then flip the start cell's probability through JSON.
        let mut value = serde_json::to_value(&tampered).unwrap();
        value["cells"][0]["prob_pit"] = serde_json::json!(0.5);
        tampered = serde_json::from_value(value).unwrap();

        repo.insert_raw(
            Path::new("tampered"),
            rmp_serde::to_vec_named(&tampered).unwrap(),
        );
        assert!(matches!(
            repo.load(Path::new("tampered")),
            Err(Error::CorruptKnowledge { .. })
        ));
    }

    #[test]
    fn test_oversized_grid_entry_fails_validation() {
        let repo = InMemoryRepository::new();
        let mut value = serde_json::to_value(explored()).unwrap();
        value["grid"]["size"] = serde_json::json!(1u64 << 33);
        value["cells"] = serde_json::json!([]);

        repo.insert_raw(
            Path::new("oversized"),
            rmp_serde::to_vec_named(&value).unwrap(),
        );
        assert!(matches!(
            repo.load(Path::new("oversized")),
            Err(Error::CorruptKnowledge { .. }) | Err(Error::SerializationContext { .. })
        ));
    }
}
