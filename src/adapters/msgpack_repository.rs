//! MessagePack implementation of the knowledge repository.

use std::{fs::File, path::Path};

use crate::{Result, error::Error, knowledge::BeliefGrid, ports::KnowledgeRepository};

/// File-backed knowledge repository using MessagePack via `rmp_serde`.
///
/// # Examples
///
/// ```no_run
/// use wumpus::adapters::MsgPackRepository;
/// use wumpus::knowledge::BeliefGrid;
/// use wumpus::ports::KnowledgeRepository;
/// use wumpus::world::Position;
/// use std::path::Path;
///
/// let repo = MsgPackRepository::new();
/// let beliefs = BeliefGrid::new(4, Position::new(0, 0))?;
///
/// repo.save(&beliefs, Path::new("kb.msgpack"))?;
/// let loaded = repo.load(Path::new("kb.msgpack"))?;
/// # Ok::<(), wumpus::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl KnowledgeRepository for MsgPackRepository {
    fn save(&self, beliefs: &BeliefGrid, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        rmp_serde::encode::write_named(&mut file, beliefs).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize knowledge base to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        tracing::debug!(?path, "saved knowledge base");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<BeliefGrid> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let beliefs: BeliefGrid =
            rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
                operation: "deserialize knowledge base from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        beliefs.validate()?;
        Ok(beliefs)
    }
}
