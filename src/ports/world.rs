//! World port - the agent's only window onto ground truth.

use crate::world::{GridIndex, HazardKind, PerceptSet, Position};

/// Ground truth consumed by the agent controller.
///
/// The controller asks for percepts only at chambers it has entered, and
/// asks whether a chamber is lethal or the goal only as it enters it.
///
/// # Examples
///
/// ```
/// use wumpus::ports::World;
/// use wumpus::world::{HazardKind, PerceptSet, Position};
///
/// struct EmptyRoom;
///
/// impl World for EmptyRoom {
///     fn size(&self) -> usize { 2 }
///     fn percepts_at(&self, _: Position) -> PerceptSet { PerceptSet::new() }
///     fn hazard_at(&self, _: Position) -> Option<HazardKind> { None }
///     fn is_goal(&self, position: Position) -> bool { position == Position::new(1, 1) }
/// }
///
/// assert_eq!(EmptyRoom.grid().neighbors(Position::new(0, 0)).len(), 2);
/// ```
pub trait World {
    /// Side length of the square cave.
    fn size(&self) -> usize;

    /// Percepts present in a chamber.
    fn percepts_at(&self, position: Position) -> PerceptSet;

    /// The hazard that kills an agent entering this chamber, if any.
    fn hazard_at(&self, position: Position) -> Option<HazardKind>;

    fn is_goal(&self, position: Position) -> bool;

    /// Adjacency used to place percepts. Must agree with the agent's own grid.
    fn grid(&self) -> GridIndex {
        GridIndex::new(self.size())
    }
}
