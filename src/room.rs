use crate::coordinates::{Direction, DirectionSmallVec};

/// A single grid cell: the doors leading out of it plus the exit and path display flags.
///
/// Visited bookkeeping is not stored on the room: generation and path finding each keep their
/// own set.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Room {
    doors: [bool; 4],
    exit: bool,
    start: bool,
    on_path: bool,
}

impl Room {
    pub fn new() -> Room {
        Room::default()
    }

    #[inline]
    pub fn has_door(&self, direction: Direction) -> bool {
        self.doors[direction.index()]
    }

    /// Idempotent.
    #[inline]
    pub fn add_door(&mut self, direction: Direction) {
        self.doors[direction.index()] = true;
    }

    /// The directions with a door, in canonical order.
    pub fn doors(&self) -> DirectionSmallVec {
        Direction::ALL
            .iter()
            .cloned()
            .filter(|dir| self.has_door(*dir))
            .collect()
    }

    #[inline]
    pub fn is_exit(&self) -> bool {
        self.exit
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.start
    }

    #[inline]
    pub fn is_on_path(&self) -> bool {
        self.on_path
    }

    pub(crate) fn set_exit(&mut self, exit: bool) {
        self.exit = exit;
    }

    pub(crate) fn set_start(&mut self, start: bool) {
        self.start = start;
    }

    pub(crate) fn set_on_path(&mut self, on_path: bool) {
        self.on_path = on_path;
    }

    /// Reset the path display flags. Doors and the exit flag are untouched.
    pub fn clear_path(&mut self) {
        self.start = false;
        self.on_path = false;
    }
}
