use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

/// A room position on a grid.
///
/// The derived ordering compares `row` first, giving the row-major total order used when
/// coordinates are set keys or sorted.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate {
    pub row: usize,
    pub column: usize,
}

impl Coordinate {
    pub fn new(row: usize, column: usize) -> Coordinate {
        Coordinate { row, column }
    }

    /// Creates a new `Coordinate` offset 1 room away in the given direction.
    /// Returns None if the result would have a negative row or column.
    /// Upper bounds are a grid concern, not checked here.
    pub fn offset(self, direction: Direction) -> Option<Coordinate> {
        let (row_delta, column_delta) = direction.delta();
        let row = offset_index(self.row, row_delta)?;
        let column = offset_index(self.column, column_delta)?;
        Some(Coordinate::new(row, column))
    }
}

#[inline]
fn offset_index(index: usize, delta: isize) -> Option<usize> {
    if delta < 0 {
        index.checked_sub(delta.unsigned_abs())
    } else {
        index.checked_add(delta as usize)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from(row_column_pair: (usize, usize)) -> Coordinate {
        Coordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

pub type DirectionSmallVec = SmallVec<[Direction; 4]>;
pub type CoordinateSmallVec = SmallVec<[Coordinate; 4]>;

impl Direction {
    /// Canonical order. Path finding explores doors in this order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    #[inline]
    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// (row delta, column delta)
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Position of the direction in `Direction::ALL`.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// All four directions in a uniformly random order.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> DirectionSmallVec {
        let mut dirs = Direction::ALL.iter().cloned().collect::<DirectionSmallVec>();
        dirs.shuffle(rng);
        dirs
    }

    /// The direction leading from `from` to the adjacent coordinate `to`, if they are adjacent.
    pub fn between(from: Coordinate, to: Coordinate) -> Option<Direction> {
        Direction::ALL
            .iter()
            .cloned()
            .find(|dir| from.offset(*dir) == Some(to))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;

    #[test]
    fn reverse_is_an_involution() {
        for dir in Direction::ALL.iter() {
            assert_ne!(dir.reverse(), *dir);
            assert_eq!(dir.reverse().reverse(), *dir);
        }
        assert_eq!(Direction::Up.reverse(), Direction::Down);
        assert_eq!(Direction::Right.reverse(), Direction::Left);
    }

    #[test]
    fn reverse_delta_cancels_out() {
        for dir in Direction::ALL.iter() {
            let (r, c) = dir.delta();
            let (rr, rc) = dir.reverse().delta();
            assert_eq!((r + rr, c + rc), (0, 0));
        }
    }

    #[test]
    fn offset_coordinates() {
        let c = Coordinate::new(1, 1);
        assert_eq!(c.offset(Direction::Up), Some(Coordinate::new(0, 1)));
        assert_eq!(c.offset(Direction::Right), Some(Coordinate::new(1, 2)));
        assert_eq!(c.offset(Direction::Down), Some(Coordinate::new(2, 1)));
        assert_eq!(c.offset(Direction::Left), Some(Coordinate::new(1, 0)));

        let origin = Coordinate::new(0, 0);
        assert_eq!(origin.offset(Direction::Up), None);
        assert_eq!(origin.offset(Direction::Left), None);
    }

    #[test]
    fn row_major_ordering() {
        let mut coords = vec![Coordinate::new(1, 0), Coordinate::new(0, 2), Coordinate::new(0, 1)];
        coords.sort();
        assert_eq!(coords,
                   vec![Coordinate::new(0, 1), Coordinate::new(0, 2), Coordinate::new(1, 0)]);
    }

    #[test]
    fn shuffled_is_a_permutation() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..100 {
            let dirs = Direction::shuffled(&mut rng);
            let sorted = dirs.iter().map(|d| d.index()).sorted().collect::<Vec<_>>();
            assert_eq!(sorted, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn direction_between_adjacent_coordinates() {
        let c = Coordinate::new(2, 2);
        for dir in Direction::ALL.iter() {
            let next = c.offset(*dir).unwrap();
            assert_eq!(Direction::between(c, next), Some(*dir));
        }
        assert_eq!(Direction::between(c, Coordinate::new(0, 0)), None);
        assert_eq!(Direction::between(c, c), None);
    }

    #[test]
    fn display() {
        assert_eq!(Coordinate::new(3, 14).to_string(), "(3, 14)");
        assert_eq!(Direction::Left.to_string(), "left");
    }
}
