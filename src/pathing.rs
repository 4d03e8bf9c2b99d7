use std::fmt;
use std::slice;

use itertools::Itertools;
use smallvec::smallvec;

use crate::coordinates::{Coordinate, CoordinateSmallVec, Direction};
use crate::grid::Grid;
use crate::traversal::Traversal;
use crate::utils::{self, FnvHashMap, FnvHashSet};


/// The rooms visited walking from a start room to an exit room, both included.
///
/// An empty path means the exit is unreachable from the start. That cannot happen on a maze from
/// `generators`, only on a hand built grid.
#[derive(Eq, PartialEq, Clone, Debug, Default)]
pub struct Path {
    coordinates: Vec<Coordinate>,
}

impl Path {
    pub fn new(coordinates: Vec<Coordinate>) -> Path {
        Path { coordinates }
    }

    /// The unreachable exit path.
    pub fn empty() -> Path {
        Path::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Option<Coordinate> {
        self.coordinates.first().cloned()
    }

    #[inline]
    pub fn end(&self) -> Option<Coordinate> {
        self.coordinates.last().cloned()
    }

    pub fn iter(&self) -> slice::Iter<Coordinate> {
        self.coordinates.iter()
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// The door taken out of each room along the path, one fewer than the rooms visited.
    ///
    /// Panics if two consecutive coordinates are not adjacent.
    pub fn directions(&self) -> Vec<Direction> {
        self.coordinates
            .iter()
            .tuple_windows()
            .map(|(from, to)| {
                Direction::between(*from, *to)
                    .unwrap_or_else(|| panic!("path steps from {} to non adjacent {}", from, to))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coordinate;
    type IntoIter = slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.coordinates.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.coordinates.iter().join(" "))
    }
}

/// Find the path from `start` to `exit` with a depth first search.
/// An alias of the iterative implementation.
///
/// Panics if either coordinate is outside of the grid.
pub fn find_path(grid: &Grid, start: Coordinate, exit: Coordinate) -> Path {
    find_path_iterative(grid, start, exit)
}

pub fn find_path_with(traversal: Traversal,
                      grid: &Grid,
                      start: Coordinate,
                      exit: Coordinate)
                      -> Path {
    match traversal {
        Traversal::Iterative => find_path_iterative(grid, start, exit),
        Traversal::Recursive => find_path_recursive(grid, start, exit),
    }
}

/// A batch of rooms still to explore along with the room they are entered from.
#[derive(Debug)]
struct FrontierEntry {
    parent: Option<Coordinate>,
    candidates: CoordinateSmallVec,
}

/// Depth first search from `start` to `exit` with an explicit stack of frontier entries.
///
/// The grid is only read. Each visited room records the room it was entered from in a separate
/// map, so memory stays linear in the number of rooms however deep the search goes.
///
/// See `find_path`.
pub fn find_path_iterative(grid: &Grid, start: Coordinate, exit: Coordinate) -> Path {
    assert_on_grid(grid, start, exit);

    let mut came_from: FnvHashMap<Coordinate, Option<Coordinate>> =
        utils::fnv_hashmap(grid.size());
    let mut stack = vec![FrontierEntry {
        parent: None,
        candidates: smallvec![start],
    }];

    while let Some(entry) = stack.pop() {
        for coord in entry.candidates {
            if came_from.contains_key(&coord) {
                continue;
            }
            let _ = came_from.insert(coord, entry.parent);

            if coord == exit {
                let solution = walk_back(&came_from, exit);
                log::debug!("Found {} room path from {} to {} (iterative)", solution.len(), start, exit);
                return Path::new(solution);
            }

            stack.push(FrontierEntry {
                parent: Some(coord),
                candidates: grid.links(coord),
            });
        }
    }

    log::debug!("No path from {} to {} (iterative)", start, exit);
    Path::empty()
}

// Follow the entered-from links back from `end` to the search root, then put them in walking order.
fn walk_back(came_from: &FnvHashMap<Coordinate, Option<Coordinate>>,
             end: Coordinate)
             -> Vec<Coordinate> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(&Some(previous)) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// Depth first search from `start` to `exit` using the call stack, trying doors in the order up,
/// right, down, left. Recursion depth is bounded by the number of rooms.
///
/// See `find_path`.
pub fn find_path_recursive(grid: &Grid, start: Coordinate, exit: Coordinate) -> Path {
    assert_on_grid(grid, start, exit);

    let mut visited: FnvHashSet<Coordinate> = utils::fnv_hashset(grid.size());
    let mut reversed_path = vec![];
    if find_path_recursive_visit(grid, start, exit, &mut visited, &mut reversed_path) {
        reversed_path.reverse();
        log::debug!("Found {} room path from {} to {} (recursive)", reversed_path.len(), start, exit);
        Path::new(reversed_path)
    } else {
        log::debug!("No path from {} to {} (recursive)", start, exit);
        Path::empty()
    }
}

// On success `reversed_path` holds the path from `current` back to the exit, exit first.
fn find_path_recursive_visit(grid: &Grid,
                             current: Coordinate,
                             exit: Coordinate,
                             visited: &mut FnvHashSet<Coordinate>,
                             reversed_path: &mut Vec<Coordinate>)
                             -> bool {
    if !visited.insert(current) {
        return false;
    }

    if current == exit {
        reversed_path.push(current);
        return true;
    }

    for next in grid.links(current) {
        if find_path_recursive_visit(grid, next, exit, visited, reversed_path) {
            reversed_path.push(current);
            return true;
        }
    }

    false
}

/// Flag the path on the grid for display: `is_start` on the first room, `on_path` on every room.
/// Flags already on the grid are left alone, use `Grid::clear_path` first when re-marking.
///
/// Panics if the path is empty or does not end at the grid's exit.
pub fn mark_path(grid: &mut Grid, path: &Path) {
    let (start, end) = match (path.start(), path.end()) {
        (Some(start), Some(end)) => (start, end),
        _ => panic!("cannot mark an empty path"),
    };
    assert_eq!(Some(end), grid.exit(), "path does not end at the grid's exit");

    for coord in path {
        grid.room_mut(*coord).set_on_path(true);
    }
    grid.room_mut(start).set_start(true);
}

fn assert_on_grid(grid: &Grid, start: Coordinate, exit: Coordinate) {
    assert!(grid.is_valid_coordinate(start), "start {} is outside of the grid", start);
    assert!(grid.is_valid_coordinate(exit), "exit {} is outside of the grid", exit);
}
