use bit_set::BitSet;
use rand::Rng;

use crate::coordinates::{Coordinate, Direction, DirectionSmallVec};
use crate::grid::Grid;
use crate::traversal::Traversal;
use crate::units::{ColumnsCount, RowsCount};

/// Generate a perfect maze on a new `rows` x `columns` grid with the recursive backtracker,
/// carving outwards from the exit room.
///
/// The door graph of the returned grid is a spanning tree: every room can reach every other room
/// by exactly one path. Only the exit room is flagged, no start or path flags are set.
///
/// Panics if the dimensions are zero or the exit is outside of the grid.
/// Recursion depth is up to rows * columns, see `generate_with` for the explicit stack variant.
pub fn generate<R: Rng>(rows: RowsCount,
                        columns: ColumnsCount,
                        exit: Coordinate,
                        rng: &mut R)
                        -> Grid {
    generate_with(Traversal::Recursive, rows, columns, exit, rng)
}

/// As `generate`, choosing between the call stack and explicit stack carving implementations.
/// Both draw the same random numbers in the same order, so an identically seeded `rng` gives an
/// identical maze either way.
pub fn generate_with<R: Rng>(traversal: Traversal,
                             rows: RowsCount,
                             columns: ColumnsCount,
                             exit: Coordinate,
                             rng: &mut R)
                             -> Grid {
    let mut grid = Grid::new(rows, columns);
    assert!(grid.is_valid_coordinate(exit),
            "exit {} is outside of the {}x{} grid", exit, rows, columns);

    log::debug!("Generating {}x{} maze ({}) with exit at {}", rows, columns, traversal, exit);

    grid.set_exit(exit);
    match traversal {
        Traversal::Recursive => recursive_backtracker(&mut grid, exit, rng),
        Traversal::Iterative => iterative_backtracker(&mut grid, exit, rng),
    }
    grid.clear_path();

    log::debug!("Generated maze with {} links", grid.links_count());
    grid
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// Starting at `start`, visit the unvisited neighbours in a random order, carving a passage to
/// each and recursing into it before trying the next direction. A room with no unvisited
/// neighbours left returns to the room it was entered from. The depth first descent gives long
/// winding corridors with few short dead ends.
///
/// Run on a grid with no doors this links every room into a spanning tree. Visited state is
/// private to the call, the rooms themselves only gain doors.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, start: Coordinate, rng: &mut R) {
    let mut visited = BitSet::with_capacity(grid.size());
    recursive_backtracker_visit(grid, start, &mut visited, rng);
}

fn recursive_backtracker_visit<R: Rng>(grid: &mut Grid,
                                       current: Coordinate,
                                       visited: &mut BitSet,
                                       rng: &mut R) {
    mark_visited(grid, visited, current);

    for direction in Direction::shuffled(rng) {
        if let Some(next) = unvisited_neighbour(grid, visited, current, direction) {
            carve(grid, current, direction, next);
            recursive_backtracker_visit(grid, next, visited, rng);
        }
    }
}

/// A room being explored by `iterative_backtracker`: its randomized directions and how many of
/// them have been tried.
#[derive(Debug)]
struct Frame {
    coordinate: Coordinate,
    directions: DirectionSmallVec,
    next: usize,
}

impl Frame {
    fn enter<R: Rng>(coordinate: Coordinate, rng: &mut R) -> Frame {
        Frame {
            coordinate,
            directions: Direction::shuffled(rng),
            next: 0,
        }
    }
}

/// The recursive backtracker with an explicit stack in place of the call stack, so the grid size
/// is bounded by memory instead of thread stack size.
///
/// Produces exactly the maze `recursive_backtracker` would for the same `rng` state.
pub fn iterative_backtracker<R: Rng>(grid: &mut Grid, start: Coordinate, rng: &mut R) {
    let mut visited = BitSet::with_capacity(grid.size());
    mark_visited(grid, &mut visited, start);

    let mut stack = vec![Frame::enter(start, rng)];
    while let Some(frame) = stack.last_mut() {
        let direction = match frame.directions.get(frame.next) {
            Some(dir) => *dir,
            None => {
                // backtrack
                stack.pop();
                continue;
            }
        };
        frame.next += 1;
        let current = frame.coordinate;

        if let Some(next) = unvisited_neighbour(grid, &visited, current, direction) {
            carve(grid, current, direction, next);
            mark_visited(grid, &mut visited, next);
            stack.push(Frame::enter(next, rng));
        }
    }
}

/// Add a door on both sides of the passage between two adjacent rooms.
fn carve(grid: &mut Grid, current: Coordinate, direction: Direction, next: Coordinate) {
    log::trace!("Carving {} from {} to {}", direction, current, next);
    grid.add_door(current, direction);
    grid.add_door(next, direction.reverse());
}

fn unvisited_neighbour(grid: &Grid,
                       visited: &BitSet,
                       current: Coordinate,
                       direction: Direction)
                       -> Option<Coordinate> {
    grid.neighbour_at_direction(current, direction)
        .filter(|next| !is_visited(grid, visited, *next))
}

fn mark_visited(grid: &Grid, visited: &mut BitSet, coord: Coordinate) {
    let index = grid.grid_coordinate_to_index(coord)
        .unwrap_or_else(|| panic!("coordinate {} is outside of the grid", coord));
    visited.insert(index);
}

fn is_visited(grid: &Grid, visited: &BitSet, coord: Coordinate) -> bool {
    grid.grid_coordinate_to_index(coord)
        .map_or(false, |index| visited.contains(index))
}

#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;

    const TRAVERSALS: [Traversal; 2] = [Traversal::Recursive, Traversal::Iterative];

    fn seeded(seed: u64) -> XorShiftRng {
        XorShiftRng::seed_from_u64(seed)
    }

    // Small, non-zero dimensions from arbitrary bytes.
    fn dims(rows: u8, columns: u8) -> (RowsCount, ColumnsCount) {
        (RowsCount(rows as usize % 12 + 1), ColumnsCount(columns as usize % 12 + 1))
    }

    fn exit_within(rows: RowsCount, columns: ColumnsCount, r: u8, c: u8) -> Coordinate {
        Coordinate::new(r as usize % rows.0, c as usize % columns.0)
    }

    #[test]
    fn generated_mazes_are_spanning_trees() {
        fn p(rows: u8, columns: u8, exit_r: u8, exit_c: u8, seed: u64) -> bool {
            let (rows, columns) = dims(rows, columns);
            let exit = exit_within(rows, columns, exit_r, exit_c);
            TRAVERSALS.iter().all(|traversal| {
                let g = generate_with(*traversal, rows, columns, exit, &mut seeded(seed));
                g.is_symmetric() && g.links_count() == g.size() - 1 && g.is_perfect()
            })
        }
        quickcheck(p as fn(u8, u8, u8, u8, u64) -> bool);
    }

    #[test]
    fn generated_mazes_have_exactly_the_requested_exit() {
        fn p(rows: u8, columns: u8, exit_r: u8, exit_c: u8, seed: u64) -> bool {
            let (rows, columns) = dims(rows, columns);
            let exit = exit_within(rows, columns, exit_r, exit_c);
            TRAVERSALS.iter().all(|traversal| {
                let g = generate_with(*traversal, rows, columns, exit, &mut seeded(seed));
                let exits = g.iter().filter(|c| g.room(*c).is_exit()).collect::<Vec<_>>();
                exits == vec![exit]
            })
        }
        quickcheck(p as fn(u8, u8, u8, u8, u64) -> bool);
    }

    #[test]
    fn generated_mazes_have_no_path_flags() {
        fn p(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = dims(rows, columns);
            let g = generate(rows, columns, Coordinate::new(0, 0), &mut seeded(seed));
            g.iter().all(|c| !g.room(c).is_start() && !g.room(c).is_on_path())
        }
        quickcheck(p as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn both_carving_forms_build_the_same_maze() {
        fn p(rows: u8, columns: u8, exit_r: u8, exit_c: u8, seed: u64) -> TestResult {
            let (rows, columns) = dims(rows, columns);
            let exit = exit_within(rows, columns, exit_r, exit_c);
            let recursive = generate_with(Traversal::Recursive, rows, columns, exit, &mut seeded(seed));
            let iterative = generate_with(Traversal::Iterative, rows, columns, exit, &mut seeded(seed));
            TestResult::from_bool(recursive == iterative)
        }
        quickcheck(p as fn(u8, u8, u8, u8, u64) -> TestResult);
    }

    #[test]
    fn single_room_maze_has_no_doors() {
        let g = generate(RowsCount(1), ColumnsCount(1), Coordinate::new(0, 0), &mut seeded(1));
        assert!(g.room(Coordinate::new(0, 0)).doors().is_empty());
        assert_eq!(g.exit(), Some(Coordinate::new(0, 0)));
        assert!(g.is_perfect());
    }

    #[test]
    fn carving_on_an_existing_grid_links_every_room() {
        let mut g = Grid::new(RowsCount(5), ColumnsCount(7));
        recursive_backtracker(&mut g, Coordinate::new(2, 3), &mut seeded(99));
        assert!(g.is_perfect());

        let mut g = Grid::new(RowsCount(5), ColumnsCount(7));
        iterative_backtracker(&mut g, Coordinate::new(4, 6), &mut seeded(99));
        assert!(g.is_perfect());
    }

    #[test]
    fn iterative_generation_handles_large_grids() {
        let g = generate_with(Traversal::Iterative,
                              RowsCount(300),
                              ColumnsCount(300),
                              Coordinate::new(150, 150),
                              &mut seeded(3));
        assert_eq!(g.links_count(), 300 * 300 - 1);
        assert!(g.is_perfect());
    }

    #[test]
    #[should_panic]
    fn exit_out_of_bounds_panics() {
        let _ = generate(RowsCount(3), ColumnsCount(4), Coordinate::new(3, 0), &mut seeded(0));
    }
}
