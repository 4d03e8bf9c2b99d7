//! **maze_explorer** generates perfect mazes on a rectangular grid of rooms and finds the path
//! from any room to the exit with a depth first search.
//!
//! ```
//! use maze_explorer::{coordinates::Coordinate, generators, pathing};
//! use maze_explorer::units::{ColumnsCount, RowsCount};
//! use rand::SeedableRng;
//! use rand_xorshift::XorShiftRng;
//!
//! let exit = Coordinate::new(0, 0);
//! let start = Coordinate::new(2, 3);
//! let mut rng = XorShiftRng::seed_from_u64(1);
//! let mut maze = generators::generate(RowsCount(3), ColumnsCount(4), exit, &mut rng);
//!
//! let path = pathing::find_path(&maze, start, exit);
//! assert_eq!(path.start(), Some(start));
//! assert_eq!(path.end(), Some(exit));
//!
//! pathing::mark_path(&mut maze, &path);
//! println!("{}", maze);
//! ```

pub mod coordinates;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod pathing;
pub mod room;
pub mod traversal;
pub mod units;
mod utils;
