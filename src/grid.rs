use std::fmt;

use petgraph::algo;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::coordinates::{Coordinate, CoordinateSmallVec, Direction};
use crate::room::Room;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};


/// A fixed size `rows` x `columns` grid of rooms, stored row-major.
///
/// Coordinate arguments outside of the grid are programmer errors and panic, apart from the
/// `Option` returning queries (`neighbour_at_direction`, `grid_coordinate_to_index`).
#[derive(Clone, Eq, PartialEq)]
pub struct Grid {
    rows: RowsCount,
    columns: ColumnsCount,
    rooms: Vec<Room>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, exit: {:?}, links: {:?}",
               self.rows, self.columns, self.exit(), self.links_count())
    }
}

impl Grid {
    /// Panics if either dimension is zero.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Grid {
        assert!(rows.0 > 0 && columns.0 > 0,
                "grid dimensions must be non-zero, got {}x{}", rows, columns);

        Grid {
            rows,
            columns,
            rooms: vec![Room::new(); rows.0 * columns.0],
        }
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rooms.len()
    }

    /// Node count and an upper bound on the undirected edge count of the grid graph.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        let edges = rows * (columns - 1) + columns * (rows - 1);
        (NodesCount(self.size()), EdgesCount(edges))
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        coord.row < self.rows.0 && coord.column < self.columns.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row * self.columns.0 + coord.column)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_grid_coordinate(&self, index: usize) -> Coordinate {
        Coordinate::new(index / self.columns.0, index % self.columns.0)
    }

    pub fn room(&self, coord: Coordinate) -> &Room {
        let index = self.checked_index(coord);
        &self.rooms[index]
    }

    pub(crate) fn room_mut(&mut self, coord: Coordinate) -> &mut Room {
        let index = self.checked_index(coord);
        &mut self.rooms[index]
    }

    /// Mark the exit room. Only call this once per grid.
    pub fn set_exit(&mut self, coord: Coordinate) {
        self.room_mut(coord).set_exit(true);
    }

    /// The first room in row-major order marked as the exit.
    pub fn exit(&self) -> Option<Coordinate> {
        self.rooms
            .iter()
            .position(|room| room.is_exit())
            .map(|index| self.index_to_grid_coordinate(index))
    }

    /// Adds a door to one side of one room only. Idempotent.
    pub fn add_door(&mut self, coord: Coordinate, direction: Direction) {
        self.room_mut(coord).add_door(direction);
    }

    pub fn has_door(&self, coord: Coordinate, direction: Direction) -> bool {
        self.room(coord).has_door(direction)
    }

    /// The adjacent room coordinate in the given direction, None at the grid boundary.
    pub fn neighbour_at_direction(&self,
                                  coord: Coordinate,
                                  direction: Direction)
                                  -> Option<Coordinate> {
        coord.offset(direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// Room coordinates reachable through a door, in canonical direction order.
    /// Doors leading out of the grid are ignored.
    pub fn links(&self, coord: Coordinate) -> CoordinateSmallVec {
        let room = self.room(coord);
        Direction::ALL
            .iter()
            .cloned()
            .filter(|dir| room.has_door(*dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    /// Do both sides of the passage between `coord` and its neighbour in `direction` have a door?
    pub fn is_neighbour_linked(&self, coord: Coordinate, direction: Direction) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour| {
                self.has_door(coord, direction) && self.has_door(neighbour, direction.reverse())
            })
    }

    /// Apply `visitor` to every room in row-major order.
    pub fn for_each_room<F>(&mut self, mut visitor: F)
        where F: FnMut(Coordinate, &mut Room)
    {
        let columns = self.columns.0;
        for (index, room) in self.rooms.iter_mut().enumerate() {
            visitor(Coordinate::new(index / columns, index % columns), room);
        }
    }

    /// Reset the start and on-path display flags of every room.
    pub fn clear_path(&mut self) {
        self.for_each_room(|_, room| room.clear_path());
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            columns: self.columns.0,
            current_cell_number: 0,
            cells_count: self.size(),
        }
    }

    /// Every passage with doors on both sides, each exactly once.
    /// The second coordinate of a pair is to the right of or below the first.
    pub fn iter_links(&self) -> LinksIter {
        LinksIter {
            grid: self,
            cells: self.iter(),
            pending_down: None,
        }
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Is every door matched by a reverse door on the adjacent room?
    /// A door leading out of the grid has no match.
    pub fn is_symmetric(&self) -> bool {
        self.iter().all(|coord| {
            self.room(coord)
                .doors()
                .iter()
                .all(|dir| self.is_neighbour_linked(coord, *dir))
        })
    }

    /// The door graph, one node per room indexed row-major.
    pub fn to_graph(&self) -> UnGraph<(), ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for _ in 0..nodes {
            let _ = graph.add_node(());
        }
        for (a, b) in self.iter_links() {
            let a_index = self.checked_index(a);
            let b_index = self.checked_index(b);
            let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
        }
        graph
    }

    /// A perfect maze: symmetric doors forming a spanning tree over all the rooms, so there is
    /// exactly one path between any two rooms.
    pub fn is_perfect(&self) -> bool {
        if !self.is_symmetric() {
            return false;
        }
        let graph = self.to_graph();
        graph.edge_count() == self.size() - 1 && algo::connected_components(&graph) == 1
    }

    fn checked_index(&self, coord: Coordinate) -> usize {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => index,
            None => panic!("coordinate {} is outside of the {}x{} grid", coord, self.rows, self.columns),
        }
    }
}

/// Row-major iteration over every coordinate of a grid.
#[derive(Debug, Clone)]
pub struct CellIter {
    columns: usize,
    current_cell_number: usize,
    cells_count: usize,
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let index = self.current_cell_number;
            self.current_cell_number += 1;
            Some(Coordinate::new(index / self.columns, index % self.columns))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

pub struct LinksIter<'a> {
    grid: &'a Grid,
    cells: CellIter,
    pending_down: Option<(Coordinate, Coordinate)>,
}

impl<'a> Iterator for LinksIter<'a> {
    type Item = (Coordinate, Coordinate);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(link) = self.pending_down.take() {
            return Some(link);
        }

        for coord in &mut self.cells {
            let right = linked_neighbour(self.grid, coord, Direction::Right);
            let down = linked_neighbour(self.grid, coord, Direction::Down);
            match (right, down) {
                (Some(r), Some(d)) => {
                    self.pending_down = Some((coord, d));
                    return Some((coord, r));
                }
                (Some(r), None) => return Some((coord, r)),
                (None, Some(d)) => return Some((coord, d)),
                (None, None) => {}
            }
        }
        None
    }
}

impl<'a> fmt::Debug for LinksIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: cells iter : {:?}", self.cells)
    }
}

fn linked_neighbour(grid: &Grid,
                    coord: Coordinate,
                    direction: Direction)
                    -> Option<Coordinate> {
    if grid.is_neighbour_linked(coord, direction) {
        grid.neighbour_at_direction(coord, direction)
    } else {
        None
    }
}
