//! Uniform bucket grid used to accelerate neighbor queries.
//!
//! [`SpatialGrid`] partitions a [`Domain`] into square cells of `cell_size` world units.
//! Points are stored once in an arena and buckets reference them by [`PointId`], so
//! removal never depends on floating-point equality when the caller holds an id.
//! Cells are created lazily on first insertion and are never evicted.
use std::collections::HashMap;

use thiserror::Error;

use crate::domain::{Domain, Point};
use crate::error::{Error, Result};

/// Integer cell coordinate inside a [`SpatialGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Cell index along the X axis.
    pub column: u32,
    /// Cell index along the Y axis.
    pub row: u32,
}

impl Cell {
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

/// Handle to a point stored in a [`SpatialGrid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointId(usize);

impl PointId {
    /// Insertion index of the point in the grid arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Signals that a point lies outside `[0, width) x [0, height)`.
///
/// This is ordinary control flow for grid operations and carries no other state.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[error("point ({x}, {y}) lies outside the grid domain")]
pub struct OutOfBounds {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for OutOfBounds {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Uniform-bucket 2D index over a bounded rectangular domain.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    domain: Domain,
    cell_size: f32,
    points: Vec<Point>,
    cells: HashMap<Cell, Vec<PointId>>,
    len: usize,
}

impl SpatialGrid {
    /// Creates an empty grid over `[0, width) x [0, height)`.
    pub fn new(width: f32, height: f32, cell_size: f32) -> Result<Self> {
        Self::with_domain(Domain::new(width, height)?, cell_size)
    }

    /// Creates an empty grid over an existing [`Domain`].
    pub fn with_domain(domain: Domain, cell_size: f32) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(Error::invalid_config(format!(
                "cell_size must be > 0, got {cell_size}"
            )));
        }
        Ok(Self {
            domain,
            cell_size,
            points: Vec::new(),
            cells: HashMap::new(),
            len: 0,
        })
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of points currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no point is currently stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest column index a point inside the domain can map to.
    pub fn max_column(&self) -> u32 {
        (self.domain.width / self.cell_size).floor() as u32
    }

    /// Largest row index a point inside the domain can map to.
    pub fn max_row(&self) -> u32 {
        (self.domain.height / self.cell_size).floor() as u32
    }

    /// Returns the cell `floor(p / cell_size)` for a point inside the domain.
    #[inline]
    pub fn cell_of(&self, p: Point) -> std::result::Result<Cell, OutOfBounds> {
        if !self.domain.contains(p) {
            return Err(p.into());
        }
        let column = (p.x / self.cell_size).floor() as u32;
        let row = (p.y / self.cell_size).floor() as u32;
        Ok(Cell::new(column, row))
    }

    /// Appends `p` to its cell and returns the cell. Out-of-bounds points are not stored.
    pub fn insert(&mut self, p: Point) -> std::result::Result<Cell, OutOfBounds> {
        self.insert_with_id(p).map(|(cell, _)| cell)
    }

    /// Like [`SpatialGrid::insert`], additionally returning the arena handle.
    pub fn insert_with_id(
        &mut self,
        p: Point,
    ) -> std::result::Result<(Cell, PointId), OutOfBounds> {
        let cell = self.cell_of(p)?;
        let id = PointId(self.points.len());
        self.points.push(p);
        self.cells.entry(cell).or_default().push(id);
        self.len += 1;
        Ok((cell, id))
    }

    /// Removes one stored point exactly equal to `p`.
    ///
    /// Returns `false` if `p` is out of bounds or not present.
    pub fn remove(&mut self, p: Point) -> bool {
        let Ok(cell) = self.cell_of(p) else {
            return false;
        };
        let points = &self.points;
        let Some(bucket) = self.cells.get_mut(&cell) else {
            return false;
        };
        match bucket.iter().position(|id| points[id.0] == p) {
            Some(pos) => {
                bucket.swap_remove(pos);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Removes the point behind `id`. Returns `false` if it was already removed.
    pub fn remove_id(&mut self, id: PointId) -> bool {
        let Some(&p) = self.points.get(id.0) else {
            return false;
        };
        let Ok(cell) = self.cell_of(p) else {
            return false;
        };
        let Some(bucket) = self.cells.get_mut(&cell) else {
            return false;
        };
        match bucket.iter().position(|&other| other == id) {
            Some(pos) => {
                bucket.swap_remove(pos);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Occupancy check: `true` iff `p` is in bounds and its cell has ever been populated.
    ///
    /// This does not test for `p` itself; a cell whose points were all removed still counts.
    pub fn contains(&self, p: Point) -> bool {
        self.cell_of(p)
            .map(|cell| self.cells.contains_key(&cell))
            .unwrap_or(false)
    }

    /// Position stored behind `id`, including points that were removed since.
    pub fn point(&self, id: PointId) -> Option<Point> {
        self.points.get(id.0).copied()
    }

    /// Handles stored in `cell`, empty if the cell was never populated.
    pub fn ids_in(&self, cell: Cell) -> &[PointId] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Points stored in `cell`, empty if the cell was never populated.
    pub fn points_in(&self, cell: Cell) -> impl Iterator<Item = Point> + '_ {
        self.ids_in(cell).iter().map(move |id| self.points[id.0])
    }

    /// Points stored in the square window of `reach` cells around `cell`, clamped to the grid.
    pub fn neighborhood(&self, cell: Cell, reach: u32) -> impl Iterator<Item = Point> + '_ {
        let column_min = cell.column.saturating_sub(reach);
        let column_max = cell.column.saturating_add(reach).min(self.max_column());
        let row_min = cell.row.saturating_sub(reach);
        let row_max = cell.row.saturating_add(reach).min(self.max_row());

        (row_min..=row_max).flat_map(move |row| {
            (column_min..=column_max).flat_map(move |column| self.points_in(Cell::new(column, row)))
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn grid() -> SpatialGrid {
        SpatialGrid::new(10.0, 6.0, 2.0).unwrap()
    }

    #[test]
    fn new_rejects_non_positive_inputs() {
        assert!(matches!(
            SpatialGrid::new(0.0, 10.0, 1.0),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            SpatialGrid::new(10.0, 0.0, 1.0),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            SpatialGrid::new(10.0, 10.0, 0.0),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            SpatialGrid::new(10.0, 10.0, -2.0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn cell_of_floors_by_cell_size() {
        let grid = grid();
        for &(x, y) in &[(0.0, 0.0), (1.99, 3.5), (2.0, 2.0), (9.99, 5.99), (7.3, 0.1)] {
            let cell = grid.cell_of(Vec2::new(x, y)).unwrap();
            assert_eq!(
                cell,
                Cell::new((x / 2.0f32).floor() as u32, (y / 2.0f32).floor() as u32)
            );
        }
    }

    #[test]
    fn cell_of_signals_out_of_bounds_on_both_axes() {
        let grid = grid();
        assert!(grid.cell_of(Vec2::new(10.0, 1.0)).is_err());
        assert!(grid.cell_of(Vec2::new(1.0, 6.0)).is_err());
        assert!(grid.cell_of(Vec2::new(-0.5, 1.0)).is_err());
        let err = grid.cell_of(Vec2::new(1.0, -3.0)).unwrap_err();
        assert_eq!(err, OutOfBounds { x: 1.0, y: -3.0 });
    }

    #[test]
    fn max_column_and_row_floor_extent() {
        let grid = grid();
        assert_eq!(grid.max_column(), 5);
        assert_eq!(grid.max_row(), 3);

        let uneven = SpatialGrid::new(10.0, 10.0, 3.0).unwrap();
        assert_eq!(uneven.max_column(), 3);
        assert_eq!(uneven.max_row(), 3);
    }

    #[test]
    fn insert_then_remove_round_trip() {
        let mut grid = grid();
        let p = Vec2::new(3.25, 4.5);
        let cell = grid.insert(p).unwrap();
        assert_eq!(cell, grid.cell_of(p).unwrap());
        assert!(grid.points_in(cell).any(|q| q == p));
        assert_eq!(grid.len(), 1);

        assert!(grid.remove(p));
        assert!(!grid.points_in(cell).any(|q| q == p));
        assert!(grid.is_empty());
        assert!(!grid.remove(p));
    }

    #[test]
    fn out_of_bounds_insert_does_not_mutate() {
        let mut grid = grid();
        assert!(grid.insert(Vec2::new(11.0, 1.0)).is_err());
        assert!(grid.is_empty());
        assert!(!grid.contains(Vec2::new(9.0, 1.0)));
        assert!(!grid.remove(Vec2::new(11.0, 1.0)));
    }

    #[test]
    fn remove_takes_only_one_duplicate() {
        let mut grid = grid();
        let p = Vec2::new(1.0, 1.0);
        let cell = grid.insert(p).unwrap();
        grid.insert(p).unwrap();
        assert!(grid.remove(p));
        assert_eq!(grid.points_in(cell).count(), 1);
    }

    #[test]
    fn remove_id_uses_handle_not_coordinates() {
        let mut grid = grid();
        let (cell, a) = grid.insert_with_id(Vec2::new(0.5, 0.5)).unwrap();
        let (_, b) = grid.insert_with_id(Vec2::new(1.5, 1.5)).unwrap();
        assert!(grid.remove_id(a));
        assert!(!grid.remove_id(a));
        assert_eq!(grid.ids_in(cell), &[b]);
        assert_eq!(grid.point(a), Some(Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn contains_checks_cell_occupancy_only() {
        let mut grid = grid();
        let p = Vec2::new(0.5, 0.5);
        grid.insert(p).unwrap();
        // Same cell, different point.
        assert!(grid.contains(Vec2::new(1.5, 1.5)));
        assert!(!grid.contains(Vec2::new(2.5, 0.5)));

        // Cells are never evicted.
        grid.remove(p);
        assert!(grid.contains(p));
    }

    #[test]
    fn points_in_unpopulated_cell_is_empty() {
        let grid = grid();
        assert_eq!(grid.points_in(Cell::new(3, 2)).count(), 0);
        assert!(grid.ids_in(Cell::new(99, 99)).is_empty());
    }

    #[test]
    fn neighborhood_is_clamped_to_grid() {
        let mut grid = grid();
        let corner = Vec2::new(0.5, 0.5);
        let near = Vec2::new(4.5, 4.5);
        let far = Vec2::new(9.5, 5.5);
        for p in [corner, near, far] {
            grid.insert(p).unwrap();
        }

        let found: Vec<_> = grid.neighborhood(Cell::new(0, 0), 2).collect();
        assert_eq!(found, vec![corner, near]);

        let all: Vec<_> = grid.neighborhood(Cell::new(5, 3), 5).collect();
        assert_eq!(all.len(), 3);
    }
}
