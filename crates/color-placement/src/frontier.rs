//! The set of empty cells eligible for the next placement.
//!
//! Outside the seeding phase every member is an empty cell with at least one
//! filled 8-neighbor. Members are kept in a vector whose order is the
//! tie-break order used by the frontier strategy: each batch of newly exposed
//! cells is shuffled before it is appended, and removal swaps the last member
//! into the vacated slot. That order is deterministic for a given RNG stream
//! but carries no geometric meaning.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::canvas::{Canvas, Coordinate};

/// De-duplicated collection of frontier cells with O(1) membership.
#[derive(Debug, Clone)]
pub struct Frontier {
    width: usize,
    height: usize,
    members: Vec<Coordinate>,
    /// Position in `members` for each cell of the grid.
    slots: Vec<Option<usize>>,
}

impl Frontier {
    /// Create an empty frontier for a `width x height` grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            members: Vec::new(),
            slots: vec![None; width * height],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.slot(coordinate).is_some_and(|s| s.is_some())
    }

    /// Add a cell. Returns `false` if it was already a member or lies
    /// outside the grid.
    pub fn insert(&mut self, coordinate: Coordinate) -> bool {
        let Some(index) = self.index(coordinate) else {
            return false;
        };
        if self.slots[index].is_some() {
            return false;
        }
        self.slots[index] = Some(self.members.len());
        self.members.push(coordinate);
        true
    }

    /// Remove a cell. Returns `false` if it was not a member.
    pub fn remove(&mut self, coordinate: Coordinate) -> bool {
        let Some(index) = self.index(coordinate) else {
            return false;
        };
        let Some(position) = self.slots[index].take() else {
            return false;
        };
        self.members.swap_remove(position);
        if let Some(&moved) = self.members.get(position) {
            let moved_index = moved.row * self.width + moved.col;
            self.slots[moved_index] = Some(position);
        }
        true
    }

    /// In-bounds 8-neighbors of a cell.
    pub fn neighbors_of(&self, coordinate: Coordinate) -> impl Iterator<Item = Coordinate> {
        coordinate.neighbors(self.width, self.height)
    }

    /// Members in current tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.members.iter().copied()
    }

    /// Append a batch of cells in shuffled order, skipping existing members.
    pub fn extend_shuffled<R: Rng + ?Sized>(&mut self, mut batch: Vec<Coordinate>, rng: &mut R) {
        batch.shuffle(rng);
        for coordinate in batch {
            self.insert(coordinate);
        }
    }

    /// Update the frontier after a color was written at `placed`.
    ///
    /// Removes `placed`, then adds its empty neighbors that are not yet
    /// members, shuffled with `rng`. Returns the number of cells added.
    pub fn grow<R: Rng + ?Sized>(
        &mut self,
        canvas: &Canvas,
        placed: Coordinate,
        rng: &mut R,
    ) -> usize {
        self.remove(placed);
        let exposed: Vec<Coordinate> = canvas
            .empty_neighbors(placed)
            .filter(|&n| !self.contains(n))
            .collect();
        let added = exposed.len();
        self.extend_shuffled(exposed, rng);
        added
    }

    #[inline]
    fn index(&self, coordinate: Coordinate) -> Option<usize> {
        (coordinate.row < self.height && coordinate.col < self.width)
            .then(|| coordinate.row * self.width + coordinate.col)
    }

    #[inline]
    fn slot(&self, coordinate: Coordinate) -> Option<Option<usize>> {
        self.index(coordinate).map(|i| self.slots[i])
    }
}
