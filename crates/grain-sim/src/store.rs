//! Sparse particle store with an active subset and a per-frame changelog

use crate::delta::FrameDelta;
use crate::particle::Particle;
use grain_core::Cell;
use std::collections::{HashMap, HashSet};

/// One raw changelog entry. Every insert records `Added`, every remove
/// records `Removed`; activity toggles record nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added(Cell),
    Removed(Cell),
}

impl Change {
    pub(crate) fn cell(&self) -> Cell {
        match *self {
            Change::Added(cell) | Change::Removed(cell) => cell,
        }
    }
}

/// Cell-keyed particle storage.
///
/// Invariants:
/// - at most one particle per cell (inserting into an occupied cell panics)
/// - the active set is a subset of the occupied cells
/// - the changelog only shrinks through [`ParticleStore::drain_changes`]
#[derive(Debug, Default)]
pub struct ParticleStore {
    cells: HashMap<Cell, Particle>,
    active: HashSet<Cell>,
    changelog: Vec<Change>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Particle at `(x, y)`, if any
    pub fn get(&self, x: i32, y: i32) -> Option<Particle> {
        self.cells.get(&Cell::new(x, y)).copied()
    }

    pub fn is_free(&self, x: i32, y: i32) -> bool {
        !self.contains(Cell::new(x, y))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    pub fn is_active(&self, cell: Cell) -> bool {
        self.active.contains(&cell)
    }

    /// Place `particle` at its cell.
    ///
    /// # Panics
    /// If the cell is already occupied.
    pub fn insert(&mut self, particle: Particle) {
        let cell = particle.cell();
        assert!(
            !self.cells.contains_key(&cell),
            "insert into occupied cell {cell}"
        );
        self.cells.insert(cell, particle);
        if particle.active {
            self.active.insert(cell);
        }
        self.changelog.push(Change::Added(cell));
    }

    /// Vacate `(x, y)` and return the particle that was there.
    ///
    /// # Panics
    /// If the cell is vacant.
    pub fn remove(&mut self, x: i32, y: i32) -> Particle {
        let cell = Cell::new(x, y);
        let Some(particle) = self.cells.remove(&cell) else {
            panic!("remove from vacant cell {cell}");
        };
        self.active.remove(&cell);
        self.changelog.push(Change::Removed(cell));
        particle
    }

    /// # Panics
    /// If the cell is vacant.
    pub fn set_active(&mut self, x: i32, y: i32) {
        self.set_flag(Cell::new(x, y), true);
    }

    /// # Panics
    /// If the cell is vacant.
    pub fn set_inactive(&mut self, x: i32, y: i32) {
        self.set_flag(Cell::new(x, y), false);
    }

    fn set_flag(&mut self, cell: Cell, active: bool) {
        let Some(particle) = self.cells.get_mut(&cell) else {
            panic!("activity toggle on vacant cell {cell}");
        };
        particle.active = active;
        if active {
            self.active.insert(cell);
        } else {
            self.active.remove(&cell);
        }
    }

    /// Snapshot of every active particle, ordered top-to-bottom then
    /// left-to-right. Later store mutations do not affect the returned vec.
    pub fn active_cells(&self) -> Vec<Particle> {
        let mut out: Vec<Particle> = self
            .active
            .iter()
            .filter_map(|cell| self.cells.get(cell).copied())
            .collect();
        out.sort_by_key(|p| p.cell().row_major());
        out
    }

    /// Snapshot of every occupied cell, same ordering as `active_cells`
    pub fn all_cells(&self) -> Vec<Particle> {
        let mut out: Vec<Particle> = self.cells.values().copied().collect();
        out.sort_by_key(|p| p.cell().row_major());
        out
    }

    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Raw changelog entries recorded since the last drain
    pub fn pending_changes(&self) -> usize {
        self.changelog.len()
    }

    #[cfg(test)]
    pub(crate) fn changes(&self) -> &[Change] {
        &self.changelog
    }

    /// Take the changelog and reduce it to a repaint delta.
    ///
    /// The first entry for a cell says what it held when the frame started
    /// (`Removed` first means it was occupied). Comparing that against current
    /// occupancy gives the net change, so a grain removed and re-inserted at
    /// the same cell produces no delta.
    pub fn drain_changes(&mut self) -> FrameDelta {
        let mut was_occupied: HashMap<Cell, bool> = HashMap::new();
        for change in self.changelog.drain(..) {
            was_occupied
                .entry(change.cell())
                .or_insert(matches!(change, Change::Removed(_)));
        }

        let mut delta = FrameDelta::default();
        for (cell, before) in was_occupied {
            match (before, self.cells.contains_key(&cell)) {
                (false, true) => delta.additions.push(cell),
                (true, false) => delta.removals.push(cell),
                _ => {}
            }
        }
        delta.additions.sort_by_key(|c| c.row_major());
        delta.removals.sort_by_key(|c| c.row_major());
        delta
    }
}
