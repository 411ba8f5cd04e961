//! Particle record: a grain is identified by the cell it occupies

use grain_core::Cell;

/// Lifecycle of a grain. `Falling` grains are stepped every tick; `Settled`
/// is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleState {
    Falling,
    Settled,
}

/// Physics state of one grain.
///
/// Position is identity: two grains never share `(x, y)`, and a move is always
/// a remove at the old cell followed by an insert at the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    pub x: i32,
    pub y: i32,
    pub active: bool,
}

impl Particle {
    /// A freshly spawned grain, eligible for stepping
    pub fn falling(cell: Cell) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            active: true,
        }
    }

    pub fn settled(cell: Cell) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            active: false,
        }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    pub fn state(&self) -> ParticleState {
        if self.active {
            ParticleState::Falling
        } else {
            ParticleState::Settled
        }
    }

    /// Same grain at a different cell, keeping its active flag
    pub fn moved_to(self, cell: Cell) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falling_and_settled_states() {
        let p = Particle::falling(Cell::new(4, 5));
        assert_eq!(p.state(), ParticleState::Falling);
        assert_eq!(p.cell(), Cell::new(4, 5));

        let s = Particle::settled(Cell::new(4, 5));
        assert_eq!(s.state(), ParticleState::Settled);
    }

    #[test]
    fn test_moved_to_keeps_flag() {
        let p = Particle::settled(Cell::new(1, 1)).moved_to(Cell::new(2, 3));
        assert_eq!((p.x, p.y), (2, 3));
        assert!(!p.active);
    }
}
