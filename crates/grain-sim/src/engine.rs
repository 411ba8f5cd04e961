//! Sand simulation engine: spawning, falling and settling

use crate::config::SimConfig;
use crate::delta::FrameDelta;
use crate::particle::Particle;
use crate::sink::PixelSink;
use crate::stats::{fps_from_delta, FrameStats};
use crate::store::ParticleStore;
use grain_core::{Cell, Result};
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Where a grain ends up after one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Fall(Cell),
    Slide(Cell),
    Blocked,
}

/// Owns a [`ParticleStore`] and advances it one tick at a time.
///
/// Each frame is `update(dt)` followed by exactly one `drain_changes()`.
/// Calling `update` again before draining panics.
pub struct SimulationEngine {
    store: ParticleStore,
    config: SimConfig,
    rng: StdRng,
    stats: FrameStats,
    /// Set by `update`, cleared by `drain_changes`
    frame_open: bool,
    source_buried_reported: bool,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let rng = make_rng(config.seed);
        info!(
            "sand engine: floor_y={} source={} spawn_rate={}",
            config.floor_y,
            config.source(),
            config.spawn_rate
        );
        Ok(Self {
            store: ParticleStore::new(),
            config,
            rng,
            stats: FrameStats::default(),
            frame_open: false,
            source_buried_reported: false,
        })
    }

    /// Replace floor, source and spawn rate. Existing grains are kept where
    /// they are. An invalid config leaves the engine untouched.
    pub fn configure(&mut self, config: SimConfig) -> Result<()> {
        config.validate()?;
        if config.seed.is_some() && config.seed != self.config.seed {
            self.rng = make_rng(config.seed);
        }
        if config.source() != self.config.source() {
            self.source_buried_reported = false;
        }
        info!(
            "sand engine reconfigured: floor_y={} source={} spawn_rate={}",
            config.floor_y,
            config.source(),
            config.spawn_rate
        );
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// Put a grain directly into the field (obstacles, prepared piles).
    ///
    /// # Panics
    /// If the cell is already occupied.
    pub fn place(&mut self, cell: Cell, active: bool) {
        let particle = if active {
            Particle::falling(cell)
        } else {
            Particle::settled(cell)
        };
        self.store.insert(particle);
    }

    /// Number of completed ticks
    pub fn tick(&self) -> u64 {
        self.stats.tick
    }

    /// Advance one tick. `delta_ms` only feeds the FPS counter; grains always
    /// move at most one cell per tick.
    ///
    /// # Panics
    /// If the previous frame's changes were never drained.
    pub fn update(&mut self, delta_ms: f64) -> &FrameStats {
        assert!(
            !self.frame_open,
            "update called before the previous frame's changes were drained"
        );

        let snapshot = self.store.active_cells();
        self.stats.active_count = snapshot.len();
        self.stats.fps = fps_from_delta(delta_ms);

        self.spawn();

        // Bottom-up, so a grain vacates its cell before the one above looks at it.
        let mut settled = 0;
        for particle in snapshot.into_iter().rev() {
            debug_assert_eq!(self.store.get(particle.x, particle.y), Some(particle));
            if self.step_particle(particle) {
                settled += 1;
            }
        }

        self.stats.tick += 1;
        self.stats.settled_this_tick = settled;
        self.stats.total_count = self.store.count();
        self.frame_open = true;

        debug!(
            "tick {}: total={} active={} settled={} fps={}",
            self.stats.tick,
            self.stats.total_count,
            self.stats.active_count,
            settled,
            self.stats.fps
        );
        &self.stats
    }

    /// Hand the frame's changes to the renderer and close the frame
    pub fn drain_changes(&mut self) -> FrameDelta {
        self.frame_open = false;
        self.store.drain_changes()
    }

    /// Every occupied cell, for full redraws
    pub fn full_snapshot(&self) -> Vec<Cell> {
        self.store.all_cells().iter().map(Particle::cell).collect()
    }

    /// Paint every occupied cell into `sink`
    pub fn redraw<S: PixelSink + ?Sized>(&self, sink: &mut S) {
        for cell in self.full_snapshot() {
            sink.set_pixel(cell);
        }
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    #[cfg(test)]
    fn source_buried_reported(&self) -> bool {
        self.source_buried_reported
    }

    fn spawn(&mut self) {
        let rate = self.config.spawn_rate;
        let attempt = rate >= 1.0 || (rate > 0.0 && self.rng.random_bool(rate));
        if !attempt {
            return;
        }

        let source = self.config.source();
        match self.store.get(source.x, source.y) {
            None => {
                self.store.insert(Particle::falling(source));
                self.stats.spawned += 1;
            }
            Some(occupant) => {
                self.stats.spawns_blocked += 1;
                trace!("spawn skipped, source {source} occupied");
                if !occupant.active && !self.source_buried_reported {
                    self.source_buried_reported = true;
                    warn!("source {source} is buried under settled sand; no further spawns");
                }
            }
        }
    }

    /// Step one grain; returns true if it settled this tick
    fn step_particle(&mut self, particle: Particle) -> bool {
        let cell = particle.cell();

        if cell.y >= self.config.floor_y {
            self.store.set_inactive(cell.x, cell.y);
            trace!("grain settled on floor at {cell}");
            return true;
        }

        let particle = self.store.remove(cell.x, cell.y);
        match self.resolve(cell) {
            Step::Fall(target) | Step::Slide(target) => {
                self.store.insert(particle.moved_to(target));
                false
            }
            Step::Blocked => {
                self.store.insert(Particle::settled(cell));
                trace!("grain settled on pile at {cell}");
                true
            }
        }
    }

    /// Pick the destination for a grain that has been lifted out of `cell`
    fn resolve(&mut self, cell: Cell) -> Step {
        let below = cell.below();
        if self.store.is_free(below.x, below.y) {
            return Step::Fall(below);
        }

        let left = cell.below_left();
        let right = cell.below_right();
        match (
            self.store.is_free(left.x, left.y),
            self.store.is_free(right.x, right.y),
        ) {
            (true, true) => {
                if self.rng.random_bool(0.5) {
                    Step::Slide(left)
                } else {
                    Step::Slide(right)
                }
            }
            (true, false) => Step::Slide(left),
            (false, true) => Step::Slide(right),
            (false, false) => Step::Blocked,
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}
