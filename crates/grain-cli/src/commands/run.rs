//! Headless simulation driver: update, drain, paint, repeat

use anyhow::{Context, Result};
use grain_render::{Framebuffer, Palette};
use grain_sim::{FrameStats, SimConfig, SimulationEngine};
use std::path::Path;
use std::time::Instant;

pub struct RunArgs {
    pub config: Option<String>,
    pub ticks: u64,
    pub seed: Option<u64>,
    pub spawn_rate: Option<f64>,
    pub height: Option<u32>,
    pub output: Option<String>,
    pub ascii: bool,
    pub ascii_step: u32,
    pub stats_every: u64,
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(rate) = args.spawn_rate {
        config.spawn_rate = rate;
    }
    log::debug!("effective config: {:?}", config);

    let height = args
        .height
        .unwrap_or_else(|| (config.floor_y.max(0) as u32).saturating_add(4));
    let width = config.width as u32;

    let mut engine = SimulationEngine::new(config).context("Invalid simulation config")?;
    let mut canvas = Framebuffer::new(width, height, Palette::default());
    canvas.draw_floor(engine.config().floor_y);
    engine.redraw(&mut canvas);

    println!(
        "[sim] {}x{} canvas, floor at y={}, source at ({}, {})",
        canvas.width(),
        canvas.height(),
        engine.config().floor_y,
        engine.config().source_x,
        engine.config().source_y
    );

    let started = Instant::now();
    let stats = simulate(&mut engine, &mut canvas, args.ticks, args.stats_every);
    let elapsed = started.elapsed();

    println!(
        "[sim] {} ticks in {:.2?}: {} grains ({} still falling), {} spawns dropped",
        engine.tick(),
        elapsed,
        stats.total_count,
        engine.store().active_count(),
        stats.spawns_blocked
    );

    if args.ascii {
        print!("{}", canvas.to_ascii(args.ascii_step));
    }

    if let Some(output) = &args.output {
        canvas
            .save_png(Path::new(output))
            .with_context(|| format!("Failed to write {}", output))?;
        println!(
            "[render] Saved {}x{} frame to {}",
            canvas.width(),
            canvas.height(),
            output
        );
    }

    Ok(())
}

/// Drive `ticks` frames, painting each frame's delta into `canvas`.
///
/// The delta time handed to the engine is the measured wall time of the
/// previous frame, so the reported FPS is the headless throughput.
pub fn simulate(
    engine: &mut SimulationEngine,
    canvas: &mut Framebuffer,
    ticks: u64,
    stats_every: u64,
) -> FrameStats {
    let mut last_frame = Instant::now();
    let mut delta_ms = 0.0;

    for _ in 0..ticks {
        let stats = *engine.update(delta_ms);
        engine.drain_changes().apply(canvas);

        if stats_every > 0 && stats.tick % stats_every == 0 {
            println!(
                "[sim] tick {:>6}  total {:>6}  active {:>5}  fps {}",
                stats.tick, stats.total_count, stats.active_count, stats.fps
            );
        }

        let now = Instant::now();
        delta_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = now;
    }

    engine.stats()
}

#[cfg(test)]
mod tests {
    use super::*;
    use grain_core::Cell;

    #[test]
    fn test_simulate_keeps_canvas_in_sync() {
        let config = SimConfig {
            floor_y: 12,
            source_x: 8,
            source_y: 0,
            width: 16,
            ..SimConfig::default()
        }
        .with_seed(3);
        let mut engine = SimulationEngine::new(config).unwrap();
        let mut canvas = Framebuffer::new(16, 16, Palette::default());

        let stats = simulate(&mut engine, &mut canvas, 60, 0);
        assert_eq!(stats.tick, 60);
        assert_eq!(engine.tick(), 60);

        let on_canvas = engine
            .full_snapshot()
            .into_iter()
            .filter(|c: &Cell| c.x >= 0 && c.x < 16 && c.y >= 0 && c.y < 16)
            .count();
        assert_eq!(canvas.particle_pixels(), on_canvas);
        assert_eq!(engine.store().pending_changes(), 0);
    }

    #[test]
    fn test_run_writes_png_at_floor_derived_height() {
        let dir = std::env::temp_dir().join(format!("grain_run_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config_path = dir.join("grain.toml");
        std::fs::write(&config_path, "floor_y = 20\nsource_x = 5\nsource_y = 0\nwidth = 12\n").unwrap();
        let png = dir.join("frame.png");

        let args = RunArgs {
            config: Some(config_path.display().to_string()),
            ticks: 30,
            seed: Some(4),
            spawn_rate: None,
            height: None,
            output: Some(png.display().to_string()),
            ascii: false,
            ascii_step: 4,
            stats_every: 0,
        };
        run(args).unwrap();

        let img = image::open(&png).unwrap();
        assert_eq!((img.width(), img.height()), (12, 24));

        std::fs::remove_file(&png).ok();
        std::fs::remove_file(&config_path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_run_rejects_bad_spawn_rate() {
        let args = RunArgs {
            config: None,
            ticks: 1,
            seed: Some(1),
            spawn_rate: Some(4.0),
            height: None,
            output: None,
            ascii: false,
            ascii_step: 4,
            stats_every: 0,
        };
        assert!(run(args).is_err());
    }
}
