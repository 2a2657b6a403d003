//! Headless frame loop: walks a reference point through the world, streams
//! chunks around it and edits the terrain under it with pick rays.

use std::thread;
use std::time::{Duration, Instant};

use strata_blocks::BlockType;
use strata_geom::Vec3;
use strata_runtime::ChunkManager;
use strata_world::ChunkCoord;

use crate::config::EngineConfig;
use crate::raycast::cast_ray;
use crate::renderer::HeadlessRenderer;

#[derive(Clone, Copy, Debug, Default)]
pub struct RunStats {
    pub frames: u32,
    pub inserted: usize,
    pub picks: u32,
    pub edits: u32,
}

pub struct App {
    manager: ChunkManager,
    renderer: HeadlessRenderer,
    cfg: EngineConfig,
    position: Vec3,
}

impl App {
    pub fn new(manager: ChunkManager, cfg: EngineConfig) -> Self {
        let dims = manager.dims();
        let position = Vec3::new(dims.sx as f32 * 0.5, dims.sy as f32 * 0.5, dims.sz as f32);
        Self {
            manager,
            renderer: HeadlessRenderer::new(),
            cfg,
            position,
        }
    }

    pub fn manager(&self) -> &ChunkManager {
        &self.manager
    }

    pub fn renderer(&self) -> &HeadlessRenderer {
        &self.renderer
    }

    pub fn run(&mut self) -> RunStats {
        let mut stats = RunStats::default();
        let dims = self.manager.dims();
        let frame_time = Duration::from_millis(self.cfg.frame_time_ms);
        log::info!(
            target: "events",
            "running {} frames, render distance {}",
            self.cfg.frames,
            self.cfg.render_distance
        );

        for frame in 0..self.cfg.frames {
            let started = Instant::now();
            let center = ChunkCoord::containing(self.position.round_to_cell(), dims);
            self.manager
                .stream_around(center, self.cfg.render_distance, &mut self.renderer);
            stats.inserted += self.manager.drain_completed(&mut self.renderer);

            if self.cfg.pick_every > 0 && frame > 0 && frame % self.cfg.pick_every == 0 {
                stats.picks += 1;
                if self.pick(stats.picks) {
                    stats.edits += 1;
                }
            }

            self.manager.render(&mut self.renderer);
            self.position.x += self.cfg.walk_speed * dims.sx as f32;
            stats.frames += 1;

            if frame % 60 == 0 {
                log::debug!(
                    target: "events",
                    "frame {} center=({}, {}) chunks={} pending={} faces={}",
                    frame,
                    center.cx,
                    center.cy,
                    self.manager.chunk_count(),
                    self.manager.pending_count(),
                    self.manager.face_count()
                );
            }
            let spent = started.elapsed();
            if spent < frame_time {
                thread::sleep(frame_time - spent);
            }
        }
        stats
    }

    /// Casts straight down from above the reference point. Odd picks dig out
    /// the struck block, even picks stack cobblestone on it.
    fn pick(&mut self, n: u32) -> bool {
        let dims = self.manager.dims();
        let origin = Vec3::new(self.position.x, self.position.y, dims.sz as f32);
        let hit = cast_ray(
            origin,
            Vec3::new(0.0, 0.0, -1.0),
            dims.sz as f32 + 1.0,
            &self.manager,
        );
        log::info!(target: "edits", "{}", hit);
        if !hit.is_hit() {
            return false;
        }
        if n % 2 == 1 {
            self.manager.remove_block(hit.position, &mut self.renderer)
        } else {
            self.manager
                .add_block(hit.place_position(), BlockType::Cobblestone, &mut self.renderer)
        }
    }

    /// Keeps draining until the worker is idle or `timeout` passes.
    pub fn settle(&mut self, timeout: Duration) -> usize {
        let deadline = Instant::now() + timeout;
        let mut inserted = 0;
        loop {
            inserted += self.manager.drain_completed(&mut self.renderer);
            if self.manager.pending_count() == 0 || Instant::now() >= deadline {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        inserted
    }

    /// Total greedy rectangles over all live chunks.
    pub fn greedy_rect_count(&self) -> usize {
        self.manager
            .loaded_coords()
            .into_iter()
            .filter_map(|c| self.manager.with_chunk(c, |chunk| chunk.greedy_faces().len()))
            .sum()
    }
}
