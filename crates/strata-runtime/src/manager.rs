use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use strata_blocks::{BlockFace, BlockType, TileTable};
use strata_chunk::{BlockLookup, Chunk, EditOutcome, Isolated};
use strata_geom::IVec3;
use strata_world::{ChunkCoord, ChunkDims, WorldGenerator};

use crate::index::{ChunkSlot, Index, IndexAccess, IndexView};
use crate::renderer::ChunkRenderer;

const HORIZONTAL: [BlockFace; 4] = [
    BlockFace::Front,
    BlockFace::Back,
    BlockFace::Left,
    BlockFace::Right,
];

/// Owns every live chunk, streams chunks in and out around a center and
/// applies block edits.
///
/// Chunks are generated and meshed on a single background thread. Finished
/// chunks wait on a channel until the owner calls [`drain_completed`], which
/// is the only place they enter the index and reach the renderer.
///
/// [`drain_completed`]: ChunkManager::drain_completed
pub struct ChunkManager {
    dims: ChunkDims,
    index: Arc<Mutex<Index>>,
    req_tx: Option<Sender<ChunkCoord>>,
    done_rx: Receiver<Box<Chunk>>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    window: Option<(ChunkCoord, i32)>,
}

fn lock(index: &Mutex<Index>) -> MutexGuard<'_, Index> {
    index.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lookup for the worker: takes the lock for one query at a time so the
/// owner thread is never blocked for a whole meshing pass.
struct SharedLookup<'a> {
    index: &'a Mutex<Index>,
    dims: ChunkDims,
}

impl BlockLookup for SharedLookup<'_> {
    fn block_at(&self, pos: IVec3) -> BlockType {
        let map = lock(self.index);
        IndexView {
            map: &map,
            dims: self.dims,
        }
        .block_at(pos)
    }
}

fn run_worker(
    rx: Receiver<ChunkCoord>,
    tx: Sender<Box<Chunk>>,
    running: Arc<AtomicBool>,
    index: Arc<Mutex<Index>>,
    generator: WorldGenerator,
    dims: ChunkDims,
    tiles: Arc<TileTable>,
) {
    while running.load(Ordering::Acquire) {
        let coord = match rx.recv_timeout(Duration::from_millis(50)) {
            Ok(c) => c,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        let mut chunk = Box::new(Chunk::new(coord, dims, tiles.clone()));
        chunk.generate(&generator);
        chunk.build_faces(&SharedLookup {
            index: &index,
            dims,
        });
        log::debug!(
            target: "chunks",
            "built ({}, {}) faces={}",
            coord.cx,
            coord.cy,
            chunk.face_count()
        );
        if tx.send(chunk).is_err() {
            break;
        }
    }
}

impl ChunkManager {
    pub fn new(generator: WorldGenerator, dims: ChunkDims, tiles: Arc<TileTable>) -> Self {
        let (req_tx, req_rx) = unbounded::<ChunkCoord>();
        let (done_tx, done_rx) = unbounded::<Box<Chunk>>();
        let index = Arc::new(Mutex::new(Index::new()));
        let running = Arc::new(AtomicBool::new(true));

        let worker = {
            let index = index.clone();
            let running = running.clone();
            thread::Builder::new()
                .name("strata-chunk-worker".into())
                .spawn(move || run_worker(req_rx, done_tx, running, index, generator, dims, tiles))
                .expect("chunk worker thread")
        };
        log::info!(
            target: "chunks",
            "chunk manager started: dims={}x{}x{}",
            dims.sx,
            dims.sy,
            dims.sz
        );

        Self {
            dims,
            index,
            req_tx: Some(req_tx),
            done_rx,
            running,
            worker: Some(worker),
            window: None,
        }
    }

    #[inline]
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    /// Queues a chunk for construction. Returns false when the chunk is
    /// already pending or live.
    pub fn request_chunk(&self, coord: ChunkCoord) -> bool {
        let Some(tx) = &self.req_tx else {
            return false;
        };
        {
            let mut map = lock(&self.index);
            if map.contains_key(&coord) {
                return false;
            }
            map.insert(coord, ChunkSlot::Pending);
        }
        if tx.send(coord).is_err() {
            lock(&self.index).remove(&coord);
            log::warn!(
                target: "chunks",
                "worker gone; dropped request ({}, {})",
                coord.cx,
                coord.cy
            );
            return false;
        }
        log::trace!(target: "chunks", "requested ({}, {})", coord.cx, coord.cy);
        true
    }

    /// Publishes every chunk the worker has finished. Returns how many were
    /// inserted into the index.
    pub fn drain_completed(&mut self, renderer: &mut impl ChunkRenderer) -> usize {
        let mut inserted = 0;
        let finished: Vec<Box<Chunk>> = self.done_rx.try_iter().collect();
        for mut chunk in finished {
            let coord = chunk.coord();
            let mut map = lock(&self.index);
            if !self.in_window(coord) {
                map.remove(&coord);
                log::debug!(target: "chunks", "evicted ({}, {}) on arrival", coord.cx, coord.cy);
                continue;
            }

            // The chunk was meshed against whatever was loaded at build time.
            for side in HORIZONTAL {
                chunk.reconcile_border(
                    side,
                    &IndexView {
                        map: &map,
                        dims: self.dims,
                    },
                );
            }
            let mut refreshed = Vec::new();
            for side in HORIZONTAL {
                let Some(n) = coord.neighbor(side) else {
                    continue;
                };
                if let Some(neighbor) = map.get_mut(&n).and_then(ChunkSlot::chunk_mut) {
                    if neighbor.reconcile_border(side.inverse(), &*chunk) {
                        refreshed.push(n);
                    }
                }
            }

            renderer.upload(coord, chunk.faces());
            map.insert(coord, ChunkSlot::Ready(chunk));
            Self::publish(&map, &refreshed, renderer);
            inserted += 1;
            log::debug!(target: "chunks", "inserted ({}, {})", coord.cx, coord.cy);
        }
        inserted
    }

    /// Block at a world position; air where nothing is loaded or outside the
    /// vertical range.
    pub fn neighbor_block_at(&self, pos: IVec3) -> BlockType {
        let map = lock(&self.index);
        IndexView {
            map: &map,
            dims: self.dims,
        }
        .block_at(pos)
    }

    /// Drops a live chunk and releases its renderer resources. Pending slots
    /// are left alone.
    pub fn evict(&mut self, coord: ChunkCoord, renderer: &mut impl ChunkRenderer) -> bool {
        let mut map = lock(&self.index);
        if !map.get(&coord).is_some_and(ChunkSlot::is_ready) {
            return false;
        }
        map.remove(&coord);
        renderer.release(coord);

        let mut refreshed = Vec::new();
        for side in HORIZONTAL {
            let Some(n) = coord.neighbor(side) else {
                continue;
            };
            if let Some(neighbor) = map.get_mut(&n).and_then(ChunkSlot::chunk_mut) {
                if neighbor.reconcile_border(side.inverse(), &Isolated) {
                    refreshed.push(n);
                }
            }
        }
        Self::publish(&map, &refreshed, renderer);
        log::debug!(target: "chunks", "evicted ({}, {})", coord.cx, coord.cy);
        true
    }

    /// Evicts live chunks farther than `radius` (Chebyshev) from `center` and
    /// requests every missing chunk inside it. Returns the number of new
    /// requests.
    pub fn stream_around(
        &mut self,
        center: ChunkCoord,
        radius: i32,
        renderer: &mut impl ChunkRenderer,
    ) -> usize {
        self.window = Some((center, radius));
        let stale: Vec<ChunkCoord> = lock(&self.index)
            .iter()
            .filter(|(c, slot)| slot.is_ready() && c.chebyshev(center) > radius)
            .map(|(c, _)| *c)
            .collect();
        for c in stale {
            self.evict(c, renderer);
        }
        center
            .square(radius)
            .into_iter()
            .filter(|c| self.request_chunk(*c))
            .count()
    }

    /// Requests the full square of chunks around the world origin.
    pub fn init_chunks(&mut self, radius: i32) -> usize {
        let center = ChunkCoord::new(0, 0);
        self.window = Some((center, radius));
        center
            .square(radius)
            .into_iter()
            .filter(|c| self.request_chunk(*c))
            .count()
    }

    pub fn set_block(
        &mut self,
        pos: IVec3,
        ty: BlockType,
        renderer: &mut impl ChunkRenderer,
    ) -> bool {
        self.edit(pos, renderer, |chunk, local, access| {
            chunk.set_block_at(local, ty, access)
        })
    }

    pub fn add_block(
        &mut self,
        pos: IVec3,
        ty: BlockType,
        renderer: &mut impl ChunkRenderer,
    ) -> bool {
        self.edit(pos, renderer, |chunk, local, access| {
            chunk.add_block_at(local, ty, access)
        })
    }

    pub fn remove_block(&mut self, pos: IVec3, renderer: &mut impl ChunkRenderer) -> bool {
        self.edit(pos, renderer, |chunk, local, access| {
            chunk.remove_block_at(local, access)
        })
    }

    fn edit(
        &mut self,
        pos: IVec3,
        renderer: &mut impl ChunkRenderer,
        apply: impl FnOnce(&mut Chunk, IVec3, &mut IndexAccess<'_>) -> EditOutcome,
    ) -> bool {
        if pos.z < 0 || pos.z >= self.dims.sz as i32 {
            log::trace!(target: "edits", "edit at {} outside vertical range", pos);
            return false;
        }
        let coord = ChunkCoord::containing(pos, self.dims);
        let mut map = lock(&self.index);
        // Taken out so neighbors can be borrowed mutably alongside it.
        let mut chunk = match map.remove(&coord) {
            Some(ChunkSlot::Ready(c)) => c,
            Some(slot) => {
                map.insert(coord, slot);
                log::trace!(target: "edits", "edit at {} in unfinished chunk", pos);
                return false;
            }
            None => {
                log::trace!(target: "edits", "edit at {} in unloaded chunk", pos);
                return false;
            }
        };
        let local = pos - chunk.world_origin();
        let outcome = apply(
            &mut *chunk,
            local,
            &mut IndexAccess {
                map: &mut map,
                dims: self.dims,
            },
        );
        if outcome.changed {
            renderer.upload(coord, chunk.faces());
        }
        map.insert(coord, ChunkSlot::Ready(chunk));
        Self::publish(&map, &outcome.touched, renderer);
        outcome.changed
    }

    /// Issues one draw per live chunk.
    pub fn render(&self, renderer: &mut impl ChunkRenderer) {
        let map = lock(&self.index);
        for (coord, slot) in map.iter() {
            if let Some(chunk) = slot.chunk() {
                renderer.draw(*coord, chunk.face_count());
            }
        }
    }

    pub fn chunk_count(&self) -> usize {
        lock(&self.index).values().filter(|s| s.is_ready()).count()
    }

    pub fn pending_count(&self) -> usize {
        lock(&self.index).values().filter(|s| !s.is_ready()).count()
    }

    pub fn face_count(&self) -> usize {
        lock(&self.index)
            .values()
            .filter_map(ChunkSlot::chunk)
            .map(Chunk::face_count)
            .sum()
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        lock(&self.index).get(&coord).is_some_and(ChunkSlot::is_ready)
    }

    pub fn loaded_coords(&self) -> Vec<ChunkCoord> {
        lock(&self.index)
            .iter()
            .filter(|(_, s)| s.is_ready())
            .map(|(c, _)| *c)
            .collect()
    }

    /// Runs `f` on a live chunk while the index is locked. `f` must not call
    /// back into the manager.
    pub fn with_chunk<R>(&self, coord: ChunkCoord, f: impl FnOnce(&Chunk) -> R) -> Option<R> {
        lock(&self.index).get(&coord).and_then(ChunkSlot::chunk).map(f)
    }

    fn in_window(&self, coord: ChunkCoord) -> bool {
        match self.window {
            Some((center, radius)) => coord.chebyshev(center) <= radius,
            None => true,
        }
    }

    fn publish(map: &Index, coords: &[ChunkCoord], renderer: &mut impl ChunkRenderer) {
        for c in coords {
            if let Some(chunk) = map.get(c).and_then(ChunkSlot::chunk) {
                renderer.upload(*c, chunk.faces());
            }
        }
    }
}

impl BlockLookup for ChunkManager {
    fn block_at(&self, pos: IVec3) -> BlockType {
        self.neighbor_block_at(pos)
    }
}

impl Drop for ChunkManager {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        self.req_tx.take();
        if let Some(handle) = self.worker.take() {
            join_worker(handle);
        }
    }
}

/// Waits for the worker to exit. Returns false, after logging, if it
/// panicked.
fn join_worker(handle: JoinHandle<()>) -> bool {
    let name = handle.thread().name().unwrap_or("worker").to_string();
    match handle.join() {
        Ok(()) => true,
        Err(_) => {
            log::warn!(target: "chunks", "{} panicked before shutdown", name);
            false
        }
    }
}
