use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use strata_blocks::{BlockFace, BlockType, FaceData, TileTable};
use strata_chunk::BlockLookup;
use strata_geom::IVec3;
use strata_runtime::{ChunkManager, ChunkRenderer};
use strata_world::{ChunkCoord, ChunkDims, WorldGenerator};

#[derive(Default)]
struct Recorder {
    resident: BTreeMap<ChunkCoord, usize>,
    uploads: Vec<ChunkCoord>,
    releases: Vec<ChunkCoord>,
    draws: usize,
}

impl ChunkRenderer for Recorder {
    fn upload(&mut self, coord: ChunkCoord, faces: &[FaceData]) {
        self.resident.insert(coord, faces.len());
        self.uploads.push(coord);
    }

    fn release(&mut self, coord: ChunkCoord) {
        self.resident.remove(&coord);
        self.releases.push(coord);
    }

    fn draw(&mut self, _coord: ChunkCoord, _face_count: usize) {
        self.draws += 1;
    }
}

fn manager() -> ChunkManager {
    ChunkManager::new(
        WorldGenerator::with_seed(11),
        ChunkDims::new(4, 4, 16).unwrap(),
        Arc::new(TileTable::default()),
    )
}

fn settle(m: &mut ChunkManager, r: &mut Recorder) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while m.pending_count() > 0 {
        m.drain_completed(r);
        assert!(Instant::now() < deadline, "worker did not finish");
        std::thread::sleep(Duration::from_millis(2));
    }
}

/// Every loaded chunk's face list must equal a rebuild against the
/// currently loaded world.
fn assert_seams_consistent(m: &ChunkManager) {
    for coord in m.loaded_coords() {
        let Some(chunk) = m.with_chunk(coord, |c| c.clone()) else {
            continue;
        };
        let mut rebuilt = chunk.clone();
        rebuilt.build_faces(m);
        let mut a: Vec<_> = chunk.faces().iter().map(|f| f.to_bits()).collect();
        let mut b: Vec<_> = rebuilt.faces().iter().map(|f| f.to_bits()).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b, "stale faces in chunk {:?}", coord);
    }
}

#[test]
fn init_loads_full_square() {
    let mut m = manager();
    let mut r = Recorder::default();
    assert_eq!(m.init_chunks(1), 9);
    assert_eq!(m.init_chunks(1), 0);
    settle(&mut m, &mut r);
    assert_eq!(m.chunk_count(), 9);
    assert_eq!(m.pending_count(), 0);
    assert_eq!(r.resident.len(), 9);
    assert_eq!(r.resident.values().sum::<usize>(), m.face_count());
    assert_seams_consistent(&m);

    m.render(&mut r);
    assert_eq!(r.draws, 9);
}

#[test]
fn streaming_evicts_by_chebyshev_distance() {
    let mut m = manager();
    let mut r = Recorder::default();
    m.stream_around(ChunkCoord::new(0, 0), 1, &mut r);
    settle(&mut m, &mut r);

    m.stream_around(ChunkCoord::new(2, 0), 1, &mut r);
    for c in [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 0), (0, 1)] {
        assert!(!m.is_loaded(c.into()));
        assert!(r.releases.contains(&c.into()));
    }
    assert!(m.is_loaded(ChunkCoord::new(1, 0)));
    settle(&mut m, &mut r);
    assert_eq!(m.chunk_count(), 9);
    assert!(m.loaded_coords().iter().all(|c| c.chebyshev(ChunkCoord::new(2, 0)) <= 1));
    assert_eq!(r.resident.len(), 9);
    assert_seams_consistent(&m);
}

#[test]
fn out_of_range_completions_are_dropped() {
    let mut m = manager();
    let mut r = Recorder::default();
    m.stream_around(ChunkCoord::new(0, 0), 1, &mut r);
    // Move away before anything has been drained.
    m.stream_around(ChunkCoord::new(10, 10), 0, &mut r);
    settle(&mut m, &mut r);
    assert_eq!(m.loaded_coords(), vec![ChunkCoord::new(10, 10)]);
    assert_eq!(r.uploads, vec![ChunkCoord::new(10, 10)]);
}

#[test]
fn lookup_reads_air_outside_loaded_world() {
    let mut m = manager();
    let mut r = Recorder::default();
    m.request_chunk(ChunkCoord::new(0, 0));
    settle(&mut m, &mut r);
    assert!(m.neighbor_block_at(IVec3::new(1, 1, 0)).is_solid());
    assert_eq!(m.neighbor_block_at(IVec3::new(1, 1, -1)), BlockType::Air);
    assert_eq!(m.neighbor_block_at(IVec3::new(1, 1, 16)), BlockType::Air);
    assert_eq!(m.block_at(IVec3::new(40, 1, 0)), BlockType::Air);
}

#[test]
fn boundary_removal_exposes_neighbor_face() {
    let mut m = manager();
    let mut r = Recorder::default();
    m.request_chunk(ChunkCoord::new(0, 0));
    m.request_chunk(ChunkCoord::new(1, 0));
    settle(&mut m, &mut r);
    assert_seams_consistent(&m);

    // z = 0 is always below the surface, so both sides of the seam are solid.
    let east = IVec3::new(0, 1, 0);
    let has_left = |m: &ChunkManager| {
        m.with_chunk(ChunkCoord::new(1, 0), |c| c.has_face(east, BlockFace::Left))
    };
    assert_eq!(has_left(&m), Some(false));

    r.uploads.clear();
    assert!(m.remove_block(IVec3::new(3, 1, 0), &mut r));
    assert_eq!(has_left(&m), Some(true));
    assert!(r.uploads.contains(&ChunkCoord::new(0, 0)));
    assert!(r.uploads.contains(&ChunkCoord::new(1, 0)));
    assert_eq!(m.neighbor_block_at(IVec3::new(3, 1, 0)), BlockType::Air);
    assert_seams_consistent(&m);

    assert!(m.add_block(IVec3::new(3, 1, 0), BlockType::Cobblestone, &mut r));
    assert_eq!(has_left(&m), Some(false));
    assert!(!m.add_block(IVec3::new(3, 1, 0), BlockType::Stone, &mut r));
    assert!(m.set_block(IVec3::new(3, 1, 0), BlockType::Stone, &mut r));
    assert_eq!(m.neighbor_block_at(IVec3::new(3, 1, 0)), BlockType::Stone);
    assert_seams_consistent(&m);
}

#[test]
fn seams_reopen_when_neighbor_is_evicted() {
    let mut m = manager();
    let mut r = Recorder::default();
    m.request_chunk(ChunkCoord::new(0, 0));
    m.request_chunk(ChunkCoord::new(0, 1));
    settle(&mut m, &mut r);
    let joined = m.face_count();

    r.uploads.clear();
    assert!(m.evict(ChunkCoord::new(0, 1), &mut r));
    assert!(!m.evict(ChunkCoord::new(0, 1), &mut r));
    assert_eq!(r.uploads, vec![ChunkCoord::new(0, 0)]);
    assert_eq!(r.releases, vec![ChunkCoord::new(0, 1)]);
    let reopened = m.with_chunk(ChunkCoord::new(0, 0), |c| {
        c.has_face(IVec3::new(0, 3, 0), BlockFace::Back)
    });
    assert_eq!(reopened, Some(true));
    assert!(m.face_count() < joined);
    assert_seams_consistent(&m);
}
