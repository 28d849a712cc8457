#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting tile spawn commands.
//!
//! The spawner keeps the active set at `lanes + 1` tiles. The very first
//! batch is stacked entirely above the visible surface so it scrolls in;
//! later top-ups fill the slot indices that went missing, one tile height
//! above the previous one.

use piano_tiles_core::{BoardGeometry, Command, Lane, TileView};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of lane indices for newly spawned tiles.
pub trait LaneSource {
    /// Returns a lane in `0..lane_count`; `lane_count` is never zero.
    fn next_lane(&mut self, lane_count: u32) -> Lane;
}

/// Uniformly random lanes drawn from an explicitly seeded generator.
#[derive(Clone, Debug)]
pub struct SeededLanes {
    rng: ChaCha8Rng,
}

impl SeededLanes {
    /// Creates a lane source that replays identically for identical seeds.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl LaneSource for SeededLanes {
    fn next_lane(&mut self, lane_count: u32) -> Lane {
        Lane::new(self.rng.gen_range(0..lane_count.max(1)))
    }
}

/// Cycles through a fixed lane sequence, wrapping each entry into range.
#[derive(Clone, Debug)]
pub struct ScriptedLanes {
    script: Vec<u32>,
    cursor: usize,
}

impl ScriptedLanes {
    /// Creates a lane source that repeats `script` forever.
    ///
    /// An empty script always yields lane zero.
    #[must_use]
    pub fn new(script: impl Into<Vec<u32>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }
}

impl LaneSource for ScriptedLanes {
    fn next_lane(&mut self, lane_count: u32) -> Lane {
        if self.script.is_empty() {
            return Lane::new(0);
        }

        let lane = self.script[self.cursor % self.script.len()];
        self.cursor = (self.cursor + 1) % self.script.len();
        Lane::new(lane % lane_count.max(1))
    }
}

/// Pure system that replenishes the active tile set.
#[derive(Debug)]
pub struct Spawning<L> {
    lanes: L,
}

impl<L: LaneSource> Spawning<L> {
    /// Creates a new spawning system drawing lanes from `lanes`.
    #[must_use]
    pub fn new(lanes: L) -> Self {
        Self { lanes }
    }

    /// Consumes the current tile view and emits the spawn commands needed to
    /// restore the tile budget.
    pub fn handle(&mut self, tiles: &TileView, geometry: &BoardGeometry, out: &mut Vec<Command>) {
        let budget = geometry.tile_budget();
        let present = tiles.len();
        if present >= budget {
            return;
        }

        let lead_in = if present == 0 {
            i64::from(geometry.tile_rows())
        } else {
            0
        };

        for slot in present..budget {
            let lane = self.lanes.next_lane(geometry.lanes());
            let y = spawn_height(geometry, slot, lead_in);
            out.push(Command::SpawnTile { lane, y });
        }
    }

    /// Releases the lane source so it can seed the next session.
    #[must_use]
    pub fn into_lane_source(self) -> L {
        self.lanes
    }
}

fn spawn_height(geometry: &BoardGeometry, slot: usize, lead_in: i64) -> f32 {
    let surface_height = i64::from(geometry.surface_height());
    let tile_height = i64::from(geometry.tile_height());
    let slot = i64::try_from(slot).unwrap_or(i64::MAX / 2);
    (surface_height - (slot + 1 + lead_in) * tile_height) as f32
}
