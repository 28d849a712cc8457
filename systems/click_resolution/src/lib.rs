#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that maps a click on the surface to a claim or a failure.

use piano_tiles_core::{Command, FailureReason, SurfacePoint, TileId, TileView};

/// Classification of a single click against the active tile set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClickOutcome {
    /// The click covered the current target.
    Hit {
        /// Target tile that was hit.
        tile: TileId,
    },
    /// The click covered tiles, none of which is the target.
    WrongTile {
        /// First overlapping tile in creation order.
        tile: TileId,
    },
    /// The click covered no tile at all.
    Miss,
}

/// Click resolution system that reuses a scratch buffer between clicks.
#[derive(Debug, Default)]
pub struct ClickResolution {
    hits: Vec<(TileId, bool)>,
}

impl ClickResolution {
    /// Creates a new click resolution system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a click at `point` against the provided tiles.
    ///
    /// Tile bounds are inclusive on every edge. When several tiles overlap
    /// the click, the target wins regardless of creation order.
    pub fn classify(&mut self, point: SurfacePoint, tiles: &TileView) -> ClickOutcome {
        self.hits.clear();
        self.hits.extend(
            tiles
                .iter()
                .filter(|tile| tile.contains(point))
                .map(|tile| (tile.id, tile.is_target)),
        );

        if let Some((tile, _)) = self.hits.iter().find(|(_, is_target)| *is_target) {
            return ClickOutcome::Hit { tile: *tile };
        }

        match self.hits.first() {
            Some((tile, _)) => ClickOutcome::WrongTile { tile: *tile },
            None => ClickOutcome::Miss,
        }
    }

    /// Resolves a click into the command the world should apply.
    pub fn handle(&mut self, point: SurfacePoint, tiles: &TileView, out: &mut Vec<Command>) {
        let command = match self.classify(point, tiles) {
            ClickOutcome::Hit { tile } => Command::ClaimTile { tile },
            ClickOutcome::WrongTile { tile } => Command::FailSession {
                reason: FailureReason::WrongTile { tile },
            },
            ClickOutcome::Miss => Command::FailSession {
                reason: FailureReason::MissedClick { at: point },
            },
        };
        out.push(command);
    }
}
