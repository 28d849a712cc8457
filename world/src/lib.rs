#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative play board state for Piano Tiles.
//!
//! The world owns the active tile set of a single play session together with
//! the scroll speed, the running point counter and the failure latch. All
//! mutations go through [`apply`]; everything else reads the board through
//! the [`query`] module.

mod tiles;

use std::time::Duration;

use piano_tiles_core::{BoardGeometry, Command, Event, FailureReason, Lane, TileColor, TileId};

use self::tiles::Tile;

/// Scroll distance applied per frame when a session starts.
pub const DEFAULT_SCROLL_SPEED: f32 = 2.0;

/// Scroll speed gained per frame.
pub const DEFAULT_SCROLL_ACCELERATION: f32 = 0.001;

/// Alpha removed from a tile once the player clicks it.
pub const DEFAULT_CLICK_FADE: u8 = 100;

/// Parameters fixed for the lifetime of a play session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    geometry: BoardGeometry,
    tile_color: TileColor,
    click_fade: u8,
    scroll_speed: f32,
    scroll_acceleration: f32,
}

impl WorldConfig {
    /// Creates a configuration for the provided geometry using stock tuning.
    #[must_use]
    pub fn new(geometry: BoardGeometry) -> Self {
        Self {
            geometry,
            tile_color: TileColor::BLACK,
            click_fade: DEFAULT_CLICK_FADE,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            scroll_acceleration: DEFAULT_SCROLL_ACCELERATION,
        }
    }

    /// Overrides the color newly spawned tiles receive.
    #[must_use]
    pub fn with_tile_color(mut self, tile_color: TileColor) -> Self {
        self.tile_color = tile_color;
        self
    }

    /// Overrides the alpha removed from clicked tiles.
    #[must_use]
    pub fn with_click_fade(mut self, click_fade: u8) -> Self {
        self.click_fade = click_fade;
        self
    }

    /// Overrides the starting scroll speed and its per-frame growth.
    #[must_use]
    pub fn with_scroll(mut self, scroll_speed: f32, scroll_acceleration: f32) -> Self {
        self.scroll_speed = scroll_speed;
        self.scroll_acceleration = scroll_acceleration;
        self
    }

    /// Geometry the board is laid out with.
    #[must_use]
    pub const fn geometry(&self) -> BoardGeometry {
        self.geometry
    }
}

/// Represents the authoritative Piano Tiles play board.
#[derive(Debug)]
pub struct World {
    geometry: BoardGeometry,
    tile_color: TileColor,
    click_fade: u8,
    scroll_speed: f32,
    scroll_acceleration: f32,
    tiles: Vec<Tile>,
    next_tile_id: u32,
    target: Option<TileId>,
    points: u32,
    failure: Option<FailureReason>,
    tick_index: u64,
}

impl World {
    /// Creates an empty board ready for a new session.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            geometry: config.geometry,
            tile_color: config.tile_color,
            click_fade: config.click_fade,
            scroll_speed: config.scroll_speed,
            scroll_acceleration: config.scroll_acceleration,
            tiles: Vec::new(),
            next_tile_id: 0,
            target: None,
            points: 0,
            failure: None,
            tick_index: 0,
        }
    }

    fn spawn(&mut self, lane: Lane, y: f32, out_events: &mut Vec<Event>) {
        let lane = Lane::new(lane.get().min(self.geometry.lanes() - 1));
        let id = TileId::new(self.next_tile_id);
        self.next_tile_id = self.next_tile_id.wrapping_add(1);
        self.tiles.push(Tile {
            id,
            lane,
            x: self.geometry.lane_x(lane) as f32,
            y,
            width: self.geometry.lane_width() as f32,
            height: self.geometry.tile_height() as f32,
            color: self.tile_color,
            clicked: false,
            is_target: false,
        });
        log::trace!("tile {} spawned in lane {} at y={y}", id.get(), lane.get());
        out_events.push(Event::TileSpawned { tile: id, lane, y });
    }

    fn claim(&mut self, tile_id: TileId, out_events: &mut Vec<Event>) {
        if self.target != Some(tile_id) {
            self.fail(FailureReason::WrongTile { tile: tile_id }, out_events);
            return;
        }

        let Some(tile) = self.tiles.iter_mut().find(|tile| tile.id == tile_id) else {
            self.fail(FailureReason::WrongTile { tile: tile_id }, out_events);
            return;
        };

        tile.claim(self.click_fade);
        self.points = self.points.saturating_add(1);
        log::debug!("tile {} clicked, {} points", tile_id.get(), self.points);
        out_events.push(Event::TileClaimed {
            tile: tile_id,
            points: self.points,
        });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced { dt });

        self.refresh_target(out_events);
        tiles::advance(&mut self.tiles, self.scroll_speed);

        let exited = tiles::prune_exited(&mut self.tiles, self.geometry.surface_height() as f32);
        let mut escaped = None;
        for tile in exited {
            if !tile.clicked && escaped.is_none() {
                escaped = Some(tile.id);
            }
            out_events.push(Event::TileExited {
                tile: tile.id,
                clicked: tile.clicked,
            });
        }

        self.refresh_target(out_events);
        self.scroll_speed += self.scroll_acceleration;

        if let Some(tile) = escaped {
            self.fail(FailureReason::TileEscaped { tile }, out_events);
        }
    }

    fn fail(&mut self, reason: FailureReason, out_events: &mut Vec<Event>) {
        if self.failure.is_some() {
            return;
        }

        log::info!("session failed: {reason} ({} points)", self.points);
        self.failure = Some(reason);
        out_events.push(Event::SessionFailed {
            reason,
            points: self.points,
        });
    }

    fn refresh_target(&mut self, out_events: &mut Vec<Event>) {
        let target = tiles::designate_target(&mut self.tiles);
        if target != self.target {
            self.target = target;
            out_events.push(Event::TargetChanged { tile: target });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// A failed world is terminal: every command after the failure is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.failure.is_some() {
        return;
    }

    match command {
        Command::SpawnTile { lane, y } => {
            world.spawn(lane, y, out_events);
            world.refresh_target(out_events);
        }
        Command::ClaimTile { tile } => {
            world.claim(tile, out_events);
            world.refresh_target(out_events);
        }
        Command::FailSession { reason } => world.fail(reason, out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use piano_tiles_core::{BoardGeometry, FailureReason, TileId, TileView};

    use super::World;

    /// Captures a read-only view of the active tile set in creation order.
    #[must_use]
    pub fn tile_view(world: &World) -> TileView {
        TileView::from_snapshots(world.tiles.iter().map(|tile| tile.snapshot()).collect())
    }

    /// Geometry the board is laid out with.
    #[must_use]
    pub fn geometry(world: &World) -> BoardGeometry {
        world.geometry
    }

    /// Points scored so far in the session.
    #[must_use]
    pub fn points(world: &World) -> u32 {
        world.points
    }

    /// Current per-frame scroll distance.
    #[must_use]
    pub fn scroll_speed(world: &World) -> f32 {
        world.scroll_speed
    }

    /// Tile the player must click next, if any.
    #[must_use]
    pub fn target(world: &World) -> Option<TileId> {
        world.target
    }

    /// Reason the session failed, once it has.
    #[must_use]
    pub fn failure(world: &World) -> Option<FailureReason> {
        world.failure
    }

    /// Number of ticks applied since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
