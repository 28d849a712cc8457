#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Piano Tiles engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate raw window input
//! into [`InputEvent`] values, systems turn those into [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! happened. Systems never mutate the world directly; they query immutable
//! [`TileView`] snapshots and respond exclusively with new command batches.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Title shown on the menu screen and used as the window title prefix.
pub const GAME_TITLE: &str = "Piano Tiles!";

/// Smallest number of lanes or tile rows a board may be configured with.
pub const MIN_BOARD_DIVISIONS: u32 = 1;

/// Largest number of lanes or tile rows a board may be configured with.
pub const MAX_BOARD_DIVISIONS: u32 = 12;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Appends a new tile to the active set in the provided lane.
    SpawnTile {
        /// Lane the tile occupies.
        lane: Lane,
        /// Vertical position of the tile's top edge in surface units.
        y: f32,
    },
    /// Marks a tile as clicked by the player.
    ClaimTile {
        /// Identifier of the tile the player hit.
        tile: TileId,
    },
    /// Terminates the running session.
    FailSession {
        /// Reason the session ended.
        reason: FailureReason,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a tile joined the active set.
    TileSpawned {
        /// Identifier assigned to the new tile.
        tile: TileId,
        /// Lane the tile occupies.
        lane: Lane,
        /// Vertical position the tile was created at.
        y: f32,
    },
    /// Confirms that the player clicked the target tile.
    TileClaimed {
        /// Identifier of the claimed tile.
        tile: TileId,
        /// Points accumulated in the session after the claim.
        points: u32,
    },
    /// Reports that a tile scrolled past the bottom edge and was removed.
    TileExited {
        /// Identifier of the removed tile.
        tile: TileId,
        /// Whether the player had clicked the tile before it left.
        clicked: bool,
    },
    /// Announces that a different tile (or none) became the target.
    TargetChanged {
        /// New target tile, if any unclicked tile remains.
        tile: Option<TileId>,
    },
    /// Announces that the session reached its terminal failed state.
    SessionFailed {
        /// Reason the session ended.
        reason: FailureReason,
        /// Points accumulated before the failure.
        points: u32,
    },
}

/// Reasons a play session can fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FailureReason {
    /// The player clicked a point that no tile covers.
    MissedClick {
        /// Surface position of the click.
        at: SurfacePoint,
    },
    /// The player clicked a tile that was not the current target.
    WrongTile {
        /// Tile that was hit instead of the target.
        tile: TileId,
    },
    /// An unclicked tile scrolled past the bottom of the surface.
    TileEscaped {
        /// Tile that left the board unclicked.
        tile: TileId,
    },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissedClick { at } => {
                write!(f, "click at ({:.0}, {:.0}) missed every tile", at.x, at.y)
            }
            Self::WrongTile { tile } => write!(f, "tile {} clicked out of order", tile.get()),
            Self::TileEscaped { tile } => write!(f, "tile {} escaped unclicked", tile.get()),
        }
    }
}

/// Unique identifier assigned to a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Zero-based index of one of the equal-width vertical lanes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lane(u32);

impl Lane {
    /// Creates a new lane index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying lane index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Real-valued position on the render surface; `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SurfacePoint {
    /// Horizontal offset from the left edge.
    pub x: f32,
    /// Vertical offset from the top edge.
    pub y: f32,
}

impl SurfacePoint {
    /// Creates a new surface point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// RGBA color of a tile expressed as bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileColor {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel; 255 is fully opaque.
    pub alpha: u8,
}

impl TileColor {
    /// Opaque black, the stock tile color.
    pub const BLACK: Self = Self::from_rgba(0, 0, 0, 255);

    /// Creates a color from byte RGBA components.
    #[must_use]
    pub const fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Returns the color with its alpha lowered by `amount`, stopping at zero.
    #[must_use]
    pub const fn dimmed(self, amount: u8) -> Self {
        Self {
            alpha: self.alpha.saturating_sub(amount),
            ..self
        }
    }
}

impl Default for TileColor {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Lane and row layout derived from the render surface size.
///
/// Lane width and tile height use integer division so that spawning and
/// grid rendering agree on every boundary. Both division counts are clamped
/// into `MIN_BOARD_DIVISIONS..=MAX_BOARD_DIVISIONS`, which keeps the derived
/// sizes free of division by zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardGeometry {
    surface_width: u32,
    surface_height: u32,
    lanes: u32,
    tile_rows: u32,
}

impl BoardGeometry {
    /// Creates a geometry description, clamping `lanes` and `tile_rows`.
    #[must_use]
    pub fn new(surface_width: u32, surface_height: u32, lanes: u32, tile_rows: u32) -> Self {
        Self {
            surface_width,
            surface_height,
            lanes: clamp_divisions(lanes),
            tile_rows: clamp_divisions(tile_rows),
        }
    }

    /// Width of the render surface.
    #[must_use]
    pub const fn surface_width(&self) -> u32 {
        self.surface_width
    }

    /// Height of the render surface.
    #[must_use]
    pub const fn surface_height(&self) -> u32 {
        self.surface_height
    }

    /// Number of vertical lanes tiles can spawn into.
    #[must_use]
    pub const fn lanes(&self) -> u32 {
        self.lanes
    }

    /// Number of tile-height divisions stacked vertically on the surface.
    #[must_use]
    pub const fn tile_rows(&self) -> u32 {
        self.tile_rows
    }

    /// Width of a single lane, truncated to whole surface units.
    #[must_use]
    pub const fn lane_width(&self) -> u32 {
        self.surface_width / self.lanes
    }

    /// Height of a single tile, truncated to whole surface units.
    #[must_use]
    pub const fn tile_height(&self) -> u32 {
        self.surface_height / self.tile_rows
    }

    /// Left edge of the provided lane.
    #[must_use]
    pub const fn lane_x(&self, lane: Lane) -> u32 {
        lane.get() * self.lane_width()
    }

    /// Number of tiles the spawner keeps in the active set.
    #[must_use]
    pub const fn tile_budget(&self) -> usize {
        self.lanes as usize + 1
    }
}

/// Clamps a lane or tile-row count into the supported range.
#[must_use]
pub fn clamp_divisions(value: u32) -> u32 {
    value.clamp(MIN_BOARD_DIVISIONS, MAX_BOARD_DIVISIONS)
}

/// Immutable representation of a single tile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSnapshot {
    /// Identifier assigned to the tile.
    pub id: TileId,
    /// Lane the tile occupies.
    pub lane: Lane,
    /// Left edge in surface units.
    pub x: f32,
    /// Top edge in surface units.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
    /// Current color, dimmed once the tile is clicked.
    pub color: TileColor,
    /// Whether the player already clicked the tile.
    pub clicked: bool,
    /// Whether the tile is the single tile the player must click next.
    pub is_target: bool,
}

impl TileSnapshot {
    /// Reports whether the point lies within the tile, edges included.
    #[must_use]
    pub fn contains(&self, point: SurfacePoint) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Read-only snapshot describing the active tile set in creation order.
#[derive(Clone, Debug, Default)]
pub struct TileView {
    snapshots: Vec<TileSnapshot>,
}

impl TileView {
    /// Creates a new tile view from snapshots already in creation order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<TileSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured tile snapshots in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &TileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of tiles in the active set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the active set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Tile currently flagged as the target, if any.
    #[must_use]
    pub fn target(&self) -> Option<&TileSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.is_target)
    }
}

/// Mouse buttons the input layer distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; the only one gameplay reacts to.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

/// Keys recognised by the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Adds a tile row (`Up`).
    TilesUp,
    /// Removes a tile row (`Down`).
    TilesDown,
    /// Adds a lane (`Right`).
    LanesUp,
    /// Removes a lane (`Left`).
    LanesDown,
    /// Toggles cursor lock (`L`).
    ToggleCursorLock,
}

/// Discrete input events drained from the host window once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// The window was asked to close.
    Quit,
    /// A mouse button went down.
    MouseDown {
        /// Button that was pressed.
        button: MouseButton,
        /// Cursor position at the time of the press.
        position: SurfacePoint,
    },
    /// A recognised key went down.
    KeyDown {
        /// Key that was pressed.
        key: Key,
    },
}
