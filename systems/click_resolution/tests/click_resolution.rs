use piano_tiles_core::{
    BoardGeometry, Command, FailureReason, Lane, SurfacePoint, TileColor, TileId, TileSnapshot,
    TileView,
};
use piano_tiles_system_click_resolution::{ClickOutcome, ClickResolution};
use piano_tiles_world::{self as world, query, World, WorldConfig};

fn board_with(tiles: &[(u32, f32)]) -> World {
    let mut world = World::new(WorldConfig::new(BoardGeometry::new(540, 960, 4, 4)));
    let mut events = Vec::new();
    for &(lane, y) in tiles {
        world::apply(
            &mut world,
            Command::SpawnTile {
                lane: Lane::new(lane),
                y,
            },
            &mut events,
        );
    }
    world
}

fn click(world: &mut World, x: f32, y: f32) -> Command {
    let mut resolution = ClickResolution::new();
    let mut commands = Vec::new();
    resolution.handle(
        SurfacePoint::new(x, y),
        &query::tile_view(world),
        &mut commands,
    );
    assert_eq!(commands.len(), 1, "exactly one command per click");
    let command = commands.remove(0);
    let mut events = Vec::new();
    world::apply(world, command.clone(), &mut events);
    command
}

#[test]
fn clicking_the_target_claims_it() {
    let mut world = board_with(&[(1, 100.0), (2, -140.0)]);

    let command = click(&mut world, 150.0, 200.0);

    assert_eq!(
        command,
        Command::ClaimTile {
            tile: TileId::new(0)
        }
    );
    assert_eq!(query::points(&world), 1);
    assert!(query::failure(&world).is_none());
}

#[test]
fn clicking_an_upper_tile_fails_with_wrong_tile() {
    let mut world = board_with(&[(1, 100.0), (2, -140.0)]);

    let _ = click(&mut world, 300.0, 50.0);

    assert_eq!(
        query::failure(&world),
        Some(FailureReason::WrongTile {
            tile: TileId::new(1)
        })
    );
    assert_eq!(query::points(&world), 0);
}

#[test]
fn clicking_empty_space_fails_with_missed_click() {
    let mut world = board_with(&[(1, 100.0)]);

    let _ = click(&mut world, 20.0, 500.0);

    assert_eq!(
        query::failure(&world),
        Some(FailureReason::MissedClick {
            at: SurfacePoint::new(20.0, 500.0)
        })
    );
}

#[test]
fn clicking_a_spent_tile_fails() {
    let mut world = board_with(&[(1, 100.0), (2, -140.0)]);
    let _ = click(&mut world, 150.0, 200.0);

    let _ = click(&mut world, 150.0, 200.0);

    assert_eq!(
        query::failure(&world),
        Some(FailureReason::WrongTile {
            tile: TileId::new(0)
        })
    );
    assert_eq!(query::points(&world), 1);
}

#[test]
fn tile_edges_count_as_hits() {
    let world = board_with(&[(1, 100.0)]);
    let view = query::tile_view(&world);
    let mut resolution = ClickResolution::new();

    for (x, y) in [(135.0, 100.0), (270.0, 340.0), (135.0, 340.0), (270.0, 100.0)] {
        assert_eq!(
            resolution.classify(SurfacePoint::new(x, y), &view),
            ClickOutcome::Hit {
                tile: TileId::new(0)
            },
            "({x}, {y}) lies on the tile boundary"
        );
    }
    assert_eq!(
        resolution.classify(SurfacePoint::new(134.9, 100.0), &view),
        ClickOutcome::Miss
    );
}

#[test]
fn overlapping_tiles_prefer_the_target() {
    let snapshot = |id: u32, y: f32, is_target: bool| TileSnapshot {
        id: TileId::new(id),
        lane: Lane::new(0),
        x: 0.0,
        y,
        width: 100.0,
        height: 100.0,
        color: TileColor::BLACK,
        clicked: false,
        is_target,
    };
    let view = TileView::from_snapshots(vec![snapshot(0, 0.0, false), snapshot(1, 50.0, true)]);
    let mut resolution = ClickResolution::new();

    assert_eq!(
        resolution.classify(SurfacePoint::new(10.0, 75.0), &view),
        ClickOutcome::Hit {
            tile: TileId::new(1)
        }
    );
    assert_eq!(
        resolution.classify(SurfacePoint::new(10.0, 25.0), &view),
        ClickOutcome::WrongTile {
            tile: TileId::new(0)
        }
    );
}
