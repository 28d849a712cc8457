//! Tile model and the per-tick motion, target and pruning rules.

use piano_tiles_core::{Lane, TileColor, TileId, TileSnapshot};

#[derive(Clone, Debug)]
pub(crate) struct Tile {
    pub(crate) id: TileId,
    pub(crate) lane: Lane,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) color: TileColor,
    pub(crate) clicked: bool,
    pub(crate) is_target: bool,
}

impl Tile {
    pub(crate) fn snapshot(&self) -> TileSnapshot {
        TileSnapshot {
            id: self.id,
            lane: self.lane,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            color: self.color,
            clicked: self.clicked,
            is_target: self.is_target,
        }
    }

    pub(crate) fn claim(&mut self, fade: u8) {
        self.clicked = true;
        self.color = self.color.dimmed(fade);
    }
}

/// Selects the unclicked tile furthest down the surface.
///
/// Ties keep the tile created first.
pub(crate) fn resolve_target(tiles: &[Tile]) -> Option<TileId> {
    let mut target: Option<&Tile> = None;
    for tile in tiles.iter().filter(|tile| !tile.clicked) {
        if target.map_or(true, |current| tile.y > current.y) {
            target = Some(tile);
        }
    }
    target.map(|tile| tile.id)
}

/// Flags exactly the resolved target and clears every other tile.
pub(crate) fn designate_target(tiles: &mut [Tile]) -> Option<TileId> {
    let target = resolve_target(tiles);
    for tile in tiles.iter_mut() {
        tile.is_target = Some(tile.id) == target;
    }
    target
}

pub(crate) fn advance(tiles: &mut [Tile], displacement: f32) {
    for tile in tiles.iter_mut() {
        tile.y += displacement;
    }
}

/// Removes every tile whose top edge lies strictly below `surface_height`.
pub(crate) fn prune_exited(tiles: &mut Vec<Tile>, surface_height: f32) -> Vec<Tile> {
    let mut exited = Vec::new();
    tiles.retain(|tile| {
        if tile.y > surface_height {
            exited.push(tile.clone());
            false
        } else {
            true
        }
    });
    exited
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: u32, y: f32, clicked: bool) -> Tile {
        Tile {
            id: TileId::new(id),
            lane: Lane::new(0),
            x: 0.0,
            y,
            width: 10.0,
            height: 10.0,
            color: TileColor::BLACK,
            clicked,
            is_target: false,
        }
    }

    #[test]
    fn target_is_lowest_unclicked_tile() {
        let tiles = vec![tile(0, 50.0, true), tile(1, 30.0, false), tile(2, -10.0, false)];
        assert_eq!(resolve_target(&tiles), Some(TileId::new(1)));
    }

    #[test]
    fn equal_positions_prefer_earliest_tile() {
        let tiles = vec![tile(4, 20.0, false), tile(5, 20.0, false)];
        assert_eq!(resolve_target(&tiles), Some(TileId::new(4)));
    }

    #[test]
    fn no_target_when_everything_is_clicked() {
        let mut tiles = vec![tile(0, 10.0, true), tile(1, 0.0, true)];
        assert_eq!(designate_target(&mut tiles), None);
        assert!(tiles.iter().all(|tile| !tile.is_target));
    }

    #[test]
    fn prune_keeps_tiles_resting_on_the_edge() {
        let mut tiles = vec![tile(0, 960.0, false), tile(1, 960.5, true), tile(2, 961.0, false)];
        let exited = prune_exited(&mut tiles, 960.0);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].id, TileId::new(0));
        let ids: Vec<u32> = exited.iter().map(|tile| tile.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn claim_dims_alpha_without_wrapping() {
        let mut spent = tile(0, 0.0, false);
        spent.color = TileColor::from_rgba(0, 0, 0, 60);
        spent.claim(100);
        assert!(spent.clicked);
        assert_eq!(spent.color.alpha, 0);
    }
}
