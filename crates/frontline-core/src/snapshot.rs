//! In-memory game snapshot.
//!
//! Hosts that receive the game state as data (JSON over the transport, or a
//! test fixture) load it into a [`GameSnapshot`], which implements
//! [`GameView`] over a row-major tile grid.

use serde::{Deserialize, Serialize};

use crate::game::{PlayerId, TileRef, UnitType};
use crate::view::{GameView, PlayerView, UnitView};

/// Per-tile terrain and ownership.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TileState {
    pub land: bool,
    pub fallout: bool,
    pub owner: Option<PlayerId>,
}

/// Complete read-only snapshot for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub ticks: u64,
    pub spawn_phase: bool,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<TileState>,
    pub players: Vec<PlayerView>,
    pub units: Vec<UnitView>,
}

impl GameSnapshot {
    pub fn builder(width: u32, height: u32) -> GameSnapshotBuilder {
        GameSnapshotBuilder::new(width, height)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn tile(&self, tile: TileRef) -> Option<&TileState> {
        self.tiles.get(tile as usize)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut PlayerView> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Recomputes `tiles_owned` for every player from the tile grid.
    pub fn recount_tiles(&mut self) {
        for player in &mut self.players {
            #[allow(clippy::cast_possible_truncation)]
            let owned = self
                .tiles
                .iter()
                .filter(|t| t.owner.as_deref() == Some(player.id.as_str()))
                .count() as u32;
            player.tiles_owned = owned;
        }
    }
}

impl GameView for GameSnapshot {
    fn ticks(&self) -> u64 {
        self.ticks
    }

    fn in_spawn_phase(&self) -> bool {
        self.spawn_phase
    }

    fn num_land_tiles(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let count = self.tiles.iter().filter(|t| t.land).count() as u32;
        count
    }

    fn num_tiles_with_fallout(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let count = self.tiles.iter().filter(|t| t.fallout).count() as u32;
        count
    }

    fn player_views(&self) -> &[PlayerView] {
        &self.players
    }

    fn player(&self, id: &str) -> Option<&PlayerView> {
        self.players.iter().find(|p| p.id == id)
    }

    fn is_valid_coord(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn tile_ref(&self, x: i32, y: i32) -> Option<TileRef> {
        if !self.is_valid_coord(x, y) {
            return None;
        }
        #[allow(clippy::cast_sign_loss)]
        let tile = y as u32 * self.width + x as u32;
        Some(tile)
    }

    fn x(&self, tile: TileRef) -> i32 {
        #[allow(clippy::cast_possible_wrap)]
        let x = (tile % self.width.max(1)) as i32;
        x
    }

    fn y(&self, tile: TileRef) -> i32 {
        #[allow(clippy::cast_possible_wrap)]
        let y = (tile / self.width.max(1)) as i32;
        y
    }

    fn owner(&self, tile: TileRef) -> Option<&PlayerView> {
        let owner = self.tile(tile)?.owner.as_deref()?;
        self.player(owner)
    }

    fn is_land(&self, tile: TileRef) -> bool {
        self.tile(tile).is_some_and(|t| t.land)
    }

    fn units(&self, types: &[UnitType]) -> Vec<&UnitView> {
        self.units
            .iter()
            .filter(|u| types.contains(&u.unit_type))
            .collect()
    }
}

/// Builder for snapshots, starting from an all-water map.
#[derive(Debug, Clone)]
pub struct GameSnapshotBuilder {
    snapshot: GameSnapshot,
}

impl GameSnapshotBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            snapshot: GameSnapshot {
                width,
                height,
                tiles: vec![TileState::default(); (width * height) as usize],
                ..GameSnapshot::default()
            },
        }
    }

    pub fn ticks(mut self, ticks: u64) -> Self {
        self.snapshot.ticks = ticks;
        self
    }

    pub fn spawn_phase(mut self, spawn_phase: bool) -> Self {
        self.snapshot.spawn_phase = spawn_phase;
        self
    }

    /// Marks the rectangle `[x0, x1) x [y0, y1)` as land.
    pub fn land_rect(mut self, x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        self.for_rect(x0, y0, x1, y1, |t| t.land = true);
        self
    }

    /// Marks the rectangle as contaminated.
    pub fn fallout_rect(mut self, x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        self.for_rect(x0, y0, x1, y1, |t| t.fallout = true);
        self
    }

    /// Assigns the rectangle to `owner`.
    pub fn owned_rect(mut self, owner: &str, x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        self.for_rect(x0, y0, x1, y1, |t| t.owner = Some(owner.to_string()));
        self
    }

    pub fn player(mut self, player: PlayerView) -> Self {
        self.snapshot.players.push(player);
        self
    }

    pub fn unit(mut self, unit: UnitView) -> Self {
        self.snapshot.units.push(unit);
        self
    }

    /// Finishes the snapshot. Players whose `tiles_owned` is zero get it
    /// counted from the grid.
    pub fn build(mut self) -> GameSnapshot {
        let tiles = &self.snapshot.tiles;
        for player in &mut self.snapshot.players {
            if player.tiles_owned == 0 {
                #[allow(clippy::cast_possible_truncation)]
                let owned = tiles
                    .iter()
                    .filter(|t| t.owner.as_deref() == Some(player.id.as_str()))
                    .count() as u32;
                player.tiles_owned = owned;
            }
        }
        self.snapshot
    }

    fn for_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, f: impl Fn(&mut TileState)) {
        let width = self.snapshot.width;
        for y in y0..y1.min(self.snapshot.height) {
            for x in x0..x1.min(width) {
                if let Some(tile) = self.snapshot.tiles.get_mut((y * width + x) as usize) {
                    f(tile);
                }
            }
        }
    }
}
