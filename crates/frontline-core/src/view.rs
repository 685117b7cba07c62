//! Read-only projections the widgets query each tick.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::game::{
    Attack, ClientId, Color, PlayerId, PlayerStats, PlayerType, SmallId, TileRef, UnitId,
    UnitType,
};

/// Lightweight projection of a player for one tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub small_id: SmallId,
    pub client_id: Option<ClientId>,
    pub name: String,
    /// Name as shown in lists (may include clan tags).
    pub display_name: String,
    pub color: Color,
    pub team: Option<String>,
    pub flag: Option<String>,
    pub player_type: PlayerType,
    pub tiles_owned: u32,
    pub gold: u64,
    /// Troops at internal resolution (10x display value).
    pub troops: u64,
    pub alive: bool,
    pub traitor: bool,
    #[serde(default)]
    pub allies: HashSet<PlayerId>,
    /// Players this player refuses to trade with.
    #[serde(default)]
    pub embargoes: HashSet<PlayerId>,
    #[serde(default)]
    pub unit_counts: HashMap<UnitType, u32>,
    #[serde(default)]
    pub outgoing_attacks: Vec<Attack>,
    pub stats: Option<PlayerStats>,
}

impl PlayerView {
    /// Creates a living human player with no holdings.
    pub fn new(id: impl Into<PlayerId>, small_id: SmallId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            small_id,
            client_id: None,
            display_name: name.clone(),
            name,
            color: Color::GRAY,
            team: None,
            flag: None,
            player_type: PlayerType::Human,
            tiles_owned: 0,
            gold: 0,
            troops: 0,
            alive: true,
            traitor: false,
            allies: HashSet::new(),
            embargoes: HashSet::new(),
            unit_counts: HashMap::new(),
            outgoing_attacks: Vec::new(),
            stats: None,
        }
    }

    pub fn is_allied_with(&self, other: &PlayerView) -> bool {
        self.allies.contains(&other.id)
    }

    /// Same team or allied.
    pub fn is_friendly(&self, other: &PlayerView) -> bool {
        let same_team = matches!((&self.team, &other.team), (Some(a), Some(b)) if a == b);
        same_team || self.is_allied_with(other)
    }

    pub fn has_embargo_against(&self, other: &PlayerView) -> bool {
        self.embargoes.contains(&other.id)
    }

    /// Number of owned units of the given type.
    pub fn units(&self, unit_type: UnitType) -> u32 {
        self.unit_counts.get(&unit_type).copied().unwrap_or(0)
    }

    /// Sum of troops committed to outgoing attacks.
    pub fn outgoing_troops(&self) -> u64 {
        self.outgoing_attacks.iter().map(|a| a.troops).sum()
    }
}

/// Projection of a single unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitView {
    pub id: UnitId,
    pub unit_type: UnitType,
    pub owner: PlayerId,
    pub tile: TileRef,
    pub health: Option<u32>,
}

/// Query surface of the externally owned game state.
///
/// Implementations must be stable for the duration of a tick; widgets
/// borrow the snapshot immutably and never hold on to it.
pub trait GameView {
    fn ticks(&self) -> u64;
    fn in_spawn_phase(&self) -> bool;
    fn num_land_tiles(&self) -> u32;
    fn num_tiles_with_fallout(&self) -> u32;
    /// All players in encounter order.
    fn player_views(&self) -> &[PlayerView];
    fn player(&self, id: &str) -> Option<&PlayerView>;
    fn is_valid_coord(&self, x: i32, y: i32) -> bool;
    fn tile_ref(&self, x: i32, y: i32) -> Option<TileRef>;
    fn x(&self, tile: TileRef) -> i32;
    fn y(&self, tile: TileRef) -> i32;
    /// Owning player, `None` for unclaimed tiles.
    fn owner(&self, tile: TileRef) -> Option<&PlayerView>;
    fn is_land(&self, tile: TileRef) -> bool;
    /// Units matching any of the given types, in encounter order.
    fn units(&self, types: &[UnitType]) -> Vec<&UnitView>;

    fn player_by_client_id(&self, client_id: &str) -> Option<&PlayerView> {
        self.player_views()
            .iter()
            .find(|p| p.client_id.as_deref() == Some(client_id))
    }
}
