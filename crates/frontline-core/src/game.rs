//! Shared game vocabulary consumed by the HUD widgets.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable player identifier assigned by the simulation.
pub type PlayerId = String;

/// Compact player index used as the key of relation tables.
pub type SmallId = u16;

/// Identifier of a connected client (browser session).
pub type ClientId = String;

/// Opaque reference to a map tile.
pub type TileRef = u32;

/// Unique identifier for a unit.
pub type UnitId = u32;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    /// CSS `rgb(...)` string for inline swatch styles.
    pub fn to_rgb_string(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Who controls a player slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerType {
    Bot,
    /// AI-controlled nation that keeps relations with other players.
    FakeHuman,
    Human,
}

impl PlayerType {
    pub fn label(self) -> &'static str {
        match self {
            PlayerType::Bot => "Bot",
            PlayerType::FakeHuman => "Nation",
            PlayerType::Human => "Player",
        }
    }
}

/// Attitude an AI nation holds towards another player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Relation {
    Hostile,
    Distrustful,
    #[default]
    Neutral,
    Friendly,
}

impl Relation {
    pub fn label(self) -> &'static str {
        match self {
            Relation::Hostile => "Hostile",
            Relation::Distrustful => "Distrustful",
            Relation::Neutral => "Neutral",
            Relation::Friendly => "Friendly",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Relation::Hostile => "text-red-500",
            Relation::Distrustful => "text-red-300",
            Relation::Neutral => "text-white",
            Relation::Friendly => "text-green-500",
        }
    }
}

/// Kinds of mobile and static assets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UnitType {
    Warship,
    TradeShip,
    TransportShip,
    Port,
    City,
    MissileSilo,
    SamLauncher,
    DefensePost,
    AtomBomb,
    HydrogenBomb,
    Mirv,
    MirvWarhead,
}

impl UnitType {
    /// Naval units that can be hovered on water tiles.
    pub const NAVAL: [UnitType; 3] = [
        UnitType::Warship,
        UnitType::TradeShip,
        UnitType::TransportShip,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UnitType::Warship => "Warship",
            UnitType::TradeShip => "Trade Ship",
            UnitType::TransportShip => "Transport",
            UnitType::Port => "Port",
            UnitType::City => "City",
            UnitType::MissileSilo => "Missile Silo",
            UnitType::SamLauncher => "SAM Launcher",
            UnitType::DefensePost => "Defense Post",
            UnitType::AtomBomb => "Atom Bomb",
            UnitType::HydrogenBomb => "Hydrogen Bomb",
            UnitType::Mirv => "MIRV",
            UnitType::MirvWarhead => "MIRV Warhead",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An attack a player currently has in flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attack {
    /// Target player, `None` when attacking unclaimed land.
    pub target: Option<PlayerId>,
    /// Troops committed (internal resolution).
    pub troops: u64,
}

/// Per-player counters recorded by the simulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerStats {
    /// Nukes launched, keyed by target player then warhead type.
    pub sent_nukes: HashMap<PlayerId, HashMap<UnitType, u32>>,
}

/// Player data fetched asynchronously on demand.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerProfile {
    pub relations: HashMap<SmallId, Relation>,
}

impl PlayerProfile {
    pub fn relation_to(&self, small_id: SmallId) -> Relation {
        self.relations.get(&small_id).copied().unwrap_or_default()
    }
}

/// Interactions the acting player may perform on the target player.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerInteraction {
    pub can_send_alliance_request: bool,
    pub can_break_alliance: bool,
    pub can_donate: bool,
    pub can_target: bool,
    pub can_embargo: bool,
    pub can_send_emoji: bool,
}

/// Permission snapshot for "my player acting on a target tile".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerActions {
    pub can_send_emoji_all_players: bool,
    /// `None` when the tile has no player owner to interact with.
    pub interaction: Option<PlayerInteraction>,
}

impl PlayerActions {
    /// Interaction flags, all false when absent.
    pub fn interaction(&self) -> PlayerInteraction {
        self.interaction.unwrap_or_default()
    }
}
