//! Error types for the HUD layer.

use thiserror::Error;

use crate::game::TileRef;

#[derive(Debug, Error)]
pub enum HudError {
    #[error("event bus is closed")]
    BusClosed,

    #[error("emoji {0:?} is not in the emoji table")]
    UnknownEmoji(String),

    #[error("tile {0} is not owned by a player")]
    NotPlayerOwned(TileRef),

    #[error("invalid HUD config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
