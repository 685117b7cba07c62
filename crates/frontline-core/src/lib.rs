//! Frontline HUD Core Library
//!
//! Pure view layer for the in-game HUD: the leaderboard, the hover info
//! overlay and the diplomacy panel. Widgets read a [`GameView`] snapshot,
//! derive plain view models and emit [`Intent`]s on the [`EventBus`]. They
//! never mutate game state.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod emoji;
pub mod error;
pub mod event;
pub mod format;
pub mod game;
pub mod leaderboard;
pub mod overlay;
pub mod panel;
pub mod snapshot;
pub mod throttle;
pub mod transform;
pub mod view;

pub use config::HudConfig;
pub use error::HudError;
pub use event::{EmbargoAction, EmojiRecipient, EventBus, InputEvent, Intent, SubscriptionId};
pub use game::{
    Attack, ClientId, Color, PlayerActions, PlayerId, PlayerInteraction, PlayerProfile,
    PlayerStats, PlayerType, Relation, SmallId, TileRef, UnitId, UnitType,
};
pub use leaderboard::{Entry, Leaderboard};
pub use overlay::{InfoCard, PlayerCard, PlayerInfoOverlay, ProfileRequest, UnitCard};
pub use panel::{ActionsRequest, PanelControl, PanelView, PlayerPanel};
pub use snapshot::{GameSnapshot, GameSnapshotBuilder};
pub use throttle::SampleThrottle;
pub use transform::{ScreenTransform, Viewport, WorldCoord};
pub use view::{GameView, PlayerView, UnitView};
