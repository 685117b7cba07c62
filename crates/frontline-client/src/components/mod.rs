mod emoji_table;
mod leaderboard;
mod map_canvas;
mod player_info_overlay;
mod player_panel;

pub use emoji_table::EmojiTable;
pub use leaderboard::Leaderboard;
pub use map_canvas::{CANVAS_HEIGHT, CANVAS_WIDTH, MapCanvas};
pub use player_info_overlay::PlayerInfoOverlay;
pub use player_panel::{PanelOpen, PlayerPanel};
