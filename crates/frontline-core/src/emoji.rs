//! Fixed emoji palette. Emojis travel over the wire as their index in the
//! flattened table, so the order here is part of the protocol.

use crate::error::HudError;

pub const EMOJI_TABLE: [[&str; 5]; 9] = [
    ["😀", "😊", "🥰", "😇", "😎"],
    ["😞", "🥺", "😭", "😱", "😡"],
    ["😈", "🤡", "🥱", "🫡", "🖕"],
    ["👋", "👏", "🤌", "👍", "👎"],
    ["❓", "🐔", "🐀", "🤝", "🆘"],
    ["🕊️", "🏳️", "⏳", "🔥", "💀"],
    ["💥", "🤚", "👑", "🎯", "🧊"],
    ["🏠", "🛡️", "🏭", "⚓", "🚢"],
    ["⬅️", "⬆️", "⬇️", "➡️", "❤️"],
];

/// Row-major flattening of [`EMOJI_TABLE`].
pub fn flattened_emoji_table() -> impl Iterator<Item = &'static str> {
    EMOJI_TABLE.iter().flat_map(|row| row.iter().copied())
}

pub fn emoji_index(emoji: &str) -> Result<usize, HudError> {
    flattened_emoji_table()
        .position(|e| e == emoji)
        .ok_or_else(|| HudError::UnknownEmoji(emoji.to_string()))
}
