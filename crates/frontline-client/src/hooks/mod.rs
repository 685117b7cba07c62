mod use_hud_config;
mod use_localstorage;
mod use_pointer_events;
mod use_tick;

pub use use_hud_config::use_hud_config;
pub use use_localstorage::use_localstorage;
pub use use_pointer_events::use_pointer_events;
pub use use_tick::use_tick;
