//! Hook for loading the persisted HUD settings.

use frontline_core::HudConfig;
use yew::prelude::*;

use crate::hooks::use_localstorage;

const CONFIG_HUD_KEY: &str = "$frontline-hud$/config/hud";

#[hook]
pub fn use_hud_config() -> UseStateHandle<HudConfig> {
    use_localstorage(CONFIG_HUD_KEY, HudConfig::default)
}
