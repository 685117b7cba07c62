//! Hover card for the player or naval unit under the pointer.

use frontline_core::{InfoCard, InputEvent, PlayerCard, PlayerInfoOverlay as OverlayState, UnitCard};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_pointer_events;
use crate::state::HudContext;

#[function_component(PlayerInfoOverlay)]
pub fn player_info_overlay() -> Html {
    let ctx = use_context::<HudContext>().expect("HudContext not found");
    let overlay = use_mut_ref(|| OverlayState::new(&ctx.config));
    let force_update = use_force_update();

    {
        let overlay = overlay.clone();
        use_effect_with((), move |_| {
            overlay.borrow_mut().init();
            || ()
        });
    }

    {
        let overlay = overlay.clone();
        let ctx = ctx.clone();
        let force_update = force_update.clone();
        use_pointer_events(Callback::from(move |event: InputEvent| {
            let request = {
                let game = ctx.game.borrow();
                let viewport = ctx.viewport.borrow();
                overlay.borrow_mut().on_input(&event, &*game, &*viewport)
            };
            if let Some(request) = request {
                let fetch = ctx.host.profile(request.player.clone());
                let overlay = overlay.clone();
                let force_update = force_update.clone();
                spawn_local(async move {
                    let Some(profile) = fetch.await else {
                        tracing::debug!("profile fetch for {} failed", request.player);
                        return;
                    };
                    if overlay.borrow_mut().resolve_profile(request.generation, profile) {
                        force_update.force_update();
                    }
                });
            }
            force_update.force_update();
        }));
    }

    let card = overlay.borrow().card(&*ctx.game.borrow(), ctx.client_id());
    match card {
        Some(InfoCard::Player(card)) => render_player_card(&card),
        Some(InfoCard::Unit(card)) => render_unit_card(&card),
        None => html! {},
    }
}

fn render_player_card(card: &PlayerCard) -> Html {
    let units = [
        ("Ports", card.ports),
        ("Cities", card.cities),
        ("Missile Silos", card.missile_silos),
        ("SAMs", card.sam_launchers),
    ];

    html! {
        <div class={classes!("info-overlay", "player-card", card.friendly.then_some("friendly"))}>
            <div class="info-header">
                if let Some(flag) = &card.flag {
                    <img class="info-flag" src={flag.clone()} alt="" />
                }
                <span
                    class="info-color"
                    style={format!("background: {};", card.color.to_rgb_string())}
                />
                <span class="info-name">{ &card.name }</span>
            </div>
            if let Some(team) = &card.team {
                <div class="info-row">{ format!("Team: {team}") }</div>
            }
            <div class="info-row">{ format!("Type: {}", card.type_label) }</div>
            if let Some(troops) = &card.defending_troops {
                <div class="info-row">{ format!("Defending troops: {troops}") }</div>
            }
            if let Some(troops) = &card.attacking_troops {
                <div class="info-row">{ format!("Attacking troops: {troops}") }</div>
            }
            <div class="info-row">{ format!("Gold: {}", card.gold) }</div>
            { for units.iter().map(|(label, count)| html! {
                <div class="info-row">{ format!("{label}: {count}") }</div>
            })}
            if let Some(attitude) = &card.attitude {
                <div class="info-row">
                    { "Attitude: " }
                    <span class={attitude.class}>{ attitude.label }</span>
                </div>
            }
        </div>
    }
}

fn render_unit_card(card: &UnitCard) -> Html {
    html! {
        <div class={classes!("info-overlay", "unit-card", card.friendly.then_some("friendly"))}>
            <div class="info-header">
                <span class="info-name">{ &card.owner_name }</span>
            </div>
            <div class="info-row">{ &card.unit_type }</div>
            if let Some(health) = card.health {
                <div class="info-row">{ format!("Health: {health}") }</div>
            }
        </div>
    }
}
