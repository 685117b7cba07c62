//! Diplomacy panel for the clicked tile's owner.

use frontline_core::{
    ActionsRequest, InputEvent, PanelControl, PlayerActions, PlayerPanel as PanelState, TileRef,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::EmojiTable;
use crate::hooks::use_pointer_events;
use crate::state::HudContext;

/// Request to open the panel, issued once the permission fetch for a map
/// click resolved. `seq` distinguishes repeated clicks on the same tile.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelOpen {
    pub seq: u64,
    pub actions: PlayerActions,
    pub tile: TileRef,
}

#[derive(Properties, PartialEq)]
pub struct PlayerPanelProps {
    pub open: Option<PanelOpen>,
}

#[function_component(PlayerPanel)]
pub fn player_panel(props: &PlayerPanelProps) -> Html {
    let ctx = use_context::<HudContext>().expect("HudContext not found");
    let panel = use_mut_ref(PanelState::new);
    let show_emoji = use_state(|| false);
    let force_update = use_force_update();

    {
        let panel = panel.clone();
        let show_emoji = show_emoji.clone();
        let force_update = force_update.clone();
        use_effect_with(props.open.clone(), move |open| {
            if let Some(open) = open {
                panel.borrow_mut().show(open.actions, open.tile);
                show_emoji.set(false);
                force_update.force_update();
            }
            || ()
        });
    }

    // Permissions change as the game advances; refetch while open.
    {
        let panel = panel.clone();
        let ctx = ctx.clone();
        let force_update = force_update.clone();
        use_effect_with(ctx.tick, move |_| {
            let request = panel.borrow_mut().tick(&*ctx.game.borrow(), ctx.client_id());
            if let Some(ActionsRequest {
                generation,
                player,
                tile,
            }) = request
            {
                let fetch = ctx.host.actions(player, tile);
                spawn_local(async move {
                    let Some(actions) = fetch.await else {
                        tracing::debug!("actions fetch for tile {tile} failed");
                        return;
                    };
                    if panel.borrow_mut().resolve_actions(generation, actions) {
                        force_update.force_update();
                    }
                });
            }
            || ()
        });
    }

    {
        let panel = panel.clone();
        let show_emoji = show_emoji.clone();
        let force_update = force_update.clone();
        use_pointer_events(Callback::from(move |event: InputEvent| {
            if matches!(event, InputEvent::MouseUp { .. }) && panel.borrow().is_visible() {
                panel.borrow_mut().on_mouse_up();
                show_emoji.set(false);
                force_update.force_update();
            }
        }));
    }

    let on_emoji_select = {
        let panel = panel.clone();
        let ctx = ctx.clone();
        let show_emoji = show_emoji.clone();
        Callback::from(move |emoji: &'static str| {
            let result =
                panel
                    .borrow_mut()
                    .send_emoji(emoji, &*ctx.game.borrow(), ctx.client_id(), &ctx.bus);
            if let Err(e) = result {
                tracing::warn!("emoji not sent: {e}");
            }
            show_emoji.set(false);
        })
    };

    let on_emoji_close = {
        let show_emoji = show_emoji.clone();
        Callback::from(move |()| show_emoji.set(false))
    };

    let view = panel.borrow_mut().view(&*ctx.game.borrow(), ctx.client_id());
    let Some(view) = view else {
        return html! {};
    };

    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    let on_close = {
        let panel = panel.clone();
        let show_emoji = show_emoji.clone();
        let force_update = force_update.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            panel.borrow_mut().hide();
            show_emoji.set(false);
            force_update.force_update();
        })
    };

    html! {
        <>
            <div class="player-panel" onmouseup={stop.clone()} onclick={stop}>
                <div class="panel-header">
                    <span
                        class="panel-color"
                        style={format!("background: {};", view.color.to_rgb_string())}
                    />
                    <span class="panel-name">{ &view.name }</span>
                    <button class="panel-close" onclick={on_close}>{ "✕" }</button>
                </div>
                <div class="panel-stats">
                    <div>{ format!("Gold: {}", view.gold) }</div>
                    <div>{ format!("Troops: {}", view.troops) }</div>
                    <div>{ format!("Traitor: {}", if view.traitor { "Yes" } else { "No" }) }</div>
                    if !view.is_self {
                        <div>
                            { format!("Embargo against you: {}", if view.embargo_against_you { "Yes" } else { "No" }) }
                        </div>
                        <div>{ format!("Nukes sent to you: {}", view.nukes_sent) }</div>
                    }
                </div>
                <div class="panel-controls">
                    { for view.controls.iter().map(|&control| {
                        let onclick = {
                            let panel = panel.clone();
                            let ctx = ctx.clone();
                            let show_emoji = show_emoji.clone();
                            let force_update = force_update.clone();
                            Callback::from(move |_: MouseEvent| {
                                if control == PanelControl::Emoji {
                                    show_emoji.set(true);
                                    return;
                                }
                                panel.borrow_mut().activate(
                                    control,
                                    &*ctx.game.borrow(),
                                    ctx.client_id(),
                                    &ctx.bus,
                                );
                                force_update.force_update();
                            })
                        };
                        html! {
                            <button class="panel-control" {onclick}>{ control.label() }</button>
                        }
                    })}
                </div>
            </div>
            if *show_emoji {
                <EmojiTable on_select={on_emoji_select} on_close={on_emoji_close} />
            }
        </>
    }
}
